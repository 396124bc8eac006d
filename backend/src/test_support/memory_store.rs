//! In-memory implementation of the repository ports.
//!
//! Mirrors the PostgreSQL adapter's classification: the passport pair is
//! unique, tasks reference existing users, deleting a user drops its tasks and
//! a finished task cannot be finished again.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use mockable::Clock;
use pagination::{Page, PageRequest};

use crate::domain::ports::{
    PASSPORT_UNIQUE_CONSTRAINT, RepositoryError, TASK_OPEN_CONSTRAINT, TASK_SUBJECT,
    TaskRepository, USER_SUBJECT, UserRepository,
};
use crate::domain::{
    ActivityWindow, NewTask, NewUser, Passport, Task, TaskId, UpdateSpec, User, UserId,
};

#[derive(Debug, Default)]
struct StoreState {
    users: BTreeMap<i32, User>,
    tasks: BTreeMap<i32, Task>,
    last_user_id: i32,
    last_task_id: i32,
}

impl StoreState {
    fn passport_taken(&self, passport: Passport, except: Option<UserId>) -> bool {
        self.users
            .values()
            .any(|user| user.passport == passport && Some(user.id) != except)
    }
}

/// Repository double backed by ordered maps.
pub struct InMemoryStore {
    state: Mutex<StoreState>,
    clock: Arc<dyn Clock>,
}

impl InMemoryStore {
    /// Create an empty store stamping task times from `clock`.
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            state: Mutex::new(StoreState::default()),
            clock,
        }
    }

    /// Number of stored users.
    #[must_use]
    pub fn user_count(&self) -> usize {
        self.lock().users.len()
    }

    /// Number of stored tasks.
    #[must_use]
    pub fn task_count(&self) -> usize {
        self.lock().tasks.len()
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new(Arc::new(mockable::DefaultClock))
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create(&self, user: &NewUser) -> Result<User, RepositoryError> {
        let mut state = self.lock();
        if state.passport_taken(user.passport, None) {
            return Err(RepositoryError::conflict(PASSPORT_UNIQUE_CONSTRAINT));
        }
        state.last_user_id += 1;
        let stored = user.clone().into_user(UserId::new(state.last_user_id));
        state.users.insert(stored.id.get(), stored.clone());
        Ok(stored)
    }

    async fn update(&self, id: UserId, spec: &UpdateSpec) -> Result<User, RepositoryError> {
        let mut state = self.lock();
        let mut updated = state
            .users
            .get(&id.get())
            .cloned()
            .ok_or_else(|| RepositoryError::not_found(USER_SUBJECT, id.get()))?;
        spec.apply_to(&mut updated);
        if spec.touches_passport() && state.passport_taken(updated.passport, Some(id)) {
            return Err(RepositoryError::conflict(PASSPORT_UNIQUE_CONSTRAINT));
        }
        state.users.insert(id.get(), updated.clone());
        Ok(updated)
    }

    async fn delete(&self, id: UserId) -> Result<(), RepositoryError> {
        let mut state = self.lock();
        if state.users.remove(&id.get()).is_none() {
            return Err(RepositoryError::not_found(USER_SUBJECT, id.get()));
        }
        state.tasks.retain(|_, task| task.user_id != id);
        Ok(())
    }

    async fn list(&self, request: &PageRequest) -> Result<Page<User>, RepositoryError> {
        let state = self.lock();
        let total = u64::try_from(state.users.len())
            .map_err(|err| RepositoryError::operation_failure(err.to_string()))?;
        let skip = usize::try_from(request.offset())
            .map_err(|err| RepositoryError::operation_failure(err.to_string()))?;
        let take = usize::try_from(request.page_size())
            .map_err(|err| RepositoryError::operation_failure(err.to_string()))?;
        let items = state.users.values().skip(skip).take(take).cloned().collect();
        Ok(Page::new(request, items, total))
    }
}

#[async_trait]
impl TaskRepository for InMemoryStore {
    async fn create(&self, task: &NewTask) -> Result<Task, RepositoryError> {
        let started_at = self.clock.utc();
        let mut state = self.lock();
        if !state.users.contains_key(&task.user_id.get()) {
            return Err(RepositoryError::not_found(USER_SUBJECT, task.user_id.get()));
        }
        state.last_task_id += 1;
        let stored = Task {
            id: TaskId::new(state.last_task_id),
            user_id: task.user_id,
            name: task.name.clone(),
            started_at,
            finished_at: None,
        };
        state.tasks.insert(stored.id.get(), stored.clone());
        Ok(stored)
    }

    async fn finish(&self, id: TaskId) -> Result<Task, RepositoryError> {
        let now = self.clock.utc();
        let mut state = self.lock();
        let task = state
            .tasks
            .get_mut(&id.get())
            .ok_or_else(|| RepositoryError::not_found(TASK_SUBJECT, id.get()))?;
        if !task.is_open() {
            return Err(RepositoryError::conflict(TASK_OPEN_CONSTRAINT));
        }
        task.finished_at = Some(now);
        Ok(task.clone())
    }

    async fn list_for_user(
        &self,
        user_id: UserId,
        window: &ActivityWindow,
    ) -> Result<Vec<Task>, RepositoryError> {
        Ok(self
            .lock()
            .tasks
            .values()
            .filter(|task| task.user_id == user_id && window.contains(task.started_at))
            .cloned()
            .collect())
    }
}
