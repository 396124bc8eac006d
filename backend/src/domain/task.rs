//! Tasks and the per-user activity report.
//!
//! A task starts open and may be finished exactly once. The activity report
//! measures how long each task has run, finished or not, and ranks tasks by
//! that duration.

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, TimeDelta, Utc};

use super::user::UserId;

/// Store-assigned task identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId(i32);

impl TaskId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Raw identifier value.
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: TaskId,
    pub user_id: UserId,
    pub name: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl Task {
    /// `true` until the task has been finished.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.finished_at.is_none()
    }

    /// Time the task has been running as of `now`.
    ///
    /// Finished tasks measure up to their finish time. A finish time earlier
    /// than the start time yields zero.
    #[must_use]
    pub fn elapsed(&self, now: DateTime<Utc>) -> TimeDelta {
        let end = self.finished_at.unwrap_or(now);
        (end - self.started_at).max(TimeDelta::zero())
    }
}

/// A task that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub user_id: UserId,
    pub name: String,
}

/// Error raised for an inverted activity window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("dateFrom must not be later than dateTo")]
pub struct ActivityWindowError;

/// Inclusive bounds on task start times; either side may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActivityWindow {
    from: Option<DateTime<Utc>>,
    to: Option<DateTime<Utc>>,
}

impl ActivityWindow {
    /// Build a window, rejecting `from` later than `to`.
    ///
    /// # Errors
    /// [`ActivityWindowError`] when both bounds are set and inverted.
    pub fn new(
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Result<Self, ActivityWindowError> {
        if matches!((from, to), (Some(from), Some(to)) if from > to) {
            return Err(ActivityWindowError);
        }
        Ok(Self { from, to })
    }

    /// A window with no bounds.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            from: None,
            to: None,
        }
    }

    /// Lower bound, inclusive.
    #[must_use]
    pub const fn from(&self) -> Option<DateTime<Utc>> {
        self.from
    }

    /// Upper bound, inclusive.
    #[must_use]
    pub const fn to(&self) -> Option<DateTime<Utc>> {
        self.to
    }

    /// Whether a task started at `started_at` falls inside the window.
    #[must_use]
    pub fn contains(&self, started_at: DateTime<Utc>) -> bool {
        self.from.is_none_or(|from| started_at >= from)
            && self.to.is_none_or(|to| started_at <= to)
    }
}

/// One row of the activity report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskActivity {
    pub task_id: TaskId,
    pub task_name: String,
    pub hours: i64,
    pub minutes: i64,
    pub is_finished: bool,
}

/// Rank `tasks` by elapsed time, longest first, ties by ascending id.
///
/// # Examples
/// ```
/// use chrono::{TimeZone, Utc};
/// use task_tracker::domain::{summarize_activity, Task, TaskId, UserId};
///
/// let start = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
/// let task = Task {
///     id: TaskId::new(1),
///     user_id: UserId::new(1),
///     name: "report".to_owned(),
///     started_at: start,
///     finished_at: Some(start + chrono::TimeDelta::minutes(135)),
/// };
/// let rows = summarize_activity(vec![task], start);
/// assert_eq!((rows[0].hours, rows[0].minutes), (2, 15));
/// ```
#[must_use]
pub fn summarize_activity(tasks: Vec<Task>, now: DateTime<Utc>) -> Vec<TaskActivity> {
    let mut measured: Vec<(TimeDelta, Task)> = tasks
        .into_iter()
        .map(|task| (task.elapsed(now), task))
        .collect();
    measured.sort_by(|(left_elapsed, left), (right_elapsed, right)| {
        match right_elapsed.cmp(left_elapsed) {
            Ordering::Equal => left.id.cmp(&right.id),
            other => other,
        }
    });
    measured
        .into_iter()
        .map(|(elapsed, task)| {
            let hours = elapsed.num_hours();
            TaskActivity {
                task_id: task.id,
                is_finished: !task.is_open(),
                task_name: task.name,
                hours,
                minutes: elapsed.num_minutes() - hours * 60,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::{fixture, rstest};

    #[fixture]
    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 18, 0, 0)
            .single()
            .expect("valid fixture timestamp")
    }

    fn task(id: i32, started_at: DateTime<Utc>, finished_at: Option<DateTime<Utc>>) -> Task {
        Task {
            id: TaskId::new(id),
            user_id: UserId::new(1),
            name: format!("task-{id}"),
            started_at,
            finished_at,
        }
    }

    #[rstest]
    fn open_tasks_measure_up_to_now(now: DateTime<Utc>) {
        let open = task(1, now - TimeDelta::minutes(90), None);
        assert_eq!(open.elapsed(now), TimeDelta::minutes(90));
        assert!(open.is_open());
    }

    #[rstest]
    fn finish_before_start_clamps_to_zero(now: DateTime<Utc>) {
        let inverted = task(1, now, Some(now - TimeDelta::hours(2)));
        assert_eq!(inverted.elapsed(now), TimeDelta::zero());
    }

    #[rstest]
    fn summary_orders_by_elapsed_then_id(now: DateTime<Utc>) {
        let start = now - TimeDelta::hours(5);
        let rows = summarize_activity(
            vec![
                task(4, start, Some(start + TimeDelta::minutes(30))),
                task(2, start, Some(start + TimeDelta::minutes(125))),
                task(3, start, Some(start + TimeDelta::minutes(30))),
                task(1, now - TimeDelta::minutes(10), None),
            ],
            now,
        );
        let ids: Vec<i32> = rows.iter().map(|row| row.task_id.get()).collect();
        assert_eq!(ids, vec![2, 3, 4, 1]);
        let first = rows.first().expect("rows present");
        assert_eq!((first.hours, first.minutes), (2, 5));
        assert!(first.is_finished);
        let last = rows.last().expect("rows present");
        assert_eq!((last.hours, last.minutes), (0, 10));
        assert!(!last.is_finished);
    }

    #[rstest]
    fn window_rejects_inverted_bounds(now: DateTime<Utc>) {
        let result = ActivityWindow::new(Some(now), Some(now - TimeDelta::minutes(1)));
        assert_eq!(result, Err(ActivityWindowError));
    }

    #[rstest]
    fn window_applies_both_bounds_inclusively(now: DateTime<Utc>) {
        let from = now - TimeDelta::hours(2);
        let window = ActivityWindow::new(Some(from), Some(now)).expect("ordered bounds");
        assert!(window.contains(from));
        assert!(window.contains(now));
        assert!(!window.contains(from - TimeDelta::minutes(1)));
        assert!(!window.contains(now + TimeDelta::minutes(1)));
    }

    #[rstest]
    fn unbounded_window_accepts_everything(now: DateTime<Utc>) {
        assert!(ActivityWindow::unbounded().contains(now));
        assert!(ActivityWindow::default().contains(now - TimeDelta::days(365)));
    }
}
