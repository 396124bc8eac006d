//! Domain primitives, ports and services.
//!
//! Purpose: hold the transport- and store-agnostic parts of the system. The
//! passport parser and update builder are pure; services orchestrate them
//! against the repository ports and translate port failures into [`Error`].
//!
//! Public surface:
//! - Error / ErrorCode — classified failure returned by every use-case.
//! - Passport / parse_identifier — composite `"<serie> <number>"` identifier.
//! - User / NewUser / UserId — user records.
//! - UpdateSpec / build_update — ordered partial-update description.
//! - Task / TaskActivity / ActivityWindow — tasks and the activity report.
//! - UserService / TaskService — driving port implementations.

pub mod error;
pub mod passport;
pub mod ports;
pub mod task;
pub mod task_service;
pub mod trace_id;
pub mod user;
pub mod user_service;
pub mod user_update;

pub use self::error::{Error, ErrorCode, ErrorValidationError, INTERNAL_ERROR_MESSAGE};
pub use self::passport::{Passport, PassportParseError, parse_identifier};
pub use self::task::{
    ActivityWindow, ActivityWindowError, NewTask, Task, TaskActivity, TaskId, summarize_activity,
};
pub use self::task_service::TaskService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{NewUser, User, UserId};
pub use self::user_service::UserService;
pub use self::user_update::{
    FieldValue, UpdateSpec, UpdateSpecError, UserChanges, UserField, build_update,
};
