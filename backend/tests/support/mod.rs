//! Shared helpers for integration tests.
//!
//! Database-backed suites read `TASK_TRACKER_TEST_DATABASE_URL`. When it is
//! unset they print a skip marker and return early so the in-memory suites
//! still run everywhere.

#![allow(dead_code, reason = "each test crate uses a different subset")]

use postgres::{Client, NoTls};

/// Environment variable naming a disposable PostgreSQL database.
pub const TEST_DATABASE_URL_VAR: &str = "TASK_TRACKER_TEST_DATABASE_URL";

/// Render a `postgres` error with the server message and SQLSTATE.
pub fn format_postgres_error(error: &postgres::Error) -> String {
    let Some(db_error) = error.as_db_error() else {
        return error.to_string();
    };

    let mut summary = format!(
        "postgres error {:?}: {}",
        db_error.code(),
        db_error.message()
    );
    if let Some(detail) = db_error.detail() {
        summary.push_str("; detail: ");
        summary.push_str(detail);
    }
    summary
}

/// Database URL for the suite, or `None` after printing a skip marker.
pub fn test_database_url() -> Option<String> {
    match std::env::var(TEST_DATABASE_URL_VAR) {
        Ok(url) if !url.trim().is_empty() => Some(url),
        _ => {
            eprintln!("SKIP-TEST-CLUSTER: {TEST_DATABASE_URL_VAR} is not set");
            None
        }
    }
}

/// Empty both tables and restart their identity sequences.
pub fn reset_tables(url: &str) -> Result<(), String> {
    let mut client = Client::connect(url, NoTls).map_err(|err| format_postgres_error(&err))?;
    client
        .batch_execute("TRUNCATE tasks, users RESTART IDENTITY CASCADE;")
        .map_err(|err| format_postgres_error(&err))
}

/// Move a task's `start_time` to `timestamp` (an RFC 3339 literal).
pub fn set_task_start(url: &str, task_id: i32, timestamp: &str) -> Result<(), String> {
    let mut client = Client::connect(url, NoTls).map_err(|err| format_postgres_error(&err))?;
    let escaped = timestamp.replace('\'', "''");
    client
        .batch_execute(&format!(
            "UPDATE tasks SET start_time = TIMESTAMPTZ '{escaped}' WHERE task_id = {task_id};"
        ))
        .map_err(|err| format_postgres_error(&err))
}
