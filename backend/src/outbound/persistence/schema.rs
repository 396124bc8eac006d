//! Diesel table definitions for the PostgreSQL schema.
//!
//! Must match `backend/migrations` exactly.

diesel::table! {
    /// Registered users; `(passport_serie, passport_number)` is unique.
    users (user_id) {
        user_id -> Int4,
        passport_serie -> Int4,
        passport_number -> Int4,
        surname -> Varchar,
        name -> Varchar,
    }
}

diesel::table! {
    /// Tasks owned by users. `end_time` is null while the task is open.
    tasks (task_id) {
        task_id -> Int4,
        user_id -> Int4,
        task_name -> Varchar,
        start_time -> Timestamptz,
        end_time -> Nullable<Timestamptz>,
    }
}

diesel::joinable!(tasks -> users (user_id));
diesel::allow_tables_to_appear_in_same_query!(users, tasks);
