//! Test doubles shared by unit and integration tests.
//!
//! Compiled for `cfg(test)` and behind the `test-support` feature so the
//! integration suites under `tests/` can drive the HTTP layer without a
//! database.

mod clock;
mod memory_store;

pub use clock::MutableClock;
pub use memory_store::InMemoryStore;
