//! Task tracker backend: users identified by passport, and the time they
//! spend on tasks, served over HTTP and stored in PostgreSQL.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// OpenAPI surface used by Swagger UI.
pub use doc::ApiDoc;
pub use middleware::Trace;
