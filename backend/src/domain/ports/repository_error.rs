//! Classified failures shared by the driven repository ports.

use super::define_port_error;

define_port_error! {
    /// Store failures after classification by a repository adapter.
    ///
    /// Adapters log the underlying store detail before returning
    /// [`RepositoryError::OperationFailure`]; callers never see store-native
    /// error values.
    pub enum RepositoryError {
        /// A uniqueness rule rejected the write.
        Conflict { constraint: String } =>
            "constraint {constraint} rejected the write",
        /// The addressed row does not exist.
        NotFound { subject: String, key: i64 } =>
            "{subject} {key} not found",
        /// Connectivity, timeout or statement failure.
        OperationFailure { message: String } =>
            "repository operation failed: {message}",
    }
}
