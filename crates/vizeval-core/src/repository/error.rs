use thiserror::Error;

#[derive(Debug, Error)]
/// Errors returned by repository backends.
pub enum RepositoryError {
    /// The backend could not be reached.
    #[error("repository unreachable at '{url}': {message}")]
    Unreachable {
        /// Backend endpoint URL.
        url: String,
        /// Error message.
        message: String,
    },

    /// The backend rejected or failed an operation.
    #[error("repository {operation} failed: {message}")]
    OperationFailed {
        /// Operation name.
        operation: &'static str,
        /// Error message.
        message: String,
    },

    /// A backend row could not be decoded into a core entity.
    #[error("repository returned a malformed row during {operation}: {message}")]
    MalformedRow {
        /// Operation name.
        operation: &'static str,
        /// Error message.
        message: String,
    },
}
