use thiserror::Error;

use crate::repository::RepositoryError;

#[derive(Debug, Error)]
/// Errors surfaced by the evaluation service and orchestrator.
pub enum ServiceError {
    /// The repository failed while persisting or reading.
    #[error("storage error: {0}")]
    Storage(#[from] RepositoryError),
}
