//! Persistence contract consumed by the orchestrator and the boundary layer.
//!
//! The pipeline treats the repository as an opaque dependency: calls happen
//! only inside the orchestrator/worker path (never inside `enqueue`), and a
//! failing backend propagates a [`RepositoryError`] upward without retries.

pub mod error;
pub mod memory;
pub mod rest;

#[cfg(test)]
mod tests;

pub use error::RepositoryError;
pub use memory::MemoryRepository;
pub use rest::RestRepository;

use async_trait::async_trait;

use crate::model::{Evaluation, User};

/// Storage backend for evaluations and users.
#[async_trait]
pub trait EvaluationRepository: Send + Sync {
    /// Stores an evaluation and returns its id. The store is append-only.
    async fn store_evaluation(&self, evaluation: Evaluation) -> Result<String, RepositoryError>;

    /// Fetches a stored evaluation by id.
    async fn get_evaluation(&self, id: &str) -> Result<Option<Evaluation>, RepositoryError>;

    /// Lists a user's evaluations in insertion order, paginated.
    async fn list_evaluations(
        &self,
        user_id: &str,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<Evaluation>, RepositoryError>;

    /// Resolves an API key to its owning user, or `None` if the key is
    /// unknown.
    async fn user_by_api_key(&self, api_key: &str) -> Result<Option<User>, RepositoryError>;

    /// Registers a user under `name`, assigning a fresh id and API key.
    async fn add_user(&self, name: &str) -> Result<User, RepositoryError>;
}
