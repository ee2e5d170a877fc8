//! In-memory repository backend.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use uuid::Uuid;

use super::{EvaluationRepository, RepositoryError};
use crate::model::{Evaluation, User};

/// Default backend, also used as the test double.
///
/// Evaluations are kept in insertion order so listings page stably.
#[derive(Default)]
pub struct MemoryRepository {
    evaluations: RwLock<Vec<(String, Evaluation)>>,
    users: RwLock<HashMap<String, User>>,
    api_keys: RwLock<HashMap<String, String>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of stored evaluations, across all users.
    pub fn evaluation_count(&self) -> usize {
        self.evaluations.read().len()
    }
}

#[async_trait]
impl EvaluationRepository for MemoryRepository {
    async fn store_evaluation(&self, evaluation: Evaluation) -> Result<String, RepositoryError> {
        let id = Uuid::new_v4().to_string();
        self.evaluations.write().push((id.clone(), evaluation));
        Ok(id)
    }

    async fn get_evaluation(&self, id: &str) -> Result<Option<Evaluation>, RepositoryError> {
        Ok(self
            .evaluations
            .read()
            .iter()
            .find(|(stored_id, _)| stored_id == id)
            .map(|(_, evaluation)| evaluation.clone()))
    }

    async fn list_evaluations(
        &self,
        user_id: &str,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<Evaluation>, RepositoryError> {
        Ok(self
            .evaluations
            .read()
            .iter()
            .filter(|(_, evaluation)| evaluation.user_id == user_id)
            .skip(offset)
            .take(limit)
            .map(|(_, evaluation)| evaluation.clone())
            .collect())
    }

    async fn user_by_api_key(&self, api_key: &str) -> Result<Option<User>, RepositoryError> {
        let user_id = match self.api_keys.read().get(api_key) {
            Some(user_id) => user_id.clone(),
            None => return Ok(None),
        };
        Ok(self.users.read().get(&user_id).cloned())
    }

    async fn add_user(&self, name: &str) -> Result<User, RepositoryError> {
        let user = User::new(name);
        self.api_keys
            .write()
            .insert(user.api_key.clone(), user.id.clone());
        self.users.write().insert(user.id.clone(), user.clone());
        Ok(user)
    }
}
