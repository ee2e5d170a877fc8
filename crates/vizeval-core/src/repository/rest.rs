//! PostgREST-backed repository (Supabase-compatible).

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{EvaluationRepository, RepositoryError};
use crate::model::{Evaluation, Metadata, User};

/// Remote backend speaking the PostgREST wire protocol against an
/// `evaluations` and a `users` table.
///
/// The service key is sent both as the `apikey` header and as a bearer token,
/// matching the Supabase convention. All failures map onto
/// [`RepositoryError`] variants; nothing is retried here.
pub struct RestRepository {
    client: reqwest::Client,
    base_url: String,
    service_key: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct EvaluationRow {
    id: String,
    system_prompt: String,
    user_prompt: String,
    response: String,
    user_id: String,
    evaluator: String,
    score: Option<f64>,
    feedback: Option<String>,
    #[serde(default)]
    metadata: Metadata,
    created_at: DateTime<Utc>,
}

impl EvaluationRow {
    fn from_evaluation(id: String, evaluation: Evaluation) -> Self {
        Self {
            id,
            system_prompt: evaluation.system_prompt,
            user_prompt: evaluation.user_prompt,
            response: evaluation.response,
            user_id: evaluation.user_id,
            evaluator: evaluation.evaluator,
            score: evaluation.score,
            feedback: evaluation.feedback,
            metadata: evaluation.metadata,
            created_at: evaluation.created_at,
        }
    }

    fn into_evaluation(self) -> Evaluation {
        Evaluation {
            system_prompt: self.system_prompt,
            user_prompt: self.user_prompt,
            response: self.response,
            user_id: self.user_id,
            evaluator: self.evaluator,
            score: self.score,
            feedback: self.feedback,
            metadata: self.metadata,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct UserRow {
    id: String,
    name: String,
    api_key: String,
}

impl RestRepository {
    /// Creates a repository against `base_url` (e.g. a Supabase project URL)
    /// authenticated with `service_key`.
    pub fn new(base_url: impl Into<String>, service_key: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            service_key: service_key.into(),
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn authed(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
    }

    async fn insert<T: Serialize>(
        &self,
        table: &str,
        operation: &'static str,
        row: &T,
    ) -> Result<(), RepositoryError> {
        let url = self.table_url(table);
        let response = self
            .authed(self.client.post(&url))
            .header("Prefer", "return=minimal")
            .json(row)
            .send()
            .await
            .map_err(|e| RepositoryError::Unreachable {
                url: url.clone(),
                message: e.to_string(),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(RepositoryError::OperationFailed {
                operation,
                message: format!("{status}: {body}"),
            });
        }

        Ok(())
    }

    async fn select<T: for<'de> Deserialize<'de>>(
        &self,
        table: &str,
        operation: &'static str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>, RepositoryError> {
        let url = self.table_url(table);
        let response = self
            .authed(self.client.get(&url))
            .query(query)
            .send()
            .await
            .map_err(|e| RepositoryError::Unreachable {
                url: url.clone(),
                message: e.to_string(),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(RepositoryError::OperationFailed {
                operation,
                message: format!("{status}: {body}"),
            });
        }

        response
            .json()
            .await
            .map_err(|e| RepositoryError::MalformedRow {
                operation,
                message: e.to_string(),
            })
    }
}

#[async_trait]
impl EvaluationRepository for RestRepository {
    async fn store_evaluation(&self, evaluation: Evaluation) -> Result<String, RepositoryError> {
        let id = Uuid::new_v4().to_string();
        let row = EvaluationRow::from_evaluation(id.clone(), evaluation);
        self.insert("evaluations", "store_evaluation", &row).await?;
        Ok(id)
    }

    async fn get_evaluation(&self, id: &str) -> Result<Option<Evaluation>, RepositoryError> {
        let rows: Vec<EvaluationRow> = self
            .select(
                "evaluations",
                "get_evaluation",
                &[("id", format!("eq.{id}")), ("limit", "1".to_string())],
            )
            .await?;
        Ok(rows.into_iter().next().map(EvaluationRow::into_evaluation))
    }

    async fn list_evaluations(
        &self,
        user_id: &str,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<Evaluation>, RepositoryError> {
        let rows: Vec<EvaluationRow> = self
            .select(
                "evaluations",
                "list_evaluations",
                &[
                    ("user_id", format!("eq.{user_id}")),
                    ("order", "created_at.asc".to_string()),
                    ("limit", limit.to_string()),
                    ("offset", offset.to_string()),
                ],
            )
            .await?;
        Ok(rows
            .into_iter()
            .map(EvaluationRow::into_evaluation)
            .collect())
    }

    async fn user_by_api_key(&self, api_key: &str) -> Result<Option<User>, RepositoryError> {
        let rows: Vec<UserRow> = self
            .select(
                "users",
                "user_by_api_key",
                &[
                    ("api_key", format!("eq.{api_key}")),
                    ("limit", "1".to_string()),
                ],
            )
            .await?;
        Ok(rows.into_iter().next().map(|row| User {
            id: row.id,
            name: row.name,
            api_key: row.api_key,
        }))
    }

    async fn add_user(&self, name: &str) -> Result<User, RepositoryError> {
        let user = User::new(name);
        let row = UserRow {
            id: user.id.clone(),
            name: user.name.clone(),
            api_key: user.api_key.clone(),
        };
        self.insert("users", "add_user", &row).await?;
        Ok(user)
    }
}
