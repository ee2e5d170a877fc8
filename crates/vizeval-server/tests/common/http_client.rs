//! HTTP client helpers for tests.

use std::time::Duration;

use vizeval_server::gateway::payload::{EvaluationRecord, EvaluationReply, UserReply};
use vizeval_server::gateway::{HealthResponse, ReadyResponse};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub struct TestClient {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, thiserror::Error)]
pub enum TestClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    #[error("unexpected status {0}: {1}")]
    UnexpectedStatus(u16, String),
}

impl TestClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        format!("{}/{}", self.base_url, path)
    }

    async fn check<T: serde::de::DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, TestClientError> {
        match resp.status().as_u16() {
            200 | 201 => Ok(resp.json().await?),
            400 | 422 => Err(TestClientError::BadRequest(resp.text().await?)),
            401 => Err(TestClientError::Unauthorized(resp.text().await?)),
            status => {
                let body = resp.text().await.unwrap_or_default();
                Err(TestClientError::UnexpectedStatus(status, body))
            }
        }
    }

    pub async fn create_user(&self, name: &str) -> Result<UserReply, TestClientError> {
        let resp = self
            .client
            .post(self.url("/user"))
            .json(&serde_json::json!({ "name": name }))
            .send()
            .await?;
        self.check(resp).await
    }

    pub async fn create_evaluation(
        &self,
        body: serde_json::Value,
    ) -> Result<EvaluationReply, TestClientError> {
        let resp = self
            .client
            .post(self.url("/evaluation"))
            .json(&body)
            .send()
            .await?;
        self.check(resp).await
    }

    pub async fn list_evaluations(
        &self,
        api_key: &str,
    ) -> Result<Vec<EvaluationRecord>, TestClientError> {
        let resp = self
            .client
            .get(self.url("/user/evaluations"))
            .query(&[("api_key", api_key)])
            .send()
            .await?;
        self.check(resp).await
    }

    pub async fn health(&self) -> Result<HealthResponse, TestClientError> {
        let resp = self.client.get(self.url("/healthz")).send().await?;
        self.check(resp).await
    }

    pub async fn ready(&self) -> Result<ReadyResponse, TestClientError> {
        let resp = self.client.get(self.url("/ready")).send().await?;
        self.check(resp).await
    }
}
