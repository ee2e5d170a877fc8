//! Wire DTOs for the gateway.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use vizeval::model::{Evaluation, EvaluationResult, Metadata, User};

/// Body of `POST /evaluation`.
#[derive(Debug, Deserialize)]
pub struct EvaluationBody {
    pub system_prompt: String,
    pub user_prompt: String,
    pub response: String,
    #[serde(default = "default_evaluator")]
    pub evaluator: String,
    #[serde(default)]
    pub metadata: Metadata,
    pub api_key: String,
    #[serde(default)]
    pub async_mode: bool,
}

fn default_evaluator() -> String {
    "dummy".to_string()
}

/// Verdict (or async acknowledgment) returned to the caller.
#[derive(Debug, Serialize, Deserialize)]
pub struct EvaluationReply {
    pub evaluator: String,
    pub score: Option<f64>,
    pub feedback: Option<String>,
}

impl From<EvaluationResult> for EvaluationReply {
    fn from(result: EvaluationResult) -> Self {
        Self {
            evaluator: result.evaluator,
            score: result.score,
            feedback: result.feedback,
        }
    }
}

/// A stored evaluation as returned by the listing endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct EvaluationRecord {
    pub system_prompt: String,
    pub user_prompt: String,
    pub response: String,
    pub user_id: String,
    pub evaluator: String,
    pub score: Option<f64>,
    pub feedback: Option<String>,
    #[serde(default)]
    pub metadata: Metadata,
    pub created_at: DateTime<Utc>,
}

impl From<Evaluation> for EvaluationRecord {
    fn from(evaluation: Evaluation) -> Self {
        Self {
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
}

/// Body of `POST /user`.
#[derive(Debug, Deserialize)]
pub struct UserCreate {
    pub name: String,
}

/// A registered user, including the freshly issued API key.
#[derive(Debug, Serialize, Deserialize)]
pub struct UserReply {
    pub id: String,
    pub name: String,
    pub api_key: String,
}

impl From<User> for UserReply {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            api_key: user.api_key,
        }
    }
}

/// Query string of `GET /user/evaluations`.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub api_key: String,
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default)]
    pub offset: usize,
}

fn default_limit() -> usize {
    100
}
