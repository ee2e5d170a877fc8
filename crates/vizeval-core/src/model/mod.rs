//! Core entities shared across the evaluation pipeline.
//!
//! [`EvaluationRequest`] is the immutable input, [`EvaluationResult`] the
//! transient output of one evaluator invocation, and [`Evaluation`] the
//! persisted record folding both together. [`User`] owns stored evaluations
//! by id reference.


use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::evaluator::SCORE_UNAVAILABLE;

/// Open-ended string-keyed metadata carried through the pipeline untouched.
pub type Metadata = HashMap<String, serde_json::Value>;

/// Immutable input to one evaluation: the prompt context, the response under
/// judgment, and routing hints. Never mutated after construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationRequest {
    /// System prompt the response was generated under.
    pub system_prompt: String,

    /// User prompt the response answers.
    pub user_prompt: String,

    /// The model-generated text being judged.
    pub response: String,

    /// Strategy selector. Unknown names resolve to the default strategy.
    pub evaluator: String,

    /// Opaque caller-supplied metadata, persisted verbatim.
    #[serde(default)]
    pub metadata: Metadata,

    /// Owner of the resulting record.
    pub user_id: String,

    /// `true` routes through the queue, `false` through the inline fast path.
    #[serde(default)]
    pub async_mode: bool,
}

/// Output of one evaluator invocation.
///
/// The fast phase populates only `score`; the detailed phase adds `feedback`.
/// An async acknowledgment carries neither.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    /// Name of the strategy that produced (or will produce) this result.
    pub evaluator: String,

    /// Quality/risk score in the strategy's declared range, or the sentinel
    /// [`SCORE_UNAVAILABLE`] when scoring failed.
    pub score: Option<f64>,

    /// Explanatory feedback. Absent for the fast phase.
    pub feedback: Option<String>,
}

impl EvaluationResult {
    /// Acknowledgment for a queued request: accepted, not yet scored.
    pub fn pending(evaluator: impl Into<String>) -> Self {
        Self {
            evaluator: evaluator.into(),
            score: None,
            feedback: None,
        }
    }

    /// Fast-phase result: a score with no feedback.
    pub fn scored(evaluator: impl Into<String>, score: f64) -> Self {
        Self {
            evaluator: evaluator.into(),
            score: Some(score),
            feedback: None,
        }
    }

    /// Detailed-phase result: a score plus explanatory feedback.
    pub fn detailed(evaluator: impl Into<String>, score: f64, feedback: impl Into<String>) -> Self {
        Self {
            evaluator: evaluator.into(),
            score: Some(score),
            feedback: Some(feedback.into()),
        }
    }

    /// Failure result: the sentinel score and a description of what went
    /// wrong, so the pipeline persists a diagnosable record instead of
    /// crashing the worker.
    pub fn failure(evaluator: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            evaluator: evaluator.into(),
            score: Some(SCORE_UNAVAILABLE),
            feedback: Some(message.into()),
        }
    }

    /// Returns `true` if this result carries the failure sentinel.
    #[inline]
    pub fn is_failure(&self) -> bool {
        self.score == Some(SCORE_UNAVAILABLE)
    }
}

/// The persisted record: request fields plus the resolved verdict.
/// Append-only once stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Evaluation {
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

impl Evaluation {
    /// Folds a request and the resolved score/feedback into the record to
    /// persist, stamping the creation time.
    pub fn from_parts(
        request: &EvaluationRequest,
        score: Option<f64>,
        feedback: Option<String>,
    ) -> Self {
        Self {
            system_prompt: request.system_prompt.clone(),
            user_prompt: request.user_prompt.clone(),
            response: request.response.clone(),
            user_id: request.user_id.clone(),
            evaluator: request.evaluator.clone(),
            score,
            feedback,
            metadata: request.metadata.clone(),
            created_at: Utc::now(),
        }
    }
}

/// A registered caller. The API key is an opaque bearer token generated at
/// creation and never reused; the record is read-only afterward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub api_key: String,
}

impl User {
    /// Creates a user with a freshly generated id and API key.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            api_key: format!("vz-{}", Uuid::new_v4().simple()),
        }
    }
}
