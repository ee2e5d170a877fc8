//! Fallback strategy producing deterministic placeholder verdicts.

use async_trait::async_trait;

use super::{Evaluator, SCORE_MAX, SCORE_MIN};
use crate::model::{EvaluationRequest, EvaluationResult};

const PLACEHOLDER_FEEDBACK: &str =
    "Placeholder verdict from the fallback strategy; register a domain evaluator for meaningful scoring.";

/// Default strategy used when no evaluator matches the requested name.
///
/// The score is derived from a BLAKE3 hash of the request text, so identical
/// requests always score identically - whether routed here by name or by the
/// unknown-name fallback.
pub struct DummyEvaluator;

impl DummyEvaluator {
    pub const NAME: &'static str = "dummy";

    pub fn new() -> Self {
        Self
    }

    fn placeholder_score(request: &EvaluationRequest) -> f64 {
        let mut hasher = blake3::Hasher::new();
        hasher.update(request.system_prompt.as_bytes());
        hasher.update(&[0]);
        hasher.update(request.user_prompt.as_bytes());
        hasher.update(&[0]);
        hasher.update(request.response.as_bytes());
        let digest = hasher.finalize();

        let mut prefix = [0u8; 8];
        prefix.copy_from_slice(&digest.as_bytes()[..8]);
        let raw = u64::from_le_bytes(prefix);

        (raw as f64 / u64::MAX as f64).clamp(SCORE_MIN, SCORE_MAX)
    }
}

impl Default for DummyEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Evaluator for DummyEvaluator {
    fn name(&self) -> &str {
        Self::NAME
    }

    async fn fast_evaluate(&self, request: &EvaluationRequest) -> EvaluationResult {
        EvaluationResult::scored(Self::NAME, Self::placeholder_score(request))
    }

    async fn detailed_evaluate(&self, request: &EvaluationRequest) -> EvaluationResult {
        EvaluationResult::detailed(
            Self::NAME,
            Self::placeholder_score(request),
            PLACEHOLDER_FEEDBACK,
        )
    }
}
