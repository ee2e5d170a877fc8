//! Heuristic reviewer for legal-domain responses.

use async_trait::async_trait;

use super::{Evaluator, SCORE_MAX, SCORE_MIN};
use crate::model::{EvaluationRequest, EvaluationResult};

/// Absolute-claim phrasings that legal answers should not contain.
/// Matched case-insensitively against the response text.
const RISK_PHRASES: &[&str] = &[
    "guaranteed to win",
    "cannot be sued",
    "cannot lose",
    "no legal risk",
    "always legal",
    "never illegal",
    "100% certain",
    "legally bulletproof",
    "definitely legal",
    "definitely illegal",
];

/// Penalty applied per flagged phrase.
const FLAG_PENALTY: f64 = 0.25;

/// Keyword-based screen for overconfident legal claims.
///
/// Legal answers are expected to qualify their conclusions; each absolute
/// claim found lowers the score. Purely lexical, so both phases are cheap -
/// the detailed pass adds the list of flagged phrases as feedback.
pub struct JuridicalEvaluator;

impl JuridicalEvaluator {
    pub const NAME: &'static str = "juridical";

    pub fn new() -> Self {
        Self
    }

    fn flagged_phrases(response: &str) -> Vec<&'static str> {
        let lowered = response.to_lowercase();
        RISK_PHRASES
            .iter()
            .copied()
            .filter(|phrase| lowered.contains(phrase))
            .collect()
    }

    fn score_for(flags: &[&str]) -> f64 {
        (SCORE_MAX - FLAG_PENALTY * flags.len() as f64).max(SCORE_MIN)
    }
}

impl Default for JuridicalEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Evaluator for JuridicalEvaluator {
    fn name(&self) -> &str {
        Self::NAME
    }

    async fn fast_evaluate(&self, request: &EvaluationRequest) -> EvaluationResult {
        let flags = Self::flagged_phrases(&request.response);
        EvaluationResult::scored(Self::NAME, Self::score_for(&flags))
    }

    async fn detailed_evaluate(&self, request: &EvaluationRequest) -> EvaluationResult {
        let flags = Self::flagged_phrases(&request.response);
        let score = Self::score_for(&flags);

        let feedback = if flags.is_empty() {
            "No absolute legal claims detected.".to_string()
        } else {
            format!(
                "Absolute legal claims detected ({}): legal conclusions should be qualified.",
                flags.join(", ")
            )
        };

        EvaluationResult::detailed(Self::NAME, score, feedback)
    }
}
