//! Binds one evaluator and one repository for a single request's lifecycle.

use std::sync::Arc;

use super::error::ServiceError;
use crate::evaluator::Evaluator;
use crate::model::{Evaluation, EvaluationRequest, EvaluationResult};
use crate::repository::EvaluationRepository;

/// Runs one request through the fast path or the combined fast+detailed path.
pub struct Orchestrator {
    evaluator: Arc<dyn Evaluator>,
    repository: Arc<dyn EvaluationRepository>,
}

impl Orchestrator {
    pub fn new(evaluator: Arc<dyn Evaluator>, repository: Arc<dyn EvaluationRepository>) -> Self {
        Self {
            evaluator,
            repository,
        }
    }

    /// Resolves only the fast phase. Never persists.
    pub async fn execute_fast(&self, request: &EvaluationRequest) -> EvaluationResult {
        self.evaluator.fast_evaluate(request).await
    }

    /// Runs the fast phase for the score and the detailed phase for the
    /// feedback, persists the combined record, and returns the detailed
    /// result. Storage failure propagates; it is the caller's decision
    /// whether to drop or surface it.
    ///
    /// The fast phase is re-run here rather than reusing any score a sync
    /// caller may have seen; a non-deterministic strategy can therefore
    /// persist a different score (accepted at-least-once re-scoring).
    pub async fn execute_detailed(
        &self,
        request: &EvaluationRequest,
    ) -> Result<EvaluationResult, ServiceError> {
        let fast = self.evaluator.fast_evaluate(request).await;
        let detailed = self.evaluator.detailed_evaluate(request).await;

        let evaluation = Evaluation::from_parts(request, fast.score, detailed.feedback.clone());
        let id = self.repository.store_evaluation(evaluation).await?;

        tracing::debug!(%id, evaluator = %request.evaluator, "stored evaluation");
        Ok(detailed)
    }
}
