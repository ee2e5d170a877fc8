use std::sync::Arc;

use vizeval::evaluator::EvaluatorRegistry;
use vizeval::repository::EvaluationRepository;
use vizeval::service::EvaluationService;

/// Shared handler state: the pipeline front door plus the collaborators the
/// boundary needs directly (API-key resolution, listings, readiness).
#[derive(Clone)]
pub struct HandlerState {
    pub service: Arc<EvaluationService>,

    pub repository: Arc<dyn EvaluationRepository>,

    pub registry: Arc<EvaluatorRegistry>,
}

impl HandlerState {
    pub fn new(
        service: Arc<EvaluationService>,
        repository: Arc<dyn EvaluationRepository>,
        registry: Arc<EvaluatorRegistry>,
    ) -> Self {
        Self {
            service,
            repository,
            registry,
        }
    }
}
