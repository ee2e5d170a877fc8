//! Evaluation service: inline scoring plus the queued background drain loop.

pub mod error;
pub mod orchestrator;


pub use error::ServiceError;
pub use orchestrator::Orchestrator;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::time;

use crate::evaluator::EvaluatorRegistry;
use crate::model::{EvaluationRequest, EvaluationResult};
use crate::queue::EvaluationQueue;
use crate::repository::EvaluationRepository;

/// Worker poll interval used when the caller has no opinion.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Front door of the pipeline.
///
/// `evaluate_sync` scores inline through the fast phase; `evaluate_async`
/// enqueues for the background worker started by [`start`](Self::start). The
/// two paths share only the registry and the repository - there is no
/// ordering guarantee between them.
pub struct EvaluationService {
    registry: Arc<EvaluatorRegistry>,
    repository: Arc<dyn EvaluationRepository>,
    queue: Arc<EvaluationQueue>,
    running: Arc<AtomicBool>,
    worker_active: Arc<AtomicBool>,
}

impl EvaluationService {
    pub fn new(
        registry: Arc<EvaluatorRegistry>,
        repository: Arc<dyn EvaluationRepository>,
        queue: Arc<EvaluationQueue>,
    ) -> Self {
        Self {
            registry,
            repository,
            queue,
            running: Arc::new(AtomicBool::new(false)),
            worker_active: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Scores inline via the fast phase. Bypasses the queue and never
    /// persists anything.
    pub async fn evaluate_sync(&self, request: &EvaluationRequest) -> EvaluationResult {
        let evaluator = self.registry.resolve(&request.evaluator);
        Orchestrator::new(evaluator, Arc::clone(&self.repository))
            .execute_fast(request)
            .await
    }

    /// Enqueues for background processing and acknowledges immediately.
    ///
    /// The acknowledgment carries only the evaluator name - no score, no
    /// feedback, no correlation id. The outcome becomes observable through
    /// the repository once the worker has drained the item.
    pub fn evaluate_async(&self, request: EvaluationRequest) -> EvaluationResult {
        let ack = EvaluationResult::pending(request.evaluator.clone());
        self.queue.enqueue(request);
        ack
    }

    /// Starts the background drain loop (no-op handle if one is already
    /// live). A start racing a still-draining `stop` also returns the no-op
    /// handle; restart once the previous loop has exited.
    pub fn start(&self, poll_interval: Duration) -> tokio::task::JoinHandle<()> {
        // AcqRel: swap needs both load and store semantics to ensure only one
        // drain loop starts under racing callers.
        if self.worker_active.swap(true, Ordering::AcqRel) {
            return tokio::spawn(async {});
        }
        self.running.store(true, Ordering::Release);

        let registry = Arc::clone(&self.registry);
        let repository = Arc::clone(&self.repository);
        let queue = Arc::clone(&self.queue);
        let running = Arc::clone(&self.running);
        let worker_active = Arc::clone(&self.worker_active);

        tokio::spawn(async move {
            tracing::info!(
                poll_interval_ms = poll_interval.as_millis() as u64,
                "evaluation worker started"
            );

            loop {
                // Acquire: pairs with the Release store in stop(). The flag
                // is only read at the iteration boundary, so an in-flight
                // item always completes before the loop exits.
                if !running.load(Ordering::Acquire) {
                    break;
                }

                let Some(request) = queue.dequeue() else {
                    time::sleep(poll_interval).await;
                    continue;
                };

                let evaluator_name = request.evaluator.clone();
                let evaluator = registry.resolve(&request.evaluator);
                let orchestrator = Orchestrator::new(evaluator, Arc::clone(&repository));

                // Each item runs in its own task so a panicking strategy is
                // contained like any other per-item failure: logged, dropped,
                // and the loop keeps draining.
                let outcome =
                    tokio::spawn(async move { orchestrator.execute_detailed(&request).await })
                        .await;

                match outcome {
                    Ok(Ok(result)) => {
                        tracing::debug!(
                            evaluator = %evaluator_name,
                            score = ?result.score,
                            "processed queued evaluation"
                        );
                    }
                    Ok(Err(e)) => {
                        tracing::warn!(
                            evaluator = %evaluator_name,
                            error = %e,
                            "dropping queued evaluation after storage failure"
                        );
                    }
                    Err(e) => {
                        tracing::warn!(
                            evaluator = %evaluator_name,
                            error = %e,
                            "dropping queued evaluation after evaluator panic"
                        );
                    }
                }
            }

            // Release: all loop work is visible before the slot frees, so a
            // subsequent start() with Acquire sees the completed state.
            worker_active.store(false, Ordering::Release);
            tracing::info!("evaluation worker stopped");
        })
    }

    /// Requests a cooperative stop. The loop observes the flag at its next
    /// iteration boundary, so the stop may be delayed by up to one in-flight
    /// evaluation plus one poll interval.
    pub fn stop(&self) {
        // Release: pairs with the Acquire load at the loop boundary.
        self.running.store(false, Ordering::Release);
    }

    /// Returns `true` while the service is in the Running state.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Number of requests waiting in the queue.
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }
}
