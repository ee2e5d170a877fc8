//! Evaluator capability and built-in strategies.
//!
//! A strategy scores a request twice: a cheap fast pass for the inline path
//! and a richer detailed pass for the background path. Expected failure modes
//! (missing credentials, malformed input, downstream errors) never cross this
//! boundary as errors - they surface as a result carrying the
//! [`SCORE_UNAVAILABLE`] sentinel and a descriptive feedback string, so the
//! pipeline persists a diagnosable record rather than crashing the worker.

pub mod dummy;
pub mod juridical;
pub mod medical;
pub mod registry;


pub use dummy::DummyEvaluator;
pub use juridical::JuridicalEvaluator;
pub use medical::{DEFAULT_MEDICAL_MODEL, MedicalEvaluator};
pub use registry::EvaluatorRegistry;

use async_trait::async_trait;

use crate::model::{EvaluationRequest, EvaluationResult};

/// Lower bound of the valid score range.
pub const SCORE_MIN: f64 = 0.0;

/// Upper bound of the valid score range.
pub const SCORE_MAX: f64 = 1.0;

/// Sentinel reported when a strategy cannot complete scoring. Deliberately
/// outside the valid range so failure records stay distinguishable.
pub const SCORE_UNAVAILABLE: f64 = -1.0;

/// A pluggable scoring strategy, selected by name through the
/// [`EvaluatorRegistry`].
#[async_trait]
pub trait Evaluator: Send + Sync {
    /// Registry key for this strategy.
    fn name(&self) -> &str;

    /// Low-latency approximate pass. Must be side-effect-free (no
    /// persistence) and cheap enough for the inline request path.
    async fn fast_evaluate(&self, request: &EvaluationRequest) -> EvaluationResult;

    /// Richer pass producing explanatory feedback. May be slow (network
    /// calls, model inference) and runs off the request-handling path.
    async fn detailed_evaluate(&self, request: &EvaluationRequest) -> EvaluationResult;
}
