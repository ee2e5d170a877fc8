//! VizEval core library (used by the server and integration tests).
//!
//! VizEval judges model-generated text: a request carries the prompt context
//! plus the response under evaluation, and a named strategy produces a
//! quality/risk verdict. Two tiers exist - a cheap fast pass for the inline
//! path and a richer detailed pass for the background path.
//!
//! # Module map
//!
//! - [`model`] - [`EvaluationRequest`], [`EvaluationResult`], [`Evaluation`],
//!   [`User`]
//! - [`evaluator`] - the [`Evaluator`] capability, the built-in strategies,
//!   and the [`EvaluatorRegistry`]
//! - [`queue`] - the shared FIFO between ingestion and the worker
//! - [`repository`] - the persistence contract and its backends
//! - [`service`] - the [`EvaluationService`] front door, the
//!   [`Orchestrator`], and the background drain loop
//! - [`config`] - `VIZEVAL_*` environment configuration

pub mod config;
pub mod evaluator;
pub mod model;
pub mod queue;
pub mod repository;
pub mod service;

pub use config::{Config, ConfigError};
pub use evaluator::{
    DEFAULT_MEDICAL_MODEL, DummyEvaluator, Evaluator, EvaluatorRegistry, JuridicalEvaluator,
    MedicalEvaluator, SCORE_MAX, SCORE_MIN, SCORE_UNAVAILABLE,
};
pub use model::{Evaluation, EvaluationRequest, EvaluationResult, Metadata, User};
pub use queue::EvaluationQueue;
pub use repository::{EvaluationRepository, MemoryRepository, RepositoryError, RestRepository};
pub use service::{DEFAULT_POLL_INTERVAL, EvaluationService, Orchestrator, ServiceError};
