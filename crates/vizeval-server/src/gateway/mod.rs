//! HTTP gateway (Axum) for the evaluation pipeline.
//!
//! This module is primarily used by the `vizeval` server binary.

pub mod error;
pub mod handler;
pub mod payload;
pub mod state;


use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

pub use handler::{create_evaluation_handler, create_user_handler, list_evaluations_handler};
pub use state::HandlerState;

pub fn create_router_with_state(state: HandlerState) -> Router {
    Router::new()
        .route("/healthz", get(health_handler))
        .route("/ready", get(ready_handler))
        .route("/evaluation", post(create_evaluation_handler))
        .route("/user", post(create_user_handler))
        .route("/user/evaluations", get(list_evaluations_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(serde::Serialize, serde::Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(serde::Serialize, serde::Deserialize)]
pub struct ReadyResponse {
    pub status: String,
    pub worker: String,
    pub queue_depth: usize,
    pub evaluators: Vec<String>,
}

#[tracing::instrument]
pub async fn health_handler() -> Response {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok".to_string(),
        }),
    )
        .into_response()
}

#[tracing::instrument(skip(state))]
pub async fn ready_handler(State(state): State<HandlerState>) -> Response {
    let worker_running = state.service.is_running();
    let worker = if worker_running { "running" } else { "stopped" };

    let status = if worker_running { "ready" } else { "degraded" };

    (
        StatusCode::OK,
        Json(ReadyResponse {
            status: status.to_string(),
            worker: worker.to_string(),
            queue_depth: state.service.queue_len(),
            evaluators: state.registry.registered_names(),
        }),
    )
        .into_response()
}
