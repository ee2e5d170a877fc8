use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::instrument;

use vizeval::model::EvaluationRequest;

use crate::gateway::error::GatewayError;
use crate::gateway::payload::{
    EvaluationBody, EvaluationRecord, EvaluationReply, ListQuery, UserCreate, UserReply,
};
use crate::gateway::state::HandlerState;

/// Creates an evaluation.
///
/// With `async_mode` the request is queued and the reply carries no score or
/// feedback; the caller polls `GET /user/evaluations` for the outcome.
/// Without it the fast phase runs inline and the reply carries the score.
#[instrument(skip(state, body), fields(evaluator = %body.evaluator, async_mode = body.async_mode))]
pub async fn create_evaluation_handler(
    State(state): State<HandlerState>,
    Json(body): Json<EvaluationBody>,
) -> Result<Response, GatewayError> {
    if body.response.is_empty() {
        return Err(GatewayError::InvalidRequest(
            "response must not be empty".to_string(),
        ));
    }

    let user = state
        .repository
        .user_by_api_key(&body.api_key)
        .await?
        .ok_or(GatewayError::InvalidApiKey)?;

    let request = EvaluationRequest {
        system_prompt: body.system_prompt,
        user_prompt: body.user_prompt,
        response: body.response,
        evaluator: body.evaluator,
        metadata: body.metadata,
        user_id: user.id,
        async_mode: body.async_mode,
    };

    let result = if request.async_mode {
        state.service.evaluate_async(request)
    } else {
        state.service.evaluate_sync(&request).await
    };

    Ok((StatusCode::CREATED, Json(EvaluationReply::from(result))).into_response())
}

/// Registers a user and returns the issued API key.
#[instrument(skip(state, body))]
pub async fn create_user_handler(
    State(state): State<HandlerState>,
    Json(body): Json<UserCreate>,
) -> Result<Response, GatewayError> {
    if body.name.trim().is_empty() {
        return Err(GatewayError::InvalidRequest(
            "name must not be empty".to_string(),
        ));
    }

    let user = state.repository.add_user(body.name.trim()).await?;
    Ok((StatusCode::CREATED, Json(UserReply::from(user))).into_response())
}

/// Lists the calling user's stored evaluations, oldest first.
#[instrument(skip(state, query))]
pub async fn list_evaluations_handler(
    State(state): State<HandlerState>,
    Query(query): Query<ListQuery>,
) -> Result<Response, GatewayError> {
    let user = state
        .repository
        .user_by_api_key(&query.api_key)
        .await?
        .ok_or(GatewayError::InvalidApiKey)?;

    let evaluations = state
        .repository
        .list_evaluations(&user.id, query.limit, query.offset)
        .await?;

    let records: Vec<EvaluationRecord> = evaluations
        .into_iter()
        .map(EvaluationRecord::from)
        .collect();

    Ok(Json(records).into_response())
}
