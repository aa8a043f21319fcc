//! Message evaluation endpoint

use axum::{extract::{rejection::JsonRejection, State}, Json};
use std::sync::Arc;

use crate::{ApiState, models::*};
use crate::error::ApiResult;

/// Evaluate a message against the active automations
#[utoipa::path(
    post,
    path = "/api/v1/evaluate",
    request_body = EvaluateRequest,
    responses(
        (
            status = 200,
            description = "Evaluation result; `matched` is false when no automation applies",
            body = EvaluateResponse
        ),
        (status = 400, description = "Malformed request", body = ErrorResponse)
    ),
    tag = "evaluate"
)]
pub async fn evaluate_message(
    State(state): State<Arc<ApiState>>,
    input: Result<Json<EvaluateRequest>, JsonRejection>,
) -> ApiResult<Json<ApiResponse<EvaluateResponse>>> {
    let Json(input) = input?;
    let hit = state.registry.find_match(&input.message, input.channel);
    Ok(Json(ApiResponse::success(EvaluateResponse::from(hit))))
}
