//! Automation management endpoints

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::{Router, Json, extract::{Path, Query, State}, http::StatusCode};
use axum::routing::{get, post};
use replyflow_core::{AutomationDraft, AutomationId, AutomationRule, RuleFilter, RuleStatus};
use std::sync::Arc;

use crate::{ApiState, models::*};
use crate::error::ApiResult;
use crate::validation::validate_draft;

pub fn router() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/", get(list_automations).post(create_automation))
        .route("/draft", post(create_empty_automation))
        .route("/:id", get(get_automation).put(update_automation).delete(delete_automation))
        .route("/:id/activate", post(activate_automation))
        .route("/:id/deactivate", post(deactivate_automation))
}

#[derive(Debug, serde::Deserialize)]
pub struct ListParams {
    search: Option<String>,
    status: Option<RuleStatus>,
    page: Option<u32>,
    per_page: Option<u32>,
}

/// List automations
#[utoipa::path(
    get,
    path = "/api/v1/automations",
    params(
        ("search" = Option<String>, Query, description = "Case-insensitive name filter"),
        ("status" = Option<RuleStatus>, Query, description = "active or draft"),
        ("page" = Option<u32>, Query, description = "Page number"),
        ("per_page" = Option<u32>, Query, description = "Items per page")
    ),
    responses(
        (status = 200, description = "Automations in creation order", body = AutomationPage),
        (status = 400, description = "Malformed query", body = ErrorResponse)
    ),
    tag = "automations"
)]
pub async fn list_automations(
    State(state): State<Arc<ApiState>>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> ApiResult<Json<ApiResponse<AutomationPage>>> {
    let Query(params) = params?;
    let filter = RuleFilter { search: params.search, status: params.status };
    let rules = state.registry.search(&filter);
    let per_page = state.config.page_size(params.per_page);

    Ok(Json(ApiResponse::success(PaginatedResponse::paginate(
        rules,
        params.page.unwrap_or(1),
        per_page,
    ))))
}

/// Get automation by ID
#[utoipa::path(
    get,
    path = "/api/v1/automations/{id}",
    params(("id" = u64, Path, description = "Automation ID")),
    responses(
        (status = 200, description = "Automation details", body = AutomationRule),
        (status = 404, description = "Automation not found", body = ErrorResponse)
    ),
    tag = "automations"
)]
pub async fn get_automation(
    State(state): State<Arc<ApiState>>,
    id: Result<Path<AutomationId>, PathRejection>,
) -> ApiResult<Json<ApiResponse<AutomationRule>>> {
    let Path(id) = id?;
    Ok(Json(ApiResponse::success(state.registry.get(id)?)))
}

/// Create an automation
#[utoipa::path(
    post,
    path = "/api/v1/automations",
    request_body = AutomationDraft,
    responses(
        (status = 201, description = "Automation created", body = AutomationRule),
        (status = 400, description = "Invalid input", body = ErrorResponse)
    ),
    tag = "automations"
)]
pub async fn create_automation(
    State(state): State<Arc<ApiState>>,
    input: Result<Json<AutomationDraft>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ApiResponse<AutomationRule>>)> {
    let Json(input) = input?;
    validate_draft(&input)?;
    let rule = state.registry.create(input);
    Ok((StatusCode::CREATED, Json(ApiResponse::success(rule))))
}

/// Create an inactive placeholder automation
#[utoipa::path(
    post,
    path = "/api/v1/automations/draft",
    responses(
        (status = 201, description = "Placeholder created", body = CreatedAutomation)
    ),
    tag = "automations"
)]
pub async fn create_empty_automation(
    State(state): State<Arc<ApiState>>,
) -> (StatusCode, Json<ApiResponse<CreatedAutomation>>) {
    let id = state.registry.create_empty();
    (StatusCode::CREATED, Json(ApiResponse::success(CreatedAutomation { id })))
}

/// Replace an automation
#[utoipa::path(
    put,
    path = "/api/v1/automations/{id}",
    params(("id" = u64, Path, description = "Automation ID")),
    request_body = AutomationDraft,
    responses(
        (status = 200, description = "Automation updated", body = AutomationRule),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 404, description = "Automation not found", body = ErrorResponse)
    ),
    tag = "automations"
)]
pub async fn update_automation(
    State(state): State<Arc<ApiState>>,
    id: Result<Path<AutomationId>, PathRejection>,
    input: Result<Json<AutomationDraft>, JsonRejection>,
) -> ApiResult<Json<ApiResponse<AutomationRule>>> {
    let Path(id) = id?;
    let Json(input) = input?;
    validate_draft(&input)?;
    let rule = state.registry.update(id, input)?;
    Ok(Json(ApiResponse::success(rule)))
}

/// Delete an automation
#[utoipa::path(
    delete,
    path = "/api/v1/automations/{id}",
    params(("id" = u64, Path, description = "Automation ID")),
    responses(
        (
            status = 200,
            description = "Automation removed, or was already absent",
            body = DeleteOutcome
        )
    ),
    tag = "automations"
)]
pub async fn delete_automation(
    State(state): State<Arc<ApiState>>,
    id: Result<Path<AutomationId>, PathRejection>,
) -> ApiResult<Json<ApiResponse<DeleteOutcome>>> {
    let Path(id) = id?;
    let deleted = state.registry.delete(id);
    Ok(Json(ApiResponse::success(DeleteOutcome { id, deleted })))
}

/// Activate an automation
#[utoipa::path(
    post,
    path = "/api/v1/automations/{id}/activate",
    params(("id" = u64, Path, description = "Automation ID")),
    responses(
        (status = 200, description = "Automation active", body = AutomationRule),
        (status = 404, description = "Automation not found", body = ErrorResponse)
    ),
    tag = "automations"
)]
pub async fn activate_automation(
    State(state): State<Arc<ApiState>>,
    id: Result<Path<AutomationId>, PathRejection>,
) -> ApiResult<Json<ApiResponse<AutomationRule>>> {
    let Path(id) = id?;
    Ok(Json(ApiResponse::success(state.registry.set_active(id, true)?)))
}

/// Deactivate an automation
#[utoipa::path(
    post,
    path = "/api/v1/automations/{id}/deactivate",
    params(("id" = u64, Path, description = "Automation ID")),
    responses(
        (status = 200, description = "Automation back to draft", body = AutomationRule),
        (status = 404, description = "Automation not found", body = ErrorResponse)
    ),
    tag = "automations"
)]
pub async fn deactivate_automation(
    State(state): State<Arc<ApiState>>,
    id: Result<Path<AutomationId>, PathRejection>,
) -> ApiResult<Json<ApiResponse<AutomationRule>>> {
    let Path(id) = id?;
    Ok(Json(ApiResponse::success(state.registry.set_active(id, false)?)))
}
