//! ReplyFlow API
//!
//! REST surface over the automation registry, plus the Instagram webhook
//! that feeds inbound comments and DMs to the matcher.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                           REPLYFLOW API                              │
//! │                                                                     │
//! │  ┌──────────────────┐  ┌──────────────────┐  ┌───────────────────┐  │
//! │  │   /automations   │  │    /evaluate     │  │ /webhooks/instagram│  │
//! │  │  CRUD + activate │  │  message → reply │  │ handshake + intake │  │
//! │  └────────┬─────────┘  └────────┬─────────┘  └─────────┬─────────┘  │
//! │           │                     │                      │            │
//! │           ▼                     ▼                      ▼            │
//! │  ┌───────────────────────────────────────────────────────────────┐  │
//! │  │                Arc<AutomationRegistry> (core)                  │  │
//! │  └───────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod validation;
pub mod webhooks;

use axum::{Router, routing::{get, post}};
use replyflow_core::{
    AutomationDraft, AutomationRegistry, AutomationRule, Response, RuleMatch, RuleStatus,
    Trigger, TriggerKind,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use models::*;

/// API state
pub struct ApiState {
    /// API version
    pub version: String,
    pub config: ApiConfig,
    pub registry: Arc<AutomationRegistry>,
}

impl ApiState {
    pub fn new(config: ApiConfig, registry: Arc<AutomationRegistry>) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").into(),
            config,
            registry,
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "ReplyFlow API",
        version = "1.0.0",
        description = "Keyword-triggered auto-replies for Instagram comments and direct messages. \
                       Every JSON body is wrapped in `{success, data, error}`.",
        license(name = "Apache-2.0")
    ),
    paths(
        routes::health::health_check,
        routes::automations::list_automations,
        routes::automations::get_automation,
        routes::automations::create_automation,
        routes::automations::create_empty_automation,
        routes::automations::update_automation,
        routes::automations::delete_automation,
        routes::automations::activate_automation,
        routes::automations::deactivate_automation,
        routes::evaluate::evaluate_message,
    ),
    components(
        schemas(
            ErrorResponse, AutomationPage, CreatedAutomation, DeleteOutcome,
            EvaluateRequest, EvaluateResponse,
            PlannedReply, WebhookReceipt,
            AutomationRule, AutomationDraft, Trigger, TriggerKind, Response,
            RuleMatch, RuleStatus,
            routes::health::HealthResponse
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "automations", description = "Automation management"),
        (name = "evaluate", description = "Message evaluation")
    )
)]
pub struct ApiDoc;

/// Build the API router
pub fn build_router(state: ApiState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(routes::health::health_check))
        .nest("/api/v1", api_routes())
        .nest("/webhooks", routes::webhooks::router())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(Arc::new(state))
}

fn api_routes() -> Router<Arc<ApiState>> {
    Router::new()
        .nest("/automations", routes::automations::router())
        .route("/evaluate", post(routes::evaluate::evaluate_message))
}
