//! Instagram webhook endpoints

use axum::{Router, Json, body::Bytes, extract::{Query, State}};
use axum::routing::get;
use serde::Deserialize;
use std::sync::Arc;

use crate::{ApiState, models::*};
use crate::error::{ApiError, ApiResult};
use crate::webhooks::WebhookPayload;

pub fn router() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/instagram", get(verify_subscription).post(receive_event))
}

#[derive(Debug, Deserialize)]
pub struct VerifyParams {
    #[serde(rename = "hub.mode")]
    mode: Option<String>,
    #[serde(rename = "hub.challenge")]
    challenge: Option<String>,
    #[serde(rename = "hub.verify_token")]
    verify_token: Option<String>,
}

/// Subscription handshake: echo the challenge when the token matches
pub async fn verify_subscription(
    State(state): State<Arc<ApiState>>,
    Query(params): Query<VerifyParams>,
) -> ApiResult<String> {
    tracing::info!(mode = ?params.mode, "webhook verification request");

    let expected = state.config.webhook_verify_token.as_deref();
    match (expected, params.verify_token.as_deref()) {
        (Some(expected), Some(given)) if expected == given => {
            Ok(params.challenge.unwrap_or_default())
        }
        _ => {
            tracing::warn!("webhook verification with invalid token");
            Err(ApiError::InvalidVerifyToken)
        }
    }
}

/// Event intake.
///
/// Every inbound comment and DM is evaluated; the planned replies are
/// returned for the sender to deliver. Malformed deliveries are still
/// acknowledged so Instagram does not retry them.
pub async fn receive_event(
    State(state): State<Arc<ApiState>>,
    body: Bytes,
) -> Json<ApiResponse<WebhookReceipt>> {
    let payload: WebhookPayload = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(e) => {
            tracing::warn!(error = %e, "unparseable webhook payload");
            return Json(ApiResponse::success(WebhookReceipt::default()));
        }
    };

    let inbound = payload.inbound_messages();
    tracing::info!(object = %payload.object, events = inbound.len(), "webhook received");

    let replies = inbound
        .iter()
        .filter_map(|msg| {
            let hit = state.registry.find_match(&msg.text, msg.channel)?;
            Some(PlannedReply {
                channel: msg.channel,
                source_id: msg.source_id.clone(),
                recipient_id: msg.sender_id.clone(),
                automation_id: hit.automation_id,
                reply: hit.reply,
            })
        })
        .collect();

    Json(ApiResponse::success(WebhookReceipt { received: inbound.len(), replies }))
}
