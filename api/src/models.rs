//! API Models

use replyflow_core::{AutomationId, AutomationRule, RuleMatch, TriggerKind};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Standard API response
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ErrorResponse>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self { success: true, data: Some(data), error: None }
    }

    pub fn error(code: &str, message: &str) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ErrorResponse {
                code: code.to_string(),
                message: message.to_string(),
            }),
        }
    }
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

/// Paginated response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[aliases(AutomationPage = PaginatedResponse<AutomationRule>)]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub per_page: u32,
    pub total_pages: u32,
}

impl<T> PaginatedResponse<T> {
    /// Slice page `page` (1-based) of `per_page` items out of `all`
    pub fn paginate(all: Vec<T>, page: u32, per_page: u32) -> Self {
        let page = page.max(1);
        let per_page = per_page.max(1);
        let total = all.len() as u64;
        let total_pages = total.div_ceil(per_page as u64) as u32;
        let skip = (page as usize - 1).saturating_mul(per_page as usize);

        Self {
            items: all.into_iter().skip(skip).take(per_page as usize).collect(),
            total,
            page,
            per_page,
            total_pages,
        }
    }
}

// ============ Automations ============

/// Id of a newly created placeholder automation
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreatedAutomation {
    pub id: AutomationId,
}

/// Outcome of a delete; deleting an unknown id is not an error
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeleteOutcome {
    pub id: AutomationId,
    pub deleted: bool,
}

// ============ Evaluation ============

/// Message to evaluate against the active automations
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EvaluateRequest {
    pub message: String,
    pub channel: TriggerKind,
}

/// Evaluation result
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EvaluateResponse {
    pub matched: bool,
    pub reply: Option<String>,
    pub details: Option<RuleMatch>,
}

impl From<Option<RuleMatch>> for EvaluateResponse {
    fn from(hit: Option<RuleMatch>) -> Self {
        Self {
            matched: hit.is_some(),
            reply: hit.as_ref().map(|m| m.reply.clone()),
            details: hit,
        }
    }
}

// ============ Webhooks ============

/// Reply an automation produced for an inbound webhook event
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PlannedReply {
    pub channel: TriggerKind,
    /// Comment or message id the reply answers
    pub source_id: Option<String>,
    pub recipient_id: Option<String>,
    pub automation_id: AutomationId,
    pub reply: String,
}

/// Summary of a processed webhook delivery
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct WebhookReceipt {
    /// Inbound texts found in the payload
    pub received: usize,
    pub replies: Vec<PlannedReply>,
}
