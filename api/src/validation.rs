//! Boundary validation for automation drafts
//!
//! The registry accepts any well-formed record; the dashboard rules live
//! here: a name, at least one trigger with a description and a keyword,
//! and a response with a payload.

use replyflow_core::AutomationDraft;

use crate::error::ApiError;

/// Check `draft` before it reaches the registry
pub fn validate_draft(draft: &AutomationDraft) -> Result<(), ApiError> {
    let mut problems = Vec::new();

    if draft.name.trim().is_empty() {
        problems.push("name must not be empty".to_string());
    }

    if draft.triggers.is_empty() {
        problems.push("at least one trigger is required".to_string());
    }
    for (index, trigger) in draft.triggers.iter().enumerate() {
        if trigger.description.trim().is_empty() {
            problems.push(format!("trigger {index}: description must not be empty"));
        }
        if !trigger.keywords.iter().any(|k| !k.trim().is_empty()) {
            problems.push(format!("trigger {index}: at least one keyword is required"));
        }
        if trigger.keywords.iter().any(|k| k.trim().is_empty()) {
            problems.push(format!("trigger {index}: keywords must not be blank"));
        }
    }

    match draft.responses.first() {
        None => problems.push("a response is required".to_string()),
        Some(response) if response.payload().trim().is_empty() => {
            problems.push("response must not be empty".to_string());
        }
        Some(_) => {}
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(ApiError::Validation(problems.join("; ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use replyflow_core::{Response, Trigger, TriggerKind};

    fn draft() -> AutomationDraft {
        AutomationDraft::new(
            "Pricing",
            Trigger::new(TriggerKind::Comment, "asks for price", &["price"]),
            Response::fixed("$10"),
        )
    }

    #[test]
    fn test_valid_draft() {
        assert!(validate_draft(&draft()).is_ok());
    }

    #[test]
    fn test_rejects_missing_keywords() {
        let mut d = draft();
        d.triggers[0].keywords.clear();
        let err = validate_draft(&d).unwrap_err();
        assert!(err.to_string().contains("at least one keyword"));
    }

    #[test]
    fn test_rejects_blank_fields() {
        let mut d = draft();
        d.name = "  ".into();
        d.triggers[0].description = String::new();
        d.responses = vec![Response::ai("")];

        let msg = validate_draft(&d).unwrap_err().to_string();
        assert!(msg.contains("name"));
        assert!(msg.contains("description"));
        assert!(msg.contains("response must not be empty"));
    }

    #[test]
    fn test_rejects_no_triggers_or_responses() {
        let mut d = draft();
        d.triggers.clear();
        d.responses.clear();

        let msg = validate_draft(&d).unwrap_err().to_string();
        assert!(msg.contains("at least one trigger"));
        assert!(msg.contains("a response is required"));
    }
}
