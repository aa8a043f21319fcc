//! Built-in rule content: the placeholder for new rules and sample data

use crate::model::{AutomationDraft, Response, Trigger, TriggerKind};

/// Name given to rules created with `create_empty`
pub const PLACEHOLDER_NAME: &str = "New Automation";

/// Content of a freshly created, inactive rule
pub fn placeholder_draft() -> AutomationDraft {
    AutomationDraft::new(
        PLACEHOLDER_NAME,
        Trigger::new(TriggerKind::Comment, "User comments on my post", &["Yes", "Interested"])
            .with_info("Initial trigger"),
        Response::fixed("Thank you for your interest!"),
    )
}

/// Sample rules for demo deployments: two active, one inactive AI rule
pub fn sample_drafts() -> Vec<AutomationDraft> {
    vec![
        AutomationDraft::new(
            "Direct traffic towards website",
            Trigger::new(
                TriggerKind::Comment,
                "User comments on my post",
                &["Yes", "Lets Go", "Interested", "Where do I Start?"],
            )
            .with_info("Asking about where to get started or how should they proceed"),
            Response::fixed(
                "Great to hear back from you, the link to our website is figma.com. \
                 Let us know what do you think about it. Thanks and have a great day!",
            ),
        )
        .active(true),
        AutomationDraft::new(
            "Answer product questions",
            Trigger::new(
                TriggerKind::DirectMessage,
                "User asks about product features",
                &["How does it work", "Features", "What can it do", "Pricing"],
            )
            .with_info("Questions about product functionality and pricing"),
            Response::fixed(
                "Thanks for your interest! Our product offers automated Instagram responses, \
                 AI-powered messaging, and analytics. Visit our website at example.com/pricing \
                 for detailed pricing information.",
            ),
        )
        .active(true),
        AutomationDraft::new(
            "Support request handler",
            Trigger::new(
                TriggerKind::DirectMessage,
                "User needs help or support",
                &["Help", "Support", "Not working", "Issue", "Problem"],
            )
            .with_info("Support requests and troubleshooting"),
            Response::ai(
                "You are a helpful support assistant. Help the user troubleshoot their issue \
                 with our Instagram automation tool.",
            ),
        ),
    ]
}
