//! Automation rule model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Registry-assigned rule identifier
pub type AutomationId = u64;

// ============ Triggers ============

/// Inbound surface a message arrived on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum TriggerKind {
    /// Comment on a post
    #[serde(rename = "comment")]
    Comment,
    /// Direct message
    #[serde(rename = "dm")]
    DirectMessage,
}

impl std::fmt::Display for TriggerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Comment => write!(f, "comment"),
            Self::DirectMessage => write!(f, "dm"),
        }
    }
}

impl std::str::FromStr for TriggerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "comment" => Ok(Self::Comment),
            "dm" | "direct_message" | "directmessage" => Ok(Self::DirectMessage),
            other => Err(format!("unknown channel: {other}")),
        }
    }
}

/// Condition that activates a rule: a channel plus a keyword set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Trigger {
    /// Channel this trigger listens on
    #[serde(rename = "type")]
    pub kind: TriggerKind,
    /// Human-readable label
    pub description: String,
    /// Case-insensitive substrings, any of which fires the trigger
    pub keywords: Vec<String>,
    /// Free-text context, not used for matching
    #[serde(default)]
    pub additional_info: String,
}

impl Trigger {
    /// Create a trigger with no additional info
    pub fn new(kind: TriggerKind, description: impl Into<String>, keywords: &[&str]) -> Self {
        Self {
            kind,
            description: description.into(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            additional_info: String::new(),
        }
    }

    /// Set additional info
    pub fn with_info(mut self, info: impl Into<String>) -> Self {
        self.additional_info = info.into();
        self
    }

    /// First keyword contained in `folded_message`.
    ///
    /// `folded_message` must already be lowercased. Plain substring
    /// containment: no tokenization and no word boundaries, so a keyword
    /// like `"a"` matches almost anything.
    pub fn matched_keyword(&self, folded_message: &str) -> Option<&str> {
        self.keywords
            .iter()
            .find(|keyword| folded_message.contains(&keyword.to_lowercase()))
            .map(String::as_str)
    }
}

// ============ Responses ============

/// Prefix of the stand-in reply for AI chatbot responses
pub const AI_PLACEHOLDER_PREFIX: &str = "AI response based on: ";

/// Action taken when a rule matches
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Response {
    /// Literal reply text
    FixedMessage {
        /// Reply sent verbatim
        content: String,
    },
    /// Reply delegated to an external generation service
    AiChatbot {
        /// Prompt handed to the generator
        ai_prompt: String,
    },
}

impl Response {
    /// Fixed reply
    pub fn fixed(content: impl Into<String>) -> Self {
        Self::FixedMessage { content: content.into() }
    }

    /// AI chatbot reply
    pub fn ai(prompt: impl Into<String>) -> Self {
        Self::AiChatbot { ai_prompt: prompt.into() }
    }

    /// Reply text for this response.
    ///
    /// AI responses resolve to a placeholder naming the prompt; generation
    /// happens outside the core.
    pub fn resolve(&self) -> String {
        match self {
            Self::FixedMessage { content } => content.clone(),
            Self::AiChatbot { ai_prompt } => format!("{AI_PLACEHOLDER_PREFIX}{ai_prompt}"),
        }
    }

    /// Payload text regardless of variant
    pub fn payload(&self) -> &str {
        match self {
            Self::FixedMessage { content } => content,
            Self::AiChatbot { ai_prompt } => ai_prompt,
        }
    }

    /// Whether replies are AI generated
    pub fn is_ai(&self) -> bool {
        matches!(self, Self::AiChatbot { .. })
    }
}

// ============ Rules ============

/// A named bundle of triggers and a single response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AutomationRule {
    /// Registry-assigned id
    pub id: AutomationId,
    /// Display name
    pub name: String,
    /// Triggers in priority order
    pub triggers: Vec<Trigger>,
    /// Responses; only the first is ever used
    pub responses: Vec<Response>,
    /// Creation time, immutable
    pub created_at: DateTime<Utc>,
    /// Only active rules are matched
    pub is_active: bool,
}

impl AutomationRule {
    /// The response consulted on a match
    pub fn primary_response(&self) -> Option<&Response> {
        self.responses.first()
    }

    /// First trigger on `channel` with a keyword contained in `folded_message`.
    ///
    /// Returns the trigger index and the keyword as written in the rule.
    pub fn matching_trigger(
        &self,
        folded_message: &str,
        channel: TriggerKind,
    ) -> Option<(usize, &str)> {
        self.triggers
            .iter()
            .enumerate()
            .filter(|(_, trigger)| trigger.kind == channel)
            .find_map(|(index, trigger)| {
                trigger.matched_keyword(folded_message).map(|keyword| (index, keyword))
            })
    }

    /// Copy of the rule content as a draft
    pub fn to_draft(&self) -> AutomationDraft {
        AutomationDraft {
            name: self.name.clone(),
            triggers: self.triggers.clone(),
            responses: self.responses.clone(),
            created_at: Some(self.created_at),
            is_active: self.is_active,
        }
    }
}

/// Caller-supplied rule content without a registry id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AutomationDraft {
    /// Display name
    pub name: String,
    /// Triggers in priority order
    pub triggers: Vec<Trigger>,
    /// Responses; only the first is ever used
    pub responses: Vec<Response>,
    /// Creation time; the registry fills in now when absent
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Defaults to inactive
    #[serde(default)]
    pub is_active: bool,
}

impl AutomationDraft {
    /// Inactive draft with one trigger and one response
    pub fn new(name: impl Into<String>, trigger: Trigger, response: Response) -> Self {
        Self {
            name: name.into(),
            triggers: vec![trigger],
            responses: vec![response],
            created_at: None,
            is_active: false,
        }
    }

    /// Set the active flag
    pub fn active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    /// Append a trigger
    pub fn with_trigger(mut self, trigger: Trigger) -> Self {
        self.triggers.push(trigger);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_wire_shape() {
        let fixed = serde_json::to_value(Response::fixed("$10")).unwrap();
        assert_eq!(fixed["type"], "fixed_message");
        assert_eq!(fixed["content"], "$10");

        let ai: Response = serde_json::from_str(
            r#"{"type":"ai_chatbot","ai_prompt":"be helpful"}"#,
        ).unwrap();
        assert_eq!(ai, Response::ai("be helpful"));

        // A variant without its payload is rejected
        let mixed = serde_json::from_str::<Response>(r#"{"type":"fixed_message"}"#);
        assert!(mixed.is_err());
    }

    #[test]
    fn test_resolve_ai_placeholder() {
        let reply = Response::ai("You are a support assistant").resolve();
        assert_eq!(reply, "AI response based on: You are a support assistant");
    }

    #[test]
    fn test_trigger_kind_wire_names() {
        assert_eq!(serde_json::to_value(TriggerKind::Comment).unwrap(), "comment");
        assert_eq!(serde_json::to_value(TriggerKind::DirectMessage).unwrap(), "dm");
        assert_eq!("DM".parse::<TriggerKind>().unwrap(), TriggerKind::DirectMessage);
        assert!("story".parse::<TriggerKind>().is_err());
    }

    #[test]
    fn test_draft_defaults() {
        let draft: AutomationDraft = serde_json::from_str(
            r#"{
                "name": "Pricing",
                "triggers": [{"type": "comment", "description": "asks", "keywords": ["price"]}],
                "responses": [{"type": "fixed_message", "content": "$10"}]
            }"#,
        ).unwrap();

        assert!(!draft.is_active);
        assert!(draft.created_at.is_none());
        assert_eq!(draft.triggers[0].additional_info, "");
    }

    #[test]
    fn test_matched_keyword_is_substring() {
        let trigger = Trigger::new(TriggerKind::Comment, "asks", &["Where do I Start?", "go"]);
        assert_eq!(trigger.matched_keyword("so where do i start?"), Some("Where do I Start?"));
        // No word boundaries
        assert_eq!(trigger.matched_keyword("good stuff"), Some("go"));
        assert_eq!(trigger.matched_keyword("nothing here"), None);
    }
}
