//! Instagram webhook payloads
//!
//! Only the parts the matcher needs are modelled: comment text from
//! `entry[].changes[]` and DM text from `entry[].messaging[]`. Everything
//! else in the delivery is ignored.

use replyflow_core::TriggerKind;
use serde::Deserialize;

/// Webhook delivery
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookPayload {
    #[serde(default)]
    pub object: String,
    #[serde(default)]
    pub entry: Vec<WebhookEntry>,
}

/// Per-account batch of events
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEntry {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub time: Option<i64>,
    #[serde(default)]
    pub changes: Vec<ChangeEvent>,
    #[serde(default)]
    pub messaging: Vec<MessagingEvent>,
}

/// Field change notification (comments arrive here)
#[derive(Debug, Clone, Deserialize)]
pub struct ChangeEvent {
    pub field: String,
    #[serde(default)]
    pub value: ChangeValue,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChangeValue {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub from: Option<Participant>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Participant {
    pub id: String,
    #[serde(default)]
    pub username: Option<String>,
}

/// Messaging event (direct messages arrive here)
#[derive(Debug, Clone, Deserialize)]
pub struct MessagingEvent {
    #[serde(default)]
    pub sender: Option<Participant>,
    #[serde(default)]
    pub message: Option<MessageBody>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessageBody {
    #[serde(default)]
    pub mid: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    /// Set on copies of messages the account itself sent
    #[serde(default)]
    pub is_echo: bool,
}

/// Text pulled out of a delivery, ready for evaluation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    pub channel: TriggerKind,
    pub text: String,
    pub source_id: Option<String>,
    pub sender_id: Option<String>,
}

impl WebhookPayload {
    /// Comments and DMs carried by this delivery, in payload order.
    ///
    /// Echoes of our own messages and events without text are dropped.
    pub fn inbound_messages(&self) -> Vec<InboundMessage> {
        let mut inbound = Vec::new();

        for entry in &self.entry {
            for change in entry.changes.iter().filter(|c| c.field == "comments") {
                if let Some(text) = &change.value.text {
                    inbound.push(InboundMessage {
                        channel: TriggerKind::Comment,
                        text: text.clone(),
                        source_id: change.value.id.clone(),
                        sender_id: change.value.from.as_ref().map(|p| p.id.clone()),
                    });
                }
            }

            for event in &entry.messaging {
                let Some(message) = event.message.as_ref().filter(|m| !m.is_echo) else {
                    continue;
                };
                if let Some(text) = &message.text {
                    inbound.push(InboundMessage {
                        channel: TriggerKind::DirectMessage,
                        text: text.clone(),
                        source_id: message.mid.clone(),
                        sender_id: event.sender.as_ref().map(|p| p.id.clone()),
                    });
                }
            }
        }

        inbound
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELIVERY: &str = r#"{
        "object": "instagram",
        "entry": [{
            "id": "17841400000000000",
            "time": 1700000000,
            "changes": [
                {"field": "comments", "value": {"id": "c1", "text": "Interested!", "from": {"id": "u1", "username": "ana"}}},
                {"field": "mentions", "value": {"id": "m1"}}
            ],
            "messaging": [
                {"sender": {"id": "u2"}, "message": {"mid": "d1", "text": "pricing?"}},
                {"sender": {"id": "me"}, "message": {"mid": "d2", "text": "pricing is $10", "is_echo": true}},
                {"sender": {"id": "u3"}, "read": {"mid": "d1"}}
            ]
        }]
    }"#;

    #[test]
    fn test_extracts_comments_and_dms() {
        let payload: WebhookPayload = serde_json::from_str(DELIVERY).unwrap();
        let inbound = payload.inbound_messages();

        assert_eq!(inbound.len(), 2);
        assert_eq!(inbound[0].channel, TriggerKind::Comment);
        assert_eq!(inbound[0].text, "Interested!");
        assert_eq!(inbound[0].source_id.as_deref(), Some("c1"));
        assert_eq!(inbound[0].sender_id.as_deref(), Some("u1"));

        assert_eq!(inbound[1].channel, TriggerKind::DirectMessage);
        assert_eq!(inbound[1].text, "pricing?");
        assert_eq!(inbound[1].sender_id.as_deref(), Some("u2"));
    }

    #[test]
    fn test_empty_object() {
        let payload: WebhookPayload = serde_json::from_str("{}").unwrap();
        assert!(payload.inbound_messages().is_empty());
    }
}
