//! Message matching
//!
//! Linear scan over rules in registry order. The first active rule with a
//! trigger on the message's channel and a keyword contained in the message
//! wins; there is no ranking or scoring.

use serde::{Deserialize, Serialize};

use crate::model::{AutomationId, AutomationRule, TriggerKind};

/// Provenance of a successful evaluation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct RuleMatch {
    /// Matching rule
    pub automation_id: AutomationId,
    /// Name of the matching rule
    pub automation_name: String,
    /// Index of the trigger that fired
    pub trigger_index: usize,
    /// Keyword as written in the rule
    pub keyword: String,
    /// Resolved reply text
    pub reply: String,
}

/// Evaluate `message` on `channel` against `rules`, in order.
///
/// Total for every input: an empty message, an empty rule list or rules
/// without keywords all yield `None`.
pub fn find_match(
    rules: &[AutomationRule],
    message: &str,
    channel: TriggerKind,
) -> Option<RuleMatch> {
    let folded = message.to_lowercase();

    for rule in rules.iter().filter(|rule| rule.is_active) {
        let Some((trigger_index, keyword)) = rule.matching_trigger(&folded, channel) else {
            continue;
        };

        // Inert without a response; keep scanning
        let Some(response) = rule.primary_response() else {
            tracing::warn!(
                automation_id = rule.id,
                keyword,
                "matched automation has no response"
            );
            continue;
        };

        return Some(RuleMatch {
            automation_id: rule.id,
            automation_name: rule.name.clone(),
            trigger_index,
            keyword: keyword.to_string(),
            reply: response.resolve(),
        });
    }

    None
}

/// Reply text for `message` on `channel`, if any rule matches
pub fn evaluate(rules: &[AutomationRule], message: &str, channel: TriggerKind) -> Option<String> {
    find_match(rules, message, channel).map(|m| m.reply)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Response, Trigger};
    use chrono::Utc;

    fn rule(
        id: AutomationId,
        active: bool,
        triggers: Vec<Trigger>,
        responses: Vec<Response>,
    ) -> AutomationRule {
        AutomationRule {
            id,
            name: format!("rule-{id}"),
            triggers,
            responses,
            created_at: Utc::now(),
            is_active: active,
        }
    }

    fn comment(keywords: &[&str]) -> Trigger {
        Trigger::new(TriggerKind::Comment, "comment trigger", keywords)
    }

    fn dm(keywords: &[&str]) -> Trigger {
        Trigger::new(TriggerKind::DirectMessage, "dm trigger", keywords)
    }

    #[test]
    fn test_case_insensitive_match() {
        let rules = vec![rule(1, true, vec![comment(&["yes"])], vec![Response::fixed("hi")])];
        assert_eq!(evaluate(&rules, "YES please", TriggerKind::Comment), Some("hi".into()));

        let triggers = vec![comment(&["Interested"])];
        let rules = vec![rule(1, true, triggers, vec![Response::fixed("hi")])];
        assert_eq!(evaluate(&rules, "very interested!", TriggerKind::Comment), Some("hi".into()));
    }

    #[test]
    fn test_inactive_rule_never_matches() {
        let rules = vec![rule(1, false, vec![comment(&["price"])], vec![Response::fixed("$10")])];
        assert_eq!(evaluate(&rules, "price?", TriggerKind::Comment), None);
    }

    #[test]
    fn test_channel_mismatch() {
        let rules = vec![rule(1, true, vec![comment(&["price"])], vec![Response::fixed("$10")])];
        assert_eq!(evaluate(&rules, "what's the price?", TriggerKind::Comment), Some("$10".into()));
        assert_eq!(evaluate(&rules, "what's the price?", TriggerKind::DirectMessage), None);
    }

    #[test]
    fn test_first_rule_wins() {
        let rules = vec![
            rule(1, true, vec![comment(&["interested"])], vec![Response::fixed("A")]),
            rule(2, true, vec![comment(&["interested", "very"])], vec![Response::fixed("B")]),
        ];
        let hit = find_match(&rules, "very interested", TriggerKind::Comment).unwrap();
        assert_eq!(hit.automation_id, 1);
        assert_eq!(hit.reply, "A");
    }

    #[test]
    fn test_triggers_checked_in_order() {
        let rules = vec![rule(
            1,
            true,
            vec![dm(&["help"]), comment(&["nope"]), comment(&["help"])],
            vec![Response::fixed("on it")],
        )];
        let hit = find_match(&rules, "help me", TriggerKind::Comment).unwrap();
        assert_eq!(hit.trigger_index, 2);
        assert_eq!(hit.keyword, "help");
    }

    #[test]
    fn test_empty_keywords_are_inert() {
        let rules = vec![rule(1, true, vec![comment(&[])], vec![Response::fixed("x")])];
        assert_eq!(evaluate(&rules, "anything at all", TriggerKind::Comment), None);
        assert_eq!(evaluate(&rules, "", TriggerKind::Comment), None);
    }

    #[test]
    fn test_empty_string_keyword_matches_everything() {
        let rules = vec![rule(1, true, vec![comment(&[""])], vec![Response::fixed("always")])];
        let always = Some("always".to_string());
        assert_eq!(evaluate(&rules, "unrelated text", TriggerKind::Comment), always);
        assert_eq!(evaluate(&rules, "", TriggerKind::Comment), always);
        assert_eq!(evaluate(&rules, "", TriggerKind::DirectMessage), None);
    }

    #[test]
    fn test_empty_message_and_no_rules() {
        assert_eq!(evaluate(&[], "", TriggerKind::DirectMessage), None);
        let rules = vec![rule(1, true, vec![comment(&["hi"])], vec![Response::fixed("x")])];
        assert_eq!(evaluate(&rules, "", TriggerKind::Comment), None);
    }

    #[test]
    fn test_rule_without_response_is_skipped() {
        let rules = vec![
            rule(1, true, vec![comment(&["price"])], vec![]),
            rule(2, true, vec![comment(&["price"])], vec![Response::fixed("$10")]),
        ];
        let hit = find_match(&rules, "price", TriggerKind::Comment).unwrap();
        assert_eq!(hit.automation_id, 2);
    }

    #[test]
    fn test_only_first_response_used() {
        let rules = vec![rule(
            1,
            true,
            vec![dm(&["support"])],
            vec![Response::ai("be kind"), Response::fixed("ignored")],
        )];
        assert_eq!(
            evaluate(&rules, "Support please", TriggerKind::DirectMessage),
            Some("AI response based on: be kind".into())
        );
    }
}
