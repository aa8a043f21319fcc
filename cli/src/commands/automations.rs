//! Automations commands

use crate::{AutomationCommands, output::OutputFormat};
use super::ApiClient;
use colored::Colorize;
use replyflow_core::{AutomationDraft, AutomationRule};
use serde::{Deserialize, Serialize};
use std::fs;

#[derive(Debug, Deserialize)]
pub struct PaginatedAutomations {
    pub items: Vec<AutomationRule>,
    pub total: u64,
}

#[derive(Debug, Deserialize)]
pub struct CreatedAutomation {
    pub id: u64,
}

#[derive(Debug, Deserialize)]
pub struct DeleteOutcome {
    pub deleted: bool,
}

#[derive(Debug, Serialize)]
struct ListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<replyflow_core::RuleStatus>,
    per_page: u32,
}

pub async fn handle(
    action: AutomationCommands,
    client: &ApiClient,
    format: OutputFormat,
) -> Result<(), String> {
    match action {
        AutomationCommands::List { search, status } => {
            let query = ListQuery { search, status, per_page: 100 };
            let page: PaginatedAutomations = client.get_with_query("/automations", &query).await?;
            format.print_rules(&page.items);
            if format == OutputFormat::Table && page.total > page.items.len() as u64 {
                println!("({} of {} shown)", page.items.len(), page.total);
            }
        }
        AutomationCommands::Get { id } => {
            let rule: AutomationRule = client.get(&format!("/automations/{}", id)).await?;
            format.print(&rule);
        }
        AutomationCommands::New => {
            let created: CreatedAutomation = client.post_empty("/automations/draft").await?;
            println!("{} {}", "Created automation:".green(), created.id);
        }
        AutomationCommands::Apply { file } => {
            let draft = read_draft(&file)?;
            let rule: AutomationRule = client.post("/automations", &draft).await?;
            println!("{} {}", "Applied automation:".green(), rule.id);
        }
        AutomationCommands::Update { id, file } => {
            let draft = read_draft(&file)?;
            let rule: AutomationRule = client.put(&format!("/automations/{}", id), &draft).await?;
            println!("{} {}", "Updated automation:".green(), rule.id);
        }
        AutomationCommands::Delete { id } => {
            let outcome: DeleteOutcome = client.delete(&format!("/automations/{}", id)).await?;
            if outcome.deleted {
                println!("{} {}", "Deleted automation:".green(), id);
            } else {
                println!("{} {}", "No automation with id".yellow(), id);
            }
        }
        AutomationCommands::Activate { id } => {
            let rule: AutomationRule =
                client.post_empty(&format!("/automations/{}/activate", id)).await?;
            println!("{} {} ({})", "Activated automation:".green(), rule.id, rule.name);
        }
        AutomationCommands::Deactivate { id } => {
            let rule: AutomationRule =
                client.post_empty(&format!("/automations/{}/deactivate", id)).await?;
            println!("{} {} ({})", "Deactivated automation:".yellow(), rule.id, rule.name);
        }
    }
    Ok(())
}

/// Read a draft from a JSON or YAML file
fn read_draft(file: &str) -> Result<AutomationDraft, String> {
    let content = fs::read_to_string(file).map_err(|e| format!("{}: {}", file, e))?;
    parse_draft(file, &content)
}

fn parse_draft(file: &str, content: &str) -> Result<AutomationDraft, String> {
    if file.ends_with(".yaml") || file.ends_with(".yml") {
        serde_yaml::from_str(content).map_err(|e| e.to_string())
    } else {
        serde_json::from_str(content).map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use replyflow_core::{Response, TriggerKind};

    #[test]
    fn test_parse_yaml_draft() {
        let yaml = r#"
name: Pricing
is_active: true
triggers:
  - type: comment
    description: User asks for the price
    keywords: [price, cost]
responses:
  - type: fixed_message
    content: "$10"
"#;
        let draft = parse_draft("pricing.yaml", yaml).unwrap();
        assert_eq!(draft.name, "Pricing");
        assert!(draft.is_active);
        assert_eq!(draft.triggers[0].kind, TriggerKind::Comment);
        assert_eq!(draft.triggers[0].keywords, vec!["price", "cost"]);
        assert_eq!(draft.responses, vec![Response::fixed("$10")]);
    }

    #[test]
    fn test_parse_json_draft() {
        let json = r#"{
            "name": "Support",
            "triggers": [{"type": "dm", "description": "needs help", "keywords": ["help"]}],
            "responses": [{"type": "ai_chatbot", "ai_prompt": "Be helpful"}]
        }"#;
        let draft = parse_draft("support.json", json).unwrap();
        assert!(!draft.is_active);
        assert_eq!(draft.responses, vec![Response::ai("Be helpful")]);
    }

    #[test]
    fn test_parse_draft_error() {
        assert!(parse_draft("broken.json", "{").is_err());
    }
}
