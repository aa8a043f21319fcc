//! Evaluate command

use crate::output::OutputFormat;
use super::ApiClient;
use colored::Colorize;
use replyflow_core::{RuleMatch, TriggerKind};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct Evaluation {
    pub matched: bool,
    pub reply: Option<String>,
    pub details: Option<RuleMatch>,
}

pub async fn handle(
    channel: TriggerKind,
    message: &str,
    client: &ApiClient,
    format: OutputFormat,
) -> Result<(), String> {
    let body = serde_json::json!({ "message": message, "channel": channel });
    let result: Evaluation = client.post("/evaluate", &body).await?;

    if format != OutputFormat::Table {
        format.print(&result);
        return Ok(());
    }

    match result.details {
        Some(hit) => {
            println!(
                "{} automation {} ({}) on keyword {:?}",
                "Matched".green().bold(),
                hit.automation_id,
                hit.automation_name,
                hit.keyword,
            );
            println!("{}", hit.reply);
        }
        None => println!("{}", "No automation matched".yellow()),
    }
    Ok(())
}
