//! Output formatting

use clap::ValueEnum;
use replyflow_core::AutomationRule;
use serde::Serialize;
use tabled::{Table, Tabled};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Yaml,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        <Self as ValueEnum>::from_str(s, true)
    }
}

impl OutputFormat {
    pub fn print<T: Serialize>(&self, data: &T) {
        match self {
            OutputFormat::Yaml => {
                println!("{}", serde_yaml::to_string(data).unwrap_or_default());
            }
            // Single records read better as JSON than as a one-row table
            OutputFormat::Json | OutputFormat::Table => {
                println!("{}", serde_json::to_string_pretty(data).unwrap_or_default());
            }
        }
    }

    pub fn print_rules(&self, rules: &[AutomationRule]) {
        match self {
            OutputFormat::Table => println!("{}", rules_table(rules)),
            _ => self.print(&rules),
        }
    }
}

/// One line of the automations table
#[derive(Tabled)]
pub struct AutomationRow {
    #[tabled(rename = "ID")]
    pub id: u64,
    #[tabled(rename = "NAME")]
    pub name: String,
    #[tabled(rename = "STATUS")]
    pub status: &'static str,
    #[tabled(rename = "CHANNEL")]
    pub channel: String,
    #[tabled(rename = "KEYWORDS")]
    pub keywords: String,
    #[tabled(rename = "RESPONSE")]
    pub response: &'static str,
}

impl From<&AutomationRule> for AutomationRow {
    fn from(rule: &AutomationRule) -> Self {
        let first = rule.triggers.first();
        Self {
            id: rule.id,
            name: rule.name.clone(),
            status: if rule.is_active { "active" } else { "draft" },
            channel: first.map(|t| t.kind.to_string()).unwrap_or_else(|| "-".into()),
            // The dashboard card shows at most four keywords
            keywords: first
                .map(|t| t.keywords.iter().take(4).cloned().collect::<Vec<_>>().join(", "))
                .unwrap_or_default(),
            response: match rule.primary_response() {
                Some(r) if r.is_ai() => "ai",
                Some(_) => "fixed",
                None => "-",
            },
        }
    }
}

pub fn rules_table(rules: &[AutomationRule]) -> String {
    Table::new(rules.iter().map(AutomationRow::from)).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use replyflow_core::{AutomationRegistry, TriggerKind};

    #[test]
    fn test_parse_format() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_rows_from_sample_rules() {
        let rules = AutomationRegistry::with_sample_data().list_all();
        let rows: Vec<AutomationRow> = rules.iter().map(AutomationRow::from).collect();

        assert_eq!(rows[0].status, "active");
        assert_eq!(rows[0].channel, TriggerKind::Comment.to_string());
        assert_eq!(rows[0].keywords, "Yes, Lets Go, Interested, Where do I Start?");
        assert_eq!(rows[2].status, "draft");
        assert_eq!(rows[2].response, "ai");

        let table = rules_table(&rules);
        assert!(table.contains("Support request handler"));
    }
}
