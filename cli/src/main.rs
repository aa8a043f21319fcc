//! ReplyFlow CLI
//!
//! Command-line interface for the ReplyFlow API.
//!
//! # Usage
//!
//! ```bash
//! replyflow automations list --status active
//! replyflow automations new
//! replyflow automations apply -f pricing.yaml
//! replyflow automations activate 4
//! replyflow evaluate --channel comment "what's the price?"
//! ```

use clap::{Parser, Subcommand};
use colored::Colorize;
use replyflow_core::{RuleStatus, TriggerKind};

mod commands;
mod config;
mod output;

#[derive(Parser)]
#[command(name = "replyflow")]
#[command(author = "ReplyFlow")]
#[command(version)]
#[command(about = "ReplyFlow Command Line Interface", long_about = None)]
struct Cli {
    /// API endpoint URL
    #[arg(long, env = "REPLYFLOW_API_URL")]
    api_url: Option<String>,

    /// Output format
    #[arg(long, short)]
    format: Option<output::OutputFormat>,

    /// Profile name from config file
    #[arg(long, short)]
    profile: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage automations
    Automations {
        #[command(subcommand)]
        action: AutomationCommands,
    },
    /// Evaluate a message against the active automations
    Evaluate {
        /// Channel the message arrived on (comment or dm)
        #[arg(long, short, default_value = "comment")]
        channel: TriggerKind,
        /// Message text
        message: String,
    },
    /// Configure CLI
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum AutomationCommands {
    /// List automations
    List {
        /// Case-insensitive name filter
        #[arg(long)]
        search: Option<String>,
        /// active or draft
        #[arg(long)]
        status: Option<RuleStatus>,
    },
    /// Get automation details
    Get { id: u64 },
    /// Create an inactive placeholder automation
    New,
    /// Create an automation from a JSON or YAML file
    Apply {
        #[arg(short, long)]
        file: String,
    },
    /// Replace an automation with the contents of a file
    Update {
        id: u64,
        #[arg(short, long)]
        file: String,
    },
    /// Delete an automation
    Delete { id: u64 },
    /// Start matching inbound messages
    Activate { id: u64 },
    /// Stop matching inbound messages
    Deactivate { id: u64 },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Set configuration value
    Set { key: String, value: String },
    /// Get configuration value
    Get { key: String },
    /// List all configuration
    List,
    /// Initialize configuration
    Init,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = config::Config::load(cli.profile.as_deref()).unwrap_or_default();
    let api_url = cli.api_url
        .or(config.api_url)
        .unwrap_or_else(|| config::DEFAULT_API_URL.into());
    let format = cli.format
        .or_else(|| config.default_format.as_deref().and_then(|f| f.parse().ok()))
        .unwrap_or(output::OutputFormat::Table);

    let client = commands::ApiClient::new(&api_url);

    let result = match cli.command {
        Commands::Automations { action } => {
            commands::automations::handle(action, &client, format).await
        }
        Commands::Evaluate { channel, message } => {
            commands::evaluate::handle(channel, &message, &client, format).await
        }
        Commands::Config { action } => {
            commands::config::handle(action, cli.profile.as_deref()).await
        }
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}
