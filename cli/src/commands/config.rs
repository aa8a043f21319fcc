//! Config commands

use crate::ConfigCommands;
use crate::config::Config;

pub async fn handle(action: ConfigCommands, profile: Option<&str>) -> Result<(), String> {
    match action {
        ConfigCommands::Init => {
            let config = Config {
                api_url: Some(crate::config::DEFAULT_API_URL.into()),
                default_format: Some("table".into()),
            };
            let path = config.save(profile)?;
            println!("Configuration initialized at {}", path.display());
        }
        ConfigCommands::Set { key, value } => {
            let mut config = Config::load(profile).unwrap_or_default();
            config.set(&key, value)?;
            config.save(profile)?;
            println!("Set {} successfully", key);
        }
        ConfigCommands::Get { key } => {
            let config = Config::load(profile).unwrap_or_default();
            let value = config.get(&key)?;
            println!("{}: {}", key, value.unwrap_or("(not set)"));
        }
        ConfigCommands::List => {
            let config = Config::load(profile).unwrap_or_default();
            println!("api_url: {}", config.api_url.as_deref().unwrap_or("(not set)"));
            println!("default_format: {}", config.default_format.as_deref().unwrap_or("(not set)"));
        }
    }
    Ok(())
}
