//! CLI Configuration

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// API URL used when neither the flag, the env var nor the profile set one
pub const DEFAULT_API_URL: &str = "http://localhost:8080/api/v1";

#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub api_url: Option<String>,
    pub default_format: Option<String>,
}

impl Config {
    pub fn load(profile: Option<&str>) -> Result<Self, String> {
        let path = Self::config_path(profile)?;
        if path.exists() {
            let content = fs::read_to_string(&path).map_err(|e| e.to_string())?;
            Self::parse(&content)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self, profile: Option<&str>) -> Result<PathBuf, String> {
        let path = Self::config_path(profile)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }
        let content = toml::to_string_pretty(self).map_err(|e| e.to_string())?;
        fs::write(&path, content).map_err(|e| e.to_string())?;
        Ok(path)
    }

    fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Set a key by name
    pub fn set(&mut self, key: &str, value: String) -> Result<(), String> {
        match key {
            "api_url" => self.api_url = Some(value),
            "default_format" => {
                value.parse::<crate::output::OutputFormat>()?;
                self.default_format = Some(value);
            }
            _ => return Err(format!("Unknown config key: {}", key)),
        }
        Ok(())
    }

    /// Get a key by name
    pub fn get(&self, key: &str) -> Result<Option<&str>, String> {
        match key {
            "api_url" => Ok(self.api_url.as_deref()),
            "default_format" => Ok(self.default_format.as_deref()),
            _ => Err(format!("Unknown config key: {}", key)),
        }
    }

    pub fn config_path(profile: Option<&str>) -> Result<PathBuf, String> {
        let home = dirs::home_dir().ok_or("Cannot find home directory")?;
        let filename = match profile {
            Some(p) => format!("config.{}.toml", p),
            None => "config.toml".to_string(),
        };
        Ok(home.join(".replyflow").join(filename))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_profile() {
        let config = Config::parse("api_url = \"http://staging:8080/api/v1\"\n").unwrap();
        assert_eq!(config.api_url.as_deref(), Some("http://staging:8080/api/v1"));
        assert!(config.default_format.is_none());
    }

    #[test]
    fn test_set_and_get() {
        let mut config = Config::default();
        config.set("default_format", "yaml".into()).unwrap();
        assert_eq!(config.get("default_format").unwrap(), Some("yaml"));

        assert!(config.set("default_format", "xml".into()).is_err());
        assert!(config.set("api_key", "x".into()).is_err());
        assert!(config.get("tenant").is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = Config::default();
        config.set("api_url", "http://localhost:9000/api/v1".into()).unwrap();
        let text = toml::to_string_pretty(&config).unwrap();
        assert_eq!(Config::parse(&text).unwrap(), config);
    }
}
