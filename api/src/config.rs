//! API Configuration

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest page a listing may request
pub const MAX_PAGE_SIZE: u32 = 100;

/// Configuration loading error
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Listen address
    pub bind_addr: String,
    /// Token Instagram echoes back during the webhook handshake.
    /// Without one, every handshake is rejected.
    pub webhook_verify_token: Option<String>,
    /// Start with the sample automations
    pub seed_sample_data: bool,
    /// Page size when the request names none
    pub default_page_size: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".into(),
            webhook_verify_token: None,
            seed_sample_data: true,
            default_page_size: 20,
        }
    }
}

impl ApiConfig {
    /// Load from a JSON file
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Apply `REPLYFLOW_BIND_ADDR` and `INSTAGRAM_WEBHOOK_VERIFY_TOKEN`
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(
            std::env::var("REPLYFLOW_BIND_ADDR").ok(),
            std::env::var("INSTAGRAM_WEBHOOK_VERIFY_TOKEN").ok(),
        )
    }

    fn with_overrides(mut self, bind_addr: Option<String>, verify_token: Option<String>) -> Self {
        if let Some(addr) = bind_addr.filter(|a| !a.is_empty()) {
            self.bind_addr = addr;
        }
        if let Some(token) = verify_token.filter(|t| !t.is_empty()) {
            self.webhook_verify_token = Some(token);
        }
        self
    }

    /// Clamp a requested page size into `1..=MAX_PAGE_SIZE`
    pub fn page_size(&self, requested: Option<u32>) -> u32 {
        requested
            .unwrap_or(self.default_page_size)
            .clamp(1, MAX_PAGE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: ApiConfig = serde_json::from_str(r#"{"bind_addr": "127.0.0.1:9000"}"#).unwrap();
        assert_eq!(config.bind_addr, "127.0.0.1:9000");
        assert!(config.seed_sample_data);
        assert_eq!(config.default_page_size, 20);
        assert!(config.webhook_verify_token.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = ApiConfig::default()
            .with_overrides(Some("127.0.0.1:1".into()), Some("secret".into()));
        assert_eq!(config.bind_addr, "127.0.0.1:1");
        assert_eq!(config.webhook_verify_token.as_deref(), Some("secret"));

        let config = ApiConfig::default().with_overrides(Some(String::new()), None);
        assert_eq!(config.bind_addr, "0.0.0.0:8080");
    }

    #[test]
    fn test_page_size_clamped() {
        let config = ApiConfig::default();
        assert_eq!(config.page_size(None), 20);
        assert_eq!(config.page_size(Some(0)), 1);
        assert_eq!(config.page_size(Some(1000)), MAX_PAGE_SIZE);
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            ApiConfig::load("/nonexistent/replyflow.json"),
            Err(ConfigError::Io(_))
        ));
    }
}
