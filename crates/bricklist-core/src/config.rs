//! Client configuration

use serde::{Deserialize, Serialize};

/// Configuration for the remote gateway.
///
/// Plain data with serde derives so host apps can embed it in their own
/// config files; `Default` matches the development backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the catalogue API, without a trailing slash
    pub api_base: String,
    /// User-Agent sent with every request
    pub user_agent: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: "http://localhost:8000".to_string(),
            user_agent: "bricklist/0.1".to_string(),
            timeout_secs: 30,
        }
    }
}

impl ClientConfig {
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_points_at_dev_backend() {
        let cfg = ClientConfig::default();
        assert_eq!(cfg.api_base, "http://localhost:8000");
        assert_eq!(cfg.timeout_secs, 30);
    }

    #[test]
    fn test_with_api_base() {
        let cfg = ClientConfig::default().with_api_base("https://api.bricklist.app");
        assert_eq!(cfg.api_base, "https://api.bricklist.app");
    }

    #[test]
    fn test_config_serde_round_trip() {
        let cfg = ClientConfig::default();
        let json = serde_json::to_string(&cfg).unwrap();
        let back: ClientConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.api_base, cfg.api_base);
        assert_eq!(back.user_agent, cfg.user_agent);
    }
}
