//! Chat endpoint configuration from TOML (`[api]` section)

use crate::http::HttpChatTransport;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Raw endpoint and credential settings
///
/// The key itself normally comes from the environment variable named by
/// `api_key_env`; `api_key` is only a fallback for setups without one.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileApiConfig {
    /// Chat completions URL (OpenAI-compatible, streaming)
    pub endpoint: String,
    /// Environment variable holding the API key
    pub api_key_env: String,
    /// Inline API key (used when the environment variable is unset)
    pub api_key: Option<String>,
    /// TCP/TLS connect timeout
    pub connect_timeout_seconds: u64,
    /// Maximum wait for each read of the response body
    pub read_timeout_seconds: u64,
}

impl FileApiConfig {
    pub const DEFAULT_ENDPOINT: &'static str = HttpChatTransport::DEFAULT_ENDPOINT;
    pub const DEFAULT_API_KEY_ENV: &'static str = "GROQ_API_KEY";

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_seconds)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_seconds)
    }
}

impl Default for FileApiConfig {
    fn default() -> Self {
        Self {
            endpoint: Self::DEFAULT_ENDPOINT.to_string(),
            api_key_env: Self::DEFAULT_API_KEY_ENV.to_string(),
            api_key: None,
            connect_timeout_seconds: 10,
            read_timeout_seconds: 60,
        }
    }
}

// Hand-written so `--show-config` and debug logs never print the key.
impl fmt::Debug for FileApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileApiConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key_env", &self.api_key_env)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("connect_timeout_seconds", &self.connect_timeout_seconds)
            .field("read_timeout_seconds", &self.read_timeout_seconds)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_api_key() {
        let config = FileApiConfig {
            api_key: Some("gsk_secret".to_string()),
            ..Default::default()
        };
        let printed = format!("{:?}", config);
        assert!(!printed.contains("gsk_secret"));
        assert!(printed.contains("<redacted>"));
    }

    #[test]
    fn test_timeouts() {
        let config = FileApiConfig::default();
        assert_eq!(config.read_timeout(), Duration::from_secs(60));
        assert_eq!(config.connect_timeout(), Duration::from_secs(10));
    }
}
