//! Raw TOML configuration data types
//!
//! These structs mirror the config file layout. Every section is optional and
//! falls back to its `Default`.

mod api;
mod generation;
mod paths;
mod repl;

pub use api::FileApiConfig;
pub use generation::FileGenerationConfig;
pub use paths::{FileFavoritesConfig, FileLoggingConfig, expand_home};
pub use repl::FileReplConfig;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq)]
pub enum ConfigValidationError {
    #[error("generation.model cannot be empty")]
    EmptyModelName,

    #[error("generation.max_tokens must be greater than 0")]
    InvalidMaxTokens,

    #[error("generation.temperature must be between 0 and 2 (got {0})")]
    InvalidTemperature(f64),

    #[error("api.read_timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("api.endpoint cannot be empty")]
    EmptyEndpoint,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Endpoint and credentials
    pub api: FileApiConfig,
    /// Model and sampling
    pub generation: FileGenerationConfig,
    /// Favorites source
    pub favorites: FileFavoritesConfig,
    /// Conversation transcript
    pub logging: FileLoggingConfig,
    /// Interactive mode
    pub repl: FileReplConfig,
}

impl FileConfig {
    /// Validate the configuration, reporting the first problem found
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.api.endpoint.trim().is_empty() {
            return Err(ConfigValidationError::EmptyEndpoint);
        }
        if self.api.read_timeout_seconds == 0 {
            return Err(ConfigValidationError::InvalidTimeout);
        }
        if self.generation.model.trim().is_empty() {
            return Err(ConfigValidationError::EmptyModelName);
        }
        if self.generation.max_tokens == 0 {
            return Err(ConfigValidationError::InvalidMaxTokens);
        }
        let temperature = self.generation.temperature;
        if !(0.0..=2.0).contains(&temperature) {
            return Err(ConfigValidationError::InvalidTemperature(temperature));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[api]
endpoint = "http://localhost:8080/v1/chat/completions"
api_key_env = "LOCAL_LLM_KEY"
read_timeout_seconds = 30

[generation]
model = "llama-3.1-8b-instant"
temperature = 0.9
max_tokens = 256

[favorites]
path = "/tmp/favorites.json"

[logging]
conversation_log = "/tmp/chef.jsonl"

[repl]
show_progress = false
history_file = "~/.local/share/chef-chat/history.txt"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.api.endpoint,
            "http://localhost:8080/v1/chat/completions"
        );
        assert_eq!(config.api.api_key_env, "LOCAL_LLM_KEY");
        assert_eq!(config.api.read_timeout_seconds, 30);
        assert_eq!(config.generation.model, "llama-3.1-8b-instant");
        assert_eq!(config.generation.max_tokens, 256);
        assert_eq!(config.favorites.path.as_deref(), Some("/tmp/favorites.json"));
        assert_eq!(
            config.logging.conversation_log.as_deref(),
            Some("/tmp/chef.jsonl")
        );
        assert!(!config.repl.show_progress);
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[generation]
temperature = 1.2
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.generation.temperature, 1.2);
        // Defaults should apply
        assert_eq!(config.generation.model, "llama-3.3-70b-versatile");
        assert_eq!(config.generation.max_tokens, 600);
        assert_eq!(config.api.api_key_env, "GROQ_API_KEY");
        assert_eq!(config.api.read_timeout_seconds, 60);
        assert!(config.repl.show_progress);
        assert!(config.logging.conversation_log.is_none());
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(FileConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = FileConfig::default();
        config.generation.model = "  ".to_string();
        assert_eq!(config.validate(), Err(ConfigValidationError::EmptyModelName));

        let mut config = FileConfig::default();
        config.generation.max_tokens = 0;
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::InvalidMaxTokens)
        );

        let mut config = FileConfig::default();
        config.generation.temperature = 2.5;
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::InvalidTemperature(2.5))
        );

        let mut config = FileConfig::default();
        config.api.read_timeout_seconds = 0;
        assert_eq!(config.validate(), Err(ConfigValidationError::InvalidTimeout));

        let mut config = FileConfig::default();
        config.api.endpoint = String::new();
        assert_eq!(config.validate(), Err(ConfigValidationError::EmptyEndpoint));
    }
}
