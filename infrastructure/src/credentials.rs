//! API key lookup from the environment, with a config-file fallback.

use chef_application::ports::credentials::CredentialProvider;
use tracing::debug;

/// Reads the bearer key from an environment variable on every turn.
///
/// Reading at call time means a key exported after startup (or fixed after a
/// "not configured" error) is picked up without restarting the session.
pub struct EnvCredentialProvider {
    env_var: String,
    fallback: Option<String>,
}

impl EnvCredentialProvider {
    pub fn new(env_var: impl Into<String>) -> Self {
        Self {
            env_var: env_var.into(),
            fallback: None,
        }
    }

    /// Key to use when the variable is unset or blank (`[api] api_key`).
    pub fn with_fallback(mut self, key: Option<String>) -> Self {
        self.fallback = key;
        self
    }

    pub fn env_var(&self) -> &str {
        &self.env_var
    }
}

impl CredentialProvider for EnvCredentialProvider {
    fn credential(&self) -> Option<String> {
        let from_env = std::env::var(&self.env_var).ok();
        let resolved = pick(from_env, self.fallback.as_deref());
        if resolved.is_none() {
            debug!("No API key in ${} or config", self.env_var);
        }
        resolved
    }
}

fn pick(from_env: Option<String>, fallback: Option<&str>) -> Option<String> {
    from_env
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
        .or_else(|| {
            fallback
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(str::to_string)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_value_preferred() {
        assert_eq!(
            pick(Some("env-key".to_string()), Some("file-key")),
            Some("env-key".to_string())
        );
    }

    #[test]
    fn test_blank_env_falls_back() {
        assert_eq!(
            pick(Some("   ".to_string()), Some("file-key")),
            Some("file-key".to_string())
        );
        assert_eq!(pick(None, Some(" file-key\n")), Some("file-key".to_string()));
    }

    #[test]
    fn test_nothing_configured() {
        assert_eq!(pick(None, None), None);
        assert_eq!(pick(Some(String::new()), Some("")), None);
    }

    #[test]
    fn test_unset_variable_uses_fallback() {
        let provider = EnvCredentialProvider::new("CHEF_CHAT_TEST_UNSET_KEY_7f3a")
            .with_fallback(Some("from-config".to_string()));
        assert_eq!(provider.credential(), Some("from-config".to_string()));

        let provider = EnvCredentialProvider::new("CHEF_CHAT_TEST_UNSET_KEY_7f3a");
        assert_eq!(provider.credential(), None);
    }
}
