//! File locations from TOML (`[favorites]` and `[logging]` sections)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where the saved favorites are read from
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileFavoritesConfig {
    /// JSON favorites file; unset means `<data dir>/chef-chat/favorites.json`
    pub path: Option<String>,
}

impl FileFavoritesConfig {
    pub fn resolved_path(&self) -> Option<PathBuf> {
        match &self.path {
            Some(path) if !path.trim().is_empty() => Some(expand_home(path)),
            _ => dirs::data_dir().map(|d| d.join("chef-chat").join("favorites.json")),
        }
    }
}

/// Conversation transcript logging
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// JSONL transcript file; disabled when unset
    pub conversation_log: Option<String>,
}

impl FileLoggingConfig {
    pub fn conversation_log_path(&self) -> Option<PathBuf> {
        self.conversation_log
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .map(expand_home)
    }
}

/// Expand a leading `~/` to the home directory.
pub fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_home() {
        let home = dirs::home_dir().unwrap();
        assert_eq!(expand_home("~/chef/log.jsonl"), home.join("chef/log.jsonl"));
        assert_eq!(expand_home("/tmp/log.jsonl"), PathBuf::from("/tmp/log.jsonl"));
        assert_eq!(expand_home("rel/log.jsonl"), PathBuf::from("rel/log.jsonl"));
    }

    #[test]
    fn test_conversation_log_disabled_by_default() {
        assert!(FileLoggingConfig::default().conversation_log_path().is_none());

        let blank = FileLoggingConfig {
            conversation_log: Some("  ".to_string()),
        };
        assert!(blank.conversation_log_path().is_none());
    }

    #[test]
    fn test_favorites_explicit_path() {
        let config = FileFavoritesConfig {
            path: Some("/srv/chef/favorites.json".to_string()),
        };
        assert_eq!(
            config.resolved_path(),
            Some(PathBuf::from("/srv/chef/favorites.json"))
        );
    }
}
