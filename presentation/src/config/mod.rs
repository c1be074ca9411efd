//! Presentation-level configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// REPL configuration for the presentation layer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplConfig {
    /// Spinner while waiting for the first fragment of an answer
    pub show_progress: bool,
    /// Line-editor history; `None` uses the default location
    pub history_file: Option<PathBuf>,
}

impl ReplConfig {
    /// `history_file`, or `<data dir>/chef-chat/history.txt`
    pub fn history_path(&self) -> Option<PathBuf> {
        self.history_file
            .clone()
            .or_else(|| dirs::data_dir().map(|p| p.join("chef-chat").join("history.txt")))
    }
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            show_progress: true,
            history_file: None,
        }
    }
}
