//! Configuration file loading for chef-chat
//!
//! Sources are merged in this order (later wins):
//!
//! 1. Default values
//! 2. Global: `$XDG_CONFIG_HOME/chef-chat/config.toml`
//! 3. Project: `./chef.toml` or `./.chef.toml`
//! 4. `--config <path>`
//! 5. Environment: `CHEF_*`, with `__` separating section and key
//!    (`CHEF_GENERATION__MODEL=...`)

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileApiConfig, FileConfig, FileFavoritesConfig, FileGenerationConfig,
    FileLoggingConfig, FileReplConfig, expand_home,
};
pub use loader::ConfigLoader;
