//! Infrastructure layer for chef-chat
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod credentials;
pub mod favorites;
pub mod http;
pub mod logging;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileApiConfig, FileConfig, FileFavoritesConfig,
    FileGenerationConfig, FileLoggingConfig, FileReplConfig,
};
pub use credentials::EnvCredentialProvider;
pub use favorites::FileFavoritesContext;
pub use http::HttpChatTransport;
pub use logging::JsonlConversationLogger;
