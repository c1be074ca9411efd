//! Presentation layer for chef-chat
//!
//! This crate contains the CLI definition, the interactive chat REPL and the
//! observers that render streamed answers.

pub mod chat;
pub mod cli;
pub mod config;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use chat::ChatRepl;
pub use cli::commands::Cli;
pub use config::ReplConfig;
pub use output::console::{ConsoleFormatter, ConsoleObserver};
pub use output::transcript::{DisplayTranscript, TranscriptObserver, to_markup};
pub use progress::reporter::ProgressReporter;
