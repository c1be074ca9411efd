//! Prompt construction.
//!
//! - [`chef::PromptBuilder`]: system prompt for the cooking assistant persona

pub mod chef;

pub use chef::PromptBuilder;
