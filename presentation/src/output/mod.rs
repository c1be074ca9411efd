//! Rendering of chat turns

pub mod console;
pub mod transcript;
