//! Domain layer for chef-chat
//!
//! This crate contains the conversation entities, the streaming protocol
//! decoding and the prompt/request construction. It performs no I/O.
//!
//! # Core Concepts
//!
//! ## Turn
//!
//! One question/answer exchange. The user message is recorded in the
//! [`ConversationHistory`] before the request leaves; the assistant message is
//! recorded only when the stream completes.
//!
//! ## Stream protocol
//!
//! The chat-completion endpoint answers with `data: <json>` lines terminated
//! by `data: [DONE]`. [`ChunkParser`] classifies each line as a
//! [`StreamEvent`] and [`TranscriptAssembler`] folds the events into the
//! final answer.

pub mod core;
pub mod favorites;
pub mod prompt;
pub mod session;
pub mod util;

// Re-export commonly used types
pub use core::{error::DomainError, question::Question};
pub use favorites::FavoriteEntry;
pub use prompt::PromptBuilder;
pub use session::{
    chunk_parser::ChunkParser,
    entities::{ConversationHistory, Message, Role},
    request::{ChatRequest, GenerationParams},
    state::SessionState,
    stream::StreamEvent,
    transcript::{AssemblyStep, TranscriptAssembler},
};
