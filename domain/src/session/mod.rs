//! Chat session domain.
//!
//! - [`entities::Message`]: a single role-tagged message
//! - [`entities::ConversationHistory`]: append-only log of a session's turns
//! - [`stream::StreamEvent`]: one classified line of the response stream
//! - [`chunk_parser::ChunkParser`]: raw line → [`stream::StreamEvent`]
//! - [`transcript::TranscriptAssembler`]: folds events into the answer
//! - [`request::ChatRequest`]: outbound chat-completion payload
//! - [`state::SessionState`]: turn lifecycle of a session

pub mod chunk_parser;
pub mod entities;
pub mod request;
pub mod state;
pub mod stream;
pub mod transcript;
