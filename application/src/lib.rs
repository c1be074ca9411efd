//! Application layer for chef-chat
//!
//! This crate contains the [`ChatSession`] use case and the port definitions
//! it talks through. It depends only on the domain layer.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::{
    chat_observer::{ChatObserver, NoChatObserver},
    chat_transport::{ChatTransport, LineStream, TransportError},
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    credentials::{CredentialProvider, StaticCredential},
    favorites::{FavoritesContext, FavoritesError, NoFavorites},
};
pub use use_cases::chat_session::{ChatError, ChatSession};
