//! Chat session use case.
//!
//! [`ChatSession`] runs one question/answer turn at a time against a
//! streaming chat-completion endpoint:
//!
//! ```text
//! ask() ─→ Sending ──→ Streaming ──→ Committing ──→ Idle
//!            │  user message      │  deltas → observer
//!            │  recorded          │
//!            └──── error / cancel ┴──────────────────→ Idle
//! ```
//!
//! The user message is recorded before the request leaves and stays in
//! history whatever happens next. The assistant message is recorded only when
//! the stream ends normally, never a partial one.

use crate::ports::chat_observer::ChatObserver;
use crate::ports::chat_transport::{ChatTransport, LineStream, TransportError};
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::credentials::CredentialProvider;
use crate::ports::favorites::FavoritesContext;
use chef_domain::util::log_preview;
use chef_domain::{
    AssemblyStep, ChatRequest, ChunkParser, ConversationHistory, FavoriteEntry, GenerationParams,
    Message, PromptBuilder, Question, SessionState, TranscriptAssembler,
};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Errors that end a turn.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChatError {
    #[error("Question cannot be empty")]
    InvalidInput,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("A response is already in progress")]
    Busy,

    #[error("Connection error: {0}")]
    Connect(String),

    #[error("Connection lost while reading the response: {0}")]
    Read(String),

    #[error("Authorization failed (HTTP 401)")]
    Auth,

    #[error("Request failed with HTTP status {0}")]
    Status(u16),

    #[error("Turn cancelled")]
    Cancelled,
}

impl ChatError {
    /// Short message suitable for showing to the user.
    pub fn user_message(&self) -> &'static str {
        match self {
            ChatError::InvalidInput => "Please enter a question.",
            ChatError::Config(_) => "API key not configured. Check your configuration.",
            ChatError::Busy => "Chef is still answering. Please wait.",
            ChatError::Connect(_) => "Could not connect. Check your internet.",
            ChatError::Read(_) => "Error reading response.",
            ChatError::Auth => "Invalid API key. Check your configuration.",
            ChatError::Status(_) => "Something went wrong. Try again.",
            ChatError::Cancelled => "Stopped.",
        }
    }

    /// Rejected before any I/O; history is untouched.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            ChatError::InvalidInput | ChatError::Config(_) | ChatError::Busy
        )
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, ChatError::Cancelled)
    }
}

impl From<TransportError> for ChatError {
    fn from(error: TransportError) -> Self {
        match error {
            TransportError::Connect(msg) => ChatError::Connect(msg),
            TransportError::Read(msg) => ChatError::Read(msg),
            TransportError::Auth | TransportError::Status(401) => ChatError::Auth,
            TransportError::Status(code) => ChatError::Status(code),
        }
    }
}

struct SessionInner {
    state: SessionState,
    history: ConversationHistory,
    favorites: Vec<FavoriteEntry>,
    active: Option<CancellationToken>,
}

impl SessionInner {
    fn advance(&mut self, next: SessionState) {
        match self.state.transition(next) {
            Ok(state) => self.state = state,
            Err(e) => {
                warn!("{}", e);
                self.state = next;
            }
        }
    }
}

/// A single conversational session with the cooking assistant.
///
/// Owns the conversation history and the single-in-flight invariant: while a
/// turn is running, further [`ask`](Self::ask) calls are rejected with
/// [`ChatError::Busy`].
pub struct ChatSession {
    transport: Arc<dyn ChatTransport>,
    favorites_source: Arc<dyn FavoritesContext>,
    credentials: Arc<dyn CredentialProvider>,
    conversation_logger: Arc<dyn ConversationLogger>,
    params: GenerationParams,
    inner: Mutex<SessionInner>,
}

impl ChatSession {
    /// Create a session and take the initial favorites snapshot.
    pub fn new(
        transport: Arc<dyn ChatTransport>,
        favorites_source: Arc<dyn FavoritesContext>,
        credentials: Arc<dyn CredentialProvider>,
        params: GenerationParams,
    ) -> Self {
        let session = Self {
            transport,
            favorites_source,
            credentials,
            conversation_logger: Arc::new(NoConversationLogger),
            params,
            inner: Mutex::new(SessionInner {
                state: SessionState::Idle,
                history: ConversationHistory::new(),
                favorites: Vec::new(),
                active: None,
            }),
        };
        session.refresh_favorites();
        session
    }

    /// Create with a conversation logger.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    fn lock(&self) -> MutexGuard<'_, SessionInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Re-read the favorites snapshot used for the next system prompt.
    ///
    /// Call on session start and resume. A failing source counts as "no
    /// favorites". A turn already in flight keeps the prompt it was sent with.
    pub fn refresh_favorites(&self) -> usize {
        let favorites = match self.favorites_source.list() {
            Ok(favorites) => favorites,
            Err(e) => {
                warn!("Could not load favorites, continuing without: {}", e);
                Vec::new()
            }
        };
        let count = favorites.len();
        debug!("Favorites snapshot refreshed ({} entries)", count);
        self.lock().favorites = favorites;
        count
    }

    /// Current favorites snapshot.
    pub fn favorites(&self) -> Vec<FavoriteEntry> {
        self.lock().favorites.clone()
    }

    /// Read-only copy of the conversation so far.
    pub fn history(&self) -> Vec<Message> {
        self.lock().history.snapshot()
    }

    pub fn state(&self) -> SessionState {
        self.lock().state
    }

    pub fn params(&self) -> &GenerationParams {
        &self.params
    }

    /// Abort the turn in flight, if any.
    ///
    /// The pending [`ask`](Self::ask) resolves to [`ChatError::Cancelled`],
    /// the observer gets no further calls for that turn and no assistant
    /// message is recorded. Text already delivered stays delivered.
    pub fn cancel_active(&self) -> bool {
        match &self.lock().active {
            Some(token) => {
                info!("Cancelling active turn");
                token.cancel();
                true
            }
            None => false,
        }
    }

    /// Run one turn: record `question`, stream the answer to `observer` and
    /// commit it to history.
    pub async fn ask(
        &self,
        question: &str,
        observer: &dyn ChatObserver,
    ) -> Result<Message, ChatError> {
        let question = Question::parse(question).map_err(|_| ChatError::InvalidInput)?;

        let credential = self
            .credentials
            .credential()
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| ChatError::Config("API key not configured".to_string()))?;

        let (request, token) = {
            let mut inner = self.lock();
            if inner.state.is_busy() {
                debug!("Rejecting question while {}", inner.state);
                return Err(ChatError::Busy);
            }
            inner.advance(SessionState::Sending);
            inner.history.push_user(question.content());

            let prompt = PromptBuilder::system_prompt(&inner.favorites);
            let request = ChatRequest::build(&prompt, &inner.history, &self.params);
            let token = CancellationToken::new();
            inner.active = Some(token.clone());
            (request, token)
        };
        // From here on the session must return to Idle, even if this future is dropped.
        let _turn = TurnGuard { session: self };

        info!("Starting turn: {}", log_preview(question.content(), 100));
        self.conversation_logger.log(ConversationEvent::new(
            "user_message",
            serde_json::json!({ "content": question.content() }),
        ));
        observer.on_turn_start(question.content());

        match self.run_turn(&request, &credential, &token, observer).await {
            Ok(message) => {
                info!("Turn completed ({} bytes)", message.content().len());
                self.conversation_logger.log(ConversationEvent::new(
                    "assistant_message",
                    serde_json::json!({
                        "model": self.params.model,
                        "bytes": message.content().len(),
                        "content": message.content(),
                    }),
                ));
                observer.on_turn_complete(&message);
                Ok(message)
            }
            Err(ChatError::Cancelled) => {
                info!("Turn cancelled");
                self.conversation_logger.log(ConversationEvent::new(
                    "turn_cancelled",
                    serde_json::json!({}),
                ));
                Err(ChatError::Cancelled)
            }
            Err(e) => {
                warn!("Turn failed: {}", e);
                self.conversation_logger.log(ConversationEvent::new(
                    "turn_failed",
                    serde_json::json!({ "error": e.to_string() }),
                ));
                observer.on_turn_failed(&e);
                Err(e)
            }
        }
    }

    async fn run_turn(
        &self,
        request: &ChatRequest,
        credential: &str,
        token: &CancellationToken,
        observer: &dyn ChatObserver,
    ) -> Result<Message, ChatError> {
        debug!(
            model = %request.model,
            messages = request.messages.len(),
            "Dispatching chat request"
        );

        let mut lines: LineStream = tokio::select! {
            biased;
            _ = token.cancelled() => return Err(ChatError::Cancelled),
            opened = self.transport.open(request, credential) => opened?,
        };

        self.lock().advance(SessionState::Streaming);
        observer.on_streaming_start();

        let mut assembler = TranscriptAssembler::new();
        loop {
            let next = tokio::select! {
                biased;
                _ = token.cancelled() => return Err(ChatError::Cancelled),
                next = lines.next_line() => next,
            };

            let line = match next {
                Some(Ok(line)) => line,
                Some(Err(e)) => return Err(e.into()),
                None => break,
            };

            if token.is_cancelled() {
                return Err(ChatError::Cancelled);
            }

            let event = ChunkParser::parse_line(&line);
            if assembler.apply(event, |text| observer.on_delta(text)) == AssemblyStep::Finished {
                break;
            }
        }

        debug!(
            "Stream finished: {} deltas, {} bytes, sentinel: {}",
            assembler.delta_count(),
            assembler.text().len(),
            assembler.saw_sentinel()
        );

        let mut inner = self.lock();
        if token.is_cancelled() {
            return Err(ChatError::Cancelled);
        }
        inner.advance(SessionState::Committing);
        Ok(assembler.finalize(&mut inner.history))
    }
}

/// Returns the session to Idle when a turn ends, however it ends.
struct TurnGuard<'a> {
    session: &'a ChatSession,
}

impl Drop for TurnGuard<'_> {
    fn drop(&mut self) {
        let mut inner = self.session.lock();
        if let Some(token) = inner.active.take() {
            // Stops the transport's reader when the ask future was dropped mid-stream.
            token.cancel();
        }
        if inner.state.is_busy() {
            inner.advance(SessionState::Idle);
        }
    }
}
