//! Chat transport port
//!
//! Defines how the application layer opens a streaming chat completion and
//! reads its body line by line.

use async_trait::async_trait;
use chef_domain::ChatRequest;
use thiserror::Error;
use tokio::sync::mpsc;

/// Errors reported by a transport while opening or reading a stream
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("Connection error: {0}")]
    Connect(String),

    #[error("Unauthorized (HTTP 401)")]
    Auth,

    #[error("HTTP status {0}")]
    Status(u16),

    #[error("Read error: {0}")]
    Read(String),
}

impl TransportError {
    /// Classify a non-success HTTP status.
    pub fn from_status(code: u16) -> Self {
        if code == 401 {
            TransportError::Auth
        } else {
            TransportError::Status(code)
        }
    }
}

/// Lazy, finite sequence of response body lines.
///
/// Wraps an `mpsc::Receiver` fed by the transport's reader task. Dropping the
/// stream closes the channel, which stops the reader on its next send.
pub struct LineStream {
    receiver: mpsc::Receiver<Result<String, TransportError>>,
}

impl LineStream {
    pub fn new(receiver: mpsc::Receiver<Result<String, TransportError>>) -> Self {
        Self { receiver }
    }

    /// A stream that yields the given items (lines or read errors) and then ends.
    pub fn from_results<I>(items: I) -> Self
    where
        I: IntoIterator<Item = Result<String, TransportError>>,
    {
        let items: Vec<_> = items.into_iter().collect();
        let (tx, rx) = mpsc::channel(items.len().max(1));
        for item in items {
            // Capacity matches the item count, so this cannot fill up.
            let _ = tx.try_send(item);
        }
        Self::new(rx)
    }

    /// Next line, `None` once the body is exhausted.
    pub async fn next_line(&mut self) -> Option<Result<String, TransportError>> {
        self.receiver.recv().await
    }
}

/// Transport for streaming chat completions
///
/// Each call to [`open`](Self::open) issues exactly one outbound request.
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Send `request` authenticated with `credential` and return the body as lines.
    ///
    /// Fails with [`TransportError::Connect`] when no connection can be made,
    /// [`TransportError::Auth`] on HTTP 401 and [`TransportError::Status`] on
    /// any other non-success status.
    async fn open(
        &self,
        request: &ChatRequest,
        credential: &str,
    ) -> Result<LineStream, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert_eq!(TransportError::from_status(401), TransportError::Auth);
        assert_eq!(TransportError::from_status(500), TransportError::Status(500));
        assert_eq!(TransportError::from_status(403), TransportError::Status(403));
    }

    #[tokio::test]
    async fn test_from_results_yields_in_order_then_ends() {
        let mut stream = LineStream::from_results([
            Ok("a".to_string()),
            Err(TransportError::Read("reset".to_string())),
        ]);
        assert_eq!(stream.next_line().await, Some(Ok("a".to_string())));
        assert_eq!(
            stream.next_line().await,
            Some(Err(TransportError::Read("reset".to_string())))
        );
        assert_eq!(stream.next_line().await, None);
    }

    #[tokio::test]
    async fn test_empty_stream_ends_immediately() {
        let mut stream = LineStream::from_results(Vec::new());
        assert_eq!(stream.next_line().await, None);
    }
}
