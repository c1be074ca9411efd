//! reqwest-backed streaming chat transport.

use async_trait::async_trait;
use bytes::Buf;
use chef_application::ports::chat_transport::{ChatTransport, LineStream, TransportError};
use chef_domain::ChatRequest;
use futures::{Stream, StreamExt};
use reqwest::Client;
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::codec::{FramedRead, LinesCodec, LinesCodecError};
use tokio_util::io::StreamReader;
use tracing::{debug, trace, warn};

/// Lines buffered between the body reader task and the session.
const LINE_BUFFER: usize = 64;

/// Longest body line accepted before the stream is treated as broken.
const MAX_LINE_BYTES: usize = 1024 * 1024;

/// Streaming chat transport over HTTPS.
///
/// One `reqwest::Client` (and its connection pool) is shared by every turn of
/// the session. Each [`open`](ChatTransport::open) spawns a task that reads
/// the body, frames it into lines and forwards them over a bounded channel.
pub struct HttpChatTransport {
    http: Client,
    endpoint: String,
}

impl HttpChatTransport {
    pub const DEFAULT_ENDPOINT: &'static str = "https://api.groq.com/openai/v1/chat/completions";

    /// Build a transport for `endpoint`.
    ///
    /// `read_timeout` bounds the wait for each body read, not the whole
    /// stream, so long answers are not cut off.
    pub fn new(
        endpoint: impl Into<String>,
        connect_timeout: Duration,
        read_timeout: Duration,
    ) -> Result<Self, TransportError> {
        let http = Client::builder()
            .connect_timeout(connect_timeout)
            .read_timeout(read_timeout)
            .pool_max_idle_per_host(2)
            .build()
            .map_err(|e| TransportError::Connect(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ChatTransport for HttpChatTransport {
    async fn open(
        &self,
        request: &ChatRequest,
        credential: &str,
    ) -> Result<LineStream, TransportError> {
        debug!("POST {} (model {})", self.endpoint, request.model);

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(credential)
            .header("Accept", "text/event-stream")
            .json(request)
            .send()
            .await
            .map_err(|e| TransportError::Connect(describe(&e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail: String = body.chars().take(800).collect();
            warn!("chat endpoint returned {}: {}", status, detail.trim());
            return Err(TransportError::from_status(status.as_u16()));
        }

        let (tx, rx) = mpsc::channel(LINE_BUFFER);
        tokio::spawn(pump_lines(response.bytes_stream(), tx, MAX_LINE_BYTES));
        Ok(LineStream::new(rx))
    }
}

/// Read `body` to the end, forwarding each complete line to `tx`.
///
/// Lines longer than `max_line` bytes, undecodable text and body read
/// failures are forwarded as [`TransportError::Read`] and end the stream.
/// Stops early when the receiving side is dropped (turn cancelled or
/// finished on the sentinel).
pub(crate) async fn pump_lines<S, B, E>(
    body: S,
    tx: mpsc::Sender<Result<String, TransportError>>,
    max_line: usize,
) where
    S: Stream<Item = Result<B, E>>,
    B: Buf,
    E: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let reader = StreamReader::new(body.map(|chunk| chunk.map_err(io::Error::other)));
    let mut lines = std::pin::pin!(FramedRead::new(
        reader,
        LinesCodec::new_with_max_length(max_line)
    ));

    loop {
        let next = tokio::select! {
            biased;
            _ = tx.closed() => {
                debug!("Line receiver dropped, abandoning response body");
                return;
            }
            next = lines.next() => next,
        };

        match next {
            Some(Ok(line)) => {
                trace!("line: {}", line);
                if tx.send(Ok(line)).await.is_err() {
                    return;
                }
            }
            Some(Err(e)) => {
                let error = match e {
                    LinesCodecError::MaxLineLengthExceeded => {
                        format!("line longer than {} bytes", max_line)
                    }
                    LinesCodecError::Io(e) => e.to_string(),
                };
                warn!("Response body read failed: {}", error);
                let _ = tx.send(Err(TransportError::Read(error))).await;
                return;
            }
            None => return,
        }
    }
}

fn describe(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        format!("request timed out: {}", error)
    } else if error.is_connect() {
        format!("could not connect: {}", error)
    } else {
        error.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use futures::stream;

    fn chunk(text: &str) -> Result<Bytes, String> {
        Ok(Bytes::copy_from_slice(text.as_bytes()))
    }

    async fn pump(chunks: Vec<Result<Bytes, String>>, max_line: usize) -> LineStream {
        let (tx, rx) = mpsc::channel(LINE_BUFFER);
        pump_lines(stream::iter(chunks), tx, max_line).await;
        LineStream::new(rx)
    }

    async fn collect(stream: &mut LineStream) -> Vec<Result<String, TransportError>> {
        let mut items = Vec::new();
        while let Some(item) = stream.next_line().await {
            items.push(item);
        }
        items
    }

    #[tokio::test]
    async fn test_pump_reassembles_lines() {
        let chunks = vec![
            chunk("data: {\"choices\":[{\"delta\":{\"content\":\"Hi\"}}]}\n\nda"),
            chunk("ta: [DONE]"),
            chunk("\n"),
        ];
        let (tx, rx) = mpsc::channel(LINE_BUFFER);
        pump_lines(stream::iter(chunks), tx, MAX_LINE_BYTES).await;

        let mut lines = LineStream::new(rx);
        assert_eq!(
            collect(&mut lines).await,
            vec![
                Ok(r#"data: {"choices":[{"delta":{"content":"Hi"}}]}"#.to_string()),
                Ok(String::new()),
                Ok("data: [DONE]".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_pump_flushes_trailing_line() {
        let chunks = vec![chunk("data: tail")];
        let (tx, rx) = mpsc::channel(LINE_BUFFER);
        pump_lines(stream::iter(chunks), tx, MAX_LINE_BYTES).await;

        let mut lines = LineStream::new(rx);
        assert_eq!(collect(&mut lines).await, vec![Ok("data: tail".to_string())]);
    }

    #[tokio::test]
    async fn test_pump_forwards_read_error_and_stops() {
        let chunks = vec![
            chunk("data: a\n"),
            Err("connection reset".to_string()),
            chunk("data: b\n"),
        ];
        let (tx, rx) = mpsc::channel(LINE_BUFFER);
        pump_lines(stream::iter(chunks), tx, MAX_LINE_BYTES).await;

        let mut lines = LineStream::new(rx);
        assert_eq!(
            collect(&mut lines).await,
            vec![
                Ok("data: a".to_string()),
                Err(TransportError::Read("connection reset".to_string())),
            ]
        );
    }

    #[tokio::test]
    async fn test_pump_stops_when_receiver_dropped() {
        let (tx, rx) = mpsc::channel(LINE_BUFFER);
        drop(rx);
        // Never-ending body: the pump must return because nobody listens.
        let body = stream::repeat(chunk("data: x\n"));
        pump_lines(body, tx, MAX_LINE_BYTES).await;
    }

    #[tokio::test]
    async fn test_pump_strips_crlf_and_split_terminators() {
        let chunks = vec![chunk("data: x\r\n\r"), chunk("\ndata: y\r"), chunk("\n")];
        let mut lines = pump(chunks, MAX_LINE_BYTES).await;
        assert_eq!(
            collect(&mut lines).await,
            vec![
                Ok("data: x".to_string()),
                Ok(String::new()),
                Ok("data: y".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_pump_joins_multibyte_character_split_across_chunks() {
        let text = "data: tajine épicé\n".as_bytes();
        // Cut inside the two-byte 'é'
        let cut = text.iter().position(|&b| b == 0xC3).unwrap() + 1;
        let chunks = vec![
            Ok(Bytes::copy_from_slice(&text[..cut])),
            Ok(Bytes::copy_from_slice(&text[cut..])),
        ];
        let mut lines = pump(chunks, MAX_LINE_BYTES).await;
        assert_eq!(
            collect(&mut lines).await,
            vec![Ok("data: tajine épicé".to_string())]
        );
    }

    #[tokio::test]
    async fn test_pump_rejects_line_without_end() {
        // A body that never sends a newline must not be buffered without bound.
        let chunks = (0..8).map(|_| chunk(&"x".repeat(16))).collect();
        let mut lines = pump(chunks, 64).await;

        let items = collect(&mut lines).await;
        assert_eq!(items.len(), 1);
        assert!(matches!(&items[0], Err(TransportError::Read(msg)) if msg.contains("64 bytes")));
    }

    #[tokio::test]
    async fn test_pump_accepts_lines_up_to_limit() {
        let line = "d".repeat(64);
        let mut lines = pump(vec![chunk(&format!("{}\n", line))], 64).await;
        assert_eq!(collect(&mut lines).await, vec![Ok(line)]);
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_connect_error() {
        let transport = HttpChatTransport::new(
            "http://127.0.0.1:9/v1/chat/completions",
            Duration::from_secs(2),
            Duration::from_secs(2),
        )
        .unwrap();
        let request = ChatRequest::build(
            "sys",
            &chef_domain::ConversationHistory::new(),
            &chef_domain::GenerationParams::default(),
        );

        let err = transport.open(&request, "key").await.err().unwrap();
        assert!(matches!(err, TransportError::Connect(_)));
    }
}
