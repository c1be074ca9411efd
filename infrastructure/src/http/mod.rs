//! HTTP adapter for OpenAI-compatible streaming chat completions.
//!
//! [`transport::HttpChatTransport`] implements
//! [`ChatTransport`](chef_application::ChatTransport) with reqwest, framing
//! the body into lines with `tokio_util`'s `LinesCodec`.

pub mod transport;

pub use transport::HttpChatTransport;
