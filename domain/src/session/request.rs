//! Outbound chat-completion payload.

use super::entities::{ConversationHistory, Message};
use serde::{Deserialize, Serialize};

/// Sampling parameters fixed by configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    /// Model identifier understood by the endpoint.
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
}

impl GenerationParams {
    pub const DEFAULT_MODEL: &'static str = "llama-3.3-70b-versatile";
    pub const DEFAULT_TEMPERATURE: f64 = 0.4;
    pub const DEFAULT_MAX_TOKENS: u32 = 600;

    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Self::default()
        }
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            model: Self::DEFAULT_MODEL.to_string(),
            temperature: Self::DEFAULT_TEMPERATURE,
            max_tokens: Self::DEFAULT_MAX_TOKENS,
        }
    }
}

/// Request body for a streaming chat completion.
///
/// `messages` is always `[system] + history`. The caller records the new user
/// message in the history before building the request, so the question is the
/// last element.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub stream: bool,
    pub messages: Vec<Message>,
    pub temperature: f64,
    pub max_tokens: u32,
}

impl ChatRequest {
    pub fn build(
        system_prompt: &str,
        history: &ConversationHistory,
        params: &GenerationParams,
    ) -> Self {
        let mut messages = Vec::with_capacity(history.len() + 1);
        messages.push(Message::system(system_prompt));
        messages.extend(history.iter().cloned());

        Self {
            model: params.model.clone(),
            stream: true,
            messages,
            temperature: params.temperature,
            max_tokens: params.max_tokens,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::entities::Role;

    #[test]
    fn test_build_prepends_system_prompt() {
        let mut history = ConversationHistory::new();
        history.push_user("What should I cook?");
        history.push_assistant("Something in mind?");
        history.push_user("Quick");

        let request = ChatRequest::build("You are Chef.", &history, &GenerationParams::default());

        assert!(request.stream);
        assert_eq!(request.messages.len(), 4);
        assert_eq!(request.messages[0], Message::system("You are Chef."));
        assert_eq!(request.messages[3].role(), Role::User);
        assert_eq!(request.messages[3].content(), "Quick");
        // History itself is untouched
        assert_eq!(history.len(), 3);
    }

    #[test]
    fn test_wire_format() {
        let mut history = ConversationHistory::new();
        history.push_user("Hi");
        let params = GenerationParams::new("test-model")
            .with_temperature(0.5)
            .with_max_tokens(128);

        let json = serde_json::to_value(ChatRequest::build("sys", &history, &params)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "model": "test-model",
                "stream": true,
                "messages": [
                    {"role": "system", "content": "sys"},
                    {"role": "user", "content": "Hi"}
                ],
                "temperature": 0.5,
                "max_tokens": 128
            })
        );
    }

    #[test]
    fn test_default_params() {
        let params = GenerationParams::default();
        assert_eq!(params.model, "llama-3.3-70b-versatile");
        assert_eq!(params.temperature, 0.4);
        assert_eq!(params.max_tokens, 600);
    }
}
