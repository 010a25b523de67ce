//! Chat-completions wire types and transport.
//!
//! Both remote collaborators (the vision-transcription API and the
//! text-consolidation API) speak the same chat-completions shape: one user
//! message in, free-form text out at `choices[0].message.content`. This
//! module owns that shape once, behind a [`ChatClient`] trait so the
//! pipeline can be tested without a network.

use crate::error::{BoardcastError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A single chat message in a completion request.
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    /// Creates a user-role message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// A chat-completions request body.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    pub stream: bool,
}

impl ChatRequest {
    /// Creates a non-streaming request with a single user message.
    pub fn new(model: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            messages: vec![ChatMessage::user(content)],
            max_tokens: None,
            temperature: None,
            top_p: None,
            stream: false,
        }
    }
}

/// A chat-completions response body. Fields we don't read are left out;
/// serde ignores them on deserialization.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatResponse {
    /// The text of the first choice, unmodified. `None` when the response
    /// carries no choices, or a blank/absent content field.
    pub fn text(&self) -> Option<&str> {
        let content = self.choices.first()?.message.content.as_deref()?;
        if content.trim().is_empty() {
            None
        } else {
            Some(content)
        }
    }

    /// Builds a response carrying the given text. Used by mocks and tests.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            choices: vec![Choice {
                message: ChoiceMessage {
                    content: Some(text.into()),
                },
            }],
        }
    }
}

/// Transport for chat-completions requests.
///
/// This trait allows swapping implementations (real HTTP vs mock).
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Send one completion request and return the parsed response.
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse>;
}

/// HTTP transport over reqwest.
pub struct HttpChatClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl HttpChatClient {
    /// Creates a client for the given endpoint with a fixed per-request
    /// wall-clock timeout.
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        })
    }
}

#[async_trait]
impl ChatClient for HttpChatClient {
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse> {
        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .header("Accept", "application/json")
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(BoardcastError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json::<ChatResponse>().await?)
    }
}

/// Mock transport for testing.
///
/// Plays back a scripted sequence of results, one per call, and records
/// how many calls were made.
pub struct MockChatClient {
    script: std::sync::Mutex<std::collections::VecDeque<Result<ChatResponse>>>,
    calls: std::sync::atomic::AtomicUsize,
}

impl MockChatClient {
    /// Creates a mock with an empty script. Unscripted calls fail.
    pub fn new() -> Self {
        Self {
            script: std::sync::Mutex::new(std::collections::VecDeque::new()),
            calls: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    /// Queue a successful response carrying the given text.
    pub fn push_text(self, text: &str) -> Self {
        self.push(Ok(ChatResponse::from_text(text)))
    }

    /// Queue an API error with the given status.
    pub fn push_status(self, status: u16, message: &str) -> Self {
        self.push(Err(BoardcastError::Api {
            status,
            message: message.to_string(),
        }))
    }

    /// Queue an arbitrary result.
    pub fn push(self, result: Result<ChatResponse>) -> Self {
        {
            let mut script = self.script.lock().expect("mock script lock poisoned");
            script.push_back(result);
        }
        self
    }

    /// Number of `complete` calls made so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(std::sync::atomic::Ordering::SeqCst)
    }
}

impl Default for MockChatClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatClient for MockChatClient {
    async fn complete(&self, _request: &ChatRequest) -> Result<ChatResponse> {
        self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        let mut script = self.script.lock().expect("mock script lock poisoned");
        script.pop_front().unwrap_or_else(|| {
            Err(BoardcastError::Other(
                "mock chat client script exhausted".to_string(),
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_text_is_untrimmed() {
        let response = ChatResponse::from_text("  hello board\n");
        assert_eq!(response.text(), Some("  hello board\n"));
    }

    #[test]
    fn test_response_text_none_for_empty_choices() {
        let response = ChatResponse::default();
        assert_eq!(response.text(), None);
    }

    #[test]
    fn test_response_text_none_for_blank_content() {
        let response = ChatResponse::from_text("   \n ");
        assert_eq!(response.text(), None);
    }

    #[test]
    fn test_response_text_none_for_absent_content() {
        let response = ChatResponse {
            choices: vec![Choice {
                message: ChoiceMessage { content: None },
            }],
        };
        assert_eq!(response.text(), None);
    }

    #[test]
    fn test_response_parses_nested_shape() {
        let json = r#"{"choices":[{"message":{"role":"assistant","content":"2+2=4"}}],"usage":{"total_tokens":9}}"#;
        let response: ChatResponse = serde_json::from_str(json).expect("parse response");
        assert_eq!(response.text(), Some("2+2=4"));
    }

    #[test]
    fn test_request_serializes_without_unset_options() {
        let request = ChatRequest::new("test/model", "hi");
        let json = serde_json::to_string(&request).expect("serialize request");
        assert!(!json.contains("max_tokens"));
        assert!(!json.contains("temperature"));
        assert!(json.contains("\"stream\":false"));
    }

    #[test]
    fn test_request_serializes_set_options() {
        let mut request = ChatRequest::new("test/model", "hi");
        request.max_tokens = Some(512);
        request.temperature = Some(0.2);
        let json = serde_json::to_string(&request).expect("serialize request");
        assert!(json.contains("\"max_tokens\":512"));
        assert!(json.contains("\"temperature\":0.2"));
    }

    #[tokio::test]
    async fn test_mock_plays_back_script_in_order() {
        let mock = MockChatClient::new()
            .push_status(429, "slow down")
            .push_text("merged");
        let request = ChatRequest::new("m", "c");

        let first = mock.complete(&request).await;
        assert!(matches!(
            first,
            Err(BoardcastError::Api { status: 429, .. })
        ));

        let second = mock.complete(&request).await.expect("scripted success");
        assert_eq!(second.text(), Some("merged"));
        assert_eq!(mock.call_count(), 2);
    }

    #[tokio::test]
    async fn test_mock_fails_when_script_exhausted() {
        let mock = MockChatClient::new();
        let result = mock.complete(&ChatRequest::new("m", "c")).await;
        assert!(matches!(result, Err(BoardcastError::Other(_))));
    }
}
