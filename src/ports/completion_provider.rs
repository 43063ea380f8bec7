//! Completion Provider Port - interface to the external text-generation API.
//!
//! The whole "business logic" of this service lives behind this narrow
//! seam: `complete(messages) -> text`. Keeping it a trait lets the request
//! handler run against a deterministic stub in tests while production wires
//! in the real HTTP adapter.
//!
//! Failure conditions (network, authentication, rate limiting, an empty
//! completion) all surface as [`CompletionError`] and propagate to the
//! caller; nothing is retried or recovered here.

use async_trait::async_trait;

/// Port for the external completion API.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Sends the message list and returns the raw text of the first
    /// completion. A single network round trip; no retries.
    async fn complete(&self, request: CompletionRequest)
        -> Result<CompletionResponse, CompletionError>;

    /// Provider name and model, for logs.
    fn provider_info(&self) -> ProviderInfo;
}

/// Request for a completion.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// Ordered message list: system prompts, history, current message.
    pub messages: Vec<Message>,
    /// Sampling temperature.
    pub temperature: f32,
    /// Maximum output length in tokens.
    pub max_tokens: u32,
    /// Ask the provider to constrain output to a JSON object.
    pub json_output: bool,
}

impl CompletionRequest {
    /// Creates an empty request with the service's fixed sampling defaults.
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            temperature: 0.7,
            max_tokens: 1024,
            json_output: false,
        }
    }

    /// Appends one message.
    pub fn with_message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    /// Appends a batch of messages in order.
    pub fn with_messages(mut self, messages: impl IntoIterator<Item = Message>) -> Self {
        self.messages.extend(messages);
        self
    }

    /// Sets the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Sets the maximum output length.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Requests JSON-object output mode.
    pub fn with_json_output(mut self, json_output: bool) -> Self {
        self.json_output = json_output;
        self
    }
}

impl Default for CompletionRequest {
    fn default() -> Self {
        Self::new()
    }
}

/// A message sent to the provider.
///
/// The role is an open string: caller-supplied history is forwarded
/// verbatim, including role values this service does not recognize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl Message {
    /// Creates a message with an arbitrary role.
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }

    /// Creates a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self::new("system", content)
    }

    /// Creates a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new("user", content)
    }

    /// Creates an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new("assistant", content)
    }
}

/// Response from a completion call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionResponse {
    /// Raw text of the first completion. Guaranteed non-empty; providers
    /// return [`CompletionError::Empty`] instead of an empty string.
    pub content: String,
    /// Model that generated the response.
    pub model: String,
}

/// Provider name and model identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderInfo {
    pub name: String,
    pub model: String,
}

impl ProviderInfo {
    pub fn new(name: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
        }
    }
}

/// Completion provider errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CompletionError {
    /// API key rejected by the provider.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Rate limited by the provider.
    #[error("rate limited by provider")]
    RateLimited,

    /// Provider rejected the request as malformed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Provider returned a server-side error.
    #[error("provider unavailable: {message}")]
    Unavailable { message: String },

    /// Network error during the request.
    #[error("network error: {0}")]
    Network(String),

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u32 },

    /// Failed to parse the provider response envelope.
    #[error("parse error: {0}")]
    Parse(String),

    /// Provider returned no completion, or an empty one.
    #[error("provider returned an empty completion")]
    Empty,
}

impl CompletionError {
    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }
}
