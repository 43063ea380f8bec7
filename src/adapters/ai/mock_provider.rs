//! Mock Completion Provider for testing.
//!
//! Configurable mock implementation of the CompletionProvider port so the
//! request handler and HTTP layer can be exercised without a live API.
//!
//! # Features
//!
//! - Pre-configured responses consumed in order
//! - Error injection for failure-path testing
//! - Call tracking for verifying what reached the provider (and that the
//!   emergency path never calls it)

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::ports::{
    CompletionError, CompletionProvider, CompletionRequest, CompletionResponse, ProviderInfo,
};

/// Mock completion provider for testing.
#[derive(Debug, Clone)]
pub struct MockCompletionProvider {
    /// Pre-configured responses (consumed in order).
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    /// Provider info to return.
    info: ProviderInfo,
    /// Call history for verification.
    calls: Arc<Mutex<Vec<CompletionRequest>>>,
}

/// A configured mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return a successful completion with this content.
    Success(String),
    /// Return an error.
    Error(MockError),
}

/// Mock error types for testing failure handling.
#[derive(Debug, Clone)]
pub enum MockError {
    AuthenticationFailed,
    RateLimited,
    Unavailable { message: String },
    Network { message: String },
    Timeout { timeout_secs: u32 },
    Empty,
}

impl From<MockError> for CompletionError {
    fn from(err: MockError) -> Self {
        match err {
            MockError::AuthenticationFailed => CompletionError::AuthenticationFailed,
            MockError::RateLimited => CompletionError::RateLimited,
            MockError::Unavailable { message } => CompletionError::unavailable(message),
            MockError::Network { message } => CompletionError::network(message),
            MockError::Timeout { timeout_secs } => CompletionError::Timeout { timeout_secs },
            MockError::Empty => CompletionError::Empty,
        }
    }
}

impl Default for MockCompletionProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockCompletionProvider {
    /// Creates a new mock provider with default settings.
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            info: ProviderInfo::new("mock", "mock-model-1"),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Adds a successful response to the queue.
    pub fn with_response(self, content: impl Into<String>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(MockResponse::Success(content.into()));
        self
    }

    /// Adds an error response to the queue.
    pub fn with_error(self, error: MockError) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(MockResponse::Error(error));
        self
    }

    /// Returns the number of calls made to this provider.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Returns all recorded calls.
    pub fn get_calls(&self) -> Vec<CompletionRequest> {
        self.calls.lock().unwrap().clone()
    }

    /// Gets the next response or a default.
    fn next_response(&self) -> MockResponse {
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| MockResponse::Success("Mock response".to_string()))
    }
}

#[async_trait]
impl CompletionProvider for MockCompletionProvider {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, CompletionError> {
        self.calls.lock().unwrap().push(request);

        match self.next_response() {
            MockResponse::Success(content) => Ok(CompletionResponse {
                content,
                model: self.info.model.clone(),
            }),
            MockResponse::Error(err) => Err(err.into()),
        }
    }

    fn provider_info(&self) -> ProviderInfo {
        self.info.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::Message;

    fn test_request() -> CompletionRequest {
        CompletionRequest::new().with_message(Message::user("Hello"))
    }

    #[tokio::test]
    async fn returns_configured_response() {
        let provider = MockCompletionProvider::new().with_response("Hello from mock!");

        let response = provider.complete(test_request()).await.unwrap();

        assert_eq!(response.content, "Hello from mock!");
        assert_eq!(response.model, "mock-model-1");
    }

    #[tokio::test]
    async fn returns_responses_in_order() {
        let provider = MockCompletionProvider::new()
            .with_response("First")
            .with_response("Second");

        let r1 = provider.complete(test_request()).await.unwrap();
        let r2 = provider.complete(test_request()).await.unwrap();

        assert_eq!(r1.content, "First");
        assert_eq!(r2.content, "Second");
    }

    #[tokio::test]
    async fn returns_default_after_exhausted() {
        let provider = MockCompletionProvider::new().with_response("Only one");

        provider.complete(test_request()).await.unwrap();
        let r2 = provider.complete(test_request()).await.unwrap();

        assert_eq!(r2.content, "Mock response");
    }

    #[tokio::test]
    async fn returns_configured_error() {
        let provider = MockCompletionProvider::new().with_error(MockError::RateLimited);

        let result = provider.complete(test_request()).await;

        assert!(matches!(result, Err(CompletionError::RateLimited)));
    }

    #[tokio::test]
    async fn tracks_calls() {
        let provider = MockCompletionProvider::new()
            .with_response("Response 1")
            .with_response("Response 2");

        assert_eq!(provider.call_count(), 0);

        provider.complete(test_request()).await.unwrap();
        provider.complete(test_request()).await.unwrap();

        assert_eq!(provider.call_count(), 2);
        assert_eq!(provider.get_calls()[0].messages[0].content, "Hello");
    }

    #[test]
    fn mock_error_converts_to_completion_error() {
        let err: CompletionError = MockError::AuthenticationFailed.into();
        assert!(matches!(err, CompletionError::AuthenticationFailed));

        let err: CompletionError = MockError::Empty.into();
        assert!(matches!(err, CompletionError::Empty));

        let err: CompletionError = MockError::Timeout { timeout_secs: 30 }.into();
        assert!(matches!(err, CompletionError::Timeout { timeout_secs: 30 }));
    }
}
