//! HTTP handlers for the chat endpoints.
//!
//! These handlers connect Axum routes to the application layer.

use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use tracing::error;

use crate::application::handlers::chat::{SendChatCommand, SendChatHandler};
use crate::ports::{ChatResponseValidator, CompletionProvider};

use super::dto::{ChatRequest, ErrorResponse};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing all dependencies.
///
/// Cheap to clone; everything request-scoped lives on the stack, so requests
/// run concurrently without coordination.
#[derive(Clone)]
pub struct ChatAppState {
    /// `None` when the service started without an API credential; `/chat`
    /// then fails lazily on first use.
    pub provider: Option<Arc<dyn CompletionProvider>>,
    pub validator: Arc<dyn ChatResponseValidator>,
    /// Path of the static page served at `/`.
    pub index_path: PathBuf,
}

impl ChatAppState {
    pub fn new(
        provider: Option<Arc<dyn CompletionProvider>>,
        validator: Arc<dyn ChatResponseValidator>,
        index_path: PathBuf,
    ) -> Self {
        Self {
            provider,
            validator,
            index_path,
        }
    }

    pub fn send_chat_handler(&self) -> SendChatHandler<dyn CompletionProvider> {
        SendChatHandler::new(self.provider.clone(), self.validator.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// Handle one chat turn.
///
/// POST /chat
pub async fn chat(
    State(state): State<ChatAppState>,
    Json(req): Json<ChatRequest>,
) -> Result<impl IntoResponse, (StatusCode, Json<ErrorResponse>)> {
    let cmd = SendChatCommand {
        message: req.message,
        history: req.history.into_iter().map(Into::into).collect(),
    };

    let handler = state.send_chat_handler();
    let response = handler.handle(cmd).await.map_err(|e| {
        error!(error = %e, "chat turn failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::internal(e.to_string())),
        )
    })?;

    Ok((StatusCode::OK, Json(response)))
}

/// Serve the static chat page.
///
/// GET /
pub async fn index(
    State(state): State<ChatAppState>,
) -> Result<Html<String>, (StatusCode, Json<ErrorResponse>)> {
    match tokio::fs::read_to_string(&state.index_path).await {
        Ok(body) => Ok(Html(body)),
        Err(_) => Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found(format!(
                "{} not found.",
                state.index_path.display()
            ))),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockCompletionProvider;
    use crate::adapters::validation::ChatSchemaValidator;
    use crate::domain::chat::EmergencyFilter;
    use serde_json::json;

    fn test_state(mock: Arc<MockCompletionProvider>) -> ChatAppState {
        ChatAppState::new(
            Some(mock),
            Arc::new(ChatSchemaValidator::new()),
            PathBuf::from("index.html"),
        )
    }

    #[tokio::test]
    async fn chat_handler_returns_canned_response_for_emergency() {
        let mock = Arc::new(MockCompletionProvider::new());
        let state = test_state(mock.clone());

        let req = ChatRequest {
            message: "I want to die".to_string(),
            history: vec![],
        };

        let result = chat(State(state), Json(req)).await;
        assert!(result.is_ok());
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn chat_handler_returns_500_on_invalid_completion() {
        let mock = Arc::new(MockCompletionProvider::new().with_response("not json"));
        let state = test_state(mock);

        let req = ChatRequest {
            message: "feeling low".to_string(),
            history: vec![],
        };

        let result = chat(State(state), Json(req)).await;
        let (status, Json(body)) = result.err().expect("expected error response");
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.detail.contains("invalid JSON"));
    }

    #[tokio::test]
    async fn chat_handler_returns_validated_payload() {
        let completion = json!({
            "intent": "self-care",
            "summary": "Tell me more about that.",
            "actions": [],
            "confidence": 0.6,
            "evidence": []
        })
        .to_string();
        let mock = Arc::new(MockCompletionProvider::new().with_response(completion));
        let state = test_state(mock);

        let req = ChatRequest {
            message: "rough week".to_string(),
            history: vec![],
        };

        let result = chat(State(state), Json(req)).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn index_handler_404s_when_file_missing() {
        let state = ChatAppState::new(
            None,
            Arc::new(ChatSchemaValidator::new()),
            PathBuf::from("/definitely/not/here/index.html"),
        );

        let result = index(State(state)).await;
        let (status, Json(body)) = result.err().expect("expected 404");
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.detail.contains("not found"));
    }

    #[tokio::test]
    async fn index_handler_serves_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.html");
        std::fs::write(&path, "<html><body>chat</body></html>").unwrap();

        let state = ChatAppState::new(None, Arc::new(ChatSchemaValidator::new()), path);

        let result = index(State(state)).await;
        let Html(body) = result.expect("expected page");
        assert!(body.contains("chat"));
    }

    #[test]
    fn canned_response_passes_the_shared_validator() {
        // The emergency object must satisfy the same shape the validator
        // enforces on model output.
        let validator = ChatSchemaValidator::new();
        let payload = serde_json::to_value(EmergencyFilter::canned_response()).unwrap();
        assert!(crate::ports::ChatResponseValidator::validate(&validator, &payload).is_ok());
    }
}
