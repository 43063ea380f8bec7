//! SendChatHandler - one chat turn: safety filter, phase classification,
//! prompt assembly, completion call, and payload validation.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::chat::{
    user_turn_count, ChatMessage, ChatResponse, ConversationPhase, EmergencyFilter, SYSTEM_PROMPT,
};
use crate::ports::{
    ChatResponseValidator, CompletionError, CompletionProvider, CompletionRequest, Message,
};

/// Command to process one chat message.
#[derive(Debug, Clone)]
pub struct SendChatCommand {
    /// The new user message.
    pub message: String,
    /// Caller-supplied conversation history, oldest first.
    pub history: Vec<ChatMessage>,
}

/// Error type for processing a chat message.
///
/// Every variant maps to an HTTP 500 at the endpoint; none are retried and
/// none mutate any state.
#[derive(Debug, Clone)]
pub enum SendChatError {
    /// No API credential was configured at startup.
    MissingCredential,
    /// The completion provider call failed.
    Provider(String),
    /// The provider returned no usable completion text.
    EmptyCompletion,
    /// The completion text was not valid JSON.
    InvalidJson(String),
    /// The completion JSON did not match the reply shape.
    SchemaViolation(String),
}

impl std::fmt::Display for SendChatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SendChatError::MissingCredential => write!(
                f,
                "OPENAI_API_KEY not configured on the server. Please set the environment variable."
            ),
            SendChatError::Provider(err) => write!(f, "Completion provider error: {}", err),
            SendChatError::EmptyCompletion => write!(f, "Model returned an empty response."),
            SendChatError::InvalidJson(err) => {
                write!(f, "Model returned invalid JSON: {}", err)
            }
            SendChatError::SchemaViolation(err) => {
                write!(f, "Model response validation failed: {}", err)
            }
        }
    }
}

impl std::error::Error for SendChatError {}

impl From<CompletionError> for SendChatError {
    fn from(err: CompletionError) -> Self {
        match err {
            CompletionError::Empty => SendChatError::EmptyCompletion,
            other => SendChatError::Provider(other.to_string()),
        }
    }
}

/// Handler for chat turns.
///
/// Holds no per-request state; the provider is `None` when the service was
/// started without a credential, in which case every non-emergency turn
/// fails before any network call.
pub struct SendChatHandler<P: ?Sized + CompletionProvider> {
    provider: Option<Arc<P>>,
    validator: Arc<dyn ChatResponseValidator>,
}

impl<P: ?Sized + CompletionProvider> SendChatHandler<P> {
    pub fn new(provider: Option<Arc<P>>, validator: Arc<dyn ChatResponseValidator>) -> Self {
        Self {
            provider,
            validator,
        }
    }

    pub async fn handle(&self, cmd: SendChatCommand) -> Result<ChatResponse, SendChatError> {
        // 1. Safety layer: crisis messages get the canned escalation reply
        // and never reach the provider.
        if EmergencyFilter::is_emergency(&cmd.message) {
            info!("emergency keyword matched, returning canned escalation");
            return Ok(EmergencyFilter::canned_response());
        }

        // 2. Classify the conversation phase from the caller's history.
        let turn_count = user_turn_count(&cmd.history);
        let phase = ConversationPhase::for_turn_count(turn_count);
        debug!(turn_count, phase = phase.label(), "classified conversation phase");

        // 3. Assemble the ordered message list.
        let messages = assemble_messages(&cmd, phase, turn_count);

        // 4. Fail fast when no credential was configured.
        let provider = self
            .provider
            .as_ref()
            .ok_or(SendChatError::MissingCredential)?;

        // 5. Single completion call, JSON output mode.
        let request = CompletionRequest::new()
            .with_messages(messages)
            .with_json_output(true);
        let completion = provider.complete(request).await?;

        // 6. Parse and validate the completion payload.
        let payload: serde_json::Value = serde_json::from_str(&completion.content)
            .map_err(|e| SendChatError::InvalidJson(e.to_string()))?;

        self.validator
            .validate(&payload)
            .map_err(|e| SendChatError::SchemaViolation(e.to_string()))?;

        let response: ChatResponse = serde_json::from_value(payload)
            .map_err(|e| SendChatError::SchemaViolation(e.to_string()))?;

        Ok(response)
    }
}

/// Builds the ordered message list: persona prompt, phase instruction, the
/// caller's history verbatim (role strings untouched), then the new user
/// message.
fn assemble_messages(
    cmd: &SendChatCommand,
    phase: ConversationPhase,
    turn_count: u32,
) -> Vec<Message> {
    let mut messages = Vec::with_capacity(cmd.history.len() + 3);
    messages.push(Message::system(SYSTEM_PROMPT));
    messages.push(Message::system(phase.instruction(turn_count)));
    messages.extend(
        cmd.history
            .iter()
            .map(|m| Message::new(m.role.clone(), m.content.clone())),
    );
    messages.push(Message::user(cmd.message.clone()));
    messages
}
