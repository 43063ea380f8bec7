//! Chat history messages supplied by the caller.
//!
//! History is entirely client-owned: the service holds no session store, so
//! every request carries the full prior conversation. Role values are free
//! strings and are forwarded to the completion provider exactly as received.

use serde::{Deserialize, Serialize};

/// A single message in the caller-supplied conversation history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Who sent this message ("user", "assistant", or anything else the
    /// caller stored; never normalized).
    pub role: String,
    /// Message content.
    pub content: String,
}

impl ChatMessage {
    /// Creates a message with an arbitrary role.
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }

    /// Creates a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new("user", content)
    }

    /// Creates an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new("assistant", content)
    }

    /// Returns true if this message counts as a user turn.
    pub fn is_user(&self) -> bool {
        self.role == "user"
    }
}

/// Counts user turns in a history slice, plus one for the current message.
pub fn user_turn_count(history: &[ChatMessage]) -> u32 {
    history.iter().filter(|m| m.is_user()).count() as u32 + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_roles() {
        assert_eq!(ChatMessage::user("hi").role, "user");
        assert_eq!(ChatMessage::assistant("hello").role, "assistant");
        assert_eq!(ChatMessage::new("tool", "x").role, "tool");
    }

    #[test]
    fn is_user_matches_exact_role_only() {
        assert!(ChatMessage::user("hi").is_user());
        assert!(!ChatMessage::assistant("hi").is_user());
        assert!(!ChatMessage::new("User", "hi").is_user());
    }

    #[test]
    fn turn_count_includes_current_message() {
        assert_eq!(user_turn_count(&[]), 1);

        let history = vec![
            ChatMessage::user("first"),
            ChatMessage::assistant("reply"),
            ChatMessage::user("second"),
        ];
        assert_eq!(user_turn_count(&history), 3);
    }

    #[test]
    fn turn_count_ignores_unknown_roles() {
        let history = vec![
            ChatMessage::new("system", "setup"),
            ChatMessage::new("tool", "output"),
            ChatMessage::user("question"),
        ];
        assert_eq!(user_turn_count(&history), 2);
    }

    #[test]
    fn serializes_role_and_content() {
        let msg = ChatMessage::user("hello");
        let json = serde_json::to_string(&msg).unwrap();
        assert_eq!(json, r#"{"role":"user","content":"hello"}"#);
    }
}
