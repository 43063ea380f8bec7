//! Chat application handlers.

mod send_chat;

pub use send_chat::{SendChatCommand, SendChatError, SendChatHandler};
