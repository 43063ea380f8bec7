//! Chat domain - phases, messages, the reply schema, and the safety filter.

mod emergency;
mod message;
mod phase;
mod prompt;
mod response;

pub use emergency::{EmergencyFilter, CRISIS_TERMS};
pub use message::{user_turn_count, ChatMessage};
pub use phase::{ConversationPhase, EXPLORATION_TURN_LIMIT};
pub use prompt::SYSTEM_PROMPT;
pub use response::{ActionItem, ActionType, ChatResponse, EvidenceItem, EvidenceSource, Intent};
