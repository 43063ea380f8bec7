//! Emergency keyword filter and canned escalation response.
//!
//! Messages that mention a crisis term as a whole word are answered with a
//! fixed escalation object and never reach the completion provider, so the
//! crisis path does not depend on the external API's availability.

use once_cell::sync::Lazy;
use regex::Regex;

use super::response::{ActionItem, ActionType, ChatResponse, Intent};

/// Crisis terms matched as whole words, case-insensitively.
pub const CRISIS_TERMS: [&str; 12] = [
    "suicide",
    "kill myself",
    "want to die",
    "chest pain",
    "can't breathe",
    "cant breathe",
    "heart attack",
    "trouble breathing",
    "overdose",
    "I am in danger",
    "im in danger",
    "die",
];

static EMERGENCY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    let alternation = CRISIS_TERMS.join("|");
    Regex::new(&format!(r"(?i)\b({alternation})\b")).expect("emergency pattern must compile")
});

/// Stateless predicate over incoming message text.
pub struct EmergencyFilter;

impl EmergencyFilter {
    /// Returns true if the message contains any crisis term as a whole word.
    pub fn is_emergency(message: &str) -> bool {
        EMERGENCY_PATTERN.is_match(message)
    }

    /// The fixed escalation reply returned on a crisis match.
    pub fn canned_response() -> ChatResponse {
        ChatResponse {
            intent: Intent::Escalate,
            summary: "It sounds like you might be in immediate danger or experiencing \
                      a medical emergency. Please seek help right now."
                .to_string(),
            actions: vec![ActionItem {
                action_type: ActionType::SeekProfessional,
                text: "Please contact your local emergency services immediately (for \
                       example, 911 or 999), or go to the nearest emergency room. If \
                       possible, also reach out to a trusted person near you."
                    .to_string(),
            }],
            confidence: 1.0,
            evidence: vec![],
        }
    }
}
