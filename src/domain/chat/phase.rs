//! Conversation phases.
//!
//! Phases guide the assistant's behavior within a conversation. The phase is
//! recomputed on every request from the caller-supplied history; nothing is
//! retained between requests.

use serde::{Deserialize, Serialize};

/// Number of user turns (including the current message) that still count as
/// the exploration phase. Turn counts above this switch to guidance.
pub const EXPLORATION_TURN_LIMIT: u32 = 3;

/// The current phase of assistant behavior within a conversation.
///
/// - `Exploration`: early in the conversation, gathering details. The
///   assistant must not yet offer concrete steps or resources.
/// - `Guidance`: enough context has accumulated for personalized support
///   with concrete next steps and one supporting resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversationPhase {
    Exploration,
    Guidance,
}

impl ConversationPhase {
    /// Classifies a conversation by its user turn count (prior user turns in
    /// history plus the current message).
    pub fn for_turn_count(user_turn_count: u32) -> Self {
        if user_turn_count <= EXPLORATION_TURN_LIMIT {
            Self::Exploration
        } else {
            Self::Guidance
        }
    }

    /// Returns a short label for the phase, suitable for logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Exploration => "exploration",
            Self::Guidance => "guidance",
        }
    }

    /// Returns true if the phase permits concrete actions and evidence in
    /// the reply.
    pub fn allows_recommendations(&self) -> bool {
        matches!(self, Self::Guidance)
    }

    /// Builds the system instruction that tells the model which phase it is
    /// in and what its reply must contain.
    pub fn instruction(&self, user_turn_count: u32) -> String {
        match self {
            Self::Exploration => format!(
                "You are currently in the EXPLORATION phase of the conversation.\n\
                 - User messages so far (including current): {user_turn_count}.\n\
                 - DO NOT give concrete suggestions or techniques yet.\n\
                 - Focus on empathy and understanding.\n\
                 - Ask 1-2 gentle, open-ended questions to better understand what they are going through.\n\
                 - The 'actions' field in your JSON MUST be an empty list: [].\n\
                 - The 'evidence' field in your JSON MUST be an empty list: [].\n\
                 - 'intent' will usually be 'self-care' unless you need to 'refer' or 'escalate'."
            ),
            Self::Guidance => format!(
                "You are now in the GUIDANCE phase of the conversation.\n\
                 - User messages so far (including current): {user_turn_count}.\n\
                 - You have enough context to offer personalized support.\n\
                 - Provide 1-3 concrete, realistic next steps in 'actions'.\n\
                 - Provide exactly ONE appropriate resource in 'evidence' (WHO, NHS, or APA).\n\
                 - Maintain empathy and validation while giving guidance."
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod classification {
        use super::*;

        #[test]
        fn first_turn_is_exploration() {
            assert_eq!(
                ConversationPhase::for_turn_count(1),
                ConversationPhase::Exploration
            );
        }

        #[test]
        fn third_turn_is_still_exploration() {
            assert_eq!(
                ConversationPhase::for_turn_count(3),
                ConversationPhase::Exploration
            );
        }

        #[test]
        fn fourth_turn_switches_to_guidance() {
            assert_eq!(
                ConversationPhase::for_turn_count(4),
                ConversationPhase::Guidance
            );
        }

        #[test]
        fn later_turns_stay_in_guidance() {
            assert_eq!(
                ConversationPhase::for_turn_count(25),
                ConversationPhase::Guidance
            );
        }
    }

    mod instructions {
        use super::*;

        #[test]
        fn exploration_forbids_actions_and_evidence() {
            let text = ConversationPhase::Exploration.instruction(2);
            assert!(text.contains("EXPLORATION"));
            assert!(text.contains("'actions' field in your JSON MUST be an empty list"));
            assert!(text.contains("'evidence' field in your JSON MUST be an empty list"));
            assert!(text.contains("DO NOT give concrete suggestions"));
        }

        #[test]
        fn guidance_requires_actions_and_one_evidence_item() {
            let text = ConversationPhase::Guidance.instruction(5);
            assert!(text.contains("GUIDANCE"));
            assert!(text.contains("1-3 concrete, realistic next steps in 'actions'"));
            assert!(text.contains("exactly ONE appropriate resource in 'evidence'"));
        }

        #[test]
        fn instruction_embeds_turn_count() {
            let text = ConversationPhase::Exploration.instruction(2);
            assert!(text.contains("including current): 2."));

            let text = ConversationPhase::Guidance.instruction(7);
            assert!(text.contains("including current): 7."));
        }
    }

    #[test]
    fn only_guidance_allows_recommendations() {
        assert!(!ConversationPhase::Exploration.allows_recommendations());
        assert!(ConversationPhase::Guidance.allows_recommendations());
    }

    #[test]
    fn serializes_to_snake_case() {
        let json = serde_json::to_string(&ConversationPhase::Exploration).unwrap();
        assert_eq!(json, "\"exploration\"");
    }
}
