//! The structured reply shape returned to clients.
//!
//! Every successful `/chat` response, including the canned emergency object,
//! has this shape. The model is instructed to emit it as strict JSON; the
//! schema validator checks the untyped payload before it is deserialized
//! into these types.

use serde::{Deserialize, Serialize};

/// A structured assistant reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Short category of the reply.
    pub intent: Intent,
    /// Empathetic reflection and, in guidance, tailored support.
    pub summary: String,
    /// Concrete next steps (empty during exploration, 1-3 during guidance).
    pub actions: Vec<ActionItem>,
    /// Model confidence in the appropriateness of its guidance, 0.0 to 1.0.
    pub confidence: f64,
    /// Supporting resources (empty during exploration, exactly one during
    /// guidance).
    pub evidence: Vec<EvidenceItem>,
}

/// Category of an assistant reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Intent {
    SelfCare,
    Refer,
    Escalate,
    OutOfScope,
}

/// One concrete, actionable suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionItem {
    #[serde(rename = "type")]
    pub action_type: ActionType,
    pub text: String,
}

/// Kind of suggested action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionType {
    SelfCare,
    SeekProfessional,
    Information,
}

/// A supporting resource from one of the accepted publishers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceItem {
    pub title: String,
    pub source: EvidenceSource,
    pub link: String,
}

/// Accepted evidence publishers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EvidenceSource {
    Who,
    Nhs,
    Apa,
}
