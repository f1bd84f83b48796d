use serde::{Deserialize, Serialize};
use validator::Validate;

/// Raw intake payload for the match endpoint
///
/// Field presence is checked by the intake normalizer, which reports the
/// missing wire-level field name; the serde defaults here only keep
/// deserialization permissive.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MatchRequest {
    #[serde(alias = "desired_flavor", rename = "desiredFlavor", default)]
    pub desired_flavor: String,
    #[serde(alias = "career_stage", rename = "careerStage", default)]
    pub career_stage: String,
    #[serde(alias = "current_challenge", rename = "currentChallenge", default)]
    pub current_challenge: Option<String>,
    #[serde(alias = "support_style", rename = "supportStyle", default)]
    pub support_style: Option<String>,
    #[serde(alias = "preferred_vibe", rename = "preferredVibe", default)]
    pub preferred_vibe: String,
    #[serde(alias = "additional_context", rename = "additionalContext", default)]
    pub additional_context: Option<String>,
    #[validate(range(min = 1, max = 100))]
    #[serde(default = "default_limit")]
    pub limit: u16,
    /// Drop unbadged mentors before slicing (presentation policy)
    #[serde(alias = "badged_only", rename = "badgedOnly", default)]
    pub badged_only: bool,
}

fn default_limit() -> u16 {
    10
}
