use crate::models::{CareerStage, ConversationVibe, Intake, MatchRequest, SupportStyle};
use thiserror::Error;

/// Intake validation failure, the only hard failure the engine surfaces
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IntakeError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),
}

/// Validate and normalize a raw intake payload into its canonical form
///
/// The three required fields must be present and non-empty; that is checked
/// here, before any scoring runs. Enum-valued tags are parsed once at this
/// boundary — a present-but-unrecognized tag is not an error, it parses to
/// `None` and every scorer treats it as neutral.
pub fn normalize_intake(raw: &MatchRequest) -> Result<Intake, IntakeError> {
    let desired_flavor = required(&raw.desired_flavor, "desiredFlavor")?;
    let career_stage = required(&raw.career_stage, "careerStage")?;
    let preferred_vibe = required(&raw.preferred_vibe, "preferredVibe")?;

    Ok(Intake {
        desired_flavor: desired_flavor.to_lowercase(),
        career_stage: CareerStage::parse(&career_stage),
        current_challenge: optional(&raw.current_challenge).map(|c| c.to_lowercase()),
        support_style: optional(&raw.support_style).and_then(|s| SupportStyle::parse(&s)),
        preferred_vibe: ConversationVibe::parse(&preferred_vibe),
        additional_context: optional(&raw.additional_context),
    })
}

fn required(value: &str, field: &'static str) -> Result<String, IntakeError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(IntakeError::MissingField(field));
    }
    Ok(trimmed.to_string())
}

fn optional(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
