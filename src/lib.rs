//! Chai Match - mentor ranking and explanation engine for the Chai platform
//!
//! This library scores mentor candidates against a seeker's structured intake
//! across five independent dimensions (expertise, stage, engagement, style,
//! narrative), combines them into a weighted total, and attaches a badge tier
//! plus human-readable match reasons. The engine is pure and stateless; the
//! HTTP layer in the binary is a thin wrapper around it.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{normalize_intake, IntakeError, Ranker, Ranking};
pub use crate::models::{
    Badge, Intake, MatchRequest, MatchResponse, MentorProfile, RankingConfig, ScoredMentor,
};
pub use crate::services::{FileCatalog, MentorCatalog};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let ranker = Ranker::with_defaults();
        let raw = MatchRequest {
            desired_flavor: "career".to_string(),
            career_stage: "early_career".to_string(),
            current_challenge: None,
            support_style: None,
            preferred_vibe: "casual".to_string(),
            additional_context: None,
            limit: 10,
            badged_only: false,
        };
        let intake = normalize_intake(&raw).unwrap();
        let ranking = ranker.rank(&intake, vec![]);
        assert_eq!(ranking.total_eligible, 0);
    }
}
