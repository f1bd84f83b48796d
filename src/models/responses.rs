use serde::{Deserialize, Serialize};
use crate::models::domain::{MentorProfile, ScoredMentor};

/// Response for the match endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResponse {
    pub matches: Vec<ScoredMentor>,
    /// Mentors actually scored after structural exclusion
    #[serde(rename = "totalEligible")]
    pub total_eligible: usize,
    /// Full ranking size before the caller's limit was applied
    #[serde(rename = "totalResults")]
    pub total_results: usize,
}

/// Raw catalog passthrough
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogResponse {
    pub mentors: Vec<MentorProfile>,
    pub count: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
