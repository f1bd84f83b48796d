// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    Badge, CareerStage, ConversationVibe, DimensionScores, Intake, MatchWeights, MentorProfile,
    MentorStyle, RankingConfig, ScoredMentor, SupportStyle,
};
pub use requests::MatchRequest;
pub use responses::{CatalogResponse, ErrorResponse, HealthResponse, MatchResponse};
