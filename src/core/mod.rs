// Core engine exports
pub mod explain;
pub mod intake;
pub mod ranker;
pub mod scoring;

pub use explain::{assemble_reasons, badge_for};
pub use intake::{normalize_intake, IntakeError};
pub use ranker::{Ranker, Ranking};
pub use scoring::{score_mentor, total_score};
