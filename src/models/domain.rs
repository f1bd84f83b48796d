use serde::{Deserialize, Serialize};

/// Mentor profile as supplied by the catalog or directory
///
/// Stage and style tags arrive as free strings from the directory and are
/// parsed into closed vocabularies at scoring time; unrecognized tags
/// degrade to a neutral contribution instead of failing the request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MentorProfile {
    #[serde(rename = "mentorId", alias = "id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub linkedin: Option<String>,
    #[serde(default)]
    pub story: String,
    #[serde(default)]
    pub specialties: Vec<String>,
    #[serde(rename = "chaisShared", default)]
    pub chais_shared: u32,
    #[serde(rename = "growthStage", default)]
    pub growth_stage: String,
    #[serde(rename = "communicationStyle", default)]
    pub communication_style: String,
}

impl MentorProfile {
    /// Parsed mentor-side career stage, if the tag is recognized
    pub fn stage(&self) -> Option<CareerStage> {
        CareerStage::parse(&self.growth_stage)
    }

    /// Parsed communication style, if the tag is recognized
    pub fn style(&self) -> Option<MentorStyle> {
        MentorStyle::parse(&self.communication_style)
    }

    /// Structural invariant required for a mentor to be scored at all
    pub fn is_well_formed(&self) -> bool {
        !self.id.trim().is_empty() && !self.specialties.is_empty()
    }
}

/// Canonical seeker intake produced by the normalizer
///
/// Required fields have already been checked for presence; enum-valued
/// fields hold `None` when the raw tag was present but unrecognized.
#[derive(Debug, Clone, PartialEq)]
pub struct Intake {
    pub desired_flavor: String,
    pub career_stage: Option<CareerStage>,
    pub current_challenge: Option<String>,
    pub support_style: Option<SupportStyle>,
    pub preferred_vibe: Option<ConversationVibe>,
    pub additional_context: Option<String>,
}

/// Seeker/mentor career stage, totally ordered by seniority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CareerStage {
    Exploring,
    EarlyCareer,
    MidCareer,
    Senior,
    Executive,
}

impl CareerStage {
    pub fn parse(tag: &str) -> Option<Self> {
        match normalize_tag(tag).as_str() {
            "exploring" => Some(Self::Exploring),
            "early_career" => Some(Self::EarlyCareer),
            "mid_career" => Some(Self::MidCareer),
            "senior" => Some(Self::Senior),
            "executive" => Some(Self::Executive),
            _ => None,
        }
    }

    /// Position in the seniority order, used for stage-distance scoring
    pub fn rank(self) -> i8 {
        match self {
            Self::Exploring => 0,
            Self::EarlyCareer => 1,
            Self::MidCareer => 2,
            Self::Senior => 3,
            Self::Executive => 4,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Exploring => "exploring",
            Self::EarlyCareer => "early career",
            Self::MidCareer => "mid career",
            Self::Senior => "senior",
            Self::Executive => "executive",
        }
    }
}

/// Kind of support the seeker asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupportStyle {
    Accountability,
    LivedExperience,
    Listener,
    Challenger,
    Brainstorming,
}

impl SupportStyle {
    pub fn parse(tag: &str) -> Option<Self> {
        match normalize_tag(tag).as_str() {
            "accountability" => Some(Self::Accountability),
            "lived_experience" | "experience" => Some(Self::LivedExperience),
            "listener" | "someone_to_listen" => Some(Self::Listener),
            "challenger" => Some(Self::Challenger),
            "brainstorming" => Some(Self::Brainstorming),
            _ => None,
        }
    }
}

/// Conversation tone the seeker prefers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversationVibe {
    Casual,
    Structured,
    InBetween,
}

impl ConversationVibe {
    pub fn parse(tag: &str) -> Option<Self> {
        match normalize_tag(tag).as_str() {
            "casual" => Some(Self::Casual),
            "structured" => Some(Self::Structured),
            "in_between" => Some(Self::InBetween),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Casual => "casual",
            Self::Structured => "structured",
            Self::InBetween => "in-between",
        }
    }
}

/// Mentor-side communication style vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MentorStyle {
    Storyteller,
    Structured,
    Casual,
    Direct,
    Analytical,
}

impl MentorStyle {
    pub fn parse(tag: &str) -> Option<Self> {
        match normalize_tag(tag).as_str() {
            "storyteller" => Some(Self::Storyteller),
            "structured" => Some(Self::Structured),
            "casual" => Some(Self::Casual),
            "direct" => Some(Self::Direct),
            "analytical" => Some(Self::Analytical),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Storyteller => "storyteller",
            Self::Structured => "structured",
            Self::Casual => "casual",
            Self::Direct => "direct",
            Self::Analytical => "analytical",
        }
    }
}

/// Lowercase a tag and collapse separators so "Early-Career" == "early_career"
fn normalize_tag(tag: &str) -> String {
    tag.trim()
        .to_lowercase()
        .replace(['-', ' '], "_")
}

/// One bounded score per matching dimension, each in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DimensionScores {
    pub expertise: f64,
    pub stage: f64,
    pub engagement: f64,
    pub style: f64,
    pub narrative: f64,
}

/// Discrete display tier derived from the total score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Badge {
    Great,
    Good,
}

/// Scored mentor result, passed through to the presentation layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredMentor {
    #[serde(rename = "mentorId")]
    pub mentor_id: String,
    pub name: String,
    pub title: String,
    pub photo: Option<String>,
    pub linkedin: Option<String>,
    #[serde(rename = "chaisShared")]
    pub chais_shared: u32,
    pub scores: DimensionScores,
    #[serde(rename = "matchScore")]
    pub match_score: f64,
    #[serde(rename = "matchReasons")]
    pub match_reasons: Vec<String>,
    pub badge: Option<Badge>,
}

/// Per-dimension weights for the composite total
///
/// Weights must sum to 1.0 so totals stay on the 0-100 scale.
#[derive(Debug, Clone, Copy)]
pub struct MatchWeights {
    pub expertise: f64,
    pub stage: f64,
    pub engagement: f64,
    pub style: f64,
    pub narrative: f64,
}

impl MatchWeights {
    pub fn sum(&self) -> f64 {
        self.expertise + self.stage + self.engagement + self.style + self.narrative
    }
}

impl Default for MatchWeights {
    fn default() -> Self {
        Self {
            expertise: 0.35,
            stage: 0.20,
            engagement: 0.15,
            style: 0.20,
            narrative: 0.10,
        }
    }
}

/// All tunable thresholds for ranking, badging and reason emission
#[derive(Debug, Clone)]
pub struct RankingConfig {
    pub weights: MatchWeights,
    /// Minimum total score for the "great" badge
    pub great_badge_min: f64,
    /// Minimum total score for the "good" badge
    pub good_badge_min: f64,
    /// Session count above which the engagement reason is emitted
    pub proven_chais_min: u32,
    /// Style score above which the style reason is emitted
    pub style_reason_min: f64,
    /// Narrative score above which the narrative reason is emitted
    pub narrative_reason_min: f64,
    /// Cap on the assembled match_reasons list
    pub max_reasons: usize,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            weights: MatchWeights::default(),
            great_badge_min: 75.0,
            good_badge_min: 55.0,
            proven_chais_min: 25,
            style_reason_min: 0.8,
            narrative_reason_min: 0.3,
            max_reasons: 4,
        }
    }
}
