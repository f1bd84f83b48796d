use crate::models::{
    ConversationVibe, DimensionScores, Intake, MatchWeights, MentorProfile, MentorStyle,
    RankingConfig, SupportStyle,
};
use std::collections::HashSet;

/// Score used whenever a dimension has nothing to say (unknown vocabulary,
/// absent optional input). Strictly between the bounds so it neither rewards
/// nor punishes.
pub const NEUTRAL_SCORE: f64 = 0.5;

/// Floor of the engagement transform; a brand-new mentor starts here, not at zero
const ENGAGEMENT_BASELINE: f64 = 0.3;

/// Session count at which the engagement transform saturates
const ENGAGEMENT_SATURATION: f64 = 50.0;

/// Common words ignored by the narrative overlap
const STOP_WORDS: &[&str] = &[
    "the", "and", "for", "with", "that", "this", "from", "have", "has", "had", "was", "were",
    "are", "but", "not", "you", "your", "our", "their", "they", "them", "about", "into", "out",
    "been", "being", "what", "when", "where", "how", "who", "can", "could", "would", "should",
    "will", "just", "like", "want", "need", "really", "very", "more", "most", "some", "any",
    "all", "one", "two", "get", "got", "also", "than", "then", "now", "over", "after", "before",
];

/// Score every dimension for one mentor/intake pair
///
/// Each dimension lands in [0, 1] and carries an optional reason string,
/// returned in the fixed assembly order: expertise, stage, engagement,
/// style, narrative.
pub fn score_mentor(
    intake: &Intake,
    mentor: &MentorProfile,
    config: &RankingConfig,
) -> (DimensionScores, [Option<String>; 5]) {
    let (expertise, expertise_reason) = expertise_score(intake, mentor);
    let (stage, stage_reason) = stage_score(intake, mentor);
    let (engagement, engagement_reason) =
        engagement_score(mentor.chais_shared, config.proven_chais_min);
    let (style, style_reason) = style_score(intake, mentor, config.style_reason_min);
    let (narrative, narrative_reason) =
        narrative_score(intake, mentor, config.narrative_reason_min);

    (
        DimensionScores {
            expertise,
            stage,
            engagement,
            style,
            narrative,
        },
        [
            expertise_reason,
            stage_reason,
            engagement_reason,
            style_reason,
            narrative_reason,
        ],
    )
}

/// Weighted combination of the five dimensions, scaled to [0, 100]
pub fn total_score(scores: &DimensionScores, weights: &MatchWeights) -> f64 {
    let total = (scores.expertise * weights.expertise
        + scores.stage * weights.stage
        + scores.engagement * weights.engagement
        + scores.style * weights.style
        + scores.narrative * weights.narrative)
        * 100.0;

    total.min(100.0).max(0.0)
}

/// Expertise: fraction of the seeker's topics covered by mentor specialties
///
/// Topics are the desired flavor plus the current challenge when present.
/// A hit is case-insensitive substring containment in either direction, so
/// "career" matches the "Career Growth" specialty and vice versa.
pub fn expertise_score(intake: &Intake, mentor: &MentorProfile) -> (f64, Option<String>) {
    let mut topics = vec![intake.desired_flavor.as_str()];
    if let Some(challenge) = intake.current_challenge.as_deref() {
        topics.push(challenge);
    }

    let mut hits = 0usize;
    let mut first_match: Option<&str> = None;

    for topic in &topics {
        let matched = mentor.specialties.iter().find(|specialty| {
            let specialty_lower = specialty.to_lowercase();
            specialty_lower.contains(*topic) || topic.contains(specialty_lower.as_str())
        });
        if let Some(specialty) = matched {
            hits += 1;
            first_match.get_or_insert(specialty.as_str());
        }
    }

    let score = (hits as f64 / topics.len() as f64).min(1.0).max(0.0);
    let reason = first_match.map(|specialty| format!("Specializes in {}", specialty));

    (score, reason)
}

/// Stage: distance between seeker and mentor on the seniority order
///
/// The sweet spot is a mentor one step ahead, with two steps ahead close
/// behind; the score decays as the gap widens either side of that. Unknown
/// stage on either side is neutral.
pub fn stage_score(intake: &Intake, mentor: &MentorProfile) -> (f64, Option<String>) {
    let (seeker, mentor_stage) = match (intake.career_stage, mentor.stage()) {
        (Some(s), Some(m)) => (s, m),
        _ => return (NEUTRAL_SCORE, None),
    };

    let delta = mentor_stage.rank() - seeker.rank();
    let score = match delta {
        1 => 1.0,
        2 => 0.85,
        0 => 0.6,
        3 => 0.55,
        -1 => 0.3,
        4 => 0.25,
        _ => 0.1,
    };

    let reason = match delta {
        1 | 2 => Some(format!(
            "A {} mentor, a step or two ahead of your {} stage",
            mentor_stage.label(),
            seeker.label()
        )),
        d if d >= 3 => Some(format!(
            "A {} mentor, several stages ahead of your {} stage",
            mentor_stage.label(),
            seeker.label()
        )),
        _ => None,
    };

    (score, reason)
}

/// Engagement: saturating log transform of the shared-chai count
///
/// score = baseline + (1 - baseline) * ln(1 + n) / ln(1 + saturation),
/// capped at 1. Zero sessions lands on the baseline, never zero, so new
/// mentors are not buried by track record alone.
pub fn engagement_score(chais_shared: u32, proven_min: u32) -> (f64, Option<String>) {
    let n = chais_shared as f64;
    let saturation = (1.0 + n).ln() / (1.0 + ENGAGEMENT_SATURATION).ln();
    let score = (ENGAGEMENT_BASELINE + (1.0 - ENGAGEMENT_BASELINE) * saturation).min(1.0);

    let reason = (chais_shared >= proven_min)
        .then(|| format!("Proven track record with {} chais shared", chais_shared));

    (score, reason)
}

/// Style: fixed compatibility table between the seeker's vibe and the
/// mentor's communication style, blended with support-style affinity when
/// the seeker named one
pub fn style_score(
    intake: &Intake,
    mentor: &MentorProfile,
    reason_min: f64,
) -> (f64, Option<String>) {
    let (vibe, style) = match (intake.preferred_vibe, mentor.style()) {
        (Some(v), Some(s)) => (v, s),
        _ => return (NEUTRAL_SCORE, None),
    };

    let vibe_fit = vibe_affinity(vibe, style);
    let score = match intake.support_style {
        Some(support) => 0.7 * vibe_fit + 0.3 * support_affinity(support, style),
        None => vibe_fit,
    };
    let score = score.min(1.0).max(0.0);

    let reason = (score >= reason_min).then(|| {
        format!(
            "Their {} style fits the {} tone you're looking for",
            style.label(),
            vibe.label()
        )
    });

    (score, reason)
}

fn vibe_affinity(vibe: ConversationVibe, style: MentorStyle) -> f64 {
    use ConversationVibe as V;
    use MentorStyle as S;

    match (vibe, style) {
        (V::Casual, S::Storyteller) | (V::Casual, S::Casual) => 1.0,
        (V::Casual, S::Direct) => 0.6,
        (V::Casual, S::Structured) | (V::Casual, S::Analytical) => 0.4,
        (V::Structured, S::Structured) => 1.0,
        (V::Structured, S::Analytical) => 0.9,
        (V::Structured, S::Direct) => 0.7,
        (V::Structured, S::Storyteller) => 0.4,
        (V::Structured, S::Casual) => 0.3,
        (V::InBetween, _) => 0.7,
    }
}

fn support_affinity(support: SupportStyle, style: MentorStyle) -> f64 {
    use MentorStyle as S;
    use SupportStyle as P;

    match (support, style) {
        (P::Accountability, S::Direct) => 1.0,
        (P::Accountability, S::Structured) => 0.9,
        (P::Accountability, S::Analytical) => 0.7,
        (P::Accountability, _) => 0.4,
        (P::LivedExperience, S::Storyteller) => 1.0,
        (P::LivedExperience, S::Casual) => 0.7,
        (P::LivedExperience, S::Direct) => 0.6,
        (P::LivedExperience, _) => 0.5,
        (P::Listener, S::Casual) | (P::Listener, S::Storyteller) => 0.9,
        (P::Listener, _) => 0.5,
        (P::Challenger, S::Direct) => 1.0,
        (P::Challenger, S::Analytical) => 0.8,
        (P::Challenger, _) => 0.4,
        (P::Brainstorming, S::Analytical) => 0.9,
        (P::Brainstorming, S::Casual) => 0.8,
        (P::Brainstorming, S::Storyteller) => 0.7,
        (P::Brainstorming, _) => 0.5,
    }
}

/// Narrative: token overlap between the seeker's free-text context and the
/// mentor's story plus specialties
///
/// Absent context is neutral, never a penalty. The ratio of shared tokens to
/// seeker tokens is stretched so a moderate overlap already registers.
pub fn narrative_score(
    intake: &Intake,
    mentor: &MentorProfile,
    reason_min: f64,
) -> (f64, Option<String>) {
    let context = match intake.additional_context.as_deref() {
        Some(text) => text,
        None => return (NEUTRAL_SCORE, None),
    };

    let seeker_tokens = tokenize(context);
    if seeker_tokens.is_empty() {
        return (NEUTRAL_SCORE, None);
    }

    let mut mentor_text = mentor.story.clone();
    for specialty in &mentor.specialties {
        mentor_text.push(' ');
        mentor_text.push_str(specialty);
    }
    let mentor_tokens = tokenize(&mentor_text);

    let shared = seeker_tokens.intersection(&mentor_tokens).count();
    let ratio = shared as f64 / seeker_tokens.len() as f64;
    let score = (ratio * 2.0).min(1.0);

    let reason =
        (score >= reason_min).then(|| "Their own story speaks to what you're navigating".to_string());

    (score, reason)
}

/// Lowercased alphanumeric tokens of three or more characters, stop words removed
fn tokenize(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| token.len() >= 3 && !STOP_WORDS.contains(token))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CareerStage;

    fn test_intake() -> Intake {
        Intake {
            desired_flavor: "career".to_string(),
            career_stage: Some(CareerStage::EarlyCareer),
            current_challenge: None,
            support_style: Some(SupportStyle::LivedExperience),
            preferred_vibe: Some(ConversationVibe::Casual),
            additional_context: None,
        }
    }

    fn test_mentor() -> MentorProfile {
        MentorProfile {
            id: "m1".to_string(),
            name: "Priya".to_string(),
            title: "Engineering Director".to_string(),
            photo: None,
            linkedin: None,
            story: "I pivoted from finance into engineering leadership and now coach new managers."
                .to_string(),
            specialties: vec!["Career Growth".to_string(), "Leadership".to_string()],
            chais_shared: 47,
            growth_stage: "senior".to_string(),
            communication_style: "storyteller".to_string(),
        }
    }

    #[test]
    fn test_expertise_substring_hit() {
        let (score, reason) = expertise_score(&test_intake(), &test_mentor());

        assert_eq!(score, 1.0);
        assert_eq!(reason.as_deref(), Some("Specializes in Career Growth"));
    }

    #[test]
    fn test_expertise_no_overlap_scores_zero() {
        let mut mentor = test_mentor();
        mentor.specialties = vec!["Finance".to_string()];

        let (score, reason) = expertise_score(&test_intake(), &mentor);

        assert_eq!(score, 0.0);
        assert!(reason.is_none());
    }

    #[test]
    fn test_expertise_challenge_counts_as_topic() {
        let mut intake = test_intake();
        intake.current_challenge = Some("leadership".to_string());

        let (score, _) = expertise_score(&intake, &test_mentor());

        // Both the flavor and the challenge find a specialty
        assert_eq!(score, 1.0);
    }

    #[test]
    fn test_stage_one_ahead_is_maximal() {
        let mut intake = test_intake();
        intake.career_stage = Some(CareerStage::MidCareer);

        let (score, reason) = stage_score(&intake, &test_mentor());

        assert_eq!(score, 1.0);
        assert!(reason.unwrap().contains("senior"));
    }

    #[test]
    fn test_stage_two_ahead_beats_same_stage() {
        let intake = test_intake(); // early_career vs senior => +2
        let (two_ahead, _) = stage_score(&intake, &test_mentor());

        let mut peer = test_mentor();
        peer.growth_stage = "early_career".to_string();
        let (same, same_reason) = stage_score(&intake, &peer);

        assert!(two_ahead > same);
        assert!(same_reason.is_none());
    }

    #[test]
    fn test_stage_far_ahead_reason_not_overstated() {
        let mut intake = test_intake();
        intake.career_stage = Some(CareerStage::Exploring);

        let mut mentor = test_mentor();
        mentor.growth_stage = "executive".to_string();

        let (score, reason) = stage_score(&intake, &mentor);
        let reason = reason.unwrap();

        assert_eq!(score, 0.25);
        assert!(!reason.contains("a step or two"), "overstated: {}", reason);
        assert!(reason.contains("several stages ahead"));
    }

    #[test]
    fn test_stage_unknown_is_neutral() {
        let mut mentor = test_mentor();
        mentor.growth_stage = "wizard".to_string();

        let (score, reason) = stage_score(&test_intake(), &mentor);

        assert_eq!(score, NEUTRAL_SCORE);
        assert!(reason.is_none());
    }

    #[test]
    fn test_engagement_cold_start_is_positive() {
        let (score, reason) = engagement_score(0, 25);

        assert!(score > 0.0);
        assert_eq!(score, ENGAGEMENT_BASELINE);
        assert!(reason.is_none());
    }

    #[test]
    fn test_engagement_saturates() {
        let (few, _) = engagement_score(5, 25);
        let (many, _) = engagement_score(47, 25);
        let (heap, _) = engagement_score(500, 25);

        assert!(few < many);
        assert!(many <= 1.0 && heap <= 1.0);
        // Diminishing returns: the jump from 47 to 500 is smaller than 5 to 47
        assert!(heap - many < many - few);
    }

    #[test]
    fn test_engagement_proven_reason() {
        let (_, reason) = engagement_score(47, 25);
        assert_eq!(
            reason.as_deref(),
            Some("Proven track record with 47 chais shared")
        );
    }

    #[test]
    fn test_style_casual_storyteller_high() {
        let (score, reason) = style_score(&test_intake(), &test_mentor(), 0.8);

        assert_eq!(score, 1.0);
        assert!(reason.unwrap().contains("storyteller"));
    }

    #[test]
    fn test_style_mismatch_low_no_reason() {
        let mut mentor = test_mentor();
        mentor.communication_style = "analytical".to_string();

        let (score, reason) = style_score(&test_intake(), &mentor, 0.8);

        assert!(score < 0.5);
        assert!(reason.is_none());
    }

    #[test]
    fn test_style_in_between_is_moderate_for_all() {
        let mut intake = test_intake();
        intake.preferred_vibe = Some(ConversationVibe::InBetween);
        intake.support_style = None;

        for style in ["storyteller", "structured", "casual", "direct", "analytical"] {
            let mut mentor = test_mentor();
            mentor.communication_style = style.to_string();
            let (score, _) = style_score(&intake, &mentor, 0.8);
            assert_eq!(score, 0.7, "in_between vs {}", style);
        }
    }

    #[test]
    fn test_narrative_absent_context_is_neutral() {
        let (score, reason) = narrative_score(&test_intake(), &test_mentor(), 0.3);

        assert_eq!(score, NEUTRAL_SCORE);
        assert!(reason.is_none());
    }

    #[test]
    fn test_narrative_overlap_scores_and_explains() {
        let mut intake = test_intake();
        intake.additional_context =
            Some("I pivoted out of finance and want to grow into leadership".to_string());

        let (score, reason) = narrative_score(&intake, &test_mentor(), 0.3);

        assert!(score > 0.5, "overlapping story should beat neutral, got {}", score);
        assert!(reason.is_some());
    }

    #[test]
    fn test_narrative_stop_words_only_is_neutral() {
        let mut intake = test_intake();
        intake.additional_context = Some("the and for with".to_string());

        let (score, reason) = narrative_score(&intake, &test_mentor(), 0.3);

        assert_eq!(score, NEUTRAL_SCORE);
        assert!(reason.is_none());
    }

    #[test]
    fn test_total_score_within_range() {
        let config = RankingConfig::default();
        let (scores, _) = score_mentor(&test_intake(), &test_mentor(), &config);
        let total = total_score(&scores, &config.weights);

        assert!(total >= 0.0 && total <= 100.0);
        // This pairing is strong on every dimension
        assert!(total > 75.0, "expected a great match, got {}", total);
    }
}
