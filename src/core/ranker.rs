use crate::core::explain::{assemble_reasons, badge_for};
use crate::core::scoring::{score_mentor, total_score};
use crate::models::{Intake, MentorProfile, RankingConfig, ScoredMentor};

/// Tolerance for the unit-sum check on configured weights
const WEIGHT_SUM_EPSILON: f64 = 1e-6;

/// Result of ranking one intake against a catalog
#[derive(Debug)]
pub struct Ranking {
    /// Every eligible mentor, sorted by total score descending
    pub results: Vec<ScoredMentor>,
    /// Mentors actually scored, after structural exclusion
    pub total_eligible: usize,
}

/// Composite ranker: scores every eligible mentor and sorts the results
///
/// Stateless and synchronous; each call is independent and deterministic
/// for identical inputs. Top-N slicing and badge filtering are caller
/// policy and deliberately not done here.
#[derive(Debug, Clone)]
pub struct Ranker {
    config: RankingConfig,
}

impl Ranker {
    /// Build a ranker, enforcing the unit-sum weight invariant
    ///
    /// Totals are only comparable against the badge thresholds when the
    /// weights sum to 1.0. Off-unit weights are renormalized with a warning;
    /// a degenerate (zero or negative) sum falls back to the defaults.
    pub fn new(mut config: RankingConfig) -> Self {
        let sum = config.weights.sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_EPSILON {
            if sum > 0.0 {
                tracing::warn!("Ranking weights sum to {}, renormalizing to 1.0", sum);
                let w = &mut config.weights;
                w.expertise /= sum;
                w.stage /= sum;
                w.engagement /= sum;
                w.style /= sum;
                w.narrative /= sum;
            } else {
                tracing::warn!(
                    "Ranking weights sum to {}, falling back to default weights",
                    sum
                );
                config.weights = crate::models::MatchWeights::default();
            }
        }
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self {
            config: RankingConfig::default(),
        }
    }

    /// Rank the full catalog with no caller-side eligibility rule
    pub fn rank(&self, intake: &Intake, mentors: Vec<MentorProfile>) -> Ranking {
        self.rank_where(intake, mentors, |_| true)
    }

    /// Rank with a caller-supplied eligibility predicate
    ///
    /// Structural invariants are enforced regardless: a mentor without an id
    /// or without specialties is logged and excluded, never a request
    /// failure.
    pub fn rank_where<F>(&self, intake: &Intake, mentors: Vec<MentorProfile>, eligible: F) -> Ranking
    where
        F: Fn(&MentorProfile) -> bool,
    {
        let mut results: Vec<ScoredMentor> = mentors
            .into_iter()
            .filter(|mentor| {
                if !mentor.is_well_formed() {
                    tracing::warn!(
                        "Excluding malformed mentor (id: {:?}, specialties: {})",
                        mentor.id,
                        mentor.specialties.len()
                    );
                    return false;
                }
                true
            })
            .filter(|mentor| eligible(mentor))
            .map(|mentor| {
                let (scores, reasons) = score_mentor(intake, &mentor, &self.config);
                let total = total_score(&scores, &self.config.weights);

                ScoredMentor {
                    mentor_id: mentor.id,
                    name: mentor.name,
                    title: mentor.title,
                    photo: mentor.photo,
                    linkedin: mentor.linkedin,
                    chais_shared: mentor.chais_shared,
                    scores,
                    match_score: total,
                    match_reasons: assemble_reasons(reasons, self.config.max_reasons),
                    badge: badge_for(total, &self.config),
                }
            })
            .collect();

        let total_eligible = results.len();

        // Deterministic order: score desc, then chais shared desc, then id asc
        results.sort_by(|a, b| {
            b.match_score
                .partial_cmp(&a.match_score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| b.chais_shared.cmp(&a.chais_shared))
                .then_with(|| a.mentor_id.cmp(&b.mentor_id))
        });

        Ranking {
            results,
            total_eligible,
        }
    }
}

impl Default for Ranker {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CareerStage, ConversationVibe, SupportStyle};

    fn create_intake() -> Intake {
        Intake {
            desired_flavor: "career".to_string(),
            career_stage: Some(CareerStage::EarlyCareer),
            current_challenge: None,
            support_style: Some(SupportStyle::LivedExperience),
            preferred_vibe: Some(ConversationVibe::Casual),
            additional_context: None,
        }
    }

    fn create_mentor(id: &str, specialty: &str, stage: &str, style: &str, chais: u32) -> MentorProfile {
        MentorProfile {
            id: id.to_string(),
            name: format!("Mentor {}", id),
            title: "Mentor".to_string(),
            photo: None,
            linkedin: None,
            story: String::new(),
            specialties: vec![specialty.to_string()],
            chais_shared: chais,
            growth_stage: stage.to_string(),
            communication_style: style.to_string(),
        }
    }

    #[test]
    fn test_rank_sorts_by_score() {
        let ranker = Ranker::with_defaults();
        let mentors = vec![
            create_mentor("weak", "Finance", "mid_career", "analytical", 5),
            create_mentor("strong", "Career", "senior", "storyteller", 47),
        ];

        let ranking = ranker.rank(&create_intake(), mentors);

        assert_eq!(ranking.total_eligible, 2);
        assert_eq!(ranking.results[0].mentor_id, "strong");
        assert!(ranking.results[0].match_score > ranking.results[1].match_score);
    }

    #[test]
    fn test_malformed_mentors_excluded_not_fatal() {
        let ranker = Ranker::with_defaults();
        let mut no_specialties = create_mentor("bad", "Career", "senior", "casual", 3);
        no_specialties.specialties.clear();
        let mut no_id = create_mentor("", "Career", "senior", "casual", 3);
        no_id.id = String::new();

        let mentors = vec![
            no_specialties,
            no_id,
            create_mentor("ok", "Career", "senior", "casual", 3),
        ];

        let ranking = ranker.rank(&create_intake(), mentors);

        assert_eq!(ranking.total_eligible, 1);
        assert_eq!(ranking.results.len(), 1);
        assert_eq!(ranking.results[0].mentor_id, "ok");
    }

    #[test]
    fn test_eligibility_predicate_applies() {
        let ranker = Ranker::with_defaults();
        let mentors = vec![
            create_mentor("a", "Career", "senior", "casual", 10),
            create_mentor("b", "Career", "senior", "casual", 0),
        ];

        let ranking = ranker.rank_where(&create_intake(), mentors, |m| m.chais_shared > 0);

        assert_eq!(ranking.total_eligible, 1);
        assert_eq!(ranking.results[0].mentor_id, "a");
    }

    #[test]
    fn test_tie_break_chais_then_id() {
        let ranker = Ranker::with_defaults();
        // Identical profiles except chais within the saturation plateau would
        // differ in engagement, so tie them on everything including chais
        let mentors = vec![
            create_mentor("zeta", "Career", "senior", "storyteller", 10),
            create_mentor("alpha", "Career", "senior", "storyteller", 10),
            create_mentor("mid", "Career", "senior", "storyteller", 20),
        ];

        let ranking = ranker.rank(&create_intake(), mentors);

        // More chais wins the engagement dimension outright
        assert_eq!(ranking.results[0].mentor_id, "mid");
        // Exact ties fall back to id ascending
        assert_eq!(ranking.results[1].mentor_id, "alpha");
        assert_eq!(ranking.results[2].mentor_id, "zeta");
    }

    #[test]
    fn test_no_truncation() {
        let ranker = Ranker::with_defaults();
        let mentors: Vec<MentorProfile> = (0..40)
            .map(|i| create_mentor(&format!("m{:02}", i), "Career", "senior", "casual", i))
            .collect();

        let ranking = ranker.rank(&create_intake(), mentors);

        assert_eq!(ranking.results.len(), 40);
    }

    #[test]
    fn test_empty_catalog_yields_empty_ranking() {
        let ranker = Ranker::with_defaults();
        let ranking = ranker.rank(&create_intake(), vec![]);

        assert!(ranking.results.is_empty());
        assert_eq!(ranking.total_eligible, 0);
    }

    #[test]
    fn test_off_unit_weights_renormalized() {
        use crate::models::{MatchWeights, RankingConfig};

        // Same ratios as the defaults but summing to 0.4; without
        // renormalization a near-perfect mentor would land below every
        // badge threshold
        let mut config = RankingConfig::default();
        config.weights = MatchWeights {
            expertise: 0.14,
            stage: 0.08,
            engagement: 0.06,
            style: 0.08,
            narrative: 0.04,
        };

        let mut intake = create_intake();
        intake.career_stage = Some(CareerStage::MidCareer); // one step behind the mentor

        let strong = create_mentor("strong", "Career", "senior", "storyteller", 47);

        let ranking = Ranker::new(config).rank(&intake, vec![strong.clone()]);
        let baseline = Ranker::with_defaults().rank(&intake, vec![strong]);

        let scaled = &ranking.results[0];
        let expected = &baseline.results[0];
        assert!((scaled.match_score - expected.match_score).abs() < 1e-9);
        assert!(scaled.badge.is_some(), "badge unreachable: {}", scaled.match_score);
    }

    #[test]
    fn test_degenerate_weights_fall_back_to_defaults() {
        use crate::models::{MatchWeights, RankingConfig};

        let mut config = RankingConfig::default();
        config.weights = MatchWeights {
            expertise: 0.0,
            stage: 0.0,
            engagement: 0.0,
            style: 0.0,
            narrative: 0.0,
        };

        let mentors = || vec![create_mentor("m", "Career", "senior", "storyteller", 10)];

        let fixed = Ranker::new(config).rank(&create_intake(), mentors());
        let default = Ranker::with_defaults().rank(&create_intake(), mentors());

        assert_eq!(fixed.results[0].match_score, default.results[0].match_score);
    }
}
