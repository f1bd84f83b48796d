use crate::models::{Badge, RankingConfig};

/// Map a total score to its display tier
///
/// Great and good thresholds come from configuration, great above good.
/// A mentor below both simply has no badge; it stays in the ranking.
pub fn badge_for(total: f64, config: &RankingConfig) -> Option<Badge> {
    if total >= config.great_badge_min {
        Some(Badge::Great)
    } else if total >= config.good_badge_min {
        Some(Badge::Good)
    } else {
        None
    }
}

/// Assemble the final reasons list from per-dimension reasons
///
/// Reasons arrive in the fixed dimension order (expertise, stage,
/// engagement, style, narrative); duplicates are dropped and the list is
/// capped to keep presentation output short.
pub fn assemble_reasons(reasons: [Option<String>; 5], max_reasons: usize) -> Vec<String> {
    let mut assembled: Vec<String> = Vec::with_capacity(max_reasons);

    for reason in reasons.into_iter().flatten() {
        if assembled.len() >= max_reasons {
            break;
        }
        if !assembled.contains(&reason) {
            assembled.push(reason);
        }
    }

    assembled
}
