//! Global ranking of section candidates.

use crate::model::{RankedSection, SectionCandidate};

/// Sort candidates by weighted score (highest first) and assign 1-based
/// ranks.
///
/// The sort is stable, so candidates with equal scores keep their
/// encounter order. Scores are dropped from the output.
pub fn rank(mut candidates: Vec<SectionCandidate>) -> Vec<RankedSection> {
    candidates.sort_by(|a, b| b.weighted_score.cmp(&a.weighted_score));
    candidates
        .into_iter()
        .enumerate()
        .map(|(i, candidate)| candidate.into_ranked(i + 1))
        .collect()
}
