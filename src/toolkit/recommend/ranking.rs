
use std::cmp::Ordering;

use crate::toolkit::matching::SimilarityScore;


/// Sort by descending score, keeping input order among ties, then keep the
/// first `limit` entries.
pub fn rank_descending<T>(
    mut scored: Vec<(T, SimilarityScore)>,
    limit: usize,
) -> Vec<(T, SimilarityScore)> {
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    scored.truncate(limit);
    scored
}
