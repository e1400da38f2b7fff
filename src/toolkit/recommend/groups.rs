use tracing::{debug, info, warn};

use crate::core::models::{CandidateGroup, InterestProfile};
use crate::toolkit::matching::{ProfileScorer, SimilarityScore};

use super::models::{GroupRanking, GroupRankingStats, GroupRecommendation};
use super::ranking::rank_descending;


/// Rank groups the target does not belong to by the mean pairwise score
/// between the target and each member whose profile `lookup` resolves.
pub fn rank_groups<'p, F>(
    scorer: &ProfileScorer,
    target_id: &str,
    target_profile: &InterestProfile,
    groups: &[CandidateGroup],
    lookup: F,
    limit: usize,
) -> GroupRanking
where
    F: Fn(&str) -> Option<&'p InterestProfile>,
{
    let mut stats = GroupRankingStats::default();
    let mut scored: Vec<(&CandidateGroup, SimilarityScore)> = Vec::with_capacity(groups.len());

    for group in groups {
        if group.has_member(target_id) {
            stats.groups_skipped_membership += 1;
            debug!("Skipping group {}: {} is already a member", group.id, target_id);
            continue;
        }
        stats.groups_considered += 1;

        let mut total = 0.0;
        let mut resolved = 0usize;
        for member_id in &group.members {
            match lookup(member_id) {
                Some(profile) => {
                    total += scorer.score(target_profile, profile);
                    resolved += 1;
                }
                None => {
                    stats.members_unresolved += 1;
                    warn!("Group {}: member {} could not be resolved", group.id, member_id);
                }
            }
        }
        stats.members_resolved += resolved;

        let mean = if resolved == 0 { 0.0 } else { total / resolved as f64 };
        scored.push((group, mean));
    }

    let recommendations: Vec<GroupRecommendation> = rank_descending(scored, limit)
        .into_iter()
        .map(|(group, score)| GroupRecommendation {
            group: group.clone(),
            score,
            member_count: group.member_count(),
        })
        .collect();

    info!(
        "Ranked {} groups for {} ({} skipped, {} unresolved members), returning {}",
        stats.groups_considered,
        target_id,
        stats.groups_skipped_membership,
        stats.members_unresolved,
        recommendations.len()
    );

    GroupRanking {
        recommendations,
        stats,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::InterestCategory;
    use std::collections::HashMap;

    fn profile(school: &str, sports: &[&str]) -> InterestProfile {
        InterestProfile::builder()
            .school(school)
            .category(InterestCategory::Sports, sports.iter().copied())
            .build()
    }

    fn directory() -> HashMap<String, InterestProfile> {
        let mut profiles = HashMap::new();
        profiles.insert("a".to_string(), profile("Lincoln High", &["soccer"]));
        profiles.insert("b".to_string(), profile("Roosevelt", &["soccer", "chess"]));
        profiles.insert("c".to_string(), profile("Roosevelt", &["tennis"]));
        profiles
    }

    fn target() -> InterestProfile {
        profile("Lincoln High", &["soccer", "chess"])
    }

    #[test]
    fn test_mean_of_member_scores() {
        let scorer = ProfileScorer::default();
        let profiles = directory();
        let groups = vec![
            CandidateGroup::new("g1", ["a", "c"]),
            CandidateGroup::new("g2", ["b"]),
        ];

        let ranking = rank_groups(&scorer, "me", &target(), &groups, |id| profiles.get(id), 10);
        let ids: Vec<&str> = ranking.recommendations.iter().map(|r| r.group.id.as_str()).collect();
        assert_eq!(ids, vec!["g1", "g2"]);
        // a: 5 + 1, c: 0 -> mean 3.0; b: 2.
        assert_eq!(ranking.recommendations[0].score, 3.0);
        assert_eq!(ranking.recommendations[0].member_count, 2);
        assert_eq!(ranking.recommendations[1].score, 2.0);
    }

    #[test]
    fn test_member_groups_are_excluded() {
        let scorer = ProfileScorer::default();
        let profiles = directory();
        let groups = vec![
            CandidateGroup::new("mine", ["a", "me"]),
            CandidateGroup::new("other", ["c"]),
        ];

        let ranking = rank_groups(&scorer, "me", &target(), &groups, |id| profiles.get(id), 10);
        assert!(ranking.recommendations.iter().all(|r| r.group.id != "mine"));
        assert_eq!(ranking.stats.groups_skipped_membership, 1);
        assert_eq!(ranking.stats.groups_considered, 1);
    }

    #[test]
    fn test_unresolved_members_are_skipped() {
        let scorer = ProfileScorer::default();
        let profiles = directory();
        let groups = vec![CandidateGroup::new("g1", ["a", "ghost"])];

        let ranking = rank_groups(&scorer, "me", &target(), &groups, |id| profiles.get(id), 10);
        assert_eq!(ranking.recommendations[0].score, 6.0);
        assert_eq!(ranking.recommendations[0].member_count, 2);
        assert_eq!(ranking.stats.members_resolved, 1);
        assert_eq!(ranking.stats.members_unresolved, 1);
    }

    #[test]
    fn test_unresolvable_or_empty_group_scores_zero() {
        let scorer = ProfileScorer::default();
        let profiles = directory();
        let empty: [&str; 0] = [];
        let groups = vec![
            CandidateGroup::new("ghosts", ["x", "y"]),
            CandidateGroup::new("empty", empty),
            CandidateGroup::new("g2", ["b"]),
        ];

        let ranking = rank_groups(&scorer, "me", &target(), &groups, |id| profiles.get(id), 10);
        let ids: Vec<&str> = ranking.recommendations.iter().map(|r| r.group.id.as_str()).collect();
        assert_eq!(ids, vec!["g2", "ghosts", "empty"]);
        assert_eq!(ranking.recommendations[1].score, 0.0);
        assert_eq!(ranking.recommendations[2].member_count, 0);
    }

    #[test]
    fn test_group_limit() {
        let scorer = ProfileScorer::default();
        let profiles = directory();
        let groups: Vec<CandidateGroup> = (0..5)
            .map(|i| CandidateGroup::new(format!("g{}", i), ["a"]))
            .collect();

        let ranking = rank_groups(&scorer, "me", &target(), &groups, |id| profiles.get(id), 3);
        let ids: Vec<&str> = ranking.recommendations.iter().map(|r| r.group.id.as_str()).collect();
        assert_eq!(ids, vec!["g0", "g1", "g2"]);

        let none = rank_groups(&scorer, "me", &target(), &groups, |id| profiles.get(id), 0);
        assert!(none.recommendations.is_empty());
    }
}
