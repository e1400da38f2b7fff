use tracing::{debug, info};

use crate::core::models::CandidateUser;
use crate::toolkit::matching::ProfileScorer;

use super::models::{CommonInterestsMode, FriendRecommendation};
use super::ranking::rank_descending;


pub fn rank_friends(
    scorer: &ProfileScorer,
    mode: CommonInterestsMode,
    target_id: &str,
    candidates: &[CandidateUser],
    limit: usize,
) -> Vec<FriendRecommendation> {
    let Some(target) = candidates.iter().find(|c| c.id == target_id) else {
        debug!("Target user {} not among {} candidates", target_id, candidates.len());
        return Vec::new();
    };

    if limit == 0 {
        return Vec::new();
    }

    let scored: Vec<(&CandidateUser, f64)> = candidates
        .iter()
        .filter(|c| c.id != target_id)
        .map(|c| (c, scorer.score(&target.interests, &c.interests)))
        .collect();
    let considered = scored.len();

    let recommendations: Vec<FriendRecommendation> = rank_descending(scored, limit)
        .into_iter()
        .map(|(candidate, score)| {
            let other = match mode {
                CommonInterestsMode::Pairwise => &candidate.interests,
                CommonInterestsMode::TargetEcho => &target.interests,
            };
            FriendRecommendation {
                user: candidate.clone(),
                score,
                common_interests: scorer.common_interests(&target.interests, other),
            }
        })
        .collect();

    info!(
        "Ranked {} friend candidates for {}, returning {}",
        considered,
        target_id,
        recommendations.len()
    );

    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{InterestCategory, InterestProfile};
    use proptest::prelude::*;

    fn user(id: &str, school: &str, sports: &[&str]) -> CandidateUser {
        CandidateUser::new(
            id,
            InterestProfile::builder()
                .school(school)
                .category(InterestCategory::Sports, sports.iter().copied())
                .build(),
        )
    }

    fn fixture() -> Vec<CandidateUser> {
        vec![
            user("me", "Lincoln High", &["soccer", "chess"]),
            user("a", "Roosevelt", &["tennis"]),
            user("b", "Lincoln High", &["soccer", "tennis"]),
            user("c", "Roosevelt", &["soccer"]),
            user("d", "Roosevelt", &["soccer"]),
        ]
    }

    #[test]
    fn test_unknown_target_returns_empty() {
        let scorer = ProfileScorer::default();
        let result = rank_friends(&scorer, CommonInterestsMode::Pairwise, "ghost", &fixture(), 10);
        assert!(result.is_empty());
    }

    #[test]
    fn test_ranks_by_score_with_stable_ties() {
        let scorer = ProfileScorer::default();
        let result = rank_friends(&scorer, CommonInterestsMode::Pairwise, "me", &fixture(), 10);

        let ids: Vec<&str> = result.iter().map(|r| r.user.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c", "d", "a"]);
        assert_eq!(result[0].score, 6.0);
        assert_eq!(result[1].score, 1.0);
        assert_eq!(result[3].score, 0.0);
    }

    #[test]
    fn test_target_is_excluded() {
        let scorer = ProfileScorer::default();
        let result = rank_friends(&scorer, CommonInterestsMode::Pairwise, "me", &fixture(), 10);
        assert!(result.iter().all(|r| r.user.id != "me"));
    }

    #[test]
    fn test_limit_zero_and_truncation() {
        let scorer = ProfileScorer::default();
        let candidates = fixture();
        assert!(rank_friends(&scorer, CommonInterestsMode::Pairwise, "me", &candidates, 0).is_empty());
        assert_eq!(rank_friends(&scorer, CommonInterestsMode::Pairwise, "me", &candidates, 2).len(), 2);
        assert_eq!(rank_friends(&scorer, CommonInterestsMode::Pairwise, "me", &candidates, 99).len(), 4);
    }

    #[test]
    fn test_pairwise_common_interests() {
        let scorer = ProfileScorer::default();
        let result = rank_friends(&scorer, CommonInterestsMode::Pairwise, "me", &fixture(), 1);
        let common = &result[0].common_interests;
        assert_eq!(common.school.as_deref(), Some("Lincoln High"));
        assert_eq!(common.get(InterestCategory::Sports), Some(&["soccer".to_string()][..]));
    }

    #[test]
    fn test_target_echo_common_interests() {
        let scorer = ProfileScorer::default();
        let result = rank_friends(&scorer, CommonInterestsMode::TargetEcho, "me", &fixture(), 4);
        for entry in &result {
            assert_eq!(entry.common_interests.school.as_deref(), Some("Lincoln High"));
            assert_eq!(
                entry.common_interests.get(InterestCategory::Sports),
                Some(&["chess".to_string(), "soccer".to_string()][..])
            );
        }
    }

    proptest! {
        #[test]
        fn prop_truncation_law(n in 0usize..8, limit in 1usize..12) {
            let scorer = ProfileScorer::default();
            let mut candidates = vec![user("target", "Lincoln High", &["soccer"])];
            for i in 0..n {
                candidates.push(user(&format!("u{}", i), "Roosevelt", &["chess"]));
            }
            let result = rank_friends(&scorer, CommonInterestsMode::Pairwise, "target", &candidates, limit);
            prop_assert_eq!(result.len(), limit.min(n));
        }
    }
}
