

pub mod friends;
pub mod groups;
pub mod models;
pub mod ranking;

pub use friends::rank_friends;
pub use groups::rank_groups;
pub use models::{
    CommonInterestsMode, FriendRecommendation, GroupRanking, GroupRankingStats,
    GroupRecommendation, ProfileComparison,
};
pub use ranking::rank_descending;

use tracing::info;

use crate::core::models::{CandidateGroup, CandidateUser, InterestProfile};
use crate::toolkit::matching::{ProfileScorer, ScoringConfig};


/// Stateless scoring engine. Linguistic resources are initialized during
/// construction, so every scoring call on a built engine is pure.
pub struct RecommendationEngine {
    scorer: ProfileScorer,
    common_interests_mode: CommonInterestsMode,
}

impl RecommendationEngine {
    pub fn new(scoring: ScoringConfig, common_interests_mode: CommonInterestsMode) -> Self {
        info!(
            "RecommendationEngine initialized: school_points={}, near_threshold={}, common_interests={}",
            scoring.school_match_points,
            scoring.near_match_threshold,
            <&'static str>::from(common_interests_mode)
        );

        Self {
            scorer: ProfileScorer::new(scoring),
            common_interests_mode,
        }
    }

    pub fn scorer(&self) -> &ProfileScorer {
        &self.scorer
    }

    pub fn common_interests_mode(&self) -> CommonInterestsMode {
        self.common_interests_mode
    }

    pub fn recommend_friends(
        &self,
        target_id: &str,
        candidates: &[CandidateUser],
        limit: usize,
    ) -> Vec<FriendRecommendation> {
        rank_friends(&self.scorer, self.common_interests_mode, target_id, candidates, limit)
    }

    pub fn recommend_groups<'p, F>(
        &self,
        target_id: &str,
        target_profile: &InterestProfile,
        groups: &[CandidateGroup],
        lookup: F,
        limit: usize,
    ) -> GroupRanking
    where
        F: Fn(&str) -> Option<&'p InterestProfile>,
    {
        rank_groups(&self.scorer, target_id, target_profile, groups, lookup, limit)
    }

    pub fn compare(&self, user: &CandidateUser, other: &CandidateUser) -> ProfileComparison {
        ProfileComparison {
            user_id: user.id.clone(),
            other_user_id: other.id.clone(),
            breakdown: self.scorer.breakdown(&user.interests, &other.interests),
            common_interests: self.scorer.common_interests(&user.interests, &other.interests),
        }
    }
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self::new(ScoringConfig::default(), CommonInterestsMode::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::InterestCategory;

    #[test]
    fn test_compare_reports_breakdown_and_common() {
        let engine = RecommendationEngine::default();
        let me = CandidateUser::new(
            "me",
            InterestProfile::builder()
                .school("Lincoln High")
                .category(InterestCategory::Sports, ["soccer", "chess"])
                .build(),
        );
        let other = CandidateUser::new(
            "other",
            InterestProfile::builder()
                .school("Lincoln High")
                .category(InterestCategory::Sports, ["soccer", "tennis"])
                .build(),
        );

        let comparison = engine.compare(&me, &other);
        assert_eq!(comparison.breakdown.total, 6.0);
        assert_eq!(comparison.other_user_id, "other");
        assert_eq!(
            comparison.common_interests.get(InterestCategory::Sports),
            Some(&["soccer".to_string()][..])
        );
    }

    #[test]
    fn test_engines_share_linguistic_resources() {
        let first = RecommendationEngine::default();
        let second = RecommendationEngine::new(ScoringConfig::default(), CommonInterestsMode::TargetEcho);
        assert_eq!(
            first.scorer().normalizer().normalize("Board Games"),
            second.scorer().normalizer().normalize("board game")
        );
        assert_eq!(second.common_interests_mode(), CommonInterestsMode::TargetEcho);
    }
}
