use serde::{Deserialize, Serialize};
use strum::{EnumString, IntoStaticStr};

use crate::core::models::{CandidateGroup, CandidateUser, CommonInterests};
use crate::toolkit::matching::{ScoreBreakdown, SimilarityScore};


/// Which pair of profiles feeds the `common_interests` of a friend entry.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, EnumString, IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CommonInterestsMode {
    /// Target versus candidate.
    #[default]
    Pairwise,
    /// Target versus itself, as the legacy backend produced.
    TargetEcho,
}


#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FriendRecommendation {
    pub user: CandidateUser,
    pub score: SimilarityScore,
    pub common_interests: CommonInterests,
}


#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupRecommendation {
    pub group: CandidateGroup,
    pub score: SimilarityScore,
    pub member_count: usize,
}


#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupRankingStats {
    pub groups_considered: usize,
    pub groups_skipped_membership: usize,
    pub members_resolved: usize,
    pub members_unresolved: usize,
}


#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupRanking {
    pub recommendations: Vec<GroupRecommendation>,
    pub stats: GroupRankingStats,
}


#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileComparison {
    pub user_id: String,
    pub other_user_id: String,
    pub breakdown: ScoreBreakdown,
    pub common_interests: CommonInterests,
}
