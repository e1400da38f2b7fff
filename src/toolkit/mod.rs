

pub mod matching;
pub mod recommend;


pub use matching::{ProfileScorer, ScoreBreakdown, ScoringConfig, SimilarityScore, TextNormalizer};
pub use recommend::{
    CommonInterestsMode, FriendRecommendation, GroupRanking, GroupRecommendation,
    RecommendationEngine,
};
