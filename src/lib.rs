

pub mod core;
pub mod db;
pub mod mcp;
pub mod toolkit;


pub use crate::core::config::RoundupConfig;
pub use crate::core::error::{Result, RoundupError};
pub use crate::core::models::{CandidateGroup, CandidateUser, CommonInterests, InterestCategory, InterestProfile};
pub use crate::core::service::RecommendationService;
pub use db::{ProfileSource, SnapshotSource, SourceError, SupabaseSource};
pub use toolkit::recommend::{
    CommonInterestsMode, FriendRecommendation, GroupRanking, GroupRecommendation,
    ProfileComparison, RecommendationEngine,
};


pub const SCHOOL_MATCH_POINTS: f64 = 5.0;


pub const NEAR_MATCH_THRESHOLD: f64 = 0.8;


pub const DEFAULT_RECOMMENDATION_LIMIT: usize = 10;
