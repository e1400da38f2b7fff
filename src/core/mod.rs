

pub mod config;
pub mod error;
pub mod models;
pub mod service;

pub use config::{RoundupConfig, SourceKind};
pub use error::{Result, RoundupError};
pub use models::{
    CandidateGroup, CandidateUser, CommonInterests, InterestCategory, InterestProfile,
    InterestProfileBuilder,
};
pub use service::RecommendationService;
