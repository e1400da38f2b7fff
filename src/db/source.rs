

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use crate::core::models::{CandidateGroup, CandidateUser};


#[derive(Debug, Error)]
pub enum SourceError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Snapshot error: {0}")]
    Snapshot(String),

    #[error("Retry exhausted after {0} attempts: {1}")]
    RetryExhausted(u32, String),
}


/// Read-only access to stored profiles and groups.
///
/// `fetch_profile` answers `Ok(None)` for an unknown user; any `Err` means
/// the source itself could not be read.
#[async_trait]
pub trait ProfileSource: Send + Sync {
    async fn fetch_all_profiles(&self) -> Result<Vec<CandidateUser>, SourceError>;

    async fn fetch_profile(&self, user_id: &str) -> Result<Option<CandidateUser>, SourceError>;

    /// Groups with their member id lists filled in.
    async fn fetch_all_groups(&self) -> Result<Vec<CandidateGroup>, SourceError>;

    fn source_name(&self) -> &str;
}


#[async_trait]
impl ProfileSource for Arc<dyn ProfileSource> {
    async fn fetch_all_profiles(&self) -> Result<Vec<CandidateUser>, SourceError> {
        (**self).fetch_all_profiles().await
    }

    async fn fetch_profile(&self, user_id: &str) -> Result<Option<CandidateUser>, SourceError> {
        (**self).fetch_profile(user_id).await
    }

    async fn fetch_all_groups(&self) -> Result<Vec<CandidateGroup>, SourceError> {
        (**self).fetch_all_groups().await
    }

    fn source_name(&self) -> &str {
        (**self).source_name()
    }
}
