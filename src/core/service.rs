
use futures::stream::{self, StreamExt, TryStreamExt};
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use tracing::{debug, info};

use crate::db::{ProfileSource, SnapshotSource, SupabaseSource};
use crate::toolkit::recommend::{
    FriendRecommendation, GroupRanking, ProfileComparison, RecommendationEngine,
};

use super::config::{RoundupConfig, SourceKind};
use super::error::{Result, RoundupError};
use super::models::CandidateUser;


/// Recommendation entry point: pulls profiles from a [`ProfileSource`] and
/// hands them to the scoring engine.
pub struct RecommendationService {
    engine: RecommendationEngine,
    config: RoundupConfig,
    source: Arc<dyn ProfileSource>,
}

impl RecommendationService {
    pub fn new(config: RoundupConfig, source: Arc<dyn ProfileSource>) -> Self {
        let engine = RecommendationEngine::new(config.scoring, config.common_interests);
        info!("RecommendationService using {} source", source.source_name());

        Self {
            engine,
            config,
            source,
        }
    }

    pub fn from_config(config: RoundupConfig) -> Result<Self> {
        config.validate()?;

        let source: Arc<dyn ProfileSource> = match config.source {
            SourceKind::Snapshot => {
                let path = config.snapshot_path.as_deref().ok_or_else(|| {
                    RoundupError::Config("snapshot_path is not set".to_string())
                })?;
                Arc::new(SnapshotSource::from_path(path)?)
            }
            SourceKind::Supabase => {
                let (url, key) = config
                    .supabase_url
                    .as_deref()
                    .zip(config.supabase_anon_key.as_deref())
                    .ok_or_else(|| {
                        RoundupError::Config("supabase credentials are not set".to_string())
                    })?;
                Arc::new(SupabaseSource::new(
                    url,
                    key,
                    config.timeout_secs,
                    config.max_retries,
                )?)
            }
        };

        Ok(Self::new(config, source))
    }

    pub fn engine(&self) -> &RecommendationEngine {
        &self.engine
    }

    pub fn config(&self) -> &RoundupConfig {
        &self.config
    }

    pub fn source(&self) -> &Arc<dyn ProfileSource> {
        &self.source
    }

    fn resolve_limit(&self, limit: Option<usize>) -> usize {
        limit.unwrap_or(self.config.default_limit)
    }

    /// Unknown users get an empty list.
    pub async fn recommend_friends(
        &self,
        user_id: &str,
        limit: Option<usize>,
    ) -> Result<Vec<FriendRecommendation>> {
        let limit = self.resolve_limit(limit);
        let candidates = self.source.fetch_all_profiles().await?;
        debug!("Scoring {} candidates for {}", candidates.len(), user_id);

        Ok(self.engine.recommend_friends(user_id, &candidates, limit))
    }

    /// Unknown users get an empty ranking. Member profiles are only fetched
    /// for groups the user has not joined, at most `max_parallel_fetches`
    /// at a time.
    pub async fn recommend_groups(
        &self,
        user_id: &str,
        limit: Option<usize>,
    ) -> Result<GroupRanking> {
        let limit = self.resolve_limit(limit);

        let Some(target) = self.source.fetch_profile(user_id).await? else {
            info!("No profile for {}, returning no groups", user_id);
            return Ok(GroupRanking::default());
        };

        let groups = self.source.fetch_all_groups().await?;

        let member_ids: BTreeSet<&str> = groups
            .iter()
            .filter(|g| !g.has_member(user_id))
            .flat_map(|g| g.members.iter().map(String::as_str))
            .collect();

        debug!(
            "Resolving {} member profiles across {} groups",
            member_ids.len(),
            groups.len()
        );

        let fetched: Vec<Option<CandidateUser>> = stream::iter(member_ids)
            .map(|id| self.source.fetch_profile(id))
            .buffer_unordered(self.config.max_parallel_fetches.max(1))
            .boxed()
            .try_collect()
            .await?;

        let profiles: HashMap<String, CandidateUser> = fetched
            .into_iter()
            .flatten()
            .map(|user| (user.id.clone(), user))
            .collect();

        Ok(self.engine.recommend_groups(
            user_id,
            &target.interests,
            &groups,
            |id| profiles.get(id).map(|u| &u.interests),
            limit,
        ))
    }

    pub async fn compare_users(&self, user_id: &str, other_id: &str) -> Result<ProfileComparison> {
        let (user, other) = futures::try_join!(
            self.source.fetch_profile(user_id),
            self.source.fetch_profile(other_id)
        )?;

        let user = user.ok_or_else(|| RoundupError::UserNotFound(user_id.to_string()))?;
        let other = other.ok_or_else(|| RoundupError::UserNotFound(other_id.to_string()))?;

        Ok(self.engine.compare(&user, &other))
    }
}
