
use serde::{Deserialize, Serialize};
use strum::{EnumString, IntoStaticStr};
use tracing::warn;

use crate::toolkit::matching::ScoringConfig;
use crate::toolkit::recommend::CommonInterestsMode;

use super::error::{Result, RoundupError};


#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, EnumString, IntoStaticStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SourceKind {
    #[default]
    Snapshot,
    Supabase,
}


#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundupConfig {
    pub source: SourceKind,
    pub snapshot_path: Option<String>,

    pub supabase_url: Option<String>,
    pub supabase_anon_key: Option<String>,
    pub timeout_secs: u64,
    /// Retries after the first attempt of a failed request.
    pub max_retries: u32,
    /// Upper bound on member profile fetches in flight during group ranking.
    pub max_parallel_fetches: usize,

    pub default_limit: usize,
    pub scoring: ScoringConfig,
    pub common_interests: CommonInterestsMode,
}

impl RoundupConfig {
    pub fn snapshot(path: impl Into<String>) -> Self {
        Self {
            snapshot_path: Some(path.into()),
            ..Self::default()
        }
    }

    pub fn supabase(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            source: SourceKind::Supabase,
            supabase_url: Some(url.into()),
            supabase_anon_key: Some(anon_key.into()),
            ..Self::default()
        }
    }

    /// Defaults, then an optional `roundup.{toml,yaml,json}` file, then
    /// `ROUNDUP_*` environment variables (`ROUNDUP_SCORING__NEAR_MATCH_THRESHOLD`
    /// for nested keys). Not validated; see [`RoundupConfig::validate`].
    pub fn load() -> Result<Self> {
        Self::load_from("roundup")
    }

    pub fn load_from(file_stem: &str) -> Result<Self> {
        let defaults = Self::default();

        let config: Self = config::Config::builder()
            .set_default("source", <&'static str>::from(defaults.source))?
            .set_default("timeout_secs", defaults.timeout_secs as i64)?
            .set_default("max_retries", defaults.max_retries as i64)?
            .set_default("max_parallel_fetches", defaults.max_parallel_fetches as i64)?
            .set_default("default_limit", defaults.default_limit as i64)?
            .set_default("scoring.school_match_points", defaults.scoring.school_match_points)?
            .set_default("scoring.near_match_threshold", defaults.scoring.near_match_threshold)?
            .set_default("common_interests", <&'static str>::from(defaults.common_interests))?
            .add_source(config::File::with_name(file_stem).required(false))
            .add_source(
                config::Environment::with_prefix("ROUNDUP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Like [`RoundupConfig::load`], falling back to defaults when loading fails.
    pub fn from_env() -> Self {
        Self::load().unwrap_or_else(|e| {
            warn!("Falling back to default configuration: {}", e);
            Self::default()
        })
    }

    pub fn validate(&self) -> Result<()> {
        match self.source {
            SourceKind::Snapshot if self.snapshot_path.as_deref().is_none_or(str::is_empty) => {
                return Err(RoundupError::Config(
                    "snapshot source requires snapshot_path".to_string(),
                ));
            }
            SourceKind::Supabase
                if self.supabase_url.is_none() || self.supabase_anon_key.is_none() =>
            {
                return Err(RoundupError::Config(
                    "supabase source requires supabase_url and supabase_anon_key".to_string(),
                ));
            }
            _ => {}
        }

        if self.max_parallel_fetches == 0 {
            return Err(RoundupError::Config(
                "max_parallel_fetches must be at least 1".to_string(),
            ));
        }

        let threshold = self.scoring.near_match_threshold;
        if !(0.0..=1.0).contains(&threshold) {
            return Err(RoundupError::Config(format!(
                "near_match_threshold must be within [0, 1], got {}",
                threshold
            )));
        }
        if self.scoring.school_match_points < 0.0 {
            return Err(RoundupError::Config(format!(
                "school_match_points must be non-negative, got {}",
                self.scoring.school_match_points
            )));
        }

        Ok(())
    }
}

impl Default for RoundupConfig {
    fn default() -> Self {
        Self {
            source: SourceKind::Snapshot,
            snapshot_path: None,
            supabase_url: None,
            supabase_anon_key: None,
            timeout_secs: 30,
            max_retries: 3,
            max_parallel_fetches: 8,
            default_limit: crate::DEFAULT_RECOMMENDATION_LIMIT,
            scoring: ScoringConfig::default(),
            common_interests: CommonInterestsMode::default(),
        }
    }
}
