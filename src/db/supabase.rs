

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use crate::core::models::{CandidateGroup, CandidateUser, InterestProfile};

use super::source::{ProfileSource, SourceError};


const INITIAL_RETRY_DELAY_MS: u64 = 100;

const MAX_RETRY_DELAY_MS: u64 = 10000;

const PROFILES_TABLE: &str = "profiles";
const GROUPS_TABLE: &str = "groups";
const MEMBERS_TABLE: &str = "group_members";


/// A `profiles` row. Interests come either from an `interests` JSON column or
/// from one column per category (`school`, `clubs`, `video_games`, ...).
#[derive(Deserialize)]
struct ProfileRow {
    id: String,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    interests: Option<InterestProfile>,
    #[serde(flatten)]
    columns: InterestProfile,
}

impl From<ProfileRow> for CandidateUser {
    fn from(row: ProfileRow) -> Self {
        Self {
            id: row.id,
            display_name: row.display_name,
            interests: row.interests.unwrap_or(row.columns),
        }
    }
}


#[derive(Deserialize)]
struct MembershipRow {
    group_id: String,
    user_id: String,
}


/// Profile source reading the `profiles`, `groups` and `group_members`
/// tables through Supabase's PostgREST endpoint.
pub struct SupabaseSource {
    client: Client,
    rest_url: Url,
    api_key: String,
    max_retries: u32,
}

impl SupabaseSource {
    pub fn new(
        base_url: &str,
        api_key: impl Into<String>,
        timeout_secs: u64,
        max_retries: u32,
    ) -> Result<Self, SourceError> {
        let rest_url = Url::parse(base_url)
            .and_then(|u| u.join("rest/v1/"))
            .map_err(|e| SourceError::InvalidUrl(format!("{}: {}", base_url, e)))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        info!("SupabaseSource created for {}", rest_url);

        Ok(Self {
            client,
            rest_url,
            api_key: api_key.into(),
            max_retries,
        })
    }

    pub fn rest_url(&self) -> &Url {
        &self.rest_url
    }

    fn table_url(&self, table: &str, query: &[(&str, &str)]) -> Result<Url, SourceError> {
        let mut url = self
            .rest_url
            .join(table)
            .map_err(|e| SourceError::InvalidUrl(format!("{}: {}", table, e)))?;
        url.query_pairs_mut().extend_pairs(query);
        Ok(url)
    }

    async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, &str)],
    ) -> Result<Vec<T>, SourceError> {
        let url = self.table_url(table, query)?;
        with_retry(self.max_retries, url.as_str(), || self.get_once(&url)).await
    }

    async fn get_once<T: DeserializeOwned>(&self, url: &Url) -> Result<Vec<T>, SourceError> {
        let response = self
            .client
            .get(url.clone())
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}


/// Run `op` once, then up to `max_retries` more times while it fails with a
/// retryable error, doubling the delay between attempts.
async fn with_retry<T, F, Fut>(max_retries: u32, label: &str, mut op: F) -> Result<T, SourceError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, SourceError>>,
{
    let attempts = max_retries.saturating_add(1);
    let mut last_error = None;
    let mut delay = Duration::from_millis(INITIAL_RETRY_DELAY_MS);

    for attempt in 1..=attempts {
        debug!("GET {} (attempt {})", label, attempt);

        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if !is_retryable(&e) => return Err(e),
            Err(e) => {
                warn!("GET {} failed (attempt {}/{}): {}", label, attempt, attempts, e);
                last_error = Some(e.to_string());

                if attempt < attempts {
                    tokio::time::sleep(delay).await;
                    delay = (delay * 2).min(Duration::from_millis(MAX_RETRY_DELAY_MS));
                }
            }
        }
    }

    Err(SourceError::RetryExhausted(
        attempts,
        last_error.unwrap_or_else(|| "Unknown error".to_string()),
    ))
}


fn is_retryable(err: &SourceError) -> bool {
    match err {
        SourceError::Status { status, .. } => {
            let status = StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            status.is_server_error()
                || status == StatusCode::REQUEST_TIMEOUT
                || status == StatusCode::TOO_MANY_REQUESTS
        }
        SourceError::Http(_) => true,
        _ => false,
    }
}


fn attach_members(groups: &mut [CandidateGroup], memberships: Vec<MembershipRow>) {
    let mut by_group: HashMap<String, Vec<String>> = HashMap::new();
    for row in memberships {
        by_group.entry(row.group_id).or_default().push(row.user_id);
    }
    for group in groups.iter_mut() {
        group.members = by_group.remove(&group.id).unwrap_or_default();
    }
}

#[async_trait]
impl ProfileSource for SupabaseSource {
    async fn fetch_all_profiles(&self) -> Result<Vec<CandidateUser>, SourceError> {
        let rows: Vec<ProfileRow> = self.select(PROFILES_TABLE, &[("select", "*")]).await?;
        let users: Vec<CandidateUser> = rows.into_iter().map(CandidateUser::from).collect();
        debug!("Fetched {} profiles", users.len());
        Ok(users)
    }

    async fn fetch_profile(&self, user_id: &str) -> Result<Option<CandidateUser>, SourceError> {
        let filter = format!("eq.{}", user_id);
        let rows: Vec<ProfileRow> = self
            .select(PROFILES_TABLE, &[("select", "*"), ("id", filter.as_str())])
            .await?;
        Ok(rows.into_iter().next().map(CandidateUser::from))
    }

    async fn fetch_all_groups(&self) -> Result<Vec<CandidateGroup>, SourceError> {
        let mut groups: Vec<CandidateGroup> = self.select(GROUPS_TABLE, &[("select", "*")]).await?;
        let memberships: Vec<MembershipRow> = self
            .select(MEMBERS_TABLE, &[("select", "group_id,user_id")])
            .await?;
        attach_members(&mut groups, memberships);
        debug!("Fetched {} groups", groups.len());
        Ok(groups)
    }

    fn source_name(&self) -> &str {
        "supabase"
    }
}
