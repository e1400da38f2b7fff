

use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::*,
    tool, tool_handler, tool_router,
    transport::stdio,
    ErrorData as McpError, ServerHandler, ServiceExt,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use crate::core::config::RoundupConfig;
use crate::core::error::RoundupError;
use crate::core::service::RecommendationService;


#[derive(Debug, Deserialize, rmcp::schemars::JsonSchema)]
pub struct RecommendFriendsParams {
    #[schemars(description = "User to recommend friends for")]
    pub user_id: String,
    #[schemars(description = "Max results (default: 10)")]
    pub limit: Option<i32>,
}

#[derive(Debug, Deserialize, rmcp::schemars::JsonSchema)]
pub struct RecommendGroupsParams {
    #[schemars(description = "User to recommend groups for")]
    pub user_id: String,
    #[schemars(description = "Max results (default: 10)")]
    pub limit: Option<i32>,
}

#[derive(Debug, Deserialize, rmcp::schemars::JsonSchema)]
pub struct CompareUsersParams {
    #[schemars(description = "First user identifier")]
    pub user_id: String,
    #[schemars(description = "Second user identifier")]
    pub other_user_id: String,
}


#[derive(Clone)]
pub struct RoundupMcpServer {
    service: Arc<RecommendationService>,
    tool_router: ToolRouter<Self>,
}

impl RoundupMcpServer {
    pub fn new(service: RecommendationService) -> Self {
        Self {
            service: Arc::new(service),
            tool_router: Self::tool_router(),
        }
    }

    fn convert_error(err: RoundupError) -> McpError {
        match err {
            RoundupError::UserNotFound(id) => {
                McpError::invalid_params(format!("User not found: {}", id), None)
            }
            RoundupError::Validation(msg) => McpError::invalid_params(msg, None),
            other => McpError::internal_error(other.to_string(), None),
        }
    }

    fn result_to_json<T: Serialize>(result: T) -> Result<String, McpError> {
        serde_json::to_string_pretty(&result)
            .map_err(|e| McpError::internal_error(e.to_string(), None))
    }
}

/// Negative limits mean "nothing".
fn clamp_limit(limit: Option<i32>) -> Option<usize> {
    limit.map(|l| l.max(0) as usize)
}

#[tool_router]
impl RoundupMcpServer {
    #[tool(description = "Recommend friends by interest similarity. Returns: [{user, score, common_interests}] sorted by score")]
    async fn recommend_friends(
        &self,
        Parameters(params): Parameters<RecommendFriendsParams>,
    ) -> Result<CallToolResult, McpError> {
        info!("Recommending friends for user={} limit={:?}", params.user_id, params.limit);

        let recommendations = self
            .service
            .recommend_friends(&params.user_id, clamp_limit(params.limit))
            .await
            .map_err(Self::convert_error)?;

        info!("Returning {} friend recommendations", recommendations.len());

        let json = Self::result_to_json(&recommendations)?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Recommend groups the user has not joined, scored by mean similarity to members. Returns: {recommendations: [{group, score, member_count}], stats}")]
    async fn recommend_groups(
        &self,
        Parameters(params): Parameters<RecommendGroupsParams>,
    ) -> Result<CallToolResult, McpError> {
        info!("Recommending groups for user={} limit={:?}", params.user_id, params.limit);

        let ranking = self
            .service
            .recommend_groups(&params.user_id, clamp_limit(params.limit))
            .await
            .map_err(Self::convert_error)?;

        info!("Returning {} group recommendations", ranking.recommendations.len());

        let json = Self::result_to_json(&ranking)?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Explain the similarity between two users. Returns: {user_id, other_user_id, breakdown, common_interests}")]
    async fn compare_users(
        &self,
        Parameters(params): Parameters<CompareUsersParams>,
    ) -> Result<CallToolResult, McpError> {
        info!("Comparing {} with {}", params.user_id, params.other_user_id);

        let comparison = self
            .service
            .compare_users(&params.user_id, &params.other_user_id)
            .await
            .map_err(Self::convert_error)?;

        let json = Self::result_to_json(&comparison)?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }
}


#[tool_handler]
impl ServerHandler for RoundupMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "roundup".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            instructions: Some(
                "RoundUp interest matching. Use recommend_friends and recommend_groups to find \
                 similar students and clubs, and compare_users to see why two users match."
                    .to_string(),
            ),
        }
    }
}


pub async fn run_server() -> anyhow::Result<()> {
    info!("Initializing RoundUp MCP Server...");

    let config = RoundupConfig::load()?;
    let service = RecommendationService::from_config(config)?;

    info!("RoundUp MCP Server ready");
    info!("   Source: {}", service.source().source_name());
    info!(
        "   Scoring: school={} near_threshold={} limit={}",
        service.config().scoring.school_match_points,
        service.config().scoring.near_match_threshold,
        service.config().default_limit
    );

    let server = RoundupMcpServer::new(service);
    let service = server.serve(stdio()).await?;
    service.waiting().await?;

    Ok(())
}
