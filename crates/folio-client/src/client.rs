//! HTTP client for the content store's GraphQL endpoint.

use async_trait::async_trait;
use folio_content::queries::{
    PORTFOLIO_ITEM_QUERY, PORTFOLIO_LIST_QUERY, SKILLS_QUERY, SLUG_VARIABLE,
};
use folio_content::{Lookup, PortfolioDetailData, PortfolioItem, PortfolioListData, SkillsData};

use crate::config::ContentConfig;
use crate::graphql::{GraphqlRequest, GraphqlResponse};
use crate::outcome::FetchOutcome;

/// Longest slice of a non-JSON error body kept in [`ClientError::Status`].
const MAX_ERROR_BODY: usize = 512;

/// Errors that keep a usable GraphQL response from arriving.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Content API request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Content API returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Content API returned a non-JSON body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Content API data did not match the expected shape: {0}")]
    Shape(serde_json::Error),

    #[error("Content API returned neither data nor errors")]
    EmptyResponse,
}

/// Anything that can answer a GraphQL request.
///
/// [`GraphqlClient`] talks to the real endpoint; tests substitute in-memory
/// sources.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Send one request and return the parsed response body.
    async fn execute(&self, request: &GraphqlRequest) -> Result<GraphqlResponse, ClientError>;
}

/// GraphQL client bound to one space.
#[derive(Debug, Clone)]
pub struct GraphqlClient {
    config: ContentConfig,
    http: reqwest::Client,
}

impl GraphqlClient {
    pub fn new(config: ContentConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl ContentSource for GraphqlClient {
    async fn execute(&self, request: &GraphqlRequest) -> Result<GraphqlResponse, ClientError> {
        let endpoint = self.config.endpoint();
        tracing::debug!(
            "POST {} variables={}",
            endpoint,
            request
                .variables
                .as_ref()
                .map(|v| serde_json::Value::Object(v.clone()).to_string())
                .unwrap_or_else(|| "none".to_string())
        );

        let response = self
            .http
            .post(&endpoint)
            .bearer_auth(&self.config.access_token)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;
        tracing::debug!("Content API answered HTTP {} ({} bytes)", status, body.len());

        let parsed: GraphqlResponse = match serde_json::from_slice(&body) {
            Ok(parsed) => parsed,
            Err(e) if status.is_success() => return Err(ClientError::Decode(e)),
            Err(_) => {
                return Err(ClientError::Status {
                    status: status.as_u16(),
                    body: truncate(&String::from_utf8_lossy(&body)),
                })
            }
        };

        // Error statuses are fine as long as the body says what went wrong.
        if !status.is_success() && parsed.error_list().is_empty() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                body: truncate(&String::from_utf8_lossy(&body)),
            });
        }

        Ok(parsed)
    }
}

fn truncate(body: &str) -> String {
    match body.char_indices().nth(MAX_ERROR_BODY) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

fn log_outcome<T>(what: &str, outcome: &FetchOutcome<T>) {
    if let Some(message) = outcome.failure_message() {
        tracing::warn!("{} query failed: {}", what, message);
    }
}

/// Fetch every skill.
pub async fn fetch_skills(source: &dyn ContentSource) -> FetchOutcome<SkillsData> {
    let request = GraphqlRequest::new(SKILLS_QUERY);
    let outcome = FetchOutcome::from_response(source.execute(&request).await);
    log_outcome("Skills", &outcome);
    outcome
}

/// Fetch the summary of every portfolio entry.
pub async fn fetch_portfolio_list(source: &dyn ContentSource) -> FetchOutcome<PortfolioListData> {
    let request = GraphqlRequest::new(PORTFOLIO_LIST_QUERY);
    let outcome = FetchOutcome::from_response(source.execute(&request).await);
    log_outcome("Portfolio list", &outcome);
    outcome
}

/// Fetch one portfolio entry by slug.
///
/// An empty result is `Succeeded(Lookup::NotFound)`.
pub async fn fetch_portfolio_item(
    source: &dyn ContentSource,
    slug: &str,
) -> FetchOutcome<Lookup<PortfolioItem>> {
    let request = GraphqlRequest::new(PORTFOLIO_ITEM_QUERY).with_variable(SLUG_VARIABLE, slug);
    let outcome: FetchOutcome<PortfolioDetailData> =
        FetchOutcome::from_response(source.execute(&request).await);
    log_outcome("Portfolio item", &outcome);
    outcome.map(|data| data.into_lookup(slug))
}
