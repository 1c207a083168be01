//! Build-time route discovery and per-route data resolution.

use std::sync::LazyLock;

use folio_client::{
    fetch_portfolio_item, fetch_portfolio_list, join_messages, ContentSource, FetchOutcome,
};
use folio_content::{Lookup, PortfolioItem, PortfolioSummary};
use regex::Regex;

use crate::builder::BuildError;

/// Slugs become directory names, so only URL- and filesystem-safe characters pass.
static SLUG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]{1,200}$").expect("slug pattern compiles"));

/// One generated detail route.
#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioRoute {
    pub slug: String,
    /// Site-relative URL path, e.g. `/portfolio/tracker/`
    pub path: String,
    pub summary: PortfolioSummary,
}

/// Data handed to the detail page renderer for one route.
#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioProps {
    pub slug: String,
    pub item: Lookup<PortfolioItem>,
}

pub fn is_valid_slug(slug: &str) -> bool {
    SLUG_PATTERN.is_match(slug)
}

/// Unwrap a build-time fetch. Anything but success aborts the build.
fn require<T>(outcome: FetchOutcome<T>, query: &'static str) -> Result<T, BuildError> {
    match outcome {
        FetchOutcome::Succeeded(data) => Ok(data),
        FetchOutcome::Failed(errors) => Err(BuildError::ContentError {
            query,
            messages: join_messages(&errors),
        }),
        FetchOutcome::TransportError(source) => Err(BuildError::TransportError { query, source }),
        FetchOutcome::Pending => Err(BuildError::Unresolved(query)),
    }
}

/// Fetch every portfolio slug and map each to its detail route.
///
/// Routes come back sorted by the entries' `order` key; entries without one
/// go last, keeping store order among themselves.
pub async fn enumerate_portfolio_paths(
    source: &dyn ContentSource,
) -> Result<Vec<PortfolioRoute>, BuildError> {
    let data = require(fetch_portfolio_list(source).await, "portfolio list")?;

    let mut summaries = data.portfolio_collection.items;
    summaries.sort_by_key(|s| s.order.unwrap_or(i64::MAX));

    summaries
        .into_iter()
        .map(|summary| {
            if !is_valid_slug(&summary.slug) {
                return Err(BuildError::InvalidSlug(summary.slug));
            }

            Ok(PortfolioRoute {
                slug: summary.slug.clone(),
                path: format!("/portfolio/{}/", summary.slug),
                summary,
            })
        })
        .collect()
}

/// Fetch the detail payload for one slug.
pub async fn resolve_portfolio_props(
    source: &dyn ContentSource,
    slug: &str,
) -> Result<PortfolioProps, BuildError> {
    let item = require(fetch_portfolio_item(source, slug).await, "portfolio item")?;
    tracing::debug!("Resolved props for '{}' (found: {})", slug, item.is_found());

    Ok(PortfolioProps {
        slug: slug.to_string(),
        item,
    })
}
