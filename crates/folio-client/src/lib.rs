//! Fetch adapter for the folio content store.
//!
//! Sends GraphQL queries to the configured endpoint and folds each response
//! into a [`FetchOutcome`] that page renderers handle exhaustively.

pub mod client;
pub mod config;
pub mod graphql;
pub mod outcome;

pub use client::{
    fetch_portfolio_item, fetch_portfolio_list, fetch_skills, ClientError, ContentSource,
    GraphqlClient,
};
pub use config::{ContentConfig, DEFAULT_GRAPHQL_URL};
pub use graphql::{join_messages, GraphqlError, GraphqlRequest, GraphqlResponse};
pub use outcome::FetchOutcome;
