//! Connection settings for the content store.

use std::fmt;

/// Base URL of the Contentful GraphQL content API. The space id is appended.
pub const DEFAULT_GRAPHQL_URL: &str = "https://graphql.contentful.com/content/v1/spaces";

/// Immutable connection context handed to [`crate::GraphqlClient`].
///
/// Built once at process start; nothing in the client reads the environment.
#[derive(Clone, PartialEq)]
pub struct ContentConfig {
    /// Endpoint prefix, without the space id
    pub graphql_url: String,

    /// Content store space identifier
    pub space_id: String,

    /// Read-only delivery token
    pub access_token: String,
}

impl ContentConfig {
    /// Configuration for the default endpoint.
    pub fn new(space_id: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            graphql_url: DEFAULT_GRAPHQL_URL.to_string(),
            space_id: space_id.into(),
            access_token: access_token.into(),
        }
    }

    /// Use a different endpoint prefix.
    pub fn with_graphql_url(mut self, graphql_url: impl Into<String>) -> Self {
        self.graphql_url = graphql_url.into();
        self
    }

    /// Read the space id and token from the named environment variables.
    ///
    /// Missing values are logged and left empty; the remote endpoint rejects
    /// the request.
    pub fn from_env(space_id_var: &str, access_token_var: &str) -> Self {
        let read = |var: &str| match std::env::var(var) {
            Ok(value) => value,
            Err(_) => {
                tracing::warn!("{} is not set; content requests will be rejected", var);
                String::new()
            }
        };

        Self::new(read(space_id_var), read(access_token_var))
    }

    /// Full URL queries are posted to.
    pub fn endpoint(&self) -> String {
        format!("{}/{}", self.graphql_url.trim_end_matches('/'), self.space_id)
    }
}

impl fmt::Debug for ContentConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentConfig")
            .field("graphql_url", &self.graphql_url)
            .field("space_id", &self.space_id)
            .field("access_token", &"<redacted>")
            .finish()
    }
}
