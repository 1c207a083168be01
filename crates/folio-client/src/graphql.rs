//! GraphQL request and response envelopes.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Body of a GraphQL POST: `{"query": ..., "variables"?: {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphqlRequest {
    pub query: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<Map<String, Value>>,
}

impl GraphqlRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            variables: None,
        }
    }

    /// Bind a query variable.
    pub fn with_variable(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.variables
            .get_or_insert_with(Map::new)
            .insert(name.to_string(), value.into());
        self
    }
}

/// Parsed response body. Either field may be absent, and both may be present.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GraphqlResponse {
    #[serde(default)]
    pub data: Option<Value>,

    #[serde(default)]
    pub errors: Option<Vec<GraphqlError>>,
}

impl GraphqlResponse {
    /// Errors reported by the API, empty when there are none.
    pub fn error_list(&self) -> &[GraphqlError] {
        self.errors.as_deref().unwrap_or_default()
    }
}

/// One entry of the `errors` list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphqlError {
    pub message: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Value>,
}

impl GraphqlError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            extensions: None,
        }
    }
}

/// Error messages joined with `,`, the way list pages display them.
pub fn join_messages(errors: &[GraphqlError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join(",")
}
