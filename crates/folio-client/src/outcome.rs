//! Tagged outcome of a content fetch.

use serde::de::DeserializeOwned;

use crate::client::ClientError;
use crate::graphql::{join_messages, GraphqlError, GraphqlResponse};

/// What a page has to show for one data need.
///
/// `Pending` is the state before the fetch resolves. `Failed` carries the
/// content API's `errors` list; `TransportError` covers everything that kept
/// a usable response from arriving.
#[derive(Debug)]
pub enum FetchOutcome<T> {
    Pending,
    Failed(Vec<GraphqlError>),
    Succeeded(T),
    TransportError(ClientError),
}

impl<T: DeserializeOwned> FetchOutcome<T> {
    /// Fold a raw response into an outcome, decoding `data` as `T`.
    ///
    /// A non-empty `errors` list wins over any `data` that came with it.
    pub fn from_response(result: Result<GraphqlResponse, ClientError>) -> Self {
        let response = match result {
            Ok(response) => response,
            Err(e) => return FetchOutcome::TransportError(e),
        };

        if let Some(errors) = response.errors.filter(|e| !e.is_empty()) {
            return FetchOutcome::Failed(errors);
        }

        match response.data {
            Some(data) => match serde_json::from_value(data) {
                Ok(value) => FetchOutcome::Succeeded(value),
                Err(e) => FetchOutcome::TransportError(ClientError::Shape(e)),
            },
            None => FetchOutcome::TransportError(ClientError::EmptyResponse),
        }
    }
}

impl<T> FetchOutcome<T> {
    /// Transform the success value, keeping every other state.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> FetchOutcome<U> {
        match self {
            FetchOutcome::Pending => FetchOutcome::Pending,
            FetchOutcome::Failed(errors) => FetchOutcome::Failed(errors),
            FetchOutcome::Succeeded(value) => FetchOutcome::Succeeded(f(value)),
            FetchOutcome::TransportError(e) => FetchOutcome::TransportError(e),
        }
    }

    /// Message describing why there is no value, if there is none.
    pub fn failure_message(&self) -> Option<String> {
        match self {
            FetchOutcome::Failed(errors) => Some(join_messages(errors)),
            FetchOutcome::TransportError(e) => Some(e.to_string()),
            FetchOutcome::Pending | FetchOutcome::Succeeded(_) => None,
        }
    }
}

impl<T> Default for FetchOutcome<T> {
    fn default() -> Self {
        FetchOutcome::Pending
    }
}
