//! Entrypoint data structures.

use std::sync::Arc;

use serde::Serialize;
use url::Url;

use crate::chain::{ChainState, Hop};
use crate::error_handling::UnwrapError;
use crate::unwrap::Registry;

/// Shared state for the handlers
#[derive(Clone)]
pub struct AppState {
    /// Registry shared by every request
    pub registry: Arc<Registry>,
    /// Hop limit applied to each walker
    pub max_hops: usize,
}

impl AppState {
    /// Wraps a built registry for the router.
    pub fn new(registry: Arc<Registry>, max_hops: usize) -> Self {
        Self { registry, max_hops }
    }
}

/// JSON response for an unwrap request
#[derive(Debug, Serialize)]
pub struct UnwrapResponse {
    /// Terminal walker state (`success`, `cycle` or `error`)
    pub state: &'static str,
    /// Final destination; `null` unless the chain ended on an unregistered host
    pub result: Option<Url>,
    /// Hops taken, in order
    pub visited: Vec<Hop>,
    /// Why the chain stopped, unless it succeeded
    pub error: Option<ErrorBody>,
}

/// Error part of an [`UnwrapResponse`].
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Snake-case [`ErrorKind`](crate::error_handling::ErrorKind)
    pub kind: &'static str,
    /// Human-readable message
    pub message: String,
    /// Endpoint being queried when the chain broke
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<Url>,
}

impl From<&UnwrapError> for ErrorBody {
    fn from(err: &UnwrapError) -> Self {
        Self {
            kind: err.kind().as_str(),
            message: err.to_string(),
            endpoint: err.endpoint().cloned(),
        }
    }
}

impl UnwrapResponse {
    /// Response for a chain that reached an unregistered host.
    pub fn resolved(result: Url, visited: Vec<Hop>) -> Self {
        Self {
            state: ChainState::Success.as_str(),
            result: Some(result),
            visited,
            error: None,
        }
    }

    /// Response for a chain that stopped in `state` because of `err`.
    pub fn failed(state: ChainState, err: &UnwrapError, visited: Vec<Hop>) -> Self {
        Self {
            state: state.as_str(),
            result: None,
            visited,
            error: Some(ErrorBody::from(err)),
        }
    }
}

/// JSON response for `/_unwrapper/healthz`
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always `ok` while serving
    pub status: &'static str,
    /// Number of registered hosts
    pub unwrappers: usize,
}
