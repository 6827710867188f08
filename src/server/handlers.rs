//! Entrypoint HTTP handlers.

use axum::{
    extract::State,
    http::{header::HOST, HeaderMap, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use log::{info, warn};
use serde::Serialize;
use url::Url;

use super::types::{AppState, HealthResponse, UnwrapResponse};
use crate::chain::{ChainState, Walker};
use crate::error_handling::UnwrapError;

const X_FORWARDED_HOST: &str = "x-forwarded-host";

/// Unwraps the URL addressed by this request and reports the chain.
///
/// - 200: the chain reached an unregistered host
/// - 400: no initiating host, or the host has no unwrapper
/// - 508: the chain looped
/// - 502: a hop failed or the hop limit was reached
pub async fn unwrap_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    uri: Uri,
) -> Response {
    let initial = match initiating_url(&headers, &uri) {
        Some(url) => url,
        None => {
            warn!("Rejecting request without a usable host: {}", uri);
            let err = UnwrapError::NoResolverFound {
                host: String::new(),
            };
            return render(StatusCode::BAD_REQUEST, &UnwrapResponse::failed(ChainState::Error, &err, vec![]));
        }
    };

    let mut walker = match Walker::new(initial, &state.registry) {
        Ok(walker) => walker.with_max_hops(state.max_hops),
        Err(e) => {
            warn!("Failed to start chain: {}", e);
            return render(StatusCode::BAD_REQUEST, &UnwrapResponse::failed(ChainState::Error, &e, vec![]));
        }
    };

    let outcome = walker.run().await;
    let visited = walker.hops().to_vec();

    match outcome {
        ChainState::Success => {
            info!("Completed processing request");
            render(
                StatusCode::OK,
                &UnwrapResponse::resolved(walker.final_url().clone(), visited),
            )
        }
        ChainState::Cycle => {
            let endpoint = walker
                .cycle_endpoint()
                .unwrap_or(walker.final_url())
                .clone();
            let err = UnwrapError::CycleDetected { endpoint };
            render(
                StatusCode::LOOP_DETECTED,
                &UnwrapResponse::failed(outcome, &err, visited),
            )
        }
        _ => match walker.error() {
            Some(err) => {
                warn!("Failed to unwrap: {}", err);
                render(
                    StatusCode::BAD_GATEWAY,
                    &UnwrapResponse::failed(outcome, err, visited),
                )
            }
            None => {
                // run() only returns terminal states; Error always carries an error
                let err = UnwrapError::LookupFailed {
                    endpoint: walker.final_url().clone(),
                };
                render(
                    StatusCode::BAD_GATEWAY,
                    &UnwrapResponse::failed(outcome, &err, visited),
                )
            }
        },
    }
}

/// Liveness endpoint
pub async fn health_handler(State(state): State<AppState>) -> Response {
    render(
        StatusCode::OK,
        &HealthResponse {
            status: "ok",
            unwrappers: state.registry.len(),
        },
    )
}

/// `https://{host}{path}?{query}` where host comes from `X-Forwarded-Host`,
/// falling back to `Host`.
fn initiating_url(headers: &HeaderMap, uri: &Uri) -> Option<Url> {
    let host = headers
        .get(X_FORWARDED_HOST)
        .or_else(|| headers.get(HOST))
        .and_then(|value| value.to_str().ok())
        // A proxy chain appends hosts; the first is the client-facing one
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|host| !host.is_empty())?;

    let path_and_query = uri.path_and_query().map(|p| p.as_str()).unwrap_or("/");
    Url::parse(&format!("https://{}{}", host, path_and_query)).ok()
}

fn render<T: Serialize>(status: StatusCode, body: &T) -> Response {
    match serde_json::to_string_pretty(body) {
        Ok(json) => (status, [("content-type", "application/json")], json).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to serialize response: {}", e),
        )
            .into_response(),
    }
}
