//! HTTP client initialization.
//!
//! This module provides the client used for hop lookups.

use std::sync::Arc;

use hickory_resolver::TokioAsyncResolver;
use reqwest::ClientBuilder;

use crate::config::{HOP_TIMEOUT, USER_AGENT};
use crate::dns::UpstreamDns;

/// Initializes the HTTP client used for single-hop lookups.
///
/// Creates a `reqwest::Client` configured with:
/// - Redirects disabled, so every 3xx is returned for inspection
/// - Host lookups routed through `resolver` (the pinned upstream DNS)
/// - Environment proxies ignored, since a proxy would do its own DNS
/// - `HOP_TIMEOUT` as the overall request timeout
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_hop_client(
    resolver: Arc<TokioAsyncResolver>,
) -> Result<reqwest::Client, reqwest::Error> {
    ClientBuilder::new()
        .redirect(reqwest::redirect::Policy::none())
        .dns_resolver(Arc::new(UpstreamDns::new(resolver)))
        .no_proxy()
        .timeout(HOP_TIMEOUT)
        .user_agent(USER_AGENT)
        .build()
}
