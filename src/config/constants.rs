//! Configuration constants.
//!
//! This module defines the constants used throughout the application,
//! including timeouts, hop limits, and listener defaults.

use std::time::Duration;

/// Default port for the HTTP entrypoint
pub const DEFAULT_PORT: u16 = 8080;
/// Default bind address for the HTTP entrypoint
pub const DEFAULT_BIND: &str = "0.0.0.0";

/// Default upstream DNS server (Cloudflare)
pub const DEFAULT_UPSTREAM_DNS: &str = "1.1.1.1:53";

// Network operation timeouts
/// Overall timeout for a single hop request (connect, TLS, headers)
pub const HOP_TIMEOUT: Duration = Duration::from_secs(3);
/// Dial timeout for queries against the upstream DNS server
pub const DNS_DIAL_TIMEOUT: Duration = Duration::from_secs(5);

// Redirect handling
/// Maximum number of hops a single chain may record.
/// Backstop for long chains that never repeat an endpoint.
pub const MAX_HOPS: usize = 10;

/// User-Agent sent with every hop request.
pub const USER_AGENT: &str = concat!("link_unwrapper/", env!("CARGO_PKG_VERSION"));

/// Reserved path prefix for service endpoints that are not unwrap requests.
pub const SERVICE_PATH_PREFIX: &str = "/_unwrapper";
