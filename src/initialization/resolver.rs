//! DNS resolver initialization.
//!
//! This module provides functions to initialize a DNS resolver that sends
//! every query to a single upstream server over UDP.

use std::net::SocketAddr;
use std::sync::Arc;

use hickory_resolver::config::{NameServerConfig, Protocol, ResolverConfig, ResolverOpts};
use hickory_resolver::TokioAsyncResolver;

use crate::config::DNS_DIAL_TIMEOUT;
use crate::error_handling::InitializationError;

/// Parses the upstream DNS address (`ip:port`).
///
/// # Errors
///
/// Returns `InitializationError::UpstreamDnsError` if the address is not a
/// socket address literal.
pub fn parse_upstream_addr(addr: &str) -> Result<SocketAddr, InitializationError> {
    addr.parse()
        .map_err(|source| InitializationError::UpstreamDnsError {
            addr: addr.to_string(),
            source,
        })
}

/// Initializes the DNS resolver pinned to `upstream`.
///
/// The system resolver configuration is ignored: no search domains, no
/// additional nameservers. Queries go over UDP with `DNS_DIAL_TIMEOUT`.
///
/// # Returns
///
/// A configured `TokioAsyncResolver` wrapped in `Arc` for sharing across tasks.
pub fn init_upstream_resolver(upstream: SocketAddr) -> Arc<TokioAsyncResolver> {
    let name_server = NameServerConfig::new(upstream, Protocol::Udp);
    let config = ResolverConfig::from_parts(None, vec![], vec![name_server]);

    let mut opts = ResolverOpts::default();
    opts.timeout = DNS_DIAL_TIMEOUT;
    opts.attempts = 1;
    // Hop hosts are always fully qualified
    opts.ndots = 0;

    Arc::new(TokioAsyncResolver::tokio(config, opts))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_upstream_addr_valid() {
        let addr = parse_upstream_addr("1.1.1.1:53").unwrap();
        assert_eq!(addr, "1.1.1.1:53".parse::<SocketAddr>().unwrap());

        let v6 = parse_upstream_addr("[2606:4700:4700::1111]:53").unwrap();
        assert_eq!(v6.port(), 53);
    }

    #[test]
    fn test_parse_upstream_addr_rejects_hostnames() {
        let err = parse_upstream_addr("dns.google:53").unwrap_err();
        assert!(err.to_string().contains("dns.google:53"));
    }

    #[test]
    fn test_parse_upstream_addr_requires_port() {
        assert!(parse_upstream_addr("1.1.1.1").is_err());
    }
}
