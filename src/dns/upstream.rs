//! Upstream-pinned DNS resolver for reqwest.
//!
//! Implements `reqwest::dns::Resolve` by delegating to a `hickory-resolver`
//! configured with a single upstream nameserver.

use std::net::SocketAddr;
use std::sync::Arc;

use hickory_resolver::TokioAsyncResolver;
use log::debug;
use reqwest::dns::{Addrs, Name, Resolve, Resolving};

use crate::error_handling::BoxError;

/// A DNS resolver that sends every lookup to the upstream server.
#[derive(Clone)]
pub struct UpstreamDns {
    resolver: Arc<TokioAsyncResolver>,
}

impl UpstreamDns {
    /// Wraps an already configured resolver.
    pub fn new(resolver: Arc<TokioAsyncResolver>) -> Self {
        Self { resolver }
    }
}

impl Resolve for UpstreamDns {
    fn resolve(&self, name: Name) -> Resolving {
        let resolver = Arc::clone(&self.resolver);
        Box::pin(async move {
            let lookup = resolver
                .lookup_ip(name.as_str())
                .await
                .map_err(|e| -> BoxError { Box::new(e) })?;

            // reqwest replaces the port with the one from the request URL
            let addrs: Vec<SocketAddr> = lookup.iter().map(|ip| SocketAddr::new(ip, 0)).collect();
            debug!("Resolved {} to {:?}", name.as_str(), addrs);

            let addrs: Addrs = Box::new(addrs.into_iter());
            Ok(addrs)
        })
    }
}
