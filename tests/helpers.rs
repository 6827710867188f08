// Shared test helpers for probe stubs and service setup.
//
// This module provides common utilities used across multiple test files to reduce duplication.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use futures::future::BoxFuture;
use tokio::net::TcpListener;
use url::Url;

use link_unwrapper::error_handling::BoxError;
use link_unwrapper::server::serve;
use link_unwrapper::{AppState, Probe, Registry, ResolverConfig};

/// Probe that answers from a fixed endpoint -> `Location` table.
/// Unknown endpoints answer without a `Location` header.
#[derive(Default)]
pub struct RouteProbe {
    routes: HashMap<String, String>,
}

impl RouteProbe {
    pub fn route(mut self, endpoint: &str, location: &str) -> Self {
        self.routes.insert(endpoint.to_string(), location.to_string());
        self
    }
}

impl Probe for RouteProbe {
    fn probe<'a>(&'a self, endpoint: &'a Url) -> BoxFuture<'a, Result<Option<String>, BoxError>> {
        Box::pin(async move { Ok(self.routes.get(endpoint.as_str()).cloned()) })
    }
}

/// Creates a registry for `hosts` backed by `probe`.
pub fn registry_for(hosts: &[&str], probe: RouteProbe) -> Registry {
    let configs: Vec<ResolverConfig> = hosts
        .iter()
        .map(|h| ResolverConfig::new(*h, format!("{} test unwrapper", h)))
        .collect();
    Registry::with_probe(&configs, Arc::new(probe)).expect("Failed to build test registry")
}

/// Starts the service on an ephemeral port and returns its address.
/// The server task lives until the test runtime shuts down.
#[allow(dead_code)] // Used by other test files
pub async fn spawn_service(registry: Registry, max_hops: usize) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Failed to read local address");
    let state = AppState::new(Arc::new(registry), max_hops);
    tokio::spawn(async move {
        let _ = serve(listener, state).await;
    });
    addr
}
