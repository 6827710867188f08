//! Immutable host → unwrapper mapping.

use std::collections::HashMap;
use std::sync::Arc;

use log::debug;

use super::probe::{HttpProbe, Probe};
use super::unwrapper::Unwrapper;
use crate::config::ResolverConfig;
use crate::error_handling::InitializationError;
use crate::initialization::{init_hop_client, init_upstream_resolver, parse_upstream_addr};

/// Known unwrappers keyed by host.
///
/// Built once before serving and only read afterwards; share it behind an
/// `Arc` or a plain reference.
#[derive(Debug, Default)]
pub struct Registry {
    unwrappers: HashMap<String, Unwrapper>,
}

impl Registry {
    /// Builds one unwrapper per config entry, all sharing a single HTTP probe
    /// whose DNS lookups go to `upstream_dns` (`ip:port`).
    ///
    /// Duplicate hosts overwrite earlier entries.
    ///
    /// # Errors
    ///
    /// Returns an error if `upstream_dns` is not a socket address, a host is
    /// invalid, or the HTTP client cannot be built.
    pub fn build(
        configs: &[ResolverConfig],
        upstream_dns: &str,
    ) -> Result<Self, InitializationError> {
        let upstream = parse_upstream_addr(upstream_dns)?;
        let client = init_hop_client(init_upstream_resolver(upstream))?;
        Self::with_probe(configs, Arc::new(HttpProbe::new(client)))
    }

    /// Builds one unwrapper per config entry around a caller-supplied probe.
    ///
    /// # Errors
    ///
    /// Returns `InvalidHostError` or `NotBareHostError` for an unusable host.
    pub fn with_probe(
        configs: &[ResolverConfig],
        probe: Arc<dyn Probe>,
    ) -> Result<Self, InitializationError> {
        let unwrappers = configs
            .iter()
            .map(|c| Unwrapper::new(c.host.as_str(), c.description.as_str(), Arc::clone(&probe)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_unwrappers(unwrappers))
    }

    /// Assembles a registry from already built unwrappers (last one wins).
    pub fn from_unwrappers(unwrappers: impl IntoIterator<Item = Unwrapper>) -> Self {
        let mut map = HashMap::new();
        for unwrapper in unwrappers {
            if let Some(previous) = map.insert(unwrapper.host().to_string(), unwrapper) {
                debug!("Replacing duplicate unwrapper for {}", previous.host());
            }
        }
        Self { unwrappers: map }
    }

    /// Returns the unwrapper registered for `host`.
    pub fn lookup(&self, host: &str) -> Option<&Unwrapper> {
        self.unwrappers.get(host)
    }

    /// Number of registered hosts.
    pub fn len(&self) -> usize {
        self.unwrappers.len()
    }

    /// Whether no host is registered.
    pub fn is_empty(&self) -> bool {
        self.unwrappers.is_empty()
    }

    /// Registered hosts, sorted.
    pub fn hosts(&self) -> Vec<&str> {
        let mut hosts: Vec<&str> = self.unwrappers.keys().map(String::as_str).collect();
        hosts.sort_unstable();
        hosts
    }
}
