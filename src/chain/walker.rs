//! Chain walker state machine.

use std::collections::HashSet;

use log::{debug, info, warn};
use url::Url;

use super::types::{ChainState, Flow, Hop};
use crate::config::MAX_HOPS;
use crate::error_handling::UnwrapError;
use crate::unwrap::{Registry, Unwrapper};

/// Walks a redirect chain one hop per [`step`](Walker::step).
///
/// A walker borrows the registry for its whole lifetime and owns everything
/// else, so each request gets its own walker while the registry is shared.
#[derive(Debug)]
pub struct Walker<'r> {
    registry: &'r Registry,
    unwrapper: Option<&'r Unwrapper>,
    current: Url,
    hops: Vec<Hop>,
    visited: HashSet<String>,
    state: ChainState,
    err: Option<UnwrapError>,
    cycle_at: Option<Url>,
    max_hops: usize,
}

impl<'r> Walker<'r> {
    /// Starts a chain at `initial`.
    ///
    /// # Errors
    ///
    /// Returns `UnwrapError::NoResolverFound` if the host of `initial` has no
    /// registered unwrapper. No hop is attempted in that case.
    pub fn new(initial: Url, registry: &'r Registry) -> Result<Self, UnwrapError> {
        let host = initial.host_str().unwrap_or_default();
        let unwrapper = registry
            .lookup(host)
            .ok_or_else(|| UnwrapError::NoResolverFound {
                host: host.to_string(),
            })?;
        info!("Using unwrapper for {}", unwrapper.host());

        Ok(Self {
            registry,
            unwrapper: Some(unwrapper),
            current: initial,
            hops: Vec::new(),
            visited: HashSet::new(),
            state: ChainState::Init,
            err: None,
            cycle_at: None,
            max_hops: MAX_HOPS,
        })
    }

    /// Sets the maximum number of hops the chain may record before it is
    /// stopped with `HopLimitExceeded`.
    pub fn with_max_hops(mut self, max_hops: usize) -> Self {
        self.max_hops = max_hops;
        self
    }

    /// Takes one hop.
    ///
    /// Returns [`Flow::Continue`] while the destination is another registered
    /// host, and [`Flow::Stop`] once the walker reaches a terminal state.
    /// Stepping a terminated walker does nothing.
    pub async fn step(&mut self) -> Flow {
        let Some(unwrapper) = self.unwrapper else {
            return Flow::Stop;
        };

        let path = hop_path(&self.current);
        let endpoint = match unwrapper.endpoint(&path) {
            Ok(endpoint) => endpoint,
            Err(e) => return self.fail(e),
        };

        // Keyed on the endpoint about to be queried, not on destinations
        let key = endpoint.as_str().to_string();
        if self.visited.contains(&key) {
            warn!("Cycle detected: {} was already visited", endpoint);
            self.unwrapper = None;
            self.state = ChainState::Cycle;
            self.cycle_at = Some(endpoint);
            return Flow::Stop;
        }

        // Checked after the cycle test: a loop at the limit still ends as Cycle
        if self.hops.len() >= self.max_hops {
            warn!("Hop limit of {} reached at {}", self.max_hops, self.current);
            return self.fail(UnwrapError::HopLimitExceeded {
                limit: self.max_hops,
            });
        }
        self.visited.insert(key);

        let (from, to) = match unwrapper.resolve(&path).await {
            Ok(hop) => hop,
            Err(e) => return self.fail(e),
        };

        self.hops.push(Hop {
            from,
            to: to.clone(),
            using: unwrapper.info(),
        });

        let registry = self.registry;
        let next = to.host_str().and_then(|host| registry.lookup(host));
        self.current = to;

        match next {
            Some(next) => {
                debug!("Switching to unwrapper for {}", next.host());
                self.unwrapper = Some(next);
                self.state = ChainState::Stepping;
                Flow::Continue
            }
            None => {
                info!("Finished, found: {}", self.current);
                self.unwrapper = None;
                self.state = ChainState::Success;
                Flow::Stop
            }
        }
    }

    /// Steps until the walker stops and returns the terminal state.
    pub async fn run(&mut self) -> ChainState {
        while self.step().await == Flow::Continue {}
        self.state
    }

    fn fail(&mut self, err: UnwrapError) -> Flow {
        self.unwrapper = None;
        self.state = ChainState::Error;
        self.err = Some(err);
        Flow::Stop
    }

    /// Hops taken so far, in traversal order.
    pub fn hops(&self) -> &[Hop] {
        &self.hops
    }

    /// The initiating URL before any hop, otherwise the destination of the
    /// most recent successful hop.
    pub fn final_url(&self) -> &Url {
        &self.current
    }

    /// The error that stopped the chain. `None` on success and on cycles.
    pub fn error(&self) -> Option<&UnwrapError> {
        self.err.as_ref()
    }

    /// The endpoint whose second query was refused, when the chain stopped on
    /// a cycle.
    pub fn cycle_endpoint(&self) -> Option<&Url> {
        self.cycle_at.as_ref()
    }

    /// Current state; terminal once the walker has stopped.
    pub fn state(&self) -> ChainState {
        self.state
    }

    /// Whether the walker reached `Success`, `Cycle` or `Error`.
    pub fn is_terminated(&self) -> bool {
        self.state.is_terminal()
    }

    /// Unwrapper that will handle the next hop; `None` once terminated.
    pub fn active_unwrapper(&self) -> Option<&'r Unwrapper> {
        self.unwrapper
    }
}

/// Path and query of `url` without the leading `/`.
fn hop_path(url: &Url) -> String {
    let path = url.path();
    let path = path.strip_prefix('/').unwrap_or(path);
    match url.query() {
        Some(query) => format!("{}?{}", path, query),
        None => path.to_string(),
    }
}
