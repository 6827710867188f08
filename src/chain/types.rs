//! Chain data types.

use serde::Serialize;
use strum_macros::IntoStaticStr;
use url::Url;

use crate::unwrap::UnwrapperInfo;

/// One transition from a queried endpoint to the destination it named.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hop {
    /// Endpoint that was queried
    pub from: Url,
    /// Destination named by its `Location` header
    pub to: Url,
    /// Unwrapper that performed the query
    pub using: UnwrapperInfo,
}

/// Walker state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ChainState {
    /// Constructed, no step taken yet
    Init,
    /// At least one hop taken and the destination host was registered
    Stepping,
    /// Reached a host with no registered unwrapper
    Success,
    /// An endpoint was about to be queried a second time
    Cycle,
    /// A hop failed or the hop limit was reached
    Error,
}

impl ChainState {
    /// `Success`, `Cycle` and `Error` are terminal.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ChainState::Success | ChainState::Cycle | ChainState::Error)
    }

    /// Snake-case name used in responses.
    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }
}

/// Result of a single [`Walker::step`](super::Walker::step).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// The walker can take another hop
    Continue,
    /// The walker is terminated
    Stop,
}
