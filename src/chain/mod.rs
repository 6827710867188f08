//! Chain traversal.
//!
//! A [`Walker`] starts from the URL of a known shortener and follows its
//! redirect target hop by hop, switching unwrapper whenever the destination
//! host is itself registered. It stops when the destination host is unknown
//! (success), when an endpoint is about to be queried a second time (cycle),
//! or when a hop fails (error). Every successful hop is recorded.

mod types;
mod walker;

// Re-export public API
pub use types::{ChainState, Flow, Hop};
pub use walker::Walker;
