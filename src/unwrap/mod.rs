//! Single-hop unwrapping and the registry of known unwrappers.
//!
//! An [`Unwrapper`] knows one shortener host. Given a path it queries
//! `https://{host}/{path}` exactly once, without following redirects, and
//! reports the `Location` the server answered with. The [`Registry`] maps
//! hosts to unwrappers and is built once at startup.

mod probe;
mod registry;
mod unwrapper;

// Re-export public API
pub use probe::{HttpProbe, Probe};
pub use registry::Registry;
pub use unwrapper::{Unwrapper, UnwrapperInfo};
