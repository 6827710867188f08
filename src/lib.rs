//! link_unwrapper library: resolves shortened and tracking links
//!
//! This library follows a shortened URL to its destination one redirect hop at
//! a time. Each hop is a single `HEAD` request that never follows redirects on
//! its own and resolves DNS through a pinned upstream server. When a hop lands
//! on another known shortener, the chain continues with that host's unwrapper;
//! it stops on the first unknown host, on a repeated endpoint, or on failure.
//!
//! # Example
//!
//! ```no_run
//! use link_unwrapper::{load_resolver_configs, Registry, Walker};
//! use url::Url;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let configs = load_resolver_configs(None)?;
//! let registry = Registry::build(&configs, "1.1.1.1:53")?;
//!
//! let mut walker = Walker::new(Url::parse("https://t.co/abc")?, &registry)?;
//! walker.run().await;
//!
//! for hop in walker.hops() {
//!     println!("{} -> {} ({})", hop.from, hop.to, hop.using.description);
//! }
//! println!("final: {}", walker.final_url());
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

#![warn(missing_docs)]

pub mod chain;
pub mod config;
mod dns;
pub mod error_handling;
pub mod initialization;
pub mod server;
pub mod unwrap;

// Re-export public API
pub use chain::{ChainState, Flow, Hop, Walker};
pub use config::{load_resolver_configs, Config, LogFormat, LogLevel, ResolverConfig};
pub use error_handling::{ErrorKind, InitializationError, UnwrapError};
pub use server::{start_server, AppState};
pub use unwrap::{HttpProbe, Probe, Registry, Unwrapper, UnwrapperInfo};
