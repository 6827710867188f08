//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (timeouts, limits, defaults)
//! - CLI option types and parsing
//! - Loading of the known-unwrapper list

mod constants;
mod types;
mod unwrappers;

// Re-export all constants
pub use constants::*;
pub use types::{Config, LogFormat, LogLevel};
pub use unwrappers::{load_resolver_configs, parse_resolver_configs, ResolverConfig};
