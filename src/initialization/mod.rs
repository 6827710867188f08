//! Application initialization and resource setup.
//!
//! This module provides functions to initialize the shared resources:
//! - Logger
//! - DNS resolver pinned to the upstream server
//! - HTTP client used for hop lookups
//!
//! All initialization functions return proper error types for error handling.

mod client;
mod logger;
mod resolver;

// Re-export public API
pub use client::init_hop_client;
pub use logger::init_logger_with;
pub use resolver::{init_upstream_resolver, parse_upstream_addr};
