//! Error handling.
//!
//! This module provides:
//! - Initialization error types (logger, HTTP client, upstream DNS, registry)
//! - The chain error taxonomy shared by the single-hop resolver and the walker
//! - Error categorization for logging and responses

mod types;

// Re-export public API
pub use types::{BoxError, ErrorKind, InitializationError, UnwrapError};
