//! DNS resolution for hop lookups.
//!
//! Every hop request resolves its host through a `hickory-resolver` instance
//! pinned to the configured upstream server, never through the system
//! resolver.

mod upstream;

// Re-export public API
pub use upstream::UpstreamDns;
