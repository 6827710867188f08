//! Known-unwrapper list loading.
//!
//! The list is a JSON array of `{"host": ..., "description": ...}` objects.
//! A default list is compiled into the binary; operators can point
//! `--unwrappers` at a file to replace it.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Built-in unwrapper list, used when no file is configured.
const DEFAULT_UNWRAPPERS: &str = include_str!("../../config/unwrappers.json");

/// One configured unwrapper: the host it handles and a human-readable label.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResolverConfig {
    /// Host name the unwrapper is registered under (e.g. `t.co`)
    pub host: String,
    /// Human-readable description shown alongside each hop
    pub description: String,
}

impl ResolverConfig {
    /// Creates a config entry from its parts.
    pub fn new(host: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            description: description.into(),
        }
    }
}

/// Parses a JSON unwrapper list.
///
/// # Errors
///
/// Returns an error if the input is not a JSON array of `{host, description}` objects.
pub fn parse_resolver_configs(json: &str) -> Result<Vec<ResolverConfig>> {
    serde_json::from_str(json).context("Failed to decode unwrapper list")
}

/// Loads the unwrapper list from `path`, or the built-in list when `path` is `None`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not decode.
pub fn load_resolver_configs(path: Option<&Path>) -> Result<Vec<ResolverConfig>> {
    match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read unwrapper list {}", path.display()))?;
            parse_resolver_configs(&json)
                .with_context(|| format!("Invalid unwrapper list {}", path.display()))
        }
        None => parse_resolver_configs(DEFAULT_UNWRAPPERS),
    }
}
