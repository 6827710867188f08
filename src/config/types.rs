//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::constants::{DEFAULT_BIND, DEFAULT_PORT, DEFAULT_UPSTREAM_DNS, MAX_HOPS};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Service configuration.
///
/// Parsed from the command line by `clap`, and constructible programmatically
/// through `Default` when the crate is used as a library.
///
/// # Examples
///
/// ```bash
/// # Serve on the default port with the built-in unwrapper list
/// link_unwrapper
///
/// # Custom port, Google DNS, and a local unwrapper list
/// link_unwrapper --port 9000 --upstream-dns 8.8.8.8:53 --unwrappers ./unwrappers.json
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "link_unwrapper",
    about = "Unwraps shortened and tracking links one redirect hop at a time."
)]
pub struct Config {
    /// Port to listen on
    #[arg(long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Address to bind the listener to
    #[arg(long, default_value = DEFAULT_BIND)]
    pub bind: String,

    /// Upstream DNS server (IP:Port) used for every hop lookup
    #[arg(long, default_value = DEFAULT_UPSTREAM_DNS)]
    pub upstream_dns: String,

    /// JSON file listing known unwrappers (`[{"host": ..., "description": ...}]`).
    /// The built-in list is used when omitted.
    #[arg(long, value_parser)]
    pub unwrappers: Option<PathBuf>,

    /// Maximum number of hops recorded for a single chain
    #[arg(long, default_value_t = MAX_HOPS)]
    pub max_hops: usize,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            bind: DEFAULT_BIND.to_string(),
            upstream_dns: DEFAULT_UPSTREAM_DNS.to_string(),
            unwrappers: None,
            max_hops: MAX_HOPS,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
        }
    }
}

impl Config {
    /// Socket address string the HTTP entrypoint binds to.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }
}
