//! Error type definitions.
//!
//! This module defines all error types used throughout the application.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::IntoStaticStr;
use thiserror::Error;
use url::Url;

/// Boxed error returned by probes and DNS lookups.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),

    /// The upstream DNS address is not a valid `ip:port`.
    #[error("Invalid upstream DNS address '{addr}': {source}")]
    UpstreamDnsError {
        /// Address as configured
        addr: String,
        /// Parse failure
        #[source]
        source: std::net::AddrParseError,
    },

    /// A configured unwrapper host cannot form an `https://{host}/` URL.
    #[error("Invalid unwrapper host '{host}': {source}")]
    InvalidHostError {
        /// Host as configured
        host: String,
        /// Parse failure
        #[source]
        source: url::ParseError,
    },

    /// A configured unwrapper host carries a port, path, query or credentials.
    #[error("Invalid unwrapper host '{host}': expected a bare domain name")]
    NotBareHostError {
        /// Host as configured
        host: String,
    },
}

/// Errors that end a chain walk.
///
/// Every variant produced while querying a hop carries the endpoint that was
/// queried, so callers can report where the chain broke.
#[derive(Error, Debug)]
pub enum UnwrapError {
    /// The initiating host has no registered unwrapper; no chain is started.
    #[error("no unwrapper found for host '{host}'")]
    NoResolverFound {
        /// Initiating host (empty when the URL had none)
        host: String,
    },

    /// The chain is about to query an endpoint it already queried.
    #[error("cycle detected: {endpoint} was already visited")]
    CycleDetected {
        /// Endpoint that would have been queried a second time
        endpoint: Url,
    },

    /// The response carried no usable `Location` header.
    #[error("no location header returned by {endpoint}")]
    LookupFailed {
        /// Endpoint that was queried
        endpoint: Url,
    },

    /// The `Location` header could not be parsed as an absolute URL.
    #[error("failed to parse location '{location}' returned by {endpoint}: {source}")]
    LocationParse {
        /// Endpoint that was queried
        endpoint: Url,
        /// Raw header value
        location: String,
        /// Parse failure
        #[source]
        source: url::ParseError,
    },

    /// DNS, connect, TLS or timeout failure while querying a hop.
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        /// Endpoint that was queried
        endpoint: Url,
        /// Underlying transport error
        #[source]
        source: BoxError,
    },

    /// The endpoint for a hop could not be assembled from host and path.
    #[error("invalid endpoint '{endpoint}': {source}")]
    InvalidEndpoint {
        /// Endpoint string that failed to parse
        endpoint: String,
        /// Parse failure
        #[source]
        source: url::ParseError,
    },

    /// The chain recorded the maximum number of hops without terminating.
    #[error("hop limit of {limit} exceeded")]
    HopLimitExceeded {
        /// Configured hop limit
        limit: usize,
    },
}

/// Coarse category of an [`UnwrapError`], used in logs and responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
#[allow(missing_docs)]
pub enum ErrorKind {
    NoResolverFound,
    CycleDetected,
    LookupFailed,
    LocationParseError,
    TransportTimeout, // reqwest timeout, connect or overall
    TransportError,
    InvalidEndpoint,
    HopLimitExceeded,
}

impl ErrorKind {
    /// Snake-case name used in logs and JSON responses.
    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl UnwrapError {
    /// Endpoint queried when the error occurred, if the error came from a hop.
    pub fn endpoint(&self) -> Option<&Url> {
        match self {
            UnwrapError::CycleDetected { endpoint }
            | UnwrapError::LookupFailed { endpoint }
            | UnwrapError::LocationParse { endpoint, .. }
            | UnwrapError::Transport { endpoint, .. } => Some(endpoint),
            UnwrapError::NoResolverFound { .. }
            | UnwrapError::InvalidEndpoint { .. }
            | UnwrapError::HopLimitExceeded { .. } => None,
        }
    }

    /// Categorizes the error.
    ///
    /// Transport failures whose source is a `reqwest` timeout are reported as
    /// [`ErrorKind::TransportTimeout`].
    pub fn kind(&self) -> ErrorKind {
        match self {
            UnwrapError::NoResolverFound { .. } => ErrorKind::NoResolverFound,
            UnwrapError::CycleDetected { .. } => ErrorKind::CycleDetected,
            UnwrapError::LookupFailed { .. } => ErrorKind::LookupFailed,
            UnwrapError::LocationParse { .. } => ErrorKind::LocationParseError,
            UnwrapError::Transport { source, .. } => {
                match source.downcast_ref::<reqwest::Error>() {
                    Some(e) if e.is_timeout() => ErrorKind::TransportTimeout,
                    _ => ErrorKind::TransportError,
                }
            }
            UnwrapError::InvalidEndpoint { .. } => ErrorKind::InvalidEndpoint,
            UnwrapError::HopLimitExceeded { .. } => ErrorKind::HopLimitExceeded,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoint() -> Url {
        Url::parse("https://t.co/abc").unwrap()
    }

    #[test]
    fn test_error_kind_as_str() {
        assert_eq!(ErrorKind::NoResolverFound.as_str(), "no_resolver_found");
        assert_eq!(ErrorKind::LocationParseError.as_str(), "location_parse_error");
        assert_eq!(ErrorKind::TransportTimeout.as_str(), "transport_timeout");
        assert_eq!(ErrorKind::HopLimitExceeded.to_string(), "hop_limit_exceeded");
    }

    #[test]
    fn test_hop_errors_carry_endpoint() {
        let lookup = UnwrapError::LookupFailed {
            endpoint: endpoint(),
        };
        assert_eq!(lookup.endpoint(), Some(&endpoint()));
        assert_eq!(lookup.kind(), ErrorKind::LookupFailed);

        let transport = UnwrapError::Transport {
            endpoint: endpoint(),
            source: "connection refused".into(),
        };
        assert_eq!(transport.endpoint(), Some(&endpoint()));
        assert_eq!(transport.kind(), ErrorKind::TransportError);
    }

    #[test]
    fn test_non_hop_errors_have_no_endpoint() {
        let err = UnwrapError::NoResolverFound {
            host: "example.com".to_string(),
        };
        assert!(err.endpoint().is_none());
        assert_eq!(err.to_string(), "no unwrapper found for host 'example.com'");

        let err = UnwrapError::HopLimitExceeded { limit: 10 };
        assert!(err.endpoint().is_none());
        assert_eq!(err.to_string(), "hop limit of 10 exceeded");
    }

    #[test]
    fn test_location_parse_error_message() {
        let source = Url::parse("not a url").unwrap_err();
        let err = UnwrapError::LocationParse {
            endpoint: endpoint(),
            location: "not a url".to_string(),
            source,
        };
        let msg = err.to_string();
        assert!(msg.contains("'not a url'"));
        assert!(msg.contains("https://t.co/abc"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
