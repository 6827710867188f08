//! Per-host single-hop resolver.

use std::fmt;
use std::sync::Arc;

use log::{info, warn};
use serde::Serialize;
use url::{ParseError, Url};

use super::probe::Probe;
use crate::error_handling::{InitializationError, UnwrapError};

/// Identity of an unwrapper as recorded in each hop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnwrapperInfo {
    /// Registered host
    pub host: String,
    /// Human-readable name
    pub description: String,
}

/// Resolves one hop for a single shortener host.
#[derive(Clone)]
pub struct Unwrapper {
    host: String,
    description: String,
    probe: Arc<dyn Probe>,
}

impl fmt::Debug for Unwrapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Unwrapper")
            .field("host", &self.host)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

impl Unwrapper {
    /// Creates an unwrapper for `host`.
    ///
    /// The host is stored the way [`Url::host_str`] reports it (lowercased,
    /// internationalized names in punycode), so it matches hosts taken from
    /// destination URLs.
    ///
    /// # Errors
    ///
    /// - `InvalidHostError` if `https://{host}/` is not a valid URL
    /// - `NotBareHostError` if `host` carries anything besides a domain name
    pub fn new(
        host: impl Into<String>,
        description: impl Into<String>,
        probe: Arc<dyn Probe>,
    ) -> Result<Self, InitializationError> {
        let raw = host.into();
        let url = Url::parse(&format!("https://{}/", raw)).map_err(|source| {
            InitializationError::InvalidHostError {
                host: raw.clone(),
                source,
            }
        })?;

        let bare = url.port().is_none()
            && url.path() == "/"
            && url.query().is_none()
            && url.fragment().is_none()
            && url.username().is_empty()
            && url.password().is_none();
        let host = match url.host_str() {
            Some(host) if bare => host.to_string(),
            _ => return Err(InitializationError::NotBareHostError { host: raw }),
        };

        Ok(Self {
            host,
            description: description.into(),
            probe,
        })
    }

    /// Normalized host this unwrapper answers for.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Human-readable name from the configuration.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Identity recorded in each [`Hop`](crate::chain::Hop).
    pub fn info(&self) -> UnwrapperInfo {
        UnwrapperInfo {
            host: self.host.clone(),
            description: self.description.clone(),
        }
    }

    /// Builds the endpoint `https://{host}/{path}`.
    ///
    /// `path` must not start with `/`; it may carry a `?query` suffix.
    pub fn endpoint(&self, path: &str) -> Result<Url, UnwrapError> {
        let endpoint = format!("https://{}/{}", self.host, path);
        Url::parse(&endpoint).map_err(|source| UnwrapError::InvalidEndpoint { endpoint, source })
    }

    /// Performs exactly one lookup for `path` and returns the queried
    /// endpoint together with the destination named by its `Location` header.
    ///
    /// A relative `Location` is resolved against the queried endpoint.
    ///
    /// # Errors
    ///
    /// - `Transport` if the request itself fails
    /// - `LookupFailed` if `Location` is absent or empty
    /// - `LocationParse` if `Location` is not a valid URL
    ///
    /// All three carry the queried endpoint.
    pub async fn resolve(&self, path: &str) -> Result<(Url, Url), UnwrapError> {
        let endpoint = self.endpoint(path)?;
        info!("Visiting {}", endpoint);

        let location = match self.probe.probe(&endpoint).await {
            Ok(location) => location,
            Err(source) => {
                warn!("Failed doing HEAD on {}: {}", endpoint, source);
                return Err(UnwrapError::Transport { endpoint, source });
            }
        };

        let location = match location {
            Some(location) if !location.trim().is_empty() => location.trim().to_string(),
            Some(_) => {
                warn!("Got empty location header from {}", endpoint);
                return Err(UnwrapError::LookupFailed { endpoint });
            }
            None => {
                warn!("Got no location header from {}", endpoint);
                return Err(UnwrapError::LookupFailed { endpoint });
            }
        };

        let parsed = match Url::parse(&location) {
            Err(ParseError::RelativeUrlWithoutBase) => endpoint.join(&location),
            other => other,
        };
        match parsed {
            Ok(destination) => Ok((endpoint, destination)),
            Err(source) => {
                warn!(
                    "Failed to parse location '{}' from {}: {}",
                    location, endpoint, source
                );
                Err(UnwrapError::LocationParse {
                    endpoint,
                    location,
                    source,
                })
            }
        }
    }
}
