//! Network seam for single-hop lookups.

use futures::future::BoxFuture;
use log::debug;
use reqwest::header::LOCATION;
use url::Url;

use crate::error_handling::BoxError;

/// Performs the network part of a hop: one request against `endpoint`,
/// returning the raw `Location` header value, if any.
///
/// Implementations must not follow redirects and must not retry.
pub trait Probe: Send + Sync {
    /// Queries `endpoint` once.
    ///
    /// Returns `Ok(None)` when the response has no `Location` header and
    /// `Err` for transport failures (DNS, connect, TLS, timeout).
    fn probe<'a>(&'a self, endpoint: &'a Url) -> BoxFuture<'a, Result<Option<String>, BoxError>>;
}

/// Production probe: a `HEAD` request through a non-redirecting client.
///
/// The client is expected to come from
/// [`init_hop_client`](crate::initialization::init_hop_client), which pins DNS
/// to the upstream server and bounds the request with `HOP_TIMEOUT`.
#[derive(Debug, Clone)]
pub struct HttpProbe {
    client: reqwest::Client,
}

impl HttpProbe {
    /// Wraps a client built by `init_hop_client`.
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Probe for HttpProbe {
    fn probe<'a>(&'a self, endpoint: &'a Url) -> BoxFuture<'a, Result<Option<String>, BoxError>> {
        Box::pin(async move {
            let resp = self.client.head(endpoint.clone()).send().await?;
            debug!("HEAD {} returned {}", endpoint, resp.status());

            // Lossy so that a non-ASCII header still reaches URL parsing
            let location = resp
                .headers()
                .get(LOCATION)
                .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned());
            Ok(location)
        })
    }
}
