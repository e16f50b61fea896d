//! Resource transport — the seam between the cache and the network.
//!
//! [`Fetch`] abstracts "get me the bytes behind this URL" so the cache can be
//! driven by [`HttpFetcher`] in production and by a mock transport in tests.
//! Implementations report transport-level failures only; the cache decides
//! what a failure means for the caller.

use std::time::Duration;

use bytes::Bytes;
use futures::FutureExt;
use futures::future::BoxFuture;
use thiserror::Error;

/// Errors produced by a resource transport.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("fetch timed out after {0:?}")]
    TimedOut(Duration),

    #[error("{0}")]
    Transport(String),
}

/// The raw body of a fetched resource.
#[derive(Debug, Clone)]
pub struct FetchedBody {
    /// Response body bytes.
    pub bytes: Bytes,
    /// Value of the `Content-Type` response header, if the server sent one.
    pub content_type: Option<String>,
}

/// An asynchronous resource transport.
///
/// The returned future resolves to the response body and content type, or a
/// [`FetchError`] on transport failure. Implementations must be `Send + Sync`
/// so a single transport can serve concurrent fetches.
pub trait Fetch: Send + Sync {
    /// Fetches the resource behind `url`.
    fn fetch<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<FetchedBody, FetchError>>;
}

/// HTTP transport over a shared [`reqwest::Client`].
///
/// The response status is deliberately not inspected: as with a browser
/// `fetch`, only transport-level errors (DNS, connection, TLS) fail — a 404
/// body is returned and encoded like any other payload.
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Creates a transport with a default client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a transport over an existing client, so the pipeline can share
    /// its connection pool.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Fetch for HttpFetcher {
    fn fetch<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<FetchedBody, FetchError>> {
        async move {
            let response = self.client.get(url).send().await?;
            let content_type = response
                .headers()
                .get(reqwest::header::CONTENT_TYPE)
                .and_then(|value| value.to_str().ok())
                .map(str::to_owned);
            let bytes = response.bytes().await?;
            Ok(FetchedBody {
                bytes,
                content_type,
            })
        }
        .boxed()
    }
}
