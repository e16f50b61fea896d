//! Resource fetch cache — coalesces fetches and inlines assets as data-URL
//! payloads.
//!
//! [`ResourceCache`] maps a normalized cache key to the fetch computation
//! itself (a [`Shared`] future), not just its eventual value. A cache hit —
//! even one landing while the first fetch is still in flight — returns a
//! clone of the same computation, so at most one network request is issued
//! per key for the cache's lifetime. Entries are never evicted; the cache is
//! meant to be owned by a render session and dropped with it.
//!
//! ## Known limitation
//!
//! A fetch URL that redirects to a different effective resource path is still
//! cached under the key derived from the original URL. Two URLs redirecting
//! to the same target are fetched (and stored) twice.

use std::collections::HashMap;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use tokio::sync::Mutex;
use tracing::{debug, error};

use crate::config::Options;
use crate::data_url;
use crate::fetch::{Fetch, FetchError, HttpFetcher};

mod key;

/// A fetch computation stored in the cache, cloneable by concurrent callers.
type SharedOutcome = Shared<BoxFuture<'static, FetchOutcome>>;

/// The settled result of a resource fetch.
///
/// A fetch never fails from the caller's perspective: a broken asset must not
/// abort the rendering pipeline that requested it. Failures are logged and
/// collapsed into [`Placeholder`](Self::Placeholder) or
/// [`Missing`](Self::Missing), which callers can still distinguish from a
/// real payload when they want to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The asset was fetched and encoded; carries the base64 payload.
    Fetched(String),
    /// The fetch failed; carries the payload segment of the configured
    /// placeholder.
    Placeholder(String),
    /// The fetch failed and no placeholder was configured.
    Missing,
}

impl FetchOutcome {
    /// Returns the inline payload: the encoded asset, the placeholder
    /// substitute, or `""` for [`Missing`](Self::Missing).
    pub fn payload(&self) -> &str {
        match self {
            Self::Fetched(payload) | Self::Placeholder(payload) => payload,
            Self::Missing => "",
        }
    }

    /// Consumes the outcome, returning the inline payload.
    pub fn into_payload(self) -> String {
        match self {
            Self::Fetched(payload) | Self::Placeholder(payload) => payload,
            Self::Missing => String::new(),
        }
    }

    /// Returns `true` if the asset itself was fetched (not substituted).
    pub fn is_fetched(&self) -> bool {
        matches!(self, Self::Fetched(_))
    }
}

/// A per-session cache of fetched, data-URL-encoded resources.
///
/// Construct one per render session and pass it every asset URL the pipeline
/// discovers. The cache key is the URL with its query string stripped; font
/// URLs (ttf/otf/eot/woff/woff2) are further collapsed to the bare filename.
///
/// # Examples
///
/// ```rust,no_run
/// use inliner::{Options, ResourceCache};
///
/// # #[tokio::main]
/// # async fn main() {
/// let cache = ResourceCache::new();
/// let options = Options::default();
///
/// // Query variants share one entry — the second call is a cache hit.
/// let a = cache.fetch("https://host/logo.png?v=1", &options).await;
/// let b = cache.fetch("https://host/logo.png?v=2", &options).await;
/// assert_eq!(a, b);
/// # }
/// ```
pub struct ResourceCache {
    fetcher: Arc<dyn Fetch>,
    entries: Mutex<HashMap<String, SharedOutcome>>,
}

impl ResourceCache {
    /// Creates a cache backed by the default HTTP transport.
    pub fn new() -> Self {
        Self::with_fetcher(Arc::new(HttpFetcher::new()))
    }

    /// Creates a cache backed by a custom transport.
    pub fn with_fetcher(fetcher: Arc<dyn Fetch>) -> Self {
        Self {
            fetcher,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Fetches `url` as a data-URL payload, or returns the cached outcome.
    ///
    /// On a miss, the computation is inserted into the cache before it is
    /// first polled, so same-key callers arriving at any point share it.
    /// The fetch is bounded by [`Options::timeout`]; expiry is absorbed like
    /// any other failure.
    ///
    /// This method never fails — see [`FetchOutcome`] for how failures
    /// surface.
    pub async fn fetch(&self, url: &str, options: &Options) -> FetchOutcome {
        let key = key::cache_key(url);

        let shared = {
            let mut entries = self.entries.lock().await;
            if let Some(existing) = entries.get(&key) {
                debug!(key = %key, "resource cache hit");
                existing.clone()
            } else {
                let fetch_url = key::fetch_url(url, options);
                debug!(key = %key, url = %fetch_url, "resource cache miss — fetching");
                let computation =
                    fetch_and_encode(Arc::clone(&self.fetcher), fetch_url, options.clone())
                        .boxed()
                        .shared();
                entries.insert(key, computation.clone());
                computation
            }
        };

        shared.await
    }

    /// Returns the number of cached entries (settled or in flight).
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    /// Returns `true` if nothing has been requested yet.
    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}

impl Default for ResourceCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Drives one fetch to a settled [`FetchOutcome`].
///
/// Fetch → read body → encode as a data URL with the response content type →
/// strip the header, keeping only the base64 payload. Every failure path,
/// including the deadline, resolves to the placeholder rather than an error.
async fn fetch_and_encode(
    fetcher: Arc<dyn Fetch>,
    fetch_url: String,
    options: Options,
) -> FetchOutcome {
    let attempt = async {
        let body = fetcher.fetch(&fetch_url).await?;
        let content_type = body
            .content_type
            .as_deref()
            .unwrap_or(data_url::FALLBACK_CONTENT_TYPE);
        let encoded = data_url::encode(&body.bytes, content_type);
        Ok::<String, FetchError>(data_url::content(&encoded).to_owned())
    };

    let result = match tokio::time::timeout(options.timeout, attempt).await {
        Ok(result) => result,
        Err(_) => Err(FetchError::TimedOut(options.timeout)),
    };

    match result {
        Ok(payload) => FetchOutcome::Fetched(payload),
        Err(e) => {
            error!(url = %fetch_url, error = %e, "failed to fetch resource");
            match options.placeholder_content() {
                "" => FetchOutcome::Missing,
                placeholder => FetchOutcome::Placeholder(placeholder.to_owned()),
            }
        }
    }
}
