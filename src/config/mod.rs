//! Fetch options consumed by the resource cache.
//!
//! [`Options`] mirrors the option object handed down by the rendering
//! pipeline. Field names deserialize in `camelCase` so a JS-style JSON
//! configuration maps onto it directly. Every field defaults, so a partial
//! object (or `Options::default()`) is always valid.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default deadline applied to a single resource fetch.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for a resource fetch.
///
/// Consumed read-only by [`ResourceCache::fetch`](crate::ResourceCache::fetch).
/// The proxy and cache-bust settings affect the *fetch URL* only — the cache
/// key is always derived from the original request URL.
///
/// # Examples
///
/// ```
/// use inliner::Options;
///
/// let options = Options::default()
///     .with_cors_proxy("https://proxy.example/")
///     .with_cache_bust(true);
///
/// assert!(options.cache_bust);
/// assert_eq!(options.cors_proxy.as_deref(), Some("https://proxy.example/"));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Options {
    /// Prefix prepended to the fetch URL to route around cross-origin
    /// restrictions. Never part of the cache key.
    pub cors_proxy: Option<String>,

    /// When set, a current-timestamp query parameter is appended to the
    /// fetch URL to defeat HTTP-level caching. The cache key is unaffected.
    pub cache_bust: bool,

    /// Comma-delimited data URL whose second segment (the encoded payload)
    /// is substituted when a fetch fails.
    pub image_placeholder: Option<String>,

    /// Deadline for a single fetch. A fetch that exceeds it is absorbed like
    /// any other failure rather than leaving the cache entry pending forever.
    pub timeout: Duration,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            cors_proxy: None,
            cache_bust: false,
            image_placeholder: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl Options {
    /// Sets the CORS proxy prefix.
    pub fn with_cors_proxy(mut self, proxy: impl Into<String>) -> Self {
        self.cors_proxy = Some(proxy.into());
        self
    }

    /// Enables or disables cache busting.
    pub fn with_cache_bust(mut self, enabled: bool) -> Self {
        self.cache_bust = enabled;
        self
    }

    /// Sets the placeholder data URL used when a fetch fails.
    pub fn with_image_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.image_placeholder = Some(placeholder.into());
        self
    }

    /// Sets the per-fetch deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the payload substituted on fetch failure: the second
    /// comma-separated segment of [`image_placeholder`](Self::image_placeholder),
    /// or `""` when no placeholder is configured (or it carries no payload).
    pub fn placeholder_content(&self) -> &str {
        self.image_placeholder
            .as_deref()
            .and_then(|p| p.split(',').nth(1))
            .unwrap_or("")
    }
}
