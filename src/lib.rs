//! # inliner
//!
//! Fetches remote resources (images, fonts) as binary data, converts them to
//! data-URL payloads, and caches the result keyed by a normalized URL — so a
//! DOM-to-image rendering pipeline can inline external assets without
//! repeated network trips.
//!
//! The cache stores the in-flight computation itself, not just its eventual
//! value: concurrent requests for the same asset observe the same underlying
//! fetch, and at most one network request is ever issued per cache key.
//!
//! Failures never propagate to the caller. A broken asset resolves to the
//! configured placeholder (or an empty payload) and is reported through a
//! `tracing` error event, so one missing image cannot abort a full render.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use inliner::{Options, ResourceCache};
//!
//! #[tokio::main]
//! async fn main() {
//!     let cache = ResourceCache::new();
//!     let options = Options::default()
//!         .with_image_placeholder("data:image/png;base64,iVBORw0KGgo=");
//!
//!     let outcome = cache.fetch("https://example.com/logo.png", &options).await;
//!     println!("{} bytes of base64 payload", outcome.payload().len());
//! }
//! ```

pub mod cache;
pub mod config;
pub mod data_url;
pub mod fetch;

// ── Convenience re-exports ────────────────────────────────────────────────────
pub use cache::{FetchOutcome, ResourceCache};
pub use config::Options;
pub use fetch::{Fetch, FetchError, FetchedBody, HttpFetcher};
