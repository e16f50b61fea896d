//! Cache-key and fetch-URL derivation.
//!
//! The two are deliberately distinct: the fetch URL carries the CORS proxy
//! prefix and cache-bust parameter, while the cache key is always derived
//! from the original request URL so those knobs never fragment the cache.

use chrono::Utc;

use crate::config::Options;

/// Font file extensions whose URLs are collapsed to the bare filename.
const FONT_EXTENSIONS: [&str; 5] = ["ttf", "otf", "eot", "woff", "woff2"];

/// Derives the cache key for a request URL.
///
/// The query string (everything from the first `?`) is stripped. If the
/// remaining path names a font file, the key is reduced to the filename only:
/// two distinct font URLs sharing a filename share one cache entry. That
/// collision is a deliberate policy — repeated font requests across hosts and
/// paths hit the cache far more often than distinct fonts share a name.
pub(crate) fn cache_key(url: &str) -> String {
    let href = url.split('?').next().unwrap_or(url);
    if is_font(href) {
        filename(href).to_owned()
    } else {
        href.to_owned()
    }
}

/// Builds the URL actually used for the network request.
///
/// Applies the CORS proxy prefix, then (when cache busting) appends a
/// current-millisecond timestamp as a query parameter so intermediary HTTP
/// caches are bypassed. Neither affects the cache key.
pub(crate) fn fetch_url(url: &str, options: &Options) -> String {
    let mut fetch_url = match options.cors_proxy.as_deref() {
        Some(proxy) => format!("{proxy}{url}"),
        None => url.to_owned(),
    };

    if options.cache_bust {
        let separator = if fetch_url.contains('?') { '&' } else { '?' };
        fetch_url.push(separator);
        fetch_url.push_str(&Utc::now().timestamp_millis().to_string());
    }

    fetch_url
}

/// Returns `true` if the path's filename has a font extension
/// (case-insensitive ttf/otf/eot/woff/woff2).
fn is_font(path: &str) -> bool {
    match filename(path).rsplit_once('.') {
        Some((_, ext)) => FONT_EXTENSIONS
            .iter()
            .any(|font_ext| ext.eq_ignore_ascii_case(font_ext)),
        None => false,
    }
}

/// Returns the final path segment (everything after the last `/`).
fn filename(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_strips_query_string() {
        assert_eq!(cache_key("a/b.png?x=1"), "a/b.png");
        assert_eq!(cache_key("a/b.png?x=2"), "a/b.png");
        assert_eq!(cache_key("a/b.png"), "a/b.png");
    }

    #[test]
    fn key_collapses_fonts_to_filename() {
        assert_eq!(cache_key("http://host/path/to/font.woff2"), "font.woff2");
        assert_eq!(cache_key("http://other/font.woff2"), "font.woff2");
    }

    #[test]
    fn font_extension_is_case_insensitive() {
        assert_eq!(cache_key("http://host/fonts/Roboto.TTF"), "Roboto.TTF");
        assert_eq!(cache_key("http://host/fonts/icons.WOFF2"), "icons.WOFF2");
    }

    #[test]
    fn font_query_suffixes_are_stripped_first() {
        // Legacy IE cache-busting style: font.eot?#iefix
        assert_eq!(cache_key("http://host/font.eot?#iefix"), "font.eot");
    }

    #[test]
    fn non_font_paths_keep_directories() {
        assert_eq!(
            cache_key("http://host/assets/img/logo.png"),
            "http://host/assets/img/logo.png"
        );
    }

    #[test]
    fn extensionless_paths_are_not_fonts() {
        assert_eq!(cache_key("http://host/ttf"), "http://host/ttf");
    }

    #[test]
    fn fetch_url_without_options_is_unchanged() {
        let options = Options::default();
        assert_eq!(fetch_url("http://host/a.png", &options), "http://host/a.png");
    }

    #[test]
    fn fetch_url_applies_cors_proxy_prefix() {
        let options = Options::default().with_cors_proxy("https://proxy/");
        assert_eq!(
            fetch_url("http://host/a.png", &options),
            "https://proxy/http://host/a.png"
        );
    }

    #[test]
    fn cache_bust_appends_with_question_mark() {
        let options = Options::default().with_cache_bust(true);
        let url = fetch_url("http://host/a.png", &options);
        let (base, stamp) = url.split_once('?').unwrap();
        assert_eq!(base, "http://host/a.png");
        assert!(stamp.parse::<i64>().is_ok());
    }

    #[test]
    fn cache_bust_appends_with_ampersand_after_existing_query() {
        let options = Options::default().with_cache_bust(true);
        let url = fetch_url("http://host/a.png?x=1", &options);
        let (base, stamp) = url.rsplit_once('&').unwrap();
        assert_eq!(base, "http://host/a.png?x=1");
        assert!(stamp.parse::<i64>().is_ok());
    }

    #[test]
    fn proxy_and_bust_compose() {
        let options = Options::default()
            .with_cors_proxy("https://proxy/")
            .with_cache_bust(true);
        let url = fetch_url("http://host/a.png", &options);
        assert!(url.starts_with("https://proxy/http://host/a.png?"));
    }
}
