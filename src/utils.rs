use url::Url;

/// Filename used when the URL path has no final segment (e.g. ends in `/`).
pub const FALLBACK_FILENAME: &str = "image.jpg";

/// A URL is downloadable when it parses and carries both a scheme and a host.
/// Relative paths and free-form text fail the parse; scheme-only URLs like
/// `file:///x` have no host and are rejected before any network call.
pub fn is_downloadable_url(raw: &str) -> bool {
    match Url::parse(raw) {
        Ok(url) => url.host_str().map_or(false, |h| !h.is_empty()),
        Err(_) => false,
    }
}

/// Derive the target filename from the final path segment of the URL.
/// An empty segment (path `/` or trailing slash) falls back to `image.jpg`.
/// No sanitization or collision handling: same-name URLs overwrite each other.
pub fn filename_from_url(url: &Url) -> String {
    if let Some(segments) = url.path_segments() {
        if let Some(filename) = segments.last() {
            if !filename.is_empty() {
                return filename.to_string();
            }
        }
    }
    FALLBACK_FILENAME.to_string()
}
