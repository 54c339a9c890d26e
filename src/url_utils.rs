//! URL utility functions.
//!
//! Validation and resolution helpers for rewriting relative URIs in
//! extracted content and for rejecting URL-shaped metadata values.
//! Resolution never fails loudly: a URI the `url` crate cannot handle is
//! passed through unchanged.

use url::Url;

/// Check if a string is a valid absolute http(s) URL.
///
/// Used to reject byline values sourced from `article:author`, which some
/// sites fill with a profile link instead of a name.
#[must_use]
pub fn is_absolute_url(s: &str) -> bool {
    let s = s.trim();

    if !s.starts_with("http://") && !s.starts_with("https://") {
        return false;
    }

    match Url::parse(s) {
        Ok(url) => url.host().is_some(),
        Err(_) => false,
    }
}

/// Resolve a possibly-relative URI against a base.
///
/// Fragment-only URIs are kept verbatim when the base URI and the document
/// URI coincide, so intra-article anchors keep working. On resolution
/// failure the original string is returned.
#[must_use]
pub fn to_absolute_uri(uri: &str, base: &Url, base_is_document_uri: bool) -> String {
    if base_is_document_uri && uri.starts_with('#') {
        return uri.to_string();
    }

    match base.join(uri) {
        Ok(resolved) => resolved.to_string(),
        Err(_) => uri.to_string(),
    }
}
