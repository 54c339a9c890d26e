//! Declared-charset detection and transcoding for byte input.
//!
//! The byte-accepting entry points need UTF-8 before the HTML parser runs.
//! The charset is taken from the document's own declaration; undeclared
//! input is treated as UTF-8. Decoding is always lossy, so malformed byte
//! sequences become U+FFFD instead of errors.

use std::sync::LazyLock;

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;

/// How far into the byte stream a charset declaration is searched for.
const DECLARATION_WINDOW: usize = 1024;

#[allow(clippy::expect_used)]
static META_CHARSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([^"'\s>;]+)"#).expect("META_CHARSET regex")
});

#[allow(clippy::expect_used)]
static HTTP_EQUIV_CHARSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)<meta[^>]+http-equiv\s*=\s*["']?content-type["']?[^>]*content\s*=\s*["']?[^"'>]*;\s*charset\s*=\s*([^"'\s>]+)"#,
    )
    .expect("HTTP_EQUIV_CHARSET regex")
});

/// Pick the encoding declared in the leading bytes of an HTML document.
///
/// `<meta charset>` wins over `http-equiv`; unknown labels and missing
/// declarations fall back to UTF-8.
#[must_use]
pub fn detect(html: &[u8]) -> &'static Encoding {
    let window = &html[..html.len().min(DECLARATION_WINDOW)];
    let head = String::from_utf8_lossy(window);

    for pattern in [&*META_CHARSET, &*HTTP_EQUIV_CHARSET] {
        if let Some(label) = pattern.captures(&head).and_then(|c| c.get(1)) {
            if let Some(encoding) = Encoding::for_label(label.as_str().as_bytes()) {
                return encoding;
            }
        }
    }

    UTF_8
}

/// Decode HTML bytes to a UTF-8 string using the declared encoding.
#[must_use]
pub fn decode(html: &[u8]) -> String {
    let encoding = detect(html);
    if encoding == UTF_8 {
        return String::from_utf8_lossy(html).into_owned();
    }
    let (decoded, _, _) = encoding.decode(html);
    decoded.into_owned()
}
