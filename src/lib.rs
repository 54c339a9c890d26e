//! # rs-readerview
//!
//! Reader-view article extraction library.
//!
//! Given a noisy HTML page, this crate finds the primary readable article,
//! strips navigation, advertising, comments and related chrome, and returns
//! a cleaned HTML fragment together with derived metadata (title, byline,
//! excerpt, site name, published time, language, direction).
//!
//! ## Quick Start
//!
//! ```rust
//! use rs_readerview::parse;
//!
//! let html = r#"<html><head><title>My Article - Site</title></head>
//! <body><article><p>Main content here.</p></article></body></html>"#;
//!
//! match parse(html) {
//!     Ok(article) => {
//!         println!("Title: {:?}", article.title);
//!         println!("Text: {:?}", article.text_content);
//!     }
//!     Err(err) => eprintln!("extraction failed: {err}"),
//! }
//! ```
//!
//! ## How It Works
//!
//! Extraction runs in phases. Metadata is resolved first, from JSON-LD,
//! meta tags and title heuristics, while script elements are still present.
//! The document is then normalized: scripts and styles are removed, `<br>`
//! runs become paragraphs, and lazy-image fallbacks are unwrapped. The core
//! scoring engine walks the cleaned tree, filters unlikely candidates,
//! scores elements by text volume and comma density, propagates scores into
//! ancestors, and elects a top candidate adjusted for link density. The
//! candidate's qualifying siblings are assembled into the article
//! container, which is conditionally pruned and finally post-processed
//! (absolute URIs, collapsed wrappers, stripped classes).
//!
//! When a pass yields too little text, the extractor restores the pristine
//! document and retries with one heuristic filter relaxed, up to three
//! relaxations, returning the longest attempt if all fail the threshold.
//!
//! ## Configuration
//!
//! ```rust
//! use rs_readerview::{parse_with_options, Options};
//!
//! let html = "<html><body><article><p>Content.</p></article></body></html>";
//! let options = Options {
//!     char_threshold: 250,
//!     url: Some("https://example.com/story".to_string()),
//!     ..Options::default()
//! };
//! let _ = parse_with_options(html, &options);
//! ```

mod article;
mod cleaner;
mod error;
mod options;
mod parse;
mod patterns;
mod postprocess;
mod preprocess;
mod text;

/// DOM operations adapter over `dom_query`.
pub mod dom;

/// Declared-charset detection for byte input.
pub mod encoding;

/// Content extraction pipeline (traversal, scoring, retry control).
pub mod extractor;

/// Metadata extraction (JSON-LD, meta tags, title heuristics).
pub mod metadata;

/// URL validation and resolution utilities.
pub mod url_utils;

// Public API - re-exports
pub use article::Article;
pub use error::{Error, Result};
pub use options::{Options, SerializerFn};

/// Extract the readable article from an HTML document using default options.
///
/// # Errors
///
/// Returns [`Error::NoContent`] when no article content could be extracted,
/// or [`Error::TooManyElements`] when an element budget is configured and
/// exceeded.
///
/// # Example
///
/// ```rust
/// use rs_readerview::parse;
///
/// let html = "<html><body><article><p>Content</p></article></body></html>";
/// let article = parse(html)?;
/// println!("{} chars", article.length);
/// # Ok::<(), rs_readerview::Error>(())
/// ```
pub fn parse(html: &str) -> Result<Article> {
    parse_with_options(html, &Options::default())
}

/// Extract the readable article with custom options.
///
/// # Errors
///
/// Same failure modes as [`parse`].
pub fn parse_with_options(html: &str, options: &Options) -> Result<Article> {
    parse::parse_document(html, options)
}

/// Extract from raw HTML bytes, detecting the declared character encoding
/// and transcoding to UTF-8 first.
///
/// # Errors
///
/// Same failure modes as [`parse`]; encoding problems never fail, invalid
/// sequences decode to U+FFFD.
///
/// # Example
///
/// ```rust
/// use rs_readerview::parse_bytes;
///
/// let html = b"<html><head><meta charset=\"ISO-8859-1\"></head>\
///              <body><article><p>Caf\xE9 culture</p></article></body></html>";
/// let article = parse_bytes(html)?;
/// assert!(article.text_content.unwrap_or_default().contains("Caf\u{e9}"));
/// # Ok::<(), rs_readerview::Error>(())
/// ```
pub fn parse_bytes(html: &[u8]) -> Result<Article> {
    let html_str = encoding::decode(html);
    parse(&html_str)
}

/// Extract from raw HTML bytes with custom options.
///
/// # Errors
///
/// Same failure modes as [`parse`].
pub fn parse_bytes_with_options(html: &[u8], options: &Options) -> Result<Article> {
    let html_str = encoding::decode(html);
    parse_with_options(&html_str, options)
}
