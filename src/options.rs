//! Configuration options for reader-view extraction.
//!
//! The `Options` struct controls extraction behavior. All fields are public
//! for easy configuration; use `Default::default()` for standard settings.

use dom_query::NodeRef;
use regex::Regex;

/// Signature of a custom content serializer.
///
/// Receives the article container element after post-processing and returns
/// the string stored in [`Article::content`](crate::Article). The default
/// serializer returns the container's inner HTML.
pub type SerializerFn = fn(&NodeRef) -> String;

/// Configuration options for reader-view extraction.
///
/// # Example
///
/// ```rust
/// use rs_readerview::Options;
///
/// // Use defaults
/// let options = Options::default();
///
/// // Customize specific fields
/// let options = Options {
///     char_threshold: 300,
///     keep_classes: true,
///     ..Options::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Options {
    /// Emit diagnostic log lines on stderr.
    ///
    /// Default: `false`
    pub debug: bool,

    /// Abort when the document holds more elements than this (0 = unlimited).
    ///
    /// The only guard against runaway inputs; when exceeded, extraction
    /// fails fast with [`Error::TooManyElements`](crate::Error).
    ///
    /// Default: `0`
    pub max_elems_to_parse: usize,

    /// Number of top-scored candidates retained for the alternate-ancestor
    /// promotion step.
    ///
    /// Default: `5`
    pub nb_top_candidates: usize,

    /// Minimum article text length (characters) accepted without retrying
    /// with relaxed filters.
    ///
    /// Default: `500`
    pub char_threshold: usize,

    /// Class names kept in the output in addition to `"page"`.
    ///
    /// Default: empty
    pub classes_to_preserve: Vec<String>,

    /// Skip class stripping entirely.
    ///
    /// Default: `false`
    pub keep_classes: bool,

    /// Custom serializer mapping the article container to the output string.
    ///
    /// Default: `None` (inner HTML)
    pub serializer: Option<SerializerFn>,

    /// Skip the JSON-LD metadata pass.
    ///
    /// The JSON-LD slot in the metadata priority order is simply left empty;
    /// meta-tag priorities are unchanged.
    ///
    /// Default: `false`
    pub disable_json_ld: bool,

    /// Override for the embedded-video allowlist pattern.
    ///
    /// An `<object>`, `<embed>` or `<iframe>` whose attributes or inner HTML
    /// match this pattern survives cleaning.
    ///
    /// Default: `None` (built-in allowlist of common video hosts)
    pub allowed_video_regex: Option<Regex>,

    /// Additive adjustment to the link-density thresholds used by
    /// conditional cleaning. Positive values keep more link-heavy content.
    ///
    /// Default: `0.0`
    pub link_density_modifier: f64,

    /// Source URL of the document, used to resolve relative URIs in the
    /// extracted content. Without it, relative URIs are left untouched.
    ///
    /// Default: `None`
    pub url: Option<String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            debug: false,
            max_elems_to_parse: 0,
            nb_top_candidates: 5,
            char_threshold: 500,
            classes_to_preserve: Vec::new(),
            keep_classes: false,
            serializer: None,
            disable_json_ld: false,
            allowed_video_regex: None,
            link_density_modifier: 0.0,
            url: None,
        }
    }
}
