//! Error types for reader-view extraction.
//!
//! Heuristic failures (unparseable JSON-LD, malformed URIs, unknown tags)
//! are recovered locally and never surface here; only structural problems do.

/// Error type for extraction operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The document exceeds the configured element budget.
    #[error("document holds {count} elements, more than the configured maximum of {max}")]
    TooManyElements {
        /// Number of elements found in the document.
        count: usize,
        /// The configured `max_elems_to_parse` ceiling.
        max: usize,
    },

    /// Every extraction pass was exhausted and even the longest attempt
    /// produced no article text.
    #[error("no extractable article content found")]
    NoContent,

    /// The DOM backend returned a structure the pipeline cannot operate on.
    #[error("DOM contract violation: {0}")]
    DomContract(String),
}

/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, Error>;
