//! Result record produced by a successful parse.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// The extracted article: cleaned content plus resolved metadata.
///
/// `content` holds the serialized HTML fragment of the article body;
/// `text_content` is its plain text. All metadata fields are optional since
/// real pages routinely omit them.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Article {
    /// Resolved article title.
    pub title: Option<String>,

    /// Serialized HTML fragment of the cleaned article content.
    pub content: Option<String>,

    /// Plain text of the article content.
    pub text_content: Option<String>,

    /// Character count of `text_content`.
    pub length: usize,

    /// Description or summary, from metadata or the first paragraph.
    pub excerpt: Option<String>,

    /// Author name(s).
    pub byline: Option<String>,

    /// Text direction of the document (`ltr`/`rtl`).
    pub dir: Option<String>,

    /// Publisher or site name.
    pub site_name: Option<String>,

    /// Language attribute of the document.
    pub lang: Option<String>,

    /// Published timestamp, verbatim as found in the document.
    pub published_time: Option<String>,
}

impl Article {
    /// Parse `published_time` into a UTC timestamp.
    ///
    /// Tries RFC 3339 first, then a bare `YYYY-MM-DDTHH:MM:SS`, then a bare
    /// date. Returns `None` when the field is absent or in a format none of
    /// these cover.
    #[must_use]
    pub fn published_date(&self) -> Option<DateTime<Utc>> {
        let raw = self.published_time.as_deref()?.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }

        if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
            return Some(dt.and_utc());
        }

        if let Ok(date) = chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
        }

        None
    }
}
