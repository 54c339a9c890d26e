//! Document-title heuristics.
//!
//! Page titles usually carry the site name behind a separator
//! (`Article Title - Site`). This pass strips that chrome while guarding
//! against over-trimming: a result that loses too many words falls back to
//! the original title.

use crate::dom::{self, Document};
use crate::patterns;
use crate::text;

/// Derive the article title from `<title>`, `<h1>`/`<h2>` and separator
/// structure.
#[must_use]
pub fn article_title(doc: &Document) -> String {
    let orig_title = doc
        .select("title")
        .nodes()
        .first()
        .map(|t| t.text().trim().to_string())
        .unwrap_or_default();
    let mut cur_title = orig_title.clone();
    let mut had_hierarchical_separators = false;

    if patterns::TITLE_SEPARATOR.is_match(&cur_title) {
        had_hierarchical_separators = patterns::TITLE_HIERARCHY_SEP.is_match(&cur_title);
        cur_title = patterns::TITLE_BEFORE_LAST_SEPARATOR
            .replace(&orig_title, "$1")
            .into_owned();

        if text::word_count(&cur_title) < 3 {
            cur_title = patterns::TITLE_AFTER_FIRST_SEPARATOR
                .replace(&orig_title, "$1")
                .into_owned();
        }
    } else if cur_title.contains(": ") {
        // keep the full title when some heading spells it out exactly
        let trimmed = cur_title.trim().to_string();
        let heading_matches = doc
            .select("h1, h2")
            .nodes()
            .iter()
            .any(|h| h.text().trim() == trimmed);

        if !heading_matches {
            if let Some(idx) = orig_title.rfind(':') {
                cur_title = orig_title[idx + 1..].to_string();

                if text::word_count(&cur_title) < 3 {
                    if let Some(first) = orig_title.find(':') {
                        cur_title = orig_title[first + 1..].to_string();
                    }
                } else if let Some(first) = orig_title.find(':') {
                    if text::word_count(&orig_title[..first]) > 5 {
                        cur_title = orig_title.clone();
                    }
                }
            }
        }
    } else {
        let title_len = cur_title.chars().count();
        if title_len > 150 || title_len < 15 {
            let h1s = doc.select("h1").nodes().to_vec();
            if h1s.len() == 1 {
                cur_title = dom::inner_text(&h1s[0], true);
            }
        }
    }

    cur_title = text::normalize_spaces(&cur_title);

    // A short result only survives when separators were genuinely stripped
    // and at most one word was lost along the way.
    let cur_words = text::word_count(&cur_title);
    if cur_words <= 4 {
        let stripped: String = orig_title
            .chars()
            .filter(|c| !matches!(c, '|' | '-' | '\\' | '/' | '>' | '»' | '–' | '—'))
            .collect();
        let orig_words = text::word_count(&text::normalize_spaces(&stripped));
        let reduction = orig_words.saturating_sub(cur_words);
        if !had_hierarchical_separators || reduction > 1 {
            cur_title = text::normalize_spaces(&orig_title);
        }
    }

    cur_title
}
