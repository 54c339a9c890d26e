//! Metadata extraction: meta tags, JSON-LD, and title heuristics.
//!
//! Runs against the raw document, before any mutation removes script tags.
//! Each field is composed by priority: JSON-LD first, then the recognized
//! meta-tag families, then (for the title) the document-title heuristic.

pub mod json_ld;
pub mod title;

use std::collections::HashMap;

use crate::dom::{self, Document, Selection};
use crate::patterns;
use crate::text;
use crate::url_utils;

/// Metadata resolved once per parse. All values are entity-unescaped.
#[derive(Debug, Clone, Default)]
pub struct Metadata {
    pub title: Option<String>,
    pub byline: Option<String>,
    pub excerpt: Option<String>,
    pub site_name: Option<String>,
    pub published_time: Option<String>,
}

/// Harvest recognized `<meta>` values and compose the final metadata bag.
///
/// `json_ld` holds the values found by the JSON-LD pass (empty when that
/// pass is disabled); they take priority for every field.
#[must_use]
pub fn get_article_metadata(doc: &Document, json_ld: Metadata) -> Metadata {
    let values = collect_meta_values(doc);
    let get = |keys: &[&str]| -> Option<String> {
        keys.iter()
            .find_map(|k| values.get(*k))
            .map(|v| v.to_string())
    };

    let mut metadata = Metadata::default();

    metadata.title = json_ld.title.or_else(|| {
        get(&[
            "dc:title",
            "dcterm:title",
            "og:title",
            "weibo:article:title",
            "weibo:webpage:title",
            "title",
            "twitter:title",
            "parsely-title",
        ])
    });
    if metadata.title.as_deref().map_or(true, str::is_empty) {
        metadata.title = Some(title::article_title(doc));
    }

    // article:author is only trusted when it is not a profile URL
    let article_author = values
        .get("article:author")
        .filter(|v| !url_utils::is_absolute_url(v))
        .map(|v| v.to_string());
    metadata.byline = json_ld
        .byline
        .or_else(|| get(&["dc:creator", "dcterm:creator", "author", "parsely-author"]))
        .or(article_author);

    metadata.excerpt = json_ld.excerpt.or_else(|| {
        get(&[
            "dc:description",
            "dcterm:description",
            "og:description",
            "weibo:article:description",
            "weibo:webpage:description",
            "description",
            "twitter:description",
        ])
    });

    metadata.site_name = json_ld.site_name.or_else(|| get(&["og:site_name"]));

    metadata.published_time = json_ld
        .published_time
        .or_else(|| get(&["article:published_time", "parsely-pub-date"]));

    metadata.title = metadata.title.map(|v| text::unescape_html_entities(&v));
    metadata.byline = metadata.byline.map(|v| text::unescape_html_entities(&v));
    metadata.excerpt = metadata.excerpt.map(|v| text::unescape_html_entities(&v));
    metadata.site_name = metadata.site_name.map(|v| text::unescape_html_entities(&v));
    metadata.published_time = metadata
        .published_time
        .map(|v| text::unescape_html_entities(&v));

    metadata
}

/// Scan every `<meta>` element and collect values under normalized keys
/// (lowercase, whitespace stripped, dots converted to colons).
fn collect_meta_values(doc: &Document) -> HashMap<String, String> {
    let mut values = HashMap::new();

    for node in doc.select("meta").nodes() {
        let meta = Selection::from(node.clone());
        let content = match meta.attr("content") {
            Some(c) if !c.trim().is_empty() => c.trim().to_string(),
            _ => continue,
        };

        let mut matched_property = false;
        if let Some(property) = meta.attr("property") {
            // property can hold several space-separated keys
            for part in property.split_whitespace() {
                if let Some(m) = patterns::META_PROPERTY.find(part) {
                    let key = part[m.range()]
                        .to_lowercase()
                        .replace(char::is_whitespace, "");
                    values.insert(key, content.clone());
                    matched_property = true;
                }
            }
        }

        if !matched_property {
            if let Some(name) = meta.attr("name") {
                if patterns::META_NAME.is_match(&name) {
                    let key = name
                        .to_lowercase()
                        .replace(char::is_whitespace, "")
                        .replace('.', ":");
                    values.insert(key, content);
                }
            }
        }
    }

    values
}

/// Read the language attribute from the document root.
#[must_use]
pub fn document_lang(doc: &Document) -> Option<String> {
    dom::document_element(doc)
        .and_then(|html| dom::get_attribute(&html, "lang"))
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
}

/// Read the text direction from the document root.
#[must_use]
pub fn document_dir(doc: &Document) -> Option<String> {
    dom::document_element(doc)
        .and_then(|html| dom::get_attribute(&html, "dir"))
        .map(|d| d.trim().to_lowercase())
        .filter(|d| !d.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_og_and_twitter_meta() {
        let html = r#"<html><head>
            <meta property="og:title" content="OG Title">
            <meta property="og:description" content="OG Description">
            <meta property="og:site_name" content="Example News">
            <meta name="twitter:title" content="Twitter Title">
        </head><body></body></html>"#;
        let doc = Document::from(html);
        let metadata = get_article_metadata(&doc, Metadata::default());

        assert_eq!(metadata.title.as_deref(), Some("OG Title"));
        assert_eq!(metadata.excerpt.as_deref(), Some("OG Description"));
        assert_eq!(metadata.site_name.as_deref(), Some("Example News"));
    }

    #[test]
    fn test_dublin_core_beats_og_for_title() {
        let html = r#"<html><head>
            <meta property="og:title" content="OG Title">
            <meta name="dc.title" content="DC Title">
        </head><body></body></html>"#;
        let doc = Document::from(html);
        let metadata = get_article_metadata(&doc, Metadata::default());

        assert_eq!(metadata.title.as_deref(), Some("DC Title"));
    }

    #[test]
    fn test_json_ld_wins_over_meta() {
        let html = r#"<html><head>
            <meta property="og:title" content="OG Title">
        </head><body></body></html>"#;
        let doc = Document::from(html);
        let json_ld = Metadata {
            title: Some("Structured Title".to_string()),
            ..Metadata::default()
        };
        let metadata = get_article_metadata(&doc, json_ld);

        assert_eq!(metadata.title.as_deref(), Some("Structured Title"));
    }

    #[test]
    fn test_url_shaped_article_author_rejected() {
        let html = r#"<html><head>
            <meta property="article:author" content="https://facebook.com/some.author">
        </head><body></body></html>"#;
        let doc = Document::from(html);
        let metadata = get_article_metadata(&doc, Metadata::default());

        assert!(metadata.byline.is_none());
    }

    #[test]
    fn test_plain_article_author_accepted() {
        let html = r#"<html><head>
            <meta property="article:author" content="Jane Doe">
        </head><body></body></html>"#;
        let doc = Document::from(html);
        let metadata = get_article_metadata(&doc, Metadata::default());

        assert_eq!(metadata.byline.as_deref(), Some("Jane Doe"));
    }

    #[test]
    fn test_author_meta_beats_article_author() {
        let html = r#"<html><head>
            <meta name="author" content="Named Author">
            <meta property="article:author" content="Other Author">
        </head><body></body></html>"#;
        let doc = Document::from(html);
        let metadata = get_article_metadata(&doc, Metadata::default());

        assert_eq!(metadata.byline.as_deref(), Some("Named Author"));
    }

    #[test]
    fn test_published_time_from_meta() {
        let html = r#"<html><head>
            <meta property="article:published_time" content="2024-03-01T09:00:00Z">
        </head><body></body></html>"#;
        let doc = Document::from(html);
        let metadata = get_article_metadata(&doc, Metadata::default());

        assert_eq!(
            metadata.published_time.as_deref(),
            Some("2024-03-01T09:00:00Z")
        );
    }

    #[test]
    fn test_entities_unescaped() {
        let html = r#"<html><head>
            <meta property="og:title" content="Ben &amp; Jerry &#8212; a history">
        </head><body></body></html>"#;
        let doc = Document::from(html);
        let metadata = get_article_metadata(&doc, Metadata::default());

        assert_eq!(
            metadata.title.as_deref(),
            Some("Ben & Jerry \u{2014} a history")
        );
    }

    #[test]
    fn test_weibo_name_keys_normalized() {
        let html = r#"<html><head>
            <meta name="weibo:article.title" content="Weibo Title">
        </head><body></body></html>"#;
        let doc = Document::from(html);
        let metadata = get_article_metadata(&doc, Metadata::default());

        assert_eq!(metadata.title.as_deref(), Some("Weibo Title"));
    }

    #[test]
    fn test_lang_and_dir() {
        let html = r#"<html lang="fa" dir="RTL"><head></head><body></body></html>"#;
        let doc = Document::from(html);

        assert_eq!(document_lang(&doc).as_deref(), Some("fa"));
        assert_eq!(document_dir(&doc).as_deref(), Some("rtl"));
    }
}
