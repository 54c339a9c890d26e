//! JSON-LD metadata parsing.
//!
//! Extracts article metadata from Schema.org JSON-LD embedded in
//! `<script type="application/ld+json">` elements. Unparseable scripts and
//! non-article schemas are skipped silently; the first article-typed schema
//! with a valid Schema.org context wins.

use serde_json::Value;

use crate::dom::{Document, Selection};
use crate::metadata::{title, Metadata};
use crate::patterns;
use crate::text;

/// Extract metadata from the document's JSON-LD scripts.
#[must_use]
pub fn get_json_ld(doc: &Document) -> Metadata {
    for script in doc.select(r#"script[type="application/ld+json"]"#).nodes() {
        let raw = Selection::from(script.clone()).text().to_string();
        let content = patterns::JSONLD_CDATA.replace_all(raw.trim(), "");

        let parsed: Value = match serde_json::from_str(&content) {
            Ok(v) => v,
            Err(_) => continue,
        };

        if let Some(metadata) = extract_from_value(parsed, doc) {
            return metadata;
        }
    }

    Metadata::default()
}

/// Validate one JSON-LD payload and pull the article fields out of it.
fn extract_from_value(mut parsed: Value, doc: &Document) -> Option<Metadata> {
    // A top-level array: take the first article-typed entry
    parsed = match parsed {
        Value::Array(items) => items.into_iter().find(is_article_typed)?,
        other => other,
    };

    if !has_schema_org_context(&parsed) {
        return None;
    }

    // No @type but a @graph array: search the graph for the article
    if parsed.get("@type").is_none() {
        if let Some(graph) = parsed.get("@graph").and_then(Value::as_array) {
            parsed = graph.iter().find(|v| is_article_typed(v)).cloned()?;
        }
    }

    if !is_article_typed(&parsed) {
        return None;
    }

    let mut metadata = Metadata::default();

    let name = parsed.get("name").and_then(Value::as_str);
    let headline = parsed.get("headline").and_then(Value::as_str);
    metadata.title = match (name, headline) {
        (Some(name), Some(headline)) if name != headline => {
            // Both present and different: prefer whichever resembles the
            // page title, with name winning ties.
            let doc_title = title::article_title(doc);
            let name_matches = text::similarity(name, &doc_title) > 0.75;
            let headline_matches = text::similarity(headline, &doc_title) > 0.75;
            if headline_matches && !name_matches {
                Some(headline.trim().to_string())
            } else {
                Some(name.trim().to_string())
            }
        }
        (Some(name), _) => Some(name.trim().to_string()),
        (None, Some(headline)) => Some(headline.trim().to_string()),
        (None, None) => None,
    };

    if let Some(author) = parsed.get("author") {
        if let Some(single) = author.get("name").and_then(Value::as_str) {
            metadata.byline = Some(single.trim().to_string());
        } else if let Some(authors) = author.as_array() {
            let names: Vec<String> = authors
                .iter()
                .filter_map(|a| a.get("name").and_then(Value::as_str))
                .map(|n| n.trim().to_string())
                .collect();
            if !names.is_empty() {
                metadata.byline = Some(names.join(", "));
            }
        }
    }

    metadata.excerpt = parsed
        .get("description")
        .and_then(Value::as_str)
        .map(|d| d.trim().to_string());

    metadata.site_name = parsed
        .get("publisher")
        .and_then(|p| p.get("name"))
        .and_then(Value::as_str)
        .map(|n| n.trim().to_string());

    metadata.published_time = parsed
        .get("datePublished")
        .and_then(Value::as_str)
        .map(|d| d.trim().to_string());

    Some(metadata)
}

/// Whether a JSON value carries an article `@type`.
fn is_article_typed(value: &Value) -> bool {
    value
        .get("@type")
        .and_then(Value::as_str)
        .is_some_and(|t| patterns::JSONLD_ARTICLE_TYPES.is_match(t))
}

/// Accept `@context` as a Schema.org string, or an object whose `@vocab`
/// points at Schema.org.
fn has_schema_org_context(value: &Value) -> bool {
    match value.get("@context") {
        Some(Value::String(ctx)) => patterns::SCHEMA_DOT_ORG.is_match(ctx),
        Some(Value::Object(ctx)) => ctx
            .get("@vocab")
            .and_then(Value::as_str)
            .is_some_and(|v| patterns::SCHEMA_DOT_ORG.is_match(v)),
        _ => false,
    }
}
