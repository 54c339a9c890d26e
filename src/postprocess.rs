//! Post-processing of the extracted article.
//!
//! Runs once, on the winning extraction attempt: resolves relative URIs
//! against the document base (including `srcset` entries), neutralizes
//! `javascript:` links, collapses redundant nested wrappers, and strips
//! class attributes down to the preserved set.

use url::Url;

use crate::dom::{self, NodeRef, Selection};
use crate::options::Options;
use crate::patterns;
use crate::url_utils;

/// Base URI context for relative-URI resolution, derived from the original
/// document's `<base href>` and the configured document URL.
pub struct BaseUris {
    /// The URI to resolve relative references against.
    pub base: Url,
    /// Whether the base equals the document URI (fragment links stay as-is).
    pub base_is_document_uri: bool,
}

impl BaseUris {
    /// Combine the document URL option with a `<base href>` declaration.
    /// Returns `None` when no absolute base can be established, in which
    /// case URI rewriting is skipped entirely.
    #[must_use]
    pub fn resolve(document_url: Option<&str>, base_href: Option<&str>) -> Option<Self> {
        let document_url = document_url.and_then(|u| Url::parse(u).ok());

        let base = match (&document_url, base_href) {
            (Some(doc_url), Some(href)) => doc_url.join(href).ok().or_else(|| document_url.clone()),
            (None, Some(href)) => Url::parse(href).ok(),
            (Some(_), None) => document_url.clone(),
            (None, None) => None,
        }?;

        let base_is_document_uri = match &document_url {
            Some(doc_url) => *doc_url == base,
            None => false,
        };

        Some(Self {
            base,
            base_is_document_uri,
        })
    }
}

/// Run all post-processing steps on the article container.
pub fn post_process(article: &NodeRef, base_uris: Option<&BaseUris>, opts: &Options) {
    if let Some(uris) = base_uris {
        fix_relative_uris(article, uris);
    }

    simplify_nested_elements(article);

    if !opts.keep_classes {
        clean_classes(article, &opts.classes_to_preserve);
    }
}

/// Rewrite link and media URIs to absolute form. `javascript:` links are
/// replaced by their text.
fn fix_relative_uris(article: &NodeRef, uris: &BaseUris) {
    for link in dom::descendants_by_tag(article, &["a"]) {
        let Some(href) = dom::get_attribute(&link, "href") else {
            continue;
        };

        if href.starts_with("javascript:") {
            let children = dom::child_nodes(&link);
            if children.len() == 1 && children[0].is_text() {
                // a plain text link: keep just the text
                let text = escape_text(&children[0].text());
                Selection::from(link).replace_with_html(text.as_str());
            } else {
                // keep the children, dropping only the link behavior
                let wrapped = format!("<span>{}</span>", dom::inner_html(&link));
                Selection::from(link).replace_with_html(wrapped.as_str());
            }
        } else {
            let resolved = url_utils::to_absolute_uri(&href, &uris.base, uris.base_is_document_uri);
            link.set_attr("href", &resolved);
        }
    }

    for media in dom::descendants_by_tag(
        article,
        &["img", "picture", "figure", "video", "audio", "source"],
    ) {
        for attr in ["src", "poster"] {
            if let Some(value) = dom::get_attribute(&media, attr) {
                let resolved =
                    url_utils::to_absolute_uri(&value, &uris.base, uris.base_is_document_uri);
                media.set_attr(attr, &resolved);
            }
        }

        if let Some(srcset) = dom::get_attribute(&media, "srcset") {
            let rewritten = patterns::SRCSET_URL.replace_all(&srcset, |caps: &regex::Captures| {
                let resolved =
                    url_utils::to_absolute_uri(&caps[1], &uris.base, uris.base_is_document_uri);
                format!(
                    "{}{}{}",
                    resolved,
                    caps.get(2).map_or("", |m| m.as_str()),
                    &caps[3]
                )
            });
            media.set_attr("srcset", &rewritten);
        }
    }
}

/// Minimal text-to-markup escaping for replacing a link with its label.
fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Collapse `<div>`/`<section>` wrappers that add nothing: empty ones are
/// dropped, and a wrapper whose only content is another wrapper is replaced
/// by its child (inheriting the parent's attributes).
fn simplify_nested_elements(article: &NodeRef) {
    let mut node_opt = Some(article.clone());
    while let Some(node) = node_opt {
        let tag = dom::tag_name(&node);
        let is_wrapper = node.parent().is_some()
            && (tag == "div" || tag == "section")
            && !dom::id(&node).starts_with("readability");

        if is_wrapper {
            if dom::is_element_without_content(&node) {
                node_opt = dom::remove_and_get_next(&node);
                continue;
            }
            if dom::has_single_tag_inside(&node, "div")
                || dom::has_single_tag_inside(&node, "section")
            {
                let child = dom::element_children(&node)[0].clone();
                dom::copy_attributes(&node, &child);
                dom::replace_node(&node, &child);
                node_opt = Some(child);
                continue;
            }
        }

        node_opt = dom::next_node(&node, false);
    }
}

/// Strip class attributes down to the preserved set (`page` plus the
/// configured extras).
fn clean_classes(node: &NodeRef, extra_preserved: &[String]) {
    if let Some(class) = dom::get_attribute(node, "class") {
        let kept: Vec<&str> = class
            .split_whitespace()
            .filter(|c| *c == "page" || extra_preserved.iter().any(|p| p == c))
            .collect();
        if kept.is_empty() {
            node.remove_attr("class");
        } else {
            node.set_attr("class", &kept.join(" "));
        }
    }

    for child in dom::element_children(node) {
        clean_classes(&child, extra_preserved);
    }
}
