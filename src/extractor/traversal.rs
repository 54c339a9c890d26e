//! Candidate traversal.
//!
//! One depth-first walk over the document that removes hidden and unlikely
//! elements, captures the byline, promotes naked text inside `<div>`s into
//! paragraphs, and enqueues every scorable element for the scoring pass.

use crate::dom::{self, Document, NodeRef};
use crate::extractor::state::Flags;
use crate::patterns;
use crate::text;

/// Tags whose elements are scored directly.
const DEFAULT_TAGS_TO_SCORE: &[&str] =
    &["section", "h2", "h3", "h4", "h5", "h6", "p", "td", "pre"];

/// Tags removed outright when they carry no content.
const REMOVABLE_WHEN_EMPTY: &[&str] =
    &["div", "section", "header", "h1", "h2", "h3", "h4", "h5", "h6"];

/// What the traversal found: the scorable elements and a byline if one was
/// recognized along the way.
pub struct TraversalOutcome<'a> {
    pub elements_to_score: Vec<NodeRef<'a>>,
    pub byline: Option<String>,
}

/// Walk the document and collect scorable elements.
///
/// `article_title` powers duplicate-header removal; `capture_byline` is
/// false when metadata already supplied an author, which disables both the
/// capture and the removal of byline elements.
#[must_use]
pub fn collect_candidates<'a>(
    doc: &'a Document,
    article_title: &str,
    capture_byline: bool,
    flags: &Flags,
) -> TraversalOutcome<'a> {
    let mut elements_to_score: Vec<NodeRef<'a>> = Vec::new();
    let mut byline: Option<String> = None;

    let mut node_opt = dom::document_element(doc);
    while let Some(node) = node_opt {
        let tag = dom::tag_name(&node);
        let match_string = dom::match_string(&node);

        if !dom::is_probably_visible(&node) {
            node_opt = dom::remove_and_get_next(&node);
            continue;
        }

        if capture_byline && byline.is_none() {
            if let Some(found) = check_byline(&node, &match_string) {
                byline = Some(found);
                node_opt = dom::remove_and_get_next(&node);
                continue;
            }
        }

        if header_duplicates_title(&node, &tag, article_title) {
            node_opt = dom::remove_and_get_next(&node);
            continue;
        }

        if flags.strip_unlikelys {
            if patterns::UNLIKELY_CANDIDATES.is_match(&match_string)
                && !patterns::OK_MAYBE_ITS_A_CANDIDATE.is_match(&match_string)
                && !dom::has_ancestor_tag(&node, "table", -1, None)
                && !dom::has_ancestor_tag(&node, "code", -1, None)
                && tag != "body"
                && tag != "a"
            {
                node_opt = dom::remove_and_get_next(&node);
                continue;
            }

            if let Some(role) = dom::get_attribute(&node, "role") {
                if patterns::UNLIKELY_ROLES.contains(&role.as_str()) {
                    node_opt = dom::remove_and_get_next(&node);
                    continue;
                }
            }
        }

        if REMOVABLE_WHEN_EMPTY.contains(&tag.as_str()) && dom::is_element_without_content(&node) {
            node_opt = dom::remove_and_get_next(&node);
            continue;
        }

        if DEFAULT_TAGS_TO_SCORE.contains(&tag.as_str()) {
            elements_to_score.push(node.clone());
        }

        if tag == "div" {
            wrap_phrasing_runs(doc, &node);

            // A div holding nothing but one paragraph of low link density is
            // noise wrapping; the paragraph takes its place.
            if dom::has_single_tag_inside(&node, "p") && dom::link_density(&node) < 0.25 {
                let paragraph = dom::element_children(&node)[0].clone();
                dom::replace_node(&node, &paragraph);
                elements_to_score.push(paragraph.clone());
                node_opt = dom::next_node(&paragraph, false);
                continue;
            } else if !dom::has_child_block_element(&node) {
                dom::set_node_tag(&node, "p");
                elements_to_score.push(node.clone());
            }
        }

        node_opt = dom::next_node(&node, false);
    }

    TraversalOutcome {
        elements_to_score,
        byline,
    }
}

/// Group consecutive phrasing-content children of a `<div>` into `<p>`
/// wrappers, skipping leading whitespace.
fn wrap_phrasing_runs(doc: &Document, node: &NodeRef) {
    let mut paragraph: Option<NodeRef> = None;
    for child in dom::child_nodes(node) {
        if dom::is_phrasing_content(&child) {
            if let Some(ref p) = paragraph {
                dom::append_node(p, &child);
            } else if !dom::is_whitespace(&child) {
                let p = dom::create_element(doc, "p");
                dom::replace_node(&child, &p);
                dom::append_node(&p, &child);
                paragraph = Some(p);
            }
        } else if let Some(p) = paragraph.take() {
            trim_trailing_whitespace(&p);
        }
    }
    if let Some(p) = paragraph {
        trim_trailing_whitespace(&p);
    }
}

fn trim_trailing_whitespace(node: &NodeRef) {
    while let Some(last) = node.last_child() {
        if !dom::is_whitespace(&last) {
            break;
        }
        last.remove_from_parent();
    }
}

/// Recognize a byline element by its rel/itemprop/class/id tokens and a
/// plausibly short text.
fn check_byline(node: &NodeRef, match_string: &str) -> Option<String> {
    let rel = dom::get_attribute(node, "rel").unwrap_or_default();
    let itemprop = dom::get_attribute(node, "itemprop").unwrap_or_default();

    let looks_like_byline = rel == "author"
        || itemprop.contains("author")
        || patterns::BYLINE.is_match(match_string);
    if !looks_like_byline {
        return None;
    }

    let text = node.text().trim().to_string();
    let len = text.chars().count();
    if len > 0 && len < 100 {
        Some(text)
    } else {
        None
    }
}

/// An `<h1>`/`<h2>` restating the resolved article title adds nothing to
/// the extracted body.
fn header_duplicates_title(node: &NodeRef, tag: &str, article_title: &str) -> bool {
    if tag != "h1" && tag != "h2" || article_title.is_empty() {
        return false;
    }
    let heading = dom::inner_text(node, false);
    text::similarity(article_title, &heading) > 0.75
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::state::Flags;

    fn run(html: &str) -> (Document, Option<String>) {
        let doc = Document::from(html.to_string());
        let byline = {
            let outcome = collect_candidates(&doc, "", true, &Flags::all());
            outcome.byline
        };
        (doc, byline)
    }

    #[test]
    fn hidden_elements_removed() {
        let (doc, _) = run(concat!(
            "<html><body>",
            r#"<div style="display:none">secret</div>"#,
            r#"<div hidden>also secret</div>"#,
            "<p>visible text that stays in the document</p>",
            "</body></html>",
        ));
        assert_eq!(doc.select("div").length(), 0);
        assert_eq!(doc.select("p").length(), 1);
    }

    #[test]
    fn byline_captured_and_removed() {
        let (doc, byline) = run(concat!(
            "<html><body>",
            r#"<div class="byline">By Jane Doe</div>"#,
            "<p>article text</p>",
            "</body></html>",
        ));
        assert_eq!(byline.as_deref(), Some("By Jane Doe"));
        assert!(doc.select(".byline").is_empty());
    }

    #[test]
    fn byline_ignored_when_metadata_has_author() {
        let doc = Document::from(concat!(
            "<html><body>",
            r#"<div class="byline">By Jane Doe</div>"#,
            "</body></html>",
        ));
        let outcome = collect_candidates(&doc, "", false, &Flags::all());
        assert!(outcome.byline.is_none());
        assert!(doc.select(".byline").exists());
    }

    #[test]
    fn overlong_byline_rejected() {
        let filler = "word ".repeat(30);
        let html = format!(
            r#"<html><body><div class="author">{filler}</div></body></html>"#
        );
        let (doc, byline) = run(&html);
        assert!(byline.is_none());
        assert!(doc.select(".author").exists());
    }

    #[test]
    fn unlikely_candidates_stripped() {
        let (doc, _) = run(concat!(
            "<html><body>",
            r#"<div class="sidebar">navigation links</div>"#,
            r#"<div class="sidebar article">rescued by content token</div>"#,
            "<p>body text</p>",
            "</body></html>",
        ));
        assert_eq!(doc.select("div").length(), 1);
        assert!(doc.select("div").text().contains("rescued"));
    }

    #[test]
    fn unlikely_strip_respects_relaxed_flag() {
        let doc = Document::from(
            r#"<html><body><div class="sidebar">kept now</div></body></html>"#,
        );
        let flags = Flags {
            strip_unlikelys: false,
            ..Flags::all()
        };
        let _ = collect_candidates(&doc, "", true, &flags);
        assert!(doc.select(".sidebar").exists());
    }

    #[test]
    fn unlikely_roles_removed() {
        let (doc, _) = run(concat!(
            "<html><body>",
            r#"<div role="navigation">site nav</div>"#,
            r#"<div role="main"><p>content</p></div>"#,
            "</body></html>",
        ));
        assert!(doc.select("[role=navigation]").is_empty());
        assert!(doc.select("[role=main]").exists());
    }

    #[test]
    fn empty_sections_removed() {
        let (doc, _) = run(concat!(
            "<html><body>",
            "<section></section><header><br></header>",
            "<section><p>kept</p></section>",
            "</body></html>",
        ));
        assert_eq!(doc.select("section").length(), 1);
        assert!(doc.select("header").is_empty());
    }

    #[test]
    fn title_duplicate_heading_removed() {
        let doc = Document::from(concat!(
            "<html><body>",
            "<h1>The Article Title Of The Day</h1>",
            "<h2>A Genuinely Different Subheading</h2>",
            "</body></html>",
        ));
        let _ = collect_candidates(&doc, "The Article Title Of The Day", true, &Flags::all());
        assert!(doc.select("h1").is_empty());
        assert!(doc.select("h2").exists());
    }

    #[test]
    fn bare_text_div_becomes_paragraph() {
        let (doc, _) = run(concat!(
            "<html><body>",
            "<div id=\"bare\">just some inline text with <em>emphasis</em></div>",
            "</body></html>",
        ));
        // the phrasing run is wrapped in a fresh <p>, which then replaces
        // the now-redundant div wrapper entirely
        assert!(doc.select("div#bare").is_empty());
        let p = doc.select("body > p");
        assert!(p.exists());
        assert!(p.text().contains("just some inline text"));
    }

    #[test]
    fn div_with_single_paragraph_unwrapped() {
        let (doc, _) = run(concat!(
            "<html><body>",
            r#"<div id="wrap"><p id="inner">paragraph content here</p></div>"#,
            "</body></html>",
        ));
        assert!(doc.select("div#wrap").is_empty());
        assert!(doc.select("p#inner").exists());
    }

    #[test]
    fn phrasing_runs_wrapped_in_paragraphs() {
        let (doc, _) = run(concat!(
            "<html><body>",
            "<div id=\"mix\">leading text<span>inline</span><blockquote>block</blockquote>tail text</div>",
            "</body></html>",
        ));
        // text before the block and after it each get their own paragraph
        assert_eq!(doc.select("#mix > p").length(), 2);
        assert_eq!(doc.select("#mix > blockquote").length(), 1);
    }
}
