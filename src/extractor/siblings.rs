//! Sibling assembly.
//!
//! The top candidate rarely holds the whole article: intro paragraphs and
//! continuation blocks often sit next to it. Siblings join the output when
//! their score clears a threshold derived from the top candidate, with a
//! bonus for sharing its class, or when they read like real paragraphs.

use crate::dom::{self, Document, NodeRef};
use crate::extractor::state::ScoreMap;
use crate::patterns;

/// Assemble the article container from the top candidate and its qualifying
/// siblings. Appending moves nodes, so the parent's child list is
/// snapshotted up front.
#[must_use]
pub fn assemble_article<'a>(
    doc: &'a Document,
    top_candidate: &NodeRef<'a>,
    scores: &ScoreMap,
) -> NodeRef<'a> {
    let article_content = dom::create_element(doc, "div");

    let top_score = scores.get(top_candidate.id).unwrap_or(0.0);
    let sibling_score_threshold = (top_score * 0.2).max(10.0);
    let top_class = dom::class_name(top_candidate);

    let siblings: Vec<NodeRef> = match top_candidate.parent() {
        Some(parent) => dom::element_children(&parent),
        None => vec![top_candidate.clone()],
    };

    for sibling in siblings {
        let mut append = false;

        if sibling.id == top_candidate.id {
            append = true;
        } else {
            let mut content_bonus = 0.0;
            if !top_class.is_empty() && dom::class_name(&sibling) == top_class {
                content_bonus = top_score * 0.2;
            }

            if let Some(sibling_score) = scores.get(sibling.id) {
                if sibling_score + content_bonus >= sibling_score_threshold {
                    append = true;
                }
            }

            if !append && dom::tag_name(&sibling) == "p" {
                let link_density = dom::link_density(&sibling);
                let node_content = dom::inner_text(&sibling, true);
                let node_length = node_content.chars().count();

                if node_length > 80 && link_density < 0.25 {
                    append = true;
                } else if node_length < 80
                    && node_length > 0
                    && link_density == 0.0
                    && patterns::SENTENCE_PERIOD.is_match(&node_content)
                {
                    append = true;
                }
            }
        }

        if append {
            if !dom::ALTER_TO_DIV_EXCEPTIONS.contains(&dom::tag_name(&sibling).as_str()) {
                dom::set_node_tag(&sibling, "div");
            }
            dom::append_node(&article_content, &sibling);
        }
    }

    article_content
}
