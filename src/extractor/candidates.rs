//! Top-candidate selection.
//!
//! Takes the ranked candidate list and settles on the element the article
//! is assembled around: promotes an ancestor shared by enough runner-up
//! candidates, climbs toward better-scoring or split parents, and falls
//! back to wrapping the whole `<body>` when scoring found nothing.

use crate::dom::{self, Document, NodeRef};
use crate::extractor::scoring;
use crate::extractor::state::{Flags, ScoreMap};

/// How many runner-up ancestor chains must share an element before it
/// displaces the top candidate.
const MINIMUM_TOPCANDIDATES: usize = 3;

/// The selected top candidate. `fabricated` marks the body-wrapping
/// fallback container, which later receives the page id/class itself.
pub struct TopCandidate<'a> {
    pub node: NodeRef<'a>,
    pub fabricated: bool,
}

/// Choose the element to build the article from.
///
/// Returns `None` only when the document has no `<body>` to fall back to.
#[must_use]
pub fn select_top_candidate<'a>(
    doc: &'a Document,
    top_candidates: &[NodeRef<'a>],
    scores: &mut ScoreMap,
    flags: &Flags,
) -> Option<TopCandidate<'a>> {
    let first = top_candidates.first().cloned();

    let needs_fabrication = match first {
        None => true,
        Some(ref candidate) => dom::tag_name(candidate) == "body",
    };
    if needs_fabrication {
        // Nothing usable was scored: move everything into a fresh container
        // so the rest of the pipeline has a single root to work with.
        let body = dom::body(doc)?;
        let container = dom::create_element(doc, "div");
        for child in dom::child_nodes(&body) {
            dom::append_node(&container, &child);
        }
        dom::append_node(&body, &container);
        scoring::initialize_node(&container, scores, flags);
        return Some(TopCandidate {
            node: container,
            fabricated: true,
        });
    }

    let mut top = first?;

    // An ancestor appearing in enough strong runner-up chains is a better
    // article root than any single candidate (split-container pages).
    let top_score = scores.get(top.id).unwrap_or(0.0);
    let mut alternative_ancestors: Vec<Vec<dom_query::NodeId>> = Vec::new();
    for candidate in &top_candidates[1..] {
        let candidate_score = scores.get(candidate.id).unwrap_or(0.0);
        if top_score > 0.0 && candidate_score / top_score >= 0.75 {
            alternative_ancestors.push(
                dom::node_ancestors(candidate, 0)
                    .iter()
                    .map(|a| a.id)
                    .collect(),
            );
        }
    }

    if alternative_ancestors.len() >= MINIMUM_TOPCANDIDATES {
        let mut parent = top.parent();
        while let Some(p) = parent {
            if !p.is_element() || dom::tag_name(&p) == "body" {
                break;
            }
            let lists_containing = alternative_ancestors
                .iter()
                .filter(|chain| chain.contains(&p.id))
                .count();
            if lists_containing >= MINIMUM_TOPCANDIDATES {
                top = p;
                break;
            }
            parent = p.parent();
        }
    }

    if !scores.contains(top.id) {
        scoring::initialize_node(&top, scores, flags);
    }

    // Climb parents while their score keeps growing; a parent outscoring
    // the child usually holds the paragraphs the child split off from.
    let mut parent = top.parent();
    let mut last_score = scores.get(top.id).unwrap_or(0.0);
    let score_threshold = last_score / 3.0;
    while let Some(p) = parent {
        if !p.is_element() || dom::tag_name(&p) == "body" {
            break;
        }
        let Some(parent_score) = scores.get(p.id) else {
            parent = p.parent();
            continue;
        };
        if parent_score < score_threshold {
            break;
        }
        if parent_score > last_score {
            top = p;
            break;
        }
        last_score = parent_score;
        parent = p.parent();
    }

    // A lone child tells us nothing; the wrapper is the real content root.
    let mut parent = top.parent();
    while let Some(p) = parent {
        if !p.is_element() || dom::tag_name(&p) == "body" {
            break;
        }
        if dom::element_children(&p).len() != 1 {
            break;
        }
        top = p;
        parent = top.parent();
    }

    if !scores.contains(top.id) {
        scoring::initialize_node(&top, scores, flags);
    }

    Some(TopCandidate {
        node: top,
        fabricated: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fabricates_container_from_body() {
        let doc = Document::from("<html><body><p>a</p><p>b</p></body></html>");
        let mut scores = ScoreMap::new();

        let top = select_top_candidate(&doc, &[], &mut scores, &Flags::all()).unwrap();
        assert!(top.fabricated);
        assert_eq!(dom::tag_name(&top.node), "div");
        // body children were moved inside the fabricated container
        assert_eq!(dom::element_children(&top.node).len(), 2);
        assert!(scores.contains(top.node.id));
    }

    #[test]
    fn single_child_wrappers_climbed() {
        let doc = Document::from(concat!(
            "<html><body><div id=\"outer\"><div id=\"inner\">",
            "<p>text</p><p>more</p></div></div>",
            "<aside>side</aside></body></html>",
        ));
        let mut scores = ScoreMap::new();
        let inner = doc.select("#inner").nodes().first().cloned().unwrap();
        scores.set(inner.id, 40.0);

        let top = select_top_candidate(&doc, &[inner], &mut scores, &Flags::all()).unwrap();
        assert_eq!(dom::id(&top.node), "outer");
        assert!(!top.fabricated);
    }

    #[test]
    fn higher_scoring_parent_adopted() {
        let doc = Document::from(concat!(
            "<html><body><div id=\"parent\">",
            "<div id=\"child\"><p>text</p></div>",
            "<div id=\"other\"><p>more</p></div>",
            "</div><p>stray</p></body></html>",
        ));
        let mut scores = ScoreMap::new();
        let parent = doc.select("#parent").nodes().first().cloned().unwrap();
        let child = doc.select("#child").nodes().first().cloned().unwrap();
        scores.set(child.id, 30.0);
        scores.set(parent.id, 45.0);

        let top = select_top_candidate(&doc, &[child], &mut scores, &Flags::all()).unwrap();
        assert_eq!(dom::id(&top.node), "parent");
    }

    #[test]
    fn shared_ancestor_promoted_over_top() {
        // Four candidates inside #common score close to the leader, so the
        // shared container takes over as the article root.
        let doc = Document::from(concat!(
            "<html><body><div id=\"wrap\"><div id=\"common\">",
            "<div id=\"c0\"><p>t</p></div>",
            "<div id=\"c1\"><p>t</p></div>",
            "<div id=\"c2\"><p>t</p></div>",
            "<div id=\"c3\"><p>t</p></div>",
            "</div><p>stray</p></div></body></html>",
        ));
        let mut scores = ScoreMap::new();
        let get = |sel: &str| doc.select(sel).nodes().first().cloned().unwrap();
        let c: Vec<NodeRef> = (0..4).map(|i| get(&format!("#c{i}"))).collect();
        scores.set(c[0].id, 40.0);
        scores.set(c[1].id, 38.0);
        scores.set(c[2].id, 36.0);
        scores.set(c[3].id, 34.0);

        let top = select_top_candidate(&doc, &c, &mut scores, &Flags::all()).unwrap();
        assert_eq!(dom::id(&top.node), "common");
    }
}
