//! Content scoring.
//!
//! Each scorable element earns points for text volume and comma density;
//! the points flow into its ancestors with distance decay, seeding them as
//! candidates. Candidate scores are then discounted by link density and the
//! best few are retained for top-candidate selection.

use crate::dom::{self, NodeRef};
use crate::extractor::state::{Flags, ScoreMap};
use crate::patterns;
use crate::text;

/// Maximum ancestor distance that receives score propagation.
const SCORE_DEPTH: usize = 5;

/// Minimum inner-text length for an element to be scored at all.
const MIN_SCORABLE_TEXT: usize = 25;

/// Class/id weight of an element: ±25 per matching token family, 0 when
/// class weighting is relaxed.
#[must_use]
pub fn class_weight(node: &NodeRef, flags: &Flags) -> f64 {
    if !flags.weight_classes {
        return 0.0;
    }

    let mut weight = 0.0;

    let class = dom::class_name(node);
    if !class.is_empty() {
        if patterns::NEGATIVE.is_match(&class) {
            weight -= 25.0;
        }
        if patterns::POSITIVE.is_match(&class) {
            weight += 25.0;
        }
    }

    let id = dom::id(node);
    if !id.is_empty() {
        if patterns::NEGATIVE.is_match(&id) {
            weight -= 25.0;
        }
        if patterns::POSITIVE.is_match(&id) {
            weight += 25.0;
        }
    }

    weight
}

/// Seed a node's score from its tag and class/id weight.
pub fn initialize_node(node: &NodeRef, scores: &mut ScoreMap, flags: &Flags) {
    let base = match dom::tag_name(node).as_str() {
        "div" => 5.0,
        "pre" | "td" | "blockquote" => 3.0,
        "address" | "ol" | "ul" | "dl" | "dd" | "dt" | "li" | "form" => -3.0,
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "th" => -5.0,
        _ => 0.0,
    };
    scores.set(node.id, base + class_weight(node, flags));
}

/// Score every enqueued element, propagate into ancestors, and return the
/// top candidates ranked by link-density-adjusted score (best first).
#[must_use]
pub fn rank_candidates<'a>(
    elements_to_score: Vec<NodeRef<'a>>,
    scores: &mut ScoreMap,
    flags: &Flags,
    nb_top_candidates: usize,
) -> Vec<NodeRef<'a>> {
    let mut candidates: Vec<NodeRef<'a>> = Vec::new();

    for element in elements_to_score {
        if element.parent().is_none() {
            continue; // detached by a later traversal step
        }

        let inner_text = dom::inner_text(&element, true);
        if inner_text.chars().count() < MIN_SCORABLE_TEXT {
            continue;
        }

        let ancestors = dom::node_ancestors(&element, SCORE_DEPTH);
        if ancestors.is_empty() {
            continue;
        }

        let mut content_score = 1.0;
        content_score += text::comma_count(&inner_text) as f64;
        content_score += (inner_text.chars().count() / 100).min(3) as f64;

        for (level, ancestor) in ancestors.iter().enumerate() {
            if ancestor.parent().is_none() {
                continue;
            }
            if !scores.contains(ancestor.id) {
                initialize_node(ancestor, scores, flags);
                candidates.push(ancestor.clone());
            }
            // parent gets the full score, grandparent half, then a third
            // per extra level
            let divider = match level {
                0 => 1.0,
                1 => 2.0,
                l => (l * 3) as f64,
            };
            scores.add(ancestor.id, content_score / divider);
        }
    }

    let mut top_candidates: Vec<NodeRef<'a>> = Vec::new();
    for candidate in candidates {
        let raw = scores.get(candidate.id).unwrap_or(0.0);
        let adjusted = raw * (1.0 - dom::link_density(&candidate));
        scores.set(candidate.id, adjusted);

        for slot in 0..nb_top_candidates {
            let beats_slot = match top_candidates.get(slot) {
                None => true,
                Some(existing) => adjusted > scores.get(existing.id).unwrap_or(0.0),
            };
            if beats_slot {
                top_candidates.insert(slot, candidate);
                if top_candidates.len() > nb_top_candidates {
                    top_candidates.pop();
                }
                break;
            }
        }
    }

    top_candidates
}
