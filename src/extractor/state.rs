//! Per-parse extraction state.
//!
//! Scores are kept in a side table keyed by node identity rather than as
//! fields on DOM nodes, so the tree stays clean and any DOM backend works.
//! The relaxation flags drive the retry controller: each failed pass clears
//! one more flag before extraction restarts from the pristine document.

use std::collections::HashMap;

use dom_query::NodeId;

/// The three heuristic gates relaxed one at a time between retry passes.
#[derive(Debug, Clone, Copy)]
pub struct Flags {
    /// Strip elements whose class/id tokens mark them as unlikely content.
    pub strip_unlikelys: bool,
    /// Apply ±25 class/id weighting during scoring and header cleanup.
    pub weight_classes: bool,
    /// Prune suspect tables, lists, divs and forms after assembly.
    pub clean_conditionally: bool,
}

impl Flags {
    /// All gates active: the configuration of the first extraction pass.
    #[must_use]
    pub fn all() -> Self {
        Self {
            strip_unlikelys: true,
            weight_classes: true,
            clean_conditionally: true,
        }
    }

    /// Clear the next active gate, in fixed order. Returns `false` when
    /// every gate was already cleared and no further relaxation exists.
    pub fn relax(&mut self) -> bool {
        if self.strip_unlikelys {
            self.strip_unlikelys = false;
        } else if self.weight_classes {
            self.weight_classes = false;
        } else if self.clean_conditionally {
            self.clean_conditionally = false;
        } else {
            return false;
        }
        true
    }
}

/// Transient content scores, attached to elements by node id for the
/// duration of one extraction pass and discarded with it.
///
/// Absence of an entry means "not yet scored"; `initialize` in the scoring
/// module creates entries on first touch.
#[derive(Debug, Default)]
pub struct ScoreMap {
    scores: HashMap<NodeId, f64>,
}

impl ScoreMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the node has been initialized for scoring.
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.scores.contains_key(&id)
    }

    /// The node's current score, if initialized.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<f64> {
        self.scores.get(&id).copied()
    }

    /// Set a node's score, creating the entry if needed.
    pub fn set(&mut self, id: NodeId, score: f64) {
        self.scores.insert(id, score);
    }

    /// Add to a node's score, creating the entry at 0 if needed.
    pub fn add(&mut self, id: NodeId, delta: f64) {
        *self.scores.entry(id).or_insert(0.0) += delta;
    }
}
