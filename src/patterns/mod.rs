//! Canonical-algorithm pattern recognition.
//!
//! The detector is intentionally permissive and the confidence gate
//! intentionally restrictive: a category only overrides computed metrics
//! when both agree. Gate rejection is a silent fallthrough to per-function
//! analysis, never an error.

pub mod features;
pub mod rules;

pub use features::FeatureVector;
pub use rules::{catalog, Category, Rule, RULES};

use crate::core::Complexity;
use serde::{Deserialize, Serialize};

/// An accepted pattern with its authoritative catalog pair. Transient,
/// scoped to one request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternMatch {
    pub category: Category,
    pub time: Complexity,
    pub space: Complexity,
}

/// Propose the single dominant matching category, or none.
///
/// When several predicates fire, the category whose catalog time term is
/// highest under the total order wins, so a triple loop matching both a
/// quadratic sort and Floyd-Warshall never reports the weaker one. Rank
/// ties keep the earliest table entry: the specific categories precede the
/// recursion-shape fallbacks, so recursive DFS reports as DFS with its
/// graph spellings rather than as generic linear recursion.
pub fn detect_dominant(features: &FeatureVector) -> Option<&'static Rule> {
    let mut best: Option<&'static Rule> = None;
    for rule in RULES.iter().filter(|rule| (rule.detect)(features)) {
        if best.map_or(true, |b| rule.time.rank() > b.time.rank()) {
            best = Some(rule);
        }
    }
    best
}

/// Re-validate a proposed category against its stricter corroborating
/// condition.
pub fn confirm(rule: &Rule, features: &FeatureVector) -> bool {
    (rule.confirm)(features)
}

/// Detector plus gate in one step: the dominant category, if it survives
/// the confidence gate.
pub fn gated_match(features: &FeatureVector) -> Option<PatternMatch> {
    let rule = detect_dominant(features)?;
    if !confirm(rule, features) {
        log::debug!(
            "pattern {} detected but rejected by confidence gate",
            rule.category.name()
        );
        return None;
    }
    Some(PatternMatch {
        category: rule.category,
        time: rule.time,
        space: rule.space,
    })
}
