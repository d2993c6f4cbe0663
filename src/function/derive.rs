//! Time and space derivation for a single function.
//!
//! Recursion shape dominates when present; otherwise the loop-depth ladder
//! applies. Space candidates accumulate independently and combine with max,
//! never a sum. The constant-bound collapse at the end is the one policy
//! knob: structurally expensive code that never touches a tainted variable
//! is effectively O(1) at this call site, but callers may ask for the
//! intrinsic reading instead.

use super::FunctionFacts;
use crate::core::{Complexity, RecursionShape};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static TWO_AXIS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[\s*\[|matrix|\[\w+\]\s*\[\w+\]").unwrap());
static TABLE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(dp|memo|table)\s*\[").unwrap());
static DOUBLE_INDEX_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\]\s*\[").unwrap());

/// What to report for a function whose loops and recursion are bounded only
/// by literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollapsePolicy {
    /// Collapse to O(1): fixed bounds never scale.
    #[default]
    Effective,
    /// Report the nominal structural shape regardless of bounds.
    Intrinsic,
}

pub fn time(
    facts: &FunctionFacts,
    shape: RecursionShape,
    graph: bool,
    body: &str,
    policy: CollapsePolicy,
) -> Complexity {
    if collapses(facts, policy) {
        return Complexity::Constant;
    }

    let structural = match shape {
        RecursionShape::Factorial => Complexity::Factorial,
        RecursionShape::Exponential => Complexity::Exponential,
        RecursionShape::DivideAndConquer => {
            if has_pivot(body) {
                // Quicksort-style: pathological pivots degrade to quadratic.
                Complexity::Quadratic
            } else {
                Complexity::Linearithmic
            }
        }
        RecursionShape::Binary => Complexity::Logarithmic,
        RecursionShape::Linear => {
            if graph {
                Complexity::VerticesPlusEdges
            } else if facts.loop_count > 0 {
                // Linear recursion doing linear work per level.
                Complexity::Quadratic
            } else {
                Complexity::Linear
            }
        }
        RecursionShape::None => loop_ladder(facts),
    };

    structural.max(external_cost(facts))
}

pub fn space(
    facts: &FunctionFacts,
    shape: RecursionShape,
    graph: bool,
    body: &str,
    policy: CollapsePolicy,
) -> Complexity {
    if collapses(facts, policy) {
        return Complexity::Constant;
    }

    let mut terms = Vec::new();

    if TWO_AXIS_RE.is_match(&body.to_lowercase()) {
        terms.push(Complexity::Quadratic);
    }
    if TABLE_RE.is_match(&body.to_lowercase()) {
        terms.push(if DOUBLE_INDEX_RE.is_match(body) {
            Complexity::Quadratic
        } else {
            Complexity::Linear
        });
    }
    if facts.allocations > 0 {
        terms.push(Complexity::Linear);
    }

    // Recursion stack depth.
    match shape {
        RecursionShape::Binary => terms.push(Complexity::Logarithmic),
        RecursionShape::DivideAndConquer => terms.push(if has_pivot(body) {
            Complexity::Logarithmic
        } else {
            // Mergesort-style: the auxiliary array dominates the stack.
            Complexity::Linear
        }),
        RecursionShape::Linear if graph => terms.push(Complexity::Vertices),
        RecursionShape::Linear | RecursionShape::Exponential | RecursionShape::Factorial => {
            terms.push(Complexity::Linear)
        }
        RecursionShape::None => {}
    }

    Complexity::max_of(terms)
}

fn loop_ladder(facts: &FunctionFacts) -> Complexity {
    match facts.loop_depth {
        0 => Complexity::Constant,
        1 => {
            if facts.halving_loop {
                Complexity::Logarithmic
            } else if facts.sqrt_loop {
                Complexity::SquareRoot
            } else {
                Complexity::Linear
            }
        }
        2 => Complexity::Quadratic,
        3 => Complexity::Cubic,
        d => Complexity::Polynomial(d.min(255) as u8),
    }
}

/// Highest cost among stdlib calls that taint analysis confirmed scaling.
fn external_cost(facts: &FunctionFacts) -> Complexity {
    Complexity::max_of(
        facts
            .external_calls
            .iter()
            .filter(|c| c.scaling)
            .map(|c| c.cost),
    )
}

/// Constant-bound collapse: there is structure, but none of it touches a
/// tainted variable.
pub fn collapses(facts: &FunctionFacts, policy: CollapsePolicy) -> bool {
    policy == CollapsePolicy::Effective
        && !facts.scales_with_input()
        && (facts.loop_count > 0 || facts.recursive_calls > 0 || facts.allocations > 0)
}

fn has_pivot(body: &str) -> bool {
    let lower = body.to_lowercase();
    lower.contains("pivot") || lower.contains("partition")
}
