//! Combination of per-function profiles into the final result.
//!
//! The reported terms are the maximum, under the total order, of every
//! contributing function. An accepted pattern may raise the result but
//! never silently lowers it, and it may not raise to exponential or
//! factorial on lexical evidence alone: a named-but-unused "permutation"
//! identifier must not force O(n!) when no function actually branches that
//! way.

use crate::core::{AnalysisResult, Complexity, FunctionProfile, RecursionShape, StaticMetrics};
use crate::patterns::PatternMatch;
use std::collections::HashSet;

/// Names that aggregate other functions rather than drive the cost.
const ENTRY_POINTS: &[&str] = &["main", "solve", "run"];

pub fn aggregate(
    profiles: Vec<FunctionProfile>,
    pattern: Option<PatternMatch>,
    metrics: StaticMetrics,
    engine: &str,
) -> AnalysisResult {
    let baseline_time = Complexity::max_of(profiles.iter().map(|f| f.time));
    let baseline_space = Complexity::max_of(profiles.iter().map(|f| f.space));

    let mut time = baseline_time;
    let mut space = baseline_space;
    let mut pattern_note = None;

    if let Some(p) = pattern {
        if p.time.rank() >= baseline_time.rank() {
            if p.time.is_exponential_or_worse()
                && p.time.rank() > baseline_time.rank()
                && !functions_agree_exponential(&profiles)
            {
                log::debug!(
                    "pattern {} not allowed to raise {} to {}",
                    p.category.name(),
                    baseline_time,
                    p.time
                );
            } else {
                // Equal ranks still adopt the pattern's spelling, so graph
                // categories report O(V + E) rather than O(n).
                time = p.time;
                if p.space.rank() >= space.rank() {
                    space = p.space;
                }
            }
        } else {
            pattern_note = Some(format!(
                "pattern {} suggests {}, keeping computed worst case",
                p.category.name(),
                p.time
            ));
        }
    }

    let worst_time_functions = attribution(&profiles, |f| f.time, time, baseline_time);
    let worst_space_functions = attribution(&profiles, |f| f.space, space, baseline_space);
    let summary = summary(&profiles, time, &worst_time_functions, pattern_note);

    AnalysisResult {
        time_complexity: time.notation(),
        space_complexity: space.notation(),
        complexity_level: time.level(),
        worst_time_functions,
        worst_space_functions,
        functions: profiles,
        engine: engine.to_string(),
        summary,
        metrics,
    }
}

/// Elevation to O(2ⁿ)/O(n!) needs a function that actually branches
/// exponentially, not just pattern vocabulary.
fn functions_agree_exponential(profiles: &[FunctionProfile]) -> bool {
    profiles.iter().any(|f| {
        f.time.is_exponential_or_worse()
            || matches!(
                f.recursion,
                RecursionShape::Exponential | RecursionShape::Factorial
            )
    })
}

/// Every function whose own term ties the final value; when the pattern
/// raised past all of them, fall back to the computed baseline. Entry
/// points are dropped whenever another function equally dominates.
fn attribution(
    profiles: &[FunctionProfile],
    term: impl Fn(&FunctionProfile) -> Complexity,
    chosen: Complexity,
    baseline: Complexity,
) -> Vec<String> {
    let at_rank = |rank: u32| -> Vec<String> {
        let mut seen = HashSet::new();
        profiles
            .iter()
            .filter(|f| term(f).rank() == rank)
            .map(|f| f.name.clone())
            .filter(|n| seen.insert(n.clone()))
            .collect()
    };

    let mut names = at_rank(chosen.rank());
    if names.is_empty() {
        names = at_rank(baseline.rank());
    }
    if names.len() > 1 {
        let non_entry: Vec<String> = names
            .iter()
            .filter(|n| !ENTRY_POINTS.contains(&n.as_str()))
            .cloned()
            .collect();
        if !non_entry.is_empty() {
            names = non_entry;
        }
    }
    names
}

fn summary(
    profiles: &[FunctionProfile],
    time: Complexity,
    worst: &[String],
    pattern_note: Option<String>,
) -> String {
    let mut text = if profiles.len() == 1 {
        format!("Single function with {} time complexity", time)
    } else {
        format!(
            "Multiple algorithms detected ({} functions). Worst-case: {} from '{}'",
            profiles.len(),
            time,
            worst.first().map(String::as_str).unwrap_or("unknown")
        )
    };
    if let Some(note) = pattern_note {
        text.push_str(". ");
        text.push_str(&note);
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ComplexityLevel, Language};
    use crate::patterns::Category;

    fn profile(name: &str, time: Complexity, space: Complexity) -> FunctionProfile {
        FunctionProfile {
            name: name.to_string(),
            line_start: 1,
            line_end: 5,
            loop_depth: 0,
            recursion: RecursionShape::None,
            recursive_calls: 0,
            external_calls: Vec::new(),
            scales_with_input: true,
            time,
            space,
            reasoning: String::new(),
        }
    }

    fn metrics() -> StaticMetrics {
        StaticMetrics::empty(Language::Python)
    }

    #[test]
    fn worst_case_is_max_never_product() {
        let result = aggregate(
            vec![
                profile("a", Complexity::Linear, Complexity::Constant),
                profile("b", Complexity::Quadratic, Complexity::Linear),
            ],
            None,
            metrics(),
            "tree",
        );
        assert_eq!(result.time_complexity, "O(n²)");
        assert_eq!(result.space_complexity, "O(n)");
        assert_eq!(result.worst_time_functions, vec!["b"]);
    }

    #[test]
    fn pattern_raises_but_never_lowers() {
        let raised = aggregate(
            vec![profile("f", Complexity::Linear, Complexity::Constant)],
            Some(PatternMatch {
                category: Category::MergeSort,
                time: Complexity::Linearithmic,
                space: Complexity::Linear,
            }),
            metrics(),
            "tree",
        );
        assert_eq!(raised.time_complexity, "O(n log n)");

        let kept = aggregate(
            vec![profile("f", Complexity::Cubic, Complexity::Constant)],
            Some(PatternMatch {
                category: Category::BinarySearch,
                time: Complexity::Logarithmic,
                space: Complexity::Constant,
            }),
            metrics(),
            "tree",
        );
        assert_eq!(kept.time_complexity, "O(n³)");
        assert!(kept.summary.contains("BINARY_SEARCH"));
    }

    #[test]
    fn pattern_cannot_force_factorial_without_agreement() {
        let result = aggregate(
            vec![profile("f", Complexity::Linear, Complexity::Constant)],
            Some(PatternMatch {
                category: Category::Permutation,
                time: Complexity::Factorial,
                space: Complexity::Linear,
            }),
            metrics(),
            "tree",
        );
        assert_eq!(result.time_complexity, "O(n)");
    }

    #[test]
    fn exponential_pattern_allowed_when_a_function_agrees() {
        let mut fib = profile("fib", Complexity::Exponential, Complexity::Linear);
        fib.recursion = RecursionShape::Exponential;
        let result = aggregate(
            vec![fib],
            Some(PatternMatch {
                category: Category::ExponentialRecursion,
                time: Complexity::Exponential,
                space: Complexity::Linear,
            }),
            metrics(),
            "tree",
        );
        assert_eq!(result.time_complexity, "O(2ⁿ)");
        assert_eq!(result.complexity_level, ComplexityLevel::VeryHigh);
    }

    #[test]
    fn graph_pattern_adopts_graph_spelling_on_tie() {
        let result = aggregate(
            vec![profile("bfs", Complexity::Linear, Complexity::Linear)],
            Some(PatternMatch {
                category: Category::Bfs,
                time: Complexity::VerticesPlusEdges,
                space: Complexity::Vertices,
            }),
            metrics(),
            "tree",
        );
        assert_eq!(result.time_complexity, "O(V + E)");
        assert_eq!(result.space_complexity, "O(V)");
    }

    #[test]
    fn all_tied_functions_are_attributed() {
        let result = aggregate(
            vec![
                profile("first", Complexity::Quadratic, Complexity::Constant),
                profile("second", Complexity::Quadratic, Complexity::Constant),
                profile("cheap", Complexity::Linear, Complexity::Constant),
            ],
            None,
            metrics(),
            "tree",
        );
        assert_eq!(result.worst_time_functions, vec!["first", "second"]);
    }

    #[test]
    fn repeated_names_are_attributed_once() {
        // Same name appearing non-adjacently must not be listed twice.
        let result = aggregate(
            vec![
                profile("scan", Complexity::Quadratic, Complexity::Constant),
                profile("other", Complexity::Quadratic, Complexity::Constant),
                profile("scan", Complexity::Quadratic, Complexity::Constant),
            ],
            None,
            metrics(),
            "tree",
        );
        assert_eq!(result.worst_time_functions, vec!["scan", "other"]);
    }

    #[test]
    fn entry_point_dropped_when_another_function_ties() {
        let result = aggregate(
            vec![
                profile("main", Complexity::Quadratic, Complexity::Constant),
                profile("matmul", Complexity::Quadratic, Complexity::Constant),
            ],
            None,
            metrics(),
            "tree",
        );
        assert_eq!(result.worst_time_functions, vec!["matmul"]);
    }

    #[test]
    fn lone_entry_point_keeps_attribution() {
        let result = aggregate(
            vec![profile("main", Complexity::Linear, Complexity::Constant)],
            None,
            metrics(),
            "tree",
        );
        assert_eq!(result.worst_time_functions, vec!["main"]);
    }
}
