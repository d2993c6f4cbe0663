//! Per-function complexity analysis.
//!
//! The snippet is split into function scopes and each scope is analyzed
//! independently: taint propagation from its parameters, recursion shape
//! classification, then time/space derivation. Nothing here ever multiplies
//! or sums complexities across functions; the aggregator combines profiles
//! by dominance.

pub mod derive;
pub mod recursion;
pub mod scopes;
pub mod stdlib;
pub mod taint;
pub mod treewalk;

pub use derive::CollapsePolicy;
pub use scopes::FunctionScope;

use crate::core::{ExternalCall, FunctionProfile, Language, RecursionShape};

/// Raw structural facts for one function scope, produced by either the
/// tree walk or the lexical scan and consumed read-only by derivation.
#[derive(Debug, Clone, Default)]
pub struct FunctionFacts {
    pub loop_count: usize,
    pub loop_depth: u32,
    pub recursive_calls: usize,
    /// A recursive call site textually inside a loop body.
    pub recursion_in_loop: bool,
    pub allocations: usize,
    pub halving_loop: bool,
    pub sqrt_loop: bool,
    pub scaling_loop: bool,
    pub scaling_recursion: bool,
    pub external_calls: Vec<ExternalCall>,
}

impl FunctionFacts {
    /// Did taint analysis find any loop, recursive call, or stdlib call
    /// actually driven by input?
    pub fn scales_with_input(&self) -> bool {
        self.scaling_loop
            || self.scaling_recursion
            || self.external_calls.iter().any(|c| c.scaling)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AnalyzerOptions {
    pub collapse: CollapsePolicy,
}

/// Analyze every function scope in the snippet. Always returns at least one
/// profile; code without definitions becomes an implicit `main` scope.
pub fn analyze(
    source: &str,
    language: Language,
    options: &AnalyzerOptions,
) -> Vec<FunctionProfile> {
    let pairs = if language.has_tree() {
        let tree = treewalk::collect(source);
        if tree.is_none() {
            log::debug!("per-function tree walk unavailable, degrading to lexical scopes");
        }
        tree
    } else {
        None
    };

    let pairs = pairs.unwrap_or_else(|| {
        let mut scopes = scopes::discover(source);
        if scopes.is_empty() {
            scopes.push(FunctionScope::implicit(source));
        }
        scopes
            .into_iter()
            .map(|s| {
                let facts = scopes::facts(&s);
                (s, facts)
            })
            .collect()
    });

    pairs
        .into_iter()
        .map(|(scope, facts)| profile(scope, facts, options))
        .collect()
}

fn profile(scope: FunctionScope, facts: FunctionFacts, options: &AnalyzerOptions) -> FunctionProfile {
    let kind = recursion::classify(&scope.body, &scope.name, &facts);
    let time = derive::time(&facts, kind.shape, kind.graph, &scope.body, options.collapse);
    let space = derive::space(&facts, kind.shape, kind.graph, &scope.body, options.collapse);
    let collapsed = derive::collapses(&facts, options.collapse);
    let reasoning = reasoning(&facts, kind.shape, &time.notation(), collapsed);

    FunctionProfile {
        name: scope.name,
        line_start: scope.line_start,
        line_end: scope.line_end,
        loop_depth: facts.loop_depth,
        recursion: kind.shape,
        recursive_calls: facts.recursive_calls,
        scales_with_input: facts.scales_with_input(),
        external_calls: facts.external_calls,
        time,
        space,
        reasoning,
    }
}

fn reasoning(
    facts: &FunctionFacts,
    shape: RecursionShape,
    time: &str,
    collapsed: bool,
) -> String {
    let mut reasons = Vec::new();
    if facts.loop_depth > 0 {
        reasons.push(format!("{} nested loop(s)", facts.loop_depth));
    }
    if shape != RecursionShape::None {
        reasons.push(shape.describe().to_string());
    }
    if collapsed {
        reasons.push("bounds are fixed constants".to_string());
    }
    if reasons.is_empty() {
        reasons.push("constant-time operations".to_string());
    }
    format!("{} because: {}", time, reasons.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Complexity;
    use indoc::indoc;

    fn analyze_py(source: &str) -> Vec<FunctionProfile> {
        analyze(source, Language::Python, &AnalyzerOptions::default())
    }

    #[test]
    fn bubble_sort_is_quadratic_constant_space() {
        let code = indoc! {"
            def bubble_sort(arr):
                n = len(arr)
                for i in range(n):
                    for j in range(n - i - 1):
                        if arr[j] > arr[j + 1]:
                            arr[j], arr[j + 1] = arr[j + 1], arr[j]
        "};
        let profiles = analyze_py(code);
        assert_eq!(profiles.len(), 1);
        assert_eq!(profiles[0].time, Complexity::Quadratic);
        assert_eq!(profiles[0].space, Complexity::Constant);
        assert_eq!(profiles[0].loop_depth, 2);
    }

    #[test]
    fn fibonacci_is_exponential_with_linear_stack() {
        let code = indoc! {"
            def fibonacci(n):
                if n <= 1:
                    return n
                return fibonacci(n - 1) + fibonacci(n - 2)
        "};
        let profiles = analyze_py(code);
        assert_eq!(profiles[0].recursion, RecursionShape::Exponential);
        assert_eq!(profiles[0].time, Complexity::Exponential);
        assert_eq!(profiles[0].space, Complexity::Linear);
    }

    #[test]
    fn merge_sort_is_linearithmic_linear_space() {
        let code = indoc! {"
            def merge_sort(arr):
                if len(arr) <= 1:
                    return arr
                mid = len(arr) // 2
                left = merge_sort(arr[:mid])
                right = merge_sort(arr[mid:])
                return merge(left, right)
        "};
        let profiles = analyze_py(code);
        assert_eq!(profiles[0].recursion, RecursionShape::DivideAndConquer);
        assert_eq!(profiles[0].time, Complexity::Linearithmic);
        assert_eq!(profiles[0].space, Complexity::Linear);
    }

    #[test]
    fn fixed_bound_nest_collapses_to_constant() {
        let code = indoc! {"
            def warmup():
                total = 0
                for i in range(10):
                    for j in range(10):
                        total += i * j
                return total
        "};
        let profiles = analyze_py(code);
        assert_eq!(profiles[0].time, Complexity::Constant);
        assert!(!profiles[0].scales_with_input);
        assert!(profiles[0].reasoning.contains("fixed constants"));
    }

    #[test]
    fn intrinsic_policy_keeps_nominal_shape() {
        let code = indoc! {"
            def warmup():
                for i in range(10):
                    for j in range(10):
                        print(i, j)
        "};
        let options = AnalyzerOptions {
            collapse: CollapsePolicy::Intrinsic,
        };
        let profiles = analyze(code, Language::Python, &options);
        assert_eq!(profiles[0].time, Complexity::Quadratic);
    }

    #[test]
    fn c_snippet_goes_through_lexical_scopes() {
        let code = indoc! {"
            int sum_all(int arr[], int n) {
                int total = 0;
                for (int i = 0; i < n; i++) {
                    total += arr[i];
                }
                return total;
            }
        "};
        let profiles = analyze(code, Language::Cpp, &AnalyzerOptions::default());
        assert_eq!(profiles.len(), 1);
        assert_eq!(profiles[0].name, "sum_all");
        assert_eq!(profiles[0].time, Complexity::Linear);
    }

    #[test]
    fn snippet_without_functions_reports_main() {
        let profiles = analyze("x = 1\ny = x + 2\n", Language::Python, &AnalyzerOptions::default());
        assert_eq!(profiles.len(), 1);
        assert_eq!(profiles[0].name, "main");
        assert_eq!(profiles[0].time, Complexity::Constant);
        assert!(profiles[0].reasoning.contains("constant-time"));
    }

    #[test]
    fn every_function_gets_its_own_profile() {
        let code = indoc! {"
            def linear(arr):
                for x in arr:
                    print(x)

            def quadratic(arr):
                for x in arr:
                    for y in arr:
                        print(x, y)
        "};
        let profiles = analyze_py(code);
        assert_eq!(profiles.len(), 2);
        assert_eq!(profiles[0].time, Complexity::Linear);
        assert_eq!(profiles[1].time, Complexity::Quadratic);
    }
}
