//! Recursion shape classification.
//!
//! Checked in priority order: recursion inside a loop first (permutation vs.
//! graph traversal), then branching without divide vocabulary, then halving
//! with or without a combine step, then the linear default. Graph traversal
//! deliberately wins over the factorial check: DFS is loop-plus-recursion
//! too, but it marks visited vertices and never undoes, so it is linear in
//! vertices and edges.

use super::FunctionFacts;
use crate::core::RecursionShape;
use once_cell::sync::Lazy;
use regex::Regex;

static HALVING_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"/\s*2|//\s*2|>>\s*1").unwrap());
static UNDO_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bswap\b|\.pop\(\)|backtrack").unwrap());
// arr[a], arr[b] = arr[b], arr[a] — a tuple swap; two of them is swap + undo
static TUPLE_SWAP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\w+\[\w+\]\s*,\s*\w+\[\w+\]\s*=").unwrap());

const DIVIDE_VOCAB: &[&str] = &["merge", "left", "right", "mid", "pivot", "partition"];
const VISITED_VOCAB: &[&str] = &["visited", "seen"];
const GRAPH_VOCAB: &[&str] = &["adj", "graph", "neighbor", "neighbour"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecursionKind {
    pub shape: RecursionShape,
    /// Linear in the graph sense: O(V + E), not O(n).
    pub graph: bool,
}

pub fn classify(body: &str, name: &str, facts: &FunctionFacts) -> RecursionKind {
    if facts.recursive_calls == 0 {
        return RecursionKind {
            shape: RecursionShape::None,
            graph: false,
        };
    }

    let lower = body.to_lowercase();
    let has_any = |needles: &[&str]| needles.iter().any(|n| lower.contains(n));
    let graph_vocab = has_any(VISITED_VOCAB) && has_any(GRAPH_VOCAB);
    let undo = UNDO_RE.is_match(&lower) || TUPLE_SWAP_RE.find_iter(body).count() >= 2;

    if facts.recursion_in_loop {
        if graph_vocab && !undo {
            return RecursionKind {
                shape: RecursionShape::Linear,
                graph: true,
            };
        }
        if undo || lower.contains("permut") {
            return RecursionKind {
                shape: RecursionShape::Factorial,
                graph: false,
            };
        }
        // A loop around a recursive call without backtracking evidence:
        // fall through to the call-count checks.
    }

    let halving = HALVING_RE.is_match(body);

    if facts.recursive_calls >= 2 {
        if fib_shape(body, name) || !has_any(DIVIDE_VOCAB) {
            return RecursionKind {
                shape: RecursionShape::Exponential,
                graph: false,
            };
        }
        if has_any(&["pivot", "partition"]) {
            return RecursionKind {
                shape: RecursionShape::DivideAndConquer,
                graph: false,
            };
        }
    }

    if halving && (lower.contains("merge") || (facts.recursive_calls >= 2 && has_any(DIVIDE_VOCAB)))
    {
        return RecursionKind {
            shape: RecursionShape::DivideAndConquer,
            graph: false,
        };
    }

    if halving && facts.recursive_calls == 1 {
        return RecursionKind {
            shape: RecursionShape::Binary,
            graph: false,
        };
    }

    RecursionKind {
        shape: RecursionShape::Linear,
        graph: graph_vocab,
    }
}

/// The f(n-1) + f(n-2) signature on a single line.
fn fib_shape(body: &str, name: &str) -> bool {
    let pattern = format!(
        r"{n}\s*\([^)]*-\s*1[^)]*\).*{n}\s*\([^)]*-\s*2",
        n = regex::escape(name)
    );
    Regex::new(&pattern).map(|re| re.is_match(body)).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    fn facts(calls: usize, in_loop: bool) -> FunctionFacts {
        FunctionFacts {
            recursive_calls: calls,
            recursion_in_loop: in_loop,
            ..FunctionFacts::default()
        }
    }

    #[test]
    fn decrement_recursion_is_linear() {
        let body = indoc! {"
            def fact(n):
                if n <= 1:
                    return 1
                return n * fact(n - 1)
        "};
        let kind = classify(body, "fact", &facts(1, false));
        assert_eq!(kind.shape, RecursionShape::Linear);
        assert!(!kind.graph);
    }

    #[test]
    fn halved_argument_is_binary() {
        let body = indoc! {"
            def search(arr, lo, hi, t):
                mid = (lo + hi) // 2
                return search(arr, lo, mid - 1, t)
        "};
        let kind = classify(body, "search", &facts(1, false));
        assert_eq!(kind.shape, RecursionShape::Binary);
    }

    #[test]
    fn two_branches_without_merge_is_exponential() {
        let body = indoc! {"
            def fib(n):
                if n <= 1:
                    return n
                return fib(n - 1) + fib(n - 2)
        "};
        let kind = classify(body, "fib", &facts(2, false));
        assert_eq!(kind.shape, RecursionShape::Exponential);
    }

    #[test]
    fn halving_with_merge_is_divide_and_conquer() {
        let body = indoc! {"
            def merge_sort(arr):
                if len(arr) <= 1:
                    return arr
                mid = len(arr) // 2
                left = merge_sort(arr[:mid])
                right = merge_sort(arr[mid:])
                return merge(left, right)
        "};
        let kind = classify(body, "merge_sort", &facts(2, false));
        assert_eq!(kind.shape, RecursionShape::DivideAndConquer);
    }

    #[test]
    fn swap_undo_in_loop_is_factorial() {
        let body = indoc! {"
            def permute(arr, start=0):
                if start == len(arr) - 1:
                    return
                for i in range(start, len(arr)):
                    arr[start], arr[i] = arr[i], arr[start]
                    permute(arr, start + 1)
                    arr[start], arr[i] = arr[i], arr[start]
        "};
        let kind = classify(body, "permute", &facts(1, true));
        assert_eq!(kind.shape, RecursionShape::Factorial);
    }

    #[test]
    fn visited_graph_walk_in_loop_stays_linear() {
        let body = indoc! {"
            def dfs(graph, node, visited):
                visited.add(node)
                for neighbor in graph[node]:
                    if neighbor not in visited:
                        dfs(graph, neighbor, visited)
        "};
        let kind = classify(body, "dfs", &facts(1, true));
        assert_eq!(kind.shape, RecursionShape::Linear);
        assert!(kind.graph);
    }

    #[test]
    fn pivot_recursion_is_divide_and_conquer() {
        let body = indoc! {"
            def quick_sort(arr, lo, hi):
                if lo < hi:
                    p = partition(arr, lo, hi)
                    quick_sort(arr, lo, p - 1)
                    quick_sort(arr, p + 1, hi)
        "};
        let kind = classify(body, "quick_sort", &facts(2, false));
        assert_eq!(kind.shape, RecursionShape::DivideAndConquer);
    }
}
