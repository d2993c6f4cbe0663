//! Intrinsic costs of well-known standard-library calls.
//!
//! These only contribute to a function's complexity when taint analysis
//! confirms the receiver or an argument scales with input; `sorted([1, 2,
//! 3])` is never charged as O(n log n).

use crate::core::Complexity;

/// Intrinsic cost of a known call, by bare method or function name.
pub fn call_cost(name: &str) -> Option<Complexity> {
    let cost = match name {
        // amortized container operations
        "append" | "push" | "push_back" | "add" | "get" | "pop" | "sqrt" | "pow" => {
            Complexity::Constant
        }
        // linear scans, shifts, and copies
        "insert" | "remove" | "index" | "count" | "reverse" | "copy" | "find" | "replace"
        | "split" | "join" | "extend" | "insort" | "max" | "min" | "sum" | "factorial"
        | "heapify" => Complexity::Linear,
        "heappush" | "heappop" | "bisect" | "bisect_left" | "bisect_right" => {
            Complexity::Logarithmic
        }
        "sort" | "sorted" | "qsort" | "nlargest" | "nsmallest" => Complexity::Linearithmic,
        _ => return None,
    };
    Some(cost)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_variants_are_linearithmic() {
        assert_eq!(call_cost("sort"), Some(Complexity::Linearithmic));
        assert_eq!(call_cost("sorted"), Some(Complexity::Linearithmic));
    }

    #[test]
    fn heap_operations_are_logarithmic() {
        assert_eq!(call_cost("heappush"), Some(Complexity::Logarithmic));
        assert_eq!(call_cost("heappop"), Some(Complexity::Logarithmic));
        assert_eq!(call_cost("heapify"), Some(Complexity::Linear));
    }

    #[test]
    fn unknown_calls_have_no_cost() {
        assert_eq!(call_cost("frobnicate"), None);
    }
}
