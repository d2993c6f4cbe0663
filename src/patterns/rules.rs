//! The canonical-algorithm rule table.
//!
//! One declarative entry per category: the authoritative catalog pair, a
//! permissive `detect` predicate (broad recall) and a stricter `confirm`
//! predicate (precision). Both are side-effect-free functions over the
//! shared feature vector; the dominant firing category wins under the
//! complexity total order. Table order matters on rank ties: specific
//! categories come before the recursion-shape fallbacks, and the earliest
//! tied entry wins.

use super::features::FeatureVector;
use crate::core::Complexity;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    FloydWarshall,
    BellmanFord,
    Dijkstra,
    Kruskal,
    Bfs,
    Dfs,
    GraphTraversal,
    HeapSort,
    MergeSort,
    QuickSort,
    SelectionSort,
    BubbleSort,
    QuadraticSort,
    BinarySearch,
    PrimeCheck,
    MatrixMultiplication,
    TspDp,
    SubsetSum,
    Permutation,
    Kadane,
    FrequencyCount,
    FindMaxMin,
    ConstantTime,
    ExponentialRecursion,
    LinearRecursion,
}

impl Category {
    pub fn name(&self) -> &'static str {
        match self {
            Category::FloydWarshall => "FLOYD_WARSHALL",
            Category::BellmanFord => "BELLMAN_FORD",
            Category::Dijkstra => "DIJKSTRA",
            Category::Kruskal => "KRUSKAL",
            Category::Bfs => "BFS",
            Category::Dfs => "DFS",
            Category::GraphTraversal => "GRAPH_TRAVERSAL",
            Category::HeapSort => "HEAP_SORT",
            Category::MergeSort => "MERGE_SORT",
            Category::QuickSort => "QUICK_SORT",
            Category::SelectionSort => "SELECTION_SORT",
            Category::BubbleSort => "BUBBLE_SORT",
            Category::QuadraticSort => "QUADRATIC_SORT",
            Category::BinarySearch => "BINARY_SEARCH",
            Category::PrimeCheck => "PRIME_CHECK",
            Category::MatrixMultiplication => "MATRIX_MULTIPLICATION",
            Category::TspDp => "TSP_DP",
            Category::SubsetSum => "SUBSET_SUM",
            Category::Permutation => "PERMUTATION",
            Category::Kadane => "KADANE",
            Category::FrequencyCount => "FREQUENCY_COUNT",
            Category::FindMaxMin => "FIND_MAX_MIN",
            Category::ConstantTime => "CONSTANT_TIME",
            Category::ExponentialRecursion => "EXPONENTIAL_RECURSION",
            Category::LinearRecursion => "LINEAR_RECURSION",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

pub struct Rule {
    pub category: Category,
    /// Authoritative worst-case pair for this category.
    pub time: Complexity,
    pub space: Complexity,
    pub detect: fn(&FeatureVector) -> bool,
    pub confirm: fn(&FeatureVector) -> bool,
}

pub static RULES: &[Rule] = &[
    // ---- graph algorithms ----
    Rule {
        category: Category::FloydWarshall,
        time: Complexity::VerticesCubed,
        space: Complexity::VerticesSquared,
        detect: |f| {
            f.loop_depth() >= 3 && f.has_dist_array() && (f.has_dist_matrix() || f.has("inf"))
        },
        confirm: |f| f.loop_depth() >= 3 && (f.has_dist_array() || f.has("matrix")),
    },
    Rule {
        category: Category::BellmanFord,
        time: Complexity::VerticesTimesEdges,
        space: Complexity::Vertices,
        detect: |f| {
            f.has_any(&["bellman", "ford"])
                || (f.has("edge")
                    && f.has("dist")
                    && f.loop_depth() >= 2
                    && f.has_any(&["integer.max_value", "int_max", "inf"]))
        },
        confirm: |f| {
            f.has_any(&["bellman", "ford"])
                || (f.has("edge") && f.has("dist") && f.loop_depth() >= 2)
        },
    },
    Rule {
        category: Category::Dijkstra,
        time: Complexity::EdgesLogVertices,
        space: Complexity::VerticesPlusEdges,
        detect: |f| {
            f.has_any(&[
                "priorityqueue",
                "heapq",
                "heappush",
                "heappop",
                "minheap",
                "priority_queue",
            ]) && f.has("dist")
        },
        confirm: |f| {
            f.has_any(&["priorityqueue", "heapq", "heappush", "priority_queue"]) && f.has("dist")
        },
    },
    Rule {
        category: Category::Kruskal,
        time: Complexity::EdgesLogEdges,
        space: Complexity::VerticesPlusEdges,
        detect: |f| {
            (f.has("kruskal") || f.has("union") || f.has("find"))
                && f.has("parent")
                && f.has_any(&["edge", "weight"])
        },
        confirm: |f| (f.has("kruskal") || (f.has("union") && f.has("find"))) && f.has("parent"),
    },
    Rule {
        category: Category::Bfs,
        time: Complexity::VerticesPlusEdges,
        space: Complexity::Vertices,
        detect: |f| {
            f.has("queue")
                && f.has_any(&["visited", "seen"])
                && f.has_any(&["adj", "graph", "neighbor"])
        },
        confirm: |f| {
            f.has("queue")
                && f.has_any(&["visited", "seen"])
                && f.has_any(&["adj", "graph", "neighbor"])
        },
    },
    Rule {
        category: Category::Dfs,
        time: Complexity::VerticesPlusEdges,
        space: Complexity::Vertices,
        detect: |f| {
            f.has_recursion()
                && f.has_any(&["visited", "seen"])
                && f.has_any(&["adj", "graph", "neighbor"])
        },
        confirm: |f| {
            f.has_recursion()
                && f.has_any(&["visited", "seen"])
                && f.has_any(&["adj", "graph", "neighbor"])
        },
    },
    Rule {
        category: Category::GraphTraversal,
        time: Complexity::VerticesPlusEdges,
        space: Complexity::Vertices,
        detect: |f| f.has_any(&["graph", "adj"]) && f.has_any(&["visited", "seen"]),
        confirm: |f| {
            f.loop_count() > 0 && f.has_any(&["visited", "seen"]) && f.has_any(&["graph", "adj"])
        },
    },
    // ---- sorting algorithms ----
    Rule {
        category: Category::HeapSort,
        time: Complexity::Linearithmic,
        space: Complexity::Logarithmic,
        detect: |f| {
            f.has_any(&["heapsort", "heap_sort", "heapify"])
                || (f.has("heap") && f.has_any(&["largest", "smallest"]))
        },
        confirm: |f| {
            f.has_any(&["heapsort", "heap_sort", "heapify"])
                || (f.has("heap") && f.has_any(&["largest", "smallest"]))
        },
    },
    Rule {
        category: Category::MergeSort,
        time: Complexity::Linearithmic,
        space: Complexity::Linear,
        detect: |f| f.has_recursion() && f.has("merge") && f.has_any(&["left", "right", "mid"]),
        confirm: |f| f.has_recursion() && f.has("merge"),
    },
    Rule {
        // Worst case, not average: pathological pivots are quadratic.
        category: Category::QuickSort,
        time: Complexity::Quadratic,
        space: Complexity::Logarithmic,
        detect: |f| f.has_recursion() && f.has_any(&["pivot", "partition"]),
        confirm: |f| f.has_recursion() && f.has_any(&["pivot", "partition"]),
    },
    Rule {
        category: Category::SelectionSort,
        time: Complexity::Quadratic,
        space: Complexity::Constant,
        detect: |f| {
            f.loop_depth() == 2
                && f.has_any(&["min_idx", "min_index", "minidx"])
                && f.has_any(&["swap", "temp"])
        },
        confirm: |f| f.loop_depth() == 2 && f.has_any(&["min_idx", "min_index", "minidx"]),
    },
    Rule {
        category: Category::BubbleSort,
        time: Complexity::Quadratic,
        space: Complexity::Constant,
        detect: |f| {
            f.loop_depth() == 2
                && f.has_any(&["bubble", "swapped"])
                && f.has_any(&["swap", "temp"])
        },
        confirm: |f| f.loop_depth() == 2 && f.has_any(&["bubble", "swapped"]),
    },
    Rule {
        category: Category::QuadraticSort,
        time: Complexity::Quadratic,
        space: Complexity::Constant,
        detect: |f| {
            f.loop_depth() == 2
                && f.has_any(&["swap", "temp"])
                && f.has_any(&["arr", "list", "array"])
        },
        confirm: |f| f.loop_depth() == 2 && f.has_any(&["swap", "temp"]),
    },
    // ---- search ----
    Rule {
        category: Category::BinarySearch,
        time: Complexity::Logarithmic,
        space: Complexity::Constant,
        detect: |f| {
            f.has("mid")
                && f.has_any(&["left", "low", "lo", "start"])
                && f.has_any(&["right", "high", "hi", "end"])
                && (f.has("while") || f.has("<=") || f.has(">=") || f.has_recursion())
        },
        // Strictly narrower than detect: "mid" alone is not enough, the
        // bound must actually be halved.
        confirm: |f| {
            f.has("mid")
                && f.has_any(&["left", "low", "lo", "start"])
                && f.has_any(&["right", "high", "hi", "end"])
                && (f.has_halving() || f.has_halving_update())
        },
    },
    // ---- math ----
    Rule {
        category: Category::PrimeCheck,
        time: Complexity::SquareRoot,
        space: Complexity::Constant,
        detect: |f| {
            f.has_any(&["prime", "isprime", "is_prime"])
                || (f.has("sqrt") && f.has_modulo_probe())
        },
        confirm: |f| {
            f.has_any(&["prime", "isprime", "is_prime"]) || (f.has("sqrt") && f.has("%"))
        },
    },
    Rule {
        category: Category::MatrixMultiplication,
        time: Complexity::Cubic,
        space: Complexity::Quadratic,
        detect: |f| {
            f.loop_depth() >= 3 && (f.has("matri") || (f.has_double_index() && f.has("+=")))
        },
        confirm: |f| f.loop_depth() >= 3 && (f.has("matrix") || f.has_double_index()),
    },
    // ---- dynamic programming ----
    Rule {
        category: Category::TspDp,
        time: Complexity::ExponentialQuadratic,
        space: Complexity::ExponentialLinear,
        detect: |f| {
            f.has_any(&["tsp", "traveling", "travelling", "salesman"])
                || (f.has_bitmask() && f.has_dp_table() && f.has_any(&["dist", "cost"]))
        },
        confirm: |f| {
            f.has_any(&["tsp", "traveling", "travelling", "salesman"])
                || (f.has("mask") && f.has("dp") && f.has_bitmask())
        },
    },
    Rule {
        category: Category::SubsetSum,
        time: Complexity::Exponential,
        space: Complexity::Linear,
        detect: |f| f.has("subset") && f.has_any(&["sum", "target"]) && f.has_recursion(),
        confirm: |f| f.has("subset") && f.has_any(&["sum", "target"]),
    },
    // ---- combinatorial ----
    Rule {
        category: Category::Permutation,
        time: Complexity::Factorial,
        space: Complexity::Linear,
        detect: |f| {
            f.has_any(&["permut", "generate"])
                && f.has_recursion()
                && f.has_any(&["str", "char", "swap"])
        },
        confirm: |f| f.has_any(&["permut", "generate"]) && f.has_recursion(),
    },
    // ---- array scans ----
    Rule {
        category: Category::Kadane,
        time: Complexity::Linear,
        space: Complexity::Constant,
        detect: |f| {
            f.has_any(&[
                "kadane",
                "max_so_far",
                "maxsofar",
                "current_max",
                "currentmax",
                "max_ending",
            ]) || (f.has("max") && f.has_any(&["current", "curr"]) && f.loop_depth() == 1)
        },
        confirm: |f| {
            f.has_any(&[
                "kadane",
                "max_so_far",
                "maxsofar",
                "current_max",
                "currentmax",
                "max_ending",
            ])
        },
    },
    Rule {
        category: Category::FrequencyCount,
        time: Complexity::Linear,
        space: Complexity::Linear,
        detect: |f| {
            f.has_any(&["frequency", "freq", "count"])
                && f.has_any(&["map", "dict", "hash", "object"])
                && f.loop_depth() == 1
        },
        confirm: |f| {
            f.has_any(&["frequency", "freq", "count"])
                && f.has_any(&["map", "dict", "hash", "{}"])
        },
    },
    Rule {
        category: Category::FindMaxMin,
        time: Complexity::Linear,
        space: Complexity::Constant,
        detect: |f| {
            f.has_any(&[
                "findmax",
                "findmin",
                "find_max",
                "find_min",
                "maxval",
                "minval",
                "max_val",
                "min_val",
                "maxelement",
                "minelement",
            ]) || (f.has_any(&["max", "min"])
                && f.loop_depth() == 1
                && f.loop_count() == 1
                && !f.has_recursion())
        },
        confirm: |f| {
            f.has_any(&[
                "findmax",
                "findmin",
                "find_max",
                "find_min",
                "maxval",
                "minval",
                "max_val",
                "min_val",
                "maxelement",
                "minelement",
            ]) || (f.has_any(&["max", "min"]) && f.loop_depth() == 1 && f.loop_count() == 1)
        },
    },
    Rule {
        category: Category::ConstantTime,
        time: Complexity::Constant,
        space: Complexity::Constant,
        detect: |f| f.loop_count() <= 1 && f.loop_depth() == 0 && !f.has_recursion(),
        confirm: |f| f.loop_count() <= 1 && f.loop_depth() == 0 && !f.has_recursion(),
    },
    // ---- recursion-shape fallbacks ----
    Rule {
        category: Category::ExponentialRecursion,
        time: Complexity::Exponential,
        space: Complexity::Linear,
        detect: |f| f.multi_recursion(),
        confirm: |f| f.multi_recursion(),
    },
    Rule {
        category: Category::LinearRecursion,
        time: Complexity::Linear,
        space: Complexity::Linear,
        detect: |f| f.has_recursion(),
        confirm: |f| f.has_recursion() && !f.multi_recursion(),
    },
];

/// Pure catalog lookup: category to its authoritative `(time, space)` pair.
pub fn catalog(category: Category) -> Option<(Complexity, Complexity)> {
    RULES
        .iter()
        .find(|r| r.category == category)
        .map(|r| (r.time, r.space))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_covers_every_category() {
        for rule in RULES {
            assert_eq!(
                catalog(rule.category),
                Some((rule.time, rule.space)),
                "missing catalog entry for {}",
                rule.category
            );
        }
    }

    #[test]
    fn quick_sort_is_worst_case_quadratic() {
        let (time, space) = catalog(Category::QuickSort).unwrap();
        assert_eq!(time, Complexity::Quadratic);
        assert_eq!(space, Complexity::Logarithmic);
    }

    #[test]
    fn floyd_warshall_uses_graph_spellings() {
        let (time, space) = catalog(Category::FloydWarshall).unwrap();
        assert_eq!(time.notation(), "O(V³)");
        assert_eq!(space.notation(), "O(V²)");
    }

    #[test]
    fn permutation_is_factorial() {
        let (time, space) = catalog(Category::Permutation).unwrap();
        assert_eq!(time, Complexity::Factorial);
        assert_eq!(space, Complexity::Linear);
    }
}
