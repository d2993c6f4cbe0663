//! The complexity lattice: a fixed total order of Big-O growth classes.
//!
//! Terms are compared by rank and combined with `max`, never summed or
//! multiplied. Graph-specific spellings (`O(V + E)`, `O(E log V)`, ...) are
//! aliased into the order at the position of their polynomial equivalent, so
//! a graph term and its n-based twin compare as equals while keeping their
//! own notation.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Complexity {
    /// O(1)
    Constant,
    /// O(log n)
    Logarithmic,
    /// O(√n)
    SquareRoot,
    /// O(n)
    Linear,
    /// O(V) — graph alias of Linear
    Vertices,
    /// O(V + E) — graph alias of Linear
    VerticesPlusEdges,
    /// O(n log n)
    Linearithmic,
    /// O(E log V) — graph alias of Linearithmic
    EdgesLogVertices,
    /// O(E log E) — graph alias of Linearithmic
    EdgesLogEdges,
    /// O(n²)
    Quadratic,
    /// O(V × E) — graph alias of Quadratic
    VerticesTimesEdges,
    /// O(V²) — graph alias of Quadratic
    VerticesSquared,
    /// O(n³)
    Cubic,
    /// O(V³) — graph alias of Cubic
    VerticesCubed,
    /// O(n^k) for loop depth k > 3
    Polynomial(u8),
    /// O(2ⁿ)
    Exponential,
    /// O(n × 2ⁿ) — bitmask-DP table space
    ExponentialLinear,
    /// O(n² × 2ⁿ) — bitmask-DP time (Held-Karp)
    ExponentialQuadratic,
    /// O(n!)
    Factorial,
}

impl Complexity {
    /// Position in the total order. Aliases share the rank of their
    /// polynomial (or exponential) equivalent.
    pub fn rank(&self) -> u32 {
        match self {
            Complexity::Constant => 0,
            Complexity::Logarithmic => 1,
            Complexity::SquareRoot => 2,
            Complexity::Linear | Complexity::Vertices | Complexity::VerticesPlusEdges => 3,
            Complexity::Linearithmic
            | Complexity::EdgesLogVertices
            | Complexity::EdgesLogEdges => 4,
            Complexity::Quadratic
            | Complexity::VerticesTimesEdges
            | Complexity::VerticesSquared => 5,
            Complexity::Cubic | Complexity::VerticesCubed => 6,
            // Depth-k loop nests slot in above cubic and below exponential.
            Complexity::Polynomial(k) => 3 + (*k as u32).min(37),
            Complexity::Exponential
            | Complexity::ExponentialLinear
            | Complexity::ExponentialQuadratic => 50,
            Complexity::Factorial => 60,
        }
    }

    /// Worst-case dominance: true when `self` is at least as costly.
    pub fn dominates(&self, other: &Complexity) -> bool {
        self.rank() >= other.rank()
    }

    /// Lattice join. Keeps `self`'s spelling on rank ties so a graph term
    /// survives a join with its n-based equivalent.
    pub fn max(self, other: Complexity) -> Complexity {
        if other.rank() > self.rank() {
            other
        } else {
            self
        }
    }

    /// Maximum of a sequence of terms; O(1) for an empty one.
    pub fn max_of(terms: impl IntoIterator<Item = Complexity>) -> Complexity {
        terms
            .into_iter()
            .fold(Complexity::Constant, |acc, t| acc.max(t))
    }

    pub fn is_exponential_or_worse(&self) -> bool {
        self.rank() >= Complexity::Exponential.rank()
    }

    /// Canonical Big-O spelling.
    pub fn notation(&self) -> String {
        match self {
            Complexity::Constant => "O(1)".to_string(),
            Complexity::Logarithmic => "O(log n)".to_string(),
            Complexity::SquareRoot => "O(√n)".to_string(),
            Complexity::Linear => "O(n)".to_string(),
            Complexity::Vertices => "O(V)".to_string(),
            Complexity::VerticesPlusEdges => "O(V + E)".to_string(),
            Complexity::Linearithmic => "O(n log n)".to_string(),
            Complexity::EdgesLogVertices => "O(E log V)".to_string(),
            Complexity::EdgesLogEdges => "O(E log E)".to_string(),
            Complexity::Quadratic => "O(n²)".to_string(),
            Complexity::VerticesTimesEdges => "O(V × E)".to_string(),
            Complexity::VerticesSquared => "O(V²)".to_string(),
            Complexity::Cubic => "O(n³)".to_string(),
            Complexity::VerticesCubed => "O(V³)".to_string(),
            Complexity::Polynomial(k) => format!("O(n^{k})"),
            Complexity::Exponential => "O(2ⁿ)".to_string(),
            Complexity::ExponentialLinear => "O(n × 2ⁿ)".to_string(),
            Complexity::ExponentialQuadratic => "O(n² × 2ⁿ)".to_string(),
            Complexity::Factorial => "O(n!)".to_string(),
        }
    }

    /// Bucket for reporting.
    pub fn level(&self) -> ComplexityLevel {
        match self.rank() {
            0..=1 => ComplexityLevel::Low,
            2..=4 => ComplexityLevel::Medium,
            5..=40 => ComplexityLevel::High,
            _ => ComplexityLevel::VeryHigh,
        }
    }
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.notation())
    }
}

/// Coarse severity bucket derived from the worst-case time term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComplexityLevel {
    Low,
    Medium,
    High,
    VeryHigh,
}

impl ComplexityLevel {
    pub fn display_name(&self) -> &'static str {
        match self {
            ComplexityLevel::Low => "Low",
            ComplexityLevel::Medium => "Medium",
            ComplexityLevel::High => "High",
            ComplexityLevel::VeryHigh => "Very High",
        }
    }
}

impl fmt::Display for ComplexityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
