//! Shared feature vector for pattern detection and confidence gating.
//!
//! Computed once per request from the source text and the static metrics,
//! then queried by every rule predicate. Keeping vocabulary probes here —
//! instead of letting each layer re-derive its own substrings — is what
//! keeps the permissive and strict checks from drifting apart.

use crate::core::StaticMetrics;
use once_cell::sync::Lazy;
use regex::Regex;

static HALVING_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"/\s*2|//\s*2|>>\s*1").unwrap());
static HALVING_UPDATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/=\s*2|//=\s*2|>>=\s*1").unwrap());
static DIST_INDEX_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"dist\s*\[").unwrap());
static DIST_2D_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"dist\s*\[\s*\w+\s*\]\s*\[\s*\w+\s*\]").unwrap());
static DOUBLE_INDEX_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\]\s*\[").unwrap());
static DP_TABLE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(dp|memo|table)\s*\[").unwrap());
static MODULO_PROBE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"%\s*\d|%\s*i|\bmod\b").unwrap());
static BITMASK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bmask\b|1\s*<<").unwrap());

pub struct FeatureVector {
    pub metrics: StaticMetrics,
    lower: String,
}

impl FeatureVector {
    pub fn new(source: &str, metrics: &StaticMetrics) -> Self {
        Self {
            metrics: metrics.clone(),
            lower: source.to_lowercase(),
        }
    }

    /// Case-insensitive substring probe.
    pub fn has(&self, needle: &str) -> bool {
        self.lower.contains(needle)
    }

    pub fn has_any(&self, needles: &[&str]) -> bool {
        needles.iter().any(|n| self.lower.contains(n))
    }

    pub fn loop_depth(&self) -> u32 {
        self.metrics.max_loop_depth
    }

    pub fn loop_count(&self) -> usize {
        self.metrics.loop_count
    }

    pub fn has_recursion(&self) -> bool {
        self.metrics.has_recursion
    }

    pub fn multi_recursion(&self) -> bool {
        self.metrics.multi_recursion
    }

    /// Explicit halving operator somewhere in the text (`/ 2`, `// 2`,
    /// `>> 1`).
    pub fn has_halving(&self) -> bool {
        HALVING_RE.is_match(&self.lower)
    }

    /// Halving compound assignment (`/= 2`, `//= 2`, `>>= 1`).
    pub fn has_halving_update(&self) -> bool {
        HALVING_UPDATE_RE.is_match(&self.lower)
    }

    pub fn has_dist_array(&self) -> bool {
        DIST_INDEX_RE.is_match(&self.lower)
    }

    pub fn has_dist_matrix(&self) -> bool {
        DIST_2D_RE.is_match(&self.lower)
    }

    /// Two adjacent index brackets, the shape of a 2D table access.
    pub fn has_double_index(&self) -> bool {
        DOUBLE_INDEX_RE.is_match(&self.lower)
    }

    pub fn has_dp_table(&self) -> bool {
        DP_TABLE_RE.is_match(&self.lower)
    }

    pub fn has_modulo_probe(&self) -> bool {
        MODULO_PROBE_RE.is_match(&self.lower)
    }

    pub fn has_bitmask(&self) -> bool {
        BITMASK_RE.is_match(&self.lower)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Language;

    fn features(source: &str) -> FeatureVector {
        let metrics = StaticMetrics::empty(Language::Generic);
        FeatureVector::new(source, &metrics)
    }

    #[test]
    fn probes_are_case_insensitive() {
        let f = features("VISITED = set()\nQueue.Push(x)");
        assert!(f.has("visited"));
        assert!(f.has("queue"));
    }

    #[test]
    fn halving_operator_forms() {
        assert!(features("mid = (lo + hi) // 2").has_halving());
        assert!(features("n = n >> 1").has_halving());
        assert!(features("n //= 2").has_halving_update());
        assert!(!features("x = n - 1").has_halving());
    }

    #[test]
    fn dist_matrix_needs_two_axes() {
        let one = features("dist[v] = 0");
        assert!(one.has_dist_array());
        assert!(!one.has_dist_matrix());

        let two = features("dist[i][j] = dist[i][k] + dist[k][j]");
        assert!(two.has_dist_matrix());
        assert!(two.has_double_index());
    }
}
