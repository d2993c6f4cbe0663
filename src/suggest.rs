//! Improvement suggestions, best-effort.
//!
//! Providers run after the complexity result is final and are never allowed
//! to alter it. Any provider failure degrades to the fixed fallback list.

use crate::core::{Result, StaticMetrics};

pub const FALLBACK_SUGGESTIONS: [&str; 3] = [
    "Reduce unnecessary nested loops.",
    "Avoid repeated computations.",
    "Split large functions into smaller units.",
];

/// An external suggestion source. Implementations may do I/O; callers
/// always go through [`suggestions_or_fallback`].
pub trait SuggestionProvider {
    fn suggestions(&self, source: &str, metrics: &StaticMetrics) -> Result<Vec<String>>;
}

/// Static rule-of-thumb suggestions derived from the metrics alone.
pub struct StaticSuggestions;

impl SuggestionProvider for StaticSuggestions {
    fn suggestions(&self, _source: &str, metrics: &StaticMetrics) -> Result<Vec<String>> {
        let mut out = Vec::new();
        if metrics.max_loop_depth >= 2 {
            out.push(format!(
                "Loop nesting reaches depth {}; consider flattening with a lookup structure.",
                metrics.max_loop_depth
            ));
        }
        if metrics.multi_recursion {
            out.push(
                "Multiple recursive branches detected; memoization may avoid exponential blowup."
                    .to_string(),
            );
        }
        if metrics.dynamic_allocations > 3 {
            out.push(
                "Several dynamic allocations detected; preallocate or reuse buffers where possible."
                    .to_string(),
            );
        }
        if out.is_empty() {
            out.extend(FALLBACK_SUGGESTIONS.iter().map(|s| s.to_string()));
        }
        Ok(out)
    }
}

/// Run a provider, substituting the fallback list on any failure.
pub fn suggestions_or_fallback(
    provider: &dyn SuggestionProvider,
    source: &str,
    metrics: &StaticMetrics,
) -> Vec<String> {
    match provider.suggestions(source, metrics) {
        Ok(list) if !list.is_empty() => list,
        Ok(_) => FALLBACK_SUGGESTIONS.iter().map(|s| s.to_string()).collect(),
        Err(err) => {
            log::warn!("suggestion provider failed: {err}, using fallback list");
            FALLBACK_SUGGESTIONS.iter().map(|s| s.to_string()).collect()
        }
    }
}
