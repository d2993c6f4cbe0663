//! The analysis pipeline, end to end.
//!
//! Pure and self-contained per request: classify, extract, pattern-match,
//! analyze per function, aggregate. No stage blocks on I/O and no state
//! crosses requests, so callers are free to run many snippets in parallel.

use crate::aggregate;
use crate::core::{AnalysisResult, Language};
use crate::extract;
use crate::function::{self, AnalyzerOptions};
use crate::language;
use crate::patterns::{self, FeatureVector};

#[derive(Debug, Clone, Copy, Default)]
pub struct Pipeline {
    pub options: AnalyzerOptions,
}

impl Pipeline {
    pub fn new(options: AnalyzerOptions) -> Self {
        Self { options }
    }

    /// Analyze one snippet with automatic language routing.
    pub fn analyze(&self, source: &str) -> AnalysisResult {
        match language::classify(source) {
            Some(lang) => self.analyze_as(source, lang),
            None => AnalysisResult::not_applicable(),
        }
    }

    /// Analyze one snippet under a caller-supplied language tag.
    pub fn analyze_as(&self, source: &str, lang: Language) -> AnalysisResult {
        let metrics = extract::extract_metrics(source, lang);

        let features = FeatureVector::new(source, &metrics);
        let pattern = patterns::gated_match(&features);
        if let Some(p) = &pattern {
            log::debug!("accepted pattern {}", p.category.name());
        }

        let profiles = function::analyze(source, lang, &self.options);

        // Provenance reflects the path actually taken: the extractor tags
        // its output Generic whenever it degraded to the lexical scan.
        let engine = if metrics.language.has_tree() {
            "syntax tree + taint analysis"
        } else {
            "lexical heuristics"
        };

        aggregate::aggregate(profiles, pattern, metrics, engine)
    }
}
