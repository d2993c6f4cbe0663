//! Metric extraction: structural counts from source text.
//!
//! Two strategies behind one entry point. Python gets a full tree-sitter
//! walk; everything else (and Python that fails to parse) goes through the
//! lexical brace/line scanner. The contract is total: any input yields a
//! `StaticMetrics`, with missing data degraded to zero/false defaults.

pub mod lexical;
pub mod python;

use crate::core::{Language, StaticMetrics};

pub fn extract_metrics(source: &str, language: Language) -> StaticMetrics {
    if language.has_tree() {
        if let Some(metrics) = python::extract(source) {
            return metrics;
        }
        log::debug!("syntax tree unavailable, degrading to lexical scan");
    }
    lexical::extract(source, language)
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn python_input_uses_tree_path() {
        let code = indoc! {"
            def f(items):
                for x in items:
                    print(x)
        "};
        let metrics = extract_metrics(code, Language::Python);
        assert_eq!(metrics.language, Language::Python);
        assert_eq!(metrics.loop_count, 1);
        assert_eq!(metrics.function_count, 1);
    }

    #[test]
    fn broken_python_degrades_to_lexical() {
        let code = "int main() { for (int i = 0; i < n; i++) { sum += i; } }";
        let metrics = extract_metrics(code, Language::Python);
        // Lexical path tags its output Generic
        assert_eq!(metrics.language, Language::Generic);
        assert_eq!(metrics.loop_count, 1);
    }

    #[test]
    fn never_fails_on_garbage() {
        let metrics = extract_metrics("{{{{ ]]] ??? \u{0}", Language::Generic);
        assert_eq!(metrics.loop_count, 0);
        assert!(!metrics.has_recursion);
    }
}
