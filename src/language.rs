//! Deterministic language routing. No scoring, no ML: the first matching
//! fingerprint wins, and anything without code structure at all is rejected
//! before the pipeline runs.

use crate::core::Language;

/// Classify a snippet, or `None` when the text is not recognizable as
/// source code (the pipeline must not run in that case).
pub fn classify(text: &str) -> Option<Language> {
    if !looks_like_code(text) {
        return None;
    }
    Some(detect_language(text))
}

pub fn detect_language(code: &str) -> Language {
    let lower = code.to_lowercase();

    if lower.contains("def ") || lower.contains("elif ") || lower.contains("import ") {
        return Language::Python;
    }
    if lower.contains("public class") || lower.contains("system.out.println") {
        return Language::Java;
    }
    if lower.contains("#include <") || lower.contains("printf(") {
        return Language::Cpp;
    }
    if lower.contains("function ") || lower.contains("=>") {
        return Language::JavaScript;
    }
    Language::Generic
}

/// Minimal structural evidence that this is code rather than prose: an
/// assignment, call, block delimiter, or statement keyword.
pub fn looks_like_code(text: &str) -> bool {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return false;
    }
    let structural = ['=', '(', '{', ';', '[']
        .iter()
        .any(|c| trimmed.contains(*c));
    let keyword = ["for ", "while ", "if ", "return", "def ", "class ", "import ", "void "]
        .iter()
        .any(|k| trimmed.contains(k));
    structural || keyword
}
