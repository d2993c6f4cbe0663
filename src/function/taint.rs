//! Taint tracking for input-scaling analysis.
//!
//! A variable is "tainted" when its value derives from a function parameter,
//! so loops bounded by it and recursive calls fed by it scale with input
//! size. The set is a plain forward pass over assignments: tainted
//! right-hand sides taint the target, literal (taint-free) right-hand sides
//! sanitize it. Scopes without a parameter list run in open-world mode
//! where unknown identifiers count as tainted, which keeps the degraded
//! lexical path conservative instead of collapsing real loops to O(1).

use std::collections::HashSet;

/// Names that look like identifiers but never carry input data.
const KEYWORDS: &[&str] = &[
    "for", "while", "in", "if", "elif", "else", "return", "def", "range", "len", "print", "int",
    "float", "str", "list", "dict", "set", "bool", "and", "or", "not", "break", "continue",
    "enumerate", "zip", "true", "false", "none", "True", "False", "None", "size_t", "const",
    "auto", "void", "double", "long", "char", "unsigned", "std", "function", "var", "let",
    "new", "fn",
];

#[derive(Debug, Clone)]
pub struct TaintSet {
    tainted: HashSet<String>,
    cleared: HashSet<String>,
    /// Unknown identifiers default to tainted (implicit scopes only).
    open_world: bool,
}

impl TaintSet {
    /// Seed from a parameter list; everything else starts clean.
    pub fn seed(params: &[String]) -> Self {
        Self {
            tainted: params.iter().cloned().collect(),
            cleared: HashSet::new(),
            open_world: false,
        }
    }

    /// No parameter list to seed from: assume unknown names scale until an
    /// assignment proves otherwise.
    pub fn open_world() -> Self {
        Self {
            tainted: HashSet::new(),
            cleared: HashSet::new(),
            open_world: true,
        }
    }

    pub fn taint(&mut self, name: &str) {
        self.cleared.remove(name);
        self.tainted.insert(name.to_string());
    }

    pub fn sanitize(&mut self, name: &str) {
        self.tainted.remove(name);
        self.cleared.insert(name.to_string());
    }

    pub fn is_tainted(&self, name: &str) -> bool {
        if KEYWORDS.contains(&name) || name.chars().all(|c| c.is_ascii_digit()) {
            return false;
        }
        if self.tainted.contains(name) {
            return true;
        }
        self.open_world && !self.cleared.contains(name)
    }

    /// Does any identifier in this expression text carry taint?
    pub fn any_in(&self, text: &str) -> bool {
        identifiers(text).any(|id| self.is_tainted(id))
    }
}

/// Identifier tokens of an expression: maximal `[A-Za-z_][A-Za-z0-9_]*`
/// runs.
pub fn identifiers(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|t| !t.is_empty())
        .filter(|t| {
            t.chars()
                .next()
                .is_some_and(|c| c.is_alphabetic() || c == '_')
        })
}
