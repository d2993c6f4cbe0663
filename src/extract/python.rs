//! Tree-based metric extraction for Python via tree-sitter.
//!
//! Loop depth is tracked with enter/exit counters during the walk, recursion
//! by comparing callee names against the enclosing function (threaded
//! through an explicit visitor struct, never module state), and dynamic
//! allocations from container literals, comprehensions, and growth calls.

use crate::core::{Language, StaticMetrics};
use std::collections::HashMap;
use tree_sitter::{Node, Parser};

/// Growth methods that count as dynamic allocations.
const GROWTH_METHODS: &[&str] = &["append", "extend", "add", "insert"];

/// Extract metrics from a Python snippet, or `None` when no usable tree is
/// available so the caller can degrade to the lexical scanner.
pub fn extract(source: &str) -> Option<StaticMetrics> {
    let tree = parse(source)?;
    let root = tree.root_node();
    if root.has_error() {
        return None;
    }

    let mut walker = TreeWalker::new(source);
    walker.visit(root);
    Some(walker.finish())
}

/// Parse a Python snippet, returning `None` on setup or parse failure.
pub fn parse(source: &str) -> Option<tree_sitter::Tree> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_python::LANGUAGE.into())
        .ok()?;
    parser.parse(source, None)
}

struct TreeWalker<'a> {
    source: &'a str,
    functions: usize,
    conditionals: usize,
    cyclomatic: u32,
    loop_count: usize,
    loop_depth: u32,
    max_loop_depth: u32,
    has_log_loop: bool,
    allocations: usize,
    /// Enclosing-function stack; the top is the current scope.
    scope_stack: Vec<String>,
    /// Recursive call-site count per function name.
    recursive_calls: HashMap<String, usize>,
}

impl<'a> TreeWalker<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            functions: 0,
            conditionals: 0,
            cyclomatic: 1,
            loop_count: 0,
            loop_depth: 0,
            max_loop_depth: 0,
            has_log_loop: false,
            allocations: 0,
            scope_stack: Vec::new(),
            recursive_calls: HashMap::new(),
        }
    }

    fn visit(&mut self, node: Node) {
        match node.kind() {
            "function_definition" => {
                self.functions += 1;
                self.cyclomatic += 1;
                let name = self.field_text(node, "name").unwrap_or_default();
                self.scope_stack.push(name);
                self.visit_children(node);
                self.scope_stack.pop();
                return;
            }
            "for_statement" => {
                self.enter_loop();
                self.visit_children(node);
                self.exit_loop();
                return;
            }
            "while_statement" => {
                self.enter_loop();
                if body_has_halving_update(node, self.source) {
                    self.has_log_loop = true;
                }
                self.visit_children(node);
                self.exit_loop();
                return;
            }
            "if_statement" | "elif_clause" | "conditional_expression" => {
                self.conditionals += 1;
                self.cyclomatic += 1;
            }
            // Binary and/or: one extra path per operator node
            "boolean_operator" => self.cyclomatic += 1,
            "list" | "dictionary" | "set" | "list_comprehension" | "dictionary_comprehension"
            | "set_comprehension" => self.allocations += 1,
            "call" => self.visit_call(node),
            _ => {}
        }
        self.visit_children(node);
    }

    fn visit_children(&mut self, node: Node) {
        for child in node.children(&mut node.walk()) {
            self.visit(child);
        }
    }

    fn visit_call(&mut self, node: Node) {
        let Some(callee) = node.child_by_field_name("function") else {
            return;
        };
        match callee.kind() {
            "identifier" => {
                let name = self.text(callee);
                if Some(name) == self.scope_stack.last().map(String::as_str) {
                    *self.recursive_calls.entry(name.to_string()).or_insert(0) += 1;
                }
            }
            "attribute" => {
                if let Some(attr) = callee.child_by_field_name("attribute") {
                    if GROWTH_METHODS.contains(&self.text(attr)) {
                        self.allocations += 1;
                    }
                }
            }
            _ => {}
        }
    }

    fn enter_loop(&mut self) {
        self.loop_count += 1;
        self.cyclomatic += 1;
        self.loop_depth += 1;
        self.max_loop_depth = self.max_loop_depth.max(self.loop_depth);
    }

    fn exit_loop(&mut self) {
        self.loop_depth -= 1;
    }

    fn text(&self, node: Node) -> &'a str {
        node.utf8_text(self.source.as_bytes()).unwrap_or("")
    }

    fn field_text(&self, node: Node, field: &str) -> Option<String> {
        node.child_by_field_name(field)
            .map(|n| self.text(n).to_string())
    }

    fn finish(self) -> StaticMetrics {
        let lines_of_code = self
            .source
            .lines()
            .filter(|l| !l.trim().is_empty())
            .count();
        let max_calls = self.recursive_calls.values().copied().max().unwrap_or(0);

        StaticMetrics {
            lines_of_code,
            function_count: self.functions,
            loop_count: self.loop_count,
            conditional_count: self.conditionals,
            cyclomatic_complexity: self.cyclomatic,
            max_loop_depth: self.max_loop_depth,
            has_log_loop: self.has_log_loop,
            dynamic_allocations: self.allocations,
            has_recursion: max_calls >= 1,
            multi_recursion: max_calls >= 2,
            language: Language::Python,
        }
    }
}

/// A while body that divides or right-shifts its own variables converges
/// logarithmically.
fn body_has_halving_update(while_node: Node, source: &str) -> bool {
    let Some(body) = while_node.child_by_field_name("body") else {
        return false;
    };
    has_halving_in(body, source)
}

pub(crate) fn has_halving_in(node: Node, source: &str) -> bool {
    match node.kind() {
        "augmented_assignment" => {
            let op = node
                .child_by_field_name("operator")
                .and_then(|n| n.utf8_text(source.as_bytes()).ok())
                .unwrap_or("");
            if matches!(op, "//=" | "/=" | ">>=") {
                return true;
            }
        }
        "assignment" => {
            let rhs = node
                .child_by_field_name("right")
                .and_then(|n| n.utf8_text(source.as_bytes()).ok())
                .unwrap_or("");
            if rhs.contains("//") || rhs.contains(">>") || rhs.contains('/') {
                return true;
            }
        }
        // Do not descend into nested loops: their updates belong to them.
        "while_statement" | "for_statement" => return false,
        _ => {}
    }
    node.children(&mut node.walk())
        .any(|child| has_halving_in(child, source))
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn counts_nested_loop_depth() {
        let code = indoc! {"
            def f(matrix):
                for row in matrix:
                    for cell in row:
                        print(cell)
        "};
        let m = extract(code).unwrap();
        assert_eq!(m.loop_count, 2);
        assert_eq!(m.max_loop_depth, 2);
        assert!(!m.has_recursion);
    }

    #[test]
    fn sibling_loops_do_not_stack() {
        let code = indoc! {"
            def f(items):
                for x in items:
                    print(x)
                for y in items:
                    print(y)
        "};
        let m = extract(code).unwrap();
        assert_eq!(m.loop_count, 2);
        assert_eq!(m.max_loop_depth, 1);
    }

    #[test]
    fn detects_single_and_multi_recursion() {
        let single = indoc! {"
            def fact(n):
                if n <= 1:
                    return 1
                return n * fact(n - 1)
        "};
        let m = extract(single).unwrap();
        assert!(m.has_recursion);
        assert!(!m.multi_recursion);

        let double = indoc! {"
            def fib(n):
                if n <= 1:
                    return n
                return fib(n - 1) + fib(n - 2)
        "};
        let m = extract(double).unwrap();
        assert!(m.has_recursion);
        assert!(m.multi_recursion);
    }

    #[test]
    fn halving_while_sets_log_loop() {
        let code = indoc! {"
            def f(n):
                while n > 1:
                    n //= 2
        "};
        let m = extract(code).unwrap();
        assert!(m.has_log_loop);
    }

    #[test]
    fn comprehensions_and_growth_calls_count_as_allocations() {
        let code = indoc! {"
            def f(items):
                squares = [x * x for x in items]
                out = []
                out.append(squares)
                return out
        "};
        let m = extract(code).unwrap();
        // list comprehension + empty list literal + append
        assert_eq!(m.dynamic_allocations, 3);
    }

    #[test]
    fn boolean_operators_add_cyclomatic_paths() {
        let plain = extract("def f(a):\n    if a:\n        return 1\n").unwrap();
        let boolish = extract("def f(a, b, c):\n    if a and b and c:\n        return 1\n").unwrap();
        assert_eq!(
            boolish.cyclomatic_complexity,
            plain.cyclomatic_complexity + 2
        );
    }

    #[test]
    fn non_python_degrades() {
        assert!(extract("public class Main { int x() { return 1; } }").is_none());
    }
}
