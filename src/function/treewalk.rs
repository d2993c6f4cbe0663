//! Tree-based per-function fact gathering for Python.
//!
//! One parse per snippet; every `function_definition` node gets its own
//! visitor carrying a taint set seeded from its parameters. Assignment flow,
//! loop bounds, recursive-call arguments and stdlib call sites are all
//! judged against that set, so `range(10)` loops and `sorted([1, 2, 3])`
//! never register as scaling.

use super::scopes::FunctionScope;
use super::taint::TaintSet;
use super::{stdlib, FunctionFacts};
use crate::core::ExternalCall;
use crate::extract::python;
use once_cell::sync::Lazy;
use regex::Regex;
use tree_sitter::Node;

static SQRT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+\s*\*\s*\w+\s*<=|sqrt\s*\(").unwrap());

const GROWTH_METHODS: &[&str] = &["append", "extend", "add", "insert"];

/// Discover function scopes and their facts from a syntax tree, or `None`
/// when the snippet does not parse cleanly.
pub fn collect(source: &str) -> Option<Vec<(FunctionScope, FunctionFacts)>> {
    let tree = python::parse(source)?;
    let root = tree.root_node();
    if root.has_error() {
        return None;
    }

    let mut out = Vec::new();
    gather(root, source, &mut out);

    if out.is_empty() {
        // Module-level code only: one implicit scope, open-world taint.
        let scope = FunctionScope::implicit(source);
        let mut visitor = FnVisitor::new(source, "", TaintSet::open_world());
        visitor.visit_children(root);
        out.push((scope, visitor.facts));
    }
    Some(out)
}

fn gather(node: Node, source: &str, out: &mut Vec<(FunctionScope, FunctionFacts)>) {
    for child in node.children(&mut node.walk()) {
        if child.kind() == "function_definition" {
            let name = field_text(child, "name", source).unwrap_or_default();
            let params = parameter_names(child, source);
            let body = text(child, source).to_string();
            let mut visitor = FnVisitor::new(source, &name, TaintSet::seed(&params));
            visitor.visit_children(child);
            // Take the facts first so the visitor's borrow of `name` ends
            // before the scope takes ownership of it.
            let facts = visitor.facts;
            out.push((
                FunctionScope {
                    name,
                    params,
                    body,
                    line_start: child.start_position().row + 1,
                    line_end: child.end_position().row + 1,
                },
                facts,
            ));
        }
        gather(child, source, out);
    }
}

fn parameter_names(func: Node, source: &str) -> Vec<String> {
    let Some(params) = func.child_by_field_name("parameters") else {
        return Vec::new();
    };
    let mut names = Vec::new();
    for child in params.children(&mut params.walk()) {
        let name = match child.kind() {
            "identifier" => Some(text(child, source)),
            "typed_parameter" => child
                .child(0)
                .filter(|n| n.kind() == "identifier")
                .map(|n| text(n, source)),
            "default_parameter" | "typed_default_parameter" => child
                .child_by_field_name("name")
                .map(|n| text(n, source)),
            _ => None,
        };
        if let Some(name) = name.filter(|n| *n != "self") {
            names.push(name.to_string());
        }
    }
    names
}

struct FnVisitor<'a> {
    source: &'a str,
    name: &'a str,
    taint: TaintSet,
    loop_depth: u32,
    facts: FunctionFacts,
}

impl<'a> FnVisitor<'a> {
    fn new(source: &'a str, name: &'a str, taint: TaintSet) -> Self {
        Self {
            source,
            name,
            taint,
            loop_depth: 0,
            facts: FunctionFacts::default(),
        }
    }

    fn visit(&mut self, node: Node) {
        match node.kind() {
            "for_statement" => {
                let iterable = node
                    .child_by_field_name("right")
                    .map(|n| text(n, self.source))
                    .unwrap_or("");
                let scaling = self.taint.any_in(iterable);
                if scaling {
                    self.facts.scaling_loop = true;
                }
                if SQRT_RE.is_match(iterable) {
                    self.facts.sqrt_loop = true;
                }
                // The loop variable inherits the iterable's taint.
                if let Some(var) = node.child_by_field_name("left") {
                    for id in super::taint::identifiers(text(var, self.source)) {
                        if scaling {
                            self.taint.taint(id);
                        } else {
                            self.taint.sanitize(id);
                        }
                    }
                }
                self.enter_loop();
                self.visit_children(node);
                self.exit_loop();
                return;
            }
            "while_statement" => {
                let condition = node
                    .child_by_field_name("condition")
                    .map(|n| text(n, self.source))
                    .unwrap_or("");
                if self.taint.any_in(condition) {
                    self.facts.scaling_loop = true;
                }
                if SQRT_RE.is_match(condition) {
                    self.facts.sqrt_loop = true;
                }
                if let Some(body) = node.child_by_field_name("body") {
                    if python::has_halving_in(body, self.source) {
                        self.facts.halving_loop = true;
                    }
                }
                self.enter_loop();
                self.visit_children(node);
                self.exit_loop();
                return;
            }
            "assignment" => {
                let rhs = node
                    .child_by_field_name("right")
                    .map(|n| text(n, self.source))
                    .unwrap_or("");
                let tainted = self.taint.any_in(rhs);
                if let Some(lhs) = node.child_by_field_name("left") {
                    for id in super::taint::identifiers(text(lhs, self.source)) {
                        if tainted {
                            self.taint.taint(id);
                        } else {
                            self.taint.sanitize(id);
                        }
                    }
                }
            }
            "augmented_assignment" => {
                let rhs = node
                    .child_by_field_name("right")
                    .map(|n| text(n, self.source))
                    .unwrap_or("");
                if self.taint.any_in(rhs) {
                    if let Some(lhs) = node.child_by_field_name("left") {
                        for id in super::taint::identifiers(text(lhs, self.source)) {
                            self.taint.taint(id);
                        }
                    }
                }
            }
            "list" | "dictionary" | "set" | "list_comprehension" | "dictionary_comprehension"
            | "set_comprehension" => self.facts.allocations += 1,
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
        let args = node
            .child_by_field_name("arguments")
            .map(|n| text(n, self.source))
            .unwrap_or("");

        match callee.kind() {
            "identifier" => {
                let name = text(callee, self.source);
                if !self.name.is_empty() && name == self.name {
                    self.facts.recursive_calls += 1;
                    if self.loop_depth > 0 {
                        self.facts.recursion_in_loop = true;
                    }
                    if self.taint.any_in(args) {
                        self.facts.scaling_recursion = true;
                    }
                } else if let Some(cost) = stdlib::call_cost(name) {
                    self.facts.external_calls.push(ExternalCall {
                        name: name.to_string(),
                        scaling: self.taint.any_in(args),
                        cost,
                    });
                }
            }
            "attribute" => {
                let method = callee
                    .child_by_field_name("attribute")
                    .map(|n| text(n, self.source))
                    .unwrap_or("");
                let receiver = callee
                    .child_by_field_name("object")
                    .map(|n| text(n, self.source))
                    .unwrap_or("");
                if GROWTH_METHODS.contains(&method) {
                    self.facts.allocations += 1;
                }
                if let Some(cost) = stdlib::call_cost(method) {
                    self.facts.external_calls.push(ExternalCall {
                        name: method.to_string(),
                        scaling: self.taint.any_in(receiver) || self.taint.any_in(args),
                        cost,
                    });
                }
            }
            _ => {}
        }
    }

    fn enter_loop(&mut self) {
        self.facts.loop_count += 1;
        self.loop_depth += 1;
        self.facts.loop_depth = self.facts.loop_depth.max(self.loop_depth);
    }

    fn exit_loop(&mut self) {
        self.loop_depth -= 1;
    }
}

fn text<'a>(node: Node, source: &'a str) -> &'a str {
    node.utf8_text(source.as_bytes()).unwrap_or("")
}

fn field_text(node: Node, field: &str, source: &str) -> Option<String> {
    node.child_by_field_name(field)
        .map(|n| text(n, source).to_string())
}
