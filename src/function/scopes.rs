//! Function scope discovery and fact gathering for the lexical path.
//!
//! C-family bodies are found by a `<modifiers> <type> name(params) {`
//! signature scan with brace tracking; Python defs by indentation. When
//! nothing matches, the whole snippet becomes one implicit `main` scope so
//! the analyzer always has at least one function to report on.

use super::taint::{identifiers, TaintSet};
use super::{stdlib, FunctionFacts};
use crate::core::ExternalCall;
use crate::extract::lexical::detect_loop_depth;
use once_cell::sync::Lazy;
use regex::Regex;

static C_FUNC_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:void|int|bool|string|double|float|auto|function|\w+)\s+(\w+)\s*\(([^)]*)\)\s*\{")
        .unwrap()
});
static PY_FUNC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\s*)def\s+(\w+)\s*\(([^)]*)\)\s*.*:").unwrap());
static LOOP_HEAD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(for|while)\b([^{:]*)").unwrap());
static HALVING_UPDATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/=\s*2|//=\s*2|>>=\s*1").unwrap());
static HALVING_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"/\s*2|>>\s*1").unwrap());
static SQRT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\w+\s*\*\s*\w+\s*<=|sqrt\s*\(").unwrap());
static METHOD_CALL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\w+)\.(\w+)\s*\(([^)]*)\)").unwrap());
static FREE_CALL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(sorted|heapify|heappush|heappop|qsort|bisect_left|bisect_right|bisect)\s*\(([^)]*)\)")
        .unwrap()
});
static ALLOC_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(new|malloc|calloc|realloc|push|push_back|append|vector)\b").unwrap()
});
// Plain assignment, rejecting ==, <=, >=, != and compound operators.
static ASSIGN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|[^<>!=+\-*/%&|])\b(\w+)\s*=\s*([^=][^;]*)").unwrap());

/// Loop counter names excluded from bound-scaling checks.
const COUNTERS: &[&str] = &["i", "j", "k", "idx", "it", "_"];

#[derive(Debug, Clone)]
pub struct FunctionScope {
    pub name: String,
    pub params: Vec<String>,
    pub body: String,
    pub line_start: usize,
    pub line_end: usize,
}

impl FunctionScope {
    /// The whole snippet as one function, for code with no definitions.
    pub fn implicit(source: &str) -> Self {
        Self {
            name: "main".to_string(),
            params: Vec::new(),
            body: source.to_string(),
            line_start: 1,
            line_end: source.lines().count().max(1),
        }
    }
}

/// Find function scopes by signature scanning. May return an empty list;
/// the caller substitutes an implicit scope.
pub fn discover(source: &str) -> Vec<FunctionScope> {
    let mut scopes = discover_braced(source);
    if scopes.is_empty() {
        scopes = discover_python(source);
    }
    scopes
}

fn discover_braced(source: &str) -> Vec<FunctionScope> {
    let mut scopes = Vec::new();
    let mut current: Option<(String, Vec<String>, usize, Vec<String>)> = None;
    let mut brace_depth: i32 = 0;

    for (idx, line) in source.lines().enumerate() {
        let lineno = idx + 1;
        if current.is_none() {
            if let Some(caps) = C_FUNC_RE.captures(line) {
                let name = caps[1].to_string();
                let params = split_params(&caps[2]);
                brace_depth = line.matches('{').count() as i32 - line.matches('}').count() as i32;
                current = Some((name, params, lineno, vec![line.to_string()]));
                continue;
            }
        } else if let Some((_, _, _, body)) = current.as_mut() {
            body.push(line.to_string());
            brace_depth += line.matches('{').count() as i32 - line.matches('}').count() as i32;
            if brace_depth <= 0 {
                let (name, params, start, body) = current.take().unwrap_or_default();
                scopes.push(FunctionScope {
                    name,
                    params,
                    body: body.join("\n"),
                    line_start: start,
                    line_end: lineno,
                });
                brace_depth = 0;
            }
        }
    }

    // Unterminated body runs to end of input.
    if let Some((name, params, start, body)) = current {
        scopes.push(FunctionScope {
            name,
            params,
            line_end: start + body.len().saturating_sub(1),
            body: body.join("\n"),
            line_start: start,
        });
    }
    scopes
}

/// Indentation-scoped `def` blocks, for Python snippets the parser
/// rejected.
fn discover_python(source: &str) -> Vec<FunctionScope> {
    let lines: Vec<&str> = source.lines().collect();
    let mut scopes = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let Some(caps) = PY_FUNC_RE.captures(lines[i]) else {
            i += 1;
            continue;
        };
        let indent = caps[1].len();
        let name = caps[2].to_string();
        let params = split_params(&caps[3]);
        let start = i + 1;
        let mut end = i + 1;
        while end < lines.len() {
            let line = lines[end];
            let trimmed = line.trim_start();
            if !trimmed.is_empty() && line.len() - trimmed.len() <= indent {
                break;
            }
            end += 1;
        }
        scopes.push(FunctionScope {
            name,
            params,
            body: lines[i..end].join("\n"),
            line_start: start,
            line_end: end,
        });
        i = end;
    }
    scopes
}

fn split_params(raw: &str) -> Vec<String> {
    raw.split(',')
        .filter_map(|p| {
            let p = p.split('=').next().unwrap_or(p);
            identifiers(p)
                .filter(|t| !matches!(*t, "self" | "const" | "int" | "float" | "double" | "char"
                    | "bool" | "void" | "long" | "unsigned" | "std" | "string" | "vector" | "auto"
                    | "size_t"))
                .last()
                .map(str::to_string)
        })
        .collect()
}

/// Lexical fact gathering: the degraded approximation of the tree-based
/// taint walk, erring toward "scales" for unknown names.
pub fn facts(scope: &FunctionScope) -> FunctionFacts {
    let body = &scope.body;
    let mut taint = if scope.params.is_empty() {
        TaintSet::open_world()
    } else {
        TaintSet::seed(&scope.params)
    };

    // Assignment flow, approximated line by line. The second pass lets
    // taint reach copies assigned before their source was known.
    for _ in 0..2 {
        for line in body.lines() {
            for caps in ASSIGN_RE.captures_iter(line) {
                let target = caps[1].to_string();
                if taint.any_in(&caps[2]) {
                    taint.taint(&target);
                } else {
                    taint.sanitize(&target);
                }
            }
        }
    }

    let mut facts = FunctionFacts::default();
    facts.loop_depth = detect_loop_depth(body);

    for line in body.lines() {
        if let Some(caps) = LOOP_HEAD_RE.captures(line) {
            facts.loop_count += 1;
            // Python heads name the loop variable before `in`; only the
            // iterable decides whether the loop scales.
            let head = caps.get(2).map_or("", |m| m.as_str());
            let bound = head.rsplit(" in ").next().unwrap_or(head);
            if SQRT_RE.is_match(bound) {
                facts.sqrt_loop = true;
            }
            let scaling = identifiers(bound)
                .filter(|t| !COUNTERS.contains(t))
                .any(|t| taint.is_tainted(t));
            if scaling {
                facts.scaling_loop = true;
            }
        }
        facts.allocations += ALLOC_RE.find_iter(line).count();
    }

    facts.halving_loop = HALVING_UPDATE_RE.is_match(body)
        || (body.contains("mid") && HALVING_RE.is_match(body));

    gather_recursion(scope, &taint, &mut facts);
    gather_calls(body, &taint, &mut facts);
    facts
}

fn gather_recursion(scope: &FunctionScope, taint: &TaintSet, facts: &mut FunctionFacts) {
    let Ok(call_re) = Regex::new(&format!(
        r"\b{}\s*\(([^)]*)\)",
        regex::escape(&scope.name)
    )) else {
        return;
    };
    // Skip the definition line itself.
    let body_after_def: String = scope
        .body
        .lines()
        .skip(1)
        .collect::<Vec<_>>()
        .join("\n");

    for caps in call_re.captures_iter(&body_after_def) {
        facts.recursive_calls += 1;
        // Without expression-level flow, any identifier argument is assumed
        // input-derived; only literal-argument calls stay non-scaling.
        if taint.any_in(&caps[1]) || identifiers(&caps[1]).next().is_some() {
            facts.scaling_recursion = true;
        }
    }
    facts.recursion_in_loop = facts.recursive_calls > 0 && facts.loop_count > 0;
}

fn gather_calls(body: &str, taint: &TaintSet, facts: &mut FunctionFacts) {
    for caps in METHOD_CALL_RE.captures_iter(body) {
        let method = &caps[2];
        if let Some(cost) = stdlib::call_cost(method) {
            let scaling = taint.is_tainted(&caps[1]) || taint.any_in(&caps[3]);
            facts.external_calls.push(ExternalCall {
                name: method.to_string(),
                scaling,
                cost,
            });
        }
    }
    for caps in FREE_CALL_RE.captures_iter(body) {
        if let Some(cost) = stdlib::call_cost(&caps[1]) {
            facts.external_calls.push(ExternalCall {
                name: caps[1].to_string(),
                scaling: taint.any_in(&caps[2]),
                cost,
            });
        }
    }
}
