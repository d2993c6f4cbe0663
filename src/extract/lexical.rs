//! Lexical fallback extraction for languages without a syntax tree.
//!
//! Line-by-line scanning with a brace-depth stack. A loop line pushes the
//! current brace depth and the depth counter only pops once brace depth
//! falls below the pushed value, which keeps braceless single-statement
//! loop bodies from corrupting the nesting count.

use crate::core::{Language, StaticMetrics};
use once_cell::sync::Lazy;
use regex::Regex;

static LOOP_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(for|while)\b").unwrap());
static LOOP_HEAD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(for|while)\s*\(").unwrap());
static PY_LOOP_HEAD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(for|while)\b[^:{]*:").unwrap());
static IF_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(if|else if|elif|switch)\b").unwrap());
static ALLOC_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(new|malloc|calloc|realloc|push|push_back|append|Map|Set|vector)\b").unwrap()
});
static LOG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"/\s*2|>>|left\s*\+|right\s*-").unwrap());

static FUNC_DEF_RES: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"\bdef\s+\w+\s*\(",              // Python
        r"\bfunction\s+\w+\s*\(",         // JavaScript
        r"\b\w+\s+\w+\s*\([^)]*\)\s*\{",  // C/C++/Java style
        r"\bfn\s+\w+\s*\(",               // Rust
        r"\bfunc\s+\w+\s*\(",             // Go
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

static C_FUNC_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:void|int|bool|string|double|float|auto|\w+)\s+(\w+)\s*\([^)]*\)\s*\{")
        .unwrap()
});
static PY_FUNC_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bdef\s+(\w+)\s*\([^)]*\)\s*:").unwrap());

pub fn extract(source: &str, _language: Language) -> StaticMetrics {
    let lines_of_code = source.lines().filter(|l| !l.trim().is_empty()).count();
    let loops = LOOP_RE.find_iter(source).count();
    let conditionals = IF_RE.find_iter(source).count();
    let allocations = ALLOC_RE.find_iter(source).count();
    let has_log_loop = LOG_RE.is_match(source);
    let max_loop_depth = detect_loop_depth(source);
    let (has_recursion, multi_recursion) = detect_recursion(source);

    StaticMetrics {
        lines_of_code,
        function_count: count_functions(source),
        loop_count: loops,
        conditional_count: conditionals,
        cyclomatic_complexity: ((1 + loops + conditionals) as u32).max(1),
        max_loop_depth,
        has_log_loop,
        dynamic_allocations: allocations,
        has_recursion,
        multi_recursion,
        language: Language::Generic,
    }
}

fn count_functions(source: &str) -> usize {
    let count: usize = FUNC_DEF_RES
        .iter()
        .map(|re| re.find_iter(source).count())
        .sum();
    count.max(1)
}

/// An open loop body: brace-delimited loops close when brace depth falls
/// below the recorded value, colon-style loops close on dedent.
enum LoopFrame {
    Brace(i32),
    Indent(usize),
}

/// Maximum nested loop depth via brace tracking, shared with the
/// per-function scanner.
pub fn detect_loop_depth(source: &str) -> u32 {
    let mut max_depth: u32 = 0;
    let mut current_depth: u32 = 0;
    let mut loop_stack: Vec<LoopFrame> = Vec::new();
    let mut brace_depth: i32 = 0;

    for line in source.lines() {
        let opens = line.matches('{').count() as i32;
        let closes = line.matches('}').count() as i32;
        let trimmed = line.trim_start();
        let indent = line.len() - trimmed.len();

        // Blank lines carry no indentation signal.
        if !trimmed.is_empty() {
            while let Some(LoopFrame::Indent(entry)) = loop_stack.last() {
                if indent <= *entry {
                    loop_stack.pop();
                    current_depth = current_depth.saturating_sub(1);
                } else {
                    break;
                }
            }
        }

        if LOOP_HEAD_RE.is_match(line) {
            loop_stack.push(LoopFrame::Brace(brace_depth + opens));
            current_depth += 1;
            max_depth = max_depth.max(current_depth);
        } else if PY_LOOP_HEAD_RE.is_match(line) {
            loop_stack.push(LoopFrame::Indent(indent));
            current_depth += 1;
            max_depth = max_depth.max(current_depth);
        }

        brace_depth += opens - closes;

        while let Some(LoopFrame::Brace(entry)) = loop_stack.last() {
            if brace_depth < *entry {
                loop_stack.pop();
                current_depth = current_depth.saturating_sub(1);
            } else {
                break;
            }
        }
    }

    if max_depth == 0 {
        return proximity_fallback(source);
    }
    max_depth
}

/// Last-resort estimate when brace tracking saw nothing: loop keywords that
/// sit physically close together are probably nested.
fn proximity_fallback(source: &str) -> u32 {
    let positions: Vec<usize> = LOOP_RE.find_iter(source).map(|m| m.start()).collect();
    match positions.len() {
        0 => 0,
        1 => 1,
        2 => {
            if positions[1] - positions[0] < 300 {
                2
            } else {
                1
            }
        }
        _ => {
            if positions.windows(3).any(|w| w[2] - w[0] < 500) {
                return 3;
            }
            if positions.windows(2).any(|w| w[1] - w[0] < 300) {
                return 2;
            }
            1
        }
    }
}

/// True recursion: a discovered function name invoked inside its own
/// textual body. One call after the definition line means recursion, more
/// than one means multi-recursion.
fn detect_recursion(source: &str) -> (bool, bool) {
    let mut has_recursion = false;
    let mut multi_recursion = false;

    let mut current: Option<(String, Regex)> = None;
    let mut brace_depth: i32 = 0;
    let mut body_lines = 0usize;
    let mut total_calls = 0usize;
    let mut saw_brace = false;

    for line in source.lines() {
        let c_match = C_FUNC_RE.captures(line);
        let py_match = PY_FUNC_RE.captures(line);

        if let Some(caps) = c_match.filter(|_| brace_depth == 0) {
            let name = caps[1].to_string();
            let call_re = Regex::new(&format!(r"\b{}\s*\(", regex::escape(&name))).unwrap();
            brace_depth = line.matches('{').count() as i32;
            saw_brace = brace_depth > 0;
            current = Some((name, call_re));
            body_lines = 0;
            total_calls = 0;
        } else if let Some(caps) = py_match {
            let name = caps[1].to_string();
            let call_re = Regex::new(&format!(r"\b{}\s*\(", regex::escape(&name))).unwrap();
            current = Some((name, call_re));
            brace_depth = 0;
            saw_brace = false;
            body_lines = 0;
            total_calls = 0;
        } else if let Some((_, call_re)) = &current {
            body_lines += 1;
            brace_depth += line.matches('{').count() as i32 - line.matches('}').count() as i32;
            saw_brace = saw_brace || line.contains('{');

            if body_lines > 0 {
                let calls = call_re.find_iter(line).count();
                total_calls += calls;
                if calls >= 1 {
                    has_recursion = true;
                }
                if calls >= 2 {
                    multi_recursion = true;
                }
            }

            if brace_depth <= 0 && saw_brace {
                if total_calls >= 1 {
                    has_recursion = true;
                }
                if total_calls >= 2 {
                    multi_recursion = true;
                }
                current = None;
                brace_depth = 0;
                saw_brace = false;
            }
        }
    }

    // Python bodies run to end-of-input; settle the trailing scope.
    if current.is_some() {
        if total_calls >= 1 {
            has_recursion = true;
        }
        if total_calls >= 2 {
            multi_recursion = true;
        }
    }

    (has_recursion, multi_recursion)
}
