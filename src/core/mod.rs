//! Common type definitions used across the analysis pipeline.

pub mod complexity;
pub mod errors;

pub use complexity::{Complexity, ComplexityLevel};
pub use errors::{Error, Result};

use serde::{Deserialize, Serialize};

/// Language tag attached to an input snippet by the (external) classifier.
///
/// The core treats this as opaque routing information: `Python` gets the
/// tree-based path, everything else the lexical fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    Python,
    Java,
    Cpp,
    JavaScript,
    Generic,
}

impl Language {
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::Python => "Python",
            Language::Java => "Java",
            Language::Cpp => "C/C++",
            Language::JavaScript => "JavaScript",
            Language::Generic => "Generic",
        }
    }

    pub fn from_extension(ext: &str) -> Option<Language> {
        match ext {
            "py" | "pyw" => Some(Language::Python),
            "java" => Some(Language::Java),
            "c" | "h" | "cc" | "cpp" | "hpp" | "cxx" => Some(Language::Cpp),
            "js" | "jsx" | "mjs" | "ts" | "tsx" => Some(Language::JavaScript),
            _ => None,
        }
    }

    /// Whether a full syntax tree is available for this language.
    pub fn has_tree(&self) -> bool {
        matches!(self, Language::Python)
    }
}

/// Structural counts extracted once per snippet and consumed read-only by
/// every downstream stage. Missing data degrades to zero/false, never to an
/// error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaticMetrics {
    pub lines_of_code: usize,
    pub function_count: usize,
    pub loop_count: usize,
    pub conditional_count: usize,
    pub cyclomatic_complexity: u32,
    pub max_loop_depth: u32,
    pub has_log_loop: bool,
    pub dynamic_allocations: usize,
    pub has_recursion: bool,
    pub multi_recursion: bool,
    pub language: Language,
}

impl StaticMetrics {
    pub fn empty(language: Language) -> Self {
        Self {
            lines_of_code: 0,
            function_count: 0,
            loop_count: 0,
            conditional_count: 0,
            cyclomatic_complexity: 1,
            max_loop_depth: 0,
            has_log_loop: false,
            dynamic_allocations: 0,
            has_recursion: false,
            multi_recursion: false,
            language,
        }
    }
}

/// How a function's recursive argument changes across calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecursionShape {
    None,
    /// f(n-1): one self-call shrinking by a constant
    Linear,
    /// f(n/2): one self-call on half the input
    Binary,
    /// f(n/2) + f(n/2) + combine step
    DivideAndConquer,
    /// f(n-1) + f(n-2): branching without division
    Exponential,
    /// recursion inside a loop enumerating arrangements
    Factorial,
}

impl RecursionShape {
    pub fn describe(&self) -> &'static str {
        match self {
            RecursionShape::None => "no recursion",
            RecursionShape::Linear => "linear recursion f(n-1)",
            RecursionShape::Binary => "binary recursion f(n/2)",
            RecursionShape::DivideAndConquer => "divide & conquer",
            RecursionShape::Exponential => "exponential branching",
            RecursionShape::Factorial => "permutation recursion",
        }
    }
}

/// A call out of the function body whose cost is known to the analyzer.
/// `scaling` records whether taint propagation saw an input-derived
/// receiver or argument; only scaling calls contribute their cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalCall {
    pub name: String,
    pub scaling: bool,
    pub cost: Complexity,
}

/// Per-function analysis result. Created during a single analysis pass and
/// discarded once the response is built; never persisted by the core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionProfile {
    pub name: String,
    pub line_start: usize,
    pub line_end: usize,
    pub loop_depth: u32,
    pub recursion: RecursionShape,
    pub recursive_calls: usize,
    pub external_calls: Vec<ExternalCall>,
    /// Result of taint propagation: does any loop bound or recursive
    /// argument actually derive from a parameter?
    pub scales_with_input: bool,
    pub time: Complexity,
    pub space: Complexity,
    pub reasoning: String,
}

/// The externally visible aggregate for one analyzed snippet.
///
/// Invariant: `time`/`space` equal the maximum, under the total order, of
/// all contributing `FunctionProfile` terms and any accepted pattern match —
/// never a sum or product of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub time_complexity: String,
    pub space_complexity: String,
    pub complexity_level: ComplexityLevel,
    pub functions: Vec<FunctionProfile>,
    /// Every function whose own time term equals the reported worst case.
    pub worst_time_functions: Vec<String>,
    pub worst_space_functions: Vec<String>,
    pub engine: String,
    pub summary: String,
    pub metrics: StaticMetrics,
}

impl AnalysisResult {
    /// Zero-valued result for input the classifier rejected as not code.
    /// The pipeline must not run in that case.
    pub fn not_applicable() -> Self {
        Self {
            time_complexity: "N/A".to_string(),
            space_complexity: "N/A".to_string(),
            complexity_level: ComplexityLevel::Low,
            functions: Vec::new(),
            worst_time_functions: Vec::new(),
            worst_space_functions: Vec::new(),
            engine: "none (input not recognized as code)".to_string(),
            summary: "Input was not recognized as source code".to_string(),
            metrics: StaticMetrics::empty(Language::Generic),
        }
    }

    pub fn worst_time_function(&self) -> &str {
        self.worst_time_functions
            .first()
            .map(String::as_str)
            .unwrap_or("unknown")
    }

    pub fn worst_space_function(&self) -> &str {
        self.worst_space_functions
            .first()
            .map(String::as_str)
            .unwrap_or("unknown")
    }
}
