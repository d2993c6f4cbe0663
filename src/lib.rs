//! bigomap: static Big-O time/space complexity estimation for source
//! snippets in several languages, without executing them.
//!
//! The pipeline is layered: structural metric extraction, canonical
//! algorithm pattern recognition behind a confidence gate, per-function
//! taint-and-recursion analysis, and a complexity-lattice aggregation that
//! combines terms by worst-case dominance.

pub mod aggregate;
pub mod cli;
pub mod config;
pub mod core;
pub mod extract;
pub mod function;
pub mod language;
pub mod output;
pub mod patterns;
pub mod pipeline;
pub mod scoring;
pub mod suggest;

pub use crate::core::{AnalysisResult, Complexity, ComplexityLevel, Language, RecursionShape};
pub use crate::pipeline::Pipeline;
