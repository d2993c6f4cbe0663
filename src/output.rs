//! Report building and rendering.
//!
//! The report is a stable, camelCase view over the analysis result for
//! JSON consumers, plus a human-oriented terminal rendering. Nothing here
//! recomputes complexity; it only formats what the pipeline produced.

use crate::core::{AnalysisResult, FunctionProfile, Result};
use crate::scoring::Scores;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub language: String,
    pub engine: String,
    pub time_complexity: String,
    pub space_complexity: String,
    pub complexity_level: String,
    pub summary: String,
    pub worst_time_function: String,
    pub worst_space_function: String,
    pub worst_time_functions: Vec<String>,
    pub worst_space_functions: Vec<String>,
    pub functions: Vec<FunctionView>,
    pub metrics: MetricsView,
    pub scores: Scores,
    pub suggestions: Vec<String>,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionView {
    pub name: String,
    pub line_start: usize,
    pub line_end: usize,
    pub time_complexity: String,
    pub space_complexity: String,
    pub loop_depth: u32,
    pub recursion_type: String,
    pub scales_with_input: bool,
    pub reasoning: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsView {
    pub lines_of_code: usize,
    pub function_count: usize,
    pub loop_count: usize,
    pub conditional_count: usize,
    pub cyclomatic_complexity: u32,
    pub max_loop_depth: u32,
}

impl Report {
    pub fn build(result: &AnalysisResult, scores: Scores, suggestions: Vec<String>) -> Report {
        Report {
            language: result.metrics.language.display_name().to_string(),
            engine: result.engine.clone(),
            time_complexity: result.time_complexity.clone(),
            space_complexity: result.space_complexity.clone(),
            complexity_level: result.complexity_level.display_name().to_string(),
            summary: result.summary.clone(),
            worst_time_function: result.worst_time_function().to_string(),
            worst_space_function: result.worst_space_function().to_string(),
            worst_time_functions: result.worst_time_functions.clone(),
            worst_space_functions: result.worst_space_functions.clone(),
            functions: result.functions.iter().map(FunctionView::from).collect(),
            metrics: MetricsView {
                lines_of_code: result.metrics.lines_of_code,
                function_count: result.metrics.function_count,
                loop_count: result.metrics.loop_count,
                conditional_count: result.metrics.conditional_count,
                cyclomatic_complexity: result.metrics.cyclomatic_complexity,
                max_loop_depth: result.metrics.max_loop_depth,
            },
            scores,
            suggestions,
            generated_at: Utc::now(),
        }
    }
}

impl From<&FunctionProfile> for FunctionView {
    fn from(f: &FunctionProfile) -> Self {
        FunctionView {
            name: f.name.clone(),
            line_start: f.line_start,
            line_end: f.line_end,
            time_complexity: f.time.notation(),
            space_complexity: f.space.notation(),
            loop_depth: f.loop_depth,
            recursion_type: f.recursion.describe().to_string(),
            scales_with_input: f.scales_with_input,
            reasoning: f.reasoning.clone(),
        }
    }
}

pub fn write_json<W: Write>(writer: &mut W, reports: &[Report]) -> Result<()> {
    if reports.len() == 1 {
        serde_json::to_writer_pretty(&mut *writer, &reports[0])?;
    } else {
        serde_json::to_writer_pretty(&mut *writer, reports)?;
    }
    writeln!(writer)?;
    Ok(())
}

pub fn write_terminal<W: Write>(writer: &mut W, report: &Report) -> Result<()> {
    writeln!(writer, "Language:  {}", report.language)?;
    writeln!(writer, "Engine:    {}", report.engine)?;
    writeln!(writer, "Time:      {}", report.time_complexity)?;
    writeln!(writer, "Space:     {}", report.space_complexity)?;
    writeln!(writer, "Level:     {}", report.complexity_level)?;
    writeln!(writer, "Summary:   {}", report.summary)?;
    writeln!(writer)?;

    if !report.functions.is_empty() {
        writeln!(writer, "Per-function breakdown:")?;
        for f in &report.functions {
            writeln!(
                writer,
                "  {}() [lines {}-{}]",
                f.name, f.line_start, f.line_end
            )?;
            writeln!(writer, "    time:  {}", f.time_complexity)?;
            writeln!(writer, "    space: {}", f.space_complexity)?;
            writeln!(writer, "    {}", f.reasoning)?;
        }
        writeln!(writer)?;
    }

    writeln!(
        writer,
        "Quality {} | Refactor {}% | Optimization {}%",
        report.scores.quality,
        report.scores.refactor_percentage,
        report.scores.optimization_percentage
    )?;

    if !report.suggestions.is_empty() {
        writeln!(writer, "Suggestions:")?;
        for s in &report.suggestions {
            writeln!(writer, "  - {}", s)?;
        }
    }
    Ok(())
}
