use anyhow::{Context, Result};
use bigomap::cli::{Cli, Commands, OutputFormat};
use bigomap::config::Config;
use bigomap::core::{Error, Language};
use bigomap::function::{AnalyzerOptions, CollapsePolicy};
use bigomap::output::{self, Report};
use bigomap::pipeline::Pipeline;
use bigomap::scoring;
use bigomap::suggest::{self, StaticSuggestions};
use clap::Parser;
use rayon::prelude::*;
use std::fs;
use std::io::{Read, Write};
use std::path::PathBuf;

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            paths,
            format,
            output,
            language,
            intrinsic,
            config,
            no_suggestions,
        } => {
            let mut config = Config::load(config.as_deref())?;
            if intrinsic {
                config.collapse = CollapsePolicy::Intrinsic;
            }
            if no_suggestions {
                config.suggestions = false;
            }

            let pipeline = Pipeline::new(AnalyzerOptions {
                collapse: config.collapse,
            });
            let language = language.map(Language::from);

            let inputs = read_inputs(&paths)?;
            let reports: Vec<Report> = inputs
                .par_iter()
                .map(|(name, source)| analyze_one(&pipeline, &config, language, name, source))
                .collect();

            write_reports(&reports, format, output.as_deref())
        }
    }
}

fn analyze_one(
    pipeline: &Pipeline,
    config: &Config,
    language: Option<Language>,
    name: &str,
    source: &str,
) -> Report {
    log::info!("analyzing {name}");
    let result = match language {
        Some(lang) => pipeline.analyze_as(source, lang),
        None => pipeline.analyze(source),
    };
    let scores = scoring::score(&result.metrics);
    let suggestions = if config.suggestions {
        suggest::suggestions_or_fallback(&StaticSuggestions, source, &result.metrics)
    } else {
        Vec::new()
    };
    Report::build(&result, scores, suggestions)
}

/// Named sources to analyze: the given files, or stdin when none.
fn read_inputs(paths: &[PathBuf]) -> Result<Vec<(String, String)>> {
    if paths.is_empty() {
        let mut source = String::new();
        std::io::stdin()
            .read_to_string(&mut source)
            .context("failed to read stdin")?;
        return Ok(vec![("<stdin>".to_string(), source)]);
    }
    paths
        .iter()
        .map(|p| {
            let source =
                fs::read_to_string(p).map_err(|e| Error::file(p.as_path(), e))?;
            Ok((p.display().to_string(), source))
        })
        .collect()
}

fn write_reports(
    reports: &[Report],
    format: OutputFormat,
    output: Option<&std::path::Path>,
) -> Result<()> {
    let mut writer: Box<dyn std::io::Write> = match output {
        Some(path) => Box::new(
            fs::File::create(path).with_context(|| format!("failed to create {}", path.display()))?,
        ),
        None => Box::new(std::io::stdout().lock()),
    };

    match format {
        OutputFormat::Json => output::write_json(&mut writer, reports)?,
        OutputFormat::Terminal => {
            for (i, report) in reports.iter().enumerate() {
                if i > 0 {
                    writeln!(writer, "{}", "-".repeat(60))?;
                }
                output::write_terminal(&mut writer, report)?;
            }
        }
    }
    Ok(())
}
