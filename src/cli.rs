use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::core::Language;

#[derive(Parser, Debug)]
#[command(name = "bigomap")]
#[command(about = "Static Big-O time/space complexity estimator", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze source files (or stdin when no path is given)
    Analyze {
        /// Files to analyze; reads stdin when empty
        paths: Vec<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Language tag, overriding automatic detection
        #[arg(short, long, value_enum)]
        language: Option<LanguageArg>,

        /// Report intrinsic algorithmic shape even for literal-bounded code
        #[arg(long)]
        intrinsic: bool,

        /// Config file (defaults to bigomap.toml when present)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Skip improvement suggestions
        #[arg(long = "no-suggestions")]
        no_suggestions: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Terminal,
    Json,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LanguageArg {
    Python,
    Java,
    Cpp,
    Javascript,
    Generic,
}

impl From<LanguageArg> for Language {
    fn from(l: LanguageArg) -> Self {
        match l {
            LanguageArg::Python => Language::Python,
            LanguageArg::Java => Language::Java,
            LanguageArg::Cpp => Language::Cpp,
            LanguageArg::Javascript => Language::JavaScript,
            LanguageArg::Generic => Language::Generic,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_analyze_with_flags() {
        let cli = Cli::try_parse_from([
            "bigomap",
            "analyze",
            "snippet.py",
            "--format",
            "json",
            "--intrinsic",
        ])
        .unwrap();
        let Commands::Analyze {
            paths,
            format,
            intrinsic,
            ..
        } = cli.command;
        assert_eq!(paths.len(), 1);
        assert!(matches!(format, OutputFormat::Json));
        assert!(intrinsic);
    }

    #[test]
    fn language_arg_maps_to_core_tag() {
        assert_eq!(Language::from(LanguageArg::Cpp), Language::Cpp);
        assert_eq!(Language::from(LanguageArg::Javascript), Language::JavaScript);
    }
}
