//! Regex Lint CLI
//!
//! Reports lookaheads that can never succeed, possessive quantifiers that
//! starve what follows them, and patterns that can never match.
//!
//! # Usage
//!
//! ```bash
//! # Check patterns given as arguments
//! cargo run --bin regex-lint -- check '(?=a)b' 'a*+a'
//!
//! # Full-match semantics, Python syntax, JSON output
//! cargo run --bin regex-lint -- check --dialect python --match-type full --format json 'a(?=b)'
//!
//! # Patterns from a file (one per line) with a YAML config
//! cargo run --bin regex-lint -- check --config regex-analysis.yaml --file patterns.txt
//!
//! # Print the configuration of a preset
//! cargo run --bin regex-lint -- config --preset thorough
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use regex_analysis::config::{AnalysisConfig, ConfigError, Preset};
use regex_analysis::{Dialect, MatchType, PatternReport, RegexAnalyzer};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "regex-lint")]
#[command(about = "Static checks for regular expressions", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze patterns
    Check {
        /// Patterns to analyze
        patterns: Vec<String>,

        /// Read additional patterns from a file, one per line
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// YAML configuration file (version 1)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Base preset when no config file is given
        #[arg(short, long, default_value = "balanced")]
        preset: Preset,

        /// Regex dialect: java, python or pcre
        #[arg(short, long)]
        dialect: Option<String>,

        /// How patterns are applied: full, partial or unknown
        #[arg(short, long)]
        match_type: Option<String>,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Print the YAML configuration of a preset
    Config {
        #[arg(short, long, default_value = "balanced")]
        preset: Preset,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Check {
            patterns,
            file,
            config,
            preset,
            dialect,
            match_type,
            format,
        } => run_check(patterns, file, config, preset, dialect, match_type, format),
        Commands::Config { preset } => print_config(preset).map(|_| false),
    };

    match result {
        Ok(false) => ExitCode::SUCCESS,
        Ok(true) => ExitCode::from(1),
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::from(2)
        }
    }
}

/// Returns whether any issue or syntax error was found
fn run_check(
    mut patterns: Vec<String>,
    file: Option<PathBuf>,
    config: Option<PathBuf>,
    preset: Preset,
    dialect: Option<String>,
    match_type: Option<String>,
    format: OutputFormat,
) -> Result<bool, Box<dyn std::error::Error>> {
    let mut analysis = match config {
        Some(path) => AnalysisConfig::from_yaml(path)?,
        None => AnalysisConfig::preset(preset),
    };
    if let Some(name) = dialect {
        analysis = analysis.dialect(Dialect::parse(&name).ok_or(ConfigError::UnknownName {
            kind: "dialect",
            name,
            valid: "java, python, pcre",
        })?);
    }
    if let Some(name) = match_type {
        analysis = analysis.match_type(MatchType::parse(&name).ok_or(ConfigError::UnknownName {
            kind: "match type",
            name,
            valid: "full, partial, unknown",
        })?);
    }

    if let Some(path) = file {
        let content = std::fs::read_to_string(path)?;
        patterns.extend(content.lines().filter(|l| !l.is_empty()).map(str::to_string));
    }

    let analyzer = RegexAnalyzer::new(analysis)?;
    let reports = analyzer.analyze_batch(&patterns);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&reports)?),
        OutputFormat::Text => print_text(&reports),
    }

    Ok(reports
        .iter()
        .any(|r| !r.issues.is_empty() || r.error.is_some()))
}

fn print_text(reports: &[PatternReport]) {
    for report in reports {
        if let Some(error) = &report.error {
            println!("{}: {}", report.pattern, error);
            continue;
        }
        for issue in &report.issues {
            println!(
                "{}:{}: {} [{}]",
                report.pattern, issue.range, issue.message, issue.text
            );
            for secondary in &issue.secondaries {
                println!("    {}: {}", secondary.range, secondary.message);
            }
        }
    }
}

fn print_config(preset: Preset) -> Result<(), Box<dyn std::error::Error>> {
    print!("{}", AnalysisConfig::preset(preset).to_yaml()?);
    Ok(())
}
