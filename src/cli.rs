//! Command-line interface for gocodegraph.

use clap::{ArgAction, CommandFactory, Parser, ValueEnum};
use log::LevelFilter;
use std::path::PathBuf;

use crate::analysis;
use crate::report;

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_USAGE: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// Inventory the declarations of a Go source file and the calls made
/// from each function and method.
#[derive(Parser)]
#[command(name = "gocodegraph")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the Go source file to analyze
    pub path: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Increase log verbosity on stderr (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Output format for the analysis result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Declaration table keyed by name
    Json,
    /// Node and link arrays for diagram front-ends
    Graph,
}

/// Configure the stderr logger from the verbosity flag.
///
/// Environment variables are not consulted.
pub fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    // A second initialization (e.g. from tests) is harmless.
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .try_init();
}

/// Usage line printed when no path is given.
pub fn usage() -> String {
    Cli::command().render_usage().to_string()
}

/// Run the analysis and print the result to stdout.
pub fn run(cli: &Cli) -> anyhow::Result<i32> {
    let Some(path) = cli.path.as_deref() else {
        println!("{}", usage());
        return Ok(EXIT_USAGE);
    };

    log::debug!("analyzing {}", path.display());
    let table = analysis::analyze_file(path)?;

    match cli.format {
        OutputFormat::Json => report::write_json(&table, cli.pretty)?,
        OutputFormat::Graph => report::write_graph(&table, cli.pretty)?,
    }

    Ok(EXIT_SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["gocodegraph", "main.go"]).unwrap();
        assert_eq!(cli.path, Some(PathBuf::from("main.go")));
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(!cli.pretty);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_graph_format_and_verbosity() {
        let cli =
            Cli::try_parse_from(["gocodegraph", "-f", "graph", "-vv", "--pretty", "x.go"]).unwrap();
        assert_eq!(cli.format, OutputFormat::Graph);
        assert!(cli.pretty);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_invalid_format_rejected() {
        assert!(Cli::try_parse_from(["gocodegraph", "--format", "yaml", "x.go"]).is_err());
    }

    #[test]
    fn test_missing_path_is_usage_error() {
        let cli = Cli::try_parse_from(["gocodegraph"]).unwrap();
        assert_eq!(run(&cli).unwrap(), EXIT_USAGE);
        assert!(usage().contains("gocodegraph"));
    }
}
