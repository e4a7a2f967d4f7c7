//! CLI argument parsing for the replay harness.

use clap::Parser;
use std::path::PathBuf;

/// Replay a harness-produced row file through the results logger.
#[derive(Parser, Debug)]
#[command(
    name = "results-logger",
    version,
    about = "Log relation-extraction results to the shared test suite repository"
)]
pub struct Args {
    /// Enable logging of results to the shared repository
    #[arg(long)]
    pub log_results: bool,

    /// Echo each logged result
    #[arg(long)]
    pub verbose: bool,

    /// Headerless CSV of result rows: document, independent variable,
    /// dependent variable, predicted, coded
    #[arg(long, value_name = "PATH")]
    pub input: PathBuf,
}
