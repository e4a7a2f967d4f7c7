use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, BufRead, Write};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use results_logger::cli::Args;
use results_logger::{input, ResultLogger};

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_writer(io::stderr))
        .init();

    let mut logger = if args.log_results {
        if !confirm_shared_upload()? {
            println!("Logging canceled, exiting program.");
            return Ok(());
        }
        ResultLogger::new(args.verbose)?
    } else {
        ResultLogger::disabled()
    };

    let rows = input::read_rows(&args.input)?;
    for row in &rows {
        logger.log_result(
            &row.document_name,
            &row.independent_variable,
            &row.dependent_variable,
            &row.predicted,
            &row.coded,
        );
    }
    logger.save_results()?;
    Ok(())
}

/// Ask before pushing anything to the shared repository.
fn confirm_shared_upload() -> Result<bool> {
    print!("Are you sure you want to log results to the shared repo? (Y/N): ");
    io::stdout().flush().context("flush confirmation prompt")?;
    let mut answer = String::new();
    io::stdin()
        .lock()
        .read_line(&mut answer)
        .context("read confirmation answer")?;
    Ok(answer.trim().eq_ignore_ascii_case("y"))
}
