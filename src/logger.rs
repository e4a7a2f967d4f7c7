//! Session orchestration: collect rows, summarize, persist.

use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::{DateTime, Local};

use crate::error::Error;
use crate::provenance::{GitCli, RunContext, VersionControl};
use crate::record::{ResultRow, ResultSet};
use crate::report;
use crate::store::{ArtifactStore, EnvToken, GitHubStore};

/// Timestamp format shared by the start notice, the result sheet, and
/// artifact file names.
const TIMESTAMP_FORMAT: &str = "%m-%d-%Y-%H:%M:%S";

/// Records predicted-vs-coded classifications for one test run and persists
/// them as a CSV result sheet when the run finishes.
///
/// A harness constructs the logger once, calls [`ResultLogger::log_result`]
/// per comparison, and finalizes with [`ResultLogger::save_results`], which
/// consumes the logger so a session cannot be saved twice. A disabled logger
/// turns every call into a no-op, so call sites need no conditionals.
pub struct ResultLogger {
    verbose: bool,
    session: Session,
}

enum Session {
    Disabled,
    Enabled(Box<EnabledSession>),
}

struct EnabledSession {
    context: RunContext,
    results: ResultSet,
    started: Option<SessionStart>,
    store: Box<dyn ArtifactStore>,
    output_dir: PathBuf,
}

struct SessionStart {
    instant: Instant,
    wall: DateTime<Local>,
}

impl ResultLogger {
    /// Logger that ignores every call. Performs no provenance collection, no
    /// network access, and no file writes.
    pub fn disabled() -> Self {
        println!("Results logger is disabled");
        Self {
            verbose: false,
            session: Session::Disabled,
        }
    }

    /// Enabled logger backed by the `git` CLI and the GitHub contents API,
    /// writing any fallback file to the current directory.
    pub fn new(verbose: bool) -> Result<Self, Error> {
        Self::with_collaborators(
            verbose,
            &GitCli,
            Box::new(GitHubStore::new(EnvToken)),
            PathBuf::from("."),
        )
    }

    /// Construction seam: commit the working tree and capture provenance via
    /// `vc`, persist through `store`. Tests substitute doubles here.
    pub fn with_collaborators(
        verbose: bool,
        vc: &dyn VersionControl,
        store: Box<dyn ArtifactStore>,
        output_dir: PathBuf,
    ) -> Result<Self, Error> {
        let timestamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
        let context = RunContext::capture(vc, timestamp)?;
        println!("Created results logger for {}", context.pipeline_ref());
        Ok(Self {
            verbose,
            session: Session::Enabled(Box::new(EnabledSession {
                context,
                results: ResultSet::default(),
                started: None,
                store,
                output_dir,
            })),
        })
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self.session, Session::Enabled(_))
    }

    /// Record one comparison. Classification values are opaque strings
    /// compared by literal equality; nothing is validated or rejected.
    pub fn log_result(
        &mut self,
        document_name: &str,
        independent_variable: &str,
        dependent_variable: &str,
        predicted: &str,
        coded: &str,
    ) {
        let Session::Enabled(session) = &mut self.session else {
            return;
        };

        if session.started.is_none() {
            let start = SessionStart {
                instant: Instant::now(),
                wall: Local::now(),
            };
            println!(
                "Starting test at {} executed by {}",
                start.wall.format("%m-%d-%Y %H:%M:%S"),
                session.context.author
            );
            session.started = Some(start);
        }

        session.results.push(ResultRow {
            document_name: document_name.to_string(),
            independent_variable: independent_variable.to_string(),
            dependent_variable: dependent_variable.to_string(),
            predicted: predicted.to_string(),
            coded: coded.to_string(),
        });

        if self.verbose {
            println!(
                "{document_name}: {independent_variable} -> {dependent_variable}, \
                 Predicted: {predicted}, Coded: {coded}"
            );
        }
    }

    /// Finalize the session: print summary statistics, render the result
    /// sheet, and persist it remote-first with a local fallback.
    pub fn save_results(self) -> Result<(), Error> {
        match self.session {
            Session::Disabled => Ok(()),
            Session::Enabled(session) => session.finish(),
        }
    }
}

impl EnabledSession {
    fn finish(self) -> Result<(), Error> {
        let started = self.started.as_ref().ok_or(Error::NoResults)?;
        let accuracy = self.results.accuracy()?;
        println!(
            "Total Accuracy: {:.2}% ({} / {} Coded Relations)",
            accuracy * 100.0,
            self.results.correct(),
            self.results.len()
        );

        let runtime = report::format_runtime(started.instant.elapsed());
        println!("Test Runtime: {runtime}");

        let csv = report::render_csv(&self.context, &self.results, &runtime)?;
        let (owner, repo) = self.context.owner_and_repo()?;
        let message = format!("Automated Commit by Test Suite v{}", env!("CARGO_PKG_VERSION"));

        match self
            .store
            .upload(owner, repo, &self.context.timestamp, &message, &csv)
        {
            Ok(()) => {
                println!("Results uploaded to test suite repository");
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, "remote upload failed, writing local fallback");
                report_upload_failure(&err);
                write_local(&self.output_dir, repo, &self.context.timestamp, &csv)
            }
        }
    }
}

fn report_upload_failure(err: &Error) {
    println!("Failed to upload results");
    if let Error::RemoteUpload { status, detail } = err {
        if let Some(status) = status {
            println!("Status Code: {status}");
        }
        println!("Response: {detail}");
    } else {
        println!("Response: {err}");
    }
    println!("Writing results to local csv file");
}

fn write_local(output_dir: &Path, repo: &str, timestamp: &str, csv: &str) -> Result<(), Error> {
    let path = output_dir.join(format!("local_{repo}_{timestamp}.csv"));
    std::fs::write(&path, csv).map_err(|source| Error::LocalPersist {
        path: path.display().to_string(),
        source,
    })
}
