//! Error kinds for a logging session.

use thiserror::Error;

/// Failure modes of the results logger.
///
/// Remote upload failures are the only recoverable kind: the logger reports
/// them and falls back to a local file. Everything else ends the run.
#[derive(Debug, Error)]
pub enum Error {
    /// The version-control client failed for any reason other than an empty
    /// working tree. Carries the client's diagnostic output verbatim.
    #[error("version control failure: {0}")]
    VersionControl(String),

    /// The commit step found nothing staged, so the run would not be
    /// traceable to a fresh commit.
    #[error(
        "no changes detected in code base; make changes before trying to run another test"
    )]
    NoChangesToCommit,

    /// The remote store returned a non-created status, or the request never
    /// completed. `status` is absent for transport-level failures.
    #[error("upload failed: {detail}")]
    RemoteUpload {
        status: Option<u16>,
        detail: String,
    },

    /// The local fallback file could not be written. Fatal: the fallback is
    /// the last place the run's results exist.
    #[error("failed to write local results file {path}: {source}")]
    LocalPersist {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// `save_results` was called before any result was logged; accuracy and
    /// runtime are undefined for an empty session.
    #[error("no results were logged; accuracy and runtime are undefined")]
    NoResults,

    /// The credential provider had no token for the remote store.
    #[error("no GitHub token available; set GITHUB_TOKEN")]
    MissingToken,

    /// The result sheet could not be serialized.
    #[error("failed to serialize results csv: {0}")]
    Csv(#[from] csv::Error),
}
