//! Git-backed provenance for a logging session.
//!
//! Every enabled session is pinned to a fresh commit so a result sheet can
//! always be traced back to the exact pipeline code that produced it.

use std::process::{Command, Output};

use crate::error::Error;

/// Fixed message used when committing the working tree before a run.
pub const RUN_COMMIT_MESSAGE: &str = "Running test";

/// Version-control queries the logger needs to pin a run to a commit.
pub trait VersionControl {
    /// URL of the `origin` remote.
    fn remote_url(&self) -> Result<String, Error>;

    /// Stage and commit all pending working-tree changes.
    ///
    /// Returns [`Error::NoChangesToCommit`] when the tree is clean.
    fn commit_all(&self, message: &str) -> Result<(), Error>;

    /// Full identifier of the current HEAD commit.
    fn head_commit(&self) -> Result<String, Error>;

    /// Display identity of the HEAD commit's author, `Name <email>`.
    fn head_author(&self) -> Result<String, Error>;
}

/// Provenance captured once when an enabled logger is constructed.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub repo_url: String,
    pub commit: String,
    pub author: String,
    /// Session timestamp, shared by the start notice, the result sheet, and
    /// artifact file names.
    pub timestamp: String,
}

impl RunContext {
    /// Commit the working tree and record repository identity via `vc`.
    pub fn capture(vc: &dyn VersionControl, timestamp: String) -> Result<Self, Error> {
        let repo_url = trim_git_suffix(&vc.remote_url()?);
        vc.commit_all(RUN_COMMIT_MESSAGE)?;
        let commit = vc.head_commit()?;
        let author = vc.head_author()?;
        Ok(Self {
            repo_url,
            commit,
            author,
            timestamp,
        })
    }

    /// Browsable reference to the exact pipeline commit.
    pub fn pipeline_ref(&self) -> String {
        format!("{}/commit/{}", self.repo_url, self.commit)
    }

    /// Last two path segments of the repository URL, used as the upload
    /// destination under the shared results tree.
    pub fn owner_and_repo(&self) -> Result<(&str, &str), Error> {
        let mut segments = self.repo_url.rsplit('/');
        let repo = segments.next().filter(|s| !s.is_empty());
        let owner = segments.next().filter(|s| !s.is_empty());
        match (owner, repo) {
            (Some(owner), Some(repo)) => Ok((owner, repo)),
            _ => Err(Error::VersionControl(format!(
                "cannot derive owner/repo from remote url {}",
                self.repo_url
            ))),
        }
    }

    /// Repository name alone, used in the local fallback file name.
    pub fn repo_name(&self) -> Result<&str, Error> {
        self.owner_and_repo().map(|(_, repo)| repo)
    }
}

fn trim_git_suffix(url: &str) -> String {
    let url = url.trim();
    url.strip_suffix(".git").unwrap_or(url).to_string()
}

/// Production client shelling out to the `git` CLI.
pub struct GitCli;

impl GitCli {
    fn run(&self, args: &[&str]) -> Result<Output, Error> {
        tracing::debug!(?args, "running git");
        Command::new("git")
            .args(args)
            .output()
            .map_err(|err| Error::VersionControl(format!("failed to invoke git: {err}")))
    }

    fn run_checked(&self, args: &[&str]) -> Result<String, Error> {
        let output = self.run(args)?;
        if !output.status.success() {
            return Err(Error::VersionControl(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl VersionControl for GitCli {
    fn remote_url(&self) -> Result<String, Error> {
        self.run_checked(&["remote", "get-url", "origin"])
    }

    fn commit_all(&self, message: &str) -> Result<(), Error> {
        self.run_checked(&["add", "."])?;
        let output = self.run(&["commit", "-m", message])?;
        if !output.status.success() {
            // git commit exits 1 when there is nothing to commit.
            if output.status.code() == Some(1) {
                return Err(Error::NoChangesToCommit);
            }
            return Err(Error::VersionControl(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }
        Ok(())
    }

    fn head_commit(&self) -> Result<String, Error> {
        self.run_checked(&["rev-parse", "HEAD"])
    }

    fn head_author(&self) -> Result<String, Error> {
        self.run_checked(&["show", "-s", "--format=%an <%ae>", "HEAD"])
    }
}
