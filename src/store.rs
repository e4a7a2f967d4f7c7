//! Upload of finished result sheets to the shared test suite repository.

use std::time::Duration;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::Serialize;
use ureq::Agent;

use crate::error::Error;

/// Shared repository that collects result sheets from every pipeline.
pub const RESULTS_REPO: &str = "ai-unc/SLAE-test-suite-v1";

const GITHUB_API_BASE: &str = "https://api.github.com";
const ACCEPT_HEADER: &str = "application/vnd.github.v3+json";
const UPLOAD_TIMEOUT: Duration = Duration::from_secs(30);

/// Credential lookup, separated from the process environment so tests can
/// inject a fixed token.
pub trait TokenProvider {
    fn token(&self) -> Result<String, Error>;
}

/// Reads `GITHUB_TOKEN` from the process environment.
pub struct EnvToken;

impl TokenProvider for EnvToken {
    fn token(&self) -> Result<String, Error> {
        std::env::var("GITHUB_TOKEN").map_err(|_| Error::MissingToken)
    }
}

/// Destination for a finished result sheet.
pub trait ArtifactStore {
    /// Persist `csv` under `results/<owner>/<repo>/<timestamp>.csv` in the
    /// shared repository. Success means the resource was created.
    fn upload(
        &self,
        owner: &str,
        repo: &str,
        timestamp: &str,
        message: &str,
        csv: &str,
    ) -> Result<(), Error>;
}

#[derive(Serialize)]
struct ContentsPayload<'a> {
    message: &'a str,
    content: String,
}

/// Production store writing through the GitHub contents API.
pub struct GitHubStore<T> {
    agent: Agent,
    tokens: T,
}

impl<T: TokenProvider> GitHubStore<T> {
    pub fn new(tokens: T) -> Self {
        let config = Agent::config_builder()
            .timeout_global(Some(UPLOAD_TIMEOUT))
            .http_status_as_error(false)
            .build();
        Self {
            agent: config.into(),
            tokens,
        }
    }
}

impl<T: TokenProvider> ArtifactStore for GitHubStore<T> {
    fn upload(
        &self,
        owner: &str,
        repo: &str,
        timestamp: &str,
        message: &str,
        csv: &str,
    ) -> Result<(), Error> {
        let token = self.tokens.token()?;
        let url = artifact_url(GITHUB_API_BASE, owner, repo, timestamp);
        let payload = ContentsPayload {
            message,
            content: BASE64.encode(csv.as_bytes()),
        };

        tracing::debug!(%url, "uploading result sheet");
        let mut response = self
            .agent
            .put(&url)
            .header("Authorization", format!("token {token}"))
            .header("Accept", ACCEPT_HEADER)
            .send_json(&payload)
            .map_err(|err| Error::RemoteUpload {
                status: None,
                detail: err.to_string(),
            })?;

        let status = response.status().as_u16();
        if status != 201 {
            let detail = response
                .body_mut()
                .read_to_string()
                .unwrap_or_else(|err| format!("unreadable response body: {err}"));
            return Err(Error::RemoteUpload {
                status: Some(status),
                detail,
            });
        }
        Ok(())
    }
}

fn artifact_url(api_base: &str, owner: &str, repo: &str, timestamp: &str) -> String {
    format!("{api_base}/repos/{RESULTS_REPO}/contents/results/{owner}/{repo}/{timestamp}.csv")
}
