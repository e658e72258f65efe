use crate::error::{LoroError, Result};
use crate::types::{ErrorBody, RepoSummary};
use reqwest::{Client, Response};
use std::time::Duration;
use tracing::debug;
use url::Url;

const REPO_PATH: &str = "api/repo";

/// Client for the repo info endpoint.
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct RepoInfoClient {
    client: Client,
    base_url: String,
}

impl RepoInfoClient {
    pub fn new(endpoint: &str) -> Result<Self> {
        Self::with_timeout(endpoint, None)
    }

    pub fn with_timeout(endpoint: &str, timeout: Option<Duration>) -> Result<Self> {
        let parsed = Url::parse(endpoint)
            .map_err(|e| LoroError::InvalidEndpoint(format!("{}: {}", endpoint, e)))?;
        if parsed.cannot_be_a_base() || !matches!(parsed.scheme(), "http" | "https") {
            return Err(LoroError::InvalidEndpoint(format!(
                "{}: expected an http(s) base URL",
                endpoint
            )));
        }
        // Lookup paths are appended to the base, so it cannot carry a query or fragment
        if parsed.query().is_some() || parsed.fragment().is_some() {
            return Err(LoroError::InvalidEndpoint(format!(
                "{}: query strings and fragments are not allowed",
                endpoint
            )));
        }

        let mut builder = Client::builder().user_agent(concat!("loro/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(RepoInfoClient {
            client,
            base_url: parsed.as_str().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds the lookup URL. `owner` and `repo` are interpolated as given,
    /// without percent-encoding.
    pub fn repo_url(&self, owner: &str, repo: &str) -> String {
        format!("{}/{}/{}/{}", self.base_url, REPO_PATH, owner, repo)
    }

    pub async fn fetch_repo_summary(&self, owner: &str, repo: &str) -> Result<RepoSummary> {
        let url = self.repo_url(owner, repo);
        debug!(%url, "Requesting repository summary");

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            let body = response.bytes().await?;
            let summary: RepoSummary = serde_json::from_slice(&body)?;
            return Ok(summary);
        }

        Err(error_from_response(response).await)
    }
}

/// Maps a non-2xx response onto the endpoint error taxonomy: the body's
/// `error` field when present and non-empty, otherwise the status code.
async fn error_from_response(response: Response) -> LoroError {
    let status = response.status().as_u16();
    let body = match response.bytes().await {
        Ok(body) => body,
        Err(e) => {
            debug!(status, error = %e, "Failed to read error body, falling back to status");
            Default::default()
        }
    };

    match serde_json::from_slice::<ErrorBody>(&body) {
        Ok(ErrorBody { error: Some(message) }) if !message.is_empty() => {
            LoroError::Endpoint(message)
        }
        _ => LoroError::Status(status),
    }
}
