//! GitHub branch lookup.
//!
//! One blocking GET against the "get a branch" endpoint, decoded down to the
//! head commit sha.
//! https://docs.github.com/en/rest/branches/branches?apiVersion=2022-11-28#get-a-branch

use crate::constants::{
    GITHUB_ACCEPT, GITHUB_API_BASE, GITHUB_API_VERSION, GITHUB_API_VERSION_HEADER, PROGRAM_NAME,
    TOKEN_ENV, UPSTREAM_BRANCH, UPSTREAM_OWNER, UPSTREAM_REPO,
};
use crate::error::HeadbumpError;
use colored::Colorize;
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use serde::Deserialize;
use std::time::Duration;

/// Repository branch whose head commit is tracked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteBranch {
    pub api_base: String,
    pub owner: String,
    pub repo: String,
    pub branch: String,
}

impl RemoteBranch {
    #[must_use]
    pub fn url(&self) -> String {
        format!(
            "{}/repos/{}/{}/branches/{}",
            self.api_base.trim_end_matches('/'),
            self.owner,
            self.repo,
            self.branch
        )
    }
}

impl Default for RemoteBranch {
    fn default() -> Self {
        Self {
            api_base: GITHUB_API_BASE.to_string(),
            owner: UPSTREAM_OWNER.to_string(),
            repo: UPSTREAM_REPO.to_string(),
            branch: UPSTREAM_BRANCH.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct BranchResponse {
    commit: BranchCommit,
}

#[derive(Debug, Deserialize)]
struct BranchCommit {
    sha: String,
}

#[derive(Debug, Deserialize)]
struct ApiMessage {
    message: String,
}

/// Callback used to report outgoing requests.
pub type RequestLogger = fn(method: &str, url: &str);

pub fn no_op_logger(_method: &str, _url: &str) {}

pub fn verbose_logger(method: &str, url: &str) {
    eprintln!("  {}", format!("{method} {url}").dimmed());
}

/// Blocking client for the branch endpoint.
#[derive(Debug)]
pub struct RemoteClient {
    client: Client,
    branch: RemoteBranch,
}

impl RemoteClient {
    /// Builds a client with the API headers, an optional bearer token, and a
    /// request timeout.
    ///
    /// # Errors
    ///
    /// `InvalidToken` if the token is not a valid header value, `Network` if
    /// the TLS backend cannot be initialized.
    pub fn new(
        branch: RemoteBranch,
        token: Option<&str>,
        timeout: Duration,
    ) -> Result<Self, HeadbumpError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_ACCEPT));
        headers.insert(
            GITHUB_API_VERSION_HEADER,
            HeaderValue::from_static(GITHUB_API_VERSION),
        );
        if let Some(token) = token {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|_| HeadbumpError::InvalidToken { env: TOKEN_ENV })?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = Client::builder()
            .default_headers(headers)
            .user_agent(format!("{}/{}", PROGRAM_NAME, env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|source| HeadbumpError::Network {
                url: branch.url(),
                source,
            })?;

        Ok(Self { client, branch })
    }

    #[must_use]
    pub fn branch(&self) -> &RemoteBranch {
        &self.branch
    }

    /// Fetches the head commit sha of the tracked branch.
    ///
    /// # Errors
    ///
    /// `Network` on transport failure or timeout, `UnexpectedStatus` on a
    /// non-success status, `Decode` / `InvalidVersion` on a malformed body.
    pub fn latest_version(&self, log: RequestLogger) -> Result<String, HeadbumpError> {
        let url = self.branch.url();
        log("GET", &url);

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|source| HeadbumpError::Network {
                url: url.clone(),
                source,
            })?;
        let status = response.status();
        let body = response.text().map_err(|source| HeadbumpError::Network {
            url: url.clone(),
            source,
        })?;

        if !status.is_success() {
            return Err(HeadbumpError::UnexpectedStatus {
                message: api_message(&body),
                url,
                status,
            });
        }

        parse_branch_response(&url, &body)
    }
}

fn api_message(body: &str) -> String {
    serde_json::from_str::<ApiMessage>(body)
        .map(|m| m.message)
        .unwrap_or_else(|_| body.trim().chars().take(200).collect())
}

/// Decodes a branch response body into its head commit sha.
///
/// # Errors
///
/// `Decode` if the body is not `{"commit": {"sha": ...}}`, `InvalidVersion`
/// if the sha is empty or not hexadecimal.
pub fn parse_branch_response(url: &str, body: &str) -> Result<String, HeadbumpError> {
    let response: BranchResponse =
        serde_json::from_str(body).map_err(|source| HeadbumpError::Decode {
            url: url.to_string(),
            source,
        })?;
    let sha = response.commit.sha;
    if sha.is_empty() || !sha.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(HeadbumpError::InvalidVersion {
            url: url.to_string(),
            sha,
        });
    }
    Ok(sha)
}
