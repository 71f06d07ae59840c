//! Application-wide constants.
//!
//! Centralized configuration values to avoid magic numbers throughout the codebase.

use std::time::Duration;

/// Default timeout for the GitHub API request (in seconds).
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Environment variable overriding the HTTP timeout.
pub const TIMEOUT_ENV: &str = "NIX_HEADBUMP_TIMEOUT";

/// Environment variable holding an optional GitHub token.
pub const TOKEN_ENV: &str = "GITHUB_TOKEN";

/// Returns the HTTP request timeout.
///
/// Can be customized via the NIX_HEADBUMP_TIMEOUT environment variable (in seconds).
/// Falls back to 30 seconds if not set or invalid.
///
/// Example: `NIX_HEADBUMP_TIMEOUT=5 nix-headbump bump`
pub fn http_timeout() -> Duration {
    parse_timeout(std::env::var(TIMEOUT_ENV).ok().as_deref())
}

fn parse_timeout(raw: Option<&str>) -> Duration {
    raw.and_then(|s| s.trim().parse::<u64>().ok())
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs)
        .unwrap_or(Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS))
}

/// Candidate file names, in lookup priority order.
pub const TARGET_CANDIDATES: &[&str] = &["default.nix", "shell.nix"];

/// GitHub REST API root.
pub const GITHUB_API_BASE: &str = "https://api.github.com";

/// Upstream repository and branch tracked by `bump`.
pub const UPSTREAM_OWNER: &str = "NixOS";
pub const UPSTREAM_REPO: &str = "nixpkgs";
pub const UPSTREAM_BRANCH: &str = "master";

/// Headers pinning the response media type and API version.
pub const GITHUB_ACCEPT: &str = "application/vnd.github+json";
pub const GITHUB_API_VERSION_HEADER: &str = "x-github-api-version";
pub const GITHUB_API_VERSION: &str = "2022-11-28";

/// Literal text around the pinned revision in `fetchTarball` imports.
/// Whitespace between tokens is flexible.
pub const PIN_PREFIX: &str = r#"import\s+\(fetchTarball\s+"https://github\.com/NixOS/nixpkgs/archive/"#;
pub const PIN_SUFFIX: &str = r#"\.tar\.gz"\)"#;

/// Program name used in the version banner.
pub const PROGRAM_NAME: &str = "nix-headbump";

/// Build metadata, injected at compile time.
pub const BUILD_COMMIT: &str = match option_env!("NIX_HEADBUMP_COMMIT") {
    Some(commit) => commit,
    None => "none",
};
pub const BUILD_DATE: &str = match option_env!("NIX_HEADBUMP_BUILD_DATE") {
    Some(date) => date,
    None => "unknown",
};

/// Length of the abbreviated commit in the version banner.
pub const SHORT_COMMIT_LEN: usize = 7;

/// Spinner tick interval in milliseconds.
pub const PROGRESS_TICK_MS: u64 = 80;
