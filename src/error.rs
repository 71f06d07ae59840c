//! Error types for locating, reading, fetching, and patching.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by the library operations.
///
/// Usage errors are not represented here; the CLI layer reports those
/// directly.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HeadbumpError {
    /// None of the candidate files exists.
    #[error("{} are not found", .candidates.join(" and "))]
    NotFound { candidates: Vec<String> },

    /// A filesystem operation failed for a reason other than "does not exist".
    #[error("Can not access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The target file has no pinned `fetchTarball` revision.
    #[error("No pinned nixpkgs revision found in {}", .path.display())]
    PatternNotFound { path: PathBuf },

    /// The request could not be sent or the response could not be read.
    #[error("Request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The API answered with a non-success status.
    #[error("{url} responded with {status}: {message}")]
    UnexpectedStatus {
        url: String,
        status: reqwest::StatusCode,
        message: String,
    },

    /// The response body is not the expected JSON shape.
    #[error("Failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// The configured token cannot be sent as a header.
    #[error("{env} contains characters not allowed in an HTTP header")]
    InvalidToken { env: &'static str },

    /// The decoded commit identifier is unusable as a revision.
    #[error("Invalid commit identifier {sha:?} from {url}")]
    InvalidVersion { url: String, sha: String },
}

impl HeadbumpError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
