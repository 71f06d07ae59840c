//! Configuration types for CLI verbosity and options.

use crate::constants::{self, TOKEN_ENV};
use crate::remote::{self, RequestLogger};
use crate::target::{self, FileLogger};
use std::time::Duration;

/// Runtime configuration derived from CLI arguments and the environment.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Controls the verbosity level of CLI output.
    pub verbosity: Verbosity,
    /// Timeout for the GitHub API request; `None` uses the default.
    pub timeout: Option<Duration>,
    /// Optional bearer token for the GitHub API.
    pub token: Option<String>,
}

impl Config {
    /// Builds a config for `verbosity`, reading the timeout and token from
    /// the environment.
    #[must_use]
    pub fn from_env(verbosity: Verbosity) -> Self {
        Self {
            verbosity,
            timeout: Some(constants::http_timeout()),
            token: std::env::var(TOKEN_ENV).ok().filter(|t| !t.trim().is_empty()),
        }
    }

    #[must_use]
    pub fn is_quiet(&self) -> bool {
        self.verbosity == Verbosity::Quiet
    }

    #[must_use]
    pub fn is_verbose(&self) -> bool {
        self.verbosity == Verbosity::Verbose
    }

    #[must_use]
    pub fn http_timeout(&self) -> Duration {
        self.timeout.unwrap_or_else(constants::http_timeout)
    }

    /// Returns the file step logger based on verbosity settings.
    ///
    /// Config only picks the callback; the logging itself lives next to the
    /// code that reports the steps.
    #[must_use]
    pub fn file_logger(&self) -> FileLogger {
        if self.is_verbose() {
            target::verbose_logger
        } else {
            target::no_op_logger
        }
    }

    /// Returns the request logger based on verbosity settings.
    #[must_use]
    pub fn request_logger(&self) -> RequestLogger {
        if self.is_verbose() {
            remote::verbose_logger
        } else {
            remote::no_op_logger
        }
    }
}

/// Verbosity level for CLI output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Verbose,
}
