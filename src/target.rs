// Target file lookup, current revision, and in-place bump

use crate::error::HeadbumpError;
use crate::pin::PinPattern;
use colored::Colorize;
use std::path::{Path, PathBuf};

/// The file selected for reading and patching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetFile {
    /// Candidate name as configured, e.g. `shell.nix`.
    pub name: String,
    pub path: PathBuf,
}

/// Result of a bump.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BumpOutcome {
    /// File already pinned to `version`; nothing was written.
    Unchanged { version: String },
    /// File rewritten from `from` to `to`.
    Updated { from: String, to: String },
}

/// File-level steps reported to the logger.
#[derive(Debug, Clone)]
pub enum FileStep<'a> {
    Checking(&'a Path),
    Reading(&'a Path),
    Writing(&'a Path),
    Skipping(&'a Path),
}

impl std::fmt::Display for FileStep<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileStep::Checking(path) => write!(f, "checking {}", path.display()),
            FileStep::Reading(path) => write!(f, "reading {}", path.display()),
            FileStep::Writing(path) => write!(f, "writing {}", path.display()),
            FileStep::Skipping(path) => write!(f, "{} is up to date, not writing", path.display()),
        }
    }
}

/// Callback used to report file steps.
pub type FileLogger = fn(&FileStep<'_>);

pub fn no_op_logger(_step: &FileStep<'_>) {}

pub fn verbose_logger(step: &FileStep<'_>) {
    eprintln!("  {}", step.to_string().dimmed());
}

/// Returns the first candidate that exists in `dir`.
///
/// # Errors
///
/// `NotFound` when no candidate exists, `Io` when an existence check fails
/// for any other reason (e.g. permission denied).
pub fn locate(
    dir: &Path,
    candidates: &[&str],
    log: FileLogger,
) -> Result<TargetFile, HeadbumpError> {
    for name in candidates {
        let path = dir.join(name);
        log(&FileStep::Checking(&path));
        match std::fs::metadata(&path) {
            Ok(_) => {
                return Ok(TargetFile {
                    name: (*name).to_string(),
                    path,
                });
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
            Err(e) => return Err(HeadbumpError::io(path, e)),
        }
    }
    Err(HeadbumpError::NotFound {
        candidates: candidates.iter().map(|c| (*c).to_string()).collect(),
    })
}

fn read(target: &TargetFile, log: FileLogger) -> Result<Vec<u8>, HeadbumpError> {
    log(&FileStep::Reading(&target.path));
    std::fs::read(&target.path).map_err(|e| HeadbumpError::io(&target.path, e))
}

fn revision_text(revision: &[u8]) -> String {
    String::from_utf8_lossy(revision).into_owned()
}

/// Reads the target and returns its pinned revision.
///
/// # Errors
///
/// `Io` on read failure, `PatternNotFound` if the file has no pin.
pub fn current_version(
    target: &TargetFile,
    pattern: &PinPattern,
    log: FileLogger,
) -> Result<String, HeadbumpError> {
    let content = read(target, log)?;
    pattern
        .extract(&content)
        .map(revision_text)
        .ok_or_else(|| HeadbumpError::PatternNotFound {
            path: target.path.clone(),
        })
}

/// Rewrites the pinned revision in the target to `latest`.
///
/// The file is written only when its content changes. Writing through the
/// existing file keeps its permissions.
///
/// # Errors
///
/// `Io` on read or write failure, `PatternNotFound` if the file has no pin.
pub fn bump(
    target: &TargetFile,
    pattern: &PinPattern,
    latest: &str,
    log: FileLogger,
) -> Result<BumpOutcome, HeadbumpError> {
    let content = read(target, log)?;
    let Some(current) = pattern.extract(&content) else {
        return Err(HeadbumpError::PatternNotFound {
            path: target.path.clone(),
        });
    };

    let patched = pattern.patch(&content, latest);
    if patched == content {
        log(&FileStep::Skipping(&target.path));
        return Ok(BumpOutcome::Unchanged {
            version: revision_text(current),
        });
    }

    log(&FileStep::Writing(&target.path));
    std::fs::write(&target.path, &patched)
        .map_err(|e| HeadbumpError::io(&target.path, e))?;

    Ok(BumpOutcome::Updated {
        from: revision_text(current),
        to: latest.to_string(),
    })
}
