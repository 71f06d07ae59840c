//! Command-line surface and subcommand dispatch.

use crate::config::{Config, Verbosity};
use crate::constants::{
    BUILD_COMMIT, BUILD_DATE, PROGRAM_NAME, SHORT_COMMIT_LEN, TARGET_CANDIDATES,
};
use crate::output;
use crate::pin::PinPattern;
use crate::remote::{RemoteBranch, RemoteClient};
use crate::target::{self, TargetFile};
use anyhow::Context;
use clap::{Args, CommandFactory, Parser, Subcommand};
use std::ffi::OsString;
use std::io::Write;
use std::path::PathBuf;

/// Printed when no subcommand is given.
pub const USAGE_ERROR: &str = "expected 'bump' or 'detect' subcommands";

/// Long flags that may also be spelled with a single dash (`-current`).
const SINGLE_DASH_FLAGS: &[&str] = &["version", "current", "last", "target", "verbose", "quiet"];

#[derive(Debug, Parser)]
#[command(
    name = "nix-headbump",
    about = "Bump the pinned nixpkgs revision in default.nix or shell.nix to the latest master commit",
    disable_version_flag = true
)]
pub struct Cli {
    /// Print the version of this program
    #[arg(long)]
    pub version: bool,

    /// Log each file and network step to stderr
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Suppress everything except requested values and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else if self.verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        }
    }
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Print detected values without bumping
    Detect(DetectArgs),
    /// Rewrite the pinned revision to the latest nixpkgs master commit
    Bump,
}

#[derive(Debug, Clone, Default, Args)]
pub struct DetectArgs {
    /// Print current nixpath without bumping
    #[arg(long)]
    pub current: bool,

    /// Print git head ref without bumping
    #[arg(long)]
    pub last: bool,

    /// Print which file will be bumped
    #[arg(long)]
    pub target: bool,
}

/// Rewrites Go-style `-flag` arguments to `--flag` for the known long flags.
///
/// Arguments after a literal `--` are left untouched.
pub fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut passthrough = false;
    args.into_iter()
        .map(|arg| {
            if passthrough {
                return arg;
            }
            if arg == "--" {
                passthrough = true;
                return arg;
            }
            match arg.to_str().and_then(|s| s.strip_prefix('-')) {
                Some(name) if !name.starts_with('-') && SINGLE_DASH_FLAGS.contains(&name) => {
                    OsString::from(format!("--{name}"))
                }
                _ => arg,
            }
        })
        .collect()
}

/// Returns `nix-headbump <version> (<short commit>) # <build date>`.
#[must_use]
pub fn version_banner() -> String {
    format!(
        "{} {} ({}) # {}",
        PROGRAM_NAME,
        env!("CARGO_PKG_VERSION"),
        short_commit(BUILD_COMMIT),
        BUILD_DATE
    )
}

fn short_commit(commit: &str) -> &str {
    match commit.char_indices().nth(SHORT_COMMIT_LEN) {
        Some((idx, _)) => &commit[..idx],
        None => commit,
    }
}

/// Everything a subcommand needs, passed explicitly.
#[derive(Debug)]
pub struct App {
    pub config: Config,
    /// Directory searched for the target file.
    pub dir: PathBuf,
    pub candidates: &'static [&'static str],
    pub pattern: PinPattern,
    pub remote: RemoteBranch,
}

impl App {
    #[must_use]
    pub fn new(config: Config, dir: PathBuf) -> Self {
        Self {
            config,
            dir,
            candidates: TARGET_CANDIDATES,
            pattern: PinPattern::nixpkgs(),
            remote: RemoteBranch::default(),
        }
    }

    /// Runs `command`, writing requested values to `out`.
    ///
    /// The target file is resolved first for every subcommand, so a missing
    /// file fails before any network request.
    ///
    /// # Errors
    ///
    /// Returns the first failing step with context.
    pub fn execute<W: Write>(&self, command: &Command, out: &mut W) -> anyhow::Result<()> {
        let target = target::locate(&self.dir, self.candidates, self.config.file_logger())
            .context("Failed to get target files")?;

        match command {
            Command::Detect(args) => self.detect(args, &target, out),
            Command::Bump => self.bump(&target),
        }
    }

    fn detect<W: Write>(
        &self,
        args: &DetectArgs,
        target: &TargetFile,
        out: &mut W,
    ) -> anyhow::Result<()> {
        if args.target {
            writeln!(out, "{}", target.name)?;
        } else if args.current {
            let current =
                target::current_version(target, &self.pattern, self.config.file_logger())
                    .context("Failed to get the current version")?;
            writeln!(out, "{current}")?;
        } else if args.last {
            let last = self
                .latest_version()
                .context("Failed to get the last version")?;
            writeln!(out, "{last}")?;
        } else {
            let mut cmd = Cli::command();
            cmd.build();
            if let Some(detect) = cmd.find_subcommand_mut("detect") {
                write!(out, "{}", detect.render_help())?;
            }
        }
        Ok(())
    }

    fn bump(&self, target: &TargetFile) -> anyhow::Result<()> {
        let latest = self
            .latest_version()
            .context("Failed to get the last version")?;
        let outcome = target::bump(target, &self.pattern, &latest, self.config.file_logger())
            .context("Failed to bump the version")?;
        output::print_bump_outcome(&self.config, target, &outcome);
        Ok(())
    }

    fn latest_version(&self) -> anyhow::Result<String> {
        let client = RemoteClient::new(
            self.remote.clone(),
            self.config.token.as_deref(),
            self.config.http_timeout(),
        )?;
        let progress = output::create_fetch_progress(&self.config, &self.remote.url());
        let latest = client.latest_version(self.config.request_logger());
        progress.finish();
        Ok(latest?)
    }
}
