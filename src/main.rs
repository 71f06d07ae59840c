use anyhow::Context;
use clap::Parser;
use clap::error::ErrorKind;
use nix_headbump::cli::{self, App, Cli, USAGE_ERROR};
use nix_headbump::config::Config;
use nix_headbump::output;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = match Cli::try_parse_from(cli::normalize_args(std::env::args_os())) {
        Ok(cli) => cli,
        Err(err) if err.kind() == ErrorKind::InvalidSubcommand => {
            println!("{USAGE_ERROR}");
            return ExitCode::FAILURE;
        }
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    if cli.version {
        println!("{}", cli::version_banner());
        return ExitCode::SUCCESS;
    }

    let Some(command) = cli.command.clone() else {
        println!("{USAGE_ERROR}");
        return ExitCode::FAILURE;
    };

    let result = std::env::current_dir()
        .context("Failed to read the working directory")
        .and_then(|cwd| {
            let app = App::new(Config::from_env(cli.verbosity()), cwd);
            app.execute(&command, &mut std::io::stdout().lock())
        });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output::print_error(&err);
            ExitCode::FAILURE
        }
    }
}
