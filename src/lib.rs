//! Pinned nixpkgs revision bumper library.
//!
//! This crate keeps a `fetchTarball` nixpkgs pin up to date by:
//! - Locating `default.nix` or `shell.nix` in the working directory
//! - Extracting the currently pinned revision
//! - Fetching the head commit of nixpkgs `master` from the GitHub API
//! - Rewriting the pin only when it changed

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod output;
pub mod pin;
pub mod remote;
pub mod target;

pub use error::HeadbumpError;
