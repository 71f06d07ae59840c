//! Test infrastructure for nix-headbump integration tests.
#![allow(dead_code)]

use anyhow::Result;
use nix_headbump::config::{Config, Verbosity};
use nix_headbump::remote::RemoteBranch;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::thread::JoinHandle;
use std::time::Duration;
use tempfile::TempDir;

pub const OLD_REV: &str = "abc123";
pub const NEW_REV: &str = "def456";

/// Config used by tests: quiet, short timeout, no token.
pub fn test_config() -> Config {
    Config {
        verbosity: Verbosity::Quiet,
        timeout: Some(Duration::from_secs(5)),
        token: None,
    }
}

/// A `shell.nix` body pinned to `rev`.
pub fn nix_file(rev: &str) -> String {
    format!(
        "{{ pkgs ? import (fetchTarball \"https://github.com/NixOS/nixpkgs/archive/{rev}.tar.gz\") {{ }} }}:\n\npkgs.mkShell {{\n  buildInputs = [ pkgs.nixfmt ];\n}}\n"
    )
}

/// A temporary working directory for testing.
/// Automatically cleaned up when dropped.
pub struct TestDir {
    _temp_dir: TempDir,
    path: PathBuf,
}

impl TestDir {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().to_path_buf();
        Ok(Self {
            _temp_dir: temp_dir,
            path,
        })
    }

    /// Creates a directory holding `name` pinned to `rev`.
    pub fn with_pinned(name: &str, rev: &str) -> Result<Self> {
        let dir = Self::new()?;
        dir.write(name, &nix_file(rev))?;
        Ok(dir)
    }

    pub fn write(&self, name: &str, content: &str) -> Result<()> {
        std::fs::write(self.path.join(name), content)?;
        Ok(())
    }

    pub fn read(&self, name: &str) -> Result<String> {
        Ok(std::fs::read_to_string(self.path.join(name))?)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// A local HTTP server answering exactly one request with a canned response.
pub struct OneShotServer {
    addr: String,
    requests: Receiver<String>,
    _handle: JoinHandle<()>,
}

impl OneShotServer {
    pub fn start(status: u16, body: &str) -> Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0")?;
        let addr = format!("http://{}", listener.local_addr()?);
        let (tx, requests) = mpsc::channel();
        let response = format!(
            "HTTP/1.1 {status} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            reason(status),
            body.len()
        );

        let handle = std::thread::spawn(move || {
            let Ok((mut stream, _)) = listener.accept() else {
                return;
            };
            let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));
            let mut head = String::new();
            loop {
                let mut line = String::new();
                if reader.read_line(&mut line).unwrap_or(0) == 0 || line == "\r\n" {
                    break;
                }
                head.push_str(&line);
            }
            let _ = tx.send(head);
            let _ = stream.write_all(response.as_bytes());
            let _ = stream.flush();
            let mut rest = Vec::new();
            let _ = stream.set_read_timeout(Some(Duration::from_millis(50)));
            let _ = reader.read_to_end(&mut rest);
        });

        Ok(Self {
            addr,
            requests,
            _handle: handle,
        })
    }

    /// Branch pointing at this server instead of api.github.com.
    pub fn branch(&self) -> RemoteBranch {
        RemoteBranch {
            api_base: self.addr.clone(),
            ..RemoteBranch::default()
        }
    }

    /// Request line and headers of the received request, lowercased.
    pub fn received(&self) -> Result<String> {
        Ok(self
            .requests
            .recv_timeout(Duration::from_secs(5))?
            .to_lowercase())
    }
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        403 => "Forbidden",
        404 => "Not Found",
        _ => "Unknown",
    }
}

/// A branch whose API base refuses connections.
pub fn unreachable_branch() -> Result<RemoteBranch> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    let addr = listener.local_addr()?;
    drop(listener);
    Ok(RemoteBranch {
        api_base: format!("http://{addr}"),
        ..RemoteBranch::default()
    })
}

/// JSON body of a "get a branch" response for `sha`.
pub fn branch_body(sha: &str) -> String {
    serde_json::json!({
        "name": "master",
        "commit": {
            "sha": sha,
            "url": format!("https://api.github.com/repos/NixOS/nixpkgs/commits/{sha}")
        },
        "protected": true
    })
    .to_string()
}
