mod common;

use common::{OneShotServer, branch_body, unreachable_branch};
use nix_headbump::HeadbumpError;
use nix_headbump::remote::{RemoteClient, no_op_logger};
use std::time::Duration;

const SHA: &str = "e10802309bf9ae351eb27002c85cfdeb1be3b262";

fn timeout() -> Duration {
    Duration::from_secs(5)
}

#[test]
fn test_latest_version_returns_head_sha() -> anyhow::Result<()> {
    let server = OneShotServer::start(200, &branch_body(SHA))?;
    let client = RemoteClient::new(server.branch(), None, timeout())?;

    let latest = client.latest_version(no_op_logger)?;

    assert_eq!(latest, SHA);
    Ok(())
}

#[test]
fn test_latest_version_sends_api_headers() -> anyhow::Result<()> {
    let server = OneShotServer::start(200, &branch_body(SHA))?;
    let client = RemoteClient::new(server.branch(), None, timeout())?;

    client.latest_version(no_op_logger)?;
    let request = server.received()?;

    assert!(request.starts_with("get /repos/nixos/nixpkgs/branches/master http/1.1"));
    assert!(request.contains("accept: application/vnd.github+json"));
    assert!(request.contains("x-github-api-version: 2022-11-28"));
    assert!(request.contains("user-agent: nix-headbump/"));
    assert!(!request.contains("authorization:"));
    Ok(())
}

#[test]
fn test_latest_version_sends_bearer_token_when_configured() -> anyhow::Result<()> {
    let server = OneShotServer::start(200, &branch_body(SHA))?;
    let client = RemoteClient::new(server.branch(), Some("ghp_secret"), timeout())?;

    client.latest_version(no_op_logger)?;

    assert!(server.received()?.contains("authorization: bearer ghp_secret"));
    Ok(())
}

#[test]
fn test_latest_version_rejects_body_without_sha() -> anyhow::Result<()> {
    let server = OneShotServer::start(200, r#"{"name": "master", "commit": {}}"#)?;
    let client = RemoteClient::new(server.branch(), None, timeout())?;

    let result = client.latest_version(no_op_logger);

    assert!(matches!(result, Err(HeadbumpError::Decode { .. })));
    Ok(())
}

#[test]
fn test_latest_version_rejects_invalid_json() -> anyhow::Result<()> {
    let server = OneShotServer::start(200, "<html>oops</html>")?;
    let client = RemoteClient::new(server.branch(), None, timeout())?;

    let result = client.latest_version(no_op_logger);

    assert!(matches!(result, Err(HeadbumpError::Decode { .. })));
    Ok(())
}

#[test]
fn test_latest_version_reports_status_and_api_message() -> anyhow::Result<()> {
    let server = OneShotServer::start(
        403,
        r#"{"message": "API rate limit exceeded for 127.0.0.1.", "documentation_url": "https://docs.github.com/rest"}"#,
    )?;
    let client = RemoteClient::new(server.branch(), None, timeout())?;

    let result = client.latest_version(no_op_logger);

    match result {
        Err(HeadbumpError::UnexpectedStatus {
            status, message, ..
        }) => {
            assert_eq!(status.as_u16(), 403);
            assert_eq!(message, "API rate limit exceeded for 127.0.0.1.");
        }
        other => anyhow::bail!("expected UnexpectedStatus, got {:?}", other),
    }
    Ok(())
}

#[test]
fn test_latest_version_reports_network_error() -> anyhow::Result<()> {
    let client = RemoteClient::new(unreachable_branch()?, None, timeout())?;

    let result = client.latest_version(no_op_logger);

    assert!(matches!(result, Err(HeadbumpError::Network { .. })));
    Ok(())
}
