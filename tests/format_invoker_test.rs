//! Formatter Invoker behavior against scripted stand-in binaries.

#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use stylua_ls_lib::invoke::{format_text, query_version, FormatRange, FormatRequest};
use stylua_ls_lib::Error;

fn fake_binary(dir: &Path, name: &str, script: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{script}\n")).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

#[tokio::test]
async fn test_format_returns_trimmed_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let binary = fake_binary(dir.path(), "stylua", "cat");

    let request = FormatRequest::new(binary, "local x = 1\n");
    let formatted = format_text(&request).await.unwrap();
    assert_eq!(formatted, "local x = 1");
}

#[tokio::test]
async fn test_no_range_flags_without_range() {
    let dir = tempfile::tempdir().unwrap();
    // Echo the arguments so the constructed command line is observable.
    let binary = fake_binary(dir.path(), "stylua", "printf '%s' \"$*\"; cat >/dev/null");

    let request = FormatRequest::new(binary, "return 1\n");
    let formatted = format_text(&request).await.unwrap();
    assert_eq!(formatted, "-");
}

#[tokio::test]
async fn test_range_flags_are_byte_offsets() {
    let dir = tempfile::tempdir().unwrap();
    let binary = fake_binary(dir.path(), "stylua", "printf '%s' \"$*\"; cat >/dev/null");

    let mut request = FormatRequest::new(binary, "local x = 1\nlocal y = 2\n");
    request.range = Some(FormatRange { start: 12, end: 24 });
    let formatted = format_text(&request).await.unwrap();
    assert_eq!(formatted, "--range-start 12 --range-end 24 -");
}

#[tokio::test]
async fn test_stderr_rejects_with_diagnostic() {
    let dir = tempfile::tempdir().unwrap();
    let binary = fake_binary(
        dir.path(),
        "stylua",
        "cat >/dev/null; echo 'error: unexpected token at line 3' >&2; exit 1",
    );

    let request = FormatRequest::new(binary, "local local\n");
    let err = format_text(&request).await.unwrap_err();
    match err {
        Error::Formatter(message) => {
            assert!(message.contains("unexpected token at line 3"));
        }
        other => panic!("expected formatter error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_stderr_wins_over_partial_stdout() {
    let dir = tempfile::tempdir().unwrap();
    // Writes half-formatted output before failing; none of it may escape.
    let binary = fake_binary(
        dir.path(),
        "stylua",
        "cat; echo 'write error' >&2",
    );

    let request = FormatRequest::new(binary, "local x = 1\n");
    let err = format_text(&request).await.unwrap_err();
    match err {
        Error::Formatter(message) => assert!(message.contains("write error")),
        other => panic!("expected formatter error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_spawn_failure() {
    let dir = tempfile::tempdir().unwrap();
    let request = FormatRequest::new(dir.path().join("not-a-binary"), "x = 1\n");
    let err = format_text(&request).await.unwrap_err();
    assert!(matches!(err, Error::Spawn { .. }));
}

#[tokio::test]
async fn test_query_version() {
    let dir = tempfile::tempdir().unwrap();
    let binary = fake_binary(dir.path(), "stylua", "echo 'stylua 0.20.0'");
    let version = query_version(&binary).await.unwrap();
    assert_eq!(version, "0.20.0");
}

#[tokio::test]
async fn test_query_version_failure_carries_stderr() {
    let dir = tempfile::tempdir().unwrap();
    let binary = fake_binary(dir.path(), "stylua", "echo 'no such flag' >&2; exit 2");
    let err = query_version(&binary).await.unwrap_err();
    match err {
        Error::Formatter(message) => assert!(message.contains("no such flag")),
        other => panic!("expected formatter error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_large_document_does_not_deadlock() {
    let dir = tempfile::tempdir().unwrap();
    let binary = fake_binary(dir.path(), "stylua", "cat");

    // Bigger than a pipe buffer, so stdin writing and stdout reading must
    // make progress together.
    let line = "local variable_with_a_long_name = \"value\"\n";
    let text = line.repeat(8 * 1024);
    let request = FormatRequest::new(binary, text.clone());
    let formatted = format_text(&request).await.unwrap();
    assert_eq!(formatted, text.trim());
}
