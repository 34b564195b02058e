//! Subprocess invocation of the StyLua binary.
//!
//! One request, one process: document text goes to stdin, formatted text
//! comes back on stdout. Anything on stderr rejects the whole request with
//! that diagnostic, and partial stdout is never returned. There is no retry
//! and no timeout on the formatting call.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::error::{Error, Result};
use crate::version;

/// Byte-offset span to restrict formatting to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatRange {
    pub start: usize,
    pub end: usize,
}

/// A single formatting request against a resolved binary.
#[derive(Debug, Clone)]
pub struct FormatRequest {
    pub binary: PathBuf,
    pub text: String,
    /// Working directory for the subprocess, usually the workspace root so
    /// the binary picks up its own configuration discovery.
    pub cwd: Option<PathBuf>,
    pub range: Option<FormatRange>,
    /// Explicit stylua.toml path, forwarded unvalidated.
    pub config_path: Option<PathBuf>,
}

impl FormatRequest {
    pub fn new(binary: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            text: text.into(),
            cwd: None,
            range: None,
            config_path: None,
        }
    }

    fn args(&self) -> Vec<String> {
        let mut args = Vec::new();
        if let Some(config_path) = &self.config_path {
            args.push("--config-path".to_string());
            args.push(config_path.display().to_string());
        }
        if let Some(range) = self.range {
            args.push("--range-start".to_string());
            args.push(range.start.to_string());
            args.push("--range-end".to_string());
            args.push(range.end.to_string());
        }
        // Trailing marker: read the document from stdin.
        args.push("-".to_string());
        args
    }
}

/// Run the formatter and return its trimmed stdout.
pub async fn format_text(request: &FormatRequest) -> Result<String> {
    let mut command = Command::new(&request.binary);
    command
        .args(request.args())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    if let Some(cwd) = &request.cwd {
        command.current_dir(cwd);
    }

    let mut child = command.spawn().map_err(|source| Error::Spawn {
        binary: request.binary.display().to_string(),
        source,
    })?;

    // Feed stdin from a separate task so a child flushing stdout early
    // cannot deadlock against our write.
    let mut stdin = child.stdin.take().ok_or_else(|| {
        Error::Formatter("formatter process has no stdin handle".to_string())
    })?;
    let text = request.text.clone().into_bytes();
    let writer = tokio::spawn(async move {
        if let Err(e) = stdin.write_all(&text).await {
            log::debug!("failed to write document to formatter stdin: {e}");
        }
        // Dropping the handle closes the pipe and lets the binary finish.
    });

    let output = child.wait_with_output().await?;
    let _ = writer.await;

    let stderr = String::from_utf8_lossy(&output.stderr);
    if !stderr.trim().is_empty() {
        return Err(Error::Formatter(stderr.trim().to_string()));
    }
    if !output.status.success() {
        return Err(Error::Formatter(format!(
            "formatter exited with {}",
            output.status
        )));
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Ask an installed binary which version it is (`stylua --version`).
pub async fn query_version(binary: &Path) -> Result<String> {
    let output = Command::new(binary)
        .arg("--version")
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await
        .map_err(|source| Error::Spawn {
            binary: binary.display().to_string(),
            source,
        })?;

    if !output.status.success() {
        return Err(Error::Formatter(
            String::from_utf8_lossy(&output.stderr).trim().to_string(),
        ));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    version::parse_version_output(&stdout).ok_or_else(|| {
        Error::Formatter(format!("unrecognized version output: {}", stdout.trim()))
    })
}
