//! Caption adapter for publish-ready text.
//!
//! Subprocess mode: pipes the content descriptor as JSON to the configured
//! caption binary and takes its stdout, verbatim, as the caption. The
//! orchestrator persists that exact text to the caption side file, so no
//! trimming or normalization happens here.

use std::process::Stdio;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::time::timeout;

use crate::domain::ContentDescriptor;

use super::CaptionGenerator;

/// Caption generator using subprocess mode
pub struct CaptionAdapter {
    /// Path to the caption binary
    binary_path: String,

    /// Hard deadline for a single compose call
    compose_timeout: Duration,
}

impl CaptionAdapter {
    /// Create a caption adapter for the given binary
    pub fn new(binary_path: impl Into<String>, compose_timeout: Duration) -> Self {
        Self {
            binary_path: binary_path.into(),
            compose_timeout,
        }
    }
}

#[async_trait]
impl CaptionGenerator for CaptionAdapter {
    fn name(&self) -> &str {
        "caption"
    }

    async fn compose(&self, descriptor: &ContentDescriptor) -> Result<String> {
        let payload =
            serde_json::to_string(descriptor).context("Failed to serialize content descriptor")?;

        let mut child = Command::new(&self.binary_path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("Failed to spawn caption generator '{}'", self.binary_path))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(payload.as_bytes())
                .await
                .context("Failed to write descriptor to caption generator stdin")?;
        }

        let output = timeout(self.compose_timeout, child.wait_with_output())
            .await
            .with_context(|| {
                format!(
                    "Caption generator timed out after {:?} for '{}'",
                    self.compose_timeout, descriptor.title
                )
            })?
            .context("Failed to wait for caption generator process")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let exit_code = output.status.code().unwrap_or(-1);
            anyhow::bail!(
                "Caption generator failed with exit code {} for '{}': {}",
                exit_code,
                descriptor.title,
                stderr.trim()
            );
        }

        let caption =
            String::from_utf8(output.stdout).context("Caption output is not valid UTF-8")?;

        if caption.is_empty() {
            anyhow::bail!("Caption generator produced no output for '{}'", descriptor.title);
        }

        Ok(caption)
    }
}
