//! Renderer adapter for video generation.
//!
//! Subprocess mode: spawns the configured renderer binary with the desired
//! output path as an argument and the content descriptor as JSON on stdin.
//! The renderer prints the resolved output path on stdout (it may pick a
//! sibling path, e.g. a different container extension); when it prints
//! nothing, the desired path is assumed.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::time::timeout;

use crate::domain::{ContentDescriptor, RenderedArtifact};

use super::ArtifactGenerator;

/// Video renderer using subprocess mode
pub struct RendererAdapter {
    /// Path to the renderer binary
    binary_path: String,

    /// Hard deadline for a single render call
    render_timeout: Duration,
}

impl RendererAdapter {
    /// Create a renderer adapter for the given binary
    pub fn new(binary_path: impl Into<String>, render_timeout: Duration) -> Self {
        Self {
            binary_path: binary_path.into(),
            render_timeout,
        }
    }

    /// Spawn the renderer and wait for it within the timeout
    async fn render_subprocess(
        &self,
        descriptor: &ContentDescriptor,
        output_path: &Path,
    ) -> Result<PathBuf> {
        let payload =
            serde_json::to_string(descriptor).context("Failed to serialize content descriptor")?;

        let mut child = Command::new(&self.binary_path)
            .arg("--output")
            .arg(output_path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("Failed to spawn renderer '{}'", self.binary_path))?;

        // Write the descriptor to stdin
        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(payload.as_bytes())
                .await
                .context("Failed to write descriptor to renderer stdin")?;
            // Drop stdin to signal EOF
        }

        let output = timeout(self.render_timeout, child.wait_with_output())
            .await
            .with_context(|| {
                format!(
                    "Renderer timed out after {:?} for '{}'",
                    self.render_timeout, descriptor.title
                )
            })?
            .context("Failed to wait for renderer process")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let exit_code = output.status.code().unwrap_or(-1);
            anyhow::bail!(
                "Renderer failed with exit code {} for '{}': {}",
                exit_code,
                descriptor.title,
                stderr.trim()
            );
        }

        // First stdout line is the resolved path, if the renderer moved it
        let stdout = String::from_utf8_lossy(&output.stdout);
        let resolved = match stdout.lines().next().map(str::trim) {
            Some(line) if !line.is_empty() => PathBuf::from(line),
            _ => output_path.to_path_buf(),
        };

        Ok(resolved)
    }
}

#[async_trait]
impl ArtifactGenerator for RendererAdapter {
    fn name(&self) -> &str {
        "renderer"
    }

    async fn render(
        &self,
        descriptor: &ContentDescriptor,
        output_path: &Path,
    ) -> Result<RenderedArtifact> {
        let resolved = self.render_subprocess(descriptor, output_path).await?;

        // The renderer must leave a real file behind
        let metadata = tokio::fs::metadata(&resolved).await.with_context(|| {
            format!(
                "Renderer reported success but produced no file at {}",
                resolved.display()
            )
        })?;

        Ok(RenderedArtifact::new(resolved, metadata.len()))
    }
}
