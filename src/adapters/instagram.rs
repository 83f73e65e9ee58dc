//! Instagram publisher via an upload bridge.
//!
//! The platform's wire protocol is not spoken here. Uploads go to a bridge
//! service (configurable endpoint) as one multipart request: the video file,
//! the caption, and the account credentials. The bridge answers with a JSON
//! body shaped like `{ "success": bool, "url": ..., "error": ... }`.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use crate::config::Credentials;
use crate::domain::PublishOutcome;

use super::Publisher;

/// Publisher client for the Instagram upload bridge
pub struct InstagramPublisher {
    /// Bridge endpoint URL
    endpoint: String,

    /// HTTP client
    client: reqwest::Client,
}

/// Response body from the bridge
#[derive(Debug, Deserialize)]
struct BridgeResponse {
    success: bool,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl InstagramPublisher {
    /// Create a publisher for the given bridge endpoint
    pub fn new(endpoint: impl Into<String>, request_timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()
            .context("Failed to build HTTP client for publisher")?;

        Ok(Self {
            endpoint: endpoint.into(),
            client,
        })
    }

    /// Bridge endpoint this publisher talks to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Publisher for InstagramPublisher {
    fn name(&self) -> &str {
        "instagram"
    }

    async fn publish(
        &self,
        credentials: &Credentials,
        video_path: &Path,
        caption: &str,
    ) -> Result<PublishOutcome> {
        let file_name = video_path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();

        let file_bytes = tokio::fs::read(video_path)
            .await
            .with_context(|| format!("Failed to read video file: {}", video_path.display()))?;

        let video_part = Part::bytes(file_bytes)
            .file_name(file_name)
            .mime_str("video/mp4")?;

        let form = Form::new()
            .text("username", credentials.username.clone())
            .text("password", credentials.password.clone())
            .text("caption", caption.to_string())
            .part("video", video_part);

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .context("Failed to reach publishing bridge")?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            anyhow::bail!("Publishing bridge error ({}): {}", status, text.trim());
        }

        let body: BridgeResponse = response
            .json()
            .await
            .context("Failed to parse publishing bridge response")?;

        Ok(PublishOutcome {
            success: body.success,
            url: body.url,
            error: body.error,
        })
    }
}
