//! Adapter interfaces for the external collaborators.
//!
//! The orchestrator only depends on these capability traits; the renderer,
//! caption generator, and publisher behind them are opaque services. Tests
//! substitute stubs for all three.

pub mod caption;
pub mod instagram;
pub mod renderer;

use std::path::Path;

use anyhow::Result;
use async_trait::async_trait;

use crate::config::Credentials;
use crate::domain::{ContentDescriptor, PublishOutcome, RenderedArtifact};

// Re-export the production adapters
pub use caption::CaptionAdapter;
pub use instagram::InstagramPublisher;
pub use renderer::RendererAdapter;

/// Produces a playable video file for a content item
#[async_trait]
pub trait ArtifactGenerator: Send + Sync {
    /// Human-readable adapter name
    fn name(&self) -> &str;

    /// Render a video for `descriptor` at (or near) `output_path`, returning
    /// the resolved artifact
    async fn render(
        &self,
        descriptor: &ContentDescriptor,
        output_path: &Path,
    ) -> Result<RenderedArtifact>;
}

/// Produces publish-ready caption text for a content item
#[async_trait]
pub trait CaptionGenerator: Send + Sync {
    /// Human-readable adapter name
    fn name(&self) -> &str;

    /// Compose the caption for `descriptor`
    async fn compose(&self, descriptor: &ContentDescriptor) -> Result<String>;
}

/// Uploads a video + caption to the platform
#[async_trait]
pub trait Publisher: Send + Sync {
    /// Human-readable adapter name
    fn name(&self) -> &str;

    /// Attempt the upload. `Err` means the call itself failed (transport,
    /// subprocess); a platform rejection comes back as
    /// `PublishOutcome { success: false, .. }`. The orchestrator treats both
    /// as a recorded outcome, not a pipeline failure.
    async fn publish(
        &self,
        credentials: &Credentials,
        video_path: &Path,
        caption: &str,
    ) -> Result<PublishOutcome>;
}
