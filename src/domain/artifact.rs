//! Video artifacts produced by the renderer stage.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A rendered video file on disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedArtifact {
    /// Resolved path of the video file (may differ from the requested path)
    pub path: PathBuf,

    /// When the artifact was produced
    pub created_at: DateTime<Utc>,

    /// Size in bytes (for tracking)
    pub size_bytes: u64,
}

impl RenderedArtifact {
    /// Create a new artifact record for a file the renderer reported
    pub fn new(path: PathBuf, size_bytes: u64) -> Self {
        Self {
            path,
            created_at: Utc::now(),
            size_bytes,
        }
    }
}
