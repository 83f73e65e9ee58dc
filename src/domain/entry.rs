//! Ledger entries: one immutable record per run that reached publishing.
//!
//! Entries are appended to the execution ledger and never edited or removed
//! afterwards. A run that fails before producing a publish outcome does not
//! get an entry at all.

use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::descriptor::ContentDescriptor;
use super::run::PublishOutcome;

/// One run's recorded outcome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Calendar date of the run (one entry expected per date)
    pub date: NaiveDate,

    /// Execution instant
    pub timestamp: DateTime<Utc>,

    /// Category tag of the published content
    pub content_type: String,

    /// Title of the published content
    pub content_title: String,

    /// Resolved path of the rendered video
    pub artifact_path: PathBuf,

    /// Post URL (null when the publish failed)
    pub post_url: Option<String>,

    /// Whether the platform accepted the post
    pub success: bool,

    /// Publish error (null when the publish succeeded)
    pub error: Option<String>,
}

impl LedgerEntry {
    /// Fold a run's pieces into the record to be appended.
    ///
    /// `url` and `error` default to absent when the publisher did not
    /// provide them.
    pub fn from_run(
        date: NaiveDate,
        descriptor: &ContentDescriptor,
        artifact_path: &Path,
        outcome: &PublishOutcome,
    ) -> Self {
        Self {
            date,
            timestamp: Utc::now(),
            content_type: descriptor.kind.clone(),
            content_title: descriptor.title.clone(),
            artifact_path: artifact_path.to_path_buf(),
            post_url: outcome.url.clone(),
            success: outcome.success,
            error: outcome.error.clone(),
        }
    }
}
