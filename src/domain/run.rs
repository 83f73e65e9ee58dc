//! Per-run transient results.
//!
//! A `PublishOutcome` is what the publisher stage hands back; it is folded
//! into a [`LedgerEntry`](super::entry::LedgerEntry) and never persisted on
//! its own. A `RunReport` is the orchestrator's summary of a completed run,
//! consumed by the CLI.

use std::path::PathBuf;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Result of a publish attempt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublishOutcome {
    /// Whether the platform accepted the post
    pub success: bool,

    /// Post URL (present iff success)
    #[serde(default)]
    pub url: Option<String>,

    /// Platform or transport error (present iff failure)
    #[serde(default)]
    pub error: Option<String>,
}

impl PublishOutcome {
    /// A successful publish with the resulting post URL
    pub fn published(url: impl Into<String>) -> Self {
        Self {
            success: true,
            url: Some(url.into()),
            error: None,
        }
    }

    /// A failed publish, captured as data rather than escalated
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            url: None,
            error: Some(error.into()),
        }
    }
}

/// Summary of one pipeline run that reached the publish stage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Unique identifier for this run
    pub run_id: Uuid,

    /// Calendar date the run published for
    pub date: NaiveDate,

    /// Category tag of the selected content
    pub content_type: String,

    /// Title of the selected content
    pub content_title: String,

    /// Resolved path of the rendered video
    pub artifact_path: PathBuf,

    /// What the publisher reported
    pub outcome: PublishOutcome,

    /// When the run started
    pub started_at: DateTime<Utc>,

    /// When the run completed
    pub completed_at: DateTime<Utc>,
}

impl RunReport {
    /// Whether the run succeeded end to end (publish included)
    pub fn succeeded(&self) -> bool {
        self.outcome.success
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_published_outcome() {
        let outcome = PublishOutcome::published("https://example.com/p/1");

        assert!(outcome.success);
        assert_eq!(outcome.url.as_deref(), Some("https://example.com/p/1"));
        assert!(outcome.error.is_none());
    }

    #[test]
    fn test_failure_outcome() {
        let outcome = PublishOutcome::failure("login challenge");

        assert!(!outcome.success);
        assert!(outcome.url.is_none());
        assert_eq!(outcome.error.as_deref(), Some("login challenge"));
    }

    #[test]
    fn test_outcome_parses_partial_response() {
        // A bridge may omit url/error entirely
        let outcome: PublishOutcome = serde_json::from_str(r#"{"success":true}"#).unwrap();

        assert!(outcome.success);
        assert!(outcome.url.is_none());
        assert!(outcome.error.is_none());
    }
}
