//! Content descriptors sourced from the calendar store.
//!
//! A descriptor is loaded fresh at the start of each run and never mutated.
//! Beyond the category tag and title, calendars may carry arbitrary
//! renderer-specific fields; those are kept opaque and passed through to the
//! external generators untouched.

use serde::{Deserialize, Serialize};

/// One day's content item, as authored in the calendar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentDescriptor {
    /// Category tag (e.g. "quote", "ritual", "explainer")
    #[serde(rename = "type")]
    pub kind: String,

    /// Display/identifying title (English)
    pub title: String,

    /// Generator-specific payload fields, opaque to the orchestrator
    #[serde(flatten)]
    pub payload: serde_json::Map<String, serde_json::Value>,
}

impl ContentDescriptor {
    /// Title in a filesystem-safe form (spaces replaced by underscores)
    pub fn title_slug(&self) -> String {
        self.title.replace(' ', "_")
    }
}
