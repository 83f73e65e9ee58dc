//! Calendar store: loads the slot-to-descriptor document and resolves
//! today's selection.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use thiserror::Error;
use tokio::fs;

use crate::domain::ContentDescriptor;

use super::schedule::day_slot;

/// Failures while loading the calendar or resolving a slot
#[derive(Debug, Error)]
pub enum CalendarError {
    #[error("content calendar not found: {}", path.display())]
    Missing { path: PathBuf },

    #[error("failed to read content calendar {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("content calendar {} is not valid JSON: {source}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("no content scheduled for day slot {slot}")]
    NoEntry { slot: u8 },
}

/// In-memory view of the calendar document
#[derive(Debug, Clone)]
pub struct CalendarStore {
    slots: HashMap<String, ContentDescriptor>,
}

impl CalendarStore {
    /// Load the calendar from disk. An absent document is a selection
    /// failure, not an empty calendar.
    pub async fn load(path: &Path) -> Result<Self, CalendarError> {
        let content = match fs::read_to_string(path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(CalendarError::Missing {
                    path: path.to_path_buf(),
                });
            }
            Err(e) => {
                return Err(CalendarError::Unreadable {
                    path: path.to_path_buf(),
                    source: e,
                });
            }
        };

        let slots = serde_json::from_str(&content).map_err(|e| CalendarError::Malformed {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(Self { slots })
    }

    /// Look up a slot by its decimal-string key
    pub fn get(&self, slot: u8) -> Option<&ContentDescriptor> {
        self.slots.get(&slot.to_string())
    }

    /// Resolve the descriptor for a calendar date
    pub fn select_for_date(&self, date: NaiveDate) -> Result<ContentDescriptor, CalendarError> {
        let slot = day_slot(date);
        self.get(slot)
            .cloned()
            .ok_or(CalendarError::NoEntry { slot })
    }

    /// Number of authored slots
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Check if the calendar has no slots
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    const CALENDAR_JSON: &str = r#"{
        "1":  { "type": "quote", "title": "Morning Focus" },
        "7":  { "type": "ritual", "title": "Evening Wind Down", "music": "calm.mp3" },
        "30": { "type": "recap", "title": "Monthly Recap" }
    }"#;

    fn write_calendar(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("content_calendar.json");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[tokio::test]
    async fn test_load_and_lookup() {
        let dir = TempDir::new().unwrap();
        let path = write_calendar(&dir, CALENDAR_JSON);

        let store = CalendarStore::load(&path).await.unwrap();

        assert_eq!(store.len(), 3);
        assert_eq!(store.get(1).unwrap().title, "Morning Focus");
        assert_eq!(store.get(30).unwrap().kind, "recap");
        assert!(store.get(2).is_none());
    }

    #[tokio::test]
    async fn test_missing_document() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope.json");

        let result = CalendarStore::load(&path).await;

        assert!(matches!(result, Err(CalendarError::Missing { .. })));
    }

    #[tokio::test]
    async fn test_malformed_document() {
        let dir = TempDir::new().unwrap();
        let path = write_calendar(&dir, "{ not json");

        let result = CalendarStore::load(&path).await;

        assert!(matches!(result, Err(CalendarError::Malformed { .. })));
    }

    #[tokio::test]
    async fn test_select_for_date() {
        let dir = TempDir::new().unwrap();
        let path = write_calendar(&dir, CALENDAR_JSON);
        let store = CalendarStore::load(&path).await.unwrap();

        let selected = store
            .select_for_date(NaiveDate::from_ymd_opt(2026, 8, 7).unwrap())
            .unwrap();
        assert_eq!(selected.title, "Evening Wind Down");

        // Day 30 resolves to slot "30"
        let selected = store
            .select_for_date(NaiveDate::from_ymd_opt(2026, 8, 30).unwrap())
            .unwrap();
        assert_eq!(selected.kind, "recap");
    }

    #[tokio::test]
    async fn test_select_missing_slot() {
        let dir = TempDir::new().unwrap();
        let path = write_calendar(&dir, CALENDAR_JSON);
        let store = CalendarStore::load(&path).await.unwrap();

        let result = store.select_for_date(NaiveDate::from_ymd_opt(2026, 8, 2).unwrap());

        assert!(matches!(result, Err(CalendarError::NoEntry { slot: 2 })));
    }
}
