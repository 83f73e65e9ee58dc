//! Execution ledger durability tests.
//!
//! The ledger is rewritten whole on each append; these tests check that
//! separate handles (as separate process runs would hold) see a consistent,
//! order-preserving, append-only sequence.

use std::path::Path;

use chrono::NaiveDate;
use tempfile::TempDir;

use dailydose::core::Ledger;
use dailydose::domain::{ContentDescriptor, LedgerEntry, PublishOutcome};

fn entry_for(date: NaiveDate, title: &str, outcome: &PublishOutcome) -> LedgerEntry {
    let descriptor = ContentDescriptor {
        kind: "quote".to_string(),
        title: title.to_string(),
        payload: serde_json::Map::new(),
    };
    LedgerEntry::from_run(date, &descriptor, Path::new("/out/reel.mp4"), outcome)
}

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 8, day).unwrap()
}

#[tokio::test]
async fn test_fresh_ledger_is_empty() {
    let dir = TempDir::new().unwrap();
    let ledger = Ledger::new(dir.path().join("ledger.json"));

    assert!(ledger.load().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_appends_across_handles_preserve_history() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ledger.json");

    // Each run of the process opens its own handle
    Ledger::new(path.clone())
        .append(entry_for(date(1), "First", &PublishOutcome::published("u1")))
        .await
        .unwrap();
    Ledger::new(path.clone())
        .append(entry_for(date(2), "Second", &PublishOutcome::failure("E")))
        .await
        .unwrap();
    Ledger::new(path.clone())
        .append(entry_for(date(3), "Third", &PublishOutcome::published("u3")))
        .await
        .unwrap();

    let entries = Ledger::new(path).load().await.unwrap();

    let titles: Vec<_> = entries.iter().map(|e| e.content_title.as_str()).collect();
    assert_eq!(titles, vec!["First", "Second", "Third"]);
    assert!(entries[0].success);
    assert!(!entries[1].success);
    assert_eq!(entries[1].error.as_deref(), Some("E"));
}

#[tokio::test]
async fn test_earlier_entries_survive_later_appends_unchanged() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ledger.json");
    let ledger = Ledger::new(path.clone());

    ledger
        .append(entry_for(date(1), "First", &PublishOutcome::published("u1")))
        .await
        .unwrap();
    let snapshot = ledger.load().await.unwrap();

    ledger
        .append(entry_for(date(2), "Second", &PublishOutcome::published("u2")))
        .await
        .unwrap();

    let entries = ledger.load().await.unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0], snapshot[0]);
}

#[tokio::test]
async fn test_ledger_document_survives_reload() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ledger.json");

    let outcome = PublishOutcome::failure("upload rejected");
    Ledger::new(path.clone())
        .append(entry_for(date(7), "Morning Focus", &outcome))
        .await
        .unwrap();

    // Raw document is a JSON array with null for the absent url
    let raw = std::fs::read_to_string(&path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let array = value.as_array().unwrap();
    assert_eq!(array.len(), 1);
    assert!(array[0].get("post_url").unwrap().is_null());
    assert_eq!(array[0].get("error").unwrap(), "upload rejected");

    let entries = Ledger::new(path).load().await.unwrap();
    assert_eq!(entries[0].content_title, "Morning Focus");
    assert_eq!(entries[0].date, date(7));
}

#[tokio::test]
async fn test_no_stray_temp_files_left_behind() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ledger.json");
    let ledger = Ledger::new(path.clone());

    ledger
        .append(entry_for(date(1), "First", &PublishOutcome::published("u1")))
        .await
        .unwrap();
    ledger
        .append(entry_for(date(2), "Second", &PublishOutcome::published("u2")))
        .await
        .unwrap();

    // Only the document and its lock sidecar remain
    let mut names: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    assert_eq!(names, vec!["ledger.json", "ledger.lock"]);
}
