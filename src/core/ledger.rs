//! Execution ledger: append-only history of run outcomes.
//!
//! The ledger is a single JSON-array document. An append is a
//! read-modify-write of the whole document, guarded by an exclusive lock on
//! a sidecar file and finished with an atomic rename, so a concurrent run
//! cannot silently drop an entry and a crash mid-write cannot leave a
//! truncated document behind. Existing entries are never edited, removed,
//! or reordered.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;
use tempfile::NamedTempFile;
use tokio::fs;

use crate::domain::LedgerEntry;

/// File-backed execution ledger
pub struct Ledger {
    /// Path to the ledger document
    path: PathBuf,
}

impl Ledger {
    /// Create a handle for the ledger at the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the ledger document
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the full entry sequence. An absent document is an empty ledger.
    pub async fn load(&self) -> Result<Vec<LedgerEntry>> {
        match fs::read_to_string(&self.path).await {
            Ok(content) => serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse ledger: {}", self.path.display())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e)
                .with_context(|| format!("Failed to read ledger: {}", self.path.display())),
        }
    }

    /// Append one entry: lock, read the full sequence, push, rewrite
    /// atomically.
    pub async fn append(&self, entry: LedgerEntry) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create ledger directory: {}", parent.display()))?;
        }

        let lock_path = self.path.with_extension("lock");
        let lock_file = OpenOptions::new()
            .create(true)
            .write(true)
            .open(&lock_path)
            .with_context(|| format!("Failed to open ledger lock: {}", lock_path.display()))?;

        lock_file
            .lock_exclusive()
            .context("Failed to acquire ledger lock")?;

        let result = self.append_locked(entry);

        // Lock is released when the file is dropped
        result
    }

    fn append_locked(&self, entry: LedgerEntry) -> Result<()> {
        let mut entries: Vec<LedgerEntry> = match std::fs::read_to_string(&self.path) {
            Ok(content) => serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse ledger: {}", self.path.display()))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read ledger: {}", self.path.display()))
            }
        };

        entries.push(entry);

        let content = serde_json::to_string_pretty(&entries)?;

        // Rewrite through a temp file in the same directory so the rename
        // is atomic on the same filesystem
        let dir = self.path.parent().unwrap_or(Path::new("."));
        let mut tmp = NamedTempFile::new_in(dir)
            .with_context(|| format!("Failed to create temp file in {}", dir.display()))?;
        tmp.write_all(content.as_bytes())
            .context("Failed to write ledger temp file")?;
        tmp.flush().context("Failed to flush ledger temp file")?;
        tmp.persist(&self.path)
            .with_context(|| format!("Failed to replace ledger: {}", self.path.display()))?;

        Ok(())
    }
}
