//! Pipeline stages and the typed failure taxonomy.
//!
//! Each external collaborator's failure is a typed value the orchestrator
//! matches on, keeping the fatal-vs-recorded distinction in the type. A
//! publish rejection is deliberately NOT in this enum: it is captured as a
//! [`PublishOutcome`](crate::domain::PublishOutcome) and written to the
//! ledger instead of aborting the run.

use std::fmt;

use thiserror::Error;

use crate::calendar::CalendarError;
use crate::config::CredentialError;

/// The four sequential pipeline stages, plus the ledger write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Content selection from the calendar
    Select,
    /// Video artifact generation
    Render,
    /// Caption composition
    Caption,
    /// Platform upload
    Publish,
    /// Ledger append
    Ledger,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stage::Select => "select",
            Stage::Render => "render",
            Stage::Caption => "caption",
            Stage::Publish => "publish",
            Stage::Ledger => "ledger",
        };
        write!(f, "{s}")
    }
}

/// Fatal pipeline failures.
///
/// All variants abort before the ledger stage except `Persistence`, which is
/// the ledger stage failing itself. None of them produce a ledger entry.
#[derive(Debug, Error)]
pub enum StageError {
    /// Calendar absent or no entry for today's slot; the run terminates
    /// with no side effects
    #[error(transparent)]
    ContentNotFound(#[from] CalendarError),

    /// Artifact or caption generation raised; operational bug to fix, not
    /// data to record
    #[error("{stage} stage failed: {source}")]
    Generation {
        stage: Stage,
        #[source]
        source: anyhow::Error,
    },

    /// Publish credentials missing, detected before any publish attempt
    #[error(transparent)]
    Configuration(#[from] CredentialError),

    /// Ledger read or write failed
    #[error("failed to record run outcome: {source}")]
    Persistence {
        #[source]
        source: anyhow::Error,
    },
}

impl StageError {
    /// Which stage the failure belongs to
    pub fn stage(&self) -> Stage {
        match self {
            StageError::ContentNotFound(_) => Stage::Select,
            StageError::Generation { stage, .. } => *stage,
            StageError::Configuration(_) => Stage::Publish,
            StageError::Persistence { .. } => Stage::Ledger,
        }
    }
}
