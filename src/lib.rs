//! dailydose - Daily short-video publishing orchestrator
//!
//! Given a 30-slot calendar of pre-authored content items, one run selects
//! today's item, renders a video through an external renderer, composes a
//! caption, uploads the pair to the publishing platform, and appends the
//! outcome to a durable execution ledger.
//!
//! # Architecture
//!
//! Control flow is strictly linear per run, with the orchestrator as the
//! sole coordinator:
//! - Calendar -> Renderer -> Captioner -> Publisher -> Ledger
//! - selection, generation, and configuration failures abort the run with
//!   no ledger entry
//! - a publish failure is recorded in the ledger; only then does the run
//!   report failure
//!
//! # Modules
//!
//! - `adapters`: External collaborators (renderer, captioner, publisher)
//! - `calendar`: Content calendar store and day-slot selection
//! - `core`: Orchestration logic (Orchestrator, Ledger, stage taxonomy)
//! - `domain`: Data structures (ContentDescriptor, LedgerEntry, RunReport)
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Run today's publishing pipeline
//! dailydose run
//!
//! # See what today's run would select
//! dailydose preview
//!
//! # Inspect recent run outcomes
//! dailydose history --limit 5
//! ```

pub mod adapters;
pub mod calendar;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;

// Re-export main types at crate root for convenience
pub use crate::core::{Ledger, Orchestrator, Stage, StageError};
pub use calendar::{day_slot, CalendarError, CalendarStore};
pub use config::{CredentialProvider, Credentials, EnvCredentials, ResolvedConfig, StaticCredentials};
pub use domain::{ContentDescriptor, LedgerEntry, PublishOutcome, RenderedArtifact, RunReport};
