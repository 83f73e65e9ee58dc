//! Core orchestration logic.
//!
//! This module contains:
//! - Ledger: locked, atomically-rewritten execution ledger
//! - Stage: pipeline stage labels and the typed failure taxonomy
//! - Orchestrator: main execution engine

pub mod ledger;
pub mod orchestrator;
pub mod stage;

// Re-export commonly used types
pub use ledger::Ledger;
pub use orchestrator::Orchestrator;
pub use stage::{Stage, StageError};
