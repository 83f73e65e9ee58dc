//! Content calendar: a 30-slot schedule of pre-authored content items.
//!
//! The calendar is a single JSON document mapping decimal-string day slots
//! (`"1"`..`"30"`) to content descriptors. It is read-only to the
//! orchestrator and loaded once per run.
//!
//! # Document layout
//!
//! ```text
//! content_calendar.json
//! {
//!   "1":  { "type": "quote",  "title": "Morning Focus", ... },
//!   "2":  { "type": "ritual", "title": "Evening Wind Down", ... },
//!   ...
//!   "30": { "type": "recap",  "title": "Monthly Recap", ... }
//! }
//! ```
//!
//! Slot selection is a pure function of the calendar date: day-of-month
//! mod 30, with 0 mapped to slot 30. The same document therefore yields a
//! deterministic 30-day repeating schedule regardless of month length.

pub mod schedule;
pub mod store;

pub use schedule::day_slot;
pub use store::{CalendarError, CalendarStore};
