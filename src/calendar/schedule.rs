//! Day-slot derivation from the calendar date.

use chrono::{Datelike, NaiveDate};

/// Map a calendar date onto its 1-30 cyclic slot.
///
/// Day-of-month mod 30, with 0 mapped to slot 30 so that day 30 (and any
/// multiple of 30) lands on slot 30, never slot 0. The 31st of a month wraps
/// around to slot 1; that is accepted, not corrected.
pub fn day_slot(date: NaiveDate) -> u8 {
    let slot = (date.day() % 30) as u8;
    if slot == 0 {
        30
    } else {
        slot
    }
}
