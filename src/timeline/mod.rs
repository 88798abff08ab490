//! Patient timeline: reverse-chronological view of the record.
//!
//! Unifies encounters, lab orders and lab results into `Vec<TimelineEvent>`,
//! newest first and capped. Unlike the trend series, entries with unparseable
//! dates are kept at timestamp 0 so they sort last instead of disappearing.

mod assemble;
mod types;

pub use assemble::*;
pub use types::*;

// ── Tests ──────────────────────────────────────────────────────────────────
