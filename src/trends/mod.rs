//! Trend extraction for the patient chart.
//!
//! Turns the loosely-typed vitals and lab entries of a `PatientRecord` into
//! ascending, window-filtered numeric series. Every function here is a pure
//! function of (record snapshot, window, now): nothing is cached and malformed
//! fields degrade to "no point" instead of failing.

mod demo;
mod labs;
mod numeric;
mod time;
mod types;
mod vitals;
mod window;

pub use demo::*;
pub use labs::*;
pub use numeric::*;
pub use time::*;
pub use types::*;
pub use vitals::*;
pub use window::*;
