//! Patient-record models.
//!
//! Records arrive from the editor as loosely-typed JSON: every entry is an
//! object whose fields may be numbers, numeric strings or free text, and
//! whose names vary between sources. `RecordEntry` keeps the raw value and
//! `FieldAliases` names the accepted keys for each logical field.

pub mod fields;
pub mod record;

pub use fields::*;
pub use record::*;
