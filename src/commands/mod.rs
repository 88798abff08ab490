//! Entry points used by the chart viewer and record editor.
//!
//! Each command reads what it needs from a [`RecordStore`](crate::store::RecordStore),
//! runs the pure assembly code and reports failures as [`CommandError`].

pub mod chart;

use thiserror::Error;

use crate::models::RecordError;
use crate::store::StoreError;

#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Record error: {0}")]
    Record(#[from] RecordError),

    #[error("Invalid chart settings: {0}")]
    Config(#[from] serde_json::Error),
}

