//! Key-value record store with change notification.
//!
//! The editor and settings screens persist opaque JSON values under string
//! keys; the chart viewer reads them back and listens for changes so it can
//! recompute. Values are never interpreted here.

mod file;
mod memory;
mod notify;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use notify::{Notifier, Subscription, SubscriptionId, NOTIFY_CAPACITY};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Key holding admin settings.
pub const CONFIG_KEY: &str = "config";
/// Key holding clinic details (name, contact, pricing).
pub const CLINIC_KEY: &str = "clinic";

/// Storage key for a patient's record.
pub fn patient_key(patient_id: &str) -> String {
    format!("patient:{patient_id}")
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Store lock poisoned")]
    LockPoisoned,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    Set,
    Removed,
}

/// Delivered to every subscriber after a successful mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreEvent {
    pub key: String,
    pub kind: ChangeKind,
}

/// Persistence collaborator for records, settings and clinic data.
pub trait RecordStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;

    fn set(&self, key: &str, value: Value) -> Result<(), StoreError>;

    /// Returns whether the key existed.
    fn remove(&self, key: &str) -> Result<bool, StoreError>;

    fn keys(&self) -> Result<Vec<String>, StoreError>;

    /// Register for change events. Dropping the receiver also unsubscribes,
    /// lazily, on the next notification.
    fn subscribe(&self) -> Subscription;

    /// Returns whether the subscription was still registered.
    fn unsubscribe(&self, id: SubscriptionId) -> bool;
}
