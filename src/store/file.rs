use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use serde_json::Value;

use super::notify::{Notifier, Subscription, SubscriptionId};
use super::{ChangeKind, RecordStore, StoreError, StoreEvent};

/// Store persisted as a single JSON object on disk.
///
/// The whole map is rewritten on every mutation (write to a sibling temp
/// file, then rename), which suits the handful of keys a clinic keeps.
pub struct FileStore {
    path: PathBuf,
    values: RwLock<BTreeMap<String, Value>>,
    notifier: Notifier,
}

impl FileStore {
    /// Open the store at `path`. A missing file is an empty store; the file
    /// and its parent directory are created on first write.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let values = match fs::read(&path) {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => BTreeMap::new(),
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        tracing::debug!(path = %path.display(), keys = values.len(), "Opened file store");
        Ok(Self {
            path,
            values: RwLock::new(values),
            notifier: Notifier::new(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, values: &BTreeMap<String, Value>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let staging = self.path.with_extension("json.tmp");
        fs::write(&staging, serde_json::to_vec_pretty(values)?)?;
        fs::rename(&staging, &self.path)?;
        Ok(())
    }
}

impl RecordStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let values = self.values.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
        {
            let mut values = self.values.write().map_err(|_| StoreError::LockPoisoned)?;
            let previous = values.insert(key.to_string(), value);
            if let Err(e) = self.persist(&values) {
                // Keep memory consistent with disk.
                match previous {
                    Some(prev) => values.insert(key.to_string(), prev),
                    None => values.remove(key),
                };
                return Err(e);
            }
        }
        tracing::debug!(key, path = %self.path.display(), "Store value persisted");
        self.notifier.notify(StoreEvent {
            key: key.to_string(),
            kind: ChangeKind::Set,
        });
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool, StoreError> {
        {
            let mut values = self.values.write().map_err(|_| StoreError::LockPoisoned)?;
            let Some(previous) = values.remove(key) else {
                return Ok(false);
            };
            if let Err(e) = self.persist(&values) {
                values.insert(key.to_string(), previous);
                return Err(e);
            }
        }
        tracing::debug!(key, "Store value removed");
        self.notifier.notify(StoreEvent {
            key: key.to_string(),
            kind: ChangeKind::Removed,
        });
        Ok(true)
    }

    fn keys(&self) -> Result<Vec<String>, StoreError> {
        let values = self.values.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(values.keys().cloned().collect())
    }

    fn subscribe(&self) -> Subscription {
        self.notifier.subscribe()
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.notifier.unsubscribe(id)
    }
}
