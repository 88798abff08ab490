use std::collections::HashMap;
use std::sync::RwLock;

use serde_json::Value;

use super::notify::{Notifier, Subscription, SubscriptionId};
use super::{ChangeKind, RecordStore, StoreError, StoreEvent};

/// Volatile store for tests and demo sessions.
#[derive(Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, Value>>,
    notifier: Notifier,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let values = self.values.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
        self.values
            .write()
            .map_err(|_| StoreError::LockPoisoned)?
            .insert(key.to_string(), value);
        tracing::debug!(key, "Store value set");
        self.notifier.notify(StoreEvent {
            key: key.to_string(),
            kind: ChangeKind::Set,
        });
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool, StoreError> {
        let existed = self
            .values
            .write()
            .map_err(|_| StoreError::LockPoisoned)?
            .remove(key)
            .is_some();
        if existed {
            tracing::debug!(key, "Store value removed");
            self.notifier.notify(StoreEvent {
                key: key.to_string(),
                kind: ChangeKind::Removed,
            });
        }
        Ok(existed)
    }

    fn keys(&self) -> Result<Vec<String>, StoreError> {
        let values = self.values.read().map_err(|_| StoreError::LockPoisoned)?;
        let mut keys: Vec<String> = values.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }

    fn subscribe(&self) -> Subscription {
        self.notifier.subscribe()
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.notifier.unsubscribe(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{patient_key, CLINIC_KEY};
    use serde_json::json;

    #[test]
    fn get_missing_is_none() {
        let store = MemoryStore::new();
        assert_eq!(store.get("nope").unwrap(), None);
    }

    #[test]
    fn set_then_get() {
        let store = MemoryStore::new();
        store.set(CLINIC_KEY, json!({"name": "Northside"})).unwrap();
        assert_eq!(store.get(CLINIC_KEY).unwrap(), Some(json!({"name": "Northside"})));
    }

    #[test]
    fn set_notifies_subscribers() {
        let store = MemoryStore::new();
        let mut sub = store.subscribe();
        store.set(&patient_key("p1"), json!({})).unwrap();
        let event = sub.events.try_recv().unwrap();
        assert_eq!(event.key, "patient:p1");
        assert_eq!(event.kind, ChangeKind::Set);
    }

    #[test]
    fn remove_missing_does_not_notify() {
        let store = MemoryStore::new();
        let mut sub = store.subscribe();
        assert!(!store.remove("ghost").unwrap());
        assert!(sub.events.try_recv().is_err());
    }

    #[test]
    fn remove_existing_notifies() {
        let store = MemoryStore::new();
        store.set("k", json!(1)).unwrap();
        let mut sub = store.subscribe();
        assert!(store.remove("k").unwrap());
        assert_eq!(sub.events.try_recv().unwrap().kind, ChangeKind::Removed);
        assert_eq!(store.get("k").unwrap(), None);
    }

    #[test]
    fn keys_sorted() {
        let store = MemoryStore::new();
        store.set("b", json!(1)).unwrap();
        store.set("a", json!(2)).unwrap();
        assert_eq!(store.keys().unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn unsubscribed_listener_gets_nothing() {
        let store = MemoryStore::new();
        let mut sub = store.subscribe();
        assert!(store.unsubscribe(sub.id));
        store.set("k", json!(1)).unwrap();
        assert!(sub.events.try_recv().is_err());
    }
}
