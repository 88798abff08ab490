use std::collections::HashMap;
use std::sync::Mutex;

use tokio::sync::mpsc;
use uuid::Uuid;

use super::StoreEvent;

/// Per-subscriber buffer. Events past this are dropped for that subscriber.
pub const NOTIFY_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

/// Handle returned by `subscribe`: the id to unsubscribe with and the
/// receiving end of the event channel.
pub struct Subscription {
    pub id: SubscriptionId,
    pub events: mpsc::Receiver<StoreEvent>,
}

/// Fan-out of store events to subscribers.
#[derive(Default)]
pub struct Notifier {
    listeners: Mutex<HashMap<SubscriptionId, mpsc::Sender<StoreEvent>>>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self) -> Subscription {
        let (tx, rx) = mpsc::channel(NOTIFY_CAPACITY);
        let id = SubscriptionId(Uuid::new_v4());
        match self.listeners.lock() {
            Ok(mut listeners) => {
                listeners.insert(id, tx);
            }
            Err(_) => tracing::warn!("Notifier lock poisoned, subscription inactive"),
        }
        Subscription { id, events: rx }
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.listeners
            .lock()
            .map(|mut listeners| listeners.remove(&id).is_some())
            .unwrap_or(false)
    }

    pub fn subscriber_count(&self) -> usize {
        self.listeners.lock().map(|l| l.len()).unwrap_or(0)
    }

    /// Send `event` to every subscriber without blocking. Closed channels are
    /// pruned; full channels lose this event.
    pub fn notify(&self, event: StoreEvent) {
        let Ok(mut listeners) = self.listeners.lock() else {
            tracing::warn!(key = %event.key, "Notifier lock poisoned, event dropped");
            return;
        };
        listeners.retain(|id, tx| match tx.try_send(event.clone()) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(_)) => {
                tracing::warn!(subscription = ?id, key = %event.key, "Subscriber queue full, event dropped");
                true
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                tracing::debug!(subscription = ?id, "Subscriber gone, pruning");
                false
            }
        });
    }
}
