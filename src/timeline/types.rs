use serde::{Deserialize, Serialize};

/// Which record collection an event came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Encounter,
    Order,
    Result,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Encounter => "encounter",
            EventKind::Order => "order",
            EventKind::Result => "result",
        }
    }
}

/// Display marker, refined from the kind by keywords in type/status text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventCategory {
    Telehealth,
    Homecare,
    Er,
    Visit,
    Pending,
    Order,
    Result,
}

/// A single event on the timeline, unified across encounters, lab orders
/// and lab results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEvent {
    pub id: String,
    pub kind: EventKind,
    pub category: EventCategory,
    /// Epoch ms; 0 when the entry's date could not be parsed.
    pub timestamp: i64,
    /// False when `timestamp` is the 0 placeholder rather than a real date.
    pub dated: bool,
    pub title: String,
    pub subtitle: Option<String>,
}

impl TimelineEvent {
    pub fn has_valid_date(&self) -> bool {
        self.dated
    }

    /// Newest-first ordering key: dated events before undated ones.
    pub(super) fn recency_key(&self) -> (bool, i64) {
        (self.dated, self.timestamp)
    }
}
