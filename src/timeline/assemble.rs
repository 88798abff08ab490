use std::sync::LazyLock;

use regex::Regex;

use crate::models::*;
use crate::trends::{entry_timestamp, first_numeric};

use super::types::*;

static RE_TELEHEALTH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)tele|video|virtual").unwrap());
static RE_HOMECARE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)home").unwrap());
static RE_EMERGENCY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:er|ed)\b|emergency").unwrap());
static RE_PENDING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)pending").unwrap());

fn event_id(entry: &RecordEntry, kind: EventKind, index: usize) -> String {
    entry
        .text(&ENTRY_ID)
        .unwrap_or_else(|| format!("{}-{}", kind.as_str(), index))
}

pub(super) fn encounter_category(type_text: &str) -> EventCategory {
    if RE_TELEHEALTH.is_match(type_text) {
        EventCategory::Telehealth
    } else if RE_HOMECARE.is_match(type_text) {
        EventCategory::Homecare
    } else if RE_EMERGENCY.is_match(type_text) {
        EventCategory::Er
    } else {
        EventCategory::Visit
    }
}

fn status_category(status: Option<&str>, settled: EventCategory) -> EventCategory {
    match status {
        Some(s) if RE_PENDING.is_match(s) => EventCategory::Pending,
        _ => settled,
    }
}

fn encounter_events(entries: &[RecordEntry]) -> impl Iterator<Item = TimelineEvent> + '_ {
    entries.iter().enumerate().map(|(i, entry)| {
        let timestamp = entry_timestamp(entry, &ENCOUNTER_TIMESTAMP);
        let type_text = entry.text(&ENCOUNTER_TYPE);
        let title = entry
            .text(&ENCOUNTER_TITLE)
            .or_else(|| type_text.clone())
            .unwrap_or_else(|| "Encounter".into());
        TimelineEvent {
            id: event_id(entry, EventKind::Encounter, i),
            kind: EventKind::Encounter,
            category: encounter_category(type_text.as_deref().unwrap_or_default()),
            timestamp: timestamp.unwrap_or(0),
            dated: timestamp.is_some(),
            title,
            subtitle: type_text,
        }
    })
}

fn order_events(entries: &[RecordEntry]) -> impl Iterator<Item = TimelineEvent> + '_ {
    entries.iter().enumerate().map(|(i, entry)| {
        let timestamp = entry_timestamp(entry, &ORDER_TIMESTAMP);
        let status = entry.text(&ORDER_STATUS);
        TimelineEvent {
            id: event_id(entry, EventKind::Order, i),
            kind: EventKind::Order,
            category: status_category(status.as_deref(), EventCategory::Order),
            timestamp: timestamp.unwrap_or(0),
            dated: timestamp.is_some(),
            title: entry
                .text(&LAB_TEST_NAME)
                .unwrap_or_else(|| "Lab order".into()),
            subtitle: status,
        }
    })
}

fn result_events(entries: &[RecordEntry]) -> impl Iterator<Item = TimelineEvent> + '_ {
    entries.iter().enumerate().map(|(i, entry)| {
        let timestamp = entry_timestamp(entry, &RESULT_TIMESTAMP);
        let status = entry.text(&RESULT_STATUS);
        let subtitle = entry.text(&LAB_SUMMARY).or_else(|| {
            first_numeric(entry, &LAB_VALUE).map(|v| v.to_string())
        });
        TimelineEvent {
            id: event_id(entry, EventKind::Result, i),
            kind: EventKind::Result,
            category: status_category(status.as_deref(), EventCategory::Result),
            timestamp: timestamp.unwrap_or(0),
            dated: timestamp.is_some(),
            title: entry
                .text(&LAB_TEST_NAME)
                .unwrap_or_else(|| "Lab result".into()),
            subtitle,
        }
    })
}

/// Merges encounters, lab orders and lab results into one list, newest
/// first, keeping at most `limit` events. Undated events follow every dated
/// one, pre-1970 dates included. Ties keep collection order (encounters,
/// orders, results) then entry order.
pub fn assemble_timeline(record: &PatientRecord, limit: usize) -> Vec<TimelineEvent> {
    let mut events: Vec<TimelineEvent> = encounter_events(&record.encounters)
        .chain(order_events(&record.orders))
        .chain(result_events(&record.labs))
        .collect();

    let undated = events.iter().filter(|e| !e.has_valid_date()).count();
    let total = events.len();

    events.sort_by(|a, b| b.recency_key().cmp(&a.recency_key()));
    events.truncate(limit);

    tracing::debug!(total, undated, kept = events.len(), "Assembled timeline");
    events
}
