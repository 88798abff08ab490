//! Patient chart commands.

use crate::chart::{build_chart, build_chart_for_selector, ChartData};
use crate::config::TrendConfig;
use crate::models::PatientRecord;
use crate::store::{patient_key, RecordStore, StoreEvent, CONFIG_KEY};
use crate::trends::Window;

use super::CommandError;

/// Current wall-clock time in epoch ms.
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Loads a patient record; a patient with nothing saved yet has an empty
/// record.
pub fn load_patient_record(
    store: &dyn RecordStore,
    patient_id: &str,
) -> Result<PatientRecord, CommandError> {
    let value = store.get(&patient_key(patient_id))?.unwrap_or_default();
    Ok(PatientRecord::from_value(value)?)
}

/// Saves the editor's copy of a record. Subscribers are notified by the
/// store. A record loaded with `labOrders` is written back under that key.
pub fn save_patient_record(
    store: &dyn RecordStore,
    patient_id: &str,
    record: &PatientRecord,
) -> Result<(), CommandError> {
    store.set(&patient_key(patient_id), record.to_value()?)?;
    tracing::info!(patient_id, "Patient record saved");
    Ok(())
}

/// Chart tunables from the admin settings. Missing settings, or settings
/// without chart fields, fall back to the defaults.
pub fn load_trend_config(store: &dyn RecordStore) -> Result<TrendConfig, CommandError> {
    match store.get(CONFIG_KEY)? {
        Some(value) if value.is_object() => Ok(serde_json::from_value(value)?),
        _ => Ok(TrendConfig::default()),
    }
}

/// Chart data for a patient at an explicit instant.
pub fn get_chart_data_at(
    store: &dyn RecordStore,
    patient_id: &str,
    selector: &str,
    now_ms: i64,
    config: &TrendConfig,
) -> Result<ChartData, CommandError> {
    let record = load_patient_record(store, patient_id)?;
    let window = Window::from_selector(selector);
    let chart = build_chart(&record, window, now_ms, config);
    tracing::debug!(
        patient_id,
        window = window.as_str(),
        demo_labs = chart.labs.is_demo(),
        timeline = chart.timeline.len(),
        "Chart data assembled"
    );
    Ok(chart)
}

/// Chart data for a patient as of now, using the stored chart settings.
pub fn get_chart_data(
    store: &dyn RecordStore,
    patient_id: &str,
    selector: &str,
) -> Result<ChartData, CommandError> {
    let config = load_trend_config(store)?;
    get_chart_data_at(store, patient_id, selector, now_ms(), &config)
}

/// Chart data for an already-loaded record as of now.
pub fn build_chart_now(record: &PatientRecord, selector: &str, config: &TrendConfig) -> ChartData {
    build_chart_for_selector(record, selector, now_ms(), config)
}

/// Whether a store event should trigger a chart refresh for this patient.
pub fn affects_patient(event: &StoreEvent, patient_id: &str) -> bool {
    event.key == patient_key(patient_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RecordError;
    use crate::store::{ChangeKind, MemoryStore};
    use serde_json::json;

    const NOW: i64 = 1_792_324_800_000;

    fn store_with_patient() -> MemoryStore {
        let store = MemoryStore::new();
        store
            .set(
                &patient_key("p1"),
                json!({
                    "vitals": [{"recordedAt": "2026-10-18T11:00:00Z", "hr": 66, "bp": "110/70", "spo2": 99}],
                    "labs": [{"test": "Hemoglobin", "recordedAt": "2026-10-18T06:00:00Z", "value": "13.9 g/dL"}],
                }),
            )
            .unwrap();
        store
    }

    #[test]
    fn chart_for_stored_patient() {
        let store = store_with_patient();
        let chart =
            get_chart_data_at(&store, "p1", "24h", NOW, &TrendConfig::default()).unwrap();
        assert_eq!(chart.vitals.hr.values(), vec![66.0]);
        assert!(!chart.labs.is_demo());
        assert_eq!(chart.labs.series().hemoglobin.values(), vec![13.9]);
        assert_eq!(
            chart.latest.unwrap().summary,
            "HR 66 bpm · BP 110/70 · SpO2 99%"
        );
    }

    #[test]
    fn unknown_patient_gets_empty_chart() {
        let store = MemoryStore::new();
        let chart =
            get_chart_data_at(&store, "nobody", "7d", NOW, &TrendConfig::default()).unwrap();
        assert!(chart.vitals.is_empty());
        assert!(chart.labs.is_demo());
    }

    #[test]
    fn malformed_record_is_an_error() {
        let store = MemoryStore::new();
        store.set(&patient_key("p2"), json!("corrupted")).unwrap();
        let err = get_chart_data_at(&store, "p2", "7d", NOW, &TrendConfig::default()).unwrap_err();
        assert!(matches!(err, CommandError::Record(RecordError::NotAnObject("string"))));
    }

    #[test]
    fn save_round_trips_and_notifies() {
        let store = store_with_patient();
        let mut sub = store.subscribe();
        let mut record = load_patient_record(&store, "p1").unwrap();
        record.vitals.clear();
        save_patient_record(&store, "p1", &record).unwrap();

        let event = sub.events.try_recv().unwrap();
        assert_eq!(event.kind, ChangeKind::Set);
        assert!(affects_patient(&event, "p1"));
        assert!(!affects_patient(&event, "p10"));
        assert!(load_patient_record(&store, "p1").unwrap().vitals.is_empty());
    }

    #[test]
    fn save_keeps_lab_orders_key() {
        let store = MemoryStore::new();
        store
            .set(&patient_key("p3"), json!({"labOrders": [{"test": "CBC", "status": "pending"}]}))
            .unwrap();
        let record = load_patient_record(&store, "p3").unwrap();
        save_patient_record(&store, "p3", &record).unwrap();

        let stored = store.get(&patient_key("p3")).unwrap().unwrap();
        assert_eq!(stored["labOrders"][0]["test"], json!("CBC"));
        assert!(stored.get("orders").is_none());
    }

    #[test]
    fn trend_config_read_from_settings() {
        let store = MemoryStore::new();
        assert_eq!(load_trend_config(&store).unwrap(), TrendConfig::default());

        store
            .set(CONFIG_KEY, json!({"clinicName": "Northside", "timeline_limit": 3}))
            .unwrap();
        let config = load_trend_config(&store).unwrap();
        assert_eq!(config.timeline_limit, 3);
        assert_eq!(config.demo_point_count, TrendConfig::default().demo_point_count);
    }

    #[test]
    fn bad_chart_settings_are_an_error() {
        let store = MemoryStore::new();
        store.set(CONFIG_KEY, json!({"timeline_limit": "many"})).unwrap();
        assert!(matches!(load_trend_config(&store), Err(CommandError::Config(_))));
    }

    #[test]
    fn stored_settings_cap_timeline() {
        let store = store_with_patient();
        store
            .set(
                &patient_key("p4"),
                json!({"encounters": [{"date": "2026-10-01"}, {"date": "2026-10-02"}, {"date": "2026-10-03"}]}),
            )
            .unwrap();
        store.set(CONFIG_KEY, json!({"timeline_limit": 2})).unwrap();
        let chart = get_chart_data(&store, "p4", "7d").unwrap();
        assert_eq!(chart.timeline.len(), 2);
    }

    #[test]
    fn wall_clock_chart_succeeds() {
        let store = store_with_patient();
        assert!(get_chart_data(&store, "p1", "7d").is_ok());
    }
}
