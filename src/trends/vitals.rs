use crate::models::{
    RecordEntry, BLOOD_PRESSURE, HEART_RATE, OXYGEN_SATURATION, TEMPERATURE, VITALS_TIMESTAMP,
    WEIGHT,
};

use super::numeric::{extract_blood_pressure, present_numeric, BloodPressure};
use super::time::entry_timestamp;
use super::types::*;
use super::window::Window;

/// A vitals entry that survived timestamp parsing and window filtering.
struct WindowedReading<'a> {
    timestamp: i64,
    entry: &'a RecordEntry,
}

impl WindowedReading<'_> {
    fn bp(&self) -> Option<BloodPressure> {
        self.entry
            .first_present(&BLOOD_PRESSURE)
            .and_then(extract_blood_pressure)
    }
}

/// Parses timestamps, drops entries outside the window (or without a usable
/// timestamp) and sorts the rest ascending, stable on ties.
fn windowed_readings(
    entries: &[RecordEntry],
    window: Window,
    now_ms: i64,
) -> Vec<WindowedReading<'_>> {
    let cutoff = window.cutoff(now_ms);
    let mut readings: Vec<WindowedReading<'_>> = entries
        .iter()
        .filter_map(|entry| {
            entry_timestamp(entry, &VITALS_TIMESTAMP)
                .map(|timestamp| WindowedReading { timestamp, entry })
        })
        .filter(|r| r.timestamp >= cutoff)
        .collect();
    readings.sort_by_key(|r| r.timestamp);
    readings
}

fn metric_series<F>(readings: &[WindowedReading<'_>], value: F) -> Series
where
    F: Fn(&WindowedReading<'_>) -> Option<f64>,
{
    readings
        .iter()
        .filter_map(|r| value(r).map(|v| TimePoint::new(r.timestamp, v)))
        .collect()
}

/// Builds the six per-metric vitals series for `window` ending at `now_ms`.
pub fn assemble_vitals_series(entries: &[RecordEntry], window: Window, now_ms: i64) -> VitalsSeries {
    let readings = windowed_readings(entries, window, now_ms);
    series_from_readings(&readings)
}

fn series_from_readings(readings: &[WindowedReading<'_>]) -> VitalsSeries {
    VitalsSeries {
        hr: metric_series(readings, |r| present_numeric(r.entry, &HEART_RATE)),
        spo2: metric_series(readings, |r| present_numeric(r.entry, &OXYGEN_SATURATION)),
        temp: metric_series(readings, |r| present_numeric(r.entry, &TEMPERATURE)),
        weight: metric_series(readings, |r| present_numeric(r.entry, &WEIGHT)),
        bp_sys: metric_series(readings, |r| r.bp().map(|bp| bp.systolic)),
        bp_dia: metric_series(readings, |r| r.bp().map(|bp| bp.diastolic)),
    }
}

fn latest_from_readings(readings: &[WindowedReading<'_>]) -> Option<LatestVitals> {
    let last = readings.last()?;
    Some(LatestVitals {
        recorded_at: last.timestamp,
        hr: present_numeric(last.entry, &HEART_RATE),
        bp: last.bp(),
        spo2: present_numeric(last.entry, &OXYGEN_SATURATION),
        temp: present_numeric(last.entry, &TEMPERATURE),
        weight: present_numeric(last.entry, &WEIGHT),
    })
}

/// Reading with the greatest timestamp inside the window. On equal
/// timestamps the later entry in the record wins.
pub fn latest_vitals(entries: &[RecordEntry], window: Window, now_ms: i64) -> Option<LatestVitals> {
    latest_from_readings(&windowed_readings(entries, window, now_ms))
}

/// Series and latest reading in a single pass over the record.
pub fn assemble_vitals(entries: &[RecordEntry], window: Window, now_ms: i64) -> VitalsTrends {
    let readings = windowed_readings(entries, window, now_ms);
    let trends = VitalsTrends {
        series: series_from_readings(&readings),
        latest: latest_from_readings(&readings),
    };
    tracing::debug!(
        entries = entries.len(),
        in_window = readings.len(),
        hr = trends.series.hr.len(),
        bp = trends.series.bp_sys.len(),
        window = window.as_str(),
        "Assembled vitals series"
    );
    trends
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trends::window::HOUR_MS;
    use serde_json::{json, Value};

    const NOW: i64 = 1_792_324_800_000; // 2026-10-18T12:00:00Z

    fn iso(ms: i64) -> String {
        chrono::DateTime::from_timestamp_millis(ms)
            .unwrap()
            .to_rfc3339()
    }

    fn entries(values: Vec<Value>) -> Vec<RecordEntry> {
        values.into_iter().map(RecordEntry::new).collect()
    }

    fn reading(hours_ago: i64) -> Value {
        json!({
            "recordedAt": iso(NOW - hours_ago * HOUR_MS),
            "hr": 70 + hours_ago,
            "bp": "120/80",
            "tempC": 36.9,
            "spo2": "98%",
            "weight": 70.5,
        })
    }

    #[test]
    fn full_reading_feeds_all_six_series() {
        let series = assemble_vitals_series(&entries(vec![reading(1)]), Window::Last24Hours, NOW);
        assert_eq!(series.hr.len(), 1);
        assert_eq!(series.spo2.values(), vec![98.0]);
        assert_eq!(series.temp.values(), vec![36.9]);
        assert_eq!(series.weight.values(), vec![70.5]);
        assert_eq!(series.bp_sys.values(), vec![120.0]);
        assert_eq!(series.bp_dia.values(), vec![80.0]);
    }

    #[test]
    fn out_of_window_entry_absent_everywhere() {
        let series = assemble_vitals_series(
            &entries(vec![reading(2), reading(30)]),
            Window::Last24Hours,
            NOW,
        );
        for metric in [
            &series.hr,
            &series.spo2,
            &series.temp,
            &series.weight,
            &series.bp_sys,
            &series.bp_dia,
        ] {
            assert_eq!(metric.timestamps(), vec![NOW - 2 * HOUR_MS]);
        }
    }

    #[test]
    fn week_window_keeps_older_entry() {
        let series = assemble_vitals_series(
            &entries(vec![reading(2), reading(30)]),
            Window::Last7Days,
            NOW,
        );
        assert_eq!(series.hr.len(), 2);
    }

    #[test]
    fn unparseable_hr_only_drops_hr() {
        let series = assemble_vitals_series(
            &entries(vec![json!({
                "recordedAt": iso(NOW - HOUR_MS),
                "hr": "irregular",
                "bp": "BP 118/76 today",
            })]),
            Window::Last24Hours,
            NOW,
        );
        assert!(series.hr.is_empty());
        assert_eq!(series.bp_sys.values(), vec![118.0]);
        assert_eq!(series.bp_dia.values(), vec![76.0]);
    }

    #[test]
    fn bad_timestamp_excluded() {
        let series = assemble_vitals_series(
            &entries(vec![
                json!({"recordedAt": "whenever", "hr": 80}),
                json!({"hr": 81}),
                json!({"time": iso(NOW - HOUR_MS), "hr": 82}),
            ]),
            Window::Last24Hours,
            NOW,
        );
        assert_eq!(series.hr.values(), vec![82.0]);
    }

    #[test]
    fn series_sorted_ascending_with_stable_ties() {
        let t = iso(NOW - 3 * HOUR_MS);
        let series = assemble_vitals_series(
            &entries(vec![
                json!({"recordedAt": iso(NOW - HOUR_MS), "hr": 90}),
                json!({"recordedAt": t, "hr": 60}),
                json!({"date": t, "hr": 61}),
            ]),
            Window::Last24Hours,
            NOW,
        );
        assert_eq!(series.hr.values(), vec![60.0, 61.0, 90.0]);
    }

    #[test]
    fn temperature_prefers_celsius_field() {
        let series = assemble_vitals_series(
            &entries(vec![
                json!({"recordedAt": iso(NOW - HOUR_MS), "tempC": 37.2, "temp": 99.0}),
                json!({"recordedAt": iso(NOW - 2 * HOUR_MS), "temp": "37.8 C"}),
            ]),
            Window::Last24Hours,
            NOW,
        );
        assert_eq!(series.temp.values(), vec![37.8, 37.2]);
    }

    #[test]
    fn metrics_can_have_different_lengths() {
        let series = assemble_vitals_series(
            &entries(vec![
                json!({"recordedAt": iso(NOW - 3 * HOUR_MS), "hr": 70}),
                json!({"recordedAt": iso(NOW - 2 * HOUR_MS), "spo2": 95}),
                json!({"recordedAt": iso(NOW - HOUR_MS), "hr": 72, "spo2": 96}),
            ]),
            Window::Last24Hours,
            NOW,
        );
        assert_eq!(series.hr.len(), 2);
        assert_eq!(series.spo2.len(), 2);
        assert!(series.weight.is_empty());
        assert_eq!(series.hr.timestamps()[0], NOW - 3 * HOUR_MS);
        assert_eq!(series.spo2.timestamps()[0], NOW - 2 * HOUR_MS);
    }

    #[test]
    fn latest_is_most_recent_in_window() {
        let latest = latest_vitals(
            &entries(vec![reading(1), reading(5), reading(0)]),
            Window::Last24Hours,
            NOW,
        )
        .unwrap();
        assert_eq!(latest.recorded_at, NOW);
        assert_eq!(latest.hr, Some(70.0));
        assert_eq!(latest.bp, Some(BloodPressure { systolic: 120.0, diastolic: 80.0 }));
    }

    #[test]
    fn latest_none_when_window_empty() {
        assert!(latest_vitals(&entries(vec![reading(48)]), Window::Last24Hours, NOW).is_none());
        assert!(latest_vitals(&[], Window::Last7Days, NOW).is_none());
    }

    #[test]
    fn latest_independent_of_input_order() {
        let latest = latest_vitals(
            &entries(vec![reading(0), reading(3)]),
            Window::Last24Hours,
            NOW,
        )
        .unwrap();
        assert_eq!(latest.recorded_at, NOW);
    }

    #[test]
    fn assembly_is_idempotent() {
        let record = entries(vec![reading(1), reading(4), json!({"hr": "x"})]);
        let first = assemble_vitals(&record, Window::Last7Days, NOW);
        let second = assemble_vitals(&record, Window::Last7Days, NOW);
        assert_eq!(first, second);
    }

    #[test]
    fn combined_assembly_matches_parts() {
        let record = entries(vec![reading(1), reading(4)]);
        let combined = assemble_vitals(&record, Window::Last24Hours, NOW);
        assert_eq!(combined.series, assemble_vitals_series(&record, Window::Last24Hours, NOW));
        assert_eq!(combined.latest, latest_vitals(&record, Window::Last24Hours, NOW));
    }
}
