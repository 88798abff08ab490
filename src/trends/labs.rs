use crate::models::{RecordEntry, LAB_SUMMARY, LAB_TEST_NAME, LAB_TIMESTAMP, LAB_VALUE};

use super::demo::synthesize_demo_series;
use super::numeric::first_numeric;
use super::time::entry_timestamp;
use super::types::*;
use super::window::Window;

/// A lab entry reduced to something plottable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabPoint {
    pub panel: LabPanel,
    pub point: TimePoint,
}

/// Timestamp, numeric value and watch-list panel for one lab entry.
///
/// The value comes from `value`/`resultValue`/`result` (first numeric wins),
/// then from the free-text `summary`. Entries missing any of the three are
/// not trendable.
pub fn lab_point(entry: &RecordEntry) -> Option<LabPoint> {
    let timestamp = entry_timestamp(entry, &LAB_TIMESTAMP)?;
    let value = first_numeric(entry, &LAB_VALUE).or_else(|| first_numeric(entry, &LAB_SUMMARY))?;
    let panel = LabPanel::match_test_name(&entry.text(&LAB_TEST_NAME)?)?;
    Some(LabPoint {
        panel,
        point: TimePoint::new(timestamp, value),
    })
}

/// Real watch-list series for the window; empty series where nothing matched.
pub fn assemble_lab_series(entries: &[RecordEntry], window: Window, now_ms: i64) -> LabSeries {
    let cutoff = window.cutoff(now_ms);
    let points: Vec<LabPoint> = entries
        .iter()
        .filter_map(lab_point)
        .filter(|lp| lp.point.timestamp >= cutoff)
        .collect();

    let mut series = LabSeries::default();
    for panel in LabPanel::WATCH_LIST {
        *series.get_mut(panel) = points
            .iter()
            .filter(|lp| lp.panel == panel)
            .map(|lp| lp.point)
            .collect();
    }
    series
}

/// Lab trends for the window, falling back to flagged demo series only when
/// every watch-list panel is empty.
pub fn assemble_labs(
    entries: &[RecordEntry],
    window: Window,
    now_ms: i64,
    demo_point_count: usize,
) -> LabTrends {
    let series = assemble_lab_series(entries, window, now_ms);
    if !series.is_empty() {
        tracing::debug!(
            entries = entries.len(),
            glucose = series.glucose.len(),
            creatinine = series.creatinine.len(),
            wbc = series.wbc.len(),
            hemoglobin = series.hemoglobin.len(),
            platelets = series.platelets.len(),
            window = window.as_str(),
            "Assembled lab series"
        );
        return LabTrends::Real(series);
    }

    tracing::info!(
        entries = entries.len(),
        window = window.as_str(),
        "No numeric lab data in window, using demo series"
    );
    LabTrends::Demo(synthesize_demo_series(window, now_ms, demo_point_count))
}
