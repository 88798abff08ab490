//! Patient chart payload: everything the chart viewer draws, in one call.
//!
//! Combines the windowed vitals series, the latest-vitals line, lab trends
//! (real or flagged demo) and the recent timeline. Recomputed from the record
//! snapshot on every window change or record update.

use serde::{Deserialize, Serialize};

use crate::config::TrendConfig;
use crate::models::PatientRecord;
use crate::timeline::{assemble_timeline, TimelineEvent};
use crate::trends::{
    assemble_labs, assemble_vitals, LabTrends, LatestVitals, VitalsSeries, Window, WindowBounds,
};

/// Latest reading plus its rendered one-liner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestSummary {
    #[serde(flatten)]
    pub vitals: LatestVitals,
    pub summary: String,
}

impl From<LatestVitals> for LatestSummary {
    fn from(vitals: LatestVitals) -> Self {
        let summary = vitals.summary();
        Self { vitals, summary }
    }
}

/// Complete chart data, single response.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    pub bounds: WindowBounds,
    pub vitals: VitalsSeries,
    pub latest: Option<LatestSummary>,
    pub labs: LabTrends,
    pub timeline: Vec<TimelineEvent>,
}

/// Builds the chart for `window` ending at `now_ms`.
pub fn build_chart(
    record: &PatientRecord,
    window: Window,
    now_ms: i64,
    config: &TrendConfig,
) -> ChartData {
    let vitals = assemble_vitals(&record.vitals, window, now_ms);
    let labs = assemble_labs(&record.labs, window, now_ms, config.demo_point_count);
    let timeline = assemble_timeline(record, config.timeline_limit);

    ChartData {
        bounds: WindowBounds::new(window, now_ms),
        vitals: vitals.series,
        latest: vitals.latest.map(LatestSummary::from),
        labs,
        timeline,
    }
}

/// Same as [`build_chart`], taking the raw selector string ("24h", "7d", ...).
pub fn build_chart_for_selector(
    record: &PatientRecord,
    selector: &str,
    now_ms: i64,
    config: &TrendConfig,
) -> ChartData {
    build_chart(record, Window::from_selector(selector), now_ms, config)
}

// ── Tests ──────────────────────────────────────────────────────────────────
