use serde::{Deserialize, Serialize};

use super::numeric::BloodPressure;
use super::window::Window;

/// One plotted sample: epoch milliseconds and value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimePoint {
    pub timestamp: i64,
    pub value: f64,
}

impl TimePoint {
    pub fn new(timestamp: i64, value: f64) -> Self {
        Self { timestamp, value }
    }
}

/// Points for one metric, ascending by timestamp. Ties keep input order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Series(Vec<TimePoint>);

impl Series {
    /// Builds a series from points in any order (stable sort).
    pub fn new(mut points: Vec<TimePoint>) -> Self {
        points.sort_by_key(|p| p.timestamp);
        Self(points)
    }

    pub fn points(&self) -> &[TimePoint] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> Option<&TimePoint> {
        self.0.first()
    }

    pub fn last(&self) -> Option<&TimePoint> {
        self.0.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TimePoint> {
        self.0.iter()
    }

    pub fn timestamps(&self) -> Vec<i64> {
        self.0.iter().map(|p| p.timestamp).collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.0.iter().map(|p| p.value).collect()
    }
}

impl FromIterator<TimePoint> for Series {
    fn from_iter<I: IntoIterator<Item = TimePoint>>(iter: I) -> Self {
        Series::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Series {
    type Item = &'a TimePoint;
    type IntoIter = std::slice::Iter<'a, TimePoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

// ── Vitals ──────────────────────────────────────────────────────────────────

/// The six per-metric vitals series. Each may cover a different subset of
/// readings: a reading missing one metric is simply absent from that series.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VitalsSeries {
    pub hr: Series,
    pub spo2: Series,
    pub temp: Series,
    pub weight: Series,
    pub bp_sys: Series,
    pub bp_dia: Series,
}

impl VitalsSeries {
    pub fn is_empty(&self) -> bool {
        self.hr.is_empty()
            && self.spo2.is_empty()
            && self.temp.is_empty()
            && self.weight.is_empty()
            && self.bp_sys.is_empty()
            && self.bp_dia.is_empty()
    }
}

/// Most recent in-window reading, for the "last known vitals" line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestVitals {
    pub recorded_at: i64,
    pub hr: Option<f64>,
    pub bp: Option<BloodPressure>,
    pub spo2: Option<f64>,
    pub temp: Option<f64>,
    pub weight: Option<f64>,
}

impl LatestVitals {
    /// "HR 72 bpm · BP 118/76 · SpO2 98%", with "--" for missing parts.
    pub fn summary(&self) -> String {
        let hr = self
            .hr
            .map(|v| format!("{} bpm", format_reading(v)))
            .unwrap_or_else(|| "--".into());
        let bp = self
            .bp
            .map(|bp| format!("{}/{}", format_reading(bp.systolic), format_reading(bp.diastolic)))
            .unwrap_or_else(|| "--".into());
        let spo2 = self
            .spo2
            .map(|v| format!("{}%", format_reading(v)))
            .unwrap_or_else(|| "--".into());
        format!("HR {hr} · BP {bp} · SpO2 {spo2}")
    }
}

fn format_reading(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value:.1}")
    }
}

/// Vitals output for one window.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VitalsTrends {
    #[serde(flatten)]
    pub series: VitalsSeries,
    pub latest: Option<LatestVitals>,
}

// ── Labs ────────────────────────────────────────────────────────────────────

/// Lab panels the chart knows how to trend, in matching priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabPanel {
    Glucose,
    Creatinine,
    Wbc,
    Hemoglobin,
    Platelets,
}

impl LabPanel {
    pub const WATCH_LIST: [LabPanel; 5] = [
        LabPanel::Glucose,
        LabPanel::Creatinine,
        LabPanel::Wbc,
        LabPanel::Hemoglobin,
        LabPanel::Platelets,
    ];

    pub fn label(self) -> &'static str {
        match self {
            LabPanel::Glucose => "Glucose",
            LabPanel::Creatinine => "Creatinine",
            LabPanel::Wbc => "WBC",
            LabPanel::Hemoglobin => "Hemoglobin",
            LabPanel::Platelets => "Platelets",
        }
    }

    /// First watch-list panel whose label appears in `test_name`
    /// (case-insensitive).
    pub fn match_test_name(test_name: &str) -> Option<LabPanel> {
        let lower = test_name.to_lowercase();
        Self::WATCH_LIST
            .into_iter()
            .find(|panel| lower.contains(&panel.label().to_lowercase()))
    }
}

/// One series per watch-list panel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabSeries {
    pub glucose: Series,
    pub creatinine: Series,
    pub wbc: Series,
    pub hemoglobin: Series,
    pub platelets: Series,
}

impl LabSeries {
    pub fn get(&self, panel: LabPanel) -> &Series {
        match panel {
            LabPanel::Glucose => &self.glucose,
            LabPanel::Creatinine => &self.creatinine,
            LabPanel::Wbc => &self.wbc,
            LabPanel::Hemoglobin => &self.hemoglobin,
            LabPanel::Platelets => &self.platelets,
        }
    }

    pub fn get_mut(&mut self, panel: LabPanel) -> &mut Series {
        match panel {
            LabPanel::Glucose => &mut self.glucose,
            LabPanel::Creatinine => &mut self.creatinine,
            LabPanel::Wbc => &mut self.wbc,
            LabPanel::Hemoglobin => &mut self.hemoglobin,
            LabPanel::Platelets => &mut self.platelets,
        }
    }

    pub fn is_empty(&self) -> bool {
        LabPanel::WATCH_LIST.iter().all(|p| self.get(*p).is_empty())
    }
}

/// Lab trends, tagged with where the numbers came from.
///
/// `Demo` series are placeholders and must be labelled as such wherever they
/// are shown. Serialises as a flat bundle with an `isDemo` flag.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(into = "LabBundle")]
pub enum LabTrends {
    Real(LabSeries),
    Demo(LabSeries),
}

impl LabTrends {
    pub fn is_demo(&self) -> bool {
        matches!(self, LabTrends::Demo(_))
    }

    pub fn series(&self) -> &LabSeries {
        match self {
            LabTrends::Real(series) | LabTrends::Demo(series) => series,
        }
    }
}

/// Wire form of [`LabTrends`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabBundle {
    #[serde(flatten)]
    pub series: LabSeries,
    pub is_demo: bool,
}

impl From<LabTrends> for LabBundle {
    fn from(trends: LabTrends) -> Self {
        match trends {
            LabTrends::Real(series) => LabBundle { series, is_demo: false },
            LabTrends::Demo(series) => LabBundle { series, is_demo: true },
        }
    }
}

/// Window echoed back with every bundle so consumers can label axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowBounds {
    pub window: Window,
    pub cutoff: i64,
    pub now: i64,
}

impl WindowBounds {
    pub fn new(window: Window, now_ms: i64) -> Self {
        Self {
            window,
            cutoff: window.cutoff(now_ms),
            now: now_ms,
        }
    }
}
