//! Placeholder lab series for charts with no real lab data in the window.
//!
//! Everything here is fabricated. Callers only reach it through
//! [`LabTrends::Demo`](super::types::LabTrends), which carries the flag to
//! the consumer.

use super::types::{LabPanel, LabSeries, Series, TimePoint};
use super::window::{Window, HOUR_MS};

/// Panels that get demo series. Hemoglobin and platelets stay empty.
pub const DEMO_PANELS: [LabPanel; 3] = [LabPanel::Glucose, LabPanel::Creatinine, LabPanel::Wbc];

/// (baseline, amplitude, angular step per point, decimals)
fn wave(panel: LabPanel) -> (f64, f64, f64, i32) {
    match panel {
        LabPanel::Glucose => (108.0, 14.0, 0.9, 0),
        LabPanel::Creatinine => (1.0, 0.18, 0.7, 2),
        LabPanel::Wbc => (7.4, 1.3, 0.55, 1),
        LabPanel::Hemoglobin => (13.8, 0.6, 0.5, 1),
        LabPanel::Platelets => (240.0, 30.0, 0.4, 0),
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Smooth oscillation seeded by point index and window step.
fn demo_value(panel: LabPanel, index: usize, step_ms: i64) -> f64 {
    let (base, amplitude, omega, decimals) = wave(panel);
    let phase = (step_ms / HOUR_MS) as f64 * 0.1;
    round_to(base + amplitude * (index as f64 * omega + phase).sin(), decimals)
}

/// `count` points per demo panel, one window step apart, the last at `now_ms`.
/// `count` is clamped to `1..=window.demo_capacity()`, so timestamps are
/// strictly increasing and never older than the window cutoff.
pub fn synthesize_demo_series(window: Window, now_ms: i64, count: usize) -> LabSeries {
    let count = count.clamp(1, window.demo_capacity());
    let step = window.step_ms();
    let mut series = LabSeries::default();
    for panel in DEMO_PANELS {
        let points = (0..count)
            .map(|i| {
                let steps_back = (count - 1 - i) as i64;
                TimePoint::new(now_ms - steps_back * step, demo_value(panel, i, step))
            })
            .collect::<Vec<_>>();
        *series.get_mut(panel) = Series::new(points);
    }
    series
}
