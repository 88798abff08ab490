use serde::{Deserialize, Serialize};

pub const HOUR_MS: i64 = 60 * 60 * 1000;
pub const DAY_MS: i64 = 24 * HOUR_MS;

/// Trailing interval a chart is drawn over.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Window {
    #[serde(rename = "24h")]
    Last24Hours,
    #[default]
    #[serde(rename = "7d")]
    Last7Days,
}

impl Window {
    /// Exactly `"24h"` selects the day view; every other selector, padded
    /// variants included, falls back to the week view.
    pub fn from_selector(selector: &str) -> Self {
        match selector {
            "24h" => Window::Last24Hours,
            _ => Window::Last7Days,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Window::Last24Hours => "24h",
            Window::Last7Days => "7d",
        }
    }

    pub fn duration_ms(self) -> i64 {
        match self {
            Window::Last24Hours => DAY_MS,
            Window::Last7Days => 7 * DAY_MS,
        }
    }

    /// Spacing between synthesised demo points.
    pub fn step_ms(self) -> i64 {
        match self {
            Window::Last24Hours => 4 * HOUR_MS,
            Window::Last7Days => DAY_MS,
        }
    }

    /// Most demo points that fit between the cutoff and `now`, one step apart.
    pub fn demo_capacity(self) -> usize {
        (self.duration_ms() / self.step_ms()) as usize + 1
    }

    /// Inclusive lower bound of the window ending at `now_ms`.
    pub fn cutoff(self, now_ms: i64) -> i64 {
        now_ms - self.duration_ms()
    }

    pub fn contains(self, timestamp: i64, now_ms: i64) -> bool {
        timestamp >= self.cutoff(now_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_790_000_000_000;

    #[test]
    fn day_cutoff() {
        assert_eq!(Window::from_selector("24h").cutoff(NOW), NOW - 86_400_000);
    }

    #[test]
    fn week_cutoff() {
        assert_eq!(Window::from_selector("7d").cutoff(NOW), NOW - 604_800_000);
    }

    #[test]
    fn unknown_selector_defaults_to_week() {
        assert_eq!(Window::from_selector("30d"), Window::Last7Days);
        assert_eq!(Window::from_selector(""), Window::Last7Days);
        assert_eq!(Window::from_selector("24H"), Window::Last7Days);
        assert_eq!(Window::from_selector(" 24h"), Window::Last7Days);
        assert_eq!(Window::from_selector("24h\n"), Window::Last7Days);
        assert_eq!(Window::from_selector("garbage").cutoff(NOW), NOW - 604_800_000);
    }

    #[test]
    fn cutoff_is_inclusive() {
        let window = Window::Last24Hours;
        assert!(window.contains(window.cutoff(NOW), NOW));
        assert!(!window.contains(window.cutoff(NOW) - 1, NOW));
    }

    #[test]
    fn step_sizes() {
        assert_eq!(Window::Last24Hours.step_ms(), 4 * HOUR_MS);
        assert_eq!(Window::Last7Days.step_ms(), DAY_MS);
    }

    #[test]
    fn demo_capacity_fills_window() {
        assert_eq!(Window::Last24Hours.demo_capacity(), 7);
        assert_eq!(Window::Last7Days.demo_capacity(), 8);
    }

    #[test]
    fn serializes_as_selector() {
        assert_eq!(serde_json::to_string(&Window::Last24Hours).unwrap(), "\"24h\"");
        assert_eq!(serde_json::to_string(&Window::Last7Days).unwrap(), "\"7d\"");
        assert_eq!(Window::Last24Hours.as_str(), "24h");
    }
}
