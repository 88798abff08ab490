use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Application-level constants
pub const APP_NAME: &str = "Telechart";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Most recent events kept on the patient timeline.
pub const TIMELINE_LIMIT: usize = 14;

/// Points synthesised per metric when no real lab data is in the window.
pub const DEMO_POINT_COUNT: usize = 7;

/// Filter used when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "telechart_lib=info,telechart=info"
}

/// Get the application data directory
/// ~/Telechart/ when a home directory exists, ./Telechart/ otherwise.
pub fn app_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Location of the JSON-backed record store.
pub fn store_path() -> PathBuf {
    app_data_dir().join("store.json")
}

/// Tunables for chart assembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendConfig {
    pub timeline_limit: usize,
    pub demo_point_count: usize,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            timeline_limit: TIMELINE_LIMIT,
            demo_point_count: DEMO_POINT_COUNT,
        }
    }
}
