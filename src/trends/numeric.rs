use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::{FieldAliases, RecordEntry};

/// First signed or unsigned decimal number anywhere in the text.
static RE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-+]?\d*\.?\d+").unwrap());

/// Two 2–3 digit groups separated by a slash ("118/76").
static RE_BLOOD_PRESSURE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{2,3})\s*/\s*(\d{2,3})").unwrap());

/// Systolic/diastolic pair in mmHg.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BloodPressure {
    pub systolic: f64,
    pub diastolic: f64,
}

/// Coerce a loosely-typed field to a float.
///
/// Finite numbers pass through unchanged. Anything else is rendered as text
/// and scanned for the first decimal number. `None` is the normal outcome for
/// missing or non-numeric data.
pub fn extract_number(value: &Value) -> Option<f64> {
    match value {
        Value::Null => None,
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => extract_number_from_text(s),
        other => extract_number_from_text(&other.to_string()),
    }
}

/// Scan free text ("Glucose 120 mg/dL") for its first decimal number.
pub fn extract_number_from_text(text: &str) -> Option<f64> {
    RE_NUMBER
        .find(text)?
        .as_str()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Parse a "SYS/DIA" reading embedded anywhere in the value.
pub fn extract_blood_pressure(value: &Value) -> Option<BloodPressure> {
    let text = match value {
        Value::Null => return None,
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    let caps = RE_BLOOD_PRESSURE.captures(&text)?;
    let systolic = caps.get(1)?.as_str().parse::<f64>().ok()?;
    let diastolic = caps.get(2)?.as_str().parse::<f64>().ok()?;
    Some(BloodPressure { systolic, diastolic })
}

/// Value of the first alias that yields a number. Unlike
/// [`RecordEntry::first_present`], a present-but-non-numeric alias does not
/// stop the search.
pub fn first_numeric(entry: &RecordEntry, aliases: &FieldAliases) -> Option<f64> {
    aliases
        .keys
        .iter()
        .filter_map(|key| entry.get(key))
        .find_map(extract_number)
}

/// Number extracted from the first present alias only.
pub fn present_numeric(entry: &RecordEntry, aliases: &FieldAliases) -> Option<f64> {
    entry.first_present(aliases).and_then(extract_number)
}
