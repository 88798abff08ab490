/// Ordered list of keys accepted for one logical field.
///
/// Lookups walk `keys` front to back, so the slice order is the precedence
/// policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldAliases {
    pub keys: &'static [&'static str],
}

impl FieldAliases {
    pub const fn new(keys: &'static [&'static str]) -> Self {
        Self { keys }
    }
}

// ── Vitals ──────────────────────────────────────────────────────────────────

pub const VITALS_TIMESTAMP: FieldAliases = FieldAliases::new(&["recordedAt", "time", "date"]);
pub const HEART_RATE: FieldAliases = FieldAliases::new(&["hr", "heartRate", "pulse"]);
pub const BLOOD_PRESSURE: FieldAliases = FieldAliases::new(&["bp", "bloodPressure"]);
pub const TEMPERATURE: FieldAliases = FieldAliases::new(&["tempC", "temp"]);
pub const OXYGEN_SATURATION: FieldAliases = FieldAliases::new(&["spo2", "o2", "oxygenSaturation"]);
pub const WEIGHT: FieldAliases = FieldAliases::new(&["weightKg", "weight"]);

// ── Labs ────────────────────────────────────────────────────────────────────

pub const LAB_TIMESTAMP: FieldAliases = FieldAliases::new(&["recordedAt", "resultedAt", "date"]);
pub const LAB_VALUE: FieldAliases = FieldAliases::new(&["value", "resultValue", "result"]);
pub const LAB_SUMMARY: FieldAliases = FieldAliases::new(&["summary"]);
pub const LAB_TEST_NAME: FieldAliases = FieldAliases::new(&["test", "name", "testName"]);

// ── Timeline ────────────────────────────────────────────────────────────────

pub const ENCOUNTER_TIMESTAMP: FieldAliases = FieldAliases::new(&["date", "startedAt", "recordedAt"]);
pub const ENCOUNTER_TYPE: FieldAliases = FieldAliases::new(&["type", "kind", "setting"]);
pub const ENCOUNTER_TITLE: FieldAliases = FieldAliases::new(&["title", "reason", "summary"]);
pub const ORDER_TIMESTAMP: FieldAliases = FieldAliases::new(&["orderedAt", "date", "createdAt"]);
pub const ORDER_STATUS: FieldAliases = FieldAliases::new(&["status"]);
pub const RESULT_TIMESTAMP: FieldAliases = FieldAliases::new(&["resultedAt", "recordedAt", "date"]);
pub const RESULT_STATUS: FieldAliases = FieldAliases::new(&["status"]);
pub const ENTRY_ID: FieldAliases = FieldAliases::new(&["id", "uuid"]);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vitals_timestamp_precedence() {
        assert_eq!(VITALS_TIMESTAMP.keys, &["recordedAt", "time", "date"]);
    }

    #[test]
    fn lab_timestamp_precedence() {
        assert_eq!(LAB_TIMESTAMP.keys, &["recordedAt", "resultedAt", "date"]);
    }

    #[test]
    fn temperature_prefers_celsius_key() {
        assert_eq!(TEMPERATURE.keys.first(), Some(&"tempC"));
    }

    #[test]
    fn lab_value_keys_exclude_summary() {
        assert!(!LAB_VALUE.keys.contains(&"summary"));
        assert_eq!(LAB_SUMMARY.keys, &["summary"]);
    }
}
