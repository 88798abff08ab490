use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use super::fields::FieldAliases;

#[derive(Error, Debug)]
pub enum RecordError {
    #[error("Patient record must be a JSON object, got {0}")]
    NotAnObject(&'static str),

    #[error("Malformed patient record: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// One loosely-typed entry (a vitals reading, lab result, encounter, order).
///
/// Non-object entries are kept as-is; every lookup on them yields nothing,
/// so they drop out of derived series instead of failing the whole record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordEntry(Value);

impl RecordEntry {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Raw field lookup. `null` counts as absent.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0
            .as_object()
            .and_then(|obj| obj.get(key))
            .filter(|v| !v.is_null())
    }

    /// First alias whose value is present: not `null`, not `false`,
    /// not an empty (or blank) string.
    pub fn first_present(&self, aliases: &FieldAliases) -> Option<&Value> {
        aliases
            .keys
            .iter()
            .filter_map(|key| self.get(key))
            .find(|v| is_present(v))
    }

    /// First present alias rendered as text. Numbers and booleans are
    /// stringified; objects and arrays are ignored.
    pub fn text(&self, aliases: &FieldAliases) -> Option<String> {
        match self.first_present(aliases)? {
            Value::String(s) => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }
}

fn is_present(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => false,
        Value::String(s) => !s.trim().is_empty(),
        _ => true,
    }
}

/// Patient record snapshot as stored by the editor.
///
/// Only the collections the chart viewer reads are typed; everything else
/// (demographics, allergies, notes) rides along in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientRecord {
    #[serde(default, deserialize_with = "entries")]
    pub vitals: Vec<RecordEntry>,
    #[serde(default, deserialize_with = "entries")]
    pub labs: Vec<RecordEntry>,
    #[serde(default, deserialize_with = "entries")]
    pub encounters: Vec<RecordEntry>,
    #[serde(default, alias = "labOrders", deserialize_with = "entries")]
    pub orders: Vec<RecordEntry>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
    #[serde(skip)]
    orders_key: OrdersKey,
}

/// Key the orders collection was read from; writes reuse it so the editor
/// finds its data where it left it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum OrdersKey {
    #[default]
    Orders,
    LabOrders,
}

impl PatientRecord {
    /// Interpret a stored value as a patient record.
    ///
    /// `null` is an empty record (nothing saved yet). Any other non-object is
    /// a caller contract violation.
    pub fn from_value(value: Value) -> Result<Self, RecordError> {
        match value {
            Value::Null => Ok(Self::default()),
            Value::Object(obj) => {
                let orders_key = if obj.contains_key("labOrders") && !obj.contains_key("orders") {
                    OrdersKey::LabOrders
                } else {
                    OrdersKey::Orders
                };
                let mut record: Self = serde_json::from_value(Value::Object(obj))?;
                record.orders_key = orders_key;
                Ok(record)
            }
            other => Err(RecordError::NotAnObject(json_kind(&other))),
        }
    }

    /// Serialise for storage. Orders go back under `labOrders` when that is
    /// the key they were read from, `orders` otherwise.
    pub fn to_value(&self) -> Result<Value, RecordError> {
        let mut value = serde_json::to_value(self)?;
        if self.orders_key == OrdersKey::LabOrders {
            if let Some(obj) = value.as_object_mut() {
                if let Some(orders) = obj.remove("orders") {
                    obj.insert("labOrders".to_string(), orders);
                }
            }
        }
        Ok(value)
    }
}

/// `null` collections read as empty; any other non-array is rejected.
fn entries<'de, D>(deserializer: D) -> Result<Vec<RecordEntry>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<Vec<RecordEntry>>::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
