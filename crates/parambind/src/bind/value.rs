//! Values produced by binding, ready for assignment onto a record.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Attribute name → bound value, in binding order.
pub type BoundAttributes = IndexMap<String, BoundValue>;

/// A value ready to be assigned to a record attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BoundValue {
    /// Explicitly cleared.
    Null,
    /// Coerced boolean column value.
    Bool(bool),
    /// Raw form text.
    Text(String),
    /// Anything else a hook chose to return.
    Json(Value),
}

impl BoundValue {
    pub fn is_null(&self) -> bool {
        matches!(self, BoundValue::Null | BoundValue::Json(Value::Null))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            BoundValue::Text(s) => Some(s),
            BoundValue::Json(Value::String(s)) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            BoundValue::Bool(b) => Some(*b),
            BoundValue::Json(Value::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    /// Convert to a plain JSON value.
    pub fn to_json(&self) -> Value {
        match self {
            BoundValue::Null => Value::Null,
            BoundValue::Bool(b) => Value::Bool(*b),
            BoundValue::Text(s) => Value::String(s.clone()),
            BoundValue::Json(value) => value.clone(),
        }
    }
}

impl From<&str> for BoundValue {
    fn from(value: &str) -> Self {
        BoundValue::Text(value.to_string())
    }
}

impl From<String> for BoundValue {
    fn from(value: String) -> Self {
        BoundValue::Text(value)
    }
}

impl From<bool> for BoundValue {
    fn from(value: bool) -> Self {
        BoundValue::Bool(value)
    }
}

impl From<Value> for BoundValue {
    fn from(value: Value) -> Self {
        BoundValue::Json(value)
    }
}

impl<T: Into<BoundValue>> From<Option<T>> for BoundValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(BoundValue::Null, Into::into)
    }
}

/// Coerce a form value for a boolean column: `"1"` → true, `"0"` → false,
/// anything else → null.
pub fn coerce_boolean(value: &str) -> BoundValue {
    match value {
        "1" => BoundValue::Bool(true),
        "0" => BoundValue::Bool(false),
        _ => BoundValue::Null,
    }
}
