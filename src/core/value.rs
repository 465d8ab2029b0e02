//! Runtime type checks over attribute values.
//!
//! Attribute values are read as [`serde_json::Value`]. `Null` is the absent
//! sentinel; every other variant is a present value with a runtime type.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Expected runtime type of an attribute value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueType {
    Integer,
    Float,
    /// Integer or float.
    Numeric,
    String,
    Boolean,
    Array,
    Object,
    /// Any present value.
    Any,
}

impl ValueType {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Integer => "Integer",
            Self::Float => "Float",
            Self::Numeric => "Numeric",
            Self::String => "String",
            Self::Boolean => "Boolean",
            Self::Array => "Array",
            Self::Object => "Object",
            Self::Any => "Any",
        }
    }

    /// Check whether `value` is of this type. Absent values never match.
    pub fn matches(&self, value: &Value) -> bool {
        match (self, value) {
            (_, Value::Null) => false,
            (Self::Any, _) => true,
            (Self::Integer, Value::Number(n)) => n.is_i64() || n.is_u64(),
            (Self::Float, Value::Number(n)) => n.is_f64(),
            (Self::Numeric, Value::Number(_)) => true,
            (Self::String, Value::String(_)) => true,
            (Self::Boolean, Value::Bool(_)) => true,
            (Self::Array, Value::Array(_)) => true,
            (Self::Object, Value::Object(_)) => true,
            _ => false,
        }
    }

    /// Runtime type of a present value, `None` for the absent sentinel.
    pub fn of(value: &Value) -> Option<ValueType> {
        match value {
            Value::Null => None,
            Value::Bool(_) => Some(Self::Boolean),
            Value::Number(n) if n.is_f64() => Some(Self::Float),
            Value::Number(_) => Some(Self::Integer),
            Value::String(_) => Some(Self::String),
            Value::Array(_) => Some(Self::Array),
            Value::Object(_) => Some(Self::Object),
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Whether a value is the absent sentinel.
pub fn is_absent(value: &Value) -> bool {
    value.is_null()
}

/// Render a value for error messages: strings raw, absent as empty, the rest
/// as JSON text.
pub fn render(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
