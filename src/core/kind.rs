//! Purpose: Name the runtime shapes a JSON endpoint value can take.
//! Exports: `ValueKind`.
//! Role: Shared tag vocabulary for accessor type checks and error reports.
//! Invariants: Tags are human-readable and stable ("string", "numeric", ...).

use serde_json::Value;
use std::fmt;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ValueKind {
    String,
    Numeric,
    Boolean,
    Array,
    Map,
    Null,
}

impl ValueKind {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::String(_) => ValueKind::String,
            Value::Number(_) => ValueKind::Numeric,
            Value::Bool(_) => ValueKind::Boolean,
            Value::Array(_) => ValueKind::Array,
            Value::Object(_) => ValueKind::Map,
            Value::Null => ValueKind::Null,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ValueKind::String => "string",
            ValueKind::Numeric => "numeric",
            ValueKind::Boolean => "boolean",
            ValueKind::Array => "array",
            ValueKind::Map => "map",
            ValueKind::Null => "null",
        }
    }

    pub(crate) fn with_article(self) -> &'static str {
        match self {
            ValueKind::String => "a string",
            ValueKind::Numeric => "a number",
            ValueKind::Boolean => "a boolean",
            ValueKind::Array => "an array",
            ValueKind::Map => "a map",
            ValueKind::Null => "null",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
