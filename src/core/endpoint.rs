//! Purpose: Hold a parsed endpoint object and expose type-checked accessors over it.
//! Exports: `Endpoint`, `EndpointValue`.
//! Role: The only path from a raw `--endpoint` JSON string to typed plugin parameters.
//! Invariants: The store is immutable after `parse`; accessors are pure lookups.
//! Invariants: Absent keys and wrong-typed keys surface as distinct error kinds.
//! Invariants: Defaults replace absent keys only; present-but-wrong values always error.
//! Notes: Accessor failures are returned, never logged, so callers own the fatal-vs-recoverable call.
#![allow(clippy::result_large_err)]

use crate::core::error::{Error, ErrorKind};
use crate::core::kind::ValueKind;
use crate::json::parse::{self, ParseFailureCategory};
use serde_json::{Map, Value};
use std::str::FromStr;

/// A type that can be read out of a single endpoint value.
///
/// Implementations check the value's runtime shape against `KIND` and copy the
/// payload out. No range or format validation happens beyond the shape check.
pub trait EndpointValue: Sized {
    const KIND: ValueKind;

    fn from_value(key: &str, value: &Value) -> Result<Self, Error>;
}

fn mismatch<T: EndpointValue>(key: &str, value: &Value) -> Error {
    Error::type_mismatch(key, T::KIND, ValueKind::of(value))
}

impl EndpointValue for String {
    const KIND: ValueKind = ValueKind::String;

    fn from_value(key: &str, value: &Value) -> Result<Self, Error> {
        match value {
            Value::String(text) => Ok(text.clone()),
            other => Err(mismatch::<Self>(key, other)),
        }
    }
}

impl EndpointValue for f64 {
    const KIND: ValueKind = ValueKind::Numeric;

    fn from_value(key: &str, value: &Value) -> Result<Self, Error> {
        match value {
            Value::Number(number) => number.as_f64().ok_or_else(|| mismatch::<Self>(key, value)),
            other => Err(mismatch::<Self>(key, other)),
        }
    }
}

impl EndpointValue for bool {
    const KIND: ValueKind = ValueKind::Boolean;

    fn from_value(key: &str, value: &Value) -> Result<Self, Error> {
        match value {
            Value::Bool(flag) => Ok(*flag),
            other => Err(mismatch::<Self>(key, other)),
        }
    }
}

/// Raw sequence; elements keep their JSON shape.
impl EndpointValue for Vec<Value> {
    const KIND: ValueKind = ValueKind::Array;

    fn from_value(key: &str, value: &Value) -> Result<Self, Error> {
        match value {
            Value::Array(items) => Ok(items.clone()),
            other => Err(mismatch::<Self>(key, other)),
        }
    }
}

/// Sequence of strings, source order preserved. A non-string element is a
/// type mismatch carrying the element index.
impl EndpointValue for Vec<String> {
    const KIND: ValueKind = ValueKind::Array;

    fn from_value(key: &str, value: &Value) -> Result<Self, Error> {
        let Value::Array(items) = value else {
            return Err(mismatch::<Self>(key, value));
        };
        items
            .iter()
            .enumerate()
            .map(|(index, item)| match item {
                Value::String(text) => Ok(text.clone()),
                other => Err(element_mismatch(key, index, ValueKind::of(other))),
            })
            .collect()
    }
}

/// One level deep; nested values stay dynamically typed.
impl EndpointValue for Map<String, Value> {
    const KIND: ValueKind = ValueKind::Map;

    fn from_value(key: &str, value: &Value) -> Result<Self, Error> {
        match value {
            Value::Object(map) => Ok(map.clone()),
            other => Err(mismatch::<Self>(key, other)),
        }
    }
}

fn element_mismatch(key: &str, index: usize, found: ValueKind) -> Error {
    Error::new(ErrorKind::TypeMismatch)
        .with_message(format!(
            "element {index} of '{key}' key in the endpoint is {}, but string was expected",
            found.with_article()
        ))
        .with_key(key)
        .with_index(index)
        .with_expected(ValueKind::String)
        .with_found(found)
}

#[derive(Clone, Debug, PartialEq)]
pub struct Endpoint {
    values: Map<String, Value>,
}

impl Endpoint {
    pub fn parse(raw: &str) -> Result<Self, Error> {
        if raw.is_empty() {
            return Err(Error::new(ErrorKind::MissingInput)
                .with_message("missing required --endpoint value")
                .with_hint("Pass the endpoint as a JSON object, e.g. --endpoint '{\"bucket\":\"nightly\"}'."));
        }

        let value: Value = parse::from_str(raw).map_err(|err| {
            let hint = parse::hint_for_error(&err, "endpoint");
            Error::new(ErrorKind::MalformedInput)
                .with_message(format!("failed to parse --endpoint value as JSON: {err}"))
                .with_hint(hint)
                .with_source(err)
        })?;

        let values = match value {
            Value::Object(values) => values,
            other => {
                let found = ValueKind::of(&other);
                return Err(Error::new(ErrorKind::MalformedInput)
                    .with_message(format!(
                        "--endpoint value must be a JSON object, found {}",
                        found.with_article()
                    ))
                    .with_found(found)
                    .with_hint(parse::hint_for_category(
                        ParseFailureCategory::NotAnObject,
                        "endpoint",
                    )));
            }
        };

        tracing::debug!(keys = values.len(), "parsed endpoint");
        Ok(Self { values })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// The parsed object as-is, for callers that need to walk it themselves.
    pub fn raw(&self) -> &Map<String, Value> {
        &self.values
    }

    fn lookup(&self, key: &str) -> Result<&Value, Error> {
        self.values.get(key).ok_or_else(|| Error::missing_key(key))
    }

    pub fn get<T: EndpointValue>(&self, key: &str) -> Result<T, Error> {
        T::from_value(key, self.lookup(key)?)
    }

    /// Like [`Endpoint::get`], but an absent key yields `default`.
    ///
    /// Every other failure, including a present key of the wrong type,
    /// is returned unchanged.
    pub fn get_or<T: EndpointValue>(&self, key: &str, default: T) -> Result<T, Error> {
        match self.get(key) {
            Ok(value) => Ok(value),
            Err(err) if err.kind().defaults_apply() => {
                let kind = T::KIND;
                tracing::trace!(key, %kind, "substituting default for absent endpoint key");
                Ok(default)
            }
            Err(err) => Err(err),
        }
    }

    pub fn string_value(&self, key: &str) -> Result<String, Error> {
        self.get(key)
    }

    pub fn string_value_default(&self, key: &str, default: impl Into<String>) -> Result<String, Error> {
        self.get_or(key, default.into())
    }

    pub fn float_value(&self, key: &str) -> Result<f64, Error> {
        self.get(key)
    }

    pub fn float_value_default(&self, key: &str, default: f64) -> Result<f64, Error> {
        self.get_or(key, default)
    }

    pub fn boolean_value(&self, key: &str) -> Result<bool, Error> {
        self.get(key)
    }

    pub fn boolean_value_default(&self, key: &str, default: bool) -> Result<bool, Error> {
        self.get_or(key, default)
    }

    pub fn array_value(&self, key: &str) -> Result<Vec<Value>, Error> {
        self.get(key)
    }

    pub fn string_array_value(&self, key: &str) -> Result<Vec<String>, Error> {
        self.get(key)
    }

    pub fn string_array_value_default(
        &self,
        key: &str,
        default: Vec<String>,
    ) -> Result<Vec<String>, Error> {
        self.get_or(key, default)
    }

    pub fn map_value(&self, key: &str) -> Result<Map<String, Value>, Error> {
        self.get(key)
    }
}

impl FromStr for Endpoint {
    type Err = Error;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::parse(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::Endpoint;
    use crate::core::error::ErrorKind;
    use crate::core::kind::ValueKind;
    use serde_json::Value;

    fn endpoint(raw: &str) -> Endpoint {
        Endpoint::parse(raw).expect("valid endpoint")
    }

    #[test]
    fn null_is_present_but_never_matches() {
        let ep = endpoint(r#"{"token": null}"#);
        let err = ep.string_value_default("token", "anon").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
        assert_eq!(err.found(), Some(ValueKind::Null));
        assert_eq!(err.expected(), Some(ValueKind::String));
    }

    #[test]
    fn string_array_rejects_non_string_elements_with_index() {
        let ep = endpoint(r#"{"paths": ["/etc", 7, "/var"]}"#);
        for err in [
            ep.string_array_value("paths").unwrap_err(),
            ep.string_array_value_default("paths", vec!["/".to_string()])
                .unwrap_err(),
        ] {
            assert_eq!(err.kind(), ErrorKind::TypeMismatch);
            assert_eq!(err.key(), Some("paths"));
            assert_eq!(err.index(), Some(1));
            assert_eq!(err.found(), Some(ValueKind::Numeric));
        }
    }

    #[test]
    fn raw_array_keeps_element_shapes() {
        let ep = endpoint(r#"{"mixed": ["a", 1, false]}"#);
        let items = ep.array_value("mixed").expect("array");
        assert_eq!(items, vec![Value::from("a"), Value::from(1), Value::from(false)]);

        let err = ep.array_value("missing").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingKey);
    }

    #[test]
    fn map_value_has_expected_kind_tag() {
        let ep = endpoint(r#"{"opts": [1]}"#);
        let err = ep.map_value("opts").unwrap_err();
        assert_eq!(err.expected(), Some(ValueKind::Map));
        assert_eq!(err.found(), Some(ValueKind::Array));
    }

    #[test]
    fn integers_read_as_floats_without_narrowing() {
        let ep = endpoint(r#"{"retries": 3, "ratio": 0.25, "big": 18446744073709551615}"#);
        assert_eq!(ep.float_value("retries").unwrap(), 3.0);
        assert_eq!(ep.float_value("ratio").unwrap(), 0.25);
        assert_eq!(ep.float_value("big").unwrap(), 18446744073709551615u64 as f64);
    }

    #[test]
    fn inspection_reports_keys() {
        let ep = endpoint(r#"{"b": 1, "a": true}"#);
        assert_eq!(ep.len(), 2);
        assert!(!ep.is_empty());
        assert!(ep.contains_key("a"));
        assert!(!ep.contains_key("c"));
        let mut keys: Vec<&str> = ep.keys().collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(ep.raw().get("b"), Some(&Value::from(1)));
        assert!(endpoint("{}").is_empty());
    }

    #[test]
    fn duplicate_keys_keep_last_value() {
        let ep = endpoint(r#"{"mode": "full", "mode": "incremental"}"#);
        assert_eq!(ep.string_value("mode").unwrap(), "incremental");
    }

    #[test]
    fn from_str_matches_parse() {
        let ep: Endpoint = r#"{"x": "y"}"#.parse().expect("parse");
        assert_eq!(ep, endpoint(r#"{"x": "y"}"#));
        let err = "".parse::<Endpoint>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingInput);
    }

    #[test]
    fn endpoint_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Endpoint>();
    }
}
