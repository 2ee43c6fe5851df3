use chrono::{NaiveDate, NaiveDateTime};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{CoreError, Result};

/// A single field value handed to the rule engine.
///
/// Callers usually build these from JSON or from native Rust values. `Date` and
/// `DateTime` carry values that were already parsed upstream; date rules accept them
/// directly instead of re-parsing a string.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(untagged)]
pub enum InputValue {
    #[default]
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

static NULL: InputValue = InputValue::Null;

impl InputValue {
    /// True for `Null`. An empty string is a present value, not nil.
    pub fn is_nil(&self) -> bool {
        matches!(self, InputValue::Null)
    }

    /// Extract as string slice, returning None for anything but `Text`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            InputValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Decimal/lexical string form of the value, or None for `Null`.
    ///
    /// Floats use the shortest round-trip representation, so `123.40` renders as
    /// `123.4` and `123.0` as `123`. Magnitudes from `1e21` up, and non-zero ones
    /// below `1e-6`, switch to exponent form (`1e+21`, `1e-7`).
    pub fn to_lexical(&self) -> Option<String> {
        match self {
            InputValue::Null => None,
            InputValue::Boolean(b) => Some(b.to_string()),
            InputValue::Integer(i) => Some(i.to_string()),
            InputValue::Float(f) => Some(float_lexical(*f)),
            InputValue::Text(s) => Some(s.clone()),
            InputValue::Date(d) => Some(d.format("%Y-%m-%d").to_string()),
            InputValue::DateTime(dt) => Some(dt.format("%Y-%m-%dT%H:%M:%S").to_string()),
        }
    }
}

fn float_lexical(f: f64) -> String {
    let magnitude = f.abs();
    if !f.is_finite() || magnitude == 0.0 || (1e-6..1e21).contains(&magnitude) {
        return f.to_string();
    }
    let exp = format!("{f:e}");
    match exp.split_once('e') {
        Some((mantissa, power)) if !power.starts_with('-') => format!("{mantissa}e+{power}"),
        _ => exp,
    }
}

impl From<serde_json::Value> for InputValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => InputValue::Null,
            Value::Bool(b) => InputValue::Boolean(b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    InputValue::Integer(i)
                } else if let Some(f) = n.as_f64() {
                    InputValue::Float(f)
                } else {
                    InputValue::Text(n.to_string())
                }
            }
            Value::String(s) => InputValue::Text(s),
            other => InputValue::Text(other.to_string()),
        }
    }
}

impl<'de> Deserialize<'de> for InputValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(InputValue::from)
    }
}

impl From<&str> for InputValue {
    fn from(s: &str) -> Self {
        InputValue::Text(s.to_string())
    }
}

impl From<String> for InputValue {
    fn from(s: String) -> Self {
        InputValue::Text(s)
    }
}

impl From<i64> for InputValue {
    fn from(i: i64) -> Self {
        InputValue::Integer(i)
    }
}

impl From<i32> for InputValue {
    fn from(i: i32) -> Self {
        InputValue::Integer(i64::from(i))
    }
}

impl From<f64> for InputValue {
    fn from(f: f64) -> Self {
        InputValue::Float(f)
    }
}

impl From<bool> for InputValue {
    fn from(b: bool) -> Self {
        InputValue::Boolean(b)
    }
}

impl From<NaiveDate> for InputValue {
    fn from(d: NaiveDate) -> Self {
        InputValue::Date(d)
    }
}

impl From<NaiveDateTime> for InputValue {
    fn from(dt: NaiveDateTime) -> Self {
        InputValue::DateTime(dt)
    }
}

impl<T: Into<InputValue>> From<Option<T>> for InputValue {
    fn from(opt: Option<T>) -> Self {
        opt.map(Into::into).unwrap_or(InputValue::Null)
    }
}

/// Field name to value mapping for one validation call. Field order is preserved.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct InputRecord {
    fields: IndexMap<String, InputValue>,
}

impl InputRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<InputValue>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<InputValue>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Value for `field`; an absent field reads as `Null`.
    pub fn get(&self, field: &str) -> &InputValue {
        self.fields.get(field).unwrap_or(&NULL)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &InputValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Build a record from a JSON object.
    pub fn from_json(value: serde_json::Value) -> Result<Self> {
        match value {
            serde_json::Value::Object(map) => Ok(map
                .into_iter()
                .map(|(k, v)| (k, InputValue::from(v)))
                .collect()),
            other => Err(CoreError::NotAnObject(json_kind(&other).to_string())),
        }
    }

    /// Parse a record from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(s)?;
        Self::from_json(value)
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

impl<K: Into<String>, V: Into<InputValue>> FromIterator<(K, V)> for InputRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = InputRecord::new();
        for (k, v) in iter {
            record.insert(k, v);
        }
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn absent_field_reads_as_null() {
        let record = InputRecord::new().with("count", 3);
        assert_eq!(record.get("count"), &InputValue::Integer(3));
        assert!(record.get("missing").is_nil());
        assert!(!record.contains("missing"));
    }

    #[test]
    fn json_numbers_keep_their_kind() {
        let record = InputRecord::from_json(json!({
            "a": 123,
            "b": -123,
            "c": 123.40,
            "d": "123",
            "e": null,
        }))
        .unwrap();

        assert_eq!(record.get("a"), &InputValue::Integer(123));
        assert_eq!(record.get("b"), &InputValue::Integer(-123));
        assert_eq!(record.get("c"), &InputValue::Float(123.4));
        assert_eq!(record.get("d"), &InputValue::Text("123".into()));
        assert!(record.get("e").is_nil());
    }

    #[test]
    fn lexical_forms() {
        assert_eq!(InputValue::Float(123.40).to_lexical().as_deref(), Some("123.4"));
        assert_eq!(InputValue::Float(123.0).to_lexical().as_deref(), Some("123"));
        assert_eq!(InputValue::Integer(-7).to_lexical().as_deref(), Some("-7"));
        assert_eq!(InputValue::Text(String::new()).to_lexical().as_deref(), Some(""));
        assert_eq!(InputValue::Null.to_lexical(), None);
    }

    #[test]
    fn extreme_floats_use_exponent_form() {
        assert_eq!(InputValue::Float(1e21).to_lexical().as_deref(), Some("1e+21"));
        assert_eq!(InputValue::Float(-1.5e300).to_lexical().as_deref(), Some("-1.5e+300"));
        assert_eq!(InputValue::Float(1e-7).to_lexical().as_deref(), Some("1e-7"));
        assert_eq!(InputValue::Float(1e20).to_lexical().as_deref(), Some("100000000000000000000"));
    }

    #[test]
    fn non_object_json_is_rejected() {
        let err = InputRecord::from_json(json!([1, 2])).unwrap_err();
        assert!(matches!(err, CoreError::NotAnObject(kind) if kind == "array"));
    }

    #[test]
    fn deserializes_from_json_text() {
        let record: InputRecord =
            serde_json::from_str(r#"{"when": "01/02/2015", "n": 4}"#).unwrap();
        assert_eq!(record.len(), 2);
        assert_eq!(record.get("when").as_str(), Some("01/02/2015"));
    }

    #[test]
    fn option_conversion() {
        let none: Option<i64> = None;
        assert!(InputValue::from(none).is_nil());
        assert_eq!(InputValue::from(Some("x")), InputValue::Text("x".into()));
    }
}
