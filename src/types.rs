//! Scalar value types bound as statement parameters
//!
//! Includes [`SqlValue`], the tagged union carried by clause fragments, and
//! [`ScalarKind`], the storage kind of a column.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, Serializer};

// ============================================================================
// Scalar Kinds
// ============================================================================

/// Storage kind of a column
///
/// Used to type-check incoming JSON scalars and to give NULL parameters a
/// concrete PostgreSQL type when they are bound. The company and job fields
/// only use text, integer and numeric columns; float and boolean cover the
/// rest of the JSON scalars a [`FilterSpec`](crate::FilterSpec) operand may
/// carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarKind {
    /// TEXT / VARCHAR
    Text,
    /// INTEGER (32-bit)
    Integer,
    /// DOUBLE PRECISION
    Float,
    /// NUMERIC
    Numeric,
    /// BOOLEAN
    Boolean,
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScalarKind::Text => "string",
            ScalarKind::Integer => "integer",
            ScalarKind::Float => "number",
            ScalarKind::Numeric => "decimal",
            ScalarKind::Boolean => "boolean",
        };
        f.write_str(name)
    }
}

// ============================================================================
// Values
// ============================================================================

/// A single bound parameter value
///
/// Serializes as the plain JSON scalar, so a NULL of any kind becomes `null`.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    /// SQL NULL, typed with the kind of the column it is bound to
    Null(ScalarKind),
    Bool(bool),
    Int(i64),
    Float(f64),
    Decimal(Decimal),
    Text(String),
}

impl SqlValue {
    /// Convert a JSON scalar into a value for a column of the given kind
    ///
    /// Rejects arrays, objects and scalars that do not fit the column kind.
    /// Numeric columns accept both JSON numbers and numeric strings.
    pub fn from_json(value: &serde_json::Value, kind: ScalarKind) -> Result<Self, String> {
        use serde_json::Value;

        match (kind, value) {
            (_, Value::Null) => Ok(SqlValue::Null(kind)),
            (ScalarKind::Text, Value::String(s)) => Ok(SqlValue::Text(s.clone())),
            (ScalarKind::Integer, Value::Number(n)) => n
                .as_i64()
                .ok_or_else(|| format!("Cannot convert '{}' to integer", n))
                .and_then(|i| {
                    i32::try_from(i)
                        .map(|_| SqlValue::Int(i))
                        .map_err(|_| format!("Integer {} is out of range", i))
                }),
            (ScalarKind::Float, Value::Number(n)) => n
                .as_f64()
                .map(SqlValue::Float)
                .ok_or_else(|| format!("Cannot convert '{}' to number", n)),
            (ScalarKind::Numeric, Value::Number(n)) => Decimal::from_str(&n.to_string())
                .or_else(|_| Decimal::from_scientific(&n.to_string()))
                .map(SqlValue::Decimal)
                .map_err(|_| format!("Cannot convert '{}' to decimal", n)),
            (ScalarKind::Numeric, Value::String(s)) => Decimal::from_str(s)
                .map(SqlValue::Decimal)
                .map_err(|_| format!("Cannot convert '{}' to decimal", s)),
            (ScalarKind::Boolean, Value::Bool(b)) => Ok(SqlValue::Bool(*b)),
            (kind, other) => Err(format!("Expected {}, got {}", kind, json_type_name(other))),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, SqlValue::Null(_))
    }
}

impl Serialize for SqlValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SqlValue::Null(_) => serializer.serialize_none(),
            SqlValue::Bool(b) => serializer.serialize_bool(*b),
            SqlValue::Int(i) => serializer.serialize_i64(*i),
            SqlValue::Float(f) => serializer.serialize_f64(*f),
            SqlValue::Decimal(d) => Serialize::serialize(d, serializer),
            SqlValue::Text(s) => serializer.serialize_str(s),
        }
    }
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

impl From<bool> for SqlValue {
    fn from(value: bool) -> Self {
        SqlValue::Bool(value)
    }
}

impl From<i32> for SqlValue {
    fn from(value: i32) -> Self {
        SqlValue::Int(value.into())
    }
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        SqlValue::Int(value)
    }
}

impl From<f64> for SqlValue {
    fn from(value: f64) -> Self {
        SqlValue::Float(value)
    }
}

impl From<Decimal> for SqlValue {
    fn from(value: Decimal) -> Self {
        SqlValue::Decimal(value)
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        SqlValue::Text(value)
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        SqlValue::Text(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_from_json() {
        let v = SqlValue::from_json(&json!("Engineer"), ScalarKind::Text).unwrap();
        assert_eq!(v, SqlValue::Text("Engineer".to_string()));
    }

    #[test]
    fn test_integer_from_json() {
        let v = SqlValue::from_json(&json!(50000), ScalarKind::Integer).unwrap();
        assert_eq!(v, SqlValue::Int(50000));
    }

    #[test]
    fn test_integer_rejects_fraction() {
        let result = SqlValue::from_json(&json!(1.5), ScalarKind::Integer);
        assert!(result.unwrap_err().contains("integer"));
    }

    #[test]
    fn test_integer_rejects_values_beyond_int4() {
        let err = SqlValue::from_json(&json!(5_000_000_000i64), ScalarKind::Integer).unwrap_err();
        assert_eq!(err, "Integer 5000000000 is out of range");

        let max = SqlValue::from_json(&json!(i32::MAX), ScalarKind::Integer).unwrap();
        assert_eq!(max, SqlValue::Int(i32::MAX.into()));
        let min = SqlValue::from_json(&json!(i32::MIN), ScalarKind::Integer).unwrap();
        assert_eq!(min, SqlValue::Int(i32::MIN.into()));
    }

    #[test]
    fn test_numeric_from_number_and_string() {
        let from_number = SqlValue::from_json(&json!(0.05), ScalarKind::Numeric).unwrap();
        let from_string = SqlValue::from_json(&json!("0.05"), ScalarKind::Numeric).unwrap();
        assert_eq!(from_number, SqlValue::Decimal(Decimal::new(5, 2)));
        assert_eq!(from_string, from_number);
    }

    #[test]
    fn test_numeric_rejects_garbage_string() {
        assert!(SqlValue::from_json(&json!("lots"), ScalarKind::Numeric).is_err());
    }

    #[test]
    fn test_null_keeps_column_kind() {
        let v = SqlValue::from_json(&json!(null), ScalarKind::Integer).unwrap();
        assert_eq!(v, SqlValue::Null(ScalarKind::Integer));
        assert!(v.is_null());
    }

    #[test]
    fn test_type_mismatch_message() {
        let err = SqlValue::from_json(&json!(true), ScalarKind::Text).unwrap_err();
        assert_eq!(err, "Expected string, got boolean");

        let err = SqlValue::from_json(&json!({"a": 1}), ScalarKind::Integer).unwrap_err();
        assert_eq!(err, "Expected integer, got object");
    }

    #[test]
    fn test_conversions() {
        assert_eq!(SqlValue::from(1), SqlValue::Int(1));
        assert_eq!(SqlValue::from("x"), SqlValue::Text("x".to_string()));
        assert_eq!(SqlValue::from(true), SqlValue::Bool(true));
    }

    #[test]
    fn test_serializes_as_plain_scalars() {
        let values = vec![
            SqlValue::from("new name"),
            SqlValue::from(1),
            SqlValue::Null(ScalarKind::Text),
        ];
        assert_eq!(
            serde_json::to_value(&values).unwrap(),
            json!(["new name", 1, null])
        );
    }

    #[test]
    fn test_decimal_serializes_exactly() {
        let values = vec![SqlValue::Decimal(Decimal::new(5, 2)), SqlValue::from(Decimal::ONE)];
        assert_eq!(serde_json::to_value(&values).unwrap(), json!(["0.05", "1"]));
    }
}
