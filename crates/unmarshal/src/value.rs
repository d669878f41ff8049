//! Checked conversions from JSON values into Rust field types.
use serde_json::Value;

/// A field type that can be filled from a single query result.
///
/// Conversions never coerce across JSON types: a number is not a string and
/// `1` is not `true`.
pub trait FromValue: Sized {
    /// The type name reported when a value does not fit.
    const EXPECTED: &'static str;

    fn from_value(value: &Value) -> Option<Self>;
}

/// The JSON type name of `value`, as reported in mismatch errors.
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl FromValue for String {
    const EXPECTED: &'static str = "String";

    fn from_value(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_string)
    }
}

impl FromValue for f64 {
    const EXPECTED: &'static str = "f64";

    fn from_value(value: &Value) -> Option<Self> {
        value.as_f64()
    }
}

/// Numbers outside the `f32` range are rejected rather than becoming infinite.
impl FromValue for f32 {
    const EXPECTED: &'static str = "f32";

    fn from_value(value: &Value) -> Option<Self> {
        value
            .as_f64()
            .map(|f| f as f32)
            .filter(|f| f.is_finite())
    }
}

impl FromValue for i64 {
    const EXPECTED: &'static str = "i64";

    fn from_value(value: &Value) -> Option<Self> {
        value.as_i64()
    }
}

impl FromValue for u64 {
    const EXPECTED: &'static str = "u64";

    fn from_value(value: &Value) -> Option<Self> {
        value.as_u64()
    }
}

impl FromValue for bool {
    const EXPECTED: &'static str = "bool";

    fn from_value(value: &Value) -> Option<Self> {
        value.as_bool()
    }
}

impl FromValue for Value {
    const EXPECTED: &'static str = "Value";

    fn from_value(value: &Value) -> Option<Self> {
        Some(value.clone())
    }
}

/// `null` becomes `None`; anything else must convert to `T`.
impl<T: FromValue> FromValue for Option<T> {
    const EXPECTED: &'static str = T::EXPECTED;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Null => Some(None),
            other => T::from_value(other).map(Some),
        }
    }
}
