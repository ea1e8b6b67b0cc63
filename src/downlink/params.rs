//! Parameter extraction from JSON command requests
//!
//! Network servers hand downlink requests over as loosely typed JSON. These
//! helpers turn a `serde_json::Value` into the typed arguments of the command
//! builders, producing the same validation messages the builders would.

use serde_json::{Map, Value};

use crate::downlink::EncodeError;

static NULL: Value = Value::Null;

/// Top-level request field, `Null` when absent
pub fn field<'a>(request: &'a Map<String, Value>, key: &str) -> &'a Value {
    request.get(key).unwrap_or(&NULL)
}

/// Nested field of a compound command, `Null` when absent or when the parent
/// is not an object
pub fn child<'a>(parent: &'a Value, key: &str) -> &'a Value {
    parent.get(key).unwrap_or(&NULL)
}

/// Any JSON number
pub fn number(name: &'static str, value: &Value) -> Result<f64, EncodeError> {
    value
        .as_f64()
        .ok_or(EncodeError::NotANumber { field: name })
}

/// One of an explicit set of integers; anything else, including non-numbers,
/// is rejected with the set listed
pub fn choice(name: &'static str, value: &Value, allowed: &'static [i64]) -> Result<i64, EncodeError> {
    let rejected = EncodeError::NotOneOf {
        field: name,
        allowed,
    };
    let n = value.as_f64().ok_or_else(|| rejected.clone())?;
    allowed
        .iter()
        .copied()
        .find(|candidate| *candidate as f64 == n)
        .ok_or(rejected)
}

/// Optional number where absence, `null` and `0` all mean "not given"
pub fn optional_number(name: &'static str, value: &Value) -> Result<Option<f64>, EncodeError> {
    if value.is_null() {
        return Ok(None);
    }
    let n = number(name, value)?;
    Ok((n != 0.0).then_some(n))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_number() {
        assert_eq!(number("x", &json!(1.5)), Ok(1.5));
        assert_eq!(number("x", &json!(20)), Ok(20.0));
        assert_eq!(number("x", &json!("1")), Err(EncodeError::NotANumber { field: "x" }));
        assert_eq!(number("x", &Value::Null), Err(EncodeError::NotANumber { field: "x" }));
    }

    #[test]
    fn test_choice() {
        const MODES: &[i64] = &[0, 1, 2];
        assert_eq!(choice("mode", &json!(2), MODES), Ok(2));
        assert_eq!(choice("mode", &json!(2.0), MODES), Ok(2));
        let err = choice("mode", &json!(true), MODES).unwrap_err();
        assert_eq!(err.to_string(), "mode must be one of 0, 1, 2");
        assert!(choice("mode", &json!(3), MODES).is_err());
    }

    #[test]
    fn test_child_of_non_object() {
        assert!(child(&json!(5), "mode").is_null());
        assert_eq!(child(&json!({ "mode": 1 }), "mode"), &json!(1));
    }

    #[test]
    fn test_optional_number() {
        assert_eq!(optional_number("end", &Value::Null), Ok(None));
        assert_eq!(optional_number("end", &json!(0)), Ok(None));
        assert_eq!(optional_number("end", &json!(60)), Ok(Some(60.0)));
        assert_eq!(optional_number("end", &json!(60.5)), Ok(Some(60.5)));
        assert!(optional_number("end", &json!("soon")).is_err());
    }
}
