use serde_json::Value;

/// A numeric field resolved from JSON, with its unit when one was given.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldValue {
    pub value: f64,
    pub unit: Option<String>,
}

impl FieldValue {
    /// Numbers resolve directly. Arrays resolve through their first element,
    /// taking the unit from the second when it is a string. Anything else is
    /// not a value.
    pub fn from_json(json: &Value) -> Option<Self> {
        match json {
            Value::Number(n) => n.as_f64().map(|value| Self { value, unit: None }),
            Value::Array(items) => {
                let mut resolved = Self::from_json(items.first()?)?;
                if resolved.unit.is_none() {
                    resolved.unit = items.get(1).and_then(Value::as_str).map(str::to_string);
                }
                Some(resolved)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn resolves_numbers_and_arrays() {
        assert_eq!(
            FieldValue::from_json(&json!(3)),
            Some(FieldValue { value: 3.0, unit: None })
        );
        assert_eq!(
            FieldValue::from_json(&json!([1024, "MB"])),
            Some(FieldValue { value: 1024.0, unit: Some("MB".into()) })
        );
        assert_eq!(
            FieldValue::from_json(&json!([[2.5, "s"], "ignored"])),
            Some(FieldValue { value: 2.5, unit: Some("s".into()) })
        );
        assert_eq!(
            FieldValue::from_json(&json!([7])),
            Some(FieldValue { value: 7.0, unit: None })
        );
    }

    #[test]
    fn rejects_other_types() {
        assert!(FieldValue::from_json(&json!("12")).is_none());
        assert!(FieldValue::from_json(&json!([])).is_none());
        assert!(FieldValue::from_json(&json!(null)).is_none());
        assert!(FieldValue::from_json(&json!({"v": 1})).is_none());
    }
}
