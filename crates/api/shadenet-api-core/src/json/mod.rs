use serde_json::Value as JsonValue;
use thiserror::Error;

/// Errors produced while normalizing JSON literals.
#[derive(Debug, Error, PartialEq)]
pub enum JsonError {
    #[error("literal array element {index} is not a number")]
    NonNumericElement { index: usize },
    #[error("unsupported literal json: {0}")]
    Unsupported(String),
}

/// Normalize a JSON literal into the whitespace-delimited tuple text read by
/// socket literals. Accepts shorthand such as `0.5`, `[0.8, 0.8, 0.8]`,
/// `"0.8 0.8 0.8 1"`, `true`, and tagged objects like `{ "color": [1, 0, 0] }`
/// or `{ "float": 0.5 }`. Strings pass through untouched so text sockets keep
/// their contents.
pub fn literal_text(value: &JsonValue) -> Result<String, JsonError> {
    match value {
        JsonValue::Number(n) => Ok(n.to_string()),
        JsonValue::Bool(b) => Ok(if *b { "1" } else { "0" }.to_string()),
        JsonValue::String(s) => Ok(s.clone()),
        JsonValue::Array(items) => {
            let mut parts = Vec::with_capacity(items.len());
            for (index, item) in items.iter().enumerate() {
                match item {
                    JsonValue::Number(n) => parts.push(n.to_string()),
                    _ => return Err(JsonError::NonNumericElement { index }),
                }
            }
            Ok(parts.join(" "))
        }
        JsonValue::Object(obj) => {
            for key in ["color", "vec4", "vec3", "float", "value", "text"] {
                if let Some(inner) = obj.get(key) {
                    return literal_text(inner);
                }
            }
            Err(JsonError::Unsupported(value.to_string()))
        }
        JsonValue::Null => Err(JsonError::Unsupported("null".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn it_should_join_numeric_arrays() {
        assert_eq!(literal_text(&json!([0.8, 0.5, 1])).unwrap(), "0.8 0.5 1");
    }

    #[test]
    fn it_should_unwrap_tagged_objects() {
        assert_eq!(literal_text(&json!({ "color": [1, 0, 0] })).unwrap(), "1 0 0");
        assert_eq!(literal_text(&json!({ "float": 0.25 })).unwrap(), "0.25");
    }

    #[test]
    fn it_should_pass_strings_and_scalars_through() {
        assert_eq!(literal_text(&json!("0.1 0.2")).unwrap(), "0.1 0.2");
        assert_eq!(literal_text(&json!(2)).unwrap(), "2");
        assert_eq!(literal_text(&json!(true)).unwrap(), "1");
    }

    #[test]
    fn it_should_reject_mixed_arrays_and_null() {
        assert_eq!(
            literal_text(&json!([1, "a"])),
            Err(JsonError::NonNumericElement { index: 1 })
        );
        assert!(matches!(
            literal_text(&JsonValue::Null),
            Err(JsonError::Unsupported(_))
        ));
    }
}
