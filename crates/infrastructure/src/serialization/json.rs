//! JSON helpers

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Serializer;
use serde_json::ser::PrettyFormatter;
use thiserror::Error;

/// Errors from JSON conversion.
#[derive(Debug, Error)]
pub enum SerializationError {
    /// JSON serialization failed.
    #[error("JSON serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// JSON deserialization failed.
    #[error("JSON deserialization failed: {0}")]
    Deserialize(serde_json::Error),

    /// UTF-8 encoding error.
    #[error("UTF-8 encoding error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Serializes a value to pretty JSON with a trailing newline.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json_stable<T: Serialize + ?Sized>(value: &T) -> Result<String, SerializationError> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"  ");
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;

    let mut json = String::from_utf8(buffer)?;
    json.push('\n');
    Ok(json)
}

/// Deserializes JSON from a string.
///
/// # Errors
///
/// Returns an error if the JSON is invalid or doesn't match the expected type.
pub fn from_json<T: DeserializeOwned>(json: &str) -> Result<T, SerializationError> {
    serde_json::from_str(json).map_err(SerializationError::Deserialize)
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use courier_domain::{Environment, Variable};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_trailing_newline_and_indent() {
        let env = Environment::with_id("e1", "Dev").with_variable("A", "1");
        let json = to_json_stable(&env).expect("serialization should work");
        assert!(json.ends_with("}\n"));
        assert!(json.contains("\n  \"name\": \"Dev\""));
    }

    #[test]
    fn test_field_order_is_declaration_order() {
        let env = Environment::with_id("e1", "Dev");
        let json = to_json_stable(&env).expect("serialization should work");
        let id = json.find("\"id\"").expect("id");
        let name = json.find("\"name\"").expect("name");
        let variables = json.find("\"variables\"").expect("variables");
        assert!(id < name && name < variables);
    }

    #[test]
    fn test_from_json() {
        let variables: Vec<Variable> =
            from_json(r#"[{"key":"A","value":"1"}]"#).expect("deserialization should work");
        assert_eq!(variables, vec![Variable::new("A", "1")]);
        assert!(from_json::<Vec<Variable>>("{").is_err());
    }
}
