//! Response and model decoding errors.

use thiserror::Error;

/// Errors while decoding a response body or a JSON model.
///
/// Inside the pipeline these are logged and degrade to an envelope without
/// data; they only surface to callers through [`JsonModel`](crate::JsonModel).
#[derive(Debug, Error)]
pub enum ValidationError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// A model could not be rendered as JSON.
    #[error("JSON serialize error: {0}")]
    JsonSerialize(serde_json::Error),

    /// Empty body when content was expected.
    #[error("Empty response body")]
    EmptyBody,
}

impl ValidationError {
    /// Returns `true` if this is a parsing error.
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::JsonParse(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_parse_is_parse_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err = ValidationError::JsonParse(json_err);
        assert!(err.is_parse_error());
        assert!(err.to_string().starts_with("JSON parse error"));
    }

    #[test]
    fn test_json_serialize_is_not_parse_error() {
        let keys = std::collections::HashMap::from([((1, 2), 3)]);
        let json_err = serde_json::to_string(&keys).unwrap_err();
        let err = ValidationError::JsonSerialize(json_err);
        assert!(!err.is_parse_error());
        assert!(err.to_string().starts_with("JSON serialize error"));
    }

    #[test]
    fn test_empty_body() {
        let err = ValidationError::EmptyBody;
        assert!(!err.is_parse_error());
        assert_eq!(err.to_string(), "Empty response body");
    }
}
