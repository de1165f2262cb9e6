//! JSON model conversion errors.

use thiserror::Error;

use super::{ArgumentError, ValidationError};

/// Errors from [`JsonModel::from_json_str`](crate::JsonModel::from_json_str).
#[derive(Debug, Error)]
pub enum JsonModelError {
    /// The input text was empty.
    #[error(transparent)]
    Argument(#[from] ArgumentError),

    /// The input text was not a valid model.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl JsonModelError {
    /// Returns `true` if the input was present but could not be parsed.
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::Validation(err) if err.is_parse_error())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argument_error_is_transparent() {
        let err = JsonModelError::from(ArgumentError::empty("json"));
        assert_eq!(err.to_string(), "Argument `json` must not be empty");
        assert!(!err.is_parse_error());
    }

    #[test]
    fn test_validation_parse_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = JsonModelError::from(ValidationError::JsonParse(json_err));
        assert!(err.is_parse_error());
        assert!(err.to_string().starts_with("JSON parse error"));
    }
}
