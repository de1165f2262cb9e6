//! Settings and client construction errors.

use thiserror::Error;

/// Errors in client configuration.
///
/// These are fatal: they are raised when settings are validated or the
/// client is built, never per request.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// One or more required settings are empty or absent.
    #[error("Missing required settings: {}", .fields.join(", "))]
    MissingFields {
        /// Every missing setting, by configuration key.
        fields: Vec<&'static str>,
    },

    /// A configuration value could not be interpreted.
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue {
        /// The configuration key.
        key: &'static str,
        /// The raw value that was rejected.
        value: String,
    },

    /// The configuration section could not be bound to [`Settings`](crate::Settings).
    #[error("Invalid settings: {0}")]
    Binding(#[from] serde_json::Error),

    /// `OtsBaseUrl` is not an absolute URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The base URL cannot carry a path (e.g. `mailto:`).
    #[error("Base URL cannot be used for HTTP requests: {url}")]
    UnsupportedBaseUrl {
        /// The rejected URL.
        url: String,
    },

    /// The HTTP transport could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// A default header name or value was rejected.
    #[error("Invalid default header: {message}")]
    InvalidHeader {
        /// Description of the header problem.
        message: String,
    },
}

impl ConfigError {
    /// Returns the missing setting names, if this is a missing-field error.
    pub fn missing_fields(&self) -> &[&'static str] {
        match self {
            Self::MissingFields { fields } => fields,
            _ => &[],
        }
    }

    /// Creates an invalid header error.
    pub fn invalid_header(message: impl Into<String>) -> Self {
        Self::InvalidHeader {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_lists_all() {
        let err = ConfigError::MissingFields {
            fields: vec!["AccountId", "KeyToken"],
        };
        assert_eq!(err.to_string(), "Missing required settings: AccountId, KeyToken");
        assert_eq!(err.missing_fields(), &["AccountId", "KeyToken"]);
    }

    #[test]
    fn test_invalid_url() {
        let url_err = url::Url::parse("not-a-url").unwrap_err();
        let err = ConfigError::InvalidUrl(url_err);
        assert!(err.to_string().contains("Invalid URL"));
        assert!(err.missing_fields().is_empty());
    }

    #[test]
    fn test_invalid_value() {
        let err = ConfigError::InvalidValue {
            key: "WEBTRENDS_DEBUG",
            value: "maybe".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid value for WEBTRENDS_DEBUG: \"maybe\"");
    }

    #[test]
    fn test_invalid_header() {
        let err = ConfigError::invalid_header("bad name");
        assert_eq!(err.to_string(), "Invalid default header: bad name");
    }
}
