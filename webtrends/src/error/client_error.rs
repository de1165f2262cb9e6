//! Transport-level faults.

use thiserror::Error;

/// Faults that prevented a usable HTTP response from being obtained.
///
/// A `ClientError` is never returned to the caller directly. The pipeline
/// converts it into a failed envelope with status code `0` and keeps the
/// original fault on [`OtsError::exception`](crate::models::OtsError) for
/// diagnostics.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed due to network or protocol error.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The request payload could not be serialized to JSON.
    #[error("Request serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A header value could not be placed on the request.
    #[error("Invalid header {name}: {message}")]
    InvalidHeader {
        /// The header that was rejected.
        name: &'static str,
        /// Why the value was rejected.
        message: String,
    },
}

impl ClientError {
    /// Returns `true` if the fault was a timeout imposed by the transport.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Request(e) if e.is_timeout())
    }

    /// Returns `true` if the server could not be reached at all.
    pub fn is_connect(&self) -> bool {
        matches!(self, Self::Request(e) if e.is_connect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_header_display() {
        let err = ClientError::InvalidHeader {
            name: "User-Agent",
            message: "failed to parse header value".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid header User-Agent: failed to parse header value"
        );
        assert!(!err.is_timeout());
        assert!(!err.is_connect());
    }

    #[test]
    fn test_serialization_from() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: ClientError = json_err.into();
        assert!(err.to_string().starts_with("Request serialization failed"));
    }
}
