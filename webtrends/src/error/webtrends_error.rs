//! Top-level client error type.

use super::{ArgumentError, ConfigError};
use thiserror::Error;

/// Errors that escape a WebTrends operation.
///
/// API-level errors and transport faults are never represented here; they are
/// carried on the [`WebTrendsResponse`](crate::WebTrendsResponse) so callers
/// can inspect every remote outcome the same way.
///
/// ## Examples
///
/// ```rust,ignore
/// use webtrends::WebTrendsError;
///
/// match client.ots().control().get_project("", &options).await {
///     Ok(response) if response.is_success() => { /* use response.data() */ }
///     Ok(response) => eprintln!("OTS said no: {response}"),
///     Err(WebTrendsError::Argument(e)) => eprintln!("bad call: {e}"),
///     Err(WebTrendsError::Cancelled) => eprintln!("cancelled"),
///     Err(WebTrendsError::Config(e)) => eprintln!("bad settings: {e}"),
/// }
/// ```
#[derive(Debug, Error)]
pub enum WebTrendsError {
    /// Settings are missing or unusable.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// An operation argument was rejected before any network activity.
    #[error(transparent)]
    Argument(#[from] ArgumentError),

    /// The caller's cancellation token fired while the call was in flight.
    #[error("Operation cancelled")]
    Cancelled,
}

impl WebTrendsError {
    /// Returns `true` if the caller requested cancellation.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_error() {
        let config_err = ConfigError::MissingFields {
            fields: vec!["AccountId"],
        };
        let err: WebTrendsError = config_err.into();
        assert!(matches!(err, WebTrendsError::Config(_)));
    }

    #[test]
    fn test_from_argument_error() {
        let arg_err = ArgumentError::empty("project_alias");
        let err: WebTrendsError = arg_err.into();
        assert!(matches!(err, WebTrendsError::Argument(_)));
        assert!(!err.is_cancelled());
    }

    #[test]
    fn test_cancelled_display() {
        let err = WebTrendsError::Cancelled;
        assert!(err.is_cancelled());
        assert_eq!(err.to_string(), "Operation cancelled");
    }
}
