//! Invalid operation arguments.

use thiserror::Error;

/// Errors raised when a caller passes an unusable argument.
///
/// These are programmer errors and are reported synchronously, before a
/// request is built or sent.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArgumentError {
    /// A required string argument was empty or whitespace.
    #[error("Argument `{name}` must not be empty")]
    Empty {
        /// The name of the offending argument.
        name: &'static str,
    },
}

impl ArgumentError {
    /// Creates an empty-argument error.
    pub fn empty(name: &'static str) -> Self {
        Self::Empty { name }
    }

    /// Fails with [`ArgumentError::Empty`] when `value` is blank.
    pub(crate) fn ensure_not_empty(value: &str, name: &'static str) -> Result<(), Self> {
        if value.trim().is_empty() {
            return Err(Self::empty(name));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_display() {
        let err = ArgumentError::empty("project_alias");
        assert_eq!(err.to_string(), "Argument `project_alias` must not be empty");
    }

    #[test]
    fn test_ensure_not_empty() {
        assert!(ArgumentError::ensure_not_empty("ta_checkout", "alias").is_ok());
        assert_eq!(
            ArgumentError::ensure_not_empty("", "alias"),
            Err(ArgumentError::empty("alias"))
        );
        assert_eq!(
            ArgumentError::ensure_not_empty("   ", "alias"),
            Err(ArgumentError::empty("alias"))
        );
    }
}
