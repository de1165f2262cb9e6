//! Decode strategies for response bodies.
//!
//! The [`ResponseShape`] trait defines how a 2xx body becomes typed data and
//! where an embedded API error lives in that data. Non-2xx bodies are always
//! read as the generic [`OtsResponse`] to extract the service error.

use std::marker::PhantomData;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::ValidationError;
use crate::models::{OtsEnvelope, OtsError, OtsResponse};

/// Trait for response decoding strategies.
///
/// ## Examples
///
/// ```rust,ignore
/// use webtrends::response::{Many, Single};
/// use webtrends::models::Project;
///
/// let one = client.execute::<Single<Project>, _>(&request, None).await?;
/// let all = client.execute::<Many<Project>, _>(&request, None).await?;
/// ```
pub trait ResponseShape {
    /// The decoded data type.
    type Output;

    /// Whether a 2xx body is decoded at all.
    const DECODES_BODY: bool = true;

    /// Parse a 2xx response body.
    fn parse(body: &[u8]) -> Result<Self::Output, ValidationError>;

    /// The API error embedded in decoded data, if any.
    fn embedded_error(output: &Self::Output) -> Option<&OtsError>;

    /// Data reported when a 2xx body cannot be decoded.
    fn empty() -> Option<Self::Output> {
        None
    }
}

/// Send-only calls: a 2xx body is never parsed.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoContent;

impl ResponseShape for NoContent {
    type Output = ();

    const DECODES_BODY: bool = false;

    fn parse(_body: &[u8]) -> Result<Self::Output, ValidationError> {
        Ok(())
    }

    fn embedded_error(_output: &Self::Output) -> Option<&OtsError> {
        None
    }
}

/// A single JSON object.
///
/// ## Type Parameters
///
/// - `T`: The payload type. Its embedded error decides success on a 2xx.
#[derive(Debug, Clone, Copy)]
pub struct Single<T>(PhantomData<T>);

impl<T: DeserializeOwned + OtsEnvelope> ResponseShape for Single<T> {
    type Output = T;

    fn parse(body: &[u8]) -> Result<Self::Output, ValidationError> {
        if is_blank(body) {
            return Err(ValidationError::EmptyBody);
        }
        serde_json::from_slice(body).map_err(ValidationError::JsonParse)
    }

    fn embedded_error(output: &Self::Output) -> Option<&OtsError> {
        output.embedded_error()
    }
}

/// A JSON array of objects.
///
/// An empty, `null` or unreadable body yields an empty list. Only the first
/// element is consulted for an embedded error.
#[derive(Debug, Clone, Copy)]
pub struct Many<T>(PhantomData<T>);

impl<T: DeserializeOwned + OtsEnvelope> ResponseShape for Many<T> {
    type Output = Vec<T>;

    fn parse(body: &[u8]) -> Result<Self::Output, ValidationError> {
        if is_blank(body) {
            return Ok(Vec::new());
        }
        let items: Option<Vec<T>> =
            serde_json::from_slice(body).map_err(ValidationError::JsonParse)?;
        Ok(items.unwrap_or_default())
    }

    fn embedded_error(output: &Self::Output) -> Option<&OtsError> {
        output.first().and_then(OtsEnvelope::embedded_error)
    }

    fn empty() -> Option<Self::Output> {
        Some(Vec::new())
    }
}

/// Decoded data and error for a received response.
#[derive(Debug)]
pub(crate) struct Decoded<O> {
    pub data: Option<O>,
    pub error: Option<OtsError>,
}

/// Applies shape `S` to a response with `status` and `body`.
pub(crate) fn decode<S: ResponseShape>(status: StatusCode, body: &[u8]) -> Decoded<S::Output> {
    if !status.is_success() {
        return Decoded {
            data: None,
            error: decode_service_error(body),
        };
    }

    if !S::DECODES_BODY {
        return Decoded {
            data: None,
            error: None,
        };
    }

    match S::parse(body) {
        Ok(output) => {
            let error = S::embedded_error(&output).cloned();
            Decoded {
                data: Some(output),
                error,
            }
        }
        Err(ValidationError::EmptyBody) => {
            debug!(status = status.as_u16(), "empty OTS response body");
            Decoded {
                data: S::empty(),
                error: None,
            }
        }
        Err(error) => {
            warn!(status = status.as_u16(), %error, "unreadable OTS response body");
            // A single error envelope can arrive where a list or project was expected.
            Decoded {
                data: S::empty(),
                error: decode_service_error(body),
            }
        }
    }
}

/// Reads the service error out of a generic OTS envelope body.
fn decode_service_error(body: &[u8]) -> Option<OtsError> {
    if is_blank(body) {
        return None;
    }

    match serde_json::from_slice::<OtsResponse>(body) {
        Ok(response) => response.body.error,
        Err(error) => {
            debug!(%error, "error response body is not an OTS envelope");
            None
        }
    }
}

fn is_blank(body: &[u8]) -> bool {
    body.iter().all(u8::is_ascii_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Project;

    const PROJECT_WITH_ERROR: &str =
        r#"{"body":{"message":{"errorCode":12,"errorMessage":"bad"}}}"#;
    const PROJECT_OK: &str =
        r#"{"body":{"factors":[{"name":"headline","operation":1,"value":"Hi"}]},"guid":"g"}"#;

    #[test]
    fn test_no_content_never_parses() {
        let decoded = decode::<NoContent>(StatusCode::OK, b"not json at all");
        assert!(decoded.data.is_none());
        assert!(decoded.error.is_none());
    }

    #[test]
    fn test_no_content_reads_error_on_failure() {
        let decoded = decode::<NoContent>(StatusCode::BAD_REQUEST, PROJECT_WITH_ERROR.as_bytes());
        assert_eq!(decoded.error, Some(OtsError::new(12, "bad")));
    }

    #[test]
    fn test_single_parses_data() {
        let decoded = decode::<Single<Project>>(StatusCode::OK, PROJECT_OK.as_bytes());
        let project = decoded.data.unwrap();
        assert_eq!(project.factors().len(), 1);
        assert_eq!(project.guid.as_deref(), Some("g"));
        assert!(decoded.error.is_none());
    }

    #[test]
    fn test_single_surfaces_embedded_error() {
        let decoded = decode::<Single<Project>>(StatusCode::OK, PROJECT_WITH_ERROR.as_bytes());
        assert!(decoded.data.is_some());
        assert_eq!(decoded.error, Some(OtsError::new(12, "bad")));
    }

    #[test]
    fn test_single_unreadable_body_has_no_data() {
        let decoded = decode::<Single<Project>>(StatusCode::OK, b"<html>");
        assert!(decoded.data.is_none());
        assert!(decoded.error.is_none());
    }

    #[test]
    fn test_many_empty_and_null_bodies() {
        for body in [&b""[..], b"  ", b"null", b"[]"] {
            let decoded = decode::<Many<Project>>(StatusCode::OK, body);
            assert_eq!(decoded.data, Some(Vec::new()));
            assert!(decoded.error.is_none());
        }
    }

    #[test]
    fn test_many_reads_error_from_first_element_only() {
        let body = format!("[{PROJECT_OK},{PROJECT_WITH_ERROR}]");
        let decoded = decode::<Many<Project>>(StatusCode::OK, body.as_bytes());
        assert_eq!(decoded.data.as_ref().map(Vec::len), Some(2));
        assert!(decoded.error.is_none());

        let body = format!("[{PROJECT_WITH_ERROR},{PROJECT_OK}]");
        let decoded = decode::<Many<Project>>(StatusCode::OK, body.as_bytes());
        assert_eq!(decoded.error, Some(OtsError::new(12, "bad")));
    }

    #[test]
    fn test_many_unreadable_body_is_empty() {
        let decoded = decode::<Many<Project>>(StatusCode::OK, b"{oops");
        assert_eq!(decoded.data, Some(Vec::new()));
    }

    #[test]
    fn test_many_reads_error_from_single_object_body() {
        let body = br#"{"body":{"message":{"errorCode":401,"errorMessage":"bad key"}}}"#;
        let decoded = decode::<Many<Project>>(StatusCode::OK, body);
        assert_eq!(decoded.data, Some(Vec::new()));
        assert_eq!(decoded.error, Some(OtsError::new(401, "bad key")));
    }

    #[test]
    fn test_failure_without_body_has_no_error() {
        let decoded = decode::<Single<Project>>(StatusCode::NOT_FOUND, b"");
        assert!(decoded.data.is_none());
        assert!(decoded.error.is_none());
    }

    #[test]
    fn test_failure_never_decodes_data() {
        let decoded = decode::<Many<Project>>(StatusCode::INTERNAL_SERVER_ERROR, b"[]");
        assert!(decoded.data.is_none());
    }
}
