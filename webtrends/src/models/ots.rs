//! The shared OTS response shape.
//!
//! Every OTS payload is an envelope with a `body`, optional `metadata` and
//! `params`. The body may embed an API error under `message` even when the
//! HTTP status is 2xx.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::ClientError;

/// Read access to an error embedded in a response body.
pub trait OtsBody {
    /// Returns the embedded API error, if the service reported one.
    fn error(&self) -> Option<&OtsError>;
}

/// A decoded OTS payload that can carry an embedded API error.
///
/// The pipeline uses this to decide whether a 2xx response was actually
/// successful.
pub trait OtsEnvelope {
    /// Returns the API error embedded in the payload, if any.
    fn embedded_error(&self) -> Option<&OtsError>;
}

/// Generic OTS response envelope.
///
/// `OtsResponse<Body>` is also the shape used to pull an error out of a
/// non-2xx response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OtsResponse<B = Body> {
    /// The response body.
    #[serde(default)]
    pub body: B,

    /// Opaque metadata string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<String>,

    /// Visitor and experiment parameters.
    #[serde(rename = "params", skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Parameters>,
}

impl<B: OtsBody> OtsEnvelope for OtsResponse<B> {
    fn embedded_error(&self) -> Option<&OtsError> {
        self.body.error()
    }
}

/// The common body: cookies to set and an optional error message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Cookies keyed by name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cookies: Option<BTreeMap<String, Cookie>>,

    /// API-level error reported by the service.
    #[serde(rename = "message", skip_serializing_if = "Option::is_none")]
    pub error: Option<OtsError>,
}

impl OtsBody for Body {
    fn error(&self) -> Option<&OtsError> {
        self.error.as_ref()
    }
}

/// An error reported by OTS, or synthesized from a transport fault.
///
/// API errors carry the service's `errorCode`/`errorMessage`. Transport
/// faults use code `0`, the fault's message, and keep the fault itself in
/// [`exception`](Self::exception), which is never serialized.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OtsError {
    /// Numeric error code.
    #[serde(rename = "errorCode", default)]
    pub error_code: i32,

    /// Human readable message.
    #[serde(rename = "errorMessage", default)]
    pub error_message: String,

    /// The underlying transport fault, for transport failures only.
    #[serde(skip)]
    pub exception: Option<Arc<ClientError>>,
}

impl OtsError {
    /// Creates an API-level error.
    pub fn new(error_code: i32, error_message: impl Into<String>) -> Self {
        Self {
            error_code,
            error_message: error_message.into(),
            exception: None,
        }
    }

    /// Wraps a transport fault, keeping its message and the fault itself.
    pub fn from_transport(fault: ClientError) -> Self {
        Self {
            error_code: 0,
            error_message: fault.to_string(),
            exception: Some(Arc::new(fault)),
        }
    }

    /// Returns the transport fault behind this error, if any.
    pub fn exception(&self) -> Option<&ClientError> {
        self.exception.as_deref()
    }

    /// Returns `true` if this error came from the transport rather than OTS.
    pub fn is_transport(&self) -> bool {
        self.exception.is_some()
    }
}

// The fault handle is diagnostic only.
impl PartialEq for OtsError {
    fn eq(&self, other: &Self) -> bool {
        self.error_code == other.error_code && self.error_message == other.error_message
    }
}

/// A cookie the caller should set for the visitor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cookie {
    /// Lifetime in seconds.
    #[serde(default)]
    pub timeout: i64,

    /// Cookie persistence.
    #[serde(rename = "type", default)]
    pub cookie_type: CookieType,

    /// Cookie value, encrypted when `_wt.encrypted` was requested.
    #[serde(default)]
    pub value: String,
}

/// How long a cookie lives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CookieType {
    /// Survives the browser session.
    #[default]
    Persisted,
    /// Cleared when the session ends.
    Session,
}

/// Visitor and experiment parameters returned alongside a body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Parameters {
    #[serde(rename = "_wt_sessionID", skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,

    #[serde(rename = "cookieDomain", skip_serializing_if = "Option::is_none")]
    pub cookie_domain: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub guid: Option<String>,

    #[serde(rename = "r_experimentID", default)]
    pub experiment_id: i64,

    #[serde(rename = "r_paused", skip_serializing_if = "Option::is_none")]
    pub paused: Option<String>,

    #[serde(rename = "r_runID", default)]
    pub run_id: i64,

    #[serde(rename = "r_runState", skip_serializing_if = "Option::is_none")]
    pub run_state: Option<String>,

    #[serde(rename = "r_testID", default)]
    pub test_id: i64,

    #[serde(rename = "r_type", skip_serializing_if = "Option::is_none")]
    pub test_type: Option<String>,

    #[serde(rename = "systemUID", skip_serializing_if = "Option::is_none")]
    pub system_uid: Option<String>,

    #[serde(rename = "testAlias", skip_serializing_if = "Option::is_none")]
    pub test_alias: Option<String>,

    #[serde(rename = "trackingGuid", skip_serializing_if = "Option::is_none")]
    pub tracking_guid: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_error_field_is_message() {
        let body: Body =
            serde_json::from_str(r#"{"message":{"errorCode":12,"errorMessage":"bad"}}"#).unwrap();
        assert_eq!(body.error(), Some(&OtsError::new(12, "bad")));
    }

    #[test]
    fn test_missing_body_defaults() {
        let response: OtsResponse = serde_json::from_str(r#"{"metadata":"m"}"#).unwrap();
        assert_eq!(response.body, Body::default());
        assert!(response.embedded_error().is_none());
        assert_eq!(response.metadata.as_deref(), Some("m"));
    }

    #[test]
    fn test_cookie_type_lowercase() {
        let cookie: Cookie =
            serde_json::from_str(r#"{"timeout":1800,"type":"session","value":"v"}"#).unwrap();
        assert_eq!(cookie.cookie_type, CookieType::Session);

        let json = serde_json::to_value(&cookie).unwrap();
        assert_eq!(json["type"], "session");
    }

    #[test]
    fn test_parameters_external_names() {
        let params: Parameters = serde_json::from_str(
            r#"{"_wt_sessionID":"s1","r_experimentID":7,"r_runID":8,"r_testID":9,"testAlias":"ta_x"}"#,
        )
        .unwrap();
        assert_eq!(params.session_id.as_deref(), Some("s1"));
        assert_eq!(params.experiment_id, 7);
        assert_eq!(params.run_id, 8);
        assert_eq!(params.test_id, 9);
        assert_eq!(params.test_alias.as_deref(), Some("ta_x"));

        let json = serde_json::to_value(&params).unwrap();
        assert!(json.get("cookieDomain").is_none());
        assert_eq!(json["_wt_sessionID"], "s1");
    }

    #[test]
    fn test_transport_error_keeps_fault() {
        let fault = ClientError::InvalidHeader {
            name: "User-Agent",
            message: "bad".to_string(),
        };
        let message = fault.to_string();
        let err = OtsError::from_transport(fault);

        assert_eq!(err.error_code, 0);
        assert_eq!(err.error_message, message);
        assert!(err.is_transport());
        assert!(matches!(err.exception(), Some(ClientError::InvalidHeader { .. })));

        let json = serde_json::to_value(&err).unwrap();
        assert!(json.get("exception").is_none());
    }
}
