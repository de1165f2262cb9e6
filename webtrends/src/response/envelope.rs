//! The uniform response envelope.

use std::fmt;

use url::Url;

use crate::error::ClientError;
use crate::method::RestMethod;
use crate::models::OtsError;

/// Query parameter whose value never appears in diagnostics.
const REDACTED_PARAMETER: &str = "keyToken";

/// The outcome of a WebTrends API call.
///
/// Every network-issuing operation produces one of these, whether the call
/// succeeded, the server reported an error, or the transport failed. `T` is
/// the decoded payload type; send-only calls use `WebTrendsResponse<()>`.
///
/// `is_success()` is `true` only for a 2xx status with no embedded error.
/// A transport failure has status code `0` and an error carrying the fault.
///
/// ## Examples
///
/// ```rust,ignore
/// let response = client.ots().control().get_project("ta_home", &RequestOptions::new()).await?;
///
/// if response.is_success() {
///     for factor in response.data().map(|p| p.factors()).unwrap_or_default() {
///         println!("{} = {:?}", factor.name, factor.value);
///     }
/// } else {
///     eprintln!("{response}");
/// }
/// ```
#[derive(Debug, Clone)]
pub struct WebTrendsResponse<T = ()> {
    request_method: RestMethod,
    request_uri: Url,
    success: bool,
    status_code: u16,
    data: Option<T>,
    error: Option<OtsError>,
    request_content: Option<String>,
    response_content: Option<String>,
}

impl<T> WebTrendsResponse<T> {
    /// Builds an envelope for a call that received an HTTP response.
    ///
    /// An embedded error always forces `success` to `false`.
    pub(crate) fn new(
        request_method: RestMethod,
        request_uri: Url,
        status_code: u16,
        http_success: bool,
        data: Option<T>,
        error: Option<OtsError>,
    ) -> Self {
        Self {
            request_method,
            request_uri,
            success: http_success && error.is_none(),
            status_code,
            data,
            error,
            request_content: None,
            response_content: None,
        }
    }

    /// Builds an envelope for a call that never produced a usable response.
    pub(crate) fn transport_failure(
        request_method: RestMethod,
        request_uri: Url,
        fault: ClientError,
    ) -> Self {
        Self::new(
            request_method,
            request_uri,
            0,
            false,
            None,
            Some(OtsError::from_transport(fault)),
        )
    }

    /// Attaches captured request and response text.
    pub(crate) fn with_content(
        mut self,
        request_content: Option<String>,
        response_content: Option<String>,
    ) -> Self {
        self.request_content = request_content;
        self.response_content = response_content;
        self
    }

    /// HTTP method of the request that produced this response.
    pub fn request_method(&self) -> RestMethod {
        self.request_method
    }

    /// Absolute URI of the request, including the query string.
    pub fn request_uri(&self) -> &Url {
        &self.request_uri
    }

    /// `true` for a 2xx status with no embedded API error.
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// HTTP status code, or `0` when the transport failed.
    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    /// Decoded payload, if any.
    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    /// Consumes the envelope and returns the decoded payload.
    pub fn into_data(self) -> Option<T> {
        self.data
    }

    /// `true` when decoded data is present.
    pub fn has_data(&self) -> bool {
        self.data.is_some()
    }

    /// The API or transport error, if any.
    pub fn error(&self) -> Option<&OtsError> {
        self.error.as_ref()
    }

    /// Request body text, present only when request capture is enabled.
    pub fn request_content(&self) -> Option<&str> {
        self.request_content.as_deref()
    }

    /// Response body text, present only when response capture is enabled.
    pub fn response_content(&self) -> Option<&str> {
        self.response_content.as_deref()
    }
}

impl<T> fmt::Display for WebTrendsResponse<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.status_code)?;

        if self.data.is_some() {
            write!(f, " ({})", short_type_name::<T>())?;
        }

        write!(
            f,
            ": {} {}",
            self.request_method,
            redacted_path_and_query(&self.request_uri)
        )?;

        if let Some(error) = &self.error {
            write!(f, " - {}", error.error_message)?;
        }

        Ok(())
    }
}

/// Path and query of `uri` with credential values masked.
///
/// Pairs are kept in their encoded form; only the credential value changes.
pub(crate) fn redacted_path_and_query(uri: &Url) -> String {
    let mut rendered = uri.path().to_string();

    if let Some(query) = uri.query() {
        for (index, pair) in query.split('&').enumerate() {
            rendered.push(if index == 0 { '?' } else { '&' });
            match pair.split_once('=') {
                Some((name, _)) if name == REDACTED_PARAMETER => {
                    rendered.push_str(name);
                    rendered.push_str("=***");
                }
                _ => rendered.push_str(pair),
            }
        }
    }

    rendered
}

/// `std::any::type_name` with module paths stripped, e.g. `Vec<Project>`.
fn short_type_name<T>() -> String {
    let full = std::any::type_name::<T>();
    let mut rendered = String::with_capacity(full.len());
    let mut segment = String::new();

    for c in full.chars() {
        if c.is_alphanumeric() || c == '_' || c == ':' {
            segment.push(c);
        } else {
            rendered.push_str(segment.rsplit("::").next().unwrap_or_default());
            segment.clear();
            rendered.push(c);
        }
    }
    rendered.push_str(segment.rsplit("::").next().unwrap_or_default());

    rendered
}
