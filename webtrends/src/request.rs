//! The request envelope handed to the pipeline.

use crate::method::RestMethod;
use crate::primitives::{PathString, QueryString};

/// A request to a WebTrends API resource.
///
/// `T` is the payload type; the payload-less form is `WebTrendsRequest<()>`.
/// A JSON body is only sent once a payload is attached with
/// [`with_data`](Self::with_data). Values are fixed once built.
///
/// ## Examples
///
/// ```rust
/// use webtrends::{QueryString, RestMethod, WebTrendsRequest};
///
/// let request = WebTrendsRequest::new(RestMethod::Post, "/ots/api/rest-1.2/control/a1")
///     .with_query(QueryString::create("debug", "false"))
///     .with_user_agent("my-agent/1.0")
///     .with_data(serde_json::json!({ "url": "https://www.example.com" }));
///
/// assert_eq!(request.resource().as_str(), "/ots/api/rest-1.2/control/a1");
/// assert!(request.data().is_some());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct WebTrendsRequest<T = ()> {
    method: RestMethod,
    resource: PathString,
    query: Option<QueryString>,
    user_agent: Option<String>,
    data: Option<T>,
}

impl WebTrendsRequest<()> {
    /// Creates a payload-less request.
    pub fn new(method: RestMethod, resource: impl Into<PathString>) -> Self {
        Self {
            method,
            resource: resource.into(),
            query: None,
            user_agent: None,
            data: None,
        }
    }
}

impl<T> WebTrendsRequest<T> {
    /// Attaches a payload, which is sent as the JSON request body.
    pub fn with_data<U>(self, data: U) -> WebTrendsRequest<U> {
        WebTrendsRequest {
            method: self.method,
            resource: self.resource,
            query: self.query,
            user_agent: self.user_agent,
            data: Some(data),
        }
    }

    /// Sets the query string.
    pub fn with_query(self, query: QueryString) -> Self {
        Self {
            query: Some(query),
            ..self
        }
    }

    /// Sets the `User-Agent` sent with this request. Blank values are ignored.
    pub fn with_user_agent(self, user_agent: impl Into<String>) -> Self {
        let user_agent = user_agent.into();
        Self {
            user_agent: (!user_agent.trim().is_empty()).then_some(user_agent),
            ..self
        }
    }

    /// Returns the HTTP method.
    pub fn method(&self) -> RestMethod {
        self.method
    }

    /// Returns the resource path, relative to the client's base URL.
    pub fn resource(&self) -> &PathString {
        &self.resource
    }

    /// Returns the query string, if one was set.
    pub fn query(&self) -> Option<&QueryString> {
        self.query.as_ref()
    }

    /// Returns the user agent, if one was set.
    pub fn user_agent(&self) -> Option<&str> {
        self.user_agent.as_deref()
    }

    /// Returns the payload, if one was attached.
    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }
}
