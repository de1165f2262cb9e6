//! Outgoing HTTP requests described as plain data.
//!
//! [`ApiClient::build_http_request`](crate::ApiClient::build_http_request)
//! resolves a [`WebTrendsRequest`](crate::WebTrendsRequest) into an
//! `HttpRequest` before any I/O happens, so the exact shape of what will be
//! sent can be inspected and tested without a server.

use reqwest::header::{HeaderValue, CONTENT_TYPE, USER_AGENT};
use url::Url;

use crate::method::RestMethod;

/// Content type for JSON request bodies.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// A fully resolved HTTP request.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// HTTP method.
    pub method: RestMethod,
    /// Absolute URL including the query string.
    pub url: Url,
    /// Validated `User-Agent` header, only when the envelope asked for one.
    pub user_agent: Option<HeaderValue>,
    /// JSON body text, only for requests carrying a payload.
    pub body: Option<String>,
}

impl HttpRequest {
    /// Turns this request into a `reqwest` builder on `client`.
    ///
    /// The transport's default `User-Agent` is left alone unless this request
    /// carries its own.
    pub fn into_builder(self, client: &reqwest::Client) -> reqwest::RequestBuilder {
        let mut builder = client.request(self.method.to_reqwest(), self.url);

        if let Some(user_agent) = self.user_agent {
            builder = builder.header(USER_AGENT, user_agent);
        }

        if let Some(body) = self.body {
            builder = builder
                .header(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE))
                .body(body);
        }

        builder
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_builder_sets_headers_and_body() {
        let client = reqwest::Client::new();
        let request = HttpRequest {
            method: RestMethod::Post,
            url: Url::parse("https://ots.example/control/a1?debug=false").unwrap(),
            user_agent: Some(HeaderValue::from_static("agent/1.0")),
            body: Some(r#"{"url":"https://site"}"#.to_string()),
        };

        let built = request.into_builder(&client).build().unwrap();
        assert_eq!(built.method(), reqwest::Method::POST);
        assert_eq!(built.url().as_str(), "https://ots.example/control/a1?debug=false");
        assert_eq!(built.headers()[USER_AGENT], "agent/1.0");
        assert_eq!(built.headers()[CONTENT_TYPE], JSON_CONTENT_TYPE);
        assert_eq!(
            built.body().and_then(|b| b.as_bytes()),
            Some(br#"{"url":"https://site"}"#.as_slice())
        );
    }

    #[test]
    fn test_into_builder_without_optional_parts() {
        let client = reqwest::Client::new();
        let request = HttpRequest {
            method: RestMethod::Get,
            url: Url::parse("https://ots.example/status").unwrap(),
            user_agent: None,
            body: None,
        };

        let built = request.into_builder(&client).build().unwrap();
        assert!(built.headers().get(USER_AGENT).is_none());
        assert!(built.headers().get(CONTENT_TYPE).is_none());
        assert!(built.body().is_none());
    }
}
