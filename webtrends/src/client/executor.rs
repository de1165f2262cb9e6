//! Request execution with tracing instrumentation.
//!
//! This module provides the [`ApiClient`] pipeline every OTS operation runs
//! through: it resolves a [`WebTrendsRequest`] against the configured base
//! URL, sends it, and folds every outcome into a [`WebTrendsResponse`].

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, instrument, warn, Span};
use url::{Position, Url};

use crate::cancel::{cancelled_or_pending, CancellationToken};
use crate::error::{ClientError, ConfigError, WebTrendsError};
use crate::http::{HttpRequest, JSON_CONTENT_TYPE};
use crate::method::RestMethod;
use crate::models::OtsEnvelope;
use crate::primitives::{combine_paths, PathString, QueryString};
use crate::request::WebTrendsRequest;
use crate::response::{
    decode, redacted_path_and_query, Many, NoContent, ResponseShape, Single, WebTrendsResponse,
};
use crate::settings::Settings;

/// Builder for configuring an [`ApiClient`].
#[derive(Debug)]
pub struct ApiClientBuilder {
    settings: Settings,
    http: Option<reqwest::Client>,
    timeout: Option<Duration>,
    default_headers: HeaderMap,
}

impl ApiClientBuilder {
    fn new(settings: Settings) -> Self {
        Self {
            settings,
            http: None,
            timeout: None,
            default_headers: HeaderMap::new(),
        }
    }

    /// Uses a caller-supplied HTTP client instead of building one.
    ///
    /// The supplied client is used as is; [`timeout`](Self::timeout) and
    /// [`default_header`](Self::default_header) only apply to a client built
    /// by this builder.
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http = Some(client);
        self
    }

    /// Sets a per-request timeout. By default no timeout is imposed.
    ///
    /// ## Examples
    ///
    /// ```rust,ignore
    /// use std::time::Duration;
    ///
    /// let client = ApiClient::builder(settings)
    ///     .timeout(Duration::from_secs(10))
    ///     .build()?;
    /// ```
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Adds a default header to all requests.
    ///
    /// ## Examples
    ///
    /// ```rust,ignore
    /// let client = ApiClient::builder(settings)
    ///     .default_header("X-Request-Source", "storefront")?
    ///     .build()?;
    /// ```
    ///
    /// ## Errors
    ///
    /// Returns an error if the header name or value is invalid.
    pub fn default_header(
        mut self,
        name: impl AsRef<str>,
        value: impl AsRef<str>,
    ) -> Result<Self, ConfigError> {
        let name = HeaderName::try_from(name.as_ref())
            .map_err(|e| ConfigError::invalid_header(format!("invalid header name: {e}")))?;
        let value = HeaderValue::try_from(value.as_ref())
            .map_err(|e| ConfigError::invalid_header(format!("invalid header value: {e}")))?;
        self.default_headers.insert(name, value);
        Ok(self)
    }

    /// Validates the settings and builds the [`ApiClient`].
    ///
    /// ## Errors
    ///
    /// Returns an error if a required setting is missing, the base URL is not
    /// an absolute HTTP-capable URL, or the HTTP client cannot be constructed.
    pub fn build(self) -> Result<ApiClient, ConfigError> {
        self.settings.validate()?;

        let base_url = Url::parse(self.settings.ots_base_url.trim())?;
        if base_url.cannot_be_a_base() {
            return Err(ConfigError::UnsupportedBaseUrl {
                url: base_url.to_string(),
            });
        }

        let http = match self.http {
            Some(client) => client,
            None => {
                let mut headers = self.default_headers;
                headers
                    .entry(ACCEPT)
                    .or_insert(HeaderValue::from_static(JSON_CONTENT_TYPE));

                let mut builder = reqwest::Client::builder().default_headers(headers);
                if let Some(timeout) = self.timeout {
                    builder = builder.timeout(timeout);
                }
                builder.build()?
            }
        };

        debug!(base_url = %base_url, account_id = %self.settings.account_id, "built OTS client");

        Ok(ApiClient {
            http,
            settings: self.settings,
            base_url,
        })
    }
}

/// Async pipeline for WebTrends API requests.
///
/// Remote outcomes never surface as `Err`: HTTP errors, embedded API errors
/// and transport faults all come back as a [`WebTrendsResponse`]. Only
/// cancellation escapes as [`WebTrendsError::Cancelled`].
///
/// ## Examples
///
/// ```rust,ignore
/// use webtrends::{ApiClient, RestMethod, Settings, WebTrendsRequest};
/// use webtrends::models::Project;
///
/// let client = ApiClient::new(Settings::new("12345", "token", "https://www.example.com"))?;
///
/// let request = WebTrendsRequest::new(RestMethod::Post, "/ots/api/rest-1.2/control/12345-ta_home");
/// let response = client.fetch_single::<Project, _>(&request, None).await?;
/// println!("{response}");
/// ```
#[derive(Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    settings: Settings,
    base_url: Url,
}

impl ApiClient {
    /// Creates a new builder for configuring an API client.
    pub fn builder(settings: Settings) -> ApiClientBuilder {
        ApiClientBuilder::new(settings)
    }

    /// Creates a new API client with default transport settings.
    ///
    /// ## Errors
    ///
    /// Returns an error if the settings are incomplete or the HTTP client
    /// cannot be constructed.
    pub fn new(settings: Settings) -> Result<Self, ConfigError> {
        Self::builder(settings).build()
    }

    /// Returns the validated settings this client was built with.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Returns the base URL for this client.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolves a resource path and query against the base URL.
    ///
    /// Any path prefix on the base URL is kept.
    pub fn resolve_uri(&self, resource: &PathString, query: Option<&QueryString>) -> Url {
        let mut uri = self.base_url.clone();
        uri.set_path(&combine_paths(self.base_url.path(), &resource.to_uri_component()));

        let query = query.filter(|q| !q.is_empty()).map(QueryString::encoded);
        uri.set_query(query.as_deref());
        uri
    }

    /// Resolves `request` into the exact HTTP request that would be sent.
    ///
    /// ## Errors
    ///
    /// Returns an error if the payload cannot be serialized or the user agent
    /// is not a valid header value.
    pub fn build_http_request<T: Serialize>(
        &self,
        request: &WebTrendsRequest<T>,
    ) -> Result<HttpRequest, ClientError> {
        let uri = self.resolve_uri(request.resource(), request.query());
        Self::prepare(request, uri)
    }

    fn prepare<T: Serialize>(
        request: &WebTrendsRequest<T>,
        url: Url,
    ) -> Result<HttpRequest, ClientError> {
        let user_agent = request
            .user_agent()
            .map(HeaderValue::from_str)
            .transpose()
            .map_err(|e| ClientError::InvalidHeader {
                name: "User-Agent",
                message: e.to_string(),
            })?;

        let body = request.data().map(serde_json::to_string).transpose()?;

        Ok(HttpRequest {
            method: request.method(),
            url,
            user_agent,
            body,
        })
    }

    /// Sends a request whose success body is not needed.
    ///
    /// ## Errors
    ///
    /// Returns [`WebTrendsError::Cancelled`] if `cancel` fires first.
    pub async fn send<T: Serialize>(
        &self,
        request: &WebTrendsRequest<T>,
        cancel: Option<&CancellationToken>,
    ) -> Result<WebTrendsResponse, WebTrendsError> {
        self.execute::<NoContent, T>(request, cancel).await
    }

    /// Sends a request and decodes a single object from a 2xx body.
    ///
    /// ## Errors
    ///
    /// Returns [`WebTrendsError::Cancelled`] if `cancel` fires first.
    pub async fn fetch_single<D, T>(
        &self,
        request: &WebTrendsRequest<T>,
        cancel: Option<&CancellationToken>,
    ) -> Result<WebTrendsResponse<D>, WebTrendsError>
    where
        D: DeserializeOwned + OtsEnvelope,
        T: Serialize,
    {
        self.execute::<Single<D>, T>(request, cancel).await
    }

    /// Sends a request and decodes a list of objects from a 2xx body.
    ///
    /// ## Errors
    ///
    /// Returns [`WebTrendsError::Cancelled`] if `cancel` fires first.
    pub async fn fetch_many<D, T>(
        &self,
        request: &WebTrendsRequest<T>,
        cancel: Option<&CancellationToken>,
    ) -> Result<WebTrendsResponse<Vec<D>>, WebTrendsError>
    where
        D: DeserializeOwned + OtsEnvelope,
        T: Serialize,
    {
        self.execute::<Many<D>, T>(request, cancel).await
    }

    /// Executes a request, decoding a 2xx body with shape `S`.
    ///
    /// The span records the URL without its query string so the key token
    /// never reaches the logs.
    ///
    /// ## Errors
    ///
    /// Returns [`WebTrendsError::Cancelled`] if `cancel` is already cancelled
    /// or fires before the response body has been read.
    #[instrument(
        name = "ots_request",
        skip_all,
        fields(
            http.method = %request.method(),
            http.url = tracing::field::Empty,
            http.status_code = tracing::field::Empty,
            otel.kind = "client",
            otel.status_code = tracing::field::Empty,
        )
    )]
    pub async fn execute<S, T>(
        &self,
        request: &WebTrendsRequest<T>,
        cancel: Option<&CancellationToken>,
    ) -> Result<WebTrendsResponse<S::Output>, WebTrendsError>
    where
        S: ResponseShape,
        T: Serialize,
    {
        if cancel.is_some_and(CancellationToken::is_cancelled) {
            info!("OTS request cancelled before sending");
            return Err(WebTrendsError::Cancelled);
        }

        let method = request.method();
        let uri = self.resolve_uri(request.resource(), request.query());
        Span::current().record("http.url", &uri[..Position::AfterPath]);

        let http_request = match Self::prepare(request, uri.clone()) {
            Ok(http_request) => http_request,
            Err(fault) => return Ok(self.transport_failure(method, uri, None, fault)),
        };

        let request_content = if self.settings.capture_request_content {
            http_request.body.clone()
        } else {
            None
        };

        debug!(
            target_uri = %redacted_path_and_query(&uri),
            has_body = http_request.body.is_some(),
            "sending OTS request"
        );

        let builder = http_request.into_builder(&self.http);
        let exchange = async {
            let response = builder.send().await?;
            let status = response.status();
            let body = response.bytes().await?;
            Ok::<_, reqwest::Error>((status, body))
        };

        let outcome = tokio::select! {
            biased;
            () = cancelled_or_pending(cancel) => {
                info!("OTS request cancelled");
                return Err(WebTrendsError::Cancelled);
            }
            outcome = exchange => outcome,
        };

        let (status, body) = match outcome {
            Ok(exchange) => exchange,
            Err(e) => {
                let fault = ClientError::Request(e);
                return Ok(self.transport_failure(method, uri, request_content, fault));
            }
        };

        let span = Span::current();
        span.record("http.status_code", status.as_u16());

        let decoded = decode::<S>(status, &body);
        let response_content = self
            .settings
            .capture_response_content
            .then(|| String::from_utf8_lossy(&body).into_owned());

        let response = WebTrendsResponse::new(
            method,
            uri,
            status.as_u16(),
            status.is_success(),
            decoded.data,
            decoded.error,
        )
        .with_content(request_content, response_content);

        let otel_status = if response.is_success() {
            "OK"
        } else if status.is_server_error() {
            "ERROR"
        } else {
            "UNSET"
        };
        span.record("otel.status_code", otel_status);

        let error_code = response.error().map(|e| e.error_code);
        if !status.is_success() {
            warn!(status = status.as_u16(), ?error_code, "OTS returned an error status");
        } else if let Some(error) = response.error() {
            info!(
                status = status.as_u16(),
                error_code = error.error_code,
                error_message = %error.error_message,
                "OTS reported an error"
            );
        } else {
            debug!(status = status.as_u16(), "OTS response received");
        }

        Ok(response)
    }

    fn transport_failure<O>(
        &self,
        method: RestMethod,
        uri: Url,
        request_content: Option<String>,
        fault: ClientError,
    ) -> WebTrendsResponse<O> {
        warn!(error = %fault, "OTS request failed without a response");
        Span::current().record("otel.status_code", "ERROR");

        WebTrendsResponse::transport_failure(method, uri, fault).with_content(request_content, None)
    }
}
