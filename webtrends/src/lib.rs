//! Typed client for the WebTrends Optimize OTS REST API.
//!
//! The `webtrends` crate resolves which A/B and multivariate tests apply to a
//! visitor by calling the OTS control endpoints, and returns every outcome in
//! a uniform [`WebTrendsResponse`] envelope.
//!
//! ## Features
//!
//! - **Validated settings**: bind from a config section, environment
//!   variables, or code; every missing setting is reported at once
//! - **Uniform envelope**: HTTP errors, embedded OTS errors and transport
//!   faults all come back as data, never as a panic or lost error
//! - **Async-first pipeline**: built on `reqwest` with `tokio`, with
//!   caller-owned cancellation
//! - **Tracing**: each request runs in an OpenTelemetry-style client span
//!
//! ## Example
//!
//! ```rust,ignore
//! use webtrends::{RequestOptions, Settings, State, WebTrendsApiClient};
//!
//! let client = WebTrendsApiClient::new(Settings::new(
//!     "a12345",
//!     "key-token",
//!     "https://www.example.com",
//! ))?;
//!
//! let options = RequestOptions::new().state(State::Staging);
//! let response = client.ots().control().get_projects(&options).await?;
//!
//! for project in response.data().into_iter().flatten() {
//!     println!("{:?}", project.guid);
//! }
//! ```

pub mod cancel;
pub mod client;
pub mod error;
pub mod http;
pub mod json;
pub mod method;
pub mod models;
pub mod ots;
pub mod primitives;
pub mod request;
pub mod response;
pub mod settings;

// Re-exports for convenience
pub use cancel::CancellationToken;
pub use client::{ApiClient, ApiClientBuilder};
pub use error::{
    ArgumentError, ClientError, ConfigError, JsonModelError, ValidationError, WebTrendsError,
};
pub use http::HttpRequest;
pub use json::JsonModel;
pub use method::RestMethod;
pub use ots::{ControlOperations, OtsOperations, OtsRequest, RequestOptions, WebTrendsApiClient};
pub use primitives::{IntoQueryValue, PathString, QueryString, QueryStringBuilder};
pub use request::WebTrendsRequest;
pub use response::{ResponseShape, WebTrendsResponse};
pub use settings::{Settings, State};
