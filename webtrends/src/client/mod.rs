//! HTTP client module.
//!
//! This module provides the request pipeline shared by every WebTrends
//! operation, with tracing instrumentation and cancellation support.
//!
//! ## Examples
//!
//! ```rust,ignore
//! use std::time::Duration;
//! use webtrends::{ApiClient, RestMethod, Settings, WebTrendsRequest};
//!
//! let client = ApiClient::builder(Settings::from_env()?)
//!     .timeout(Duration::from_secs(10))
//!     .build()?;
//!
//! let request = WebTrendsRequest::new(RestMethod::Post, "/ots/api/rest-1.2/control/12345");
//! let response = client.send(&request, None).await?;
//! ```

mod executor;

pub use executor::{ApiClient, ApiClientBuilder};
