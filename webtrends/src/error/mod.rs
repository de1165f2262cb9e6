//! Layered error types for the WebTrends client.
//!
//! Only a few failures ever escape an operation as an `Err`:
//! - [`WebTrendsError`] - Top-level error returned by network-issuing operations
//! - [`ConfigError`] - Settings that cannot produce a working client
//! - [`ArgumentError`] - Invalid operation arguments, raised before any I/O
//! - [`JsonModelError`] - Failed [`JsonModel`](crate::JsonModel) parsing
//!
//! Everything that happens on the wire is normalized into the response
//! envelope instead:
//! - [`ClientError`] - Transport faults, preserved on [`OtsError`](crate::models::OtsError)
//! - [`ValidationError`] - Body decoding failures

mod argument_error;
mod client_error;
mod config_error;
mod json_model_error;
mod validation_error;
mod webtrends_error;

pub use argument_error::ArgumentError;
pub use client_error::ClientError;
pub use config_error::ConfigError;
pub use json_model_error::JsonModelError;
pub use validation_error::ValidationError;
pub use webtrends_error::WebTrendsError;
