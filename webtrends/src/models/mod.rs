//! JSON-shaped entities returned by the OTS API.
//!
//! Field names follow the wire format exactly. Optional fields that are
//! `None` are omitted when serialized, and enum values are lowercase.

mod ots;
mod project;

pub use ots::{Body, Cookie, CookieType, OtsBody, OtsEnvelope, OtsError, OtsResponse, Parameters};
pub use project::{Project, ProjectBody, ProjectFactor};
