//! Whole-object JSON round-trips for the domain models.
//!
//! The serde attributes on the models already encode the wire rules (null
//! fields omitted, enums lowercase), so the same rules apply here as on the
//! request pipeline.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{ArgumentError, JsonModelError, ValidationError};
use crate::models::{
    Body, Cookie, OtsError, OtsResponse, Parameters, Project, ProjectBody, ProjectFactor,
};

/// A model that converts to and from compact JSON text.
///
/// ## Examples
///
/// ```rust
/// use webtrends::JsonModel;
/// use webtrends::models::ProjectFactor;
///
/// let factor = ProjectFactor { name: "headline".into(), operation: 1, value: None };
/// let json = factor.to_json_string().unwrap();
/// assert_eq!(json, r#"{"name":"headline","operation":1}"#);
/// assert_eq!(ProjectFactor::from_json_str(&json).unwrap(), factor);
/// ```
pub trait JsonModel: Serialize + DeserializeOwned {
    /// Serializes to compact JSON.
    ///
    /// ## Errors
    ///
    /// Returns [`ValidationError::JsonSerialize`] if serialization fails.
    fn to_json_string(&self) -> Result<String, ValidationError> {
        serde_json::to_string(self).map_err(ValidationError::JsonSerialize)
    }

    /// Parses a model from JSON text.
    ///
    /// ## Errors
    ///
    /// Returns [`ArgumentError::Empty`] for blank input and
    /// [`ValidationError::JsonParse`] for malformed input.
    fn from_json_str(json: &str) -> Result<Self, JsonModelError> {
        ArgumentError::ensure_not_empty(json, "json")?;
        let model = serde_json::from_str(json).map_err(ValidationError::JsonParse)?;
        Ok(model)
    }
}

impl JsonModel for Project {}
impl JsonModel for ProjectBody {}
impl JsonModel for ProjectFactor {}
impl JsonModel for Body {}
impl JsonModel for Cookie {}
impl JsonModel for OtsError {}
impl JsonModel for Parameters {}
impl<B: Serialize + DeserializeOwned + Default> JsonModel for OtsResponse<B> {}
