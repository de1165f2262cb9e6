//! Project (experiment) records returned by the control API.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::ots::{Cookie, OtsBody, OtsEnvelope, OtsError, Parameters};

/// A WebTrends project: the experiment definition and the visitor's
/// participation in it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Factors, cookies and any embedded error.
    #[serde(default)]
    pub body: ProjectBody,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<String>,

    #[serde(rename = "params", skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Parameters>,

    #[serde(rename = "opcode", skip_serializing_if = "Option::is_none")]
    pub op_code: Option<String>,

    #[serde(rename = "opstatus", skip_serializing_if = "Option::is_none")]
    pub op_status: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub guid: Option<String>,
}

impl Project {
    /// Returns the factors assigned to the visitor, or an empty slice.
    pub fn factors(&self) -> &[ProjectFactor] {
        self.body.factors.as_deref().unwrap_or_default()
    }

    /// Finds a factor by name.
    pub fn factor(&self, name: &str) -> Option<&ProjectFactor> {
        self.factors().iter().find(|f| f.name == name)
    }
}

impl OtsEnvelope for Project {
    fn embedded_error(&self) -> Option<&OtsError> {
        self.body.error()
    }
}

/// Body of a [`Project`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectBody {
    /// The variant conditions chosen for this visitor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub factors: Option<Vec<ProjectFactor>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cookies: Option<BTreeMap<String, Cookie>>,

    #[serde(rename = "message", skip_serializing_if = "Option::is_none")]
    pub error: Option<OtsError>,
}

impl OtsBody for ProjectBody {
    fn error(&self) -> Option<&OtsError> {
        self.error.as_ref()
    }
}

/// A named variant or condition within a project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectFactor {
    #[serde(default)]
    pub name: String,

    /// Operation code telling the caller how to apply `value`.
    #[serde(default)]
    pub operation: i32,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}
