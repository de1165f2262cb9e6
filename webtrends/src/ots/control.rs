//! The OTS control resource: project and test resolution for a visitor.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::client::ApiClient;
use crate::error::{ArgumentError, WebTrendsError};
use crate::method::RestMethod;
use crate::models::Project;
use crate::ots::RequestOptions;
use crate::primitives::{PathString, QueryString, QueryStringBuilder};
use crate::request::WebTrendsRequest;
use crate::response::WebTrendsResponse;
use crate::settings::{Settings, State};

/// The payload posted to every control operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtsRequest {
    /// The page URL tests are evaluated against.
    pub url: String,

    /// The state identity, sent as `s_mode`.
    #[serde(rename = "s_mode", skip_serializing_if = "Option::is_none")]
    pub state: Option<State>,
}

/// Operations on `/ots/api/rest-1.2/control`.
#[derive(Debug)]
pub struct ControlOperations {
    path: PathString,
    client: Arc<ApiClient>,
}

impl ControlOperations {
    pub(crate) fn new(path: PathString, client: Arc<ApiClient>) -> Self {
        Self { path, client }
    }

    /// The resource path these operations address.
    pub fn path(&self) -> &PathString {
        &self.path
    }

    /// Fetches the project identified by `project_alias` for this account.
    ///
    /// Posts to `{control}/{AccountId}-{project_alias}`.
    ///
    /// ## Errors
    ///
    /// Returns [`WebTrendsError::Argument`] for a blank alias, before any
    /// network activity, and [`WebTrendsError::Cancelled`] if the options'
    /// token fires. Every remote outcome is on the response.
    #[instrument(skip(self, options), fields(account_id = %self.client.settings().account_id))]
    pub async fn get_project(
        &self,
        project_alias: &str,
        options: &RequestOptions,
    ) -> Result<WebTrendsResponse<Project>, WebTrendsError> {
        ArgumentError::ensure_not_empty(project_alias, "project_alias")?;

        let settings = self.client.settings();
        let resource = &self.path + format!("{}-{}", settings.account_id, project_alias).as_str();
        let request = self.request(resource, options)?;

        self.client
            .fetch_single(&request, options.cancellation.as_ref())
            .await
    }

    /// Fetches every project that applies to the visitor.
    ///
    /// Posts to `{control}/{AccountId}`.
    ///
    /// ## Errors
    ///
    /// Returns [`WebTrendsError::Cancelled`] if the options' token fires.
    /// Every remote outcome is on the response.
    #[instrument(skip(self, options), fields(account_id = %self.client.settings().account_id))]
    pub async fn get_projects(
        &self,
        options: &RequestOptions,
    ) -> Result<WebTrendsResponse<Vec<Project>>, WebTrendsError> {
        let resource = &self.path + self.client.settings().account_id.as_str();
        let request = self.request(resource, options)?;

        self.client
            .fetch_many(&request, options.cancellation.as_ref())
            .await
    }

    fn request(
        &self,
        resource: PathString,
        options: &RequestOptions,
    ) -> Result<WebTrendsRequest<OtsRequest>, ArgumentError> {
        let settings = self.client.settings();
        let mut request = WebTrendsRequest::new(RestMethod::Post, resource)
            .with_query(ots_query(settings)?)
            .with_data(ots_request(settings, options));

        if let Some(user_agent) = &options.user_agent {
            request = request.with_user_agent(user_agent.as_str());
        }

        Ok(request)
    }
}

/// The query every OTS call carries, in wire order.
fn ots_query(settings: &Settings) -> Result<QueryString, ArgumentError> {
    let query = QueryStringBuilder::new()
        .add_parameter("debug", settings.debug)?
        .add_parameter("_wt.encrypted", settings.encrypted)?
        .add_parameter("_wt.track", settings.track)?
        .add_parameter("keyToken", settings.key_token.as_str())?
        .build();
    Ok(query)
}

fn ots_request(settings: &Settings, options: &RequestOptions) -> OtsRequest {
    let url = options
        .website_url_override()
        .unwrap_or(settings.website_url.as_str())
        .to_string();

    OtsRequest {
        url,
        state: Some(options.state.unwrap_or(settings.state)),
    }
}
