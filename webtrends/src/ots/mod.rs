//! Typed façades over the OTS REST API.
//!
//! [`WebTrendsApiClient`] is the entry point. Operation groups are created on
//! first use and then reused for the life of the client:
//!
//! ```text
//! WebTrendsApiClient
//! └── ots()        /ots/api/rest-1.2
//!     └── control()  /ots/api/rest-1.2/control
//! ```

mod control;
mod options;

use std::sync::{Arc, OnceLock};

use crate::client::ApiClient;
use crate::error::ConfigError;
use crate::primitives::PathString;
use crate::settings::Settings;

pub use control::{ControlOperations, OtsRequest};
pub use options::RequestOptions;

/// Root path of the OTS REST API.
pub const OTS_API_PATH: &str = "/ots/api/rest-1.2";

/// The WebTrends API client.
///
/// Cheap to share behind an `Arc`; every operation group hangs off the same
/// pipeline and settings.
///
/// ## Examples
///
/// ```rust,ignore
/// use webtrends::{RequestOptions, Settings, WebTrendsApiClient};
///
/// let client = WebTrendsApiClient::new(Settings::from_env()?)?;
///
/// let response = client
///     .ots()
///     .control()
///     .get_project("ta_1614ReducedCheckout", &RequestOptions::new())
///     .await?;
///
/// if let Some(project) = response.data() {
///     for factor in project.factors() {
///         println!("{}: {:?}", factor.name, factor.value);
///     }
/// }
/// ```
#[derive(Debug)]
pub struct WebTrendsApiClient {
    client: Arc<ApiClient>,
    ots: OnceLock<OtsOperations>,
}

impl WebTrendsApiClient {
    /// Validates `settings` and builds a client with the default transport.
    ///
    /// ## Errors
    ///
    /// Returns an error naming every missing required setting, or if the
    /// base URL or HTTP client is unusable.
    pub fn new(settings: Settings) -> Result<Self, ConfigError> {
        Ok(Self::with_client(ApiClient::new(settings)?))
    }

    /// Wraps a pipeline configured through [`ApiClient::builder`].
    pub fn with_client(client: ApiClient) -> Self {
        Self {
            client: Arc::new(client),
            ots: OnceLock::new(),
        }
    }

    /// The underlying request pipeline.
    pub fn api(&self) -> &ApiClient {
        &self.client
    }

    /// The validated settings.
    pub fn settings(&self) -> &Settings {
        self.client.settings()
    }

    /// OTS operations, created on first access.
    pub fn ots(&self) -> &OtsOperations {
        self.ots.get_or_init(|| {
            OtsOperations::new(PathString::new(OTS_API_PATH), Arc::clone(&self.client))
        })
    }
}

impl From<ApiClient> for WebTrendsApiClient {
    fn from(client: ApiClient) -> Self {
        Self::with_client(client)
    }
}

/// Operations rooted at `/ots/api/rest-1.2`.
#[derive(Debug)]
pub struct OtsOperations {
    path: PathString,
    client: Arc<ApiClient>,
    control: OnceLock<ControlOperations>,
}

impl OtsOperations {
    fn new(path: PathString, client: Arc<ApiClient>) -> Self {
        Self {
            path,
            client,
            control: OnceLock::new(),
        }
    }

    /// Root path of these operations.
    pub fn path(&self) -> &PathString {
        &self.path
    }

    /// Control operations, created on first access.
    pub fn control(&self) -> &ControlOperations {
        self.control.get_or_init(|| {
            ControlOperations::new(self.path.join("control"), Arc::clone(&self.client))
        })
    }
}
