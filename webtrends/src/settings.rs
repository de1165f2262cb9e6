//! Client settings and their validation.
//!
//! [`Settings`] mirrors the `WebTrends` configuration section consumed by
//! host applications. It can be bound from any serde source using the
//! PascalCase keys (`AccountId`, `KeyToken`, ...), read from `WEBTRENDS_*`
//! environment variables, or built in code.

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::ConfigError;

/// Default OTS endpoint.
pub const DEFAULT_OTS_BASE_URL: &str = "https://ots.webtrends-optimize.com";

/// Environment variable prefix used by [`Settings::from_env`].
pub const ENV_PREFIX: &str = "WEBTRENDS_";

/// The state identity sent as `s_mode`, which controls which tests apply.
///
/// Rendered lowercase on the wire and by `Display`. PascalCase spellings are
/// accepted when binding from configuration files.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum State {
    /// Live traffic.
    #[default]
    #[serde(alias = "Normal")]
    Normal,
    /// Tests in their staging (QA) phase.
    #[serde(alias = "Staging")]
    Staging,
    /// Preview of a single variant.
    #[serde(alias = "Preview")]
    Preview,
}

/// Settings for the WebTrends OTS API.
///
/// `AccountId`, `OtsBaseUrl`, `KeyToken` and `WebsiteUrl` are required; see
/// [`Settings::validate`].
///
/// ## Examples
///
/// ```rust
/// use webtrends::Settings;
///
/// let config = serde_json::json!({
///     "WebTrends": {
///         "AccountId": "a12345",
///         "KeyToken": "secret",
///         "WebsiteUrl": "https://www.example.com",
///         "Track": false
///     }
/// });
///
/// let settings = Settings::from_section(&config).unwrap();
/// assert!(!settings.track);
/// assert!(settings.encrypted);
/// ```
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Settings {
    /// The WebTrends account identifier.
    pub account_id: String,
    /// Capture the raw request body on each response envelope.
    pub capture_request_content: bool,
    /// Capture the raw response body on each response envelope.
    pub capture_response_content: bool,
    /// Ask OTS to include debug output in its responses.
    pub debug: bool,
    /// Ask OTS for encrypted cookie values.
    pub encrypted: bool,
    /// The authentication token, sent as the `keyToken` query parameter.
    pub key_token: String,
    /// Base URL of the OTS service.
    pub ots_base_url: String,
    /// Default state identity for operations that do not override it.
    pub state: State,
    /// Record returned content as a view in WebTrends.
    pub track: bool,
    /// Default website URL for operations that do not override it.
    pub website_url: String,
}

impl Settings {
    /// Conventional name of the configuration section holding these settings.
    pub const CONFIGURATION_SECTION: &'static str = "WebTrends";

    /// Creates settings with the required values and defaults for the rest.
    pub fn new(
        account_id: impl Into<String>,
        key_token: impl Into<String>,
        website_url: impl Into<String>,
    ) -> Self {
        Self {
            account_id: account_id.into(),
            key_token: key_token.into(),
            website_url: website_url.into(),
            ..Self::default()
        }
    }

    /// Checks that every required setting is present.
    ///
    /// Safe to call any number of times.
    ///
    /// ## Errors
    ///
    /// Returns [`ConfigError::MissingFields`] naming every required setting
    /// that is empty or whitespace, not just the first.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("AccountId", &self.account_id),
            ("OtsBaseUrl", &self.ots_base_url),
            ("KeyToken", &self.key_token),
            ("WebsiteUrl", &self.website_url),
        ];

        let fields: Vec<&'static str> = required
            .into_iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| name)
            .collect();

        if fields.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::MissingFields { fields })
        }
    }

    /// Binds and validates the [`CONFIGURATION_SECTION`](Self::CONFIGURATION_SECTION)
    /// of a configuration document.
    ///
    /// ## Errors
    ///
    /// Returns [`ConfigError::Binding`] if the section has the wrong shape, or
    /// [`ConfigError::MissingFields`] if required values are absent (including
    /// when the section itself is missing).
    pub fn from_section(config: &serde_json::Value) -> Result<Self, ConfigError> {
        let settings = match config.get(Self::CONFIGURATION_SECTION) {
            Some(section) => Self::deserialize(section)?,
            None => Self::default(),
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Reads settings from `WEBTRENDS_*` environment variables.
    ///
    /// Unset variables keep their defaults. Booleans accept `true`/`false`
    /// and `1`/`0`.
    ///
    /// ## Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for an unparseable boolean or
    /// state, or [`ConfigError::MissingFields`] if required values are absent.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut settings = Self::default();

        let text = |key: &str| lookup(&format!("{ENV_PREFIX}{key}"));
        let flag = |key: &'static str, target: &mut bool| -> Result<(), ConfigError> {
            if let Some(raw) = text(key) {
                *target = parse_flag(&raw).ok_or(ConfigError::InvalidValue { key, value: raw })?;
            }
            Ok(())
        };

        if let Some(value) = text("ACCOUNT_ID") {
            settings.account_id = value;
        }
        if let Some(value) = text("KEY_TOKEN") {
            settings.key_token = value;
        }
        if let Some(value) = text("WEBSITE_URL") {
            settings.website_url = value;
        }
        if let Some(value) = text("OTS_BASE_URL") {
            settings.ots_base_url = value;
        }
        if let Some(raw) = text("STATE") {
            settings.state = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: "STATE",
                value: raw,
            })?;
        }
        flag("DEBUG", &mut settings.debug)?;
        flag("ENCRYPTED", &mut settings.encrypted)?;
        flag("TRACK", &mut settings.track)?;
        flag("CAPTURE_REQUEST_CONTENT", &mut settings.capture_request_content)?;
        flag("CAPTURE_RESPONSE_CONTENT", &mut settings.capture_response_content)?;

        settings.validate()?;
        Ok(settings)
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            account_id: String::new(),
            capture_request_content: false,
            capture_response_content: false,
            debug: false,
            encrypted: true,
            key_token: String::new(),
            ots_base_url: DEFAULT_OTS_BASE_URL.to_string(),
            state: State::Normal,
            track: true,
            website_url: String::new(),
        }
    }
}

// keyToken is a credential; keep it out of logs and panic messages.
impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("account_id", &self.account_id)
            .field("capture_request_content", &self.capture_request_content)
            .field("capture_response_content", &self.capture_response_content)
            .field("debug", &self.debug)
            .field("encrypted", &self.encrypted)
            .field("key_token", &"<redacted>")
            .field("ots_base_url", &self.ots_base_url)
            .field("state", &self.state)
            .field("track", &self.track)
            .field("website_url", &self.website_url)
            .finish()
    }
}
