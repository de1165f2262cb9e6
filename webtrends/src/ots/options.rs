//! Per-call overrides for OTS operations.

use crate::cancel::CancellationToken;
use crate::settings::State;

/// Optional overrides for a single OTS call.
///
/// Anything left unset falls back to the client's [`Settings`](crate::Settings).
///
/// ## Examples
///
/// ```rust
/// use webtrends::{CancellationToken, RequestOptions, State};
///
/// let options = RequestOptions::new()
///     .website_url("https://staging.example.com/checkout")
///     .user_agent("Mozilla/5.0")
///     .state(State::Staging)
///     .cancellation(CancellationToken::new());
///
/// assert_eq!(options.state, Some(State::Staging));
/// ```
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Page URL to evaluate tests against instead of `WebsiteUrl`.
    pub website_url: Option<String>,
    /// `User-Agent` forwarded from the visitor's browser.
    pub user_agent: Option<String>,
    /// State identity instead of the configured default.
    pub state: Option<State>,
    /// Token that aborts the call when cancelled.
    pub cancellation: Option<CancellationToken>,
}

impl RequestOptions {
    /// Creates options with no overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluates tests against this page URL.
    pub fn website_url(mut self, website_url: impl Into<String>) -> Self {
        self.website_url = Some(website_url.into());
        self
    }

    /// Forwards this `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Requests this state identity.
    pub fn state(mut self, state: State) -> Self {
        self.state = Some(state);
        self
    }

    /// Aborts the call when `token` is cancelled.
    pub fn cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// The website URL override, ignoring blank values.
    pub(crate) fn website_url_override(&self) -> Option<&str> {
        self.website_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_website_url_is_not_an_override() {
        let options = RequestOptions::new().website_url("   ");
        assert!(options.website_url_override().is_none());

        let options = RequestOptions::new().website_url("https://a.example");
        assert_eq!(options.website_url_override(), Some("https://a.example"));
    }

    #[test]
    fn test_cancellation_is_shared() {
        let token = CancellationToken::new();
        let options = RequestOptions::new().cancellation(token.clone());
        token.cancel();
        assert!(options.cancellation.unwrap().is_cancelled());
    }
}
