//! HTTP verbs used by request envelopes.

use strum::{Display, EnumString};

/// HTTP method carried by a [`WebTrendsRequest`](crate::WebTrendsRequest)
/// and echoed on every [`WebTrendsResponse`](crate::WebTrendsResponse).
///
/// Every OTS operation is a `POST`; the other verbs exist so the pipeline can
/// be driven directly for resources the façades do not cover yet.
///
/// ## Examples
///
/// ```rust
/// use webtrends::RestMethod;
///
/// assert_eq!(RestMethod::Post.to_string(), "POST");
/// assert_eq!("GET".parse::<RestMethod>().unwrap(), RestMethod::Get);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "UPPERCASE")]
pub enum RestMethod {
    /// HTTP GET.
    Get,
    /// HTTP POST.
    Post,
    /// HTTP PUT.
    Put,
    /// HTTP PATCH.
    Patch,
    /// HTTP DELETE.
    Delete,
}

impl RestMethod {
    /// Converts to the equivalent `reqwest::Method`.
    pub fn to_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Put => reqwest::Method::PUT,
            Self::Patch => reqwest::Method::PATCH,
            Self::Delete => reqwest::Method::DELETE,
        }
    }
}

impl From<RestMethod> for reqwest::Method {
    fn from(method: RestMethod) -> Self {
        method.to_reqwest()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_uppercase() {
        assert_eq!(RestMethod::Post.to_string(), "POST");
        assert_eq!(RestMethod::Delete.to_string(), "DELETE");
    }

    #[test]
    fn test_parse() {
        assert_eq!("POST".parse::<RestMethod>().unwrap(), RestMethod::Post);
        assert!("post-it".parse::<RestMethod>().is_err());
    }

    #[test]
    fn test_to_reqwest() {
        assert_eq!(RestMethod::Post.to_reqwest(), reqwest::Method::POST);
        assert_eq!(reqwest::Method::from(RestMethod::Get), reqwest::Method::GET);
    }
}
