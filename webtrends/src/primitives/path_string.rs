//! Relative resource paths.

use std::fmt;
use std::ops;

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

/// Characters escaped when a path is rendered into a URI. `/` is kept as the
/// segment separator.
const PATH_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// An immutable relative resource path such as `/ots/api/rest-1.2`.
///
/// Joining two paths with `+` places exactly one `/` between them, whatever
/// slashes either side already carries.
///
/// ## Examples
///
/// ```rust
/// use webtrends::PathString;
///
/// let control = PathString::new("/ots/api/rest-1.2/") + "/control";
/// assert_eq!(control.as_str(), "/ots/api/rest-1.2/control");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PathString(String);

impl PathString {
    /// Wraps a path.
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// Returns the path text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if the path has no content.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Renders the path for use inside a URI, percent-encoding characters
    /// that are not valid in a path.
    pub fn to_uri_component(&self) -> String {
        utf8_percent_encode(&self.0, PATH_ENCODE_SET).to_string()
    }

    /// Joins `child` under `self` with a single separator.
    pub fn join(&self, child: &str) -> Self {
        Self(combine_paths(&self.0, child))
    }
}

/// Joins two path fragments with exactly one `/`.
///
/// If either side is empty the other is returned unchanged.
pub(crate) fn combine_paths(parent: &str, child: &str) -> String {
    if parent.is_empty() || child.is_empty() {
        return format!("{parent}{child}");
    }
    format!(
        "{}/{}",
        parent.trim_end_matches('/'),
        child.trim_start_matches('/')
    )
}

impl ops::Add for PathString {
    type Output = PathString;

    fn add(self, rhs: PathString) -> Self::Output {
        self.join(&rhs.0)
    }
}

impl ops::Add<&str> for PathString {
    type Output = PathString;

    fn add(self, rhs: &str) -> Self::Output {
        self.join(rhs)
    }
}

impl ops::Add<&str> for &PathString {
    type Output = PathString;

    fn add(self, rhs: &str) -> Self::Output {
        self.join(rhs)
    }
}

impl From<&str> for PathString {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl From<String> for PathString {
    fn from(path: String) -> Self {
        Self(path)
    }
}

impl fmt::Display for PathString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_normalizes_separator() {
        for left in ["a", "a/", "a//"] {
            for right in ["b", "/b", "//b"] {
                assert_eq!(
                    PathString::new(left) + PathString::new(right),
                    PathString::new("a/b"),
                    "{left:?} + {right:?}"
                );
            }
        }
    }

    #[test]
    fn test_join_keeps_leading_and_trailing_slashes() {
        let path = PathString::new("/ots/api/rest-1.2") + "/control/";
        assert_eq!(path.as_str(), "/ots/api/rest-1.2/control/");
    }

    #[test]
    fn test_join_with_empty_side() {
        assert_eq!((PathString::default() + "/b").as_str(), "/b");
        assert_eq!((PathString::new("/a/") + "").as_str(), "/a/");
    }

    #[test]
    fn test_borrowed_add_leaves_original() {
        let base = PathString::new("/control");
        let single = &base + "a1-alias";
        assert_eq!(single.as_str(), "/control/a1-alias");
        assert_eq!(base.as_str(), "/control");
    }

    #[test]
    fn test_encode_set_escapes_each_reserved_character() {
        let path = PathString::new("/a b\"c#d%e<f>g?h`i{j}");
        assert_eq!(
            path.to_uri_component(),
            "/a%20b%22c%23d%25e%3Cf%3Eg%3Fh%60i%7Bj%7D"
        );
    }

    #[test]
    fn test_to_uri_component_escapes() {
        let path = PathString::new("/control/a1-my alias?x");
        assert_eq!(path.to_uri_component(), "/control/a1-my%20alias%3Fx");
    }
}
