//! Query strings and their builder.

use std::fmt;
use std::ops::Add;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::error::ArgumentError;

/// Everything except RFC 3986 unreserved characters is escaped.
const QUERY_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// A value that may be placed in a query string.
///
/// Returning `None` means "leave this parameter out". Booleans render as
/// `true`/`false` and numbers in their invariant decimal form.
pub trait IntoQueryValue {
    /// Converts into the rendered value, or `None` to skip the parameter.
    fn into_query_value(self) -> Option<String>;
}

macro_rules! display_query_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl IntoQueryValue for $ty {
                fn into_query_value(self) -> Option<String> {
                    Some(self.to_string())
                }
            }
        )*
    };
}

display_query_value!(bool, i32, i64, u16, u32, u64, usize, String, &str, &String, crate::State);

impl<T: IntoQueryValue> IntoQueryValue for Option<T> {
    fn into_query_value(self) -> Option<String> {
        self.and_then(IntoQueryValue::into_query_value)
    }
}

/// An immutable, possibly empty, ordered set of query parameters.
///
/// Parameters render in insertion order. Two query strings can be layered
/// with `+`, the right-hand parameters following the left-hand ones.
///
/// ## Examples
///
/// ```rust
/// use webtrends::QueryString;
///
/// let query = QueryString::create("debug", "false") + QueryString::create("keyToken", "a b");
/// assert_eq!(query.to_uri_component(), "?debug=false&keyToken=a%20b");
/// assert_eq!(QueryString::empty().to_uri_component(), "");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct QueryString {
    pairs: Vec<(String, String)>,
}

impl QueryString {
    /// Returns a query string with no parameters.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a query string holding a single parameter.
    pub fn create(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            pairs: vec![(name.into(), value.into())],
        }
    }

    /// Returns `true` if there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Iterates over the unencoded `(name, value)` pairs in order.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Looks up the first value for `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs()
            .find(|(n, _)| *n == name)
            .map(|(_, value)| value)
    }

    /// Renders the encoded query without the leading `?`.
    pub fn encoded(&self) -> String {
        self.pairs
            .iter()
            .map(|(name, value)| {
                format!(
                    "{}={}",
                    utf8_percent_encode(name, QUERY_ENCODE_SET),
                    utf8_percent_encode(value, QUERY_ENCODE_SET)
                )
            })
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Renders the query for appending to a URI: `?a=b&c=d`, or an empty
    /// string when there are no parameters.
    pub fn to_uri_component(&self) -> String {
        if self.is_empty() {
            String::new()
        } else {
            format!("?{}", self.encoded())
        }
    }
}

impl Add for QueryString {
    type Output = QueryString;

    fn add(mut self, rhs: QueryString) -> Self::Output {
        self.pairs.extend(rhs.pairs);
        self
    }
}

impl fmt::Display for QueryString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_uri_component())
    }
}

/// Accumulates parameters into a [`QueryString`], skipping absent values.
///
/// ## Examples
///
/// ```rust
/// use webtrends::QueryStringBuilder;
///
/// let query = QueryStringBuilder::new()
///     .add_parameter("debug", true)?
///     .add_parameter("referrer", None::<String>)?
///     .build();
/// assert_eq!(query.to_uri_component(), "?debug=true");
/// # Ok::<(), webtrends::ArgumentError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct QueryStringBuilder {
    query: QueryString,
}

impl QueryStringBuilder {
    /// Starts an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an existing query string.
    pub fn from_query(query: QueryString) -> Self {
        Self { query }
    }

    /// Appends `name=value`, unless `value` is absent.
    ///
    /// ## Errors
    ///
    /// Returns [`ArgumentError::Empty`] if `name` is blank.
    pub fn add_parameter(
        mut self,
        name: &str,
        value: impl IntoQueryValue,
    ) -> Result<Self, ArgumentError> {
        ArgumentError::ensure_not_empty(name, "name")?;

        if let Some(value) = value.into_query_value() {
            self.query = self.query + QueryString::create(name, value);
        }
        Ok(self)
    }

    /// Returns `true` once at least one parameter has been added.
    pub fn has_query(&self) -> bool {
        !self.query.is_empty()
    }

    /// Finishes the query string.
    pub fn build(self) -> QueryString {
        self.query
    }
}
