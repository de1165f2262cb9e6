//! Small value types for composing request URIs.

mod path_string;
mod query_string;

pub(crate) use path_string::combine_paths;
pub use path_string::PathString;
pub use query_string::{IntoQueryValue, QueryString, QueryStringBuilder};
