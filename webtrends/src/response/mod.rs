//! Response envelope and decode strategies.

mod envelope;
mod shape;

pub(crate) use envelope::redacted_path_and_query;
pub use envelope::WebTrendsResponse;
pub(crate) use shape::decode;
pub use shape::{Many, NoContent, ResponseShape, Single};
