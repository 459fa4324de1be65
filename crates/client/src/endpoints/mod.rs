//! Ariel REST API endpoint implementations.
//!
//! Each function performs exactly one HTTP request. Retry, polling and
//! cleanup policy live in [`crate::lifecycle`].

mod request;
mod searches;
pub mod url_encoding;

pub use request::{api_error, send_request};
pub use searches::{create_search, delete_search, get_results, get_search};
pub use url_encoding::encode_path_segment;
