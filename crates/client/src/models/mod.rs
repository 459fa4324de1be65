//! Data models for Ariel API responses.

mod search;

pub use search::{Row, SearchInfo, SearchJob, SearchStatus};
