//! QRadar Ariel search client.
//!
//! This crate runs AQL searches against a QRadar console's Ariel REST API:
//! submit a query, poll until it finishes within a wall-clock budget, load the
//! results with retries, and delete the search afterwards. It supports both
//! basic and authorized-service-token authentication.

mod auth;
pub mod backend;
pub mod cancellation;
pub mod client;
pub mod error;
pub mod lifecycle;
pub mod metrics;
pub mod models;
pub mod observer;
pub mod query;
pub mod results;
pub mod table;

pub mod endpoints;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use auth::AuthStrategy;
pub use backend::SearchBackend;
pub use cancellation::CancellationToken;
pub use client::QRadarClient;
pub use client::builder::QRadarClientBuilder;
pub use error::{ClientError, Result};
pub use lifecycle::{FetchRetryPolicy, JobController, LifecycleSettings};
pub use metrics::MetricsObserver;
pub use models::{Row, SearchInfo, SearchJob, SearchStatus};
pub use observer::{
    Observers, SearchEvent, SearchObserver, SearchOutcome, TracingObserver, redact_query,
};
pub use query::{AqlQuery, Priority};
pub use results::{ResultSet, materialize};
pub use table::ResultTable;
