//! # estoc
//!
//! A typed query harness for Elasticsearch-compatible search clusters.
//!
//! ## Features
//!
//! - Query DSL builders rendered to the cluster's JSON
//! - Terms and metric aggregations with typed results
//! - Async REST client for search, count, indexing and collection admin
//! - Fixture collections with a loader that reports partial seeding
//! - A catalog of query cases checked against the fixture data

pub mod cases;
pub mod cli;
pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod fixtures;
pub mod query;
pub mod schema;
pub mod search;

pub mod prelude {
    pub use crate::client::SearchClient;
    pub use crate::config::ClientConfig;
    pub use crate::error::{EstocError, Result};
    pub use crate::query::Query;
    pub use crate::search::{SearchRequest, SearchResponse, decode_hits};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
