//! HTTP client for an Elasticsearch-compatible cluster.
//!
//! [`SearchClient`] speaks the cluster's REST/JSON protocol: searches, counts,
//! collection administration, single-document and bulk indexing. Every call
//! is one awaited round trip; nothing is retried.

pub mod bulk;
pub mod http;

pub use self::bulk::{BulkItem, BulkOperation, BulkRequest, BulkResponse};
pub use self::http::{ClusterInfo, SearchClient};
