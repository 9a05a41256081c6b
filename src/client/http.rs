//! The REST client.

use log::debug;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::client::bulk::{BulkRequest, BulkResponse};
use crate::config::ClientConfig;
use crate::error::{EstocError, Result};
use crate::query::Query;
use crate::schema::IndexMapping;
use crate::search::{SearchRequest, SearchResponse};

/// Identity of the cluster, as reported by `GET /`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterInfo {
    /// Name of the node that answered.
    #[serde(default)]
    pub name: String,
    /// Cluster name.
    #[serde(default)]
    pub cluster_name: String,
    /// Engine version.
    pub version: ClusterVersion,
    /// Free-form greeting.
    #[serde(default)]
    pub tagline: String,
}

/// Version block of [`ClusterInfo`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterVersion {
    /// Version number, e.g. "8.13.4".
    pub number: String,
    /// Distribution, present on OpenSearch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distribution: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CountResponse {
    count: u64,
}

/// Async client for one cluster.
///
/// ```no_run
/// use estoc::client::SearchClient;
/// use estoc::config::ClientConfig;
/// use estoc::query::MatchAllQuery;
/// use estoc::search::SearchRequest;
///
/// # async fn example() -> estoc::error::Result<()> {
/// let client = SearchClient::new(ClientConfig::default())?;
/// let request = SearchRequest::new("courses").query(Box::new(MatchAllQuery::new()));
/// let response = client.search(&request).await?;
/// println!("{} courses", response.total_hits());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SearchClient {
    http: Client,
    base_url: Url,
    config: ClientConfig,
}

impl SearchClient {
    /// Create a client from a configuration. Fails if the configuration is invalid.
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let base_url = config.base_url()?;
        let http = Client::builder().timeout(config.timeout()).build()?;

        Ok(SearchClient {
            http,
            base_url,
            config,
        })
    }

    /// The configuration this client was built from.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Fetch the cluster identity. Useful as a connectivity check.
    pub async fn ping(&self) -> Result<ClusterInfo> {
        let response = self.send(self.request(Method::GET, &[])?).await?;
        Ok(response.json().await?)
    }

    /// Execute a search request.
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchResponse> {
        debug!("search {}", request.description());
        self.search_body(&request.index, &request.to_body()).await
    }

    /// Execute a search with a hand-written request body.
    pub async fn search_body(&self, index: &str, body: &Value) -> Result<SearchResponse> {
        let builder = self
            .request(Method::POST, &[checked_index(index)?, "_search"])?
            .json(body);
        let response = self.send(builder).await?;
        let raw: Value = response.json().await?;
        SearchResponse::from_json(raw)
    }

    /// Count the documents in a collection, optionally restricted by a query.
    pub async fn count(&self, index: &str, query: Option<&dyn Query>) -> Result<u64> {
        let mut builder = self.request(Method::POST, &[checked_index(index)?, "_count"])?;
        if let Some(query) = query {
            builder = builder.json(&json!({ "query": query.to_json() }));
        }
        let response = self.send(builder).await?;
        let count: CountResponse = response.json().await?;
        Ok(count.count)
    }

    /// Create a collection, with an explicit mapping if given.
    pub async fn create_index(&self, index: &str, mapping: Option<&IndexMapping>) -> Result<()> {
        let mut builder = self.request(Method::PUT, &[checked_index(index)?])?;
        if let Some(mapping) = mapping {
            builder = builder.json(&mapping.to_json());
        }
        self.send(builder).await?;
        Ok(())
    }

    /// Delete a collection and all of its documents.
    pub async fn delete_index(&self, index: &str) -> Result<()> {
        self.send(self.request(Method::DELETE, &[checked_index(index)?])?)
            .await?;
        Ok(())
    }

    /// Check whether a collection exists.
    pub async fn index_exists(&self, index: &str) -> Result<bool> {
        match self
            .send(self.request(Method::HEAD, &[checked_index(index)?])?)
            .await
        {
            Ok(_) => Ok(true),
            Err(e) if e.is_status(404) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Store one document under the given id, replacing any existing one.
    pub async fn index_document(&self, index: &str, id: &str, document: &Value) -> Result<()> {
        let segments = [checked_index(index)?, "_doc", checked_id(id)?];
        self.send(self.request(Method::PUT, &segments)?.json(document))
            .await?;
        Ok(())
    }

    /// Send a bulk request. Per-action failures are reported in the response,
    /// not as an error.
    pub async fn bulk(&self, request: &BulkRequest) -> Result<BulkResponse> {
        let body = request.to_ndjson()?;
        let builder = self
            .request(Method::POST, &["_bulk"])?
            .header(reqwest::header::CONTENT_TYPE, "application/x-ndjson")
            .body(body);
        let response = self.send(builder).await?;
        Ok(response.json().await?)
    }

    /// Make recent writes to a collection visible to search.
    pub async fn refresh(&self, index: &str) -> Result<()> {
        self.send(self.request(Method::POST, &[checked_index(index)?, "_refresh"])?)
            .await?;
        Ok(())
    }

    fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder> {
        let url = self.endpoint(segments)?;
        debug!("{method} {url}");

        let mut builder = self.http.request(method, url);
        if let Some(username) = &self.config.username {
            builder = builder.basic_auth(username, self.config.password.as_ref());
        }
        Ok(builder)
    }

    /// Append percent-encoded path segments to the base URL. Segments can
    /// never change the scheme, host or port.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                EstocError::config(format!("cluster url '{}' cannot be a base", self.config.url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(EstocError::status(status.as_u16(), error_reason(status, &body)))
    }
}

/// Characters the cluster forbids in collection names.
const FORBIDDEN_INDEX_CHARS: [char; 12] = ['\\', '/', '*', '?', '"', '<', '>', '|', ',', '#', ':', ' '];

/// Reject collection names the cluster would refuse or misroute.
fn checked_index(index: &str) -> Result<&str> {
    if index.is_empty()
        || index == "."
        || index == ".."
        || index.starts_with(['_', '-', '+'])
        || index.contains(FORBIDDEN_INDEX_CHARS)
        || index.chars().any(|c| c.is_uppercase())
    {
        return Err(EstocError::other(format!("invalid collection name '{index}'")));
    }
    Ok(index)
}

/// Reject document ids that would not stay a single path segment.
fn checked_id(id: &str) -> Result<&str> {
    if id.is_empty() || id == "." || id == ".." || id.contains(['/', '?', '#', '%']) {
        return Err(EstocError::other(format!("invalid document id '{id}'")));
    }
    Ok(id)
}

/// Pull `type: reason` out of an error body, falling back to the raw body or
/// the status text.
fn error_reason(status: StatusCode, body: &str) -> String {
    let parsed = serde_json::from_str::<Value>(body).ok();
    let error = parsed.as_ref().and_then(|v| v.get("error"));

    match error {
        Some(Value::Object(object)) => {
            let kind = object.get("type").and_then(Value::as_str);
            let reason = object.get("reason").and_then(Value::as_str);
            match (kind, reason) {
                (Some(kind), Some(reason)) => format!("{kind}: {reason}"),
                (Some(only), None) | (None, Some(only)) => only.to_string(),
                (None, None) => body.to_string(),
            }
        }
        Some(Value::String(message)) => message.clone(),
        _ if !body.trim().is_empty() => body.trim().to_string(),
        _ => status
            .canonical_reason()
            .unwrap_or("unknown status")
            .to_string(),
    }
}
