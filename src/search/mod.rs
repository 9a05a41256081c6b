//! Search requests, aggregations and responses.

pub mod aggregation;
pub mod decoder;
pub mod response;
pub mod sort;

pub use self::aggregation::*;
pub use self::decoder::{decode_hits, decode_hits_lenient};
pub use self::response::{Hit, Hits, SearchResponse, TotalHits, TotalHitsRelation};
pub use self::sort::{SortField, SortOrder};

use serde_json::{Map, Value};

use crate::query::Query;

/// A search against one collection: query, paging, sort order and aggregations.
///
/// ```
/// use estoc::query::MatchAllQuery;
/// use estoc::search::{SearchRequest, SortField, SortOrder};
///
/// let request = SearchRequest::new("vehicles")
///     .query(Box::new(MatchAllQuery::new()))
///     .offset(0)
///     .limit(5)
///     .sort(SortField::new("price", SortOrder::Desc));
///
/// let body = request.to_body();
/// assert_eq!(body["size"], 5);
/// assert_eq!(body["sort"][0]["price"]["order"], "desc");
/// ```
#[derive(Debug, Clone)]
pub struct SearchRequest {
    /// Collection to search.
    pub index: String,
    /// The query to execute. `None` lets the cluster match everything.
    pub query: Option<Box<dyn Query>>,
    /// Number of hits to skip.
    pub offset: Option<usize>,
    /// Maximum number of hits to return. `Some(0)` returns only totals and aggregations.
    pub limit: Option<usize>,
    /// Sort order, most significant first.
    pub sort: Vec<SortField>,
    /// Aggregations computed over the matching documents.
    pub aggregations: Vec<Aggregation>,
    /// Ask for an exact total instead of the cluster's default lower bound.
    pub track_total_hits: bool,
}

impl SearchRequest {
    /// Create a new search request against a collection.
    pub fn new<S: Into<String>>(index: S) -> Self {
        SearchRequest {
            index: index.into(),
            query: None,
            offset: None,
            limit: None,
            sort: Vec::new(),
            aggregations: Vec::new(),
            track_total_hits: false,
        }
    }

    /// Set the query.
    pub fn query(mut self, query: Box<dyn Query>) -> Self {
        self.query = Some(query);
        self
    }

    /// Set the number of hits to skip.
    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Set the maximum number of hits to return.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Append a sort key.
    pub fn sort(mut self, sort: SortField) -> Self {
        self.sort.push(sort);
        self
    }

    /// Add an aggregation.
    pub fn aggregation<A: Into<Aggregation>>(mut self, aggregation: A) -> Self {
        self.aggregations.push(aggregation.into());
        self
    }

    /// Request an exact hit total.
    pub fn track_total_hits(mut self, track: bool) -> Self {
        self.track_total_hits = track;
        self
    }

    /// Render the `_search` request body.
    pub fn to_body(&self) -> Value {
        let mut body = Map::new();
        if let Some(query) = &self.query {
            body.insert("query".to_string(), query.to_json());
        }
        if let Some(offset) = self.offset {
            body.insert("from".to_string(), Value::from(offset));
        }
        if let Some(limit) = self.limit {
            body.insert("size".to_string(), Value::from(limit));
        }
        if !self.sort.is_empty() {
            body.insert(
                "sort".to_string(),
                Value::Array(self.sort.iter().map(SortField::to_json).collect()),
            );
        }
        if !self.aggregations.is_empty() {
            body.insert(
                "aggs".to_string(),
                aggregation::aggregations_json(&self.aggregations),
            );
        }
        if self.track_total_hits {
            body.insert("track_total_hits".to_string(), Value::Bool(true));
        }
        Value::Object(body)
    }

    /// One-line summary for logs and listings.
    pub fn description(&self) -> String {
        let mut description = format!(
            "{} ? {}",
            self.index,
            self.query
                .as_ref()
                .map(|q| q.description())
                .unwrap_or_else(|| "*:*".to_string())
        );
        if self.offset.is_some() || self.limit.is_some() {
            description.push_str(&format!(
                " [{}..+{}]",
                self.offset.unwrap_or(0),
                self.limit
                    .map(|l| l.to_string())
                    .unwrap_or_else(|| "default".to_string())
            ));
        }
        if !self.aggregations.is_empty() {
            let names: Vec<&str> = self.aggregations.iter().map(Aggregation::name).collect();
            description.push_str(&format!(" aggs={}", names.join(",")));
        }
        description
    }
}
