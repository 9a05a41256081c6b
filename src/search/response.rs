//! Search response envelope.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{EstocError, Result};
use crate::search::aggregation::TermsResult;

/// Whether a reported total is exact or a lower bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TotalHitsRelation {
    /// The total is exact.
    Eq,
    /// The total is a lower bound.
    Gte,
}

/// The number of documents matching a query.
///
/// Newer clusters report `{"value": 10, "relation": "eq"}`, older ones a
/// bare number. Both decode to the same value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawTotalHits")]
pub struct TotalHits {
    /// Number of matching documents.
    pub value: u64,
    /// Exactness of `value`.
    pub relation: TotalHitsRelation,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTotalHits {
    Count(u64),
    Object {
        value: u64,
        relation: TotalHitsRelation,
    },
}

impl From<RawTotalHits> for TotalHits {
    fn from(raw: RawTotalHits) -> Self {
        match raw {
            RawTotalHits::Count(value) => TotalHits {
                value,
                relation: TotalHitsRelation::Eq,
            },
            RawTotalHits::Object { value, relation } => TotalHits { value, relation },
        }
    }
}

/// One matching document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hit {
    /// Collection the document lives in.
    #[serde(rename = "_index")]
    pub index: String,
    /// Document id.
    #[serde(rename = "_id")]
    pub id: String,
    /// Relevance score; absent when sorting by a field.
    #[serde(rename = "_score", default)]
    pub score: Option<f64>,
    /// The stored document.
    #[serde(rename = "_source", default)]
    pub source: Option<Value>,
    /// Sort values, when the request was sorted.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sort: Vec<Value>,
}

impl Hit {
    /// Decode the stored document into a record type.
    pub fn decode<T: serde::de::DeserializeOwned>(&self) -> Result<T> {
        let source = self
            .source
            .as_ref()
            .ok_or_else(|| EstocError::decode(format!("hit '{}' has no _source", self.id)))?;
        T::deserialize(source).map_err(|e| {
            EstocError::decode(format!("hit '{}' in '{}': {e}", self.id, self.index))
        })
    }
}

/// The `hits` section of a response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hits {
    /// Total matches, absent when the request disabled total tracking.
    #[serde(default)]
    pub total: Option<TotalHits>,
    /// Best score among the returned hits.
    #[serde(default)]
    pub max_score: Option<f64>,
    /// The returned page of hits.
    #[serde(default)]
    pub hits: Vec<Hit>,
}

/// A parsed `_search` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Server-side execution time in milliseconds.
    #[serde(default)]
    pub took: u64,
    /// Whether the search hit its timeout and returned partial results.
    #[serde(default)]
    pub timed_out: bool,
    /// The matching documents.
    pub hits: Hits,
    /// Raw aggregation results, by name.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub aggregations: Map<String, Value>,
}

impl SearchResponse {
    /// Parse a response body.
    pub fn from_json(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Total number of matching documents, or 0 if not reported.
    pub fn total_hits(&self) -> u64 {
        self.hits.total.map(|t| t.value).unwrap_or(0)
    }

    /// The returned page of hits.
    pub fn hits(&self) -> &[Hit] {
        &self.hits.hits
    }

    /// Raw result of a named aggregation.
    pub fn aggregation(&self, name: &str) -> Option<&Value> {
        self.aggregations.get(name)
    }

    /// Parsed result of a named terms aggregation.
    pub fn terms(&self, name: &str) -> Result<TermsResult> {
        let raw = self
            .aggregation(name)
            .ok_or_else(|| EstocError::decode(format!("response has no aggregation '{name}'")))?;
        TermsResult::from_json(raw)
    }
}
