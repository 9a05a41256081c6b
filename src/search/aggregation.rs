//! Bucket and metric aggregations.
//!
//! The request side builds `aggs` objects; the result side parses the
//! `aggregations` section of a response into [`TermsResult`] buckets and
//! [`Stats`] values. The cluster does all of the counting and arithmetic.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::error::{EstocError, Result};

/// The single-field metric computed by a [`MetricAggregation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    /// Arithmetic mean.
    Avg,
    /// Smallest value.
    Min,
    /// Largest value.
    Max,
    /// Count, min, max, avg and sum in one.
    Stats,
}

impl MetricKind {
    fn as_str(&self) -> &'static str {
        match self {
            MetricKind::Avg => "avg",
            MetricKind::Min => "min",
            MetricKind::Max => "max",
            MetricKind::Stats => "stats",
        }
    }
}

/// A metric over one numeric field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricAggregation {
    /// Name the result is reported under.
    pub name: String,
    /// What to compute.
    pub kind: MetricKind,
    /// Field to compute it on.
    pub field: String,
}

impl MetricAggregation {
    /// Create a new metric aggregation.
    pub fn new<N: Into<String>, F: Into<String>>(name: N, kind: MetricKind, field: F) -> Self {
        MetricAggregation {
            name: name.into(),
            kind,
            field: field.into(),
        }
    }

    /// Average of a field.
    pub fn avg<N: Into<String>, F: Into<String>>(name: N, field: F) -> Self {
        Self::new(name, MetricKind::Avg, field)
    }

    /// Minimum of a field.
    pub fn min<N: Into<String>, F: Into<String>>(name: N, field: F) -> Self {
        Self::new(name, MetricKind::Min, field)
    }

    /// Maximum of a field.
    pub fn max<N: Into<String>, F: Into<String>>(name: N, field: F) -> Self {
        Self::new(name, MetricKind::Max, field)
    }

    /// Count/min/max/avg/sum of a field.
    pub fn stats<N: Into<String>, F: Into<String>>(name: N, field: F) -> Self {
        Self::new(name, MetricKind::Stats, field)
    }
}

/// Groups documents into one bucket per distinct field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermsAggregation {
    /// Name the result is reported under.
    pub name: String,
    /// Field to group on. Must be an exact-value field (e.g. `make.keyword`).
    pub field: String,
    /// Maximum number of buckets; the cluster defaults to 10.
    pub size: Option<usize>,
    /// Aggregations computed inside each bucket.
    pub sub_aggregations: Vec<Aggregation>,
}

impl TermsAggregation {
    /// Create a new terms aggregation.
    pub fn new<N: Into<String>, F: Into<String>>(name: N, field: F) -> Self {
        TermsAggregation {
            name: name.into(),
            field: field.into(),
            size: None,
            sub_aggregations: Vec::new(),
        }
    }

    /// Set the maximum number of buckets.
    pub fn with_size(mut self, size: usize) -> Self {
        self.size = Some(size);
        self
    }

    /// Add an aggregation computed per bucket.
    pub fn sub_aggregation<A: Into<Aggregation>>(mut self, aggregation: A) -> Self {
        self.sub_aggregations.push(aggregation.into());
        self
    }
}

/// Any aggregation a request can carry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Aggregation {
    /// Bucketing by distinct value.
    Terms(TermsAggregation),
    /// Single metric.
    Metric(MetricAggregation),
}

impl Aggregation {
    /// Name the result is reported under.
    pub fn name(&self) -> &str {
        match self {
            Aggregation::Terms(terms) => &terms.name,
            Aggregation::Metric(metric) => &metric.name,
        }
    }

    /// Render the aggregation body (without its name).
    pub fn body(&self) -> Value {
        match self {
            Aggregation::Terms(terms) => {
                let mut params = Map::new();
                params.insert("field".to_string(), Value::from(terms.field.clone()));
                if let Some(size) = terms.size {
                    params.insert("size".to_string(), Value::from(size));
                }
                let mut body = Map::new();
                body.insert("terms".to_string(), Value::Object(params));
                if !terms.sub_aggregations.is_empty() {
                    body.insert(
                        "aggs".to_string(),
                        aggregations_json(&terms.sub_aggregations),
                    );
                }
                Value::Object(body)
            }
            Aggregation::Metric(metric) => {
                json!({ metric.kind.as_str(): { "field": metric.field } })
            }
        }
    }
}

impl From<TermsAggregation> for Aggregation {
    fn from(terms: TermsAggregation) -> Self {
        Aggregation::Terms(terms)
    }
}

impl From<MetricAggregation> for Aggregation {
    fn from(metric: MetricAggregation) -> Self {
        Aggregation::Metric(metric)
    }
}

/// Render a list of aggregations as a `{name: body}` object.
pub(crate) fn aggregations_json(aggregations: &[Aggregation]) -> Value {
    let mut object = Map::new();
    for aggregation in aggregations {
        object.insert(aggregation.name().to_string(), aggregation.body());
    }
    Value::Object(object)
}

/// Result of a `stats` aggregation. Min/max/avg are absent for empty buckets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    /// Number of values.
    pub count: u64,
    /// Smallest value.
    pub min: Option<f64>,
    /// Largest value.
    pub max: Option<f64>,
    /// Mean value.
    pub avg: Option<f64>,
    /// Total.
    pub sum: f64,
}

/// One bucket of a terms aggregation result.
#[derive(Debug, Clone, PartialEq)]
pub struct TermsBucket {
    /// The distinct value this bucket groups.
    pub key: String,
    /// Number of documents in the bucket.
    pub doc_count: u64,
    /// Raw results of the per-bucket sub-aggregations, by name.
    pub sub_aggregations: Map<String, Value>,
}

impl TermsBucket {
    /// Parse a bucket object such as `{"key": "dodge", "doc_count": 5, "avg_price": {"value": 18900.0}}`.
    pub fn from_json(value: &Value) -> Result<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| EstocError::decode("terms bucket is not an object"))?;

        let key = match object.get("key_as_string").or_else(|| object.get("key")) {
            Some(Value::String(s)) => s.clone(),
            Some(other @ (Value::Number(_) | Value::Bool(_))) => other.to_string(),
            _ => return Err(EstocError::decode("terms bucket has no key")),
        };
        let doc_count = object
            .get("doc_count")
            .and_then(Value::as_u64)
            .ok_or_else(|| EstocError::decode(format!("bucket '{key}' has no doc_count")))?;

        let sub_aggregations = object
            .iter()
            .filter(|(name, _)| !matches!(name.as_str(), "key" | "key_as_string" | "doc_count"))
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();

        Ok(TermsBucket {
            key,
            doc_count,
            sub_aggregations,
        })
    }

    /// Value of a single-value metric sub-aggregation (avg/min/max).
    pub fn metric(&self, name: &str) -> Option<f64> {
        self.sub_aggregations
            .get(name)
            .and_then(|agg| agg.get("value"))
            .and_then(Value::as_f64)
    }

    /// Result of a `stats` sub-aggregation.
    pub fn stats(&self, name: &str) -> Result<Stats> {
        let raw = self.sub_aggregations.get(name).ok_or_else(|| {
            EstocError::decode(format!("bucket '{}' has no aggregation '{name}'", self.key))
        })?;
        Ok(Stats::deserialize(raw)?)
    }
}

/// Parsed result of a terms aggregation.
#[derive(Debug, Clone, PartialEq)]
pub struct TermsResult {
    /// Buckets in the order the cluster returned them (by count, descending).
    pub buckets: Vec<TermsBucket>,
    /// Documents that fell into buckets beyond the requested size.
    pub sum_other_doc_count: u64,
}

impl TermsResult {
    /// Parse a terms aggregation result object.
    pub fn from_json(value: &Value) -> Result<Self> {
        let buckets = value
            .get("buckets")
            .and_then(Value::as_array)
            .ok_or_else(|| EstocError::decode("terms aggregation has no buckets array"))?
            .iter()
            .map(TermsBucket::from_json)
            .collect::<Result<Vec<_>>>()?;
        let sum_other_doc_count = value
            .get("sum_other_doc_count")
            .and_then(Value::as_u64)
            .unwrap_or(0);

        Ok(TermsResult {
            buckets,
            sum_other_doc_count,
        })
    }

    /// Find a bucket by key.
    pub fn bucket(&self, key: &str) -> Option<&TermsBucket> {
        self.buckets.iter().find(|b| b.key == key)
    }

    /// Map of bucket key to document count.
    pub fn doc_counts(&self) -> BTreeMap<String, u64> {
        self.buckets
            .iter()
            .map(|b| (b.key.clone(), b.doc_count))
            .collect()
    }

    /// Number of buckets.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Check if there are no buckets.
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}
