//! Nested query for matching inside nested document lists.
//!
//! A nested query evaluates its inner query against each element of the list
//! at `path` separately, so conditions on two fields must hold for the same
//! element. The path must be mapped as `nested` on the cluster; on a plain
//! object field the cluster rejects the query.

use serde_json::{Map, Value};

use crate::query::query::{Query, apply_boost, describe_boost, keyed};

/// How the scores of matching nested elements feed the parent's score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreMode {
    /// Average of the matching children.
    Avg,
    /// Highest child score.
    Max,
    /// Lowest child score.
    Min,
    /// Parent scores are not affected by children.
    None,
    /// Sum of the matching children.
    Sum,
}

impl ScoreMode {
    fn as_str(&self) -> &'static str {
        match self {
            ScoreMode::Avg => "avg",
            ScoreMode::Max => "max",
            ScoreMode::Min => "min",
            ScoreMode::None => "none",
            ScoreMode::Sum => "sum",
        }
    }
}

/// A query scoped to one nested path.
#[derive(Debug, Clone)]
pub struct NestedQuery {
    path: String,
    query: Box<dyn Query>,
    score_mode: ScoreMode,
    boost: f32,
}

impl NestedQuery {
    /// Create a new nested query.
    pub fn new<S: Into<String>>(path: S, query: Box<dyn Query>, score_mode: ScoreMode) -> Self {
        NestedQuery {
            path: path.into(),
            query,
            score_mode,
            boost: 1.0,
        }
    }

    /// Set the boost factor for this query.
    pub fn with_boost(mut self, boost: f32) -> Self {
        self.boost = boost;
        self
    }

    /// Get the nested path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Get the inner query.
    pub fn inner(&self) -> &dyn Query {
        self.query.as_ref()
    }

    /// Get the score mode.
    pub fn score_mode(&self) -> ScoreMode {
        self.score_mode
    }
}

impl Query for NestedQuery {
    fn to_json(&self) -> Value {
        let mut params = Map::new();
        params.insert("path".to_string(), Value::from(self.path.clone()));
        params.insert("query".to_string(), self.query.to_json());
        params.insert(
            "score_mode".to_string(),
            Value::from(self.score_mode.as_str()),
        );
        apply_boost(&mut params, self.boost);
        keyed("nested", params)
    }

    fn boost(&self) -> f32 {
        self.boost
    }

    fn set_boost(&mut self, boost: f32) {
        self.boost = boost;
    }

    fn description(&self) -> String {
        describe_boost(
            format!("{}>{}", self.path, self.query.description()),
            self.boost,
        )
    }

    fn clone_box(&self) -> Box<dyn Query> {
        Box::new(self.clone())
    }
}
