//! Full-text match queries.

use serde_json::{Map, Value};

use crate::query::query::{Query, apply_boost, describe_boost, field_query, keyed};

/// How the analyzed terms of a match query are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// Any term may match.
    Or,
    /// Every term must match.
    And,
}

impl Operator {
    fn as_str(&self) -> &'static str {
        match self {
            Operator::Or => "or",
            Operator::And => "and",
        }
    }
}

/// A query that matches every document in the collection.
#[derive(Debug, Clone)]
pub struct MatchAllQuery {
    boost: f32,
}

impl MatchAllQuery {
    /// Create a new match-all query.
    pub fn new() -> Self {
        MatchAllQuery { boost: 1.0 }
    }

    /// Set the boost factor for this query.
    pub fn with_boost(mut self, boost: f32) -> Self {
        self.boost = boost;
        self
    }
}

impl Default for MatchAllQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl Query for MatchAllQuery {
    fn to_json(&self) -> Value {
        let mut params = Map::new();
        apply_boost(&mut params, self.boost);
        keyed("match_all", params)
    }

    fn boost(&self) -> f32 {
        self.boost
    }

    fn set_boost(&mut self, boost: f32) {
        self.boost = boost;
    }

    fn description(&self) -> String {
        describe_boost("*:*".to_string(), self.boost)
    }

    fn clone_box(&self) -> Box<dyn Query> {
        Box::new(self.clone())
    }
}

/// An analyzed full-text query against a single field.
///
/// The text is run through the field's analyzer on the cluster side, so
/// `"computer"` matches a `name` of `"Computer Science 101"`.
#[derive(Debug, Clone)]
pub struct MatchQuery {
    field: String,
    text: String,
    operator: Option<Operator>,
    boost: f32,
}

impl MatchQuery {
    /// Create a new match query.
    pub fn new<F: Into<String>, T: Into<String>>(field: F, text: T) -> Self {
        MatchQuery {
            field: field.into(),
            text: text.into(),
            operator: None,
            boost: 1.0,
        }
    }

    /// Set how analyzed terms combine.
    pub fn with_operator(mut self, operator: Operator) -> Self {
        self.operator = Some(operator);
        self
    }

    /// Set the boost factor for this query.
    pub fn with_boost(mut self, boost: f32) -> Self {
        self.boost = boost;
        self
    }

    /// Get the query text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Get the operator, if one was set.
    pub fn operator(&self) -> Option<Operator> {
        self.operator
    }
}

impl Query for MatchQuery {
    fn to_json(&self) -> Value {
        let mut params = Map::new();
        params.insert("query".to_string(), Value::from(self.text.clone()));
        if let Some(operator) = self.operator {
            params.insert("operator".to_string(), Value::from(operator.as_str()));
        }
        apply_boost(&mut params, self.boost);
        field_query("match", &self.field, params)
    }

    fn boost(&self) -> f32 {
        self.boost
    }

    fn set_boost(&mut self, boost: f32) {
        self.boost = boost;
    }

    fn description(&self) -> String {
        describe_boost(format!("{}:{}", self.field, self.text), self.boost)
    }

    fn clone_box(&self) -> Box<dyn Query> {
        Box::new(self.clone())
    }

    fn field(&self) -> Option<&str> {
        Some(&self.field)
    }
}
