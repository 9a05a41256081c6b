//! Base query trait and common query functionality.

use std::fmt::Debug;

use serde_json::{Map, Value};

/// Trait for search queries.
pub trait Query: Send + Sync + Debug {
    /// Render this query as a query DSL object, e.g. `{"match": {...}}`.
    fn to_json(&self) -> Value;

    /// Get the boost factor for this query.
    fn boost(&self) -> f32;

    /// Set the boost factor for this query.
    fn set_boost(&mut self, boost: f32);

    /// Get a human-readable description of this query.
    fn description(&self) -> String;

    /// Clone this query.
    fn clone_box(&self) -> Box<dyn Query>;

    /// Get the field name this query searches in, if applicable.
    /// Returns None for queries that don't target a single field (e.g., BooleanQuery).
    fn field(&self) -> Option<&str> {
        None
    }
}

impl Clone for Box<dyn Query> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Insert `boost` into a parameter object unless it is the neutral 1.0.
pub(crate) fn apply_boost(params: &mut Map<String, Value>, boost: f32) {
    if boost != 1.0 {
        params.insert("boost".to_string(), Value::from(boost as f64));
    }
}

/// Wrap `params` as `{kind: {field: params}}`, the shape shared by the
/// single-field full-text queries.
pub(crate) fn field_query(kind: &str, field: &str, params: Map<String, Value>) -> Value {
    let mut inner = Map::new();
    inner.insert(field.to_string(), Value::Object(params));
    let mut outer = Map::new();
    outer.insert(kind.to_string(), Value::Object(inner));
    Value::Object(outer)
}

/// Wrap `params` as `{kind: params}`.
pub(crate) fn keyed(kind: &str, params: Map<String, Value>) -> Value {
    let mut outer = Map::new();
    outer.insert(kind.to_string(), Value::Object(params));
    Value::Object(outer)
}

/// Append `^boost` to a description when the boost is not neutral.
pub(crate) fn describe_boost(description: String, boost: f32) -> String {
    if boost == 1.0 {
        description
    } else {
        format!("{description}^{boost}")
    }
}
