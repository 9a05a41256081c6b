//! Field existence query.

use serde_json::{Map, Value};

use crate::query::query::{Query, apply_boost, describe_boost, keyed};

/// A query that matches documents holding any indexed value for a field.
///
/// Documents where the field is missing or null do not match.
#[derive(Debug, Clone)]
pub struct ExistsQuery {
    field: String,
    boost: f32,
}

impl ExistsQuery {
    /// Create a new exists query.
    pub fn new<S: Into<String>>(field: S) -> Self {
        ExistsQuery {
            field: field.into(),
            boost: 1.0,
        }
    }
}

impl Query for ExistsQuery {
    fn to_json(&self) -> Value {
        let mut params = Map::new();
        params.insert("field".to_string(), Value::from(self.field.clone()));
        apply_boost(&mut params, self.boost);
        keyed("exists", params)
    }

    fn boost(&self) -> f32 {
        self.boost
    }

    fn set_boost(&mut self, boost: f32) {
        self.boost = boost;
    }

    fn description(&self) -> String {
        describe_boost(format!("{}:*", self.field), self.boost)
    }

    fn clone_box(&self) -> Box<dyn Query> {
        Box::new(self.clone())
    }

    fn field(&self) -> Option<&str> {
        Some(&self.field)
    }
}
