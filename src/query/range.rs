//! Range query implementation for querying within value ranges.

use serde_json::{Map, Value};

use crate::query::query::{Query, apply_boost, describe_boost, field_query};

/// Bound type for range queries.
#[derive(Debug, Clone, PartialEq)]
pub enum Bound<T> {
    /// Inclusive bound.
    Included(T),
    /// Exclusive bound.
    Excluded(T),
    /// Unbounded (no limit).
    Unbounded,
}

impl<T> Bound<T> {
    /// Check whether this bound limits anything.
    pub fn is_bounded(&self) -> bool {
        !matches!(self, Bound::Unbounded)
    }
}

impl<T: PartialOrd> Bound<T> {
    /// Check if a value satisfies this bound as a lower bound.
    pub fn contains_lower(&self, value: &T) -> bool {
        match self {
            Bound::Included(bound) => value >= bound,
            Bound::Excluded(bound) => value > bound,
            Bound::Unbounded => true,
        }
    }

    /// Check if a value satisfies this bound as an upper bound.
    pub fn contains_upper(&self, value: &T) -> bool {
        match self {
            Bound::Included(bound) => value <= bound,
            Bound::Excluded(bound) => value < bound,
            Bound::Unbounded => true,
        }
    }
}

/// A query that matches documents with field values within a specified range.
///
/// Bounds are JSON values so the same type covers numbers and dates:
///
/// ```
/// use estoc::query::{Query, RangeQuery};
///
/// let query = RangeQuery::new("students_enrolled").gte(10).lte(30);
/// assert_eq!(query.to_json()["range"]["students_enrolled"]["gte"], 10);
/// ```
#[derive(Debug, Clone)]
pub struct RangeQuery {
    /// The field to search in.
    field: String,
    /// Lower bound of the range.
    lower_bound: Bound<Value>,
    /// Upper bound of the range.
    upper_bound: Bound<Value>,
    /// Date format used by the cluster to parse string bounds.
    format: Option<String>,
    /// The boost factor for this query.
    boost: f32,
}

impl RangeQuery {
    /// Create an unbounded range query on a field.
    pub fn new<S: Into<String>>(field: S) -> Self {
        Self::with_bounds(field, Bound::Unbounded, Bound::Unbounded)
    }

    /// Create a range query with custom bound types.
    pub fn with_bounds<S: Into<String>>(
        field: S,
        lower_bound: Bound<Value>,
        upper_bound: Bound<Value>,
    ) -> Self {
        RangeQuery {
            field: field.into(),
            lower_bound,
            upper_bound,
            format: None,
            boost: 1.0,
        }
    }

    /// Create a range query with both bounds inclusive.
    pub fn between<S: Into<String>, L: Into<Value>, U: Into<Value>>(
        field: S,
        lower: L,
        upper: U,
    ) -> Self {
        Self::new(field).gte(lower).lte(upper)
    }

    /// Set an inclusive lower bound.
    pub fn gte<V: Into<Value>>(mut self, value: V) -> Self {
        self.lower_bound = Bound::Included(value.into());
        self
    }

    /// Set an exclusive lower bound.
    pub fn gt<V: Into<Value>>(mut self, value: V) -> Self {
        self.lower_bound = Bound::Excluded(value.into());
        self
    }

    /// Set an inclusive upper bound.
    pub fn lte<V: Into<Value>>(mut self, value: V) -> Self {
        self.upper_bound = Bound::Included(value.into());
        self
    }

    /// Set an exclusive upper bound.
    pub fn lt<V: Into<Value>>(mut self, value: V) -> Self {
        self.upper_bound = Bound::Excluded(value.into());
        self
    }

    /// Set the date format for string bounds, e.g. `yyyy-MM-dd`.
    pub fn with_format<S: Into<String>>(mut self, format: S) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Set the boost factor for this query.
    pub fn with_boost(mut self, boost: f32) -> Self {
        self.boost = boost;
        self
    }

    /// Get the lower bound.
    pub fn lower_bound(&self) -> &Bound<Value> {
        &self.lower_bound
    }

    /// Get the upper bound.
    pub fn upper_bound(&self) -> &Bound<Value> {
        &self.upper_bound
    }
}

fn describe_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl Query for RangeQuery {
    fn to_json(&self) -> Value {
        let mut params = Map::new();
        match &self.lower_bound {
            Bound::Included(v) => {
                params.insert("gte".to_string(), v.clone());
            }
            Bound::Excluded(v) => {
                params.insert("gt".to_string(), v.clone());
            }
            Bound::Unbounded => {}
        }
        match &self.upper_bound {
            Bound::Included(v) => {
                params.insert("lte".to_string(), v.clone());
            }
            Bound::Excluded(v) => {
                params.insert("lt".to_string(), v.clone());
            }
            Bound::Unbounded => {}
        }
        if let Some(format) = &self.format {
            params.insert("format".to_string(), Value::from(format.clone()));
        }
        apply_boost(&mut params, self.boost);
        field_query("range", &self.field, params)
    }

    fn boost(&self) -> f32 {
        self.boost
    }

    fn set_boost(&mut self, boost: f32) {
        self.boost = boost;
    }

    fn description(&self) -> String {
        let lower = match &self.lower_bound {
            Bound::Included(v) => format!("[{}", describe_value(v)),
            Bound::Excluded(v) => format!("{{{}", describe_value(v)),
            Bound::Unbounded => "[*".to_string(),
        };
        let upper = match &self.upper_bound {
            Bound::Included(v) => format!("{}]", describe_value(v)),
            Bound::Excluded(v) => format!("{}}}", describe_value(v)),
            Bound::Unbounded => "*]".to_string(),
        };
        describe_boost(format!("{}:{lower} TO {upper}", self.field), self.boost)
    }

    fn clone_box(&self) -> Box<dyn Query> {
        Box::new(self.clone())
    }

    fn field(&self) -> Option<&str> {
        Some(&self.field)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_inclusive_range_json() {
        let query = RangeQuery::between("students_enrolled", 10, 30);
        assert_eq!(
            query.to_json(),
            json!({"range": {"students_enrolled": {"gte": 10, "lte": 30}}})
        );
        assert_eq!(query.description(), "students_enrolled:[10 TO 30]");
    }

    #[test]
    fn test_exclusive_and_open_bounds() {
        let query = RangeQuery::new("price").gt(20000);
        assert_eq!(query.to_json(), json!({"range": {"price": {"gt": 20000}}}));
        assert!(query.lower_bound().is_bounded());
        assert!(!query.upper_bound().is_bounded());
        assert_eq!(query.description(), "price:{20000 TO *]");
    }

    #[test]
    fn test_date_range_with_format() {
        let query = RangeQuery::new("sold")
            .gte("2016-01-01")
            .lt("2016-07-01")
            .with_format("yyyy-MM-dd");
        assert_eq!(
            query.to_json(),
            json!({"range": {"sold": {"gte": "2016-01-01", "lt": "2016-07-01", "format": "yyyy-MM-dd"}}})
        );
    }

    #[test]
    fn test_bound_contains() {
        let lower = Bound::Included(10);
        let upper = Bound::Excluded(30);
        assert!(lower.contains_lower(&10));
        assert!(!lower.contains_lower(&9));
        assert!(upper.contains_upper(&29));
        assert!(!upper.contains_upper(&30));
        assert!(Bound::<i32>::Unbounded.contains_upper(&i32::MAX));
    }
}
