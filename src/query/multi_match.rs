//! Multi-field match query.

use serde_json::{Map, Value};

use crate::query::query::{Query, apply_boost, describe_boost, keyed};

/// How a multi-match query combines per-field scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MultiMatchType {
    /// Score of the best matching field.
    BestFields,
    /// Sum of the scores of all matching fields.
    MostFields,
    /// Treat the fields as one combined field.
    CrossFields,
    /// Run a phrase match on each field.
    Phrase,
    /// Run a phrase-prefix match on each field.
    PhrasePrefix,
}

impl MultiMatchType {
    fn as_str(&self) -> &'static str {
        match self {
            MultiMatchType::BestFields => "best_fields",
            MultiMatchType::MostFields => "most_fields",
            MultiMatchType::CrossFields => "cross_fields",
            MultiMatchType::Phrase => "phrase",
            MultiMatchType::PhrasePrefix => "phrase_prefix",
        }
    }
}

/// A match query run against several fields at once.
#[derive(Debug, Clone)]
pub struct MultiMatchQuery {
    text: String,
    fields: Vec<String>,
    match_type: Option<MultiMatchType>,
    boost: f32,
}

impl MultiMatchQuery {
    /// Create a new multi-match query over the given fields.
    pub fn new<T, I, S>(text: T, fields: I) -> Self
    where
        T: Into<String>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        MultiMatchQuery {
            text: text.into(),
            fields: fields.into_iter().map(Into::into).collect(),
            match_type: None,
            boost: 1.0,
        }
    }

    /// Set the scoring type.
    pub fn with_type(mut self, match_type: MultiMatchType) -> Self {
        self.match_type = Some(match_type);
        self
    }

    /// Set the boost factor for this query.
    pub fn with_boost(mut self, boost: f32) -> Self {
        self.boost = boost;
        self
    }

    /// Get the searched fields.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Get the query text.
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Query for MultiMatchQuery {
    fn to_json(&self) -> Value {
        let mut params = Map::new();
        params.insert("query".to_string(), Value::from(self.text.clone()));
        params.insert(
            "fields".to_string(),
            Value::Array(self.fields.iter().cloned().map(Value::from).collect()),
        );
        if let Some(match_type) = self.match_type {
            params.insert("type".to_string(), Value::from(match_type.as_str()));
        }
        apply_boost(&mut params, self.boost);
        keyed("multi_match", params)
    }

    fn boost(&self) -> f32 {
        self.boost
    }

    fn set_boost(&mut self, boost: f32) {
        self.boost = boost;
    }

    fn description(&self) -> String {
        describe_boost(
            format!("{{{}}}:{}", self.fields.join(","), self.text),
            self.boost,
        )
    }

    fn clone_box(&self) -> Box<dyn Query> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_multi_match_json() {
        let query = MultiMatchQuery::new("accounting", ["name", "professor.department"]);
        assert_eq!(
            query.to_json(),
            json!({"multi_match": {"query": "accounting", "fields": ["name", "professor.department"]}})
        );
        assert_eq!(query.fields().len(), 2);
        assert_eq!(query.description(), "{name,professor.department}:accounting");
    }

    #[test]
    fn test_multi_match_type() {
        let query = MultiMatchQuery::new("bill cage", vec!["professor.name".to_string()])
            .with_type(MultiMatchType::CrossFields);
        assert_eq!(query.to_json()["multi_match"]["type"], "cross_fields");
    }
}
