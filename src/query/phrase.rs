//! Phrase and phrase-prefix queries for ordered term matching.

use serde_json::{Map, Value};

use crate::query::query::{Query, apply_boost, describe_boost, field_query};

/// A query that matches documents containing an exact phrase.
///
/// A phrase query finds documents where the analyzed terms appear
/// in the same order with at most `slop` positions between them.
#[derive(Debug, Clone)]
pub struct PhraseQuery {
    /// The field to search in.
    field: String,
    /// The phrase text.
    phrase: String,
    /// The boost factor for this query.
    boost: f32,
    /// Maximum allowed distance between terms (0 = exact phrase).
    slop: u32,
}

impl PhraseQuery {
    /// Create a new phrase query.
    pub fn new<F: Into<String>, P: Into<String>>(field: F, phrase: P) -> Self {
        PhraseQuery {
            field: field.into(),
            phrase: phrase.into(),
            boost: 1.0,
            slop: 0,
        }
    }

    /// Set the boost factor for this query.
    pub fn with_boost(mut self, boost: f32) -> Self {
        self.boost = boost;
        self
    }

    /// Set the slop (maximum distance between terms).
    ///
    /// A slop of 0 means exact phrase match.
    /// A slop of 1 allows one word between phrase terms.
    pub fn with_slop(mut self, slop: u32) -> Self {
        self.slop = slop;
        self
    }

    /// Get the phrase text.
    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    /// Get the phrase split into whitespace-separated terms.
    pub fn terms(&self) -> Vec<&str> {
        self.phrase.split_whitespace().collect()
    }

    /// Get the slop value.
    pub fn slop(&self) -> u32 {
        self.slop
    }
}

impl Query for PhraseQuery {
    fn to_json(&self) -> Value {
        let mut params = Map::new();
        params.insert("query".to_string(), Value::from(self.phrase.clone()));
        if self.slop > 0 {
            params.insert("slop".to_string(), Value::from(self.slop));
        }
        apply_boost(&mut params, self.boost);
        field_query("match_phrase", &self.field, params)
    }

    fn boost(&self) -> f32 {
        self.boost
    }

    fn set_boost(&mut self, boost: f32) {
        self.boost = boost;
    }

    fn description(&self) -> String {
        let mut description = format!("{}:\"{}\"", self.field, self.phrase);
        if self.slop > 0 {
            description = format!("{description}~{}", self.slop);
        }
        describe_boost(description, self.boost)
    }

    fn clone_box(&self) -> Box<dyn Query> {
        Box::new(self.clone())
    }

    fn field(&self) -> Option<&str> {
        Some(&self.field)
    }
}

/// A phrase query whose last term is treated as a prefix.
///
/// `"from the business school taken by fin"` matches text containing
/// `"... taken by final ..."`.
#[derive(Debug, Clone)]
pub struct PhrasePrefixQuery {
    field: String,
    phrase: String,
    max_expansions: Option<u32>,
    boost: f32,
}

impl PhrasePrefixQuery {
    /// Create a new phrase-prefix query.
    pub fn new<F: Into<String>, P: Into<String>>(field: F, phrase: P) -> Self {
        PhrasePrefixQuery {
            field: field.into(),
            phrase: phrase.into(),
            max_expansions: None,
            boost: 1.0,
        }
    }

    /// Limit how many terms the trailing prefix may expand to.
    pub fn with_max_expansions(mut self, max_expansions: u32) -> Self {
        self.max_expansions = Some(max_expansions);
        self
    }

    /// Set the boost factor for this query.
    pub fn with_boost(mut self, boost: f32) -> Self {
        self.boost = boost;
        self
    }

    /// Get the phrase text.
    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    /// Get the trailing prefix term, if the phrase is not blank.
    pub fn prefix(&self) -> Option<&str> {
        self.phrase.split_whitespace().last()
    }
}

impl Query for PhrasePrefixQuery {
    fn to_json(&self) -> Value {
        let mut params = Map::new();
        params.insert("query".to_string(), Value::from(self.phrase.clone()));
        if let Some(max_expansions) = self.max_expansions {
            params.insert("max_expansions".to_string(), Value::from(max_expansions));
        }
        apply_boost(&mut params, self.boost);
        field_query("match_phrase_prefix", &self.field, params)
    }

    fn boost(&self) -> f32 {
        self.boost
    }

    fn set_boost(&mut self, boost: f32) {
        self.boost = boost;
    }

    fn description(&self) -> String {
        describe_boost(format!("{}:\"{}*\"", self.field, self.phrase), self.boost)
    }

    fn clone_box(&self) -> Box<dyn Query> {
        Box::new(self.clone())
    }

    fn field(&self) -> Option<&str> {
        Some(&self.field)
    }
}
