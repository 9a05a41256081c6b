//! Boolean query implementation for combining multiple queries.

use serde_json::{Map, Value};

use crate::query::query::{Query, apply_boost, describe_boost, keyed};

/// Occurrence requirements for boolean clauses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occur {
    /// The clause must match and contributes to the score (AND).
    Must,
    /// The clause must match but does not score.
    Filter,
    /// The clause should match (OR).
    Should,
    /// The clause must not match (NOT).
    MustNot,
}

impl Occur {
    /// Key of the clause list in the rendered `bool` object.
    pub fn key(&self) -> &'static str {
        match self {
            Occur::Must => "must",
            Occur::Filter => "filter",
            Occur::Should => "should",
            Occur::MustNot => "must_not",
        }
    }
}

/// A clause in a boolean query.
#[derive(Debug, Clone)]
pub struct BooleanClause {
    /// The query for this clause.
    pub query: Box<dyn Query>,
    /// The occurrence requirement.
    pub occur: Occur,
}

impl BooleanClause {
    /// Create a new boolean clause.
    pub fn new(query: Box<dyn Query>, occur: Occur) -> Self {
        BooleanClause { query, occur }
    }

    /// Create a MUST clause.
    pub fn must(query: Box<dyn Query>) -> Self {
        BooleanClause::new(query, Occur::Must)
    }

    /// Create a FILTER clause.
    pub fn filter(query: Box<dyn Query>) -> Self {
        BooleanClause::new(query, Occur::Filter)
    }

    /// Create a SHOULD clause.
    pub fn should(query: Box<dyn Query>) -> Self {
        BooleanClause::new(query, Occur::Should)
    }

    /// Create a MUST_NOT clause.
    pub fn must_not(query: Box<dyn Query>) -> Self {
        BooleanClause::new(query, Occur::MustNot)
    }
}

/// A boolean query that combines multiple queries with boolean logic.
#[derive(Debug, Clone)]
pub struct BooleanQuery {
    /// The clauses in this boolean query.
    clauses: Vec<BooleanClause>,
    /// The boost factor for this query.
    boost: f32,
    /// Minimum number of should clauses that must match.
    minimum_should_match: usize,
}

impl BooleanQuery {
    /// Create a new empty boolean query.
    pub fn new() -> Self {
        BooleanQuery {
            clauses: Vec::new(),
            boost: 1.0,
            minimum_should_match: 0,
        }
    }

    /// Start building a boolean query.
    pub fn builder() -> BooleanQueryBuilder {
        BooleanQueryBuilder::new()
    }

    /// Add a clause to this boolean query.
    pub fn add_clause(&mut self, clause: BooleanClause) {
        self.clauses.push(clause);
    }

    /// Add a MUST clause.
    pub fn add_must(&mut self, query: Box<dyn Query>) {
        self.add_clause(BooleanClause::must(query));
    }

    /// Add a FILTER clause.
    pub fn add_filter(&mut self, query: Box<dyn Query>) {
        self.add_clause(BooleanClause::filter(query));
    }

    /// Add a SHOULD clause.
    pub fn add_should(&mut self, query: Box<dyn Query>) {
        self.add_clause(BooleanClause::should(query));
    }

    /// Add a MUST_NOT clause.
    pub fn add_must_not(&mut self, query: Box<dyn Query>) {
        self.add_clause(BooleanClause::must_not(query));
    }

    /// Set the boost factor.
    pub fn with_boost(mut self, boost: f32) -> Self {
        self.boost = boost;
        self
    }

    /// Set the minimum number of should clauses that must match.
    pub fn with_minimum_should_match(mut self, minimum: usize) -> Self {
        self.minimum_should_match = minimum;
        self
    }

    /// Get the clauses.
    pub fn clauses(&self) -> &[BooleanClause] {
        &self.clauses
    }

    /// Get the minimum should match value.
    pub fn minimum_should_match(&self) -> usize {
        self.minimum_should_match
    }

    /// Check if this query is empty.
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Get clauses by occurrence type.
    pub fn clauses_by_occur(&self, occur: Occur) -> Vec<&BooleanClause> {
        self.clauses.iter().filter(|c| c.occur == occur).collect()
    }
}

impl Default for BooleanQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl Query for BooleanQuery {
    fn to_json(&self) -> Value {
        let mut params = Map::new();

        for occur in [Occur::Must, Occur::Filter, Occur::Should, Occur::MustNot] {
            let rendered: Vec<Value> = self
                .clauses_by_occur(occur)
                .into_iter()
                .map(|clause| clause.query.to_json())
                .collect();
            if !rendered.is_empty() {
                params.insert(occur.key().to_string(), Value::Array(rendered));
            }
        }

        if self.minimum_should_match > 0 {
            params.insert(
                "minimum_should_match".to_string(),
                Value::from(self.minimum_should_match),
            );
        }
        apply_boost(&mut params, self.boost);

        keyed("bool", params)
    }

    fn boost(&self) -> f32 {
        self.boost
    }

    fn set_boost(&mut self, boost: f32) {
        self.boost = boost;
    }

    fn description(&self) -> String {
        if self.clauses.is_empty() {
            return "()".to_string();
        }

        let mut parts = Vec::new();

        for clause in &self.clauses {
            let clause_desc = match clause.occur {
                Occur::Must => format!("+{}", clause.query.description()),
                Occur::Filter => format!("#{}", clause.query.description()),
                Occur::Should => clause.query.description(),
                Occur::MustNot => format!("-{}", clause.query.description()),
            };
            parts.push(clause_desc);
        }

        let mut result = format!("({})", parts.join(" "));
        if self.minimum_should_match > 0 {
            result = format!("{result}~{}", self.minimum_should_match);
        }

        describe_boost(result, self.boost)
    }

    fn clone_box(&self) -> Box<dyn Query> {
        Box::new(self.clone())
    }
}

/// Builder for creating boolean queries.
#[derive(Debug)]
pub struct BooleanQueryBuilder {
    query: BooleanQuery,
}

impl BooleanQueryBuilder {
    /// Create a new boolean query builder.
    pub fn new() -> Self {
        BooleanQueryBuilder {
            query: BooleanQuery::new(),
        }
    }

    /// Add a MUST clause.
    pub fn must(mut self, query: Box<dyn Query>) -> Self {
        self.query.add_must(query);
        self
    }

    /// Add a FILTER clause.
    pub fn filter(mut self, query: Box<dyn Query>) -> Self {
        self.query.add_filter(query);
        self
    }

    /// Add a SHOULD clause.
    pub fn should(mut self, query: Box<dyn Query>) -> Self {
        self.query.add_should(query);
        self
    }

    /// Add a MUST_NOT clause.
    pub fn must_not(mut self, query: Box<dyn Query>) -> Self {
        self.query.add_must_not(query);
        self
    }

    /// Set the boost factor.
    pub fn boost(mut self, boost: f32) -> Self {
        self.query = self.query.with_boost(boost);
        self
    }

    /// Set the minimum should match.
    pub fn minimum_should_match(mut self, minimum: usize) -> Self {
        self.query = self.query.with_minimum_should_match(minimum);
        self
    }

    /// Build the boolean query.
    pub fn build(self) -> BooleanQuery {
        self.query
    }
}

impl Default for BooleanQueryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::query::{MatchQuery, RangeQuery};

    #[test]
    fn test_boolean_query_creation() {
        let query = BooleanQuery::new();

        assert!(query.is_empty());
        assert_eq!(query.clauses().len(), 0);
        assert_eq!(query.boost(), 1.0);
        assert_eq!(query.minimum_should_match(), 0);
        assert_eq!(query.to_json(), json!({"bool": {}}));
    }

    #[test]
    fn test_boolean_query_clauses() {
        let mut query = BooleanQuery::new();

        query.add_must(Box::new(MatchQuery::new("name", "accounting")));
        query.add_should(Box::new(MatchQuery::new("room", "e3")));
        query.add_must_not(Box::new(MatchQuery::new("room", "e7")));
        query.add_filter(Box::new(MatchQuery::new("professor.name", "bill")));

        assert_eq!(query.clauses().len(), 4);
        assert!(!query.is_empty());
        assert_eq!(query.clauses_by_occur(Occur::Must).len(), 1);
        assert_eq!(query.clauses_by_occur(Occur::Filter).len(), 1);
        assert_eq!(query.clauses_by_occur(Occur::Should).len(), 1);
        assert_eq!(query.clauses_by_occur(Occur::MustNot).len(), 1);
    }

    #[test]
    fn test_boolean_query_json() {
        let query = BooleanQuery::builder()
            .must(Box::new(MatchQuery::new("name", "accounting")))
            .must_not(Box::new(MatchQuery::new("room", "e7")))
            .should(Box::new(RangeQuery::new("students_enrolled").gte(10).lte(20)))
            .minimum_should_match(1)
            .build();

        assert_eq!(
            query.to_json(),
            json!({
                "bool": {
                    "must": [{"match": {"name": {"query": "accounting"}}}],
                    "should": [{"range": {"students_enrolled": {"gte": 10, "lte": 20}}}],
                    "must_not": [{"match": {"room": {"query": "e7"}}}],
                    "minimum_should_match": 1
                }
            })
        );
    }

    #[test]
    fn test_boolean_query_nested_filter() {
        let inner = BooleanQuery::builder()
            .must(Box::new(MatchQuery::new("professor.name", "bill")))
            .must(Box::new(MatchQuery::new("name", "accounting")))
            .build();
        let query = BooleanQuery::builder()
            .filter(Box::new(inner))
            .must(Box::new(MatchQuery::new("room", "e3")))
            .build();

        let json = query.to_json();
        assert_eq!(json["bool"]["must"][0], json!({"match": {"room": {"query": "e3"}}}));
        assert_eq!(
            json["bool"]["filter"][0]["bool"]["must"]
                .as_array()
                .map(Vec::len),
            Some(2)
        );
    }

    #[test]
    fn test_boolean_query_description() {
        let query = BooleanQuery::builder()
            .must(Box::new(MatchQuery::new("name", "computer")))
            .must_not(Box::new(MatchQuery::new("room", "e7")))
            .should(Box::new(MatchQuery::new("room", "c8")))
            .minimum_should_match(1)
            .boost(2.0)
            .build();

        assert_eq!(
            query.description(),
            "(+name:computer -room:e7 room:c8)~1^2"
        );
    }

    #[test]
    fn test_boolean_query_clone() {
        let query = BooleanQuery::builder()
            .should(Box::new(MatchQuery::new("name", "accounting")))
            .should(Box::new(MatchQuery::new("room", "e3")))
            .minimum_should_match(2)
            .build();
        let boxed: Box<dyn Query> = Box::new(query);
        let cloned = boxed.clone();

        assert_eq!(boxed.to_json(), cloned.to_json());
    }
}
