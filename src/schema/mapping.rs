//! Index-level mapping.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::schema::field::FieldMapping;

/// Explicit field mappings sent when a collection is created.
///
/// Fields left out are mapped dynamically by the cluster on first write.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexMapping {
    /// Top-level field mappings.
    pub properties: BTreeMap<String, FieldMapping>,
}

impl IndexMapping {
    /// Create an empty mapping.
    pub fn new() -> Self {
        IndexMapping::default()
    }

    /// Add or replace a top-level field.
    pub fn field<S: Into<String>>(mut self, name: S, mapping: FieldMapping) -> Self {
        self.properties.insert(name.into(), mapping);
        self
    }

    /// Look up a field by dotted path, e.g. `driver.vehicle`.
    pub fn get(&self, path: &str) -> Option<&FieldMapping> {
        let mut segments = path.split('.');
        let mut current = self.properties.get(segments.next()?)?;
        for segment in segments {
            current = current.properties()?.get(segment)?;
        }
        Some(current)
    }

    /// Dotted paths of every nested field, parents before children.
    pub fn nested_paths(&self) -> Vec<String> {
        fn walk(prefix: &str, properties: &BTreeMap<String, FieldMapping>, out: &mut Vec<String>) {
            for (name, mapping) in properties {
                let path = if prefix.is_empty() {
                    name.clone()
                } else {
                    format!("{prefix}.{name}")
                };
                if mapping.is_nested() {
                    out.push(path.clone());
                }
                if let Some(children) = mapping.properties() {
                    walk(&path, children, out);
                }
            }
        }

        let mut paths = Vec::new();
        walk("", &self.properties, &mut paths);
        paths
    }

    /// Render the create-index request body: `{"mappings": {"properties": {...}}}`.
    pub fn to_json(&self) -> Value {
        json!({ "mappings": { "properties": self.properties } })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drivers() -> IndexMapping {
        IndexMapping::new().field(
            "driver",
            FieldMapping::nested_with([
                ("last_name", FieldMapping::text()),
                (
                    "vehicle",
                    FieldMapping::nested_with([
                        ("make", FieldMapping::text()),
                        ("model", FieldMapping::text()),
                    ]),
                ),
            ]),
        )
    }

    #[test]
    fn test_single_nested_field() {
        let mapping = IndexMapping::new().field("user", FieldMapping::nested());
        assert_eq!(
            mapping.to_json(),
            json!({"mappings": {"properties": {"user": {"type": "nested"}}}})
        );
    }

    #[test]
    fn test_nested_in_nested_body() {
        let expected: Value = serde_json::from_str(
            r#"{"mappings":{"properties":{"driver":{"type":"nested", "properties":{"last_name":{"type":"text"}, "vehicle":{"type":"nested", "properties":{"make":{"type":"text"}, "model":{"type":"text"} } } } } } } }"#,
        )
        .unwrap();
        assert_eq!(drivers().to_json(), expected);
    }

    #[test]
    fn test_lookup_and_nested_paths() {
        let mapping = drivers();

        assert_eq!(mapping.nested_paths(), vec!["driver", "driver.vehicle"]);
        assert!(mapping.get("driver.vehicle").is_some_and(FieldMapping::is_nested));
        assert_eq!(
            mapping.get("driver.last_name").map(FieldMapping::type_name),
            Some("text")
        );
        assert!(mapping.get("driver.vehicle.color").is_none());
        assert!(mapping.get("owner").is_none());
    }
}
