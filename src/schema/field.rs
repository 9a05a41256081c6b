//! Field mapping types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The declared type of one field in an index mapping.
///
/// Serializes to the cluster's mapping syntax, e.g. `{"type": "nested", "properties": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldMapping {
    /// Analyzed full-text field, optionally with multi-fields such as `.keyword`.
    Text {
        /// Additional sub-fields indexed from the same value.
        #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
        fields: BTreeMap<String, FieldMapping>,
    },
    /// Exact-value string field, usable for sorting and terms aggregations.
    Keyword,
    /// Plain embedded object; list elements are flattened together.
    Object {
        /// Sub-field mappings.
        #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
        properties: BTreeMap<String, FieldMapping>,
    },
    /// Embedded list whose elements are indexed as separate hidden documents.
    Nested {
        /// Sub-field mappings.
        #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
        properties: BTreeMap<String, FieldMapping>,
    },
}

impl FieldMapping {
    /// A text field without sub-fields.
    pub fn text() -> Self {
        FieldMapping::Text {
            fields: BTreeMap::new(),
        }
    }

    /// A text field with a `keyword` sub-field, the cluster's default for dynamic strings.
    pub fn text_with_keyword() -> Self {
        let mut fields = BTreeMap::new();
        fields.insert("keyword".to_string(), FieldMapping::Keyword);
        FieldMapping::Text { fields }
    }

    /// A nested field with no explicit sub-field mappings.
    pub fn nested() -> Self {
        FieldMapping::Nested {
            properties: BTreeMap::new(),
        }
    }

    /// A nested field with explicit sub-field mappings.
    pub fn nested_with<I, S>(properties: I) -> Self
    where
        I: IntoIterator<Item = (S, FieldMapping)>,
        S: Into<String>,
    {
        FieldMapping::Nested {
            properties: properties.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Check whether this field is mapped as nested.
    pub fn is_nested(&self) -> bool {
        matches!(self, FieldMapping::Nested { .. })
    }

    /// Sub-field mappings of object and nested fields.
    pub fn properties(&self) -> Option<&BTreeMap<String, FieldMapping>> {
        match self {
            FieldMapping::Object { properties } | FieldMapping::Nested { properties } => {
                Some(properties)
            }
            _ => None,
        }
    }

    /// Name of the type as the cluster spells it.
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldMapping::Text { .. } => "text",
            FieldMapping::Keyword => "keyword",
            FieldMapping::Object { .. } => "object",
            FieldMapping::Nested { .. } => "nested",
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_simple_types_serialize_to_type_tag() {
        assert_eq!(
            serde_json::to_value(FieldMapping::Keyword).unwrap(),
            json!({"type": "keyword"})
        );
        assert_eq!(
            serde_json::to_value(FieldMapping::text()).unwrap(),
            json!({"type": "text"})
        );
        assert_eq!(
            serde_json::to_value(FieldMapping::nested()).unwrap(),
            json!({"type": "nested"})
        );
    }

    #[test]
    fn test_multi_field() {
        assert_eq!(
            serde_json::to_value(FieldMapping::text_with_keyword()).unwrap(),
            json!({"type": "text", "fields": {"keyword": {"type": "keyword"}}})
        );
    }

    #[test]
    fn test_deserialize_nested_mapping() {
        let mapping: FieldMapping = serde_json::from_value(json!({
            "type": "nested",
            "properties": {"make": {"type": "text"}, "model": {"type": "text"}}
        }))
        .unwrap();

        assert!(mapping.is_nested());
        assert_eq!(mapping.properties().map(|p| p.len()), Some(2));
        assert_eq!(mapping.type_name(), "nested");
    }
}
