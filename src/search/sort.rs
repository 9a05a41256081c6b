//! Sort keys for search requests.

use serde_json::{Value, json};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Ascending.
    Asc,
    /// Descending.
    Desc,
}

impl SortOrder {
    fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// One sort key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortField {
    /// Field to sort on.
    pub field: String,
    /// Direction.
    pub order: SortOrder,
}

impl SortField {
    /// Create a new sort key.
    pub fn new<S: Into<String>>(field: S, order: SortOrder) -> Self {
        SortField {
            field: field.into(),
            order,
        }
    }

    /// Render as `{field: {"order": ...}}`.
    pub fn to_json(&self) -> Value {
        json!({ self.field.as_str(): { "order": self.order.as_str() } })
    }
}
