//! Index mapping declarations.
//!
//! Collections whose documents embed lists that must be matched element by
//! element (users inside a group, vehicles inside a driver) need those lists
//! declared `nested` before any document is written. This module builds that
//! mapping body for the create-index call.

pub mod field;
pub mod mapping;

// Re-export commonly used types
pub use field::FieldMapping;
pub use mapping::IndexMapping;
