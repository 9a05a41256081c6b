//! Fixture data and the loader that seeds it.
//!
//! Four collections are seeded with fixed documents and sequential ids
//! starting at "1": `courses` and `vehicles` in one bulk request each,
//! `my-users` and `drivers` one document at a time after creating them with
//! nested mappings.

pub mod data;
pub mod loader;

pub use self::data::{COLLECTIONS, COURSES, Collection, DRIVERS, MY_USERS, Seeding, VEHICLES};
pub use self::loader::{FixtureLoader, LoadFailure, LoadOptions, LoadReport, LoadStep};
