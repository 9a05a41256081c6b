//! The case catalog.
//!
//! A [`Case`] pairs one search request against one fixture collection with a
//! check over the response. Checks only look at the response, so they run the
//! same against a live cluster or a canned body.

pub mod courses;
pub mod expect;
pub mod nested;
pub mod runner;
pub mod vehicles;

pub use self::runner::{CaseOutcome, RunSummary, run_all, run_case};

use std::fmt;

use crate::error::{EstocError, Result};
use crate::search::{SearchRequest, SearchResponse};

/// Checks a response against a case's expectations.
pub type Check = fn(&SearchResponse) -> Result<()>;

/// One query case.
#[derive(Clone)]
pub struct Case {
    /// Stable kebab-case identifier.
    pub id: &'static str,
    /// What the case asks, in words.
    pub summary: &'static str,
    /// The request to send.
    pub request: SearchRequest,
    check: Check,
}

impl Case {
    /// Create a new case.
    pub fn new(id: &'static str, summary: &'static str, request: SearchRequest, check: Check) -> Self {
        Case {
            id,
            summary,
            request,
            check,
        }
    }

    /// Collection the case searches.
    pub fn index(&self) -> &str {
        &self.request.index
    }

    /// Run the check over a response.
    pub fn check(&self, response: &SearchResponse) -> Result<()> {
        (self.check)(response)
    }
}

impl fmt::Debug for Case {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Case")
            .field("id", &self.id)
            .field("request", &self.request.description())
            .finish()
    }
}

/// Every case, grouped by collection.
pub fn catalog() -> Vec<Case> {
    let mut cases = courses::cases();
    cases.extend(nested::cases());
    cases.extend(vehicles::cases());
    cases
}

/// Look up a case by id.
pub fn find(id: &str) -> Result<Case> {
    catalog()
        .into_iter()
        .find(|case| case.id == id)
        .ok_or_else(|| EstocError::not_found(format!("case '{id}'")))
}

/// Select cases by id, keeping the requested order. An empty selection means
/// the whole catalog.
pub fn select<S: AsRef<str>>(ids: &[S]) -> Result<Vec<Case>> {
    if ids.is_empty() {
        return Ok(catalog());
    }
    ids.iter().map(|id| find(id.as_ref())).collect()
}
