//! Expectation helpers used by the case checks.
//!
//! Each helper returns `Err(EstocError::Expectation)` describing the
//! mismatch, so a check reads as a sequence of `?`-chained assertions.

use std::collections::BTreeMap;
use std::fmt::Debug;

use crate::error::{EstocError, Result};
use crate::search::{SearchResponse, TermsBucket, TermsResult};

/// Tolerance for comparing aggregated prices.
const EPSILON: f64 = 1e-6;

/// The response reports exactly `expected` matching documents.
pub fn total_hits(response: &SearchResponse, expected: u64) -> Result<()> {
    let actual = response
        .hits
        .total
        .map(|t| t.value)
        .ok_or_else(|| EstocError::expectation("response reports no hit total"))?;
    if actual != expected {
        return Err(EstocError::expectation(format!(
            "expected {expected} total hit(s), got {actual}"
        )));
    }
    Ok(())
}

/// The response returned exactly `expected` hits in its page.
pub fn returned_hits(response: &SearchResponse, expected: usize) -> Result<()> {
    let actual = response.hits().len();
    if actual != expected {
        return Err(EstocError::expectation(format!(
            "expected {expected} returned hit(s), got {actual}"
        )));
    }
    Ok(())
}

/// Two values are equal.
pub fn equal<T: PartialEq + Debug>(what: &str, actual: T, expected: T) -> Result<()> {
    if actual != expected {
        return Err(EstocError::expectation(format!(
            "{what}: expected {expected:?}, got {actual:?}"
        )));
    }
    Ok(())
}

/// Two collections hold the same elements, in any order, counting duplicates.
pub fn same_elements<T: Ord + Debug>(what: &str, actual: Vec<T>, expected: Vec<T>) -> Result<()> {
    let mut actual = actual;
    let mut expected = expected;
    actual.sort();
    expected.sort();
    equal(what, actual, expected)
}

/// Every expected element is present in `actual`.
pub fn contains_all<T: PartialEq + Debug>(what: &str, actual: &[T], expected: &[T]) -> Result<()> {
    let missing: Vec<&T> = expected.iter().filter(|e| !actual.contains(e)).collect();
    if !missing.is_empty() {
        return Err(EstocError::expectation(format!(
            "{what}: missing {missing:?} in {actual:?}"
        )));
    }
    Ok(())
}

/// None of the forbidden elements is present in `actual`.
pub fn excludes<T: PartialEq + Debug>(what: &str, actual: &[T], forbidden: &[T]) -> Result<()> {
    let present: Vec<&T> = forbidden.iter().filter(|f| actual.contains(f)).collect();
    if !present.is_empty() {
        return Err(EstocError::expectation(format!(
            "{what}: unexpected {present:?}"
        )));
    }
    Ok(())
}

/// Two floating point values agree within a small tolerance.
pub fn approx(what: &str, actual: f64, expected: f64) -> Result<()> {
    if (actual - expected).abs() > EPSILON {
        return Err(EstocError::expectation(format!(
            "{what}: expected {expected}, got {actual}"
        )));
    }
    Ok(())
}

/// The terms result has exactly these buckets with these document counts.
pub fn bucket_counts(terms: &TermsResult, expected: &[(&str, u64)]) -> Result<()> {
    let expected: BTreeMap<String, u64> = expected
        .iter()
        .map(|(key, count)| (key.to_string(), *count))
        .collect();
    equal("bucket doc counts", terms.doc_counts(), expected)
}

/// Look up a bucket that must exist.
pub fn bucket<'a>(terms: &'a TermsResult, key: &str) -> Result<&'a TermsBucket> {
    terms
        .bucket(key)
        .ok_or_else(|| EstocError::expectation(format!("no bucket '{key}'")))
}

/// A single-value metric of a bucket agrees with `expected`.
pub fn bucket_metric(bucket: &TermsBucket, name: &str, expected: f64) -> Result<()> {
    let actual = bucket.metric(name).ok_or_else(|| {
        EstocError::expectation(format!("bucket '{}' has no metric '{name}'", bucket.key))
    })?;
    approx(&format!("{} {name}", bucket.key), actual, expected)
}
