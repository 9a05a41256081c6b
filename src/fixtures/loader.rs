//! Seeding and tearing down the fixture collections.

use std::collections::BTreeMap;
use std::fmt;

use log::{error, info, warn};
use serde::Serialize;

use crate::client::{BulkOperation, BulkRequest, SearchClient};
use crate::error::{EstocError, Result};
use crate::fixtures::data::{COLLECTIONS, Collection, Seeding};

/// Loader behaviour switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    /// Delete each collection before seeding it.
    pub recreate: bool,
    /// Refresh each collection after seeding so documents are searchable at once.
    pub refresh: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        LoadOptions {
            recreate: false,
            refresh: true,
        }
    }
}

/// The step a loader failure happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadStep {
    /// Parsing the literal documents.
    Parse,
    /// Deleting a collection.
    Delete,
    /// Creating a collection with its mapping.
    Create,
    /// Writing documents.
    Index,
    /// Refreshing a collection.
    Refresh,
    /// Counting a collection's documents.
    Verify,
}

impl fmt::Display for LoadStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LoadStep::Parse => "parse",
            LoadStep::Delete => "delete",
            LoadStep::Create => "create",
            LoadStep::Index => "index",
            LoadStep::Refresh => "refresh",
            LoadStep::Verify => "verify",
        };
        f.write_str(name)
    }
}

/// One swallowed failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadFailure {
    /// Collection being worked on.
    pub collection: String,
    /// Step that failed.
    pub step: LoadStep,
    /// What went wrong.
    pub message: String,
}

impl fmt::Display for LoadFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]: {}", self.collection, self.step, self.message)
    }
}

/// What a load, teardown or verify pass did.
///
/// The loader never stops at the first failure. Everything that went wrong
/// is collected here so a partial fixture can be told apart from a full one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    /// Documents written (or counted, for verify) per collection.
    pub documents: BTreeMap<String, u64>,
    failures: Vec<LoadFailure>,
}

impl LoadReport {
    /// Create an empty report.
    pub fn new() -> Self {
        LoadReport::default()
    }

    /// Check if nothing failed.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// The recorded failures, in the order they happened.
    pub fn failures(&self) -> &[LoadFailure] {
        &self.failures
    }

    /// Turn a report with failures into an error.
    pub fn ensure_complete(&self) -> Result<()> {
        if self.is_complete() {
            return Ok(());
        }
        let details: Vec<String> = self.failures.iter().map(LoadFailure::to_string).collect();
        Err(EstocError::fixture(format!(
            "{} step(s) failed: {}",
            self.failures.len(),
            details.join("; ")
        )))
    }

    fn record(&mut self, collection: &str, step: LoadStep, message: impl Into<String>) {
        let failure = LoadFailure {
            collection: collection.to_string(),
            step,
            message: message.into(),
        };
        error!("{failure}");
        self.failures.push(failure);
    }

    fn add_documents(&mut self, collection: &str, count: u64) {
        *self.documents.entry(collection.to_string()).or_insert(0) += count;
    }
}

/// Seeds, verifies and removes the fixture collections.
#[derive(Debug, Clone)]
pub struct FixtureLoader {
    client: SearchClient,
    options: LoadOptions,
    collections: Vec<Collection>,
}

impl FixtureLoader {
    /// Create a loader for all fixture collections with default options.
    pub fn new(client: SearchClient) -> Self {
        FixtureLoader {
            client,
            options: LoadOptions::default(),
            collections: COLLECTIONS.to_vec(),
        }
    }

    /// Set the loader options.
    pub fn with_options(mut self, options: LoadOptions) -> Self {
        self.options = options;
        self
    }

    /// Restrict the loader to the given collections.
    pub fn with_collections<I: IntoIterator<Item = Collection>>(mut self, collections: I) -> Self {
        self.collections = collections.into_iter().collect();
        self
    }

    /// The collections this loader works on.
    pub fn collections(&self) -> &[Collection] {
        &self.collections
    }

    /// Seed every collection, in order.
    pub async fn load_all(&self) -> LoadReport {
        let mut report = LoadReport::new();
        for collection in &self.collections {
            self.seed(collection, &mut report).await;
        }
        if report.is_complete() {
            info!("Seeded {} collection(s)", self.collections.len());
        } else {
            warn!(
                "Seeding finished with {} failure(s)",
                report.failures().len()
            );
        }
        report
    }

    /// Seed one collection. Failures are recorded in `report` and seeding
    /// carries on with the next step.
    pub async fn seed(&self, collection: &Collection, report: &mut LoadReport) {
        let name = collection.name;

        if self.options.recreate {
            match self.client.index_exists(name).await {
                Ok(true) => {
                    info!("Deleting existing collection '{name}'");
                    if let Err(e) = self.client.delete_index(name).await {
                        report.record(name, LoadStep::Delete, e.to_string());
                    }
                }
                Ok(false) => {}
                Err(e) => report.record(name, LoadStep::Delete, e.to_string()),
            }
        }

        if let Some(mapping) = collection.mapping() {
            if let Err(e) = self.client.create_index(name, Some(&mapping)).await {
                report.record(name, LoadStep::Create, e.to_string());
            }
        }

        let documents = match collection.parsed_documents() {
            Ok(documents) => documents,
            Err(e) => {
                report.record(name, LoadStep::Parse, e.to_string());
                return;
            }
        };

        info!("Seeding {} document(s) into '{name}'", documents.len());
        let written = match collection.seeding {
            Seeding::Bulk => {
                let mut request = BulkRequest::new();
                for (id, document) in documents {
                    request.push(BulkOperation::index(name, id, document));
                }
                match self.client.bulk(&request).await {
                    Ok(response) => {
                        for failure in response.failures() {
                            let reason = failure.failure_reason().unwrap_or_default();
                            report.record(name, LoadStep::Index, reason);
                        }
                        response.succeeded() as u64
                    }
                    Err(e) => {
                        report.record(name, LoadStep::Index, e.to_string());
                        0
                    }
                }
            }
            Seeding::PerDocument => {
                let mut written = 0;
                for (id, document) in &documents {
                    match self.client.index_document(name, id, document).await {
                        Ok(()) => written += 1,
                        Err(e) => {
                            report.record(name, LoadStep::Index, format!("document {id}: {e}"))
                        }
                    }
                }
                written
            }
        };
        report.add_documents(name, written);

        if self.options.refresh {
            if let Err(e) = self.client.refresh(name).await {
                report.record(name, LoadStep::Refresh, e.to_string());
            }
        }
    }

    /// Delete every collection. A collection that does not exist is not a failure.
    pub async fn remove_indices(&self) -> LoadReport {
        let mut report = LoadReport::new();
        for collection in &self.collections {
            match self.client.delete_index(collection.name).await {
                Ok(()) => info!("Deleted collection '{}'", collection.name),
                Err(e) if e.is_status(404) => {
                    info!("Collection '{}' does not exist", collection.name)
                }
                Err(e) => report.record(collection.name, LoadStep::Delete, e.to_string()),
            }
        }
        report
    }

    /// Count each collection and record any that does not hold exactly its
    /// fixture documents.
    pub async fn verify(&self) -> LoadReport {
        let mut report = LoadReport::new();
        for collection in &self.collections {
            match self.client.count(collection.name, None).await {
                Ok(count) => {
                    report.add_documents(collection.name, count);
                    let expected = collection.expected_count();
                    if count != expected {
                        report.record(
                            collection.name,
                            LoadStep::Verify,
                            format!("expected {expected} document(s), found {count}"),
                        );
                    }
                }
                Err(e) => report.record(collection.name, LoadStep::Verify, e.to_string()),
            }
        }
        report
    }
}
