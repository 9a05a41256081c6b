//! Output formatting for CLI commands.

use std::fmt::Write as _;

use serde::Serialize;

use crate::cases::RunSummary;
use crate::cli::args::{EstocArgs, OutputFormat};
use crate::client::ClusterInfo;
use crate::error::Result;
use crate::fixtures::LoadReport;
use crate::search::SearchResponse;

/// Human-readable rendering of a command result.
pub trait HumanReadable {
    /// Render for a terminal.
    fn to_human(&self) -> String;
}

/// One row of the case listing.
#[derive(Debug, Clone, Serialize)]
pub struct CaseListing {
    /// Case id.
    pub id: String,
    /// Collection the case searches.
    pub index: String,
    /// What the case asks, in words.
    pub summary: String,
    /// One-line rendering of the request.
    pub request: String,
}

/// The case catalog.
#[derive(Debug, Clone, Serialize)]
pub struct CaseList {
    /// Listed cases, in catalog order.
    pub cases: Vec<CaseListing>,
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize + HumanReadable>(result: &T, args: &EstocArgs) -> Result<()> {
    println!("{}", render(result, args)?);
    Ok(())
}

/// Render a result in the specified format.
pub fn render<T: Serialize + HumanReadable>(result: &T, args: &EstocArgs) -> Result<String> {
    match args.output_format {
        OutputFormat::Human => Ok(result.to_human()),
        OutputFormat::Json if args.pretty => Ok(serde_json::to_string_pretty(result)?),
        OutputFormat::Json => Ok(serde_json::to_string(result)?),
    }
}

impl HumanReadable for ClusterInfo {
    fn to_human(&self) -> String {
        let mut out = format!("Cluster: {}\n", self.cluster_name);
        let _ = writeln!(out, "Node:    {}", self.name);
        let _ = write!(out, "Version: {}", self.version.number);
        if let Some(distribution) = &self.version.distribution {
            let _ = write!(out, " ({distribution})");
        }
        out
    }
}

impl HumanReadable for LoadReport {
    fn to_human(&self) -> String {
        let mut out = String::new();
        for (collection, count) in &self.documents {
            let _ = writeln!(out, "{collection:<10} {count:>4} document(s)");
        }
        if self.is_complete() {
            out.push_str("All steps succeeded");
        } else {
            let _ = writeln!(out, "{} step(s) failed:", self.failures().len());
            for failure in self.failures() {
                let _ = writeln!(out, "  {failure}");
            }
            out.truncate(out.trim_end().len());
        }
        out
    }
}

impl HumanReadable for RunSummary {
    fn to_human(&self) -> String {
        let mut out = String::new();
        for outcome in &self.outcomes {
            let status = if outcome.passed { "PASS" } else { "FAIL" };
            let _ = writeln!(
                out,
                "{status}  {:<36} {:>6}ms",
                outcome.id,
                outcome.elapsed.as_millis()
            );
            if let Some(error) = &outcome.error {
                let _ = writeln!(out, "      {error}");
            }
        }
        let _ = write!(
            out,
            "\n{} passed, {} failed",
            self.passed(),
            self.failed()
        );
        out
    }
}

impl HumanReadable for CaseList {
    fn to_human(&self) -> String {
        let mut out = String::new();
        for case in &self.cases {
            let _ = writeln!(out, "{:<36} {:<9} {}", case.id, case.index, case.summary);
        }
        out.truncate(out.trim_end().len());
        out
    }
}

impl HumanReadable for SearchResponse {
    fn to_human(&self) -> String {
        let mut out = format!(
            "{} hit(s) in {}ms, showing {}\n",
            self.total_hits(),
            self.took,
            self.hits().len()
        );
        for hit in self.hits() {
            let score = hit
                .score
                .map(|s| format!("{s:.3}"))
                .unwrap_or_else(|| "-".to_string());
            let source = hit
                .source
                .as_ref()
                .map(|s| s.to_string())
                .unwrap_or_default();
            let _ = writeln!(out, "[{}] {} (score {score})\n  {source}", hit.index, hit.id);
        }
        for (name, aggregation) in &self.aggregations {
            let _ = writeln!(out, "aggregation {name}: {aggregation}");
        }
        out.truncate(out.trim_end().len());
        out
    }
}
