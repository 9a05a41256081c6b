//! Sequential case runner.

use std::time::{Duration, Instant};

use log::{debug, info, warn};
use serde::Serialize;

use crate::cases::Case;
use crate::client::SearchClient;

/// Result of running one case.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseOutcome {
    /// Case id.
    pub id: String,
    /// Collection searched.
    pub index: String,
    /// Whether every expectation held.
    pub passed: bool,
    /// Total hits reported by the cluster, when a response arrived.
    pub total_hits: Option<u64>,
    /// Wall-clock time of the round trip plus the check.
    #[serde(with = "millis")]
    pub elapsed: Duration,
    /// Transport, decode or expectation failure.
    pub error: Option<String>,
}

mod millis {
    use std::time::Duration;

    use serde::Serializer;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(duration.as_millis() as u64)
    }
}

/// Outcomes of a run, in execution order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunSummary {
    /// One outcome per case.
    pub outcomes: Vec<CaseOutcome>,
}

impl RunSummary {
    /// Number of passing cases.
    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed).count()
    }

    /// Number of failing cases.
    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.passed()
    }

    /// Check if every case passed.
    pub fn all_passed(&self) -> bool {
        self.failed() == 0
    }

    /// The failing outcomes.
    pub fn failures(&self) -> impl Iterator<Item = &CaseOutcome> {
        self.outcomes.iter().filter(|o| !o.passed)
    }
}

/// Send a case's request and check the response. Never retries.
pub async fn run_case(client: &SearchClient, case: &Case) -> CaseOutcome {
    debug!("{}: {}", case.id, case.request.description());
    let start = Instant::now();

    let (total_hits, result) = match client.search(&case.request).await {
        Ok(response) => (Some(response.total_hits()), case.check(&response)),
        Err(e) => (None, Err(e)),
    };
    let elapsed = start.elapsed();

    let error = match result {
        Ok(()) => {
            info!("{} passed in {:?}", case.id, elapsed);
            None
        }
        Err(e) => {
            warn!("{} failed: {e}", case.id);
            Some(e.to_string())
        }
    };

    CaseOutcome {
        id: case.id.to_string(),
        index: case.index().to_string(),
        passed: error.is_none(),
        total_hits,
        elapsed,
        error,
    }
}

/// Run cases one after the other.
pub async fn run_all(client: &SearchClient, cases: &[Case]) -> RunSummary {
    let mut summary = RunSummary::default();
    for case in cases {
        summary.outcomes.push(run_case(client, case).await);
    }
    info!(
        "{} case(s) run, {} passed, {} failed",
        summary.outcomes.len(),
        summary.passed(),
        summary.failed()
    );
    summary
}
