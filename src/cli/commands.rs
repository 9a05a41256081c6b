//! Command implementations for the estoc CLI.

use log::info;
use serde_json::{Map, Value};

use crate::cases;
use crate::cli::args::*;
use crate::cli::output::*;
use crate::client::SearchClient;
use crate::error::{EstocError, Result};
use crate::fixtures::{FixtureLoader, LoadOptions, LoadReport, data};

/// What the process should exit with after a command ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Everything the command checked held.
    Success,
    /// The command ran but something it checked did not hold.
    Failure,
}

/// Execute a CLI command.
pub async fn execute_command(args: EstocArgs) -> Result<Outcome> {
    if let Command::Cases = args.command {
        return list_cases(&args);
    }

    let config = args.client_config()?;
    info!("Using cluster at {}", config.url);
    let client = SearchClient::new(config)?;

    match &args.command {
        Command::Ping => ping(&client, &args).await,
        Command::Load(load_args) => load(&client, load_args, &args).await,
        Command::Teardown(teardown_args) => teardown(&client, teardown_args, &args).await,
        Command::Cases => list_cases(&args),
        Command::Run(run_args) => run(&client, run_args, &args).await,
        Command::Search(search_args) => search(&client, search_args, &args).await,
    }
}

/// Print the cluster identity.
async fn ping(client: &SearchClient, args: &EstocArgs) -> Result<Outcome> {
    let info = client.ping().await?;
    output_result(&info, args)?;
    Ok(Outcome::Success)
}

/// Seed the selected fixture collections.
async fn load(client: &SearchClient, load_args: &LoadArgs, args: &EstocArgs) -> Result<Outcome> {
    let options = LoadOptions {
        recreate: load_args.recreate,
        refresh: !load_args.no_refresh,
    };
    let report = FixtureLoader::new(client.clone())
        .with_collections(data::select(load_args.collections.as_slice())?)
        .with_options(options)
        .load_all()
        .await;
    output_result(&report, args)?;
    Ok(report_outcome(&report))
}

/// Delete the selected fixture collections.
async fn teardown(
    client: &SearchClient,
    teardown_args: &TeardownArgs,
    args: &EstocArgs,
) -> Result<Outcome> {
    let report = FixtureLoader::new(client.clone())
        .with_collections(data::select(teardown_args.collections.as_slice())?)
        .remove_indices()
        .await;
    output_result(&report, args)?;
    Ok(report_outcome(&report))
}

/// Load and teardown share one policy: any failed step fails the command.
fn report_outcome(report: &LoadReport) -> Outcome {
    if report.is_complete() {
        Outcome::Success
    } else {
        Outcome::Failure
    }
}

/// List the case catalog.
fn list_cases(args: &EstocArgs) -> Result<Outcome> {
    let list = CaseList {
        cases: cases::catalog()
            .iter()
            .map(|case| CaseListing {
                id: case.id.to_string(),
                index: case.index().to_string(),
                summary: case.summary.to_string(),
                request: case.request.description(),
            })
            .collect(),
    };
    output_result(&list, args)?;
    Ok(Outcome::Success)
}

/// Run the selected cases.
async fn run(client: &SearchClient, run_args: &RunArgs, args: &EstocArgs) -> Result<Outcome> {
    let selected = cases::select(run_args.cases.as_slice())?;
    let summary = cases::run_all(client, &selected).await;
    output_result(&summary, args)?;
    Ok(if summary.all_passed() {
        Outcome::Success
    } else {
        Outcome::Failure
    })
}

/// Run an ad-hoc search.
async fn search(
    client: &SearchClient,
    search_args: &SearchArgs,
    args: &EstocArgs,
) -> Result<Outcome> {
    let body = search_body(search_args)?;
    let response = client.search_body(&search_args.index, &body).await?;
    output_result(&response, args)?;
    Ok(Outcome::Success)
}

/// Build a `_search` body from the command line.
fn search_body(search_args: &SearchArgs) -> Result<Value> {
    let mut body = Map::new();
    if let Some(raw) = &search_args.query {
        let query: Value = serde_json::from_str(raw)
            .map_err(|e| EstocError::query(format!("--query is not valid JSON: {e}")))?;
        if !query.is_object() {
            return Err(EstocError::query("--query must be a JSON object"));
        }
        body.insert("query".to_string(), query);
    }
    if let Some(from) = search_args.from {
        body.insert("from".to_string(), Value::from(from));
    }
    if let Some(size) = search_args.size {
        body.insert("size".to_string(), Value::from(size));
    }
    Ok(Value::Object(body))
}
