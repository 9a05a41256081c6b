//! End-to-end run against a real cluster.
//!
//! Ignored by default. Start a single-node cluster and run with
//! `ESTOC_URL=http://localhost:9200 cargo test --test live_cluster_test -- --ignored`.

use estoc::cases;
use estoc::client::SearchClient;
use estoc::config::ClientConfig;
use estoc::fixtures::{FixtureLoader, LoadOptions};

fn live_config() -> ClientConfig {
    let url = std::env::var("ESTOC_URL").unwrap_or_else(|_| "http://localhost:9200".to_string());
    let config = ClientConfig::new(url);
    match (std::env::var("ESTOC_USERNAME"), std::env::var("ESTOC_PASSWORD")) {
        (Ok(username), Ok(password)) => config.with_credentials(username, password),
        _ => config,
    }
}

#[tokio::test]
#[ignore]
async fn test_catalog_against_live_cluster() {
    let client = SearchClient::new(live_config()).unwrap();
    client.ping().await.unwrap();

    let loader = FixtureLoader::new(client.clone()).with_options(LoadOptions {
        recreate: true,
        refresh: true,
    });
    loader.load_all().await.ensure_complete().unwrap();
    loader.verify().await.ensure_complete().unwrap();

    let summary = cases::run_all(&client, &cases::catalog()).await;
    let failures: Vec<_> = summary.failures().collect();

    loader.remove_indices().await.ensure_complete().unwrap();
    assert!(failures.is_empty(), "{failures:?}");
}
