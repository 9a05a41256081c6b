//! Integration tests for the fixture loader against a mock cluster.

use estoc::client::SearchClient;
use estoc::config::ClientConfig;
use estoc::fixtures::{FixtureLoader, LoadOptions, LoadStep};
use serde_json::{Value, json};
use wiremock::matchers::{body_json, method, path, path_regex};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

/// Answers a `_bulk` request with one "created" item per action line.
struct BulkCreated;

impl Respond for BulkCreated {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let body = String::from_utf8_lossy(&request.body);
        let items: Vec<Value> = body
            .lines()
            .filter_map(|line| serde_json::from_str::<Value>(line).ok())
            .filter_map(|line| line.get("index").cloned())
            .map(|action| {
                json!({"index": {
                    "_index": action["_index"],
                    "_id": action["_id"],
                    "status": 201,
                    "result": "created"
                }})
            })
            .collect();
        ResponseTemplate::new(200).set_body_json(json!({"took": 3, "errors": false, "items": items}))
    }
}

async fn mount_happy_cluster(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/_bulk"))
        .respond_with(BulkCreated)
        .mount(server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/my-users"))
        .and(body_json(
            json!({"mappings": {"properties": {"user": {"type": "nested"}}}}),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"acknowledged": true})))
        .mount(server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/drivers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"acknowledged": true})))
        .mount(server)
        .await;
    Mock::given(method("PUT"))
        .and(path_regex(r"^/(my-users|drivers)/_doc/\d+$"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"result": "created"})))
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path_regex(r"^/[a-z-]+/_refresh$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"_shards": {"failed": 0}})))
        .mount(server)
        .await;
}

fn client_for(server: &MockServer) -> SearchClient {
    SearchClient::new(ClientConfig::new(server.uri())).unwrap()
}

async fn request_log(server: &MockServer) -> Vec<String> {
    server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .map(|r| format!("{} {}", r.method, r.url.path()))
        .collect()
}

#[tokio::test]
async fn test_load_all_seeds_every_collection() {
    let server = MockServer::start().await;
    mount_happy_cluster(&server).await;

    let report = FixtureLoader::new(client_for(&server)).load_all().await;

    assert!(report.is_complete(), "{:?}", report.failures());
    assert!(report.ensure_complete().is_ok());
    assert_eq!(report.documents.get("courses"), Some(&10));
    assert_eq!(report.documents.get("my-users"), Some(&1));
    assert_eq!(report.documents.get("drivers"), Some(&2));
    assert_eq!(report.documents.get("vehicles"), Some(&16));

    assert_eq!(
        request_log(&server).await,
        vec![
            "POST /_bulk",
            "POST /courses/_refresh",
            "PUT /my-users",
            "PUT /my-users/_doc/1",
            "POST /my-users/_refresh",
            "PUT /drivers",
            "PUT /drivers/_doc/1",
            "PUT /drivers/_doc/2",
            "POST /drivers/_refresh",
            "POST /_bulk",
            "POST /vehicles/_refresh",
        ]
    );
}

#[tokio::test]
async fn test_bulk_ids_are_sequential() {
    let server = MockServer::start().await;
    mount_happy_cluster(&server).await;

    FixtureLoader::new(client_for(&server)).load_all().await;

    let requests = server.received_requests().await.unwrap();
    let courses_bulk = String::from_utf8(requests[0].body.clone()).unwrap();
    let ids: Vec<String> = courses_bulk
        .lines()
        .step_by(2)
        .map(|line| serde_json::from_str::<Value>(line).unwrap()["index"]["_id"].to_string())
        .collect();

    let expected: Vec<String> = (1..=10).map(|n| format!("\"{n}\"")).collect();
    assert_eq!(ids, expected);
}

#[tokio::test]
async fn test_failures_are_recorded_and_loading_continues() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/drivers"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {
                "type": "resource_already_exists_exception",
                "reason": "index [drivers/abc] already exists"
            },
            "status": 400
        })))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/drivers/_doc/2"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    mount_happy_cluster(&server).await;

    let report = FixtureLoader::new(client_for(&server)).load_all().await;

    assert!(!report.is_complete());
    let steps: Vec<(String, LoadStep)> = report
        .failures()
        .iter()
        .map(|f| (f.collection.clone(), f.step))
        .collect();
    assert_eq!(
        steps,
        vec![
            ("drivers".to_string(), LoadStep::Create),
            ("drivers".to_string(), LoadStep::Index),
        ]
    );
    assert_eq!(report.documents.get("drivers"), Some(&1));
    assert_eq!(report.documents.get("vehicles"), Some(&16));
    assert!(report.ensure_complete().is_err());
}

#[tokio::test]
async fn test_recreate_deletes_existing_collections() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/courses"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/courses"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"acknowledged": true})))
        .expect(1)
        .mount(&server)
        .await;
    mount_happy_cluster(&server).await;

    let options = LoadOptions {
        recreate: true,
        refresh: false,
    };
    let report = FixtureLoader::new(client_for(&server))
        .with_options(options)
        .load_all()
        .await;

    assert!(report.is_complete(), "{:?}", report.failures());
    let log = request_log(&server).await;
    assert_eq!(log[0], "HEAD /courses");
    assert_eq!(log[1], "DELETE /courses");
    assert!(!log.iter().any(|r| r.ends_with("/_refresh")));
}

#[tokio::test]
async fn test_remove_indices_tolerates_missing_collections() {
    let server = MockServer::start().await;
    for (name, status) in [("courses", 200), ("my-users", 404), ("drivers", 200), ("vehicles", 500)] {
        Mock::given(method("DELETE"))
            .and(path(format!("/{name}")))
            .respond_with(ResponseTemplate::new(status))
            .mount(&server)
            .await;
    }

    let report = FixtureLoader::new(client_for(&server)).remove_indices().await;

    assert_eq!(report.failures().len(), 1);
    assert_eq!(report.failures()[0].collection, "vehicles");
    assert_eq!(report.failures()[0].step, LoadStep::Delete);
}

#[tokio::test]
async fn test_verify_reports_count_mismatches() {
    let server = MockServer::start().await;
    for (name, count) in [("courses", 10), ("my-users", 1), ("drivers", 1), ("vehicles", 16)] {
        Mock::given(method("POST"))
            .and(path(format!("/{name}/_count")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"count": count})))
            .mount(&server)
            .await;
    }

    let report = FixtureLoader::new(client_for(&server)).verify().await;

    assert_eq!(report.documents.get("drivers"), Some(&1));
    assert_eq!(report.failures().len(), 1);
    assert_eq!(
        report.failures()[0].to_string(),
        "drivers [verify]: expected 2 document(s), found 1"
    );
}

#[tokio::test]
async fn test_selected_collections_only() {
    let server = MockServer::start().await;
    mount_happy_cluster(&server).await;

    let selected = estoc::fixtures::data::select(&["drivers"]).unwrap();
    let report = FixtureLoader::new(client_for(&server))
        .with_collections(selected)
        .load_all()
        .await;

    assert!(report.is_complete(), "{:?}", report.failures());
    assert_eq!(report.documents.keys().collect::<Vec<_>>(), vec!["drivers"]);
    assert_eq!(
        request_log(&server).await,
        vec![
            "PUT /drivers",
            "PUT /drivers/_doc/1",
            "PUT /drivers/_doc/2",
            "POST /drivers/_refresh",
        ]
    );
}
