//! Runs the case catalog against responses built from the fixture documents.

use std::collections::{BTreeMap, HashMap};

use estoc::cases::{self, Case};
use estoc::client::SearchClient;
use estoc::config::ClientConfig;
use estoc::fixtures::{COURSES, DRIVERS, MY_USERS, VEHICLES, data};
use estoc::search::SearchResponse;
use serde_json::{Value, json};
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

fn documents(collection: &str) -> Vec<(String, Value)> {
    data::collection(collection)
        .unwrap()
        .parsed_documents()
        .unwrap()
}

/// A hits section holding the given documents (1-based ids) in order.
fn hits(collection: &str, ids: &[usize], total: u64) -> Value {
    let docs = documents(collection);
    let hits: Vec<Value> = ids
        .iter()
        .map(|&id| {
            let (doc_id, source) = &docs[id - 1];
            json!({"_index": collection, "_id": doc_id, "_score": 1.0, "_source": source})
        })
        .collect();
    json!({"took": 1, "timed_out": false, "hits": {
        "total": {"value": total, "relation": "eq"},
        "max_score": 1.0,
        "hits": hits
    }})
}

fn all_hits(collection: &str, ids: &[usize]) -> Value {
    hits(collection, ids, ids.len() as u64)
}

/// Terms buckets over `make`, with every price metric the cases ask for.
fn make_buckets(filter: impl Fn(&Value) -> bool) -> Value {
    let mut prices: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    for (_, vehicle) in documents(VEHICLES) {
        if filter(&vehicle) {
            let make = vehicle["make"].as_str().unwrap().to_string();
            prices
                .entry(make)
                .or_default()
                .push(vehicle["price"].as_f64().unwrap());
        }
    }

    let mut buckets: Vec<(String, Vec<f64>)> = prices.into_iter().collect();
    buckets.sort_by(|a, b| b.1.len().cmp(&a.1.len()).then(a.0.cmp(&b.0)));

    let buckets: Vec<Value> = buckets
        .into_iter()
        .map(|(make, prices)| {
            let count = prices.len();
            let sum: f64 = prices.iter().sum();
            let min = prices.iter().cloned().fold(f64::INFINITY, f64::min);
            let max = prices.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            let avg = sum / count as f64;
            json!({
                "key": make,
                "doc_count": count,
                "avg_price": {"value": avg},
                "min_price": {"value": min},
                "max_price": {"value": max},
                "stats_on_price": {"count": count, "min": min, "max": max, "avg": avg, "sum": sum}
            })
        })
        .collect();

    json!({"popular_cars": {
        "doc_count_error_upper_bound": 0,
        "sum_other_doc_count": 0,
        "buckets": buckets
    }})
}

fn with_aggregations(mut response: Value, aggregations: Value) -> Value {
    response["aggregations"] = aggregations;
    response
}

/// What a cluster seeded with the fixtures answers for each case.
fn fixture_answer(case_id: &str) -> Value {
    match case_id {
        "match-all-courses" => all_hits(COURSES, &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10]),
        "courses-with-professor-email" => all_hits(COURSES, &[1, 2, 3, 4, 6, 7, 8, 9, 10]),
        "courses-named-computer" => all_hits(COURSES, &[4, 7]),
        "computer-course-in-room-c8" => all_hits(COURSES, &[7]),
        "two-of-four-should-clauses" => all_hits(COURSES, &[4, 7, 1, 8]),
        "accounting-in-name-or-department" => all_hits(COURSES, &[6, 8, 1, 9]),
        "phrase-in-description" | "phrase-prefix-in-description" => all_hits(COURSES, &[6]),
        "enrollment-between-10-and-30" => all_hits(COURSES, &[1, 2, 3, 8, 9, 10]),
        "accounting-not-in-e7-small-class" | "filtered-professor-and-name-in-e3" => {
            all_hits(COURSES, &[8])
        }
        "nested-user-alice-white" => all_hits(MY_USERS, &[1]),
        "nested-driver-vehicle" => all_hits(DRIVERS, &[1]),
        "vehicles-first-page-by-price" => hits(VEHICLES, &[7, 14, 3, 16, 15], 16),
        "count-toyotas" => hits(VEHICLES, &[], 2),
        "buckets-by-make" | "price-metrics-by-make" | "price-stats-by-make" => {
            with_aggregations(hits(VEHICLES, &[], 16), make_buckets(|_| true))
        }
        "red-car-price-metrics" => with_aggregations(
            hits(VEHICLES, &[], 5),
            make_buckets(|v| v["color"] == "red"),
        ),
        other => panic!("no fixture answer for case {other}"),
    }
}

fn response(body: Value) -> SearchResponse {
    SearchResponse::from_json(body).unwrap()
}

fn case(id: &str) -> Case {
    cases::find(id).unwrap()
}

#[test]
fn test_every_case_passes_on_fixture_answers() {
    for case in cases::catalog() {
        let answer = response(fixture_answer(case.id));
        if let Err(e) = case.check(&answer) {
            panic!("{} failed: {e}", case.id);
        }
    }
}

#[test]
fn test_wrong_documents_fail() {
    let answer = response(all_hits(COURSES, &[4, 1]));
    assert!(case("courses-named-computer").check(&answer).is_err());

    let answer = response(all_hits(COURSES, &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10]));
    assert!(case("courses-with-professor-email").check(&answer).is_err());

    let answer = response(all_hits(MY_USERS, &[]));
    assert!(case("nested-user-alice-white").check(&answer).is_err());
}

#[test]
fn test_unsorted_page_fails() {
    let answer = response(hits(VEHICLES, &[1, 2, 3, 4, 5], 16));
    let err = case("vehicles-first-page-by-price").check(&answer).unwrap_err();
    assert!(err.to_string().contains("prices"));
}

#[test]
fn test_count_with_returned_hits_fails() {
    let answer = response(hits(VEHICLES, &[4, 5], 2));
    let err = case("count-toyotas").check(&answer).unwrap_err();
    assert!(err.to_string().contains("returned hit(s)"));
}

#[test]
fn test_unfiltered_buckets_fail_the_red_case() {
    let answer = response(with_aggregations(
        hits(VEHICLES, &[], 5),
        make_buckets(|_| true),
    ));
    assert!(case("red-car-price-metrics").check(&answer).is_err());
}

#[test]
fn test_missing_aggregation_fails() {
    let answer = response(hits(VEHICLES, &[], 16));
    assert!(case("buckets-by-make").check(&answer).is_err());
}

/// Answers `_search` requests by looking up the exact request body.
struct FixtureCluster {
    answers: HashMap<String, Value>,
}

impl FixtureCluster {
    fn key(path: &str, body: &Value) -> String {
        format!("{path} {body}")
    }

    fn new(cases: &[Case]) -> Self {
        let answers = cases
            .iter()
            .map(|case| {
                let path = format!("/{}/_search", case.index());
                (Self::key(&path, &case.request.to_body()), fixture_answer(case.id))
            })
            .collect();
        FixtureCluster { answers }
    }
}

impl Respond for FixtureCluster {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let body: Value = serde_json::from_slice(&request.body).unwrap_or(Value::Null);
        match self.answers.get(&Self::key(request.url.path(), &body)) {
            Some(answer) => ResponseTemplate::new(200).set_body_json(answer),
            None => ResponseTemplate::new(400).set_body_json(json!({
                "error": {"type": "parsing_exception", "reason": "unexpected request"},
                "status": 400
            })),
        }
    }
}

#[tokio::test]
async fn test_run_all_against_fixture_cluster() {
    let server = MockServer::start().await;
    let catalog = cases::catalog();
    Mock::given(method("POST"))
        .respond_with(FixtureCluster::new(&catalog))
        .mount(&server)
        .await;

    let client = SearchClient::new(ClientConfig::new(server.uri())).unwrap();
    let summary = cases::run_all(&client, &catalog).await;

    let failures: Vec<_> = summary.failures().collect();
    assert!(failures.is_empty(), "{failures:?}");
    assert_eq!(summary.passed(), 19);

    let toyotas = summary
        .outcomes
        .iter()
        .find(|o| o.id == "count-toyotas")
        .unwrap();
    assert_eq!(toyotas.total_hits, Some(2));
    assert_eq!(toyotas.index, "vehicles");
}

#[tokio::test]
async fn test_cluster_errors_fail_the_case() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = SearchClient::new(ClientConfig::new(server.uri())).unwrap();
    let outcome = cases::run_case(&client, &case("match-all-courses")).await;

    assert!(!outcome.passed);
    assert_eq!(outcome.total_hits, None);
    assert!(outcome.error.unwrap().contains("503"));
}
