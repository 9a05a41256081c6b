//! Cases that join into nested document lists.

use crate::cases::{Case, expect};
use crate::domain::{DriverContainer, Group};
use crate::error::Result;
use crate::fixtures::{DRIVERS, MY_USERS};
use crate::query::{BooleanQuery, MatchQuery, NestedQuery, ScoreMode};
use crate::search::{SearchRequest, SearchResponse, decode_hits};

/// The nested cases, in catalog order.
pub fn cases() -> Vec<Case> {
    vec![
        Case::new(
            "nested-user-alice-white",
            "groups with a user whose first name is Alice and last name is White",
            SearchRequest::new(MY_USERS).query(Box::new(NestedQuery::new(
                "user",
                Box::new(
                    BooleanQuery::builder()
                        .must(Box::new(MatchQuery::new("user.first", "Alice")))
                        .must(Box::new(MatchQuery::new("user.last", "White")))
                        .build(),
                ),
                ScoreMode::None,
            ))),
            check_alice_white,
        ),
        Case::new(
            "nested-driver-vehicle",
            "drivers owning a Powell Motors Canyonero",
            SearchRequest::new(DRIVERS).query(Box::new(NestedQuery::new(
                "driver",
                Box::new(NestedQuery::new(
                    "driver.vehicle",
                    Box::new(
                        BooleanQuery::builder()
                            .must(Box::new(MatchQuery::new(
                                "driver.vehicle.make",
                                "Powell Motors",
                            )))
                            .must(Box::new(MatchQuery::new(
                                "driver.vehicle.model",
                                "Canyonero",
                            )))
                            .build(),
                    ),
                    ScoreMode::None,
                )),
                ScoreMode::None,
            ))),
            check_powell_motors_driver,
        ),
    ]
}

fn check_alice_white(response: &SearchResponse) -> Result<()> {
    expect::total_hits(response, 1)?;
    let groups: Vec<Group> = decode_hits(response)?;
    let names: Vec<&str> = groups.iter().map(|g| g.group.as_str()).collect();
    expect::equal("group names", names, vec!["fans"])
}

fn check_powell_motors_driver(response: &SearchResponse) -> Result<()> {
    expect::total_hits(response, 1)?;
    let drivers: Vec<DriverContainer> = decode_hits(response)?;
    let last_names: Vec<&str> = drivers
        .iter()
        .map(|d| d.driver.last_name.as_str())
        .collect();
    expect::equal("driver last names", last_names, vec!["McQueen"])
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_nested_in_nested_body() {
        let case = cases()
            .into_iter()
            .find(|c| c.id == "nested-driver-vehicle")
            .unwrap();
        let body = case.request.to_body();

        assert_eq!(
            body,
            json!({
                "query": {
                    "nested": {
                        "path": "driver",
                        "score_mode": "none",
                        "query": {
                            "nested": {
                                "path": "driver.vehicle",
                                "score_mode": "none",
                                "query": {
                                    "bool": {
                                        "must": [
                                            {"match": {"driver.vehicle.make": {"query": "Powell Motors"}}},
                                            {"match": {"driver.vehicle.model": {"query": "Canyonero"}}}
                                        ]
                                    }
                                }
                            }
                        }
                    }
                }
            })
        );
    }

    #[test]
    fn test_check_rejects_wrong_group() {
        let response = SearchResponse::from_json(json!({
            "hits": {
                "total": {"value": 1, "relation": "eq"},
                "hits": [{"_index": "my-users", "_id": "1", "_source": {"group": "critics", "user": []}}]
            }
        }))
        .unwrap();
        assert!(check_alice_white(&response).is_err());
    }
}
