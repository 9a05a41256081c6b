//! Turn search hits into typed records.

use log::warn;
use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::search::response::SearchResponse;

/// Decode every hit's `_source` into `T`, in hit order.
///
/// Fails on the first hit that is missing its source or does not match `T`.
pub fn decode_hits<T: DeserializeOwned>(response: &SearchResponse) -> Result<Vec<T>> {
    response.hits().iter().map(|hit| hit.decode()).collect()
}

/// Decode every hit's `_source` into `T`, in hit order, yielding `None` for
/// hits that fail to decode. Each failure is logged as a warning.
pub fn decode_hits_lenient<T: DeserializeOwned>(response: &SearchResponse) -> Vec<Option<T>> {
    response
        .hits()
        .iter()
        .map(|hit| match hit.decode() {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("Skipping undecodable hit: {e}");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::{Course, Group};

    fn courses_response() -> SearchResponse {
        SearchResponse::from_json(json!({
            "took": 1,
            "timed_out": false,
            "hits": {
                "total": {"value": 2, "relation": "eq"},
                "hits": [
                    {"_index": "courses", "_id": "1", "_score": 1.0, "_source": {
                        "name": "Accounting 101",
                        "room": "E3",
                        "professor": {"name": "Thomas Baszo", "department": "finance",
                                      "faculty_type": "part-time", "email": "baszot@onuni.com"},
                        "students_enrolled": 27,
                        "course_publish_date": "2015-01-27",
                        "course_description": "Act 101 is a course from the business school on the introduction to accounting that teaches students how to read and compose basic financial statements"
                    }},
                    {"_index": "courses", "_id": "2", "_score": 1.0, "_source": {"name": "broken"}}
                ]
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_strict_decode_fails_on_bad_hit() {
        let err = decode_hits::<Course>(&courses_response()).unwrap_err();
        assert!(err.to_string().contains("hit '2'"));
    }

    #[test]
    fn test_lenient_decode_keeps_positions() {
        let courses = decode_hits_lenient::<Course>(&courses_response());
        assert_eq!(courses.len(), 2);
        assert_eq!(courses[0].as_ref().unwrap().room, "E3");
        assert!(courses[1].is_none());
    }

    #[test]
    fn test_decode_empty_response() {
        let response = SearchResponse::from_json(json!({"hits": {"hits": []}})).unwrap();
        assert!(decode_hits::<Group>(&response).unwrap().is_empty());
    }
}
