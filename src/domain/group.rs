//! Groups of users.

use serde::{Deserialize, Serialize};

/// A `my-users` document: a named group with a nested list of users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// Group name.
    pub group: String,
    /// Members, in document order.
    #[serde(rename = "user", default)]
    pub users: Vec<User>,
}

/// A group member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Given name.
    pub first: String,
    /// Family name.
    pub last: String,
}

impl User {
    /// "First Last".
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first, self.last)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_group() {
        let group: Group = serde_json::from_str(
            r#"{"group" : "fans", "user" : [{"first" : "John", "last" :  "Smith"}, {"first" : "Alice", "last" :  "White"} ] }"#,
        )
        .unwrap();

        assert_eq!(group.group, "fans");
        let names: Vec<String> = group.users.iter().map(User::full_name).collect();
        assert_eq!(names, vec!["John Smith", "Alice White"]);
    }
}
