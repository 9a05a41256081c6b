//! Courses and the professors teaching them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A course document from the `courses` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Course title, e.g. "Computer Science 101".
    pub name: String,
    /// Room code, e.g. "C12".
    pub room: String,
    /// The professor teaching the course, embedded in the document.
    pub professor: Professor,
    /// Number of enrolled students.
    pub students_enrolled: i64,
    /// Publication date as stored, `YYYY-MM-DD`.
    #[serde(rename = "course_publish_date")]
    pub publish_date: String,
    /// Free-text description.
    #[serde(rename = "course_description")]
    pub description: String,
}

impl Course {
    /// Parse the publication date. `None` when it is not a `YYYY-MM-DD` date.
    pub fn published_on(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.publish_date, "%Y-%m-%d").ok()
    }
}

/// A professor embedded in a course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Professor {
    /// Full name.
    pub name: String,
    /// Department, e.g. "finance".
    pub department: String,
    /// "full-time" or "part-time".
    pub faculty_type: String,
    /// Contact address; some professors have none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}
