//! The fixture documents and collection declarations.

use serde_json::Value;

use crate::error::{EstocError, Result};
use crate::schema::{FieldMapping, IndexMapping};

/// Collection of university courses.
pub const COURSES: &str = "courses";
/// Collection holding one group with nested users.
pub const MY_USERS: &str = "my-users";
/// Collection of drivers with nested vehicles.
pub const DRIVERS: &str = "drivers";
/// Collection of vehicles from a sales inventory.
pub const VEHICLES: &str = "vehicles";

/// How a collection's documents are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Seeding {
    /// All documents in a single `_bulk` request.
    Bulk,
    /// One `_doc` request per document.
    PerDocument,
}

/// A fixture collection: its name, documents and optional explicit mapping.
#[derive(Debug, Clone, Copy)]
pub struct Collection {
    /// Collection name.
    pub name: &'static str,
    /// Document bodies, in id order.
    pub documents: &'static [&'static str],
    /// How the documents are written.
    pub seeding: Seeding,
    mapping: Option<fn() -> IndexMapping>,
}

impl Collection {
    /// Explicit mapping to create the collection with. `None` leaves it to
    /// dynamic mapping on first write.
    pub fn mapping(&self) -> Option<IndexMapping> {
        self.mapping.map(|build| build())
    }

    /// Number of documents the collection holds once seeded.
    pub fn expected_count(&self) -> u64 {
        self.documents.len() as u64
    }

    /// Parse the documents, paired with their ids ("1", "2", ...).
    pub fn parsed_documents(&self) -> Result<Vec<(String, Value)>> {
        self.documents
            .iter()
            .enumerate()
            .map(|(n, raw)| {
                let id = (n + 1).to_string();
                let document = serde_json::from_str(raw).map_err(|e| {
                    EstocError::fixture(format!("{} document {id} is malformed: {e}", self.name))
                })?;
                Ok((id, document))
            })
            .collect()
    }
}

/// All fixture collections, in seeding order.
pub const COLLECTIONS: [Collection; 4] = [
    Collection {
        name: COURSES,
        documents: COURSE_DOCUMENTS,
        seeding: Seeding::Bulk,
        mapping: None,
    },
    Collection {
        name: MY_USERS,
        documents: USER_DOCUMENTS,
        seeding: Seeding::PerDocument,
        mapping: Some(users_mapping),
    },
    Collection {
        name: DRIVERS,
        documents: DRIVER_DOCUMENTS,
        seeding: Seeding::PerDocument,
        mapping: Some(drivers_mapping),
    },
    Collection {
        name: VEHICLES,
        documents: VEHICLE_DOCUMENTS,
        seeding: Seeding::Bulk,
        mapping: None,
    },
];

/// Look up a fixture collection by name.
pub fn collection(name: &str) -> Option<&'static Collection> {
    COLLECTIONS.iter().find(|c| c.name == name)
}

/// Select collections by name, keeping seeding order. An empty selection
/// means every collection.
pub fn select<S: AsRef<str>>(names: &[S]) -> Result<Vec<Collection>> {
    if let Some(unknown) = names
        .iter()
        .map(|name| name.as_ref())
        .find(|name| collection(name).is_none())
    {
        return Err(EstocError::not_found(format!("collection '{unknown}'")));
    }
    Ok(COLLECTIONS
        .iter()
        .filter(|c| names.is_empty() || names.iter().any(|n| n.as_ref() == c.name))
        .copied()
        .collect())
}

/// `user` is nested so first and last names match within one user.
pub fn users_mapping() -> IndexMapping {
    IndexMapping::new().field("user", FieldMapping::nested())
}

/// `driver` and `driver.vehicle` are both nested.
pub fn drivers_mapping() -> IndexMapping {
    IndexMapping::new().field(
        "driver",
        FieldMapping::nested_with([
            ("last_name", FieldMapping::text()),
            (
                "vehicle",
                FieldMapping::nested_with([
                    ("make", FieldMapping::text()),
                    ("model", FieldMapping::text()),
                ]),
            ),
        ]),
    )
}

const COURSE_DOCUMENTS: &[&str] = &[
    r#"{"name": "Accounting 101", "room": "E3", "professor": {"name": "Thomas Baszo", "department": "finance", "faculty_type": "part-time", "email": "baszot@onuni.com"}, "students_enrolled": 27, "course_publish_date": "2015-01-19", "course_description": "Act 101 is a course from the business school on the introduction to accounting that teaches students how to read and compose basic financial statements"}"#,
    r#"{"name": "Marketing 101", "room": "E4", "professor": {"name": "William Smith", "department": "finance", "faculty_type": "part-time", "email": "wills@onuni.com"}, "students_enrolled": 18, "course_publish_date": "2015-06-21", "course_description": "Mkt 101 is a course from the business school on the introduction to marketing that teaches students the fundamentals of market analysis, customer retention and online advertisements"}"#,
    r#"{"name": "Anthropology 230", "room": "G11", "professor": {"name": "Devin Cranford", "department": "history", "faculty_type": "full-time", "email": "devinc@onuni.com"}, "students_enrolled": 22, "course_publish_date": "2013-08-27", "course_description": "Ant 230 is an intermediate course on human societies and cultures and their development. A focus on the Mayans civilization is rooted in this course"}"#,
    r#"{"name": "Computer Science 101", "room": "C12", "professor": {"name": "Gregg Payne", "department": "engineering", "faculty_type": "full-time", "email": "payneg@onuni.com"}, "students_enrolled": 33, "course_publish_date": "2013-08-27", "course_description": "CS 101 is a first year computer science introduction teaching fundamental data structures and alogirthms using python. "}"#,
    r#"{"name": "Theatre 410", "room": "T18", "professor": {"name": "Sebastian Hern", "department": "art", "faculty_type": "part-time"}, "students_enrolled": 47, "course_publish_date": "2013-01-27", "course_description": "Tht 410 is an advanced elective course disecting the various plays written by shakespere during the 16th century"}"#,
    r#"{"name": "Cost Accounting 400", "room": "E7", "professor": {"name": "Bill Cage", "department": "accounting", "faculty_type": "full-time", "email": "cageb@onuni.com"}, "students_enrolled": 31, "course_publish_date": "2014-12-31", "course_description": "Cst Act 400 is an advanced course from the business school taken by final year accounting majors that covers the subject of business incurred costs and how to record them in financial statements"}"#,
    r#"{"name": "Computer Internals 250", "room": "C8", "professor": {"name": "Gregg Payne", "department": "engineering", "faculty_type": "part-time", "email": "payneg@onuni.com"}, "students_enrolled": 33, "course_publish_date": "2012-08-20", "course_description": "cpt Int 250 gives students an integrated and rigorous picture of applied computer science, as it comes to play in the construction of a simple yet powerful computer system. "}"#,
    r#"{"name": "Accounting Info Systems 350", "room": "E3", "professor": {"name": "Bill Cage", "department": "accounting", "faculty_type": "full-time", "email": "cageb@onuni.com"}, "students_enrolled": 19, "course_publish_date": "2014-05-15", "course_description": "Act Sys 350 is an advanced course providing students a practical understanding of an accounting system in database technology. Students will use MS Access to build a transaction ledger system"}"#,
    r#"{"name": "Tax Accounting 200", "room": "E7", "professor": {"name": "Thomas Baszo", "department": "finance", "faculty_type": "part-time", "email": "baszot@onuni.com"}, "students_enrolled": 17, "course_publish_date": "2016-06-15", "course_description": "Tax Act 200 is an intermediate course covering various aspects of tax law"}"#,
    r#"{"name": "Capital Markets 350", "room": "E3", "professor": {"name": "Thomas Baszo", "department": "finance", "faculty_type": "part-time", "email": "baszot@onuni.com"}, "students_enrolled": 13, "course_publish_date": "2016-01-11", "course_description": "This is an advanced course teaching crucial topics related to raising capital and bonds, shares and other long-term equity and debt financial instrucments"}"#,
];

const USER_DOCUMENTS: &[&str] = &[
    r#"{"group" : "fans", "user" : [{"first" : "John", "last" :  "Smith"}, {"first" : "Alice", "last" :  "White"} ] }"#,
];

const DRIVER_DOCUMENTS: &[&str] = &[
    r#"{"driver":{"last_name":"McQueen", "vehicle":[{"make":"Powell Motors", "model":"Canyonero"}, {"make":"Miller-Meteor", "model":"Ecto-1"} ] } }"#,
    r#"{"driver":{"last_name":"Hudson", "vehicle":[{"make":"Mifune", "model":"Mach Five"}, {"make":"Miller-Meteor", "model":"Ecto-1"} ] } }"#,
];

const VEHICLE_DOCUMENTS: &[&str] = &[
    r#"{ "price" : 10000, "color" : "white", "make" : "honda", "sold" : "2016-10-28", "condition": "okay"}"#,
    r#"{ "price" : 20000, "color" : "white", "make" : "honda", "sold" : "2016-11-05", "condition": "new" }"#,
    r#"{ "price" : 30000, "color" : "green", "make" : "ford", "sold" : "2016-05-18", "condition": "new" }"#,
    r#"{ "price" : 15000, "color" : "blue", "make" : "toyota", "sold" : "2016-07-02", "condition": "good" }"#,
    r#"{ "price" : 12000, "color" : "green", "make" : "toyota", "sold" : "2016-08-19" , "condition": "good"}"#,
    r#"{ "price" : 18000, "color" : "red", "make" : "dodge", "sold" : "2016-11-05", "condition": "good"  }"#,
    r#"{ "price" : 80000, "color" : "red", "make" : "bmw", "sold" : "2016-01-01", "condition": "new"  }"#,
    r#"{ "price" : 25000, "color" : "blue", "make" : "ford", "sold" : "2016-08-22", "condition": "new"  }"#,
    r#"{ "price" : 10000, "color" : "gray", "make" : "dodge", "sold" : "2016-02-12", "condition": "okay" }"#,
    r#"{ "price" : 19000, "color" : "red", "make" : "dodge", "sold" : "2016-02-12", "condition": "good" }"#,
    r#"{ "price" : 20000, "color" : "red", "make" : "chevrolet", "sold" : "2016-08-15", "condition": "good" }"#,
    r#"{ "price" : 13000, "color" : "gray", "make" : "chevrolet", "sold" : "2016-11-20", "condition": "okay" }"#,
    r#"{ "price" : 12500, "color" : "gray", "make" : "dodge", "sold" : "2016-03-09", "condition": "okay" }"#,
    r#"{ "price" : 35000, "color" : "red", "make" : "dodge", "sold" : "2016-04-10", "condition": "new" }"#,
    r#"{ "price" : 28000, "color" : "blue", "make" : "chevrolet", "sold" : "2016-08-15", "condition": "new" }"#,
    r#"{ "price" : 30000, "color" : "gray", "make" : "bmw", "sold" : "2016-11-20", "condition": "good" }"#,
];
