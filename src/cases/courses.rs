//! Cases over the `courses` collection.

use crate::cases::{Case, expect};
use crate::domain::Course;
use crate::error::Result;
use crate::fixtures::COURSES;
use crate::query::{
    BooleanQuery, ExistsQuery, MatchAllQuery, MatchQuery, MultiMatchQuery, PhrasePrefixQuery,
    PhraseQuery, RangeQuery,
};
use crate::search::{SearchRequest, SearchResponse, decode_hits};

/// The courses cases, in catalog order.
pub fn cases() -> Vec<Case> {
    vec![
        Case::new(
            "match-all-courses",
            "every course is returned",
            SearchRequest::new(COURSES).query(Box::new(MatchAllQuery::new())),
            check_match_all,
        ),
        Case::new(
            "courses-with-professor-email",
            "courses whose professor has an email",
            SearchRequest::new(COURSES).query(Box::new(ExistsQuery::new("professor.email"))),
            check_professor_email,
        ),
        Case::new(
            "courses-named-computer",
            "courses with 'computer' in the name",
            SearchRequest::new(COURSES).query(Box::new(MatchQuery::new("name", "computer"))),
            check_named_computer,
        ),
        Case::new(
            "computer-course-in-room-c8",
            "'computer' courses held in room c8",
            SearchRequest::new(COURSES).query(Box::new(
                BooleanQuery::builder()
                    .must(Box::new(MatchQuery::new("name", "computer")))
                    .must(Box::new(MatchQuery::new("room", "c8")))
                    .build(),
            )),
            check_computer_in_c8,
        ),
        Case::new(
            "two-of-four-should-clauses",
            "courses matching at least two of four optional clauses",
            SearchRequest::new(COURSES).query(Box::new(
                BooleanQuery::builder()
                    .should(Box::new(MatchQuery::new("name", "accounting")))
                    .should(Box::new(MatchQuery::new("room", "e3")))
                    .should(Box::new(MatchQuery::new("name", "computer")))
                    .should(Box::new(MatchQuery::new("professor.name", "gregg")))
                    .minimum_should_match(2)
                    .build(),
            )),
            check_two_of_four,
        ),
        Case::new(
            "accounting-in-name-or-department",
            "'accounting' in the course name or the professor's department",
            SearchRequest::new(COURSES).query(Box::new(MultiMatchQuery::new(
                "accounting",
                ["name", "professor.department"],
            ))),
            check_accounting_anywhere,
        ),
        Case::new(
            "phrase-in-description",
            "an exact phrase in the description",
            SearchRequest::new(COURSES).query(Box::new(PhraseQuery::new(
                "course_description",
                "from the business school taken by",
            ))),
            check_cost_accounting,
        ),
        Case::new(
            "phrase-prefix-in-description",
            "a phrase ending in a partial word in the description",
            SearchRequest::new(COURSES).query(Box::new(PhrasePrefixQuery::new(
                "course_description",
                "from the business school taken by fin",
            ))),
            check_cost_accounting,
        ),
        Case::new(
            "enrollment-between-10-and-30",
            "courses with 10 to 30 students, inclusive",
            SearchRequest::new(COURSES).query(Box::new(
                RangeQuery::new("students_enrolled").gte(10).lte(30),
            )),
            check_enrollment_range,
        ),
        Case::new(
            "accounting-not-in-e7-small-class",
            "accounting courses outside e7, preferring 10 to 20 students",
            SearchRequest::new(COURSES).query(Box::new(
                BooleanQuery::builder()
                    .must(Box::new(MatchQuery::new("name", "accounting")))
                    .must_not(Box::new(MatchQuery::new("room", "e7")))
                    .should(Box::new(
                        RangeQuery::new("students_enrolled").gte(10).lte(20),
                    ))
                    .minimum_should_match(1)
                    .build(),
            )),
            check_accounting_info_systems,
        ),
        Case::new(
            "filtered-professor-and-name-in-e3",
            "Bill's accounting courses, filtered, then matched on room e3",
            SearchRequest::new(COURSES).query(Box::new(
                BooleanQuery::builder()
                    .filter(Box::new(
                        BooleanQuery::builder()
                            .must(Box::new(MatchQuery::new("professor.name", "bill")))
                            .must(Box::new(MatchQuery::new("name", "accounting")))
                            .build(),
                    ))
                    .must(Box::new(MatchQuery::new("room", "e3")))
                    .build(),
            )),
            check_accounting_info_systems,
        ),
    ]
}

fn names(courses: &[Course]) -> Vec<&str> {
    courses.iter().map(|c| c.name.as_str()).collect()
}

fn name_room_professor(courses: &[Course]) -> Vec<(&str, &str, &str)> {
    courses
        .iter()
        .map(|c| (c.name.as_str(), c.room.as_str(), c.professor.name.as_str()))
        .collect()
}

fn check_match_all(response: &SearchResponse) -> Result<()> {
    expect::total_hits(response, 10)?;
    let courses: Vec<Course> = decode_hits(response)?;
    expect::equal("decoded courses", courses.len(), 10)
}

fn check_professor_email(response: &SearchResponse) -> Result<()> {
    expect::total_hits(response, 9)?;
    let courses: Vec<Course> = decode_hits(response)?;
    expect::equal("decoded courses", courses.len(), 9)?;
    expect::excludes("course names", &names(&courses), &["Theatre 410"])
}

fn check_named_computer(response: &SearchResponse) -> Result<()> {
    expect::total_hits(response, 2)?;
    let courses: Vec<Course> = decode_hits(response)?;
    expect::same_elements(
        "course names",
        names(&courses),
        vec!["Computer Science 101", "Computer Internals 250"],
    )
}

fn check_computer_in_c8(response: &SearchResponse) -> Result<()> {
    expect::total_hits(response, 1)?;
    let courses: Vec<Course> = decode_hits(response)?;
    expect::equal("course names", names(&courses), vec!["Computer Internals 250"])
}

fn check_two_of_four(response: &SearchResponse) -> Result<()> {
    expect::total_hits(response, 4)?;
    let courses: Vec<Course> = decode_hits(response)?;
    expect::same_elements(
        "name, room, professor",
        name_room_professor(&courses),
        vec![
            ("Computer Science 101", "C12", "Gregg Payne"),
            ("Computer Internals 250", "C8", "Gregg Payne"),
            ("Accounting 101", "E3", "Thomas Baszo"),
            ("Accounting Info Systems 350", "E3", "Bill Cage"),
        ],
    )
}

fn check_accounting_anywhere(response: &SearchResponse) -> Result<()> {
    expect::total_hits(response, 4)?;
    let courses: Vec<Course> = decode_hits(response)?;
    expect::same_elements(
        "course names",
        names(&courses),
        vec![
            "Cost Accounting 400",
            "Accounting Info Systems 350",
            "Accounting 101",
            "Tax Accounting 200",
        ],
    )
}

fn check_cost_accounting(response: &SearchResponse) -> Result<()> {
    expect::total_hits(response, 1)?;
    let courses: Vec<Course> = decode_hits(response)?;
    expect::equal(
        "name, room, professor",
        name_room_professor(&courses),
        vec![("Cost Accounting 400", "E7", "Bill Cage")],
    )
}

fn check_enrollment_range(response: &SearchResponse) -> Result<()> {
    expect::total_hits(response, 6)?;
    let courses: Vec<Course> = decode_hits(response)?;
    let enrolled: Vec<i64> = courses.iter().map(|c| c.students_enrolled).collect();
    expect::same_elements("students enrolled", enrolled.clone(), vec![27, 18, 22, 19, 17, 13])?;
    expect::excludes("students enrolled", &enrolled, &[33, 47, 31])
}

fn check_accounting_info_systems(response: &SearchResponse) -> Result<()> {
    expect::total_hits(response, 1)?;
    let courses: Vec<Course> = decode_hits(response)?;
    expect::equal(
        "name, room, professor",
        name_room_professor(&courses),
        vec![("Accounting Info Systems 350", "E3", "Bill Cage")],
    )
}
