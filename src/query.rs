//! Query DSL builders.
//!
//! Every query type implements [`Query`], which renders it as the JSON object
//! the cluster expects under a search request's `query` key. Compound queries
//! ([`BooleanQuery`], [`NestedQuery`]) hold boxed child queries, so arbitrary
//! trees can be assembled:
//!
//! ```
//! use estoc::query::{BooleanQuery, MatchQuery, Query};
//!
//! let query = BooleanQuery::builder()
//!     .must(Box::new(MatchQuery::new("name", "computer")))
//!     .must(Box::new(MatchQuery::new("room", "c8")))
//!     .build();
//!
//! let json = query.to_json();
//! assert_eq!(json["bool"]["must"].as_array().unwrap().len(), 2);
//! ```

pub mod boolean;
pub mod exists;
pub mod match_query;
pub mod multi_match;
pub mod nested;
pub mod phrase;
#[allow(clippy::module_inception)]
pub mod query;
pub mod range;

pub use self::boolean::{BooleanClause, BooleanQuery, BooleanQueryBuilder, Occur};
pub use self::exists::ExistsQuery;
pub use self::match_query::{MatchAllQuery, MatchQuery, Operator};
pub use self::multi_match::{MultiMatchQuery, MultiMatchType};
pub use self::nested::{NestedQuery, ScoreMode};
pub use self::phrase::{PhrasePrefixQuery, PhraseQuery};
pub use self::query::Query;
pub use self::range::{Bound, RangeQuery};
