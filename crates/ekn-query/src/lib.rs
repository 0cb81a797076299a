//! ekn-query: compile structured content queries into Xapian query strings.
//!
//! Knowledge-app content lives in Xapian databases served over HTTP by the
//! xapian-bridge service. This crate turns a [`QueryDescription`] (free text,
//! tag filters, ekn ids, sort preferences) into the boolean query-parser
//! string that service expects, plus the numeric sort-value slot and ordering
//! token the transport layer sends alongside it.

pub mod clause;
pub mod id;
pub mod query;
pub mod sanitize;
pub mod sort;
pub mod tags;

pub use clause::*;
pub use id::*;
pub use query::*;
pub use sanitize::*;
pub use sort::*;
pub use tags::*;
