//! Boolean clause construction for the Xapian query parser.
//!
//! Every composed sub-clause is parenthesized before joining, so operator
//! precedence in the backend grammar can never regroup it.

use crate::sanitize::{capitalize, sanitize, split_terms};

// Xapian prefixes used to query data
pub const PREFIX_EXACT_TITLE: &str = "exact_title:";
pub const PREFIX_TITLE: &str = "title:";
pub const PREFIX_TAG: &str = "tag:";
pub const PREFIX_ID: &str = "id:";

// Xapian QueryParser operators
// docs: http://xapian.org/docs/queryparser.html
pub const OP_AND: &str = " AND ";
pub const OP_OR: &str = " OR ";
pub const OP_NOT: &str = "NOT ";
pub const OP_NEAR: &str = " NEAR ";

pub(crate) fn parenthesize(clause: &str) -> String {
    format!("({clause})")
}

pub(crate) fn quote(term: &str) -> String {
    format!("\"{term}\"")
}

/// Build the free-text clause for a finalized query: the terms are assumed
/// to be entire words, so no wildcarding happens.
///
/// `match_all` additionally matches the bare terms against article bodies,
/// not just titles.
pub fn delimited_query_clause(query: &str, match_all: bool) -> String {
    free_text_clause(query, None, false, match_all)
}

/// Build the free-text clause for a type-ahead query: every term also
/// matches as a wildcard prefix, so partially typed words hit.
pub fn incremental_query_clause(query: &str, match_all: bool) -> String {
    free_text_clause(query, None, true, match_all)
}

/// Shared builder behind the two public entry points.
///
/// When `stopword_free` is given, its terms stand in for the raw terms in
/// the title and body sub-clauses; the exact-title sub-clause always uses
/// the raw terms.
pub(crate) fn free_text_clause(
    query: &str,
    stopword_free: Option<&str>,
    wildcard: bool,
    match_all: bool,
) -> String {
    let sanitized = sanitize(query);
    let terms = split_terms(&sanitized);

    let capitalized: Vec<String> = terms.iter().map(|t| capitalize(t)).collect();
    let exact_title = format!("{PREFIX_EXACT_TITLE}{}", capitalized.join("_"));

    // A lone character gets the exact-title clause only; wildcard searches
    // on a single character cripple xapian
    if sanitized.chars().count() == 1 {
        return exact_title;
    }

    let maybe_wildcard = |term: String| -> String {
        if wildcard {
            parenthesize(&format!("{term}{OP_OR}{term}*"))
        } else {
            term
        }
    };

    let title_terms = match stopword_free {
        Some(q) if !q.is_empty() => split_terms(&sanitize(q)),
        _ => terms,
    };

    let mut clauses = Vec::new();

    clauses.push(maybe_wildcard(exact_title));

    let title_clause = title_terms
        .iter()
        .map(|t| maybe_wildcard(format!("{PREFIX_TITLE}{t}")))
        .collect::<Vec<_>>()
        .join(OP_AND);
    clauses.push(title_clause);

    if match_all {
        let body_clause = title_terms
            .iter()
            .map(|t| maybe_wildcard(t.clone()))
            .collect::<Vec<_>>()
            .join(OP_AND);
        clauses.push(body_clause);
    }

    clauses
        .iter()
        .map(|c| parenthesize(c))
        .collect::<Vec<_>>()
        .join(OP_OR)
}
