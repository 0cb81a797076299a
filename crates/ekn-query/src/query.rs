//! Query descriptions: a bag of search parameters compiled into a single
//! query-parser string.
//!
//! A [`QueryDescription`] has no behavior beyond its derived values; it is a
//! value object, safe to keep in navigation history and to copy with tweaked
//! fields. Construct one with struct-update syntax over `Default`.

use serde::{Deserialize, Serialize};

use crate::clause::{free_text_clause, parenthesize, OP_AND};
use crate::id::{ids_clause, negated_ids_clause, InvalidIdError};
use crate::sanitize::sanitize;
use crate::sort::{sort_value_slot, SortCriterion, SortOrder};
use crate::tags::{negated_tag_clause, tag_clause, tag_match_all_clause};

const DEFAULT_CUTOFF: u32 = 10;
const MATCH_ALL_CUTOFF: u32 = 20;

/// How free-text terms are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QueryMode {
    /// Type-ahead: partially typed words match, so a query for `dragonba`
    /// finds the Dragonball article.
    #[default]
    Incremental,
    /// Finalized: terms are assumed to be entire words.
    Delimited,
}

/// A description of a query to a knowledge-app content database.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryDescription {
    /// The query string as entered by the user.
    pub search_terms: String,
    /// A version of `search_terms` with stopwords removed, when the caller
    /// ran the query through the fix endpoint. Stands in for the raw terms
    /// in the title and body clauses.
    pub stopword_free_terms: Option<String>,
    pub mode: QueryMode,
    /// Match the terms against article bodies too, not only titles.
    pub match_all_terms: bool,
    /// Restrict results to articles carrying all of these tags.
    pub tags_match_all: Vec<String>,
    /// Restrict results to articles carrying any of these tags.
    pub tags_match_any: Vec<String>,
    /// Drop results carrying any of these tags.
    pub excluded_tags: Vec<String>,
    /// Restrict results to these records; usable with empty search terms to
    /// fetch a known set of ids.
    pub ids: Vec<String>,
    /// Drop these records from the results.
    pub excluded_ids: Vec<String>,
    pub sort: SortCriterion,
    pub order: SortOrder,
    /// Maximum number of results; `None` means unbounded.
    pub limit: Option<u32>,
    /// Number of results to skip, for pagination with `limit`.
    pub offset: u32,
}

/// The compiled form of a query, consumed once by the transport layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompiledQuery {
    pub query_parser_string: String,
    /// Document value slot to sort by, or `None` to sort by relevance and
    /// omit the parameter.
    pub sort_value: Option<u32>,
    pub order: SortOrder,
}

impl QueryDescription {
    /// The full boolean query-parser string: free-text, tag, and id clauses,
    /// each parenthesized and AND'd together.
    pub fn query_parser_string(&self) -> Result<String, InvalidIdError> {
        let clauses = [
            self.free_text_clause(),
            tag_clause(&self.tags_match_any),
            tag_match_all_clause(&self.tags_match_all),
            ids_clause(&self.ids)?,
            self.filter_out_clause()?,
        ];
        Ok(clauses
            .iter()
            .filter(|clause| !clause.is_empty())
            .map(|clause| parenthesize(clause))
            .collect::<Vec<_>>()
            .join(OP_AND))
    }

    /// The xapian cutoff percentage for this query. Matching against all
    /// indexed terms needs a stricter cutoff.
    pub fn cutoff(&self) -> u32 {
        if self.match_all_terms {
            MATCH_ALL_CUTOFF
        } else {
            DEFAULT_CUTOFF
        }
    }

    /// Document value slot to sort by, per [`sort_value_slot`].
    pub fn sort_value_slot(&self) -> Option<u32> {
        sort_value_slot(self.sort)
    }

    /// A query with no search terms matches everything the filter clauses
    /// allow; typically used to fetch all articles carrying a tag.
    pub fn is_match_all(&self) -> bool {
        self.search_terms.is_empty()
    }

    /// Compile into the form the transport layer serializes.
    pub fn compile(&self) -> Result<CompiledQuery, InvalidIdError> {
        Ok(CompiledQuery {
            query_parser_string: self.query_parser_string()?,
            sort_value: self.sort_value_slot(),
            order: self.order,
        })
    }

    fn free_text_clause(&self) -> String {
        // Terms made of nothing but syntax characters and whitespace sanitize
        // away entirely; they contribute no clause, same as no terms at all
        if sanitize(&self.search_terms).is_empty() {
            return String::new();
        }
        free_text_clause(
            &self.search_terms,
            self.stopword_free_terms.as_deref(),
            self.mode == QueryMode::Incremental,
            self.match_all_terms,
        )
    }

    fn filter_out_clause(&self) -> Result<String, InvalidIdError> {
        let mut clauses = Vec::new();
        let tags = negated_tag_clause(&self.excluded_tags);
        if !tags.is_empty() {
            clauses.push(tags);
        }
        let ids = negated_ids_clause(&self.excluded_ids)?;
        if !ids.is_empty() {
            clauses.push(ids);
        }
        Ok(clauses.join(OP_AND))
    }
}
