//! Sort criteria and their Xapian value slots.

use serde::{Deserialize, Serialize};

// The value numbers where sortable info is stored in our Xapian documents
pub const RANK_VALUE_NO: u32 = 1;
pub const ARTICLE_NUMBER_VALUE_NO: u32 = 2;

/// What to sort results by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortCriterion {
    /// Sort by rank, weighting exact title matches most heavily.
    #[default]
    Relevance,
    /// Sort by position in the content set's reading sequence.
    SequenceNumber,
    /// Sort by the article number field; only reader-app databases carry one.
    ArticleNumber,
}

/// Which way to order sorted results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// Map a sort criterion to the document value slot holding it, or `None`
/// when the backend has no slot for it and the transport should omit the
/// sort-value parameter.
pub fn sort_value_slot(criterion: SortCriterion) -> Option<u32> {
    match criterion {
        SortCriterion::Relevance => Some(RANK_VALUE_NO),
        SortCriterion::ArticleNumber => Some(ARTICLE_NUMBER_VALUE_NO),
        _ => None,
    }
}

impl SortOrder {
    /// The wire token the xapian-bridge `order` parameter expects.
    pub fn as_param(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "asc",
            SortOrder::Descending => "desc",
        }
    }
}
