//! Result envelopes from xapian-bridge.

use ekn_query::QueryDescription;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Envelope for the `/query` endpoint. Individual results are JSON-LD
/// content-object models, decoded downstream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QueryResults {
    pub results: Vec<Value>,
    pub num_results: Option<u64>,
    pub offset: Option<u64>,
    pub upper_bound: Option<u64>,
}

/// Envelope for the `/fix` endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FixedQuery {
    pub stop_word_corrected_query: Option<String>,
}

impl FixedQuery {
    /// A copy of `query` with the stopword-free terms filled in from the
    /// fix response, when the service provided them.
    pub fn apply(&self, query: &QueryDescription) -> QueryDescription {
        let mut fixed = query.clone();
        if let Some(corrected) = &self.stop_word_corrected_query {
            fixed.stopword_free_terms = Some(corrected.clone());
        }
        fixed
    }
}

lazy_static! {
    // Databases built before 2.3 hardcode the old node.js knowledge-engine
    // routes in their metadata
    static ref LEGACY_ROUTE: Regex = Regex::new(r"http://localhost:3003/(api/)?").unwrap();
}

/// Rewrite pre-2.3 knowledge-engine object routes to `ekn://` uris. Run this
/// over a response body before decoding it.
pub fn fix_legacy_ids(body: &str) -> String {
    LEGACY_ROUTE.replace_all(body, "ekn://").to_string()
}

/// Decode a `/query` response body, patching legacy routes first.
pub fn parse_query_results(body: &str) -> Result<QueryResults, serde_json::Error> {
    serde_json::from_str(&fix_legacy_ids(body))
}
