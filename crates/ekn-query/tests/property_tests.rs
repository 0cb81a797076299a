//! Property-based checks over the sanitizer and clause builders.

use ekn_query::{id_hash, sanitize, tag_clause};
use proptest::prelude::*;

proptest! {
    #[test]
    fn sanitize_is_idempotent(raw in ".*") {
        let once = sanitize(&raw);
        prop_assert_eq!(sanitize(&once), once);
    }

    #[test]
    fn sanitized_output_has_no_syntax_characters(raw in ".*") {
        let out = sanitize(&raw);
        prop_assert!(!out.contains(['(', ')', '+', '-', '\'', '"']));
    }

    #[test]
    fn sanitized_output_is_trimmed(raw in ".*") {
        let out = sanitize(&raw);
        prop_assert_eq!(out.trim(), out.as_str());
    }

    // Lowercase tag names cannot collide with the prefix marker or the
    // join operator, so the counts are exact
    #[test]
    fn tag_clause_counts(tags in proptest::collection::vec("[a-z][a-z ]{0,11}", 1..8)) {
        let clause = tag_clause(&tags);
        prop_assert_eq!(clause.matches("tag:").count(), tags.len());
        prop_assert_eq!(clause.matches(" OR ").count(), tags.len() - 1);
    }

    #[test]
    fn hash_round_trips_through_a_valid_id(hash in "[0-9a-f]{16}") {
        let id = format!("ekn://domain/{hash}");
        prop_assert_eq!(id_hash(&id).unwrap(), hash.as_str());
    }
}
