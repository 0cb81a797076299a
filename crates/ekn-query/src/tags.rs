//! Tag filter clauses.

use crate::clause::{quote, OP_AND, OP_NOT, OP_OR, PREFIX_TAG};

/// Join tags as individual tag queries OR'd together, so an article carrying
/// any of the tags matches. Multi-word tags are quoted so the backend treats
/// them as a single phrase term.
///
/// e.g. `[foo, bar, baz]` => `tag:"foo" OR tag:"bar" OR tag:"baz"`
pub fn tag_clause(tags: &[String]) -> String {
    join_tags(tags, OP_OR)
}

/// Join tags with AND, so only articles carrying all of the tags match.
pub fn tag_match_all_clause(tags: &[String]) -> String {
    join_tags(tags, OP_AND)
}

/// Exclude articles carrying any of the tags: each tag query is negated and
/// the negations AND'd together.
///
/// e.g. `[foo, bar]` => `NOT tag:"foo" AND NOT tag:"bar"`
pub fn negated_tag_clause(tags: &[String]) -> String {
    tags.iter()
        .map(|tag| format!("{OP_NOT}{PREFIX_TAG}{}", quote(tag)))
        .collect::<Vec<_>>()
        .join(OP_AND)
}

fn join_tags(tags: &[String], op: &str) -> String {
    tags.iter()
        .map(|tag| format!("{PREFIX_TAG}{}", quote(tag)))
        .collect::<Vec<_>>()
        .join(op)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(names: &[&str]) -> Vec<String> {
        names.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn ors_individual_tag_queries() {
        assert_eq!(
            tag_clause(&tags(&["cats", "dogs", "turtles"])),
            r#"tag:"cats" OR tag:"dogs" OR tag:"turtles""#
        );
    }

    #[test]
    fn match_all_joins_with_and() {
        assert_eq!(
            tag_match_all_clause(&tags(&["cats", "dogs"])),
            r#"tag:"cats" AND tag:"dogs""#
        );
    }

    #[test]
    fn negation_ands_the_negated_queries() {
        assert_eq!(
            negated_tag_clause(&tags(&["stallman", "sex", "tape"])),
            r#"NOT tag:"stallman" AND NOT tag:"sex" AND NOT tag:"tape""#
        );
    }

    #[test]
    fn multiword_tags_stay_one_phrase() {
        assert_eq!(tag_clause(&tags(&["cat zombies"])), r#"tag:"cat zombies""#);
    }

    #[test]
    fn empty_tag_lists_yield_empty_clauses() {
        assert_eq!(tag_clause(&[]), "");
        assert_eq!(tag_match_all_clause(&[]), "");
        assert_eq!(negated_tag_clause(&[]), "");
    }

    #[test]
    fn single_tag_has_no_join_operator() {
        assert_eq!(tag_clause(&tags(&["cats"])), r#"tag:"cats""#);
        assert_eq!(negated_tag_clause(&tags(&["cats"])), r#"NOT tag:"cats""#);
    }
}
