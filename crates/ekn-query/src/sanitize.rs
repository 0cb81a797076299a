//! Free-text sanitization for user search terms.
//!
//! User input is never rejected; anything the Xapian query parser would
//! misread is stripped or defanged before clause construction.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

/// Maximum length in bytes of a single term sent to Xapian.
pub const MAX_TERM_LENGTH: usize = 245;

lazy_static! {
    // Xapian query-parser syntax characters, deleted outright
    static ref SYNTAX_CHARS: Regex = Regex::new(r#"[()+'"-]"#).unwrap();

    // Xapian query-parser operators; only the uppercase forms are operators,
    // so lowercasing a match neutralizes it
    static ref OPERATORS: Regex = Regex::new("AND|OR|NOT|XOR|NEAR|ADJ").unwrap();

    // Matches any contiguous whitespace
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();

    // Matches any delimiter which indicates a separate Xapian term
    static ref TERM_DELIMITER: Regex = Regex::new(r"[\s\-]+").unwrap();
}

/// Sanitize a raw user query for the Xapian query parser.
///
/// Syntax characters are deleted, operator keywords lowercased, and
/// whitespace runs collapsed to single spaces. Total over any input, and
/// idempotent: syntax characters go first (deleting one can splice an
/// operator keyword together), whitespace collapse last.
pub fn sanitize(raw: &str) -> String {
    let without_syntax = SYNTAX_CHARS.replace_all(raw, "");
    let defanged = OPERATORS.replace_all(&without_syntax, |caps: &Captures| {
        caps[0].to_lowercase()
    });
    WHITESPACE.replace_all(&defanged, " ").trim().to_string()
}

/// Split a sanitized query into separate Xapian terms.
///
/// An empty input yields a single empty term; callers guard against empty
/// queries upstream.
pub fn split_terms(sanitized: &str) -> Vec<String> {
    TERM_DELIMITER
        .split(sanitized)
        .map(truncate_term)
        .collect()
}

/// Capitalize a term for the exact-title clause: first character uppercase,
/// remainder lowercase.
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(|c| c.to_lowercase()))
            .collect(),
        None => String::new(),
    }
}

// Chop a term down to MAX_TERM_LENGTH bytes without splitting a UTF-8
// character
fn truncate_term(term: &str) -> String {
    if term.len() <= MAX_TERM_LENGTH {
        return term.to_string();
    }
    let mut end = MAX_TERM_LENGTH;
    while !term.is_char_boundary(end) {
        end -= 1;
    }
    term[..end].to_string()
}
