//! ekn id validation and id clauses.
//!
//! Content records are addressed by opaque uris of the shape
//! `ekn://domain/hash`, where the domain is the trailing part of the app id
//! and the hash is a 16-character alphanumeric shard key. Legacy bundles
//! carry an extra leading `api` path component, which is skipped.

use thiserror::Error;

use crate::clause::{OP_AND, OP_NOT, OP_OR, PREFIX_ID};

const EKN_SCHEME: &str = "ekn://";
const API_SEGMENT: &str = "api";

// Domains are validated as the tail of a reverse-DNS app id
const APP_ID_PREFIX: &str = "com.endlessm.";
const MAX_APP_ID_LENGTH: usize = 255;

const HASH_LENGTH: usize = 16;

/// An id in a query failed the scheme, domain, or hash format check.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("received invalid ekn id {0}")]
pub struct InvalidIdError(pub String);

/// Check that an ekn id is well formed.
pub fn validate_id(id: &str) -> Result<(), InvalidIdError> {
    id_components(id)
        .map(|_| ())
        .ok_or_else(|| InvalidIdError(id.to_string()))
}

/// Extract the hash segment from a well-formed ekn id.
pub fn id_hash(id: &str) -> Result<&str, InvalidIdError> {
    id_components(id)
        .map(|(_, hash)| hash)
        .ok_or_else(|| InvalidIdError(id.to_string()))
}

/// Build an OR'd clause of id-prefixed hashes, restricting a query to the
/// given records.
///
/// The first malformed id aborts the whole build; no partial clause is
/// returned.
pub fn ids_clause(ids: &[String]) -> Result<String, InvalidIdError> {
    let mut clauses = Vec::with_capacity(ids.len());
    for id in ids {
        clauses.push(format!("{PREFIX_ID}{}", id_hash(id)?));
    }
    Ok(clauses.join(OP_OR))
}

/// Build an AND'd clause of negated id queries, excluding the given records.
pub fn negated_ids_clause(ids: &[String]) -> Result<String, InvalidIdError> {
    let mut clauses = Vec::with_capacity(ids.len());
    for id in ids {
        clauses.push(format!("{OP_NOT}{PREFIX_ID}{}", id_hash(id)?));
    }
    Ok(clauses.join(OP_AND))
}

// Split a candidate id into (domain, hash), or None if any format check
// fails
fn id_components(id: &str) -> Option<(&str, &str)> {
    let rest = id.strip_prefix(EKN_SCHEME)?;

    let mut segments: Vec<&str> = rest.split('/').collect();
    if segments.first() == Some(&API_SEGMENT) {
        segments.remove(0);
    }
    if segments.len() != 2 {
        return None;
    }

    let (domain, hash) = (segments[0], segments[1]);
    if !is_valid_app_id(&format!("{APP_ID_PREFIX}{domain}")) {
        return None;
    }
    if hash.len() != HASH_LENGTH || !hash.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return None;
    }
    Some((domain, hash))
}

// Application id validity per GApplication: dot-separated non-empty elements
// of [A-Za-z0-9_-], no element starting with a digit, at least two elements,
// at most 255 bytes
fn is_valid_app_id(app_id: &str) -> bool {
    if app_id.is_empty() || app_id.len() > MAX_APP_ID_LENGTH {
        return false;
    }
    let elements: Vec<&str> = app_id.split('.').collect();
    if elements.len() < 2 {
        return false;
    }
    elements.iter().all(|element| {
        match element.bytes().next() {
            // An empty element means a leading, trailing, or doubled dot
            None => false,
            Some(b) if b.is_ascii_digit() => false,
            _ => element.bytes().all(is_app_id_byte),
        }
    })
}

fn is_app_id_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'-'
}
