//! ekn-bridge: assemble HTTP requests for the xapian-bridge search service.
//!
//! Compiles a [`ekn_query::QueryDescription`] into the `/query` (or `/fix`)
//! request uri that xapian-bridge expects and decodes the JSON-LD result
//! envelope. The `native` feature adds an async reqwest client; without it
//! this crate only builds uris and parses bodies.

pub mod bridge;
pub mod error;
pub mod results;

pub use bridge::*;
pub use error::*;
pub use results::*;
