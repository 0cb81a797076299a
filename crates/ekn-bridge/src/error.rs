//! Bridge error types.

use thiserror::Error;

/// Anything that can go wrong between a query description and a decoded
/// result envelope.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// Query compilation failed before any request was made.
    #[error(transparent)]
    Query(#[from] ekn_query::InvalidIdError),

    #[error("could not build request uri: {0}")]
    Uri(#[from] url::ParseError),

    #[error("could not decode xapian-bridge response: {0}")]
    Decode(#[from] serde_json::Error),

    #[cfg(feature = "native")]
    #[error("xapian-bridge request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[cfg(feature = "native")]
    #[error("xapian-bridge status code {status} for uri {uri}")]
    Status { status: u16, uri: String },
}
