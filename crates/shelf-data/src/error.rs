//! Fetch error types.

use std::time::Duration;

/// Error type for fetch operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),
}

impl FetchError {
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}

/// The request did not produce a usable response.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NetworkError {
    #[error("HTTP {status} for {url}")]
    Status { status: u16, url: String },

    #[error("Transport failure: {0}")]
    Transport(String),

    #[error("Timed out after {0:?}")]
    Timeout(Duration),
}

/// The response body is not a list of product records.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("Payload is not a JSON array")]
    NotAnArray,

    #[error("Record {index} is missing `{field}`")]
    MissingField { index: usize, field: &'static str },

    #[error("Record {index} has an invalid price: {value}")]
    InvalidPrice { index: usize, value: String },

    #[error("Malformed payload: {0}")]
    Malformed(String),
}
