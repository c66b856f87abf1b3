//! Error types for card validation and BIN enrichment.
//!
//! `SanitizeError` is the only error a caller of `validate_card` ever sees.
//! `EnrichmentError` is recovered inside the engine and logged; it only
//! reaches callers that use a [`BinLookup`](crate::enrich::BinLookup) directly.

use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;

/// Errors produced while turning raw input into a canonical digit string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SanitizeError {
    /// No digits remained after stripping non-digit characters.
    #[error("invalid card number format: no digits found")]
    InvalidFormat,

    /// The card number has too few digits.
    #[error("card number too short: got {length} digits, minimum is {minimum}")]
    TooShort {
        /// The actual number of digits provided.
        length: usize,
        /// The minimum required digits (13).
        minimum: usize,
    },

    /// The card number has too many digits.
    #[error("card number too long: got {length} digits, maximum is {maximum}")]
    TooLong {
        /// The actual number of digits provided.
        length: usize,
        /// The maximum allowed digits (19).
        maximum: usize,
    },
}

impl SanitizeError {
    /// Returns true for `TooShort` and `TooLong`.
    #[inline]
    pub fn is_invalid_length(&self) -> bool {
        matches!(self, Self::TooShort { .. } | Self::TooLong { .. })
    }
}

/// Errors raised by a BIN lookup.
///
/// Every variant except `InvalidResponse` belongs to the lookup-failure
/// family, see [`EnrichmentError::is_lookup_failure`].
#[derive(Debug, Error)]
pub enum EnrichmentError {
    /// The BIN was not exactly six ASCII digits.
    #[error("invalid BIN: expected 6 digits, got {length} characters")]
    InvalidBin {
        /// Length of the rejected input.
        length: usize,
    },

    /// The configured service URL could not be parsed or joined.
    #[error("invalid BIN service URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// Transport-level failure contacting the BIN service.
    #[error("BIN lookup failed: {0}")]
    LookupFailed(#[source] reqwest::Error),

    /// The lookup did not finish within the deadline.
    #[error("BIN lookup timed out after {0:?}")]
    Timeout(Duration),

    /// The BIN service answered with a non-200 status.
    #[error("BIN service returned status {0}")]
    UnexpectedStatus(StatusCode),

    /// The BIN is not present in the lookup source.
    #[error("no issuer data for BIN {0}")]
    NotFound(String),

    /// The response body could not be decoded.
    #[error("invalid BIN service response: {0}")]
    InvalidResponse(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl EnrichmentError {
    /// Returns true when the lookup source could not be reached or had no
    /// answer, as opposed to answering with an undecodable payload.
    pub fn is_lookup_failure(&self) -> bool {
        !matches!(self, Self::InvalidResponse(_))
    }
}

/// Rejected validator configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The outbound timeout was zero.
    #[error("BIN lookup timeout must be greater than zero")]
    ZeroTimeout,

    /// Enrichment is enabled but no service URL was given.
    #[error("BIN service URL must not be empty when lookup is enabled")]
    EmptyServiceUrl,
}

/// Failure to construct a [`Validator`](crate::Validator).
#[derive(Debug, Error)]
pub enum BuildError {
    /// The configuration was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The BIN lookup client could not be set up.
    #[error(transparent)]
    Lookup(#[from] EnrichmentError),
}
