//! BIN (Bank Identification Number) enrichment.
//!
//! This module provides a pluggable interface for looking up issuer
//! metadata from the first six digits of a card number. Lookups are best
//! effort: the validator logs failures and keeps the locally computed result.
//!
//! Two implementations ship with the crate:
//!
//! - [`HttpBinLookup`] - queries a binlist-compatible HTTP service
//! - [`MemoryBinLookup`] - in-memory table, single BINs and BIN ranges
//!
//! # Example
//!
//! ```rust,no_run
//! use card_validator::enrich::{BinLookup, HttpBinLookup};
//!
//! # async fn run() -> Result<(), card_validator::EnrichmentError> {
//! let lookup = HttpBinLookup::try_from("https://lookup.binlist.net")?;
//! let info = lookup.lookup("457173").await?;
//! println!("Issuer: {}", info.bank.name);
//! # Ok(())
//! # }
//! ```

mod http;
mod memory;

pub use http::HttpBinLookup;
pub use memory::{BinRange, MemoryBinLookup, MemoryBinLookupBuilder};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::card::{BankInfo, CountryInfo, ValidationResult, BIN_LENGTH};
use crate::error::EnrichmentError;

/// Trait for issuer metadata sources.
///
/// Implementations must be safe to call from many tasks at once and must
/// not keep per-call state.
#[async_trait]
pub trait BinLookup: Send + Sync {
    /// Looks up issuer data for a six-digit BIN.
    async fn lookup(&self, bin: &str) -> Result<EnrichmentResult, EnrichmentError>;
}

/// Issuer metadata mapped onto the result shape.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnrichmentResult {
    /// Payment scheme, e.g. `visa`.
    pub scheme: String,
    /// Card kind, e.g. `debit`.
    pub card_kind: String,
    /// Product brand, e.g. `Visa/Dankort`.
    pub card_brand: String,
    /// Issuer country.
    pub country: CountryInfo,
    /// Issuing bank.
    pub bank: BankInfo,
}

impl EnrichmentResult {
    /// Copies the enrichment fields onto a validation result.
    ///
    /// Base fields (`valid`, `card_type`, `bin`, ...) are left untouched.
    pub fn apply_to(self, result: &mut ValidationResult) {
        result.scheme = self.scheme;
        result.card_kind = self.card_kind;
        result.card_brand = self.card_brand;
        result.country = self.country;
        result.bank = self.bank;
    }
}

/// Payload returned by a binlist-compatible service.
///
/// Every field is optional; missing or `null` values map to empty strings
/// and zero coordinates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BinLookupResponse {
    /// Payment scheme.
    pub scheme: Option<String>,
    /// Card kind (`debit`, `credit`).
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Product brand.
    pub brand: Option<String>,
    /// Issuer country.
    pub country: Option<CountryPayload>,
    /// Issuing bank.
    pub bank: Option<BankPayload>,
}

/// Country object of a [`BinLookupResponse`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CountryPayload {
    /// Country name.
    pub name: Option<String>,
    /// ISO 3166-1 alpha-2 code.
    pub alpha2: Option<String>,
    /// Currency code.
    pub currency: Option<String>,
    /// Flag emoji.
    pub emoji: Option<String>,
    /// Latitude.
    pub latitude: Option<f64>,
    /// Longitude.
    pub longitude: Option<f64>,
}

/// Bank object of a [`BinLookupResponse`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BankPayload {
    /// Bank name.
    pub name: Option<String>,
    /// Bank website.
    pub url: Option<String>,
    /// Phone number.
    pub phone: Option<String>,
}

impl From<BinLookupResponse> for EnrichmentResult {
    fn from(payload: BinLookupResponse) -> Self {
        let country = payload.country.unwrap_or_default();
        let bank = payload.bank.unwrap_or_default();

        Self {
            scheme: payload.scheme.unwrap_or_default(),
            card_kind: payload.kind.unwrap_or_default(),
            card_brand: payload.brand.unwrap_or_default(),
            country: CountryInfo {
                name: country.name.unwrap_or_default(),
                alpha2: country.alpha2.unwrap_or_default(),
                currency: country.currency.unwrap_or_default(),
                emoji: country.emoji.unwrap_or_default(),
                latitude: country.latitude.unwrap_or_default(),
                longitude: country.longitude.unwrap_or_default(),
            },
            bank: BankInfo {
                name: bank.name.unwrap_or_default(),
                url: bank.url.unwrap_or_default(),
                phone: bank.phone.unwrap_or_default(),
            },
        }
    }
}

/// Checks that `bin` is exactly six ASCII digits.
pub(crate) fn check_bin(bin: &str) -> Result<(), EnrichmentError> {
    if bin.len() == BIN_LENGTH && bin.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(EnrichmentError::InvalidBin {
            length: bin.chars().count(),
        })
    }
}
