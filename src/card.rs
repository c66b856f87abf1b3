//! Core card types for validation results.
//!
//! This module provides the `CardType` enum for identifying card networks
//! and the `ValidationResult` struct returned by every validation call,
//! together with the issuer metadata shapes filled in by BIN enrichment.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use zeroize::Zeroize;

/// Maximum number of digits in a card number.
pub const MAX_CARD_DIGITS: usize = 19;

/// Minimum number of digits in a card number.
pub const MIN_CARD_DIGITS: usize = 13;

/// Number of leading digits that make up a BIN.
pub const BIN_LENGTH: usize = 6;

/// Card networks recognized by the classifier.
///
/// `Unknown` is the default and the catch-all for any number whose
/// length/prefix combination matches no rule. It is never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum CardType {
    /// Visa - Prefix 4, length 13-19
    Visa,
    /// Mastercard - Prefix 5 or 2221-2720, length 16
    Mastercard,
    /// American Express - Prefix 34, 37, length 15
    Amex,
    /// Discover - Prefix 6, length 16
    Discover,
    /// Diners Club - Prefix 30, 36, 38, length 14
    DinersClub,
    /// JCB - Prefix 35, length 16
    Jcb,
    /// No rule matched.
    #[default]
    Unknown,
}

impl CardType {
    /// All variants, in classification order.
    pub const ALL: [CardType; 7] = [
        Self::Visa,
        Self::Mastercard,
        Self::Discover,
        Self::Amex,
        Self::DinersClub,
        Self::Jcb,
        Self::Unknown,
    ];

    /// Returns the wire identifier (`visa`, `diners_club`, ...).
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Visa => "visa",
            Self::Mastercard => "mastercard",
            Self::Amex => "amex",
            Self::Discover => "discover",
            Self::DinersClub => "diners_club",
            Self::Jcb => "jcb",
            Self::Unknown => "unknown",
        }
    }

    /// Returns a human-readable name for the card network.
    #[inline]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Visa => "Visa",
            Self::Mastercard => "Mastercard",
            Self::Amex => "American Express",
            Self::Discover => "Discover",
            Self::DinersClub => "Diners Club",
            Self::Jcb => "JCB",
            Self::Unknown => "Unknown",
        }
    }

    /// Returns true for every network except `Unknown`.
    #[inline]
    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

impl fmt::Display for CardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unrecognized card type name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown card type name: {0:?}")]
pub struct ParseCardTypeError(pub String);

impl FromStr for CardType {
    type Err = ParseCardTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseCardTypeError(s.to_string()))
    }
}

/// Geographical and currency information about the card issuer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct CountryInfo {
    /// Country name.
    pub name: String,
    /// ISO 3166-1 alpha-2 code.
    pub alpha2: String,
    /// ISO 4217 currency code.
    pub currency: String,
    /// Flag emoji.
    pub emoji: String,
    /// Approximate latitude.
    pub latitude: f64,
    /// Approximate longitude.
    pub longitude: f64,
}

/// Information about the issuing bank.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct BankInfo {
    /// Bank name.
    pub name: String,
    /// Bank website.
    pub url: String,
    /// Customer service phone number.
    pub phone: String,
}

/// The outcome of validating one card number.
///
/// The base fields (`valid`, `card_type`, `card_number`, `bin`, `last_four`)
/// are always computed locally. The enrichment fields stay empty unless a
/// BIN lookup succeeded.
///
/// # Security
///
/// - `Debug` output shows the masked number only
/// - The card number is zeroed when the result is dropped
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct ValidationResult {
    /// Whether the number passed the Luhn checksum.
    pub valid: bool,
    /// Detected card network.
    pub card_type: CardType,
    /// Sanitized digits.
    pub card_number: String,
    /// Scheme reported by the BIN service.
    pub scheme: String,
    /// Brand reported by the BIN service.
    pub card_brand: String,
    /// Kind (debit/credit) reported by the BIN service.
    pub card_kind: String,
    /// Issuer country.
    pub country: CountryInfo,
    /// Issuing bank.
    pub bank: BankInfo,
    /// First six digits, empty when unavailable.
    pub bin: String,
    /// Last four digits.
    pub last_four: String,
}

impl ValidationResult {
    /// Builds the base (unenriched) result for a sanitized number.
    pub(crate) fn base(card_number: String, card_type: CardType, valid: bool) -> Self {
        Self {
            valid,
            card_type,
            bin: extract_bin(&card_number),
            last_four: extract_last_four(&card_number),
            card_number,
            scheme: String::new(),
            card_brand: String::new(),
            card_kind: String::new(),
            country: CountryInfo::default(),
            bank: BankInfo::default(),
        }
    }

    /// Returns true once any enrichment field has been filled in.
    pub fn is_enriched(&self) -> bool {
        !self.scheme.is_empty()
            || !self.card_brand.is_empty()
            || !self.card_kind.is_empty()
            || !self.country.name.is_empty()
            || !self.bank.name.is_empty()
    }

    /// Returns the card number masked for logs.
    pub fn masked(&self) -> String {
        crate::mask::mask_for_logging(&self.card_number)
    }
}

impl fmt::Debug for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationResult")
            .field("valid", &self.valid)
            .field("card_type", &self.card_type)
            .field("card_number", &self.masked())
            .field("scheme", &self.scheme)
            .field("card_brand", &self.card_brand)
            .field("card_kind", &self.card_kind)
            .field("country", &self.country)
            .field("bank", &self.bank)
            .field("bin", &self.bin)
            .field("last_four", &self.last_four)
            .finish()
    }
}

impl Drop for ValidationResult {
    fn drop(&mut self) {
        self.card_number.zeroize();
    }
}

/// Returns the first six digits, or an empty string for shorter input.
#[inline]
pub fn extract_bin(card_number: &str) -> String {
    card_number
        .get(..BIN_LENGTH)
        .unwrap_or_default()
        .to_string()
}

/// Returns the last four digits, or the whole input when shorter.
#[inline]
pub fn extract_last_four(card_number: &str) -> String {
    let len = card_number.len();
    if len < 4 {
        return card_number.to_string();
    }
    card_number
        .get(len - 4..)
        .unwrap_or(card_number)
        .to_string()
}
