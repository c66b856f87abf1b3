//! # card_validator
//!
//! Payment card number validation for Rust.
//!
//! ## Features
//!
//! - Input sanitization (separators stripped, 13 to 19 digits)
//! - Card network classification (Visa, Mastercard, American Express,
//!   Discover, Diners Club, JCB)
//! - Luhn checksum validation
//! - Card number masking for logs
//! - Best-effort BIN enrichment from a binlist-compatible HTTP service
//! - Multiple interfaces: library, CLI, REST API
//!
//! ## Quick Start
//!
//! ```rust
//! use card_validator::{card_type, is_valid_card_number, validate_simple, CardType};
//!
//! // Validate without contacting the BIN service
//! let result = validate_simple("4111-1111-1111-1111").unwrap();
//! assert!(result.valid);
//! assert_eq!(result.card_type, CardType::Visa);
//! assert_eq!(result.bin, "411111");
//! assert_eq!(result.last_four, "1111");
//!
//! // Safe for logging - never exposes the middle digits
//! assert_eq!(result.masked(), "4111********1111");
//!
//! // Quick checks
//! assert!(is_valid_card_number("4111111111111111"));
//! assert!(!is_valid_card_number("4111111111111112"));
//! assert_eq!(card_type("378282246310005"), CardType::Amex);
//! ```
//!
//! ## BIN Enrichment
//!
//! ```rust,no_run
//! use card_validator::{Validator, ValidatorConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let validator = Validator::new(ValidatorConfig::default())?;
//! let result = validator.validate_card("4571 7360 0000 0075").await?;
//! if result.is_enriched() {
//!     println!("{} issued by {}", result.card_brand, result.bank.name);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Lookup failures are logged and never turn a result into an error.
//!
//! ## Supported Networks
//!
//! | Network | Prefix | Length |
//! |---------|--------|--------|
//! | Visa | 4 | 13-19 |
//! | Mastercard | 51-55, 2221-2720 | 16 |
//! | Discover | 6 | 16 |
//! | American Express | 34, 37 | 15 |
//! | Diners Club | 30, 36, 38 | 14 |
//! | JCB | 35 | 16 |
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `cli` | Command-line tool |
//! | `server` | REST API with Swagger UI and Prometheus metrics |
//!
//! ## Security
//!
//! - Sanitized card numbers are zeroized when a `ValidationResult` is dropped
//! - `Debug` on `ValidationResult` shows the masked number only
//! - Log lines carry the masked number or no number at all
//! - No unsafe code (`#![deny(unsafe_code)]`)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod card;
pub mod config;
pub mod detect;
pub mod enrich;
pub mod error;
pub mod luhn;
pub mod mask;
#[cfg(feature = "server")]
pub mod metrics;
pub mod sanitize;
#[cfg(feature = "server")]
pub mod server;
pub mod validate;

// Re-export main types at crate root
pub use card::{
    BankInfo, CardType, CountryInfo, ValidationResult, BIN_LENGTH, MAX_CARD_DIGITS,
    MIN_CARD_DIGITS,
};
pub use config::ValidatorConfig;
pub use detect::classify;
pub use enrich::{BinLookup, EnrichmentResult, HttpBinLookup, MemoryBinLookup};
pub use error::{BuildError, ConfigError, EnrichmentError, SanitizeError};
pub use luhn::luhn_check;
pub use mask::mask_for_logging;
pub use sanitize::sanitize;
pub use validate::{card_type, is_valid_card_number, validate_simple, Validator};
