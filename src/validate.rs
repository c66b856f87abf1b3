//! Validation orchestration.
//!
//! [`Validator::validate_card`] runs, in order:
//! 1. sanitization (the only step that can fail)
//! 2. network classification
//! 3. Luhn checksum
//! 4. BIN enrichment, only for checksum-valid numbers and only when enabled
//! 5. one outcome log line carrying the masked number
//!
//! Enrichment errors are logged at warn level and never reach the caller;
//! `valid` and `card_type` are computed locally and do not depend on the
//! lookup service.

use std::sync::Arc;
use std::time::Duration;

use crate::card::{CardType, ValidationResult};
use crate::config::ValidatorConfig;
use crate::detect::classify;
use crate::enrich::{BinLookup, HttpBinLookup};
use crate::error::{BuildError, EnrichmentError, SanitizeError};
use crate::luhn::luhn_check;
use crate::sanitize::sanitize;

/// Card validation engine.
///
/// Holds configuration and an optional lookup handle only; it keeps no
/// state between calls and can be shared freely across tasks.
///
/// # Example
///
/// ```
/// use card_validator::{CardType, Validator};
///
/// # tokio_test_runtime(async {
/// let validator = Validator::offline();
/// let result = validator.validate_card("4111 1111 1111 1111").await.unwrap();
/// assert!(result.valid);
/// assert_eq!(result.card_type, CardType::Visa);
/// assert_eq!(result.bin, "411111");
/// # });
/// # fn tokio_test_runtime<F: std::future::Future>(f: F) -> F::Output {
/// #     tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(f)
/// # }
/// ```
#[derive(Clone)]
pub struct Validator {
    config: ValidatorConfig,
    lookup: Option<Arc<dyn BinLookup>>,
}

impl Validator {
    /// Creates a validator from configuration.
    ///
    /// When BIN lookup is enabled this builds an [`HttpBinLookup`] for
    /// `bin_service_url` with the configured timeout.
    pub fn new(config: ValidatorConfig) -> Result<Self, BuildError> {
        config.validate()?;

        let lookup = if config.enable_bin_lookup {
            let http = HttpBinLookup::try_from(config.bin_service_url.as_str())?
                .with_timeout(config.http_timeout);
            Some(Arc::new(http) as Arc<dyn BinLookup>)
        } else {
            None
        };

        Ok(Self { config, lookup })
    }

    /// Creates a validator with a caller-supplied lookup source.
    pub fn with_lookup(config: ValidatorConfig, lookup: Arc<dyn BinLookup>) -> Self {
        Self {
            config,
            lookup: Some(lookup),
        }
    }

    /// Creates a validator that never performs BIN lookups.
    pub fn offline() -> Self {
        Self {
            config: ValidatorConfig::offline(),
            lookup: None,
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Returns true when valid numbers will be enriched.
    pub fn enrichment_enabled(&self) -> bool {
        self.config.enable_bin_lookup && self.lookup.is_some()
    }

    /// Validates a card number and enriches valid numbers with issuer data.
    ///
    /// The only error is a sanitization failure; enrichment failures are
    /// logged and the base result is returned.
    pub async fn validate_card(&self, raw: &str) -> Result<ValidationResult, SanitizeError> {
        self.run(raw, self.config.http_timeout).await
    }

    /// Like [`validate_card`](Self::validate_card) with a caller deadline for
    /// the outbound lookup. The shorter of `deadline` and the configured
    /// timeout applies.
    pub async fn validate_card_with_deadline(
        &self,
        raw: &str,
        deadline: Duration,
    ) -> Result<ValidationResult, SanitizeError> {
        self.run(raw, deadline.min(self.config.http_timeout)).await
    }

    /// Validates a card number without BIN lookup.
    pub fn validate_card_simple(&self, raw: &str) -> Result<ValidationResult, SanitizeError> {
        let result = base_result(raw)?;
        self.log_outcome(&result);
        Ok(result)
    }

    async fn run(&self, raw: &str, deadline: Duration) -> Result<ValidationResult, SanitizeError> {
        let mut result = base_result(raw)?;

        if result.valid && self.config.enable_bin_lookup {
            if let Some(lookup) = &self.lookup {
                match lookup_with_deadline(lookup.as_ref(), &result.bin, deadline).await {
                    Ok(info) => info.apply_to(&mut result),
                    Err(err) => {
                        tracing::warn!(
                            error = %err,
                            bin = %result.bin,
                            lookup_failure = err.is_lookup_failure(),
                            "failed to enrich with BIN information"
                        );
                    }
                }
            }
        }

        self.log_outcome(&result);
        Ok(result)
    }

    fn log_outcome(&self, result: &ValidationResult) {
        if self.config.mask_sensitive {
            tracing::info!(
                card_type = %result.card_type,
                valid = result.valid,
                bin = %result.bin,
                card_number = %result.masked(),
                enriched = result.is_enriched(),
                "card validation completed"
            );
        } else {
            tracing::info!(
                card_type = %result.card_type,
                valid = result.valid,
                bin = %result.bin,
                enriched = result.is_enriched(),
                "card validation completed"
            );
        }
    }
}

impl std::fmt::Debug for Validator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Validator")
            .field("config", &self.config)
            .field("lookup", &self.lookup.as_ref().map(|_| "dyn BinLookup"))
            .finish()
    }
}

async fn lookup_with_deadline(
    lookup: &dyn BinLookup,
    bin: &str,
    deadline: Duration,
) -> Result<crate::enrich::EnrichmentResult, EnrichmentError> {
    tokio::time::timeout(deadline, lookup.lookup(bin))
        .await
        .map_err(|_| EnrichmentError::Timeout(deadline))?
}

/// Sanitizes, classifies and checksums without enrichment.
fn base_result(raw: &str) -> Result<ValidationResult, SanitizeError> {
    let card_number = sanitize(raw)?;
    let card_type = classify(&card_number);
    let valid = luhn_check(&card_number);
    Ok(ValidationResult::base(card_number, card_type, valid))
}

/// Validates a card number without BIN lookup or logging.
///
/// # Example
///
/// ```
/// use card_validator::{validate_simple, CardType};
///
/// let result = validate_simple("6011111111111117").unwrap();
/// assert!(result.valid);
/// assert_eq!(result.card_type, CardType::Discover);
/// ```
pub fn validate_simple(raw: &str) -> Result<ValidationResult, SanitizeError> {
    base_result(raw)
}

/// Returns true if the input sanitizes and passes the Luhn checksum.
///
/// # Example
///
/// ```
/// use card_validator::is_valid_card_number;
///
/// assert!(is_valid_card_number("4111 1111 1111 1111"));
/// assert!(!is_valid_card_number("4111 1111 1111 1112"));
/// assert!(!is_valid_card_number("1234"));
/// ```
#[inline]
pub fn is_valid_card_number(raw: &str) -> bool {
    validate_simple(raw).map(|r| r.valid).unwrap_or(false)
}

/// Returns the card network for raw input, `Unknown` if it does not sanitize.
///
/// # Example
///
/// ```
/// use card_validator::{card_type, CardType};
///
/// assert_eq!(card_type("5555-5555-5555-4444"), CardType::Mastercard);
/// assert_eq!(card_type("1234"), CardType::Unknown);
/// ```
#[inline]
pub fn card_type(raw: &str) -> CardType {
    sanitize(raw)
        .map(|digits| classify(&digits))
        .unwrap_or_default()
}
