//! Input sanitization.
//!
//! Raw input may contain any mix of digits, separators, and other text.
//! Sanitization keeps the ASCII digits in order and drops everything else,
//! then applies the length bounds. The bounds are a heuristic filter, not a
//! strict ISO/IEC 7812 rule: 13 and 19 are both accepted.

use crate::card::{MAX_CARD_DIGITS, MIN_CARD_DIGITS};
use crate::error::SanitizeError;

/// Removes every character that is not an ASCII digit.
///
/// # Example
///
/// ```
/// use card_validator::sanitize::strip_non_digits;
///
/// assert_eq!(strip_non_digits("4111-1111 1111.1111"), "4111111111111111");
/// assert_eq!(strip_non_digits("no digits"), "");
/// ```
#[inline]
pub fn strip_non_digits(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Normalizes raw input into a canonical digit string.
///
/// # Errors
///
/// * `InvalidFormat` - no digits remain after stripping
/// * `TooShort` / `TooLong` - digit count outside 13..=19
///
/// # Example
///
/// ```
/// use card_validator::{sanitize, SanitizeError};
///
/// assert_eq!(sanitize("4111 1111 1111 1111").unwrap(), "4111111111111111");
/// assert_eq!(sanitize("").unwrap_err(), SanitizeError::InvalidFormat);
/// assert!(sanitize("1234").unwrap_err().is_invalid_length());
/// ```
pub fn sanitize(raw: &str) -> Result<String, SanitizeError> {
    let digits = strip_non_digits(raw);
    let length = digits.len();

    if length == 0 {
        return Err(SanitizeError::InvalidFormat);
    }

    if length < MIN_CARD_DIGITS {
        return Err(SanitizeError::TooShort {
            length,
            minimum: MIN_CARD_DIGITS,
        });
    }

    if length > MAX_CARD_DIGITS {
        return Err(SanitizeError::TooLong {
            length,
            maximum: MAX_CARD_DIGITS,
        });
    }

    Ok(digits)
}
