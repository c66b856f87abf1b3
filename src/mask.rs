//! Masking for log output.
//!
//! `mask_for_logging` is the only sanctioned way card digits may reach a log
//! sink. It keeps the first and last four digits of numbers long enough to
//! have a hidden middle, and hides everything in shorter inputs.

/// Masks a sanitized card number for logging.
///
/// - fewer than 8 characters: every character becomes `*`
/// - otherwise: first 4 + `*` for the middle run + last 4
///
/// # Example
///
/// ```
/// use card_validator::mask_for_logging;
///
/// assert_eq!(mask_for_logging("4111111111111111"), "4111********1111");
/// assert_eq!(mask_for_logging("1234567"), "*******");
/// ```
pub fn mask_for_logging(sanitized: &str) -> String {
    let chars: Vec<char> = sanitized.chars().collect();
    let len = chars.len();

    if len < 8 {
        return "*".repeat(len);
    }

    let mut masked = String::with_capacity(len);
    masked.extend(&chars[..4]);
    masked.extend(std::iter::repeat('*').take(len - 8));
    masked.extend(&chars[len - 4..]);
    masked
}
