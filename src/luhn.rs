//! Luhn algorithm implementation for card number validation.
//!
//! The Luhn algorithm (also known as the "modulus 10" algorithm) is a checksum
//! formula used to detect single-digit transcription errors in card numbers
//! and other identification numbers.
//!
//! # Performance
//!
//! This implementation uses a lookup table for the doubling operation,
//! making it O(n) with no branches on the digit value.

/// Lookup table for doubled digits: double the value, subtract 9 if >= 10.
/// Index is the digit (0-9), value is the transformed result.
const DOUBLE_TABLE: [u8; 10] = [0, 2, 4, 6, 8, 1, 3, 5, 7, 9];

/// Checks a sanitized digit string against the Luhn checksum.
///
/// Fails closed: returns `false` for fewer than 2 characters or for any
/// character that is not an ASCII digit.
///
/// # Example
///
/// ```
/// use card_validator::luhn_check;
///
/// assert!(luhn_check("4532015112830366"));
/// assert!(!luhn_check("4532015112830367"));
/// assert!(!luhn_check("0"));
/// ```
pub fn luhn_check(sanitized: &str) -> bool {
    let bytes = sanitized.as_bytes();
    if bytes.len() < 2 {
        return false;
    }

    let mut sum: u32 = 0;
    for (i, &b) in bytes.iter().rev().enumerate() {
        if !b.is_ascii_digit() {
            return false;
        }
        let digit = b - b'0';
        sum += if i % 2 == 1 {
            DOUBLE_TABLE[digit as usize] as u32
        } else {
            digit as u32
        };
    }

    sum % 10 == 0
}

/// Validates a slice of digit values (0-9) using the Luhn algorithm.
///
/// # Arguments
///
/// * `digits` - A slice of digits (0-9) representing the card number.
///
/// # Example
///
/// ```
/// use card_validator::luhn::validate;
///
/// let digits = [4, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1];
/// assert!(validate(&digits));
///
/// let invalid = [4, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 2];
/// assert!(!validate(&invalid));
/// ```
#[inline]
pub fn validate(digits: &[u8]) -> bool {
    if digits.is_empty() || digits.iter().any(|&d| d > 9) {
        return false;
    }

    compute_checksum(digits) % 10 == 0
}

/// Computes the Luhn sum (not reduced modulo 10) for a sequence of digits.
///
/// The rightmost digit is position 0 and is not doubled; positions 1, 3,
/// 5, ... are doubled. Values above 9 are clamped to 9.
#[inline]
pub fn compute_checksum(digits: &[u8]) -> u32 {
    digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &d)| {
            let d = d.min(9);
            if i % 2 == 1 {
                DOUBLE_TABLE[d as usize] as u32
            } else {
                d as u32
            }
        })
        .sum()
}

/// Generates the check digit for a partial card number.
///
/// Given digits without the check digit, computes the digit that makes the
/// full number pass Luhn validation.
///
/// # Example
///
/// ```
/// use card_validator::luhn::generate_check_digit;
///
/// // Visa test card without check digit
/// let partial = [4, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1];
/// assert_eq!(generate_check_digit(&partial), 1);
/// ```
#[inline]
pub fn generate_check_digit(digits: &[u8]) -> u8 {
    // Once the check digit is appended, every existing digit moves one
    // position to the left, so the current rightmost digit gets doubled.
    let sum: u32 = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &d)| {
            let d = d.min(9);
            if i % 2 == 0 {
                DOUBLE_TABLE[d as usize] as u32
            } else {
                d as u32
            }
        })
        .sum();

    ((10 - (sum % 10)) % 10) as u8
}
