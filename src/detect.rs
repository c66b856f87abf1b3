//! Card network classification by length and prefix.
//!
//! Rules are checked in a fixed order and the first match wins. Mastercard,
//! Discover and JCB all use length 16, so their order decides overlapping
//! prefixes: Mastercard, then Discover, then JCB.
//!
//! # Performance
//!
//! Classification is O(1) using slice pattern matching on the leading bytes.

use crate::CardType;

/// Classifies a sanitized digit string into a card network.
///
/// Total over any input: strings shorter than 4 characters, or with
/// non-digit characters in the inspected prefix, map to `Unknown`.
///
/// | Network | Rule |
/// |---|---|
/// | Visa | first digit 4, length 13-19 |
/// | Mastercard | length 16, first digit 5 or prefix 2221-2720 |
/// | Discover | length 16, first digit 6 |
/// | Amex | length 15, prefix 34 or 37 |
/// | Diners Club | length 14, prefix 30, 36 or 38 |
/// | JCB | length 16, prefix 35 |
///
/// # Example
///
/// ```
/// use card_validator::{classify, CardType};
///
/// assert_eq!(classify("4111111111111111"), CardType::Visa);
/// assert_eq!(classify("378282246310005"), CardType::Amex);
/// assert_eq!(classify("123"), CardType::Unknown);
/// ```
pub fn classify(sanitized: &str) -> CardType {
    let digits = sanitized.as_bytes();
    let len = digits.len();

    if len < 4 {
        return CardType::Unknown;
    }

    match (len, digits) {
        // Visa: starts with 4
        (13..=19, [b'4', ..]) => CardType::Visa,

        // Mastercard: starts with 5
        (16, [b'5', ..]) => CardType::Mastercard,
        // Mastercard 2-series: 2221-2720
        (16, [b'2', b'2', b'2', b'1'..=b'9', ..]) => CardType::Mastercard, // 2221-2229
        (16, [b'2', b'2', b'3'..=b'9', b'0'..=b'9', ..]) => CardType::Mastercard, // 2230-2299
        (16, [b'2', b'3'..=b'6', b'0'..=b'9', b'0'..=b'9', ..]) => CardType::Mastercard, // 2300-2699
        (16, [b'2', b'7', b'0'..=b'1', b'0'..=b'9', ..]) => CardType::Mastercard, // 2700-2719
        (16, [b'2', b'7', b'2', b'0', ..]) => CardType::Mastercard, // 2720

        // Discover: starts with 6
        (16, [b'6', ..]) => CardType::Discover,

        // American Express: 34 or 37
        (15, [b'3', b'4' | b'7', ..]) => CardType::Amex,

        // Diners Club: 30, 36, 38
        (14, [b'3', b'0' | b'6' | b'8', ..]) => CardType::DinersClub,

        // JCB: 35
        (16, [b'3', b'5', ..]) => CardType::Jcb,

        _ => CardType::Unknown,
    }
}
