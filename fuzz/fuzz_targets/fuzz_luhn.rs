//! Fuzz target for Luhn algorithm.
//!
//! Tests that luhn functions never panic and maintain invariants.

#![no_main]

use card_validator::{luhn, luhn_check};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Clamp values to valid digit range
    let digits: Vec<u8> = data.iter().map(|&b| b % 10).collect();

    if digits.is_empty() {
        return;
    }

    // String and slice forms must agree
    let text: String = digits.iter().map(|&d| char::from(b'0' + d)).collect();
    if digits.len() >= 2 {
        assert_eq!(luhn_check(&text), luhn::validate(&digits), "str/slice mismatch");
    }

    // Adding the check digit should make it valid
    if digits.len() <= 18 {
        let check = luhn::generate_check_digit(&digits);
        assert!(check <= 9, "Check digit should be 0-9");

        let mut with_check = digits.clone();
        with_check.push(check);
        assert!(luhn::validate(&with_check), "Adding check digit should make valid");
    }
});
