//! Fuzz target for card validation.
//!
//! Tests that the sanitize/classify/check pipeline never panics and keeps
//! its result invariants on arbitrary input.

#![no_main]

use card_validator::{card_type, is_valid_card_number, mask_for_logging, sanitize, validate_simple};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // These should never panic, regardless of input
    let _ = is_valid_card_number(data);
    let _ = card_type(data);
    let _ = mask_for_logging(data);

    if let Ok(result) = validate_simple(data) {
        let len = result.card_number.len();
        assert!((13..=19).contains(&len));
        assert_eq!(result.bin, result.card_number[..6]);
        assert_eq!(result.last_four, result.card_number[len - 4..]);
        assert_eq!(sanitize(&result.card_number).as_deref(), Ok(result.card_number.as_str()));
        let masked = mask_for_logging(&result.card_number);
        assert!(masked[4..len - 4].bytes().all(|b| b == b'*'));
    }
});
