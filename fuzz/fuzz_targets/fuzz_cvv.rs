//! Fuzz target for security code and cardholder field validation.
//!
//! Tests that CVV, name and postal code validators never panic.

#![no_main]

use libfuzzer_sys::fuzz_target;
use card_input::{card::builtin_card_types, cvv, name, postal};

fuzz_target!(|data: &str| {
    // These should never panic
    let _ = cvv::validate_cvv(data);
    let _ = cvv::validate_cvv_sizes(data, &[]);
    let _ = cvv::validate_cvv_sizes(data, &[3, 4]);
    let _ = cvv::validate_cvv_sizes(data, &[0, usize::MAX]);

    // Test with all brands
    for card in builtin_card_types() {
        let result = cvv::validate_cvv_for_card(data, &card);
        assert!(!result.is_valid || result.is_potentially_valid);
    }

    let _ = name::validate_cardholder_name(data);
    let _ = postal::validate_postal_code(data);
    let _ = postal::validate_postal_code_with(data, &postal::PostalCodeOptions { min_length: 0 });
});
