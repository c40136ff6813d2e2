//! Fuzz target for the Luhn checksum.
//!
//! Tests that the checksum never panics and that check digits always verify.

#![no_main]

use libfuzzer_sys::fuzz_target;
use card_input::luhn;

fuzz_target!(|data: &[u8]| {
    let digits: Vec<u8> = data.iter().map(|b| b % 10).collect();
    if digits.len() > 64 {
        return;
    }

    let _ = luhn::validate(&digits);
    let _ = luhn::compute_checksum(&digits);

    // Appending the check digit always yields a valid sequence
    let mut full = digits.clone();
    full.push(luhn::generate_check_digit(&digits));
    assert!(luhn::validate(&full), "check digit failed for {:?}", digits);

    // The string form agrees with the slice form
    let text: String = full.iter().map(|d| (b'0' + d) as char).collect();
    assert!(luhn::is_valid_luhn(&text));

    if let Ok(s) = std::str::from_utf8(data) {
        let _ = luhn::is_valid_luhn(s);
    }
});
