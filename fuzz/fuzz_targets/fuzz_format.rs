//! Fuzz target for card number formatting.
//!
//! Tests that gap insertion never panics and never loses digits.

#![no_main]

use libfuzzer_sys::fuzz_target;
use card_input::{card::builtin_card_types, format};

fuzz_target!(|data: &str| {
    let digits = format::strip_formatting(data);

    // Detected brand
    let spaced = format::add_gaps_to_card_number(data, None);
    assert_eq!(format::strip_formatting(&spaced), digits, "Gaps should preserve digits");

    // Test with all brands
    for card in builtin_card_types() {
        let spaced = format::add_gaps_to_card_number(data, Some(&card));
        assert_eq!(format::strip_formatting(&spaced), digits);
        let _ = format::card_number_pattern(Some(&card));
    }
});
