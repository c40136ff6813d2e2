//! Fuzz target for expiration date validation.
//!
//! Tests that month, year and date parsing never panic on arbitrary input.

#![no_main]

use libfuzzer_sys::fuzz_target;
use card_input::expiry::{self, ExpirationDateInput, YearMonth};

fuzz_target!(|data: &str| {
    let today = YearMonth::current();

    // These should never panic
    let month = expiry::validate_expiration_month_at(data, today);
    assert!(!month.is_valid || month.is_potentially_valid);

    let year = expiry::validate_expiration_year_at(data, None, today);
    assert!(!year.is_valid || year.is_potentially_valid);
    let _ = expiry::validate_expiration_year_at(data, Some(0), today);
    let _ = expiry::validate_expiration_year_at(data, Some(u32::MAX), today);

    let _ = expiry::parse_date_at(data, today);
    let date = expiry::validate_expiration_date_at(data, None, today);
    assert!(!date.is_valid || date.is_potentially_valid);
    if date.is_valid {
        assert!(date.month.is_some() && date.year.is_some());
    }

    // Split input into month and year parts
    let mid = data.char_indices().nth(data.chars().count() / 2).map_or(0, |(i, _)| i);
    let (m, y) = data.split_at(mid);
    let _ = expiry::validate_expiration_date_at(ExpirationDateInput::parts(m, y), Some(5), today);
});
