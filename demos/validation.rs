//! Field validation example: what a checkout form sees on each keystroke.
//!
//! Run with: `cargo run --example validation`

use card_input::expiry::{self, ExpirationDateInput};
use card_input::{cvv, detect_card_type, name, postal, validate_card_number, Verification};

fn state(result: impl Into<Verification>) -> &'static str {
    let result = result.into();
    match (result.is_valid, result.is_potentially_valid) {
        (true, _) => "valid",
        (false, true) => "incomplete",
        (false, false) => "invalid",
    }
}

fn main() {
    println!("=== Card Input Validation ===\n");

    // Example 1: Typing a card number one digit at a time
    println!("Typing 4111 1111 1111 1111:");
    let number = "4111111111111111";
    for end in [1, 4, 6, 12, 15, 16] {
        let typed = &number[..end];
        let result = validate_card_number(typed);
        let brand = result
            .card
            .as_ref()
            .map(|c| c.nice_type.as_str())
            .unwrap_or("?");
        println!("  {:<16} {:<10} {}", typed, state(result.clone()), brand);
    }
    println!();

    // Example 2: Ambiguous prefixes
    println!("Brand candidates:");
    for prefix in ["", "3", "35", "6", "2221"] {
        let brands: Vec<String> = detect_card_type(prefix)
            .into_iter()
            .map(|c| c.nice_type)
            .collect();
        println!("  {:<6} {}", format!("{:?}", prefix), brands.join(", "));
    }
    println!();

    // Example 3: Expiration dates in the formats people type
    println!("Expiration dates:");
    for value in ["1", "12/", "12/3", "12/30", "1230", "12 / 2030", "2030-12", "13/30", "01/20"] {
        let result = expiry::validate_expiration_date(value, None);
        println!(
            "  {:<10} {:<10} month={:?} year={:?}",
            value,
            state(result.clone()),
            result.month,
            result.year
        );
    }
    let split = expiry::validate_expiration_date(ExpirationDateInput::parts("06", "2031"), None);
    println!("  {:<10} {}", "06 + 2031", state(split));
    println!();

    // Example 4: Security codes follow the brand
    println!("Security codes:");
    let amex = &detect_card_type("37")[0];
    println!("  {:<6} {:<18} {}", "123", "(default)", state(cvv::validate_cvv("123")));
    println!(
        "  {:<6} {:<18} {}",
        "123",
        amex.nice_type,
        state(cvv::validate_cvv_for_card("123", amex))
    );
    println!(
        "  {:<6} {:<18} {}",
        "1234",
        amex.nice_type,
        state(cvv::validate_cvv_for_card("1234", amex))
    );
    println!();

    // Example 5: Names and postal codes
    println!("Cardholder names:");
    for value in ["", "Ada Lovelace", "4111 1111", "J"] {
        println!("  {:<14} {}", format!("{:?}", value), state(name::validate_cardholder_name(value)));
    }
    println!();

    println!("Postal codes:");
    for value in ["9", "94107", "SW1A 1AA", " "] {
        println!("  {:<10} {}", format!("{:?}", value), state(postal::validate_postal_code(value)));
    }
}
