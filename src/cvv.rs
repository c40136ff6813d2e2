//! CVV/CVC/CID validation.
//!
//! The security code goes by several names depending on the network:
//!
//! - **CVV** (Card Verification Value) - Visa
//! - **CVC** (Card Verification Code) - Mastercard
//! - **CID** (Card Identification Number) - American Express, Discover
//!
//! Its accepted length comes from the card's definition (`code.size`), or
//! defaults to 3.
//!
//! # Example
//!
//! ```
//! use card_input::cvv::{validate_cvv, validate_cvv_sizes};
//!
//! assert!(validate_cvv("123").is_valid);
//! assert!(validate_cvv("12").is_potentially_valid);
//! assert!(!validate_cvv("1234").is_potentially_valid);
//!
//! // Accept either length while the brand is still unknown.
//! assert!(validate_cvv_sizes("1234", &[3, 4]).is_valid);
//! ```

use crate::card::CardTypeDefinition;
use crate::verification::Verification;

/// Security code length used when none is given.
pub const DEFAULT_CVV_SIZE: usize = 3;

/// Validates a security code of the default length.
#[inline]
pub fn validate_cvv(value: &str) -> Verification {
    validate_cvv_sizes(value, &[DEFAULT_CVV_SIZE])
}

/// Validates a security code against a brand's code size.
///
/// # Example
///
/// ```
/// use card_input::cvv::validate_cvv_for_card;
/// use card_input::CardTypeRegistry;
///
/// let amex = CardTypeRegistry::builtin().get_type_info("american-express").unwrap();
/// assert!(validate_cvv_for_card("1234", &amex).is_valid);
/// assert!(!validate_cvv_for_card("123", &amex).is_valid);
/// ```
#[inline]
pub fn validate_cvv_for_card(value: &str, card: &CardTypeDefinition) -> Verification {
    validate_cvv_sizes(value, &[card.code.size])
}

/// Validates a security code that may have any of `sizes` digits.
///
/// - An exact length match is valid.
/// - Shorter than the smallest size is potentially valid.
/// - Longer than the largest size is invalid.
/// - A length in between accepted sizes is valid.
///
/// With no `sizes` at all, every digit string is potentially valid and
/// none is valid.
pub fn validate_cvv_sizes(value: &str, sizes: &[usize]) -> Verification {
    if !value.bytes().all(|b| b.is_ascii_digit()) {
        return Verification::invalid();
    }

    let length = value.len();
    if sizes.contains(&length) {
        return Verification::valid();
    }

    let min = sizes.iter().copied().min().unwrap_or(usize::MAX);
    let max = sizes.iter().copied().max().unwrap_or(0);

    if length < min {
        return Verification::incomplete();
    }
    if length > max {
        return Verification::invalid();
    }

    Verification::valid()
}
