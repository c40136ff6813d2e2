//! Card number validation.
//!
//! Unlike a one-shot checker, this validator is meant to run on every
//! keystroke. It reports whether the digits typed so far form a valid number,
//! could still become one, or are already hopeless, together with the brand
//! once it is unambiguous.
//!
//! # Example
//!
//! ```
//! use card_input::validate::validate_card_number;
//!
//! let result = validate_card_number("4111 1111 1111 1111");
//! assert!(result.is_valid);
//! assert_eq!(result.card.unwrap().card_type, "visa");
//!
//! let result = validate_card_number("411111");
//! assert!(!result.is_valid);
//! assert!(result.is_potentially_valid);
//! ```

use crate::card::{types, CardTypeDefinition};
use crate::detect::detect_card_type_with;
use crate::luhn;
use crate::registry::CardTypeRegistry;
use crate::verification::Verification;

/// Options for [`validate_card_number_with`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CardNumberOptions {
    /// Upper bound on the number of digits, applied on top of the brand's own
    /// lengths. `None` (or `Some(0)`) means no extra bound.
    pub max_length: Option<usize>,
    /// Require UnionPay numbers to pass the Luhn checksum. UnionPay issues
    /// numbers that do not, so they are exempt by default.
    pub luhn_validate_union_pay: bool,
    /// Treat every number as checksum-valid.
    pub skip_luhn_validation: bool,
}

/// Outcome of [`validate_card_number`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardNumberVerification {
    /// The detected brand, once exactly one candidate remains.
    pub card: Option<CardTypeDefinition>,
    /// The number is complete and acceptable.
    pub is_valid: bool,
    /// The number is acceptable or could become so with more digits.
    pub is_potentially_valid: bool,
}

impl CardNumberVerification {
    fn new(card: Option<CardTypeDefinition>, is_potentially_valid: bool, is_valid: bool) -> Self {
        Self {
            card,
            is_valid,
            is_potentially_valid,
        }
    }
}

impl From<CardNumberVerification> for Verification {
    fn from(result: CardNumberVerification) -> Self {
        Verification::new(result.is_valid, result.is_potentially_valid)
    }
}

/// Validates a card number against the built-in brands with default options.
#[inline]
pub fn validate_card_number(value: &str) -> CardNumberVerification {
    validate_card_number_with(CardTypeRegistry::builtin(), value, &CardNumberOptions::default())
}

/// Validates a card number against `registry`.
///
/// Spaces and hyphens are ignored; any other non-digit makes the value
/// invalid. While more than one brand is possible the result is potentially
/// valid without a card.
pub fn validate_card_number_with(
    registry: &CardTypeRegistry,
    value: &str,
    options: &CardNumberOptions,
) -> CardNumberVerification {
    let digits: String = value
        .chars()
        .filter(|c| *c != '-' && !c.is_whitespace())
        .collect();

    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return CardNumberVerification::new(None, false, false);
    }

    let mut candidates = detect_card_type_with(registry, &digits);
    if candidates.is_empty() {
        return CardNumberVerification::new(None, false, false);
    }
    if candidates.len() != 1 {
        return CardNumberVerification::new(None, true, false);
    }

    let card = candidates.remove(0);
    let length = digits.len();
    let max_length_option = options.max_length.filter(|&max| max > 0);

    if let Some(max) = max_length_option {
        if length > max {
            return CardNumberVerification::new(Some(card), false, false);
        }
    }

    let luhn_ok = options.skip_luhn_validation
        || (card.card_type == types::UNIONPAY && !options.luhn_validate_union_pay)
        || luhn::is_valid_luhn(&digits);

    let mut max_length = card.max_length();
    if let Some(max) = max_length_option {
        max_length = max_length.min(max);
    }

    if card.is_valid_length(length) {
        let is_potentially_valid = length < max_length || luhn_ok;
        return CardNumberVerification::new(Some(card), is_potentially_valid, luhn_ok);
    }

    CardNumberVerification::new(Some(card), length < max_length, false)
}
