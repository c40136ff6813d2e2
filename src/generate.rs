//! Test card number generation.
//!
//! Builds Luhn-valid numbers that fall inside a card type's first pattern and
//! shortest length, for exercising forms and validators with any registered
//! brand, built-in or custom.
//!
//! # Example
//!
//! ```
//! use card_input::generate::generate_card_number;
//! use card_input::validate::validate_card_number;
//! use card_input::CardTypeRegistry;
//!
//! let visa = CardTypeRegistry::builtin().get_type_info("visa").unwrap();
//! let number = generate_card_number(&visa).unwrap();
//! assert_eq!(number, "4000000000000002");
//! assert!(validate_card_number(&number).is_valid);
//! ```
//!
//! # Security Note
//!
//! Generated numbers pass the checksum but belong to no account. Use them
//! only for testing.

use crate::card::{CardPattern, CardTypeDefinition};
use crate::luhn;

#[cfg(feature = "generate")]
use rand::Rng;

/// The leading digits a generated number starts with: the first pattern's
/// prefix, or the lower bound of its range.
pub fn card_prefix(card: &CardTypeDefinition) -> Option<String> {
    card.patterns.first().map(|pattern| match *pattern {
        CardPattern::Prefix(prefix) => prefix.to_string(),
        CardPattern::Range(min, _) => min.to_string(),
    })
}

/// Shortest allowed length that leaves room for a check digit after `prefix_len`.
fn shortest_length(card: &CardTypeDefinition, prefix_len: usize) -> Option<usize> {
    card.lengths
        .iter()
        .copied()
        .filter(|&length| length > prefix_len)
        .min()
}

/// Generates a card number deterministically: the brand's prefix, zeros, and
/// a check digit.
///
/// Returns `None` if the card has no patterns, or no length longer than its
/// prefix.
pub fn generate_card_number(card: &CardTypeDefinition) -> Option<String> {
    let prefix = card_prefix(card)?;
    let length = shortest_length(card, prefix.len())?;
    generate_with_prefix(&prefix, length)
}

/// Generates a number of `length` digits starting with `prefix`, padded with
/// zeros and ending in a valid check digit.
///
/// Returns `None` if `prefix` contains non-digits or leaves no room for the
/// check digit.
///
/// # Example
///
/// ```
/// use card_input::generate::generate_with_prefix;
/// use card_input::luhn::is_valid_luhn;
///
/// let number = generate_with_prefix("411111", 16).unwrap();
/// assert!(number.starts_with("411111"));
/// assert!(is_valid_luhn(&number));
/// assert!(generate_with_prefix("4111", 4).is_none());
/// ```
pub fn generate_with_prefix(prefix: &str, length: usize) -> Option<String> {
    let mut digits = prefix_digits(prefix, length)?;
    digits.resize(length - 1, 0);
    Some(finish(digits))
}

fn prefix_digits(prefix: &str, length: usize) -> Option<Vec<u8>> {
    if prefix.len() >= length || !prefix.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let mut digits = Vec::with_capacity(length);
    digits.extend(prefix.bytes().map(|b| b - b'0'));
    Some(digits)
}

fn finish(mut digits: Vec<u8>) -> String {
    digits.push(luhn::generate_check_digit(&digits));
    digits.iter().map(|&d| (b'0' + d) as char).collect()
}

/// Generates a random card number for `card` using the thread-local RNG.
///
/// Requires the `generate` feature.
#[cfg(feature = "generate")]
pub fn generate_random_card_number(card: &CardTypeDefinition) -> Option<String> {
    let mut rng = rand::thread_rng();
    generate_card_number_with_rng(card, &mut rng)
}

/// Generates a random card number for `card` using the provided RNG.
///
/// A pattern is picked at random (a range contributes a random value inside
/// it), followed by a random allowed length, random digits and the check
/// digit. Seeded RNGs give reproducible output.
///
/// Returns `None` if the card has no patterns, the picked range is empty
/// (`min > max`), or no length is longer than the prefix.
///
/// Requires the `generate` feature.
#[cfg(feature = "generate")]
pub fn generate_card_number_with_rng<R: Rng>(
    card: &CardTypeDefinition,
    rng: &mut R,
) -> Option<String> {
    if card.patterns.is_empty() {
        return None;
    }

    let prefix = match card.patterns[rng.gen_range(0..card.patterns.len())] {
        CardPattern::Prefix(prefix) => prefix.to_string(),
        CardPattern::Range(min, max) if min <= max => rng.gen_range(min..=max).to_string(),
        CardPattern::Range(..) => return None,
    };

    let lengths: Vec<usize> = card
        .lengths
        .iter()
        .copied()
        .filter(|&length| length > prefix.len())
        .collect();
    if lengths.is_empty() {
        return None;
    }
    let length = lengths[rng.gen_range(0..lengths.len())];

    let mut digits = prefix_digits(&prefix, length)?;
    while digits.len() < length - 1 {
        digits.push(rng.gen_range(0..10));
    }
    Some(finish(digits))
}
