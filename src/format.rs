//! Card number display formatting.
//!
//! Brands declare the digit offsets where a separator goes (`gaps`):
//!
//! - **Visa/Mastercard/Discover** (`[4, 8, 12]`): `XXXX XXXX XXXX XXXX`
//! - **American Express** (`[4, 10]`): `XXXX XXXXXX XXXXX`
//! - **Diners Club** (`[4, 10]`): `XXXX XXXXXX XXXX`
//!
//! # Example
//!
//! ```
//! use card_input::format::{add_gaps_to_card_number, strip_formatting};
//!
//! assert_eq!(add_gaps_to_card_number("4111111111111111", None), "4111 1111 1111 1111");
//! assert_eq!(add_gaps_to_card_number("378282246310005", None), "3782 822463 10005");
//! assert_eq!(strip_formatting("3782 822463 10005"), "378282246310005");
//! ```

use crate::card::CardTypeDefinition;
use crate::detect::detect_card_type_with;
use crate::registry::CardTypeRegistry;

/// Gap offsets used by [`card_number_pattern`] when no brand is known.
pub const DEFAULT_GAPS: [usize; 3] = [4, 8, 12];

/// Card length used by [`card_number_pattern`] when no brand is known.
pub const DEFAULT_CARD_LENGTH: usize = 16;

/// Inserts spaces into a card number at its brand's gap offsets.
///
/// Non-digits are removed first. Without `card`, the brand is detected from
/// the digits with the built-in registry; if nothing matches, the digits are
/// returned without gaps.
///
/// # Example
///
/// ```
/// use card_input::format::add_gaps_to_card_number;
///
/// assert_eq!(add_gaps_to_card_number("4111-1111-11", None), "4111 1111 11");
/// assert_eq!(add_gaps_to_card_number("0000000000", None), "0000000000");
/// ```
#[inline]
pub fn add_gaps_to_card_number(value: &str, card: Option<&CardTypeDefinition>) -> String {
    add_gaps_to_card_number_with(CardTypeRegistry::builtin(), value, card)
}

/// Like [`add_gaps_to_card_number`], detecting the brand with `registry`.
pub fn add_gaps_to_card_number_with(
    registry: &CardTypeRegistry,
    value: &str,
    card: Option<&CardTypeDefinition>,
) -> String {
    let digits = strip_formatting(value);

    let detected;
    let gaps: &[usize] = match card {
        Some(card) => &card.gaps,
        None => {
            detected = detect_card_type_with(registry, &digits);
            detected.first().map(|c| c.gaps.as_slice()).unwrap_or_default()
        }
    };

    insert_gaps(&digits, gaps)
}

fn insert_gaps(digits: &str, gaps: &[usize]) -> String {
    let mut result = String::with_capacity(digits.len() + gaps.len());
    let mut chars = digits.chars();
    let mut written = 0;

    for &gap in gaps {
        if gap >= digits.len() {
            break;
        }
        result.extend(chars.by_ref().take(gap.saturating_sub(written)));
        written = written.max(gap);
        result.push(' ');
    }

    result.extend(chars);
    result
}

/// Removes everything but ASCII digits.
///
/// # Example
///
/// ```
/// use card_input::format::strip_formatting;
///
/// assert_eq!(strip_formatting("4111-1111 1111.1111"), "4111111111111111");
/// ```
pub fn strip_formatting(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Builds a [`Formatter`](crate::mask::Formatter) template for a brand's card
/// numbers: digit groups split at its gaps, sized to its longest length.
///
/// Without a brand the template is 16 digits in groups of four.
///
/// # Example
///
/// ```
/// use card_input::format::card_number_pattern;
/// use card_input::CardTypeRegistry;
///
/// assert_eq!(card_number_pattern(None), "{{9999}} {{9999}} {{9999}} {{9999}}");
///
/// let amex = CardTypeRegistry::builtin().get_type_info("american-express").unwrap();
/// assert_eq!(card_number_pattern(Some(&amex)), "{{9999}} {{999999}} {{99999}}");
/// ```
pub fn card_number_pattern(card: Option<&CardTypeDefinition>) -> String {
    let (gaps, length) = match card {
        Some(card) if card.max_length() > 0 => (card.gaps.as_slice(), card.max_length()),
        Some(card) => (card.gaps.as_slice(), DEFAULT_CARD_LENGTH),
        None => (&DEFAULT_GAPS[..], DEFAULT_CARD_LENGTH),
    };

    let mut pattern = String::from("{{");
    for i in 0..length {
        if i > 0 && gaps.contains(&i) {
            pattern.push_str("}} {{");
        }
        pattern.push('9');
    }
    pattern.push_str("}}");
    pattern
}
