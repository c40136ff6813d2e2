//! Cardholder name validation.

use crate::verification::Verification;

/// Longest accepted cardholder name, in UTF-16 code units.
pub const MAX_CARDHOLDER_NAME_LENGTH: usize = 255;

/// Validates a cardholder name.
///
/// A value made only of digits, spaces and hyphens looks like a card number
/// typed into the wrong field; it is reported as potentially valid but never
/// accepted.
///
/// # Example
///
/// ```
/// use card_input::name::validate_cardholder_name;
///
/// assert!(validate_cardholder_name("Ada Lovelace").is_valid);
/// assert!(validate_cardholder_name("4111 1111").is_potentially_valid);
/// assert!(!validate_cardholder_name("4111 1111").is_valid);
/// ```
pub fn validate_cardholder_name(value: &str) -> Verification {
    if value.is_empty() {
        return Verification::incomplete();
    }

    // Browsers measure input length in UTF-16 code units.
    if value.encode_utf16().count() > MAX_CARDHOLDER_NAME_LENGTH {
        return Verification::invalid();
    }

    if looks_like_card_number(value) {
        return Verification::incomplete();
    }

    Verification::valid()
}

fn looks_like_card_number(value: &str) -> bool {
    value
        .chars()
        .all(|c| c.is_ascii_digit() || c == '-' || c.is_whitespace())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        assert_eq!(validate_cardholder_name("Grace Hopper"), Verification::valid());
        assert_eq!(validate_cardholder_name("J"), Verification::valid());
        assert_eq!(validate_cardholder_name("Zoë O'Brien-Smith"), Verification::valid());
        assert_eq!(validate_cardholder_name("Agent 47"), Verification::valid());
    }

    #[test]
    fn test_empty() {
        assert_eq!(validate_cardholder_name(""), Verification::incomplete());
    }

    #[test]
    fn test_card_number_lookalike() {
        assert_eq!(validate_cardholder_name("4111"), Verification::incomplete());
        assert_eq!(validate_cardholder_name("4111-1111 1111"), Verification::incomplete());
        assert_eq!(validate_cardholder_name("   "), Verification::incomplete());
    }

    #[test]
    fn test_length_limit() {
        let longest = "a".repeat(MAX_CARDHOLDER_NAME_LENGTH);
        assert_eq!(validate_cardholder_name(&longest), Verification::valid());

        let too_long = "a".repeat(MAX_CARDHOLDER_NAME_LENGTH + 1);
        assert_eq!(validate_cardholder_name(&too_long), Verification::invalid());
    }
}
