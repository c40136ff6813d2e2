//! Postal code validation.
//!
//! Postal code formats vary too much between countries to check structure, so
//! only a minimum length is enforced and any value can still be completed.

use crate::verification::Verification;

/// Minimum postal code length used when none is configured.
pub const DEFAULT_MIN_POSTAL_CODE_LENGTH: usize = 3;

/// Options for [`validate_postal_code_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostalCodeOptions {
    /// Minimum number of characters for a valid code.
    pub min_length: usize,
}

impl Default for PostalCodeOptions {
    fn default() -> Self {
        Self {
            min_length: DEFAULT_MIN_POSTAL_CODE_LENGTH,
        }
    }
}

/// Validates a postal code with the default minimum length.
///
/// # Example
///
/// ```
/// use card_input::postal::validate_postal_code;
///
/// assert!(validate_postal_code("94107").is_valid);
/// assert!(!validate_postal_code("94").is_valid);
/// assert!(validate_postal_code("94").is_potentially_valid);
/// ```
#[inline]
pub fn validate_postal_code(value: &str) -> Verification {
    validate_postal_code_with(value, &PostalCodeOptions::default())
}

/// Validates a postal code: valid once it reaches `options.min_length`
/// characters, always potentially valid.
///
/// A `min_length` of 0 falls back to [`DEFAULT_MIN_POSTAL_CODE_LENGTH`].
pub fn validate_postal_code_with(value: &str, options: &PostalCodeOptions) -> Verification {
    let min_length = match options.min_length {
        0 => DEFAULT_MIN_POSTAL_CODE_LENGTH,
        n => n,
    };

    Verification::new(value.chars().count() >= min_length, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_min_length() {
        assert_eq!(validate_postal_code(""), Verification::incomplete());
        assert_eq!(validate_postal_code("12"), Verification::incomplete());
        assert_eq!(validate_postal_code("123"), Verification::valid());
        assert_eq!(validate_postal_code("SW1A 1AA"), Verification::valid());
    }

    #[test]
    fn test_custom_min_length() {
        let options = PostalCodeOptions { min_length: 5 };
        assert_eq!(validate_postal_code_with("1234", &options), Verification::incomplete());
        assert_eq!(validate_postal_code_with("12345", &options), Verification::valid());
    }

    #[test]
    fn test_zero_min_length_uses_default() {
        let options = PostalCodeOptions { min_length: 0 };
        assert_eq!(validate_postal_code_with("12", &options), Verification::incomplete());
    }

    #[test]
    fn test_counts_characters() {
        assert!(validate_postal_code("ÅÄÖ").is_valid);
    }
}
