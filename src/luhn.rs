//! Luhn (mod 10) checksum.
//!
//! The Luhn algorithm catches any single mistyped digit and most adjacent
//! transpositions. Card numbers carry a Luhn check digit as their last digit.
//!
//! # Algorithm
//!
//! 1. Walk the digits right to left, starting at the check digit
//! 2. Double every second digit
//! 3. If doubling results in a number > 9, subtract 9
//! 4. Sum all digits
//! 5. The number is valid when the sum is divisible by 10

/// Doubled digit with 9 subtracted when the result exceeds 9, indexed by digit.
const DOUBLE_TABLE: [u8; 10] = [0, 2, 4, 6, 8, 1, 3, 5, 7, 9];

/// Checks a string of ASCII digits against the Luhn checksum.
///
/// Returns `false` for an empty string or for any non-digit character; no
/// other length precondition applies.
///
/// # Example
///
/// ```
/// use card_input::luhn::is_valid_luhn;
///
/// assert!(is_valid_luhn("4111111111111111"));
/// assert!(!is_valid_luhn("4111111111111112"));
/// ```
pub fn is_valid_luhn(digits: &str) -> bool {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }

    let values: Vec<u8> = digits.bytes().map(|b| b - b'0').collect();
    validate(&values)
}

/// Validates a slice of digit values (0-9) using the Luhn algorithm.
///
/// # Example
///
/// ```
/// use card_input::luhn::validate;
///
/// let digits = [4, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1];
/// assert!(validate(&digits));
/// ```
#[inline]
pub fn validate(digits: &[u8]) -> bool {
    if digits.is_empty() {
        return false;
    }

    compute_checksum(digits) % 10 == 0
}

/// Computes the Luhn sum (not reduced modulo 10) for a sequence of digits.
#[inline]
pub fn compute_checksum(digits: &[u8]) -> u32 {
    digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &digit)| {
            if i % 2 == 1 {
                DOUBLE_TABLE[digit as usize] as u32
            } else {
                digit as u32
            }
        })
        .sum()
}

/// Computes the check digit that makes `digits` followed by it Luhn-valid.
///
/// # Example
///
/// ```
/// use card_input::luhn::generate_check_digit;
///
/// let partial = [4, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1];
/// assert_eq!(generate_check_digit(&partial), 1);
/// ```
#[inline]
pub fn generate_check_digit(digits: &[u8]) -> u8 {
    // Every existing digit moves one place left once the check digit is
    // appended, so the doubling parity flips.
    let sum: u32 = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &digit)| {
            if i % 2 == 0 {
                DOUBLE_TABLE[digit as usize] as u32
            } else {
                digit as u32
            }
        })
        .sum();

    ((10 - (sum % 10)) % 10) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_vectors() {
        assert!(is_valid_luhn("4111111111111111"));
        assert!(!is_valid_luhn("4111111111111112"));
        assert!(is_valid_luhn("378282246310005"));
        assert!(is_valid_luhn("6011111111111117"));
        assert!(is_valid_luhn("30569309025904"));
        assert!(is_valid_luhn("6212345678901265"));
    }

    #[test]
    fn test_valid_digit_slices() {
        assert!(validate(&[4, 0, 1, 2, 8, 8, 8, 8, 8, 8, 8, 8, 1, 8, 8, 1]));
        assert!(validate(&[5, 5, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 4]));
        assert!(validate(&[3, 4, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1]));
    }

    #[test]
    fn test_invalid_digit_slices() {
        assert!(!validate(&[5, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1]));
        assert!(!validate(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 0, 1, 2, 3, 4, 5, 6]));
    }

    #[test]
    fn test_rejects_non_digits() {
        assert!(!is_valid_luhn(""));
        assert!(!is_valid_luhn("4111 1111 1111 1111"));
        assert!(!is_valid_luhn("411111111111111a"));
    }

    #[test]
    fn test_single_digit() {
        assert!(is_valid_luhn("0"));
        assert!(!is_valid_luhn("1"));
        assert!(!is_valid_luhn("5"));
    }

    #[test]
    fn test_generate_check_digit() {
        let partial = [5, 5, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0];
        assert_eq!(generate_check_digit(&partial), 4);

        let partial = [3, 7, 8, 2, 8, 2, 2, 4, 6, 3, 1, 0, 0, 0];
        assert_eq!(generate_check_digit(&partial), 5);
    }

    #[test]
    fn test_double_table_values() {
        for i in 0..10 {
            let doubled = i * 2;
            let expected = if doubled > 9 { doubled - 9 } else { doubled };
            assert_eq!(DOUBLE_TABLE[i], expected as u8);
        }
    }
}
