//! Tri-state validation outcome shared by every field validator.

use std::fmt;

/// Result of validating a (possibly incomplete) field value.
///
/// - `is_valid`: the value is acceptable as it stands.
/// - `is_potentially_valid`: the value is acceptable or could become so with
///   more input.
///
/// `is_valid` always implies `is_potentially_valid`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Verification {
    /// The value is complete and acceptable.
    pub is_valid: bool,
    /// The value is acceptable or a prefix of something acceptable.
    pub is_potentially_valid: bool,
}

impl Verification {
    /// Creates a verification from its two flags.
    #[inline]
    pub const fn new(is_valid: bool, is_potentially_valid: bool) -> Self {
        Self {
            is_valid,
            is_potentially_valid,
        }
    }

    /// `{ valid, potentially valid }`.
    #[inline]
    pub const fn valid() -> Self {
        Self::new(true, true)
    }

    /// `{ not valid, potentially valid }`: incomplete but on track.
    #[inline]
    pub const fn incomplete() -> Self {
        Self::new(false, true)
    }

    /// `{ not valid, not potentially valid }`: no amount of typing helps.
    #[inline]
    pub const fn invalid() -> Self {
        Self::new(false, false)
    }
}

impl fmt::Display for Verification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match (self.is_valid, self.is_potentially_valid) {
            (true, _) => "valid",
            (false, true) => "potentially valid",
            (false, false) => "invalid",
        };
        write!(f, "{}", state)
    }
}
