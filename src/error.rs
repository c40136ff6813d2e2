//! Error types for API misuse.
//!
//! Invalid user input is never an error in this crate: it is reported through
//! [`Verification`](crate::Verification). The errors here describe programmer
//! or configuration mistakes (a malformed mask pattern, mutating a card type
//! that was never registered) and are meant to propagate to the caller.

use std::fmt;

/// Errors raised while compiling a mask pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    /// A `{{...}}` placeholder group contained something other than a letter,
    /// a digit, or the `*` wildcard.
    InvalidPlaceholder {
        /// The offending character.
        character: char,
        /// Position of the character in the pattern string (in chars).
        position: usize,
    },
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPlaceholder {
                character,
                position,
            } => {
                write!(
                    f,
                    "invalid placeholder '{}' at position {} (only alphanumeric or wildcard pattern matchers are allowed)",
                    character.escape_default(),
                    position
                )
            }
        }
    }
}

impl std::error::Error for PatternError {}

/// Errors raised by card type registry mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The named card type is not known to the registry.
    UnknownType(String),

    /// An update tried to change the `type` key of an existing card.
    TypeMismatch {
        /// The key being updated.
        expected: String,
        /// The key carried by the update.
        found: String,
    },

    /// Custom card definitions could not be parsed.
    Json(String),
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownType(key) => {
                write!(f, "\"{}\" is not a recognized card type", key)
            }
            Self::TypeMismatch { expected, found } => {
                write!(
                    f,
                    "cannot overwrite type parameter: \"{}\" cannot become \"{}\"",
                    expected, found
                )
            }
            Self::Json(msg) => write!(f, "invalid card definitions: {}", msg),
        }
    }
}

impl std::error::Error for RegistryError {}
