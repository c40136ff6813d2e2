//! Caret-preserving input masking.
//!
//! [`Formatter`] applies a compiled [pattern](crate::pattern) to raw user
//! input, inserting literal separators and dropping characters the pattern
//! does not accept, while moving the selection so the caret stays next to
//! the character the user just typed.
//!
//! Typical keystroke handling:
//!
//! 1. [`Formatter::unformat`] the field's current value and selection.
//! 2. Apply the edit to the raw value (or use [`Formatter::simulate_deletion`]).
//! 3. [`Formatter::format`] the result and write value and selection back.
//!
//! # Example
//!
//! ```
//! use card_input::mask::{Formatter, Selection};
//!
//! let formatter = Formatter::new("{{9999}} {{9999}}").unwrap();
//!
//! let out = formatter.format("1234", Selection::caret(4));
//! assert_eq!(out.value, "1234");
//! assert_eq!(out.selection, Selection::caret(4));
//!
//! // The fifth digit pulls in the separator and the caret skips over it.
//! let out = formatter.format("12345", Selection::caret(5));
//! assert_eq!(out.value, "1234 5");
//! assert_eq!(out.selection, Selection::caret(6));
//! ```

use std::fmt;

use tracing::debug;

use crate::error::PatternError;
use crate::pattern::{compile, PatternToken, TokenValue};

/// A selection range in characters, `start <= end`.
///
/// A collapsed selection (`start == end`) is a caret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Selection {
    /// First selected character.
    pub start: usize,
    /// One past the last selected character.
    pub end: usize,
}

impl Selection {
    /// Creates a selection, swapping the bounds if they are reversed.
    #[inline]
    pub fn new(start: usize, end: usize) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    /// A collapsed selection at `position`.
    #[inline]
    pub fn caret(position: usize) -> Self {
        Self {
            start: position,
            end: position,
        }
    }

    /// Whether no characters are selected.
    #[inline]
    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }

    fn clamped(self, length: usize) -> Self {
        Self::new(self.start.min(length), self.end.min(length))
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// A value together with its selection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Formatted {
    /// The (formatted or raw) text.
    pub value: String,
    /// Selection within `value`.
    pub selection: Selection,
}

/// The key that triggered a deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeletionKey {
    /// Removes the character before the caret.
    Backspace,
    /// Removes the character after the caret. Any other editing key that
    /// deletes is treated the same way.
    Delete,
}

/// Formats raw input against a pattern template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formatter {
    template: String,
    tokens: Vec<PatternToken>,
}

impl Formatter {
    /// Compiles `template` into a formatter.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError`] if a placeholder group holds a character that
    /// is not a digit, a letter or `*`.
    pub fn new(template: &str) -> Result<Self, PatternError> {
        let tokens = compile(template)?;
        debug!(pattern = %template, tokens = tokens.len(), "compiled input pattern");

        Ok(Self {
            template: template.to_string(),
            tokens,
        })
    }

    /// Replaces the pattern. Text formatted with the old pattern is not
    /// touched; unformat it first and format it again afterwards.
    ///
    /// On error the current pattern is kept.
    pub fn set_pattern(&mut self, template: &str) -> Result<(), PatternError> {
        *self = Self::new(template)?;
        Ok(())
    }

    /// The template this formatter was built from.
    #[inline]
    pub fn pattern(&self) -> &str {
        &self.template
    }

    /// The compiled tokens.
    #[inline]
    pub fn tokens(&self) -> &[PatternToken] {
        &self.tokens
    }

    /// Formats raw input, moving `selection` along with the characters.
    ///
    /// Literals are written when raw input remains to follow them, or when
    /// they lead the output. A literal written at or before a selection bound
    /// pushes it right, so the bounds track the output as it grows. Raw
    /// characters rejected by a matcher are dropped and pull bounds at or after
    /// that matcher left. Formatting stops once the raw input is used up.
    pub fn format(&self, value: &str, selection: Selection) -> Formatted {
        let raw: Vec<char> = value.chars().collect();
        let mut start = selection.start;
        let mut end = selection.end;
        let mut output = String::with_capacity(self.tokens.len());
        let mut output_len = 0;
        let mut cursor = 0;

        for token in &self.tokens {
            if cursor >= raw.len() && cursor > 0 {
                break;
            }

            match token.value {
                TokenValue::Literal(c) => {
                    if cursor < raw.len() || output_len == token.index {
                        output.push(c);
                        output_len += 1;
                        if token.index <= start {
                            start += 1;
                        }
                        if token.index <= end {
                            end += 1;
                        }
                    }
                }
                TokenValue::Matcher(class) => {
                    while cursor < raw.len() {
                        let c = raw[cursor];
                        cursor += 1;
                        if class.matches(c) {
                            output.push(c);
                            output_len += 1;
                            break;
                        }
                        if token.index <= start {
                            start = start.saturating_sub(1);
                        }
                        if token.index <= end {
                            end = end.saturating_sub(1);
                        }
                    }
                }
            }
        }

        Formatted {
            value: output,
            selection: Selection::new(start, end).clamped(output_len),
        }
    }

    /// Strips literals and mismatched characters from formatted text.
    ///
    /// Position `i` of `value` survives only if token `i` is a matcher that
    /// accepts it. Every dropped position before a selection bound pulls that
    /// bound left. Characters beyond the end of the pattern are dropped.
    pub fn unformat(&self, value: &str, selection: Selection) -> Formatted {
        let mut start = selection.start;
        let mut end = selection.end;
        let mut output = String::with_capacity(value.len());
        let mut output_len = 0;

        for (i, (token, c)) in self.tokens.iter().zip(value.chars()).enumerate() {
            if token.accepts(c) {
                output.push(c);
                output_len += 1;
                continue;
            }
            if i < selection.start {
                start -= 1;
            }
            if i < selection.end {
                end -= 1;
            }
        }

        Formatted {
            value: output,
            selection: Selection::new(start, end).clamped(output_len),
        }
    }

    /// Computes the raw value after a deletion key is pressed on formatted
    /// text.
    ///
    /// A non-empty selection is removed as a whole. A caret removes one
    /// character before it (Backspace) or after it (Delete), clamped to the
    /// value. The result is unformatted with the caret at the deletion point,
    /// ready for [`format`](Self::format).
    ///
    /// # Example
    ///
    /// ```
    /// use card_input::mask::{DeletionKey, Formatter, Selection};
    ///
    /// let formatter = Formatter::new("{{9999}} {{9999}}").unwrap();
    ///
    /// let out = formatter.simulate_deletion(DeletionKey::Backspace, "1234 5", Selection::caret(6));
    /// assert_eq!(out.value, "1234");
    /// assert_eq!(out.selection, Selection::caret(4));
    /// ```
    pub fn simulate_deletion(
        &self,
        key: DeletionKey,
        value: &str,
        selection: Selection,
    ) -> Formatted {
        let raw = self.unformat(value, selection);
        let chars: Vec<char> = raw.value.chars().collect();
        let Selection { start, end } = raw.selection;

        let (from, to) = if !raw.selection.is_collapsed() {
            (start, end)
        } else {
            match key {
                DeletionKey::Backspace => (start.saturating_sub(1), start),
                DeletionKey::Delete => (start, (start + 1).min(chars.len())),
            }
        };

        let remaining: String = chars[..from].iter().chain(&chars[to..]).collect();

        Formatted {
            value: remaining,
            selection: Selection::caret(from),
        }
    }
}

impl fmt::Display for Formatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.template)
    }
}
