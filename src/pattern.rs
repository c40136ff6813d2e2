//! Input pattern templates.
//!
//! A pattern is a template string where `{{ ... }}` groups hold character
//! matchers and everything else is a literal inserted by the formatter:
//!
//! | In a group | Matches |
//! |------------|---------|
//! | any digit (`9`) | one ASCII digit |
//! | any letter (`a`) | one ASCII letter |
//! | `*` | any character except a line feed |
//!
//! `"{{9999}} {{9999}}"` compiles to four digit matchers, a literal space and
//! four more digit matchers.
//!
//! # Example
//!
//! ```
//! use card_input::pattern::{compile, CharClass, TokenValue};
//!
//! let tokens = compile("{{99}}/{{99}}").unwrap();
//! assert_eq!(tokens.len(), 5);
//! assert_eq!(tokens[0].value, TokenValue::Matcher(CharClass::Digit));
//! assert_eq!(tokens[2].value, TokenValue::Literal('/'));
//! assert!(tokens[2].is_perma_char);
//! ```

use crate::error::PatternError;

/// Character class accepted by a matcher token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharClass {
    /// `0`-`9`.
    Digit,
    /// `a`-`z`, `A`-`Z`.
    Letter,
    /// Anything but `\n`.
    Any,
}

impl CharClass {
    /// Whether `c` belongs to this class.
    #[inline]
    pub fn matches(self, c: char) -> bool {
        match self {
            CharClass::Digit => c.is_ascii_digit(),
            CharClass::Letter => c.is_ascii_alphabetic(),
            CharClass::Any => c != '\n',
        }
    }
}

/// What a token stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenValue {
    /// A character inserted verbatim.
    Literal(char),
    /// A slot filled by one user character of the given class.
    Matcher(CharClass),
}

/// One position of a compiled pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PatternToken {
    /// Literal or matcher.
    pub value: TokenValue,
    /// `true` for literals, which the user never types.
    pub is_perma_char: bool,
    /// Position of this token in the pattern.
    pub index: usize,
}

impl PatternToken {
    /// Whether `c` fills this token. Always `false` for literals.
    #[inline]
    pub fn accepts(&self, c: char) -> bool {
        match self.value {
            TokenValue::Matcher(class) => class.matches(c),
            TokenValue::Literal(_) => false,
        }
    }
}

/// Compiles a pattern template into tokens.
///
/// A `{{` starts a group only when a matching `}}` follows with at least one
/// character in between; otherwise the braces are literals. Stray `{`
/// characters inside a group are ignored.
///
/// # Errors
///
/// Returns [`PatternError::InvalidPlaceholder`] for a group character that is
/// not a digit, a letter or `*`.
pub fn compile(template: &str) -> Result<Vec<PatternToken>, PatternError> {
    let chars: Vec<char> = template.chars().collect();
    let mut tokens = Vec::with_capacity(chars.len());
    let mut i = 0;

    while i < chars.len() {
        if let Some(end) = group_end(&chars, i) {
            for (offset, &c) in chars[i + 2..end].iter().enumerate() {
                if c == '{' {
                    continue;
                }
                let class = placeholder_class(c).ok_or(PatternError::InvalidPlaceholder {
                    character: c,
                    position: i + 2 + offset,
                })?;
                tokens.push(PatternToken {
                    value: TokenValue::Matcher(class),
                    is_perma_char: false,
                    index: tokens.len(),
                });
            }
            i = end + 2;
            continue;
        }

        tokens.push(PatternToken {
            value: TokenValue::Literal(chars[i]),
            is_perma_char: true,
            index: tokens.len(),
        });
        i += 1;
    }

    Ok(tokens)
}

/// If a group opens at `start`, returns the index of its closing `}}`.
fn group_end(chars: &[char], start: usize) -> Option<usize> {
    if chars.get(start) != Some(&'{') || chars.get(start + 1) != Some(&'{') {
        return None;
    }

    let body_start = start + 2;
    let body_len = chars[body_start..].iter().take_while(|&&c| c != '}').count();
    let end = body_start + body_len;

    if body_len > 0 && chars.get(end + 1) == Some(&'}') {
        Some(end)
    } else {
        None
    }
}

fn placeholder_class(c: char) -> Option<CharClass> {
    if c.is_ascii_digit() {
        Some(CharClass::Digit)
    } else if c.is_ascii_alphabetic() {
        Some(CharClass::Letter)
    } else if c == '*' {
        Some(CharClass::Any)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(template: &str) -> Vec<TokenValue> {
        compile(template)
            .unwrap()
            .into_iter()
            .map(|t| t.value)
            .collect()
    }

    #[test]
    fn test_card_pattern() {
        let tokens = compile("{{9999}} {{9999}}").unwrap();
        assert_eq!(tokens.len(), 9);
        assert!(tokens.iter().enumerate().all(|(i, t)| t.index == i));
        assert_eq!(tokens[4].value, TokenValue::Literal(' '));
        assert!(tokens[4].is_perma_char);
        assert!(!tokens[0].is_perma_char);
    }

    #[test]
    fn test_matcher_classes() {
        assert_eq!(
            values("{{9a*}}"),
            vec![
                TokenValue::Matcher(CharClass::Digit),
                TokenValue::Matcher(CharClass::Letter),
                TokenValue::Matcher(CharClass::Any),
            ]
        );
    }

    #[test]
    fn test_literals_only() {
        assert_eq!(
            values("(+)"),
            vec![
                TokenValue::Literal('('),
                TokenValue::Literal('+'),
                TokenValue::Literal(')'),
            ]
        );
    }

    #[test]
    fn test_unclosed_group_is_literal() {
        assert_eq!(values("{{9").len(), 3);
        assert_eq!(values("{{}}").len(), 4);
        assert_eq!(
            values("{{9}"),
            vec![
                TokenValue::Literal('{'),
                TokenValue::Literal('{'),
                TokenValue::Literal('9'),
                TokenValue::Literal('}'),
            ]
        );
    }

    #[test]
    fn test_stray_open_brace_in_group() {
        assert_eq!(values("{{{9}}"), vec![TokenValue::Matcher(CharClass::Digit)]);
    }

    #[test]
    fn test_invalid_placeholder() {
        assert_eq!(
            compile("{{99}} {{9-9}}").unwrap_err(),
            PatternError::InvalidPlaceholder {
                character: '-',
                position: 10,
            }
        );
        assert!(compile("{{ }}").is_err());
    }

    #[test]
    fn test_char_classes() {
        assert!(CharClass::Digit.matches('7'));
        assert!(!CharClass::Digit.matches('x'));
        assert!(CharClass::Letter.matches('Q'));
        assert!(!CharClass::Letter.matches('é'));
        assert!(CharClass::Any.matches('é'));
        assert!(!CharClass::Any.matches('\n'));
    }

    #[test]
    fn test_empty_template() {
        assert!(compile("").unwrap().is_empty());
    }
}
