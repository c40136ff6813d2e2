//! Card brand definitions.
//!
//! A [`CardTypeDefinition`] describes one card network: the prefixes that
//! identify it, where a display separator goes, which lengths are allowed and
//! what its security code is called. The built-in definitions are plain data;
//! runtime customization happens on a [`CardTypeRegistry`](crate::CardTypeRegistry).

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Stable keys of the built-in card types.
pub mod types {
    /// Visa.
    pub const VISA: &str = "visa";
    /// Mastercard.
    pub const MASTERCARD: &str = "mastercard";
    /// American Express.
    pub const AMERICAN_EXPRESS: &str = "american-express";
    /// Diners Club.
    pub const DINERS_CLUB: &str = "diners-club";
    /// Discover.
    pub const DISCOVER: &str = "discover";
    /// JCB.
    pub const JCB: &str = "jcb";
    /// UnionPay.
    pub const UNIONPAY: &str = "unionpay";
    /// Maestro.
    pub const MAESTRO: &str = "maestro";
    /// Elo (Brazil).
    pub const ELO: &str = "elo";
    /// Mir (Russia).
    pub const MIR: &str = "mir";
    /// Hiper (Brazil).
    pub const HIPER: &str = "hiper";
    /// Hipercard (Brazil).
    pub const HIPERCARD: &str = "hipercard";
}

/// A prefix matcher for a card brand.
///
/// Both forms are evaluated at the digit width of their (lower) bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum CardPattern {
    /// A literal prefix such as `4` or `6011`.
    Prefix(u32),
    /// An inclusive numeric prefix range such as `[2221, 2229]`.
    Range(u32, u32),
}

impl CardPattern {
    /// Number of digits this pattern covers (the width of the lower bound).
    #[inline]
    pub fn width(&self) -> usize {
        match self {
            Self::Prefix(prefix) => digit_width(*prefix),
            Self::Range(min, _) => digit_width(*min),
        }
    }

    /// Returns true if `input` is compatible with this pattern.
    ///
    /// Matching is prospective: a short input matches any pattern it is a
    /// prefix of, and a long input matches any pattern that is its prefix.
    pub fn matches(&self, input: &str) -> bool {
        match self {
            Self::Prefix(prefix) => {
                let prefix = prefix.to_string();
                let shared = prefix.len().min(input.len());
                prefix.as_bytes()[..shared] == input.as_bytes()[..shared]
            }
            Self::Range(min, max) => {
                let head = &input.as_bytes()[..self.width().min(input.len())];
                let Some(value) = leading_number(head) else {
                    return false;
                };
                let min = truncate_to_width(*min, head.len());
                let max = truncate_to_width(*max, head.len());
                (min..=max).contains(&value)
            }
        }
    }
}

impl fmt::Display for CardPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Prefix(prefix) => write!(f, "{}", prefix),
            Self::Range(min, max) => write!(f, "{}-{}", min, max),
        }
    }
}

fn digit_width(value: u32) -> usize {
    value.to_string().len()
}

/// Keeps the leading `width` digits of `value`.
fn truncate_to_width(value: u32, width: usize) -> u64 {
    let text = value.to_string();
    text[..width.min(text.len())].parse().unwrap_or(0)
}

/// Parses the run of ASCII digits at the start of `bytes`.
fn leading_number(bytes: &[u8]) -> Option<u64> {
    let digits: String = bytes
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .map(|&b| b as char)
        .collect();
    digits.parse().ok()
}

/// Name and length of a brand's security code.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SecurityCode {
    /// Label printed next to the input, e.g. `CVV`, `CID`.
    pub name: String,
    /// Number of digits.
    pub size: usize,
}

/// A card brand and its matching rules.
///
/// `Clone` is a full deep copy; every definition handed out by the registry
/// or the detector is an independent value.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct CardTypeDefinition {
    /// Stable key, e.g. `visa`.
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub card_type: String,
    /// Display name, e.g. `Visa`.
    pub nice_type: String,
    /// Prefix matchers, evaluated in order.
    pub patterns: Vec<CardPattern>,
    /// Digit offsets where a display separator is inserted.
    pub gaps: Vec<usize>,
    /// Permitted total digit counts.
    pub lengths: Vec<usize>,
    /// Security code label and length.
    pub code: SecurityCode,
    /// Width of the prefix that identified this brand. Only set on detection
    /// results, and only once the input is at least that long.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub match_strength: Option<usize>,
}

impl CardTypeDefinition {
    /// Creates a definition with no patterns, gaps or lengths and a 3 digit
    /// `CVV` security code.
    pub fn new(card_type: impl Into<String>, nice_type: impl Into<String>) -> Self {
        Self {
            card_type: card_type.into(),
            nice_type: nice_type.into(),
            patterns: Vec::new(),
            gaps: Vec::new(),
            lengths: Vec::new(),
            code: SecurityCode {
                name: "CVV".to_string(),
                size: 3,
            },
            match_strength: None,
        }
    }

    /// Sets the prefix patterns.
    pub fn with_patterns(mut self, patterns: impl Into<Vec<CardPattern>>) -> Self {
        self.patterns = patterns.into();
        self
    }

    /// Sets the separator offsets.
    pub fn with_gaps(mut self, gaps: impl Into<Vec<usize>>) -> Self {
        self.gaps = gaps.into();
        self
    }

    /// Sets the permitted lengths.
    pub fn with_lengths(mut self, lengths: impl Into<Vec<usize>>) -> Self {
        self.lengths = lengths.into();
        self
    }

    /// Sets the security code.
    pub fn with_code(mut self, name: impl Into<String>, size: usize) -> Self {
        self.code = SecurityCode {
            name: name.into(),
            size,
        };
        self
    }

    /// Returns true if `length` is one of the permitted lengths.
    #[inline]
    pub fn is_valid_length(&self, length: usize) -> bool {
        self.lengths.contains(&length)
    }

    /// The longest permitted length, or 0 when none are declared.
    #[inline]
    pub fn max_length(&self) -> usize {
        self.lengths.iter().copied().max().unwrap_or(0)
    }

    /// Finds the first pattern compatible with `input`.
    pub fn first_match(&self, input: &str) -> Option<&CardPattern> {
        self.patterns.iter().find(|pattern| pattern.matches(input))
    }
}

impl fmt::Display for CardTypeDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.nice_type)
    }
}

/// Partial update for [`CardTypeRegistry::update_card`](crate::CardTypeRegistry::update_card).
///
/// Fields left as `None` keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct CardTypeUpdate {
    /// Must equal the key being updated when present.
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub card_type: Option<String>,
    /// New display name.
    pub nice_type: Option<String>,
    /// New prefix patterns.
    pub patterns: Option<Vec<CardPattern>>,
    /// New separator offsets.
    pub gaps: Option<Vec<usize>>,
    /// New permitted lengths.
    pub lengths: Option<Vec<usize>>,
    /// New security code.
    pub code: Option<SecurityCode>,
}

impl CardTypeUpdate {
    /// Applies the update over `base`.
    pub(crate) fn apply(self, mut base: CardTypeDefinition) -> CardTypeDefinition {
        if let Some(card_type) = self.card_type {
            base.card_type = card_type;
        }
        if let Some(nice_type) = self.nice_type {
            base.nice_type = nice_type;
        }
        if let Some(patterns) = self.patterns {
            base.patterns = patterns;
        }
        if let Some(gaps) = self.gaps {
            base.gaps = gaps;
        }
        if let Some(lengths) = self.lengths {
            base.lengths = lengths;
        }
        if let Some(code) = self.code {
            base.code = code;
        }
        base
    }
}

/// Returns the built-in card types in their default evaluation order.
pub fn builtin_card_types() -> Vec<CardTypeDefinition> {
    use CardPattern::{Prefix as P, Range as R};

    vec![
        CardTypeDefinition::new(types::VISA, "Visa")
            .with_patterns([P(4)])
            .with_gaps([4, 8, 12])
            .with_lengths([16, 18, 19])
            .with_code("CVV", 3),
        CardTypeDefinition::new(types::MASTERCARD, "Mastercard")
            .with_patterns([
                R(51, 55),
                R(2221, 2229),
                R(223, 229),
                R(23, 26),
                R(270, 271),
                P(2720),
            ])
            .with_gaps([4, 8, 12])
            .with_lengths([16])
            .with_code("CVC", 3),
        CardTypeDefinition::new(types::AMERICAN_EXPRESS, "American Express")
            .with_patterns([P(34), P(37)])
            .with_gaps([4, 10])
            .with_lengths([15])
            .with_code("CID", 4),
        CardTypeDefinition::new(types::DINERS_CLUB, "Diners Club")
            .with_patterns([R(300, 305), P(36), P(38), P(39)])
            .with_gaps([4, 10])
            .with_lengths([14, 16, 19])
            .with_code("CVV", 3),
        CardTypeDefinition::new(types::DISCOVER, "Discover")
            .with_patterns([P(6011), R(644, 649), P(65)])
            .with_gaps([4, 8, 12])
            .with_lengths([16, 19])
            .with_code("CID", 3),
        CardTypeDefinition::new(types::JCB, "JCB")
            .with_patterns([P(2131), P(1800), R(3528, 3589)])
            .with_gaps([4, 8, 12])
            .with_lengths([16, 17, 18, 19])
            .with_code("CVV", 3),
        CardTypeDefinition::new(types::UNIONPAY, "UnionPay")
            .with_patterns([
                P(620),
                R(624, 626),
                R(62100, 62182),
                R(62184, 62187),
                R(62185, 62197),
                R(62200, 62205),
                R(622010, 622999),
                P(622018),
                R(622019, 622999),
                R(62207, 62209),
                R(623, 626),
                P(6270),
                P(6272),
                P(6276),
                R(627700, 627779),
                R(627781, 627799),
                R(6282, 6289),
                P(6291),
                P(6292),
                P(810),
                R(8110, 8131),
                R(8132, 8151),
                R(8152, 8163),
                R(8164, 8171),
            ])
            .with_gaps([4, 8, 12])
            .with_lengths([14, 15, 16, 17, 18, 19])
            .with_code("CVN", 3),
        CardTypeDefinition::new(types::MAESTRO, "Maestro")
            .with_patterns([
                P(493698),
                R(500000, 504174),
                R(504176, 506698),
                R(506779, 508999),
                R(56, 59),
                P(63),
                P(67),
                P(6),
            ])
            .with_gaps([4, 8, 12])
            .with_lengths([12, 13, 14, 15, 16, 17, 18, 19])
            .with_code("CVC", 3),
        CardTypeDefinition::new(types::ELO, "Elo")
            .with_patterns([
                P(401178),
                P(401179),
                P(438935),
                P(457631),
                P(457632),
                P(431274),
                P(451416),
                P(457393),
                P(504175),
                R(506699, 506778),
                R(509000, 509999),
                P(627780),
                P(636297),
                P(636368),
                R(650031, 650033),
                R(650035, 650051),
                R(650405, 650439),
                R(650485, 650538),
                R(650541, 650598),
                R(650700, 650718),
                R(650720, 650727),
                R(650901, 650978),
                R(651652, 651679),
                R(655000, 655019),
                R(655021, 655058),
            ])
            .with_gaps([4, 8, 12])
            .with_lengths([16])
            .with_code("CVE", 3),
        CardTypeDefinition::new(types::MIR, "Mir")
            .with_patterns([R(2200, 2204)])
            .with_gaps([4, 8, 12])
            .with_lengths([16, 17, 18, 19])
            .with_code("CVP2", 3),
        CardTypeDefinition::new(types::HIPER, "Hiper")
            .with_patterns([
                P(637095),
                P(63737423),
                P(63743358),
                P(637568),
                P(637599),
                P(637609),
                P(637612),
            ])
            .with_gaps([4, 8, 12])
            .with_lengths([16])
            .with_code("CVC", 3),
        CardTypeDefinition::new(types::HIPERCARD, "Hipercard")
            .with_patterns([P(606282)])
            .with_gaps([4, 8, 12])
            .with_lengths([16])
            .with_code("CVC", 3),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_matches_both_directions() {
        let pattern = CardPattern::Prefix(6011);
        assert!(pattern.matches("60"));
        assert!(pattern.matches("6011"));
        assert!(pattern.matches("601112345"));
        assert!(!pattern.matches("6012"));
        assert!(!pattern.matches("7"));
    }

    #[test]
    fn test_range_truncates_to_input() {
        let pattern = CardPattern::Range(2221, 2229);
        assert!(pattern.matches("2"));
        assert!(pattern.matches("22"));
        assert!(pattern.matches("222"));
        assert!(pattern.matches("2225"));
        assert!(pattern.matches("22291234"));
        assert!(!pattern.matches("2220"));
        assert!(!pattern.matches("223"));
        assert!(!pattern.matches("3"));
    }

    #[test]
    fn test_range_with_wider_max() {
        // Bounds are compared at the input's width, capped at the width of min.
        let pattern = CardPattern::Range(51, 55);
        assert!(pattern.matches("5"));
        assert!(pattern.matches("53"));
        assert!(pattern.matches("559"));
        assert!(!pattern.matches("56"));
    }

    #[test]
    fn test_range_rejects_non_digits() {
        assert!(!CardPattern::Range(51, 55).matches("a5"));
    }

    #[test]
    fn test_pattern_width() {
        assert_eq!(CardPattern::Prefix(4).width(), 1);
        assert_eq!(CardPattern::Prefix(63737423).width(), 8);
        assert_eq!(CardPattern::Range(622010, 622999).width(), 6);
    }

    #[test]
    fn test_builtin_order_and_keys() {
        let keys: Vec<String> = builtin_card_types()
            .into_iter()
            .map(|card| card.card_type)
            .collect();
        assert_eq!(
            keys,
            [
                types::VISA,
                types::MASTERCARD,
                types::AMERICAN_EXPRESS,
                types::DINERS_CLUB,
                types::DISCOVER,
                types::JCB,
                types::UNIONPAY,
                types::MAESTRO,
                types::ELO,
                types::MIR,
                types::HIPER,
                types::HIPERCARD,
            ]
        );
    }

    #[test]
    fn test_lengths() {
        let amex = builtin_card_types()
            .into_iter()
            .find(|card| card.card_type == types::AMERICAN_EXPRESS)
            .unwrap();
        assert!(amex.is_valid_length(15));
        assert!(!amex.is_valid_length(16));
        assert_eq!(amex.max_length(), 15);
        assert_eq!(amex.code.size, 4);
        assert_eq!(CardTypeDefinition::new("x", "X").max_length(), 0);
    }

    #[test]
    fn test_update_merges_only_present_fields() {
        let base = CardTypeDefinition::new("custom", "Custom").with_lengths([16]);
        let updated = CardTypeUpdate {
            nice_type: Some("Renamed".into()),
            ..Default::default()
        }
        .apply(base);
        assert_eq!(updated.nice_type, "Renamed");
        assert_eq!(updated.lengths, vec![16]);
        assert_eq!(updated.card_type, "custom");
    }

    #[test]
    fn test_definition_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CardTypeDefinition>();
    }
}
