//! Card brand detection from a partial or complete digit string.
//!
//! Detection is prospective: while the user is still typing, every brand the
//! digits could still turn into is reported. Once every remaining candidate
//! has been matched on its full prefix width, the list collapses to the single
//! most specific brand.
//!
//! # Example
//!
//! ```
//! use card_input::detect::detect_card_type;
//!
//! // Nothing typed yet: every known brand is possible.
//! assert_eq!(detect_card_type("").len(), 12);
//!
//! // "41" can only be Visa.
//! let cards = detect_card_type("41");
//! assert_eq!(cards.len(), 1);
//! assert_eq!(cards[0].card_type, "visa");
//! ```

use tracing::trace;

use crate::card::CardTypeDefinition;
use crate::registry::CardTypeRegistry;

/// Detects candidate brands using the built-in registry.
#[inline]
pub fn detect_card_type(digits: &str) -> Vec<CardTypeDefinition> {
    detect_card_type_with(CardTypeRegistry::builtin(), digits)
}

/// Detects candidate brands for `digits` against `registry`.
///
/// - An empty input yields a copy of every registered brand, in order.
/// - Otherwise each brand contributes at most one candidate: the first of its
///   patterns compatible with the input. The candidate's `match_strength` is
///   the pattern width, recorded only when the input is at least that long.
/// - When every candidate carries a strength, the strongest wins and earlier
///   brands win ties.
pub fn detect_card_type_with(registry: &CardTypeRegistry, digits: &str) -> Vec<CardTypeDefinition> {
    if digits.is_empty() {
        return registry.all_card_types();
    }

    let mut results: Vec<CardTypeDefinition> = Vec::new();

    for card in registry.iter() {
        let Some(pattern) = card.first_match(digits) else {
            continue;
        };

        let width = pattern.width();
        let mut candidate = card.clone();
        if digits.len() >= width {
            candidate.match_strength = Some(width);
        }
        results.push(candidate);
    }

    trace!(
        input_length = digits.len(),
        candidates = results.len(),
        "detected card candidates"
    );

    match best_match(&results) {
        Some(index) => vec![results.swap_remove(index)],
        None => results,
    }
}

/// Index of the strongest candidate, if every candidate has a strength.
fn best_match(results: &[CardTypeDefinition]) -> Option<usize> {
    if results.is_empty() || results.iter().any(|card| card.match_strength.is_none()) {
        return None;
    }

    let mut best = 0;
    for (index, card) in results.iter().enumerate().skip(1) {
        // Strictly greater: the earliest brand keeps a tie.
        if card.match_strength > results[best].match_strength {
            best = index;
        }
    }
    Some(best)
}
