//! Integration tests for card_input.
//!
//! These tests walk through the keystroke-level scenarios a checkout form
//! produces, across detection, validation and masking.

use card_input::detect::detect_card_type_with;
use card_input::expiry::{self, ExpirationDateInput, YearMonth};
use card_input::format::{card_number_pattern, strip_formatting};
use card_input::validate::validate_card_number_with;
use card_input::{
    add_gaps_to_card_number, card::types, cvv, detect_card_type, is_valid_luhn, name, postal,
    validate_card_number, CardNumberOptions, CardPattern, CardTypeDefinition, CardTypeRegistry,
    CardTypeUpdate, DeletionKey, Formatter, PatternError, RegistryError, Selection, Verification,
};

// =============================================================================
// REAL-WORLD TEST CARD NUMBERS
// =============================================================================
// Official test card numbers from payment processors.
// They pass Luhn validation but are not real cards.

mod test_cards {
    pub const VISA_1: &str = "4111111111111111";
    pub const VISA_2: &str = "4012888888881881";
    pub const VISA_3: &str = "4242424242424242";

    pub const MC_1: &str = "5555555555554444";
    pub const MC_2: &str = "5105105105105100";
    pub const MC_2SERIES: &str = "2223000048400011";

    pub const AMEX_1: &str = "378282246310005";
    pub const AMEX_2: &str = "371449635398431";

    pub const DISCOVER_1: &str = "6011111111111117";
    pub const DISCOVER_2: &str = "6011000990139424";

    pub const DINERS: &str = "30569309025904";

    pub const JCB_1: &str = "3530111333300000";
    pub const JCB_2: &str = "3566002020360505";
}

fn today() -> YearMonth {
    YearMonth::new(2026, 6).unwrap()
}

fn store_card(key: &str) -> CardTypeDefinition {
    CardTypeDefinition::new(key, "Store Card")
        .with_patterns([CardPattern::Prefix(9999)])
        .with_gaps([4, 8, 12])
        .with_lengths([16])
        .with_code("CVV", 3)
}

fn keys(cards: &[CardTypeDefinition]) -> Vec<&str> {
    cards.iter().map(|c| c.card_type.as_str()).collect()
}

// =============================================================================
// CARD NUMBERS
// =============================================================================

#[test]
fn test_all_test_cards_validate() {
    let cases = [
        (test_cards::VISA_1, types::VISA),
        (test_cards::VISA_2, types::VISA),
        (test_cards::VISA_3, types::VISA),
        (test_cards::MC_1, types::MASTERCARD),
        (test_cards::MC_2, types::MASTERCARD),
        (test_cards::MC_2SERIES, types::MASTERCARD),
        (test_cards::AMEX_1, types::AMERICAN_EXPRESS),
        (test_cards::AMEX_2, types::AMERICAN_EXPRESS),
        (test_cards::DISCOVER_1, types::DISCOVER),
        (test_cards::DISCOVER_2, types::DISCOVER),
        (test_cards::DINERS, types::DINERS_CLUB),
        (test_cards::JCB_1, types::JCB),
        (test_cards::JCB_2, types::JCB),
    ];

    for (number, brand) in cases {
        let result = validate_card_number(number);
        assert!(result.is_valid, "{} should be valid: {:?}", number, result);
        assert!(result.is_potentially_valid);
        assert_eq!(result.card.unwrap().card_type, brand, "{}", number);
    }
}

#[test]
fn test_typing_visa_digit_by_digit() {
    let number = test_cards::VISA_1;
    // A lone "4" could still become an Elo number.
    assert!(validate_card_number("4").card.is_none());

    for end in 2..number.len() {
        let result = validate_card_number(&number[..end]);
        assert!(!result.is_valid, "{} is not complete", &number[..end]);
        assert!(result.is_potentially_valid, "{} can be completed", &number[..end]);
        assert_eq!(result.card.unwrap().card_type, types::VISA);
    }
    assert!(validate_card_number(number).is_valid);
}

#[test]
fn test_partial_visa_is_potentially_valid() {
    let result = validate_card_number("411111");
    assert!(!result.is_valid);
    assert!(result.is_potentially_valid);
    assert_eq!(result.card.unwrap().nice_type, "Visa");
}

#[test]
fn test_amex_too_long() {
    let result = validate_card_number("3782822463100051");
    assert_eq!(Verification::from(result.clone()), Verification::invalid());
    assert_eq!(result.card.unwrap().card_type, types::AMERICAN_EXPRESS);
}

#[test]
fn test_bad_checksum_at_max_length() {
    let result = validate_card_number("378282246310006");
    assert_eq!(Verification::from(result), Verification::invalid());
}

#[test]
fn test_skip_luhn_option() {
    let options = CardNumberOptions {
        skip_luhn_validation: true,
        ..Default::default()
    };
    let result = validate_card_number_with(CardTypeRegistry::builtin(), "378282246310006", &options);
    assert!(result.is_valid);
}

#[test]
fn test_max_length_option() {
    let options = CardNumberOptions {
        max_length: Some(16),
        ..Default::default()
    };
    let registry = CardTypeRegistry::builtin();

    assert!(validate_card_number_with(registry, test_cards::VISA_1, &options).is_valid);

    let result = validate_card_number_with(registry, "41111111111111111", &options);
    assert_eq!(Verification::from(result), Verification::invalid());
}

#[test]
fn test_garbage_input() {
    for input in ["abc", "4111-1111-1111-111X", "4111.1111", "0000", "!"] {
        let result = validate_card_number(input);
        assert_eq!(Verification::from(result.clone()), Verification::invalid(), "{}", input);
        assert!(result.card.is_none());
    }
}

// =============================================================================
// DETECTION
// =============================================================================

#[test]
fn test_detect_empty_returns_everything() {
    let cards = detect_card_type("");
    assert_eq!(cards.len(), 12);
    assert_eq!(cards[0].card_type, types::VISA);
    assert_eq!(cards[11].card_type, types::HIPERCARD);
}

#[test]
fn test_detect_results_are_copies() {
    let mut cards = detect_card_type("");
    cards[0].nice_type = "Changed".into();
    cards[0].gaps.clear();

    let fresh = detect_card_type("4");
    assert_eq!(fresh[0].nice_type, "Visa");
    assert_eq!(fresh[0].gaps, vec![4, 8, 12]);
}

#[test]
fn test_detect_ambiguous_prefix() {
    let cards = detect_card_type("3");
    let found = keys(&cards);
    assert!(found.contains(&types::AMERICAN_EXPRESS));
    assert!(found.contains(&types::DINERS_CLUB));
    assert!(found.contains(&types::JCB));
    assert!(!found.contains(&types::VISA));
}

#[test]
fn test_detect_narrows_as_typed() {
    assert_eq!(keys(&detect_card_type("37")), vec![types::AMERICAN_EXPRESS]);
    assert_eq!(keys(&detect_card_type("2221")), vec![types::MASTERCARD]);
    assert_eq!(keys(&detect_card_type("2200")), vec![types::MIR]);
    assert_eq!(keys(&detect_card_type("606282")), vec![types::HIPERCARD]);
}

#[test]
fn test_detect_nothing() {
    assert!(detect_card_type("0").is_empty());
    assert!(detect_card_type("9").is_empty());
}

// =============================================================================
// REGISTRY
// =============================================================================

#[test]
fn test_custom_card_lifecycle() {
    let mut registry = CardTypeRegistry::new();
    assert!(detect_card_type_with(&registry, "9999").is_empty());

    registry.add_card(store_card("store-card"));
    assert_eq!(keys(&detect_card_type_with(&registry, "9999")), vec!["store-card"]);

    let options = CardNumberOptions::default();
    let number = card_input::generate::generate_with_prefix("9999", 16).unwrap();
    assert!(validate_card_number_with(&registry, &number, &options).is_valid);

    registry.remove_card("store-card").unwrap();
    assert!(detect_card_type_with(&registry, "9999").is_empty());

    registry.reset_modifications();
    assert_eq!(registry.all_card_types(), CardTypeRegistry::builtin().all_card_types());
}

#[test]
fn test_remove_builtin_then_reset() {
    let mut registry = CardTypeRegistry::new();
    registry.remove_card(types::VISA).unwrap();
    assert!(detect_card_type_with(&registry, "4111").is_empty());
    assert_eq!(registry.all_card_types().len(), 11);

    registry.reset_modifications();
    assert_eq!(keys(&detect_card_type_with(&registry, "4111")), vec![types::VISA]);
    assert_eq!(registry.all_card_types().len(), 12);
}

#[test]
fn test_remove_unknown() {
    let mut registry = CardTypeRegistry::new();
    assert_eq!(
        registry.remove_card("nope"),
        Err(RegistryError::UnknownType("nope".into()))
    );
}

#[test]
fn test_update_builtin() {
    let mut registry = CardTypeRegistry::new();
    registry
        .update_card(
            types::VISA,
            CardTypeUpdate {
                nice_type: Some("Visa Card".into()),
                ..Default::default()
            },
        )
        .unwrap();

    assert_eq!(registry.get_type_info(types::VISA).unwrap().nice_type, "Visa Card");
    // The shared registry is untouched.
    assert_eq!(detect_card_type("4")[0].nice_type, "Visa");

    registry.reset_modifications();
    assert_eq!(registry.get_type_info(types::VISA).unwrap().nice_type, "Visa");
}

#[test]
fn test_update_type_mismatch() {
    let mut registry = CardTypeRegistry::new();
    let result = registry.update_card(
        types::VISA,
        CardTypeUpdate {
            card_type: Some(types::MASTERCARD.into()),
            ..Default::default()
        },
    );
    assert!(matches!(result, Err(RegistryError::TypeMismatch { .. })));
}

#[test]
fn test_equal_strength_tie_goes_to_earlier_brand() {
    let mut registry = CardTypeRegistry::new();
    registry.add_card(store_card("first"));
    registry.add_card(store_card("second"));

    assert_eq!(keys(&detect_card_type_with(&registry, "9999")), vec!["first"]);

    registry.change_order("second", 0).unwrap();
    assert_eq!(keys(&detect_card_type_with(&registry, "9999")), vec!["second"]);

    // Before the full prefix is typed, both remain candidates in order.
    assert_eq!(keys(&detect_card_type_with(&registry, "99")), vec!["second", "first"]);
}

#[test]
fn test_change_order_moves_brand() {
    let mut registry = CardTypeRegistry::new();
    registry.change_order(types::HIPERCARD, 0).unwrap();
    assert_eq!(registry.test_order()[0], types::HIPERCARD);

    registry.change_order(types::HIPERCARD, 100).unwrap();
    assert_eq!(registry.test_order().last().unwrap(), types::HIPERCARD);

    // Negative positions insert before the element counted from the end.
    registry.change_order(types::VISA, -1).unwrap();
    assert_eq!(registry.test_order()[10], types::VISA);
    assert_eq!(registry.test_order()[11], types::HIPERCARD);
}

// =============================================================================
// FIELD VALIDATORS
// =============================================================================

#[test]
fn test_month_boundaries() {
    let month = |value: &str| Verification::from(expiry::validate_expiration_month_at(value, today()));

    assert_eq!(month(""), Verification::incomplete());
    assert_eq!(month("0"), Verification::incomplete());
    assert_eq!(month("1"), Verification::valid());
    assert_eq!(month("01"), Verification::valid());
    assert_eq!(month("12"), Verification::valid());
    assert_eq!(month("13"), Verification::invalid());
    assert_eq!(month("00"), Verification::invalid());
    assert_eq!(month("1a"), Verification::invalid());
}

#[test]
fn test_year_boundaries() {
    let year = |value: &str| expiry::validate_expiration_year_at(value, None, today());

    assert!(year("26").is_valid);
    assert!(year("26").is_current_year);
    assert!(year("2045").is_valid);
    assert!(!year("2046").is_potentially_valid);
    assert!(!year("25").is_potentially_valid);
    assert!(!year("2").is_valid);
    assert!(year("2").is_potentially_valid);
    assert!(year("20").is_potentially_valid);
    assert!(year("202").is_potentially_valid);
    assert!(!year("20261").is_potentially_valid);
}

#[test]
fn test_date_formats() {
    let date = |value: &str| expiry::validate_expiration_date_at(value, None, today());

    for value in ["12/30", "12/2030", "12 / 2030", "12 30", "12 2030", "2030-12", "1230"] {
        let result = date(value);
        assert!(result.is_valid, "{} should be valid", value);
        assert_eq!(result.month.as_deref(), Some("12"), "{}", value);
    }

    assert!(date("06/26").is_valid);
    assert!(!date("05/26").is_potentially_valid);
    assert!(!date("13/30").is_potentially_valid);
    assert!(date("12/").is_potentially_valid);
    assert!(!date("12/").is_valid);
}

#[test]
fn test_date_from_parts() {
    let result = expiry::validate_expiration_date_at(ExpirationDateInput::parts(7, 2031), None, today());
    assert!(result.is_valid);
    assert_eq!(result.month.as_deref(), Some("7"));
    assert_eq!(result.year.as_deref(), Some("2031"));
}

#[test]
fn test_cvv_boundaries() {
    assert_eq!(cvv::validate_cvv("123"), Verification::valid());
    assert_eq!(cvv::validate_cvv("12"), Verification::incomplete());
    assert_eq!(cvv::validate_cvv(""), Verification::incomplete());
    assert_eq!(cvv::validate_cvv("1234"), Verification::invalid());
    assert_eq!(cvv::validate_cvv("12a"), Verification::invalid());
}

#[test]
fn test_cvv_follows_detected_brand() {
    let amex = validate_card_number(test_cards::AMEX_1).card.unwrap();
    assert_eq!(cvv::validate_cvv_for_card("1234", &amex), Verification::valid());
    assert_eq!(cvv::validate_cvv_for_card("123", &amex), Verification::incomplete());

    assert_eq!(cvv::validate_cvv_sizes("1234", &[3, 4]), Verification::valid());
}

#[test]
fn test_name_and_postal() {
    assert!(name::validate_cardholder_name("Ada Lovelace").is_valid);
    assert_eq!(name::validate_cardholder_name("4111 1111"), Verification::incomplete());
    assert_eq!(
        name::validate_cardholder_name(&"a".repeat(256)),
        Verification::invalid()
    );

    assert_eq!(postal::validate_postal_code("94107"), Verification::valid());
    assert_eq!(postal::validate_postal_code("9"), Verification::incomplete());
}

// =============================================================================
// FORMATTING AND MASKING
// =============================================================================

#[test]
fn test_gaps() {
    assert_eq!(add_gaps_to_card_number(test_cards::VISA_1, None), "4111 1111 1111 1111");
    assert_eq!(add_gaps_to_card_number(test_cards::AMEX_1, None), "3782 822463 10005");
    assert_eq!(add_gaps_to_card_number("4111", None), "4111");
}

#[test]
fn test_formatter_reaches_first_gap() {
    let formatter = Formatter::new("{{9999}} {{9999}}").unwrap();

    let out = formatter.format("1234", Selection::caret(4));
    assert_eq!(out.value, "1234");
    assert_eq!(out.selection, Selection::caret(4));

    let out = formatter.format("12345", Selection::caret(5));
    assert_eq!(out.value, "1234 5");
    assert_eq!(out.selection, Selection::caret(6));
}

/// Types `digits` one at a time at the caret, the way a browser field would.
fn type_digits(formatter: &Formatter, digits: &str) -> Vec<(String, usize)> {
    let mut shown = String::new();
    let mut caret = 0;
    let mut states = Vec::new();

    for digit in digits.chars() {
        let raw = formatter.unformat(&shown, Selection::caret(caret));
        let mut value = raw.value;
        value.insert(raw.selection.start, digit);
        let out = formatter.format(&value, Selection::caret(raw.selection.start + 1));
        shown = out.value;
        caret = out.selection.start;
        states.push((shown.clone(), caret));
    }

    states
}

#[test]
fn test_typing_session() {
    let formatter = Formatter::new("{{9999}} {{9999}}").unwrap();
    let states = type_digits(&formatter, "12345678");

    for (shown, caret) in &states {
        assert_eq!(*caret, shown.len(), "caret should follow {:?}", shown);
    }
    assert_eq!(states.last().unwrap().0, "1234 5678");
}

#[test]
fn test_typing_full_card_number() {
    let formatter = Formatter::new(&card_number_pattern(None)).unwrap();
    let states = type_digits(&formatter, "1234567890123456");

    for (shown, caret) in &states {
        assert_eq!(*caret, shown.len(), "caret should follow {:?}", shown);
    }
    assert_eq!(states[12], ("1234 5678 9012 3".to_string(), 16));
    assert_eq!(states[15], ("1234 5678 9012 3456".to_string(), 19));
}

#[test]
fn test_format_caret_past_every_gap() {
    let formatter = Formatter::new(&card_number_pattern(None)).unwrap();
    let out = formatter.format("1234567890123", Selection::caret(13));
    assert_eq!(out.value, "1234 5678 9012 3");
    assert_eq!(out.selection, Selection::caret(16));
}

#[test]
fn test_insert_mid_value() {
    let formatter = Formatter::new(&card_number_pattern(None)).unwrap();

    // Caret after "1234 56"
    let raw = formatter.unformat("1234 5678 9012 345", Selection::caret(7));
    assert_eq!(raw.selection, Selection::caret(6));

    let mut value = raw.value;
    value.insert(raw.selection.start, '0');
    let out = formatter.format(&value, Selection::caret(raw.selection.start + 1));
    assert_eq!(out.value, "1234 5607 8901 2345");
    assert_eq!(out.selection, Selection::caret(8));
}

#[test]
fn test_backspace_session() {
    let formatter = Formatter::new(&card_number_pattern(None)).unwrap();
    let mut shown = "4111 1".to_string();
    let mut caret = 6;

    let expected = ["4111", "411", "41", "4", ""];
    for want in expected {
        let raw = formatter.simulate_deletion(DeletionKey::Backspace, &shown, Selection::caret(caret));
        let out = formatter.format(&raw.value, raw.selection);
        shown = out.value;
        caret = out.selection.start;
        assert_eq!(shown, want);
        assert_eq!(caret, want.len());
    }
}

#[test]
fn test_brand_driven_mask() {
    let amex = detect_card_type("37");
    let formatter = Formatter::new(&card_number_pattern(amex.first())).unwrap();
    let out = formatter.format(test_cards::AMEX_1, Selection::caret(15));
    assert_eq!(out.value, "3782 822463 10005");
    assert_eq!(strip_formatting(&out.value), test_cards::AMEX_1);
    assert!(is_valid_luhn(&strip_formatting(&out.value)));
}

#[test]
fn test_expiry_mask() {
    let formatter = Formatter::new("{{99}}/{{99}}").unwrap();
    let out = formatter.format("1230", Selection::caret(4));
    assert_eq!(out.value, "12/30");
    assert_eq!(out.selection, Selection::caret(5));

    assert!(expiry::validate_expiration_date_at(out.value.as_str(), None, today()).is_valid);
}

#[test]
fn test_bad_pattern() {
    let err = Formatter::new("{{99}} {{9-9}}").unwrap_err();
    assert_eq!(
        err,
        PatternError::InvalidPlaceholder {
            character: '-',
            position: 10
        }
    );
}
