//! # card_input
//!
//! Validation and masking for payment card input fields, built to run on
//! every keystroke.
//!
//! ## Features
//!
//! - Card brand detection from partial numbers (12 built-in brands, custom
//!   brands through an owned registry)
//! - Tri-state validators for card number, cardholder name, expiration
//!   month/year/date, CVV and postal code
//! - Pattern-driven input masking that keeps the caret in place
//! - Luhn checksum, gap insertion and test card generation
//! - Library, CLI and WASM interfaces
//!
//! ## Quick Start
//!
//! ```rust
//! use card_input::{detect_card_type, validate_card_number};
//!
//! // Complete and valid
//! let result = validate_card_number("4111 1111 1111 1111");
//! assert!(result.is_valid);
//! assert_eq!(result.card.unwrap().nice_type, "Visa");
//!
//! // Still typing: not valid yet, but could be
//! let result = validate_card_number("411111");
//! assert!(!result.is_valid);
//! assert!(result.is_potentially_valid);
//!
//! // Several brands start with a 3
//! let brands: Vec<_> = detect_card_type("3").into_iter().map(|c| c.card_type).collect();
//! assert!(brands.contains(&"american-express".to_string()));
//! assert!(brands.contains(&"jcb".to_string()));
//! ```
//!
//! ## Tri-state Results
//!
//! Every validator returns `is_valid` and `is_potentially_valid`:
//!
//! | `is_valid` | `is_potentially_valid` | Meaning |
//! |------------|------------------------|---------|
//! | `true` | `true` | Complete and acceptable |
//! | `false` | `true` | Incomplete, keep typing |
//! | `false` | `false` | Wrong, no amount of typing helps |
//!
//! ```rust
//! use card_input::{cvv, expiry, name, postal, Verification};
//!
//! assert_eq!(cvv::validate_cvv("123"), Verification::valid());
//! assert_eq!(cvv::validate_cvv("12"), Verification::incomplete());
//! assert_eq!(cvv::validate_cvv("12345"), Verification::invalid());
//!
//! assert!(name::validate_cardholder_name("Ada Lovelace").is_valid);
//! assert!(postal::validate_postal_code("94107").is_valid);
//!
//! let month = expiry::validate_expiration_month("13");
//! assert!(!month.is_potentially_valid);
//! ```
//!
//! ## Masking
//!
//! ```rust
//! use card_input::{Formatter, Selection};
//! use card_input::format::card_number_pattern;
//!
//! let formatter = Formatter::new(&card_number_pattern(None)).unwrap();
//!
//! let out = formatter.format("41111", Selection::caret(5));
//! assert_eq!(out.value, "4111 1");
//! assert_eq!(out.selection, Selection::caret(6));
//! ```
//!
//! ## Custom Brands
//!
//! ```rust
//! use card_input::{CardPattern, CardTypeDefinition, CardTypeRegistry};
//! use card_input::detect::detect_card_type_with;
//!
//! let mut registry = CardTypeRegistry::new();
//! registry.add_card(
//!     CardTypeDefinition::new("store-card", "Store Card")
//!         .with_patterns([CardPattern::Prefix(9999)])
//!         .with_gaps([4, 8])
//!         .with_lengths([12]),
//! );
//!
//! let found = detect_card_type_with(&registry, "9999");
//! assert_eq!(found[0].card_type, "store-card");
//!
//! registry.reset_modifications();
//! assert!(detect_card_type_with(&registry, "9999").is_empty());
//! ```
//!
//! ## Supported Card Brands
//!
//! | Brand | Type key | Prefix | Length | Code |
//! |-------|----------|--------|--------|------|
//! | Visa | `visa` | 4 | 16, 18, 19 | CVV 3 |
//! | Mastercard | `mastercard` | 51-55, 2221-2720 | 16 | CVC 3 |
//! | American Express | `american-express` | 34, 37 | 15 | CID 4 |
//! | Diners Club | `diners-club` | 300-305, 36, 38, 39 | 14, 16, 19 | CVV 3 |
//! | Discover | `discover` | 6011, 644-649, 65 | 16, 19 | CID 3 |
//! | JCB | `jcb` | 2131, 1800, 3528-3589 | 16-19 | CVV 3 |
//! | UnionPay | `unionpay` | 62, 81 | 14-19 | CVN 3 |
//! | Maestro | `maestro` | 493698, 50, 56-59, 6 | 12-19 | CVC 3 |
//! | Elo | `elo` | 401178, 438935, 4576, 5067, 509, 627780, 6362, 650-651, 655 | 16 | CVE 3 |
//! | Mir | `mir` | 2200-2204 | 16-19 | CVP2 3 |
//! | Hiper | `hiper` | 637095, 63737423, 63743358, 637568, 637599, 637609, 637612 | 16 | CVC 3 |
//! | Hipercard | `hipercard` | 606282 | 16 | CVC 3 |
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `json` | Load custom card definitions from JSON |
//! | `generate` | Random test card generation |
//! | `cli` | Command-line tool |
//! | `wasm` | WebAssembly support |
//! | `full` | `json` and `generate` |

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod card;
pub mod cvv;
pub mod detect;
pub mod error;
pub mod expiry;
pub mod format;
pub mod generate;
pub mod luhn;
pub mod mask;
pub mod name;
pub mod pattern;
pub mod postal;
pub mod registry;
pub mod validate;
pub mod verification;

#[cfg(feature = "wasm")]
mod wasm;

// Re-export main types at crate root
pub use card::{CardPattern, CardTypeDefinition, CardTypeUpdate, SecurityCode};
pub use error::{PatternError, RegistryError};
pub use registry::CardTypeRegistry;
pub use verification::Verification;

// Re-export the entry points used on every keystroke
pub use detect::detect_card_type;
pub use format::add_gaps_to_card_number;
pub use luhn::is_valid_luhn;
pub use mask::{DeletionKey, Formatted, Formatter, Selection};
pub use validate::{validate_card_number, CardNumberOptions, CardNumberVerification};

#[cfg(test)]
mod tests {
    use super::*;

    // Standard test card numbers from payment processors
    const VISA_16: &str = "4111111111111111";
    const MASTERCARD: &str = "5555555555554444";
    const MASTERCARD_2: &str = "2223000048400011";
    const AMEX: &str = "378282246310005";
    const AMEX_2: &str = "371449635398431";
    const DISCOVER: &str = "6011111111111117";
    const DINERS: &str = "30569309025904";
    const JCB: &str = "3530111333300000";
    const MIR: &str = "2200000000000004";

    fn brand_of(number: &str) -> String {
        let result = validate_card_number(number);
        assert!(result.is_valid, "{} should be valid", number);
        result.card.unwrap().card_type
    }

    #[test]
    fn test_visa_validation() {
        assert_eq!(brand_of(VISA_16), card::types::VISA);
    }

    #[test]
    fn test_mastercard_validation() {
        assert_eq!(brand_of(MASTERCARD), card::types::MASTERCARD);
        assert_eq!(brand_of(MASTERCARD_2), card::types::MASTERCARD);
    }

    #[test]
    fn test_amex_validation() {
        assert_eq!(brand_of(AMEX), card::types::AMERICAN_EXPRESS);
        assert_eq!(brand_of(AMEX_2), card::types::AMERICAN_EXPRESS);
    }

    #[test]
    fn test_discover_validation() {
        assert_eq!(brand_of(DISCOVER), card::types::DISCOVER);
    }

    #[test]
    fn test_diners_validation() {
        assert_eq!(brand_of(DINERS), card::types::DINERS_CLUB);
    }

    #[test]
    fn test_jcb_validation() {
        assert_eq!(brand_of(JCB), card::types::JCB);
    }

    #[test]
    fn test_mir_validation() {
        assert_eq!(brand_of(MIR), card::types::MIR);
    }

    #[test]
    fn test_formatted_input() {
        assert!(validate_card_number("4111-1111-1111-1111").is_valid);
        assert!(validate_card_number("4111 1111 1111 1111").is_valid);
        assert!(validate_card_number("4111-1111 1111-1111").is_valid);
    }

    #[test]
    fn test_invalid_character() {
        let result = validate_card_number("4111-1111-1111-111X");
        assert_eq!(Verification::from(result), Verification::invalid());
    }

    #[test]
    fn test_is_valid_luhn() {
        assert!(is_valid_luhn(VISA_16));
        assert!(!is_valid_luhn("4111111111111112"));
        assert!(!is_valid_luhn(""));
    }

    #[test]
    fn test_gaps_and_mask_agree() {
        let formatter = Formatter::new(&format::card_number_pattern(None)).unwrap();
        let masked = formatter.format(VISA_16, Selection::caret(16));
        assert_eq!(masked.value, add_gaps_to_card_number(VISA_16, None));
    }

    #[test]
    fn test_thread_safety() {
        // Ensure types are Send + Sync
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CardTypeDefinition>();
        assert_send_sync::<CardTypeRegistry>();
        assert_send_sync::<Formatter>();
        assert_send_sync::<Verification>();
        assert_send_sync::<PatternError>();
        assert_send_sync::<RegistryError>();
    }
}
