//! WebAssembly bindings for card input validation and masking.
//!
//! JavaScript hands over untyped values. A validator that receives something
//! other than a string reports `{ isValid: false, isPotentiallyValid: false }`
//! instead of throwing, and detection of a non-string yields an empty list.
//! Card numbers and expiration date parts may also be numbers.
//!
//! # Usage from JavaScript
//!
//! ```javascript
//! import init, { validateCardNumber, Formatter, cardNumberPattern } from 'card_input';
//!
//! await init();
//!
//! const result = validateCardNumber("4111 1111");
//! console.log(result.isPotentiallyValid, result.cardType);  // true "visa"
//!
//! const formatter = new Formatter(cardNumberPattern("visa"));
//! const out = formatter.format("41111", 5, 5);
//! console.log(out.value, out.selectionStart);  // "4111 1" 6
//! ```

#![cfg(feature = "wasm")]

use js_sys::{Array, Object, Reflect, JSON};
use serde::de::DeserializeOwned;
use wasm_bindgen::prelude::*;

use crate::card::{CardPattern, CardTypeDefinition, CardTypeUpdate};
use crate::error::RegistryError;
use crate::expiry::{self, ExpirationDateInput};
use crate::mask::{DeletionKey, Formatted, Formatter, Selection};
use crate::registry::CardTypeRegistry;
use crate::validate::{CardNumberOptions, CardNumberVerification};
use crate::verification::Verification;

/// Converts a JS string or number to text, as `String(value)` would.
fn text_or_number(value: &JsValue) -> Option<String> {
    value
        .as_string()
        .or_else(|| value.as_f64().map(number_to_string))
}

fn number_to_string(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e21 {
        format!("{:.0}", n)
    } else {
        n.to_string()
    }
}

fn max_elapsed_year(value: Option<u32>) -> Option<u32> {
    value.filter(|&years| years > 0)
}

/// Tri-state validation result.
#[wasm_bindgen]
#[derive(Debug, Clone, Copy)]
pub struct ValidityResult {
    inner: Verification,
}

#[wasm_bindgen]
impl ValidityResult {
    /// Whether the value is complete and valid.
    #[wasm_bindgen(getter, js_name = isValid)]
    pub fn is_valid(&self) -> bool {
        self.inner.is_valid
    }

    /// Whether the value is valid or could become valid with more input.
    #[wasm_bindgen(getter, js_name = isPotentiallyValid)]
    pub fn is_potentially_valid(&self) -> bool {
        self.inner.is_potentially_valid
    }
}

impl From<Verification> for ValidityResult {
    fn from(inner: Verification) -> Self {
        Self { inner }
    }
}

/// Result of card number validation.
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct CardNumberResult {
    is_valid: bool,
    is_potentially_valid: bool,
    card: Option<CardTypeDefinition>,
}

#[wasm_bindgen]
impl CardNumberResult {
    /// Whether the value is complete and valid.
    #[wasm_bindgen(getter, js_name = isValid)]
    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// Whether the value is valid or could become valid with more input.
    #[wasm_bindgen(getter, js_name = isPotentiallyValid)]
    pub fn is_potentially_valid(&self) -> bool {
        self.is_potentially_valid
    }

    /// Type key of the detected brand, e.g. `"visa"`.
    #[wasm_bindgen(getter, js_name = cardType)]
    pub fn card_type(&self) -> Option<String> {
        self.card.as_ref().map(|c| c.card_type.clone())
    }

    /// Display name of the detected brand.
    #[wasm_bindgen(getter, js_name = niceType)]
    pub fn nice_type(&self) -> Option<String> {
        self.card.as_ref().map(|c| c.nice_type.clone())
    }

    /// Full definition of the detected brand, or `null`.
    #[wasm_bindgen(getter)]
    pub fn card(&self) -> Result<JsValue, JsValue> {
        match &self.card {
            Some(card) => card_to_js(card),
            None => Ok(JsValue::NULL),
        }
    }
}

impl From<CardNumberVerification> for CardNumberResult {
    fn from(result: CardNumberVerification) -> Self {
        Self {
            is_valid: result.is_valid,
            is_potentially_valid: result.is_potentially_valid,
            card: result.card,
        }
    }
}

impl CardNumberResult {
    fn invalid() -> Self {
        Self {
            is_valid: false,
            is_potentially_valid: false,
            card: None,
        }
    }
}

/// Result of expiration month validation.
#[wasm_bindgen]
#[derive(Debug, Clone, Copy)]
pub struct MonthResult {
    inner: expiry::MonthVerification,
}

#[wasm_bindgen]
impl MonthResult {
    /// Whether the value is complete and valid.
    #[wasm_bindgen(getter, js_name = isValid)]
    pub fn is_valid(&self) -> bool {
        self.inner.is_valid
    }

    /// Whether the value is valid or could become valid with more input.
    #[wasm_bindgen(getter, js_name = isPotentiallyValid)]
    pub fn is_potentially_valid(&self) -> bool {
        self.inner.is_potentially_valid
    }

    /// Whether the month has not yet passed in the current year.
    #[wasm_bindgen(getter, js_name = isValidForThisYear)]
    pub fn is_valid_for_this_year(&self) -> bool {
        self.inner.is_valid_for_this_year
    }
}

/// Result of expiration year validation.
#[wasm_bindgen]
#[derive(Debug, Clone, Copy)]
pub struct YearResult {
    inner: expiry::YearVerification,
}

#[wasm_bindgen]
impl YearResult {
    /// Whether the value is complete and valid.
    #[wasm_bindgen(getter, js_name = isValid)]
    pub fn is_valid(&self) -> bool {
        self.inner.is_valid
    }

    /// Whether the value is valid or could become valid with more input.
    #[wasm_bindgen(getter, js_name = isPotentiallyValid)]
    pub fn is_potentially_valid(&self) -> bool {
        self.inner.is_potentially_valid
    }

    /// Whether the year is the current year.
    #[wasm_bindgen(getter, js_name = isCurrentYear)]
    pub fn is_current_year(&self) -> bool {
        self.inner.is_current_year
    }
}

/// Result of expiration date validation.
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct DateResult {
    inner: expiry::DateVerification,
}

#[wasm_bindgen]
impl DateResult {
    /// Whether the value is complete and valid.
    #[wasm_bindgen(getter, js_name = isValid)]
    pub fn is_valid(&self) -> bool {
        self.inner.is_valid
    }

    /// Whether the value is valid or could become valid with more input.
    #[wasm_bindgen(getter, js_name = isPotentiallyValid)]
    pub fn is_potentially_valid(&self) -> bool {
        self.inner.is_potentially_valid
    }

    /// Month as typed, or `null` if it could not be parsed.
    #[wasm_bindgen(getter)]
    pub fn month(&self) -> Option<String> {
        self.inner.month.clone()
    }

    /// Year as typed, or `null` if it could not be parsed.
    #[wasm_bindgen(getter)]
    pub fn year(&self) -> Option<String> {
        self.inner.year.clone()
    }
}

/// Builds a plain JS object mirroring a card type definition.
fn card_to_js(card: &CardTypeDefinition) -> Result<JsValue, JsValue> {
    let object = Object::new();

    let patterns: Array = card
        .patterns
        .iter()
        .map(|pattern| match *pattern {
            CardPattern::Prefix(prefix) => JsValue::from(prefix),
            CardPattern::Range(min, max) => {
                Array::of2(&JsValue::from(min), &JsValue::from(max)).into()
            }
        })
        .collect();
    let gaps: Array = card.gaps.iter().map(|&g| JsValue::from(g as u32)).collect();
    let lengths: Array = card.lengths.iter().map(|&l| JsValue::from(l as u32)).collect();

    let code = Object::new();
    Reflect::set(&code, &"name".into(), &card.code.name.as_str().into())?;
    Reflect::set(&code, &"size".into(), &(card.code.size as u32).into())?;

    Reflect::set(&object, &"type".into(), &card.card_type.as_str().into())?;
    Reflect::set(&object, &"niceType".into(), &card.nice_type.as_str().into())?;
    Reflect::set(&object, &"patterns".into(), &patterns)?;
    Reflect::set(&object, &"gaps".into(), &gaps)?;
    Reflect::set(&object, &"lengths".into(), &lengths)?;
    Reflect::set(&object, &"code".into(), &code)?;
    if let Some(strength) = card.match_strength {
        Reflect::set(&object, &"matchStrength".into(), &(strength as u32).into())?;
    }

    Ok(object.into())
}

fn cards_to_js(cards: &[CardTypeDefinition]) -> Result<Array, JsValue> {
    let array = Array::new();
    for card in cards {
        array.push(&card_to_js(card)?);
    }
    Ok(array)
}

fn detect_js(registry: &CardTypeRegistry, value: &JsValue) -> Result<Array, JsValue> {
    match value.as_string() {
        Some(digits) => cards_to_js(&crate::detect::detect_card_type_with(registry, &digits)),
        None => Ok(Array::new()),
    }
}

fn validate_number_js(
    registry: &CardTypeRegistry,
    value: &JsValue,
    max_length: Option<usize>,
    luhn_validate_union_pay: bool,
) -> CardNumberResult {
    let Some(number) = text_or_number(value) else {
        return CardNumberResult::invalid();
    };

    let options = CardNumberOptions {
        max_length,
        luhn_validate_union_pay,
        skip_luhn_validation: false,
    };
    crate::validate::validate_card_number_with(registry, &number, &options).into()
}

/// Detects the possible brands of a (partial) card number.
///
/// # Example
/// ```javascript
/// detectCardType("4111").map(card => card.type);  // ["visa"]
/// ```
#[wasm_bindgen(js_name = detectCardType)]
pub fn detect_card_type(value: JsValue) -> Result<Array, JsValue> {
    detect_js(CardTypeRegistry::builtin(), &value)
}

/// Validates a card number typed so far.
#[wasm_bindgen(js_name = validateCardNumber)]
pub fn validate_card_number(
    value: JsValue,
    max_length: Option<usize>,
    luhn_validate_union_pay: Option<bool>,
) -> CardNumberResult {
    validate_number_js(
        CardTypeRegistry::builtin(),
        &value,
        max_length,
        luhn_validate_union_pay.unwrap_or(false),
    )
}

/// Validates a cardholder name.
#[wasm_bindgen(js_name = validateCardholderName)]
pub fn validate_cardholder_name(value: JsValue) -> ValidityResult {
    match value.as_string() {
        Some(name) => crate::name::validate_cardholder_name(&name).into(),
        None => Verification::invalid().into(),
    }
}

/// Validates an expiration month.
#[wasm_bindgen(js_name = validateExpirationMonth)]
pub fn validate_expiration_month(value: JsValue) -> MonthResult {
    let inner = match value.as_string() {
        Some(month) => expiry::validate_expiration_month(&month),
        None => expiry::MonthVerification::default(),
    };
    MonthResult { inner }
}

/// Validates an expiration year. `maxElapsedYear` defaults to 19.
#[wasm_bindgen(js_name = validateExpirationYear)]
pub fn validate_expiration_year(value: JsValue, max_elapsed: Option<u32>) -> YearResult {
    let inner = match value.as_string() {
        Some(year) => expiry::validate_expiration_year(&year, max_elapsed_year(max_elapsed)),
        None => expiry::YearVerification::default(),
    };
    YearResult { inner }
}

/// Validates an expiration date given as a string or as a
/// `{ month, year }` object.
///
/// # Example
/// ```javascript
/// validateExpirationDate("10/30").isValid;                  // true
/// validateExpirationDate({ month: 10, year: 2030 }).isValid; // true
/// ```
#[wasm_bindgen(js_name = validateExpirationDate)]
pub fn validate_expiration_date(
    value: JsValue,
    max_elapsed: Option<u32>,
) -> Result<DateResult, JsValue> {
    let input = if let Some(text) = value.as_string() {
        ExpirationDateInput::Text(text)
    } else if value.is_object() {
        let month = Reflect::get(&value, &"month".into())?;
        let year = Reflect::get(&value, &"year".into())?;
        ExpirationDateInput::Parts {
            month: text_or_number(&month).unwrap_or_default(),
            year: text_or_number(&year).unwrap_or_default(),
        }
    } else {
        return Ok(DateResult {
            inner: expiry::DateVerification::default(),
        });
    };

    Ok(DateResult {
        inner: expiry::validate_expiration_date(input, max_elapsed_year(max_elapsed)),
    })
}

/// Validates a security code. `size` defaults to 3.
#[wasm_bindgen(js_name = validateCvv)]
pub fn validate_cvv(value: JsValue, size: Option<usize>) -> ValidityResult {
    match value.as_string() {
        Some(cvv) => {
            let size = size.unwrap_or(crate::cvv::DEFAULT_CVV_SIZE);
            crate::cvv::validate_cvv_sizes(&cvv, &[size]).into()
        }
        None => Verification::invalid().into(),
    }
}

/// Validates a security code that may have any of `sizes` digits.
#[wasm_bindgen(js_name = validateCvvSizes)]
pub fn validate_cvv_sizes(value: JsValue, sizes: Vec<u32>) -> ValidityResult {
    let sizes: Vec<usize> = sizes.into_iter().map(|s| s as usize).collect();
    match value.as_string() {
        Some(cvv) => crate::cvv::validate_cvv_sizes(&cvv, &sizes).into(),
        None => Verification::invalid().into(),
    }
}

/// Validates a postal code. `minLength` defaults to 3.
#[wasm_bindgen(js_name = validatePostalCode)]
pub fn validate_postal_code(value: JsValue, min_length: Option<usize>) -> ValidityResult {
    let options = crate::postal::PostalCodeOptions {
        min_length: min_length.unwrap_or(crate::postal::DEFAULT_MIN_POSTAL_CODE_LENGTH),
    };
    match value.as_string() {
        Some(code) => crate::postal::validate_postal_code_with(&code, &options).into(),
        None => Verification::invalid().into(),
    }
}

/// Checks a digit string with the Luhn algorithm.
#[wasm_bindgen(js_name = isValidLuhn)]
pub fn is_valid_luhn(digits: &str) -> bool {
    crate::luhn::is_valid_luhn(digits)
}

/// Inserts spaces at the gaps of `cardType` (a type key), or of the detected
/// brand when omitted.
///
/// # Example
/// ```javascript
/// addGapsToCardNumber("378282246310005");  // "3782 822463 10005"
/// ```
#[wasm_bindgen(js_name = addGapsToCardNumber)]
pub fn add_gaps_to_card_number(value: &str, card_type: Option<String>) -> String {
    let registry = CardTypeRegistry::builtin();
    let card = card_type.and_then(|key| registry.get_type_info(&key));
    crate::format::add_gaps_to_card_number_with(registry, value, card.as_ref())
}

/// Formatter template for a brand's card numbers (`cardType` is a type key).
#[wasm_bindgen(js_name = cardNumberPattern)]
pub fn card_number_pattern(card_type: Option<String>) -> String {
    let card = card_type.and_then(|key| CardTypeRegistry::builtin().get_type_info(&key));
    crate::format::card_number_pattern(card.as_ref())
}

/// Generates a Luhn-valid test number for a built-in brand.
#[wasm_bindgen(js_name = generateCardNumber)]
pub fn generate_card_number(card_type: &str) -> Result<String, JsValue> {
    let card = CardTypeRegistry::builtin()
        .get_type_info(card_type)
        .ok_or_else(|| {
            JsValue::from_str(&format!("\"{}\" is not a recognized card type", card_type))
        })?;

    crate::generate::generate_card_number(&card)
        .ok_or_else(|| JsValue::from_str("card type has no usable pattern or length"))
}

/// A value and selection returned by [`JsFormatter`].
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct FormattedResult {
    inner: Formatted,
}

#[wasm_bindgen]
impl FormattedResult {
    /// Formatted or raw text.
    #[wasm_bindgen(getter)]
    pub fn value(&self) -> String {
        self.inner.value.clone()
    }

    /// Start of the selection in `value`.
    #[wasm_bindgen(getter, js_name = selectionStart)]
    pub fn selection_start(&self) -> usize {
        self.inner.selection.start
    }

    /// End of the selection in `value`.
    #[wasm_bindgen(getter, js_name = selectionEnd)]
    pub fn selection_end(&self) -> usize {
        self.inner.selection.end
    }
}

impl From<Formatted> for FormattedResult {
    fn from(inner: Formatted) -> Self {
        Self { inner }
    }
}

/// Pattern formatter, exported to JavaScript as `Formatter`.
#[wasm_bindgen(js_name = Formatter)]
pub struct JsFormatter {
    inner: Formatter,
}

#[wasm_bindgen(js_class = Formatter)]
impl JsFormatter {
    /// Throws if the pattern has an invalid placeholder.
    #[wasm_bindgen(constructor)]
    pub fn new(pattern: &str) -> Result<JsFormatter, JsValue> {
        Formatter::new(pattern)
            .map(|inner| Self { inner })
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Replaces the pattern. Throws and keeps the old one if it is invalid.
    #[wasm_bindgen(js_name = setPattern)]
    pub fn set_pattern(&mut self, pattern: &str) -> Result<(), JsValue> {
        self.inner
            .set_pattern(pattern)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Formats raw input, moving the selection with it.
    pub fn format(&self, value: &str, start: usize, end: usize) -> FormattedResult {
        self.inner.format(value, Selection::new(start, end)).into()
    }

    /// Strips literals and rejected characters from formatted text.
    pub fn unformat(&self, value: &str, start: usize, end: usize) -> FormattedResult {
        self.inner.unformat(value, Selection::new(start, end)).into()
    }

    /// `key` is a `KeyboardEvent.key`; anything but `"Backspace"` deletes
    /// forward.
    #[wasm_bindgen(js_name = simulateDeletion)]
    pub fn simulate_deletion(
        &self,
        key: &str,
        value: &str,
        start: usize,
        end: usize,
    ) -> FormattedResult {
        let key = match key {
            "Backspace" => DeletionKey::Backspace,
            _ => DeletionKey::Delete,
        };
        self.inner
            .simulate_deletion(key, value, Selection::new(start, end))
            .into()
    }
}

/// A mutable card type registry, exported to JavaScript as
/// `CardTypeRegistry`.
#[wasm_bindgen(js_name = CardTypeRegistry)]
pub struct JsCardTypeRegistry {
    inner: CardTypeRegistry,
}

#[wasm_bindgen(js_class = CardTypeRegistry)]
impl JsCardTypeRegistry {
    /// A registry holding only the built-in card types.
    #[wasm_bindgen(constructor)]
    pub fn new() -> JsCardTypeRegistry {
        Self {
            inner: CardTypeRegistry::new(),
        }
    }

    /// Copy of a definition, or `undefined` if the key is unknown.
    #[wasm_bindgen(js_name = getTypeInfo)]
    pub fn get_type_info(&self, key: &str) -> Result<JsValue, JsValue> {
        match self.inner.get_type_info(key) {
            Some(card) => card_to_js(&card),
            None => Ok(JsValue::UNDEFINED),
        }
    }

    /// Removes a card type. Throws if the key is unknown.
    #[wasm_bindgen(js_name = removeCard)]
    pub fn remove_card(&mut self, key: &str) -> Result<(), JsValue> {
        self.inner
            .remove_card(key)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Moves a card type to `position`, counting from the end when negative.
    #[wasm_bindgen(js_name = changeOrder)]
    pub fn change_order(&mut self, key: &str, position: i32) -> Result<(), JsValue> {
        self.inner
            .change_order(key, position as isize)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Restores the built-in order and drops custom definitions.
    #[wasm_bindgen(js_name = resetModifications)]
    pub fn reset_modifications(&mut self) {
        self.inner.reset_modifications();
    }

    /// Candidate card types for the digits typed so far.
    #[wasm_bindgen(js_name = detectCardType)]
    pub fn detect_card_type(&self, value: JsValue) -> Result<Array, JsValue> {
        detect_js(&self.inner, &value)
    }

    /// Validates a card number against this registry.
    #[wasm_bindgen(js_name = validateCardNumber)]
    pub fn validate_card_number(
        &self,
        value: JsValue,
        max_length: Option<usize>,
        luhn_validate_union_pay: Option<bool>,
    ) -> CardNumberResult {
        validate_number_js(
            &self.inner,
            &value,
            max_length,
            luhn_validate_union_pay.unwrap_or(false),
        )
    }
}

#[wasm_bindgen(js_class = CardTypeRegistry)]
impl JsCardTypeRegistry {
    /// Adds or replaces a custom definition, an object shaped like the ones
    /// `getTypeInfo` returns. Throws if it does not parse.
    #[wasm_bindgen(js_name = addCard)]
    pub fn add_card(&mut self, definition: JsValue) -> Result<(), JsValue> {
        let card: CardTypeDefinition = from_js(&definition)?;
        self.inner.add_card(card);
        Ok(())
    }

    /// Merges a partial definition over an existing card type.
    ///
    /// Throws if the key is unknown, if `partial.type` names another key, or
    /// if the object does not parse.
    #[wasm_bindgen(js_name = updateCard)]
    pub fn update_card(&mut self, key: &str, partial: JsValue) -> Result<(), JsValue> {
        let update: CardTypeUpdate = from_js(&partial)?;
        self.inner
            .update_card(key, update)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Adds custom definitions from a JSON array of objects.
    /// Returns how many were added.
    #[wasm_bindgen(js_name = addCardsFromJson)]
    pub fn add_cards_from_json(&mut self, json: &str) -> Result<usize, JsValue> {
        self.inner
            .add_cards_from_json(json)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

/// Reads a plain JS object through its JSON form.
fn from_js<T: DeserializeOwned>(value: &JsValue) -> Result<T, JsValue> {
    let json: String = JSON::stringify(value)?.into();
    parse_definition(&json).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn parse_definition<T: DeserializeOwned>(json: &str) -> Result<T, RegistryError> {
    serde_json::from_str(json).map_err(|e| RegistryError::Json(e.to_string()))
}

impl Default for JsCardTypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}
