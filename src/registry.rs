//! Card type registry.
//!
//! The registry owns the evaluation order of card brands and any custom
//! definitions layered over the built-ins. It is a plain value: whoever
//! composes the engine owns it, and mutation requires `&mut`. Sharing one
//! registry between threads means wrapping it in a lock of the caller's
//! choosing.
//!
//! # Example
//!
//! ```
//! use card_input::{CardPattern, CardTypeDefinition, CardTypeRegistry};
//!
//! let mut registry = CardTypeRegistry::new();
//! registry.add_card(
//!     CardTypeDefinition::new("store-card", "Store Card")
//!         .with_patterns([CardPattern::Prefix(9999)])
//!         .with_gaps([4, 8, 12])
//!         .with_lengths([16]),
//! );
//! assert_eq!(registry.test_order().last().unwrap(), "store-card");
//!
//! registry.reset_modifications();
//! assert!(registry.get_type_info("store-card").is_none());
//! ```

use std::collections::HashMap;
use std::sync::OnceLock;

use tracing::debug;

use crate::card::{builtin_card_types, CardTypeDefinition, CardTypeUpdate};
use crate::error::RegistryError;

/// Ordered set of card brands used for detection.
#[derive(Debug, Clone)]
pub struct CardTypeRegistry {
    builtins: Vec<CardTypeDefinition>,
    original_order: Vec<String>,
    test_order: Vec<String>,
    custom_cards: HashMap<String, CardTypeDefinition>,
}

impl Default for CardTypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CardTypeRegistry {
    /// Creates a registry holding the built-in brands in their default order.
    pub fn new() -> Self {
        let builtins = builtin_card_types();
        let original_order: Vec<String> =
            builtins.iter().map(|card| card.card_type.clone()).collect();

        Self {
            builtins,
            test_order: original_order.clone(),
            original_order,
            custom_cards: HashMap::new(),
        }
    }

    /// A shared, unmodified registry backing the convenience functions.
    pub fn builtin() -> &'static CardTypeRegistry {
        static BUILTIN: OnceLock<CardTypeRegistry> = OnceLock::new();
        BUILTIN.get_or_init(CardTypeRegistry::new)
    }

    /// Current evaluation order, by type key.
    #[inline]
    pub fn test_order(&self) -> &[String] {
        &self.test_order
    }

    /// Returns true if `key` is in the evaluation order.
    #[inline]
    pub fn contains(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// Looks up a definition by key, custom definitions first.
    fn find(&self, key: &str) -> Option<&CardTypeDefinition> {
        self.custom_cards
            .get(key)
            .or_else(|| self.builtins.iter().find(|card| card.card_type == key))
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.test_order.iter().position(|k| k == key)
    }

    /// Returns a copy of the definition registered under `key`.
    ///
    /// Custom definitions shadow built-ins with the same key.
    pub fn get_type_info(&self, key: &str) -> Option<CardTypeDefinition> {
        self.find(key).cloned()
    }

    /// Copies of every definition in evaluation order.
    pub fn all_card_types(&self) -> Vec<CardTypeDefinition> {
        self.iter().cloned().collect()
    }

    /// Iterates over the registered definitions in evaluation order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = &CardTypeDefinition> + '_ {
        self.test_order.iter().filter_map(|key| self.find(key))
    }

    /// Stores a custom definition, appending its key to the evaluation order
    /// unless the key is already present.
    pub fn add_card(&mut self, card: CardTypeDefinition) {
        let key = card.card_type.clone();
        if !self.contains(&key) {
            self.test_order.push(key.clone());
        }
        debug!(card_type = %key, "added card type");
        self.custom_cards.insert(key, card);
    }

    /// Merges `update` over a copy of the existing definition for `key`.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::UnknownType`] if `key` is neither built-in nor custom
    /// - [`RegistryError::TypeMismatch`] if the update names a different key
    pub fn update_card(&mut self, key: &str, update: CardTypeUpdate) -> Result<(), RegistryError> {
        let existing = self
            .get_type_info(key)
            .ok_or_else(|| RegistryError::UnknownType(key.to_string()))?;

        if let Some(found) = &update.card_type {
            if found != key {
                return Err(RegistryError::TypeMismatch {
                    expected: key.to_string(),
                    found: found.clone(),
                });
            }
        }

        let updated = update.apply(existing);
        debug!(card_type = %key, "updated card type");
        self.custom_cards.insert(key.to_string(), updated);
        Ok(())
    }

    /// Removes `key` from the evaluation order.
    ///
    /// # Errors
    ///
    /// [`RegistryError::UnknownType`] if `key` is not in the evaluation order.
    pub fn remove_card(&mut self, key: &str) -> Result<(), RegistryError> {
        let position = self
            .position(key)
            .ok_or_else(|| RegistryError::UnknownType(key.to_string()))?;

        self.test_order.remove(position);
        debug!(card_type = %key, "removed card type");
        Ok(())
    }

    /// Moves `key` to `position` in the evaluation order.
    ///
    /// Negative positions count from the end; out-of-range positions clamp to
    /// the ends of the list.
    ///
    /// # Errors
    ///
    /// [`RegistryError::UnknownType`] if `key` is not in the evaluation order.
    pub fn change_order(&mut self, key: &str, position: isize) -> Result<(), RegistryError> {
        let current = self
            .position(key)
            .ok_or_else(|| RegistryError::UnknownType(key.to_string()))?;

        let name = self.test_order.remove(current);
        let len = self.test_order.len() as isize;
        let index = if position < 0 {
            (len + position).max(0)
        } else {
            position.min(len)
        };
        self.test_order.insert(index as usize, name);
        debug!(card_type = %key, position = index, "changed card order");
        Ok(())
    }

    /// Restores the built-in order and drops all custom definitions.
    pub fn reset_modifications(&mut self) {
        self.test_order = self.original_order.clone();
        self.custom_cards.clear();
        debug!("reset card type registry");
    }

    /// Adds every definition found in a JSON array.
    ///
    /// Field names follow the camelCase layout (`type`, `niceType`,
    /// `patterns`, `gaps`, `lengths`, `code`); a range pattern is a two
    /// element array.
    ///
    /// ```
    /// use card_input::CardTypeRegistry;
    ///
    /// let mut registry = CardTypeRegistry::new();
    /// let added = registry
    ///     .add_cards_from_json(
    ///         r#"[{"type": "store-card", "niceType": "Store Card",
    ///              "patterns": [9999, [8880, 8889]], "gaps": [4, 8, 12],
    ///              "lengths": [16], "code": {"name": "CVV", "size": 3}}]"#,
    ///     )
    ///     .unwrap();
    /// assert_eq!(added, 1);
    /// assert!(registry.contains("store-card"));
    /// ```
    #[cfg(feature = "json")]
    pub fn add_cards_from_json(&mut self, json: &str) -> Result<usize, RegistryError> {
        let cards: Vec<CardTypeDefinition> =
            serde_json::from_str(json).map_err(|e| RegistryError::Json(e.to_string()))?;
        let count = cards.len();
        for card in cards {
            self.add_card(card);
        }
        Ok(count)
    }
}
