//! Cart contents and pure cart mutations.
//!
//! A [`Cart`] maps an item name to a [`CartLine`]. Lines iterate in insertion
//! order so rendered tables stay stable, but order carries no meaning.
//!
//! ## Invariants
//!
//! - Every line has `quantity >= 1`; a line is removed rather than kept at 0.
//! - Unit prices are never negative.
//! - Re-adding an existing name bumps its quantity and keeps the stored price.
//!
//! ## Persisted form
//!
//! The cart serializes as a JSON object keyed by name:
//!
//! ```
//! use rust_decimal::Decimal;
//! use shopcart_core::Cart;
//!
//! let mut cart = Cart::new();
//! cart.add_item("Widget", Decimal::new(999, 2)).unwrap();
//! assert_eq!(cart.to_json().unwrap(), r#"{"Widget":{"price":"9.99","quantity":1}}"#);
//! ```

use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors produced by cart mutations and by decoding a persisted cart.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CartError {
    /// A unit price below zero was supplied.
    #[error("price for {name} cannot be negative (got {price})")]
    NegativePrice {
        /// Item name.
        name: String,
        /// Rejected price.
        price: Decimal,
    },
    /// Incrementing would overflow the quantity counter.
    #[error("quantity for {0} would overflow")]
    QuantityOverflow(String),
    /// Adding the item would push the cart total past the largest representable amount.
    #[error("adding {0} would overflow the cart total")]
    TotalOverflow(String),
    /// A persisted line breaks a cart invariant.
    #[error("invalid line {name}: {reason}")]
    InvalidLine {
        /// Item name.
        name: String,
        /// What was wrong with it.
        reason: &'static str,
    },
    /// The persisted blob is not a valid cart document.
    #[error("malformed cart: {0}")]
    Malformed(String),
}

/// One item's price and quantity. The name lives in the owning [`Cart`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Price of a single unit.
    #[serde(rename = "price")]
    pub unit_price: Decimal,
    /// Units in the cart, always at least 1.
    pub quantity: u32,
}

impl CartLine {
    /// `unit_price * quantity`, saturating at [`Decimal::MAX`].
    ///
    /// A validated cart never saturates; see [`CartLine::checked_line_total`].
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.checked_line_total().unwrap_or(Decimal::MAX)
    }

    /// `unit_price * quantity`, or `None` if it does not fit in a `Decimal`.
    #[must_use]
    pub fn checked_line_total(&self) -> Option<Decimal> {
        self.unit_price.checked_mul(Decimal::from(self.quantity))
    }
}

/// The cart: item name -> line, insertion ordered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: IndexMap<String, CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of `name`.
    ///
    /// If the item is already present its quantity is incremented and the
    /// stored unit price is left untouched; otherwise a new line with
    /// quantity 1 is appended. Returns the line's new quantity.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::NegativePrice`] for a price below zero,
    /// [`CartError::QuantityOverflow`] if the quantity would exceed `u32::MAX`
    /// and [`CartError::TotalOverflow`] if the cart total would no longer fit
    /// in a `Decimal`. The cart is unchanged on error.
    pub fn add_item(&mut self, name: &str, unit_price: Decimal) -> Result<u32, CartError> {
        if unit_price < Decimal::ZERO {
            return Err(CartError::NegativePrice {
                name: name.to_owned(),
                price: unit_price,
            });
        }

        let added_price = self.lines.get(name).map_or(unit_price, |line| line.unit_price);
        self.checked_total()
            .and_then(|total| total.checked_add(added_price))
            .ok_or_else(|| CartError::TotalOverflow(name.to_owned()))?;

        if let Some(line) = self.lines.get_mut(name) {
            line.quantity = line
                .quantity
                .checked_add(1)
                .ok_or_else(|| CartError::QuantityOverflow(name.to_owned()))?;
            return Ok(line.quantity);
        }

        self.lines.insert(
            name.to_owned(),
            CartLine {
                unit_price,
                quantity: 1,
            },
        );
        Ok(1)
    }

    /// Remove the whole line for `name`, returning it if it existed.
    ///
    /// Removing an absent name is a no-op.
    pub fn remove_item(&mut self, name: &str) -> Option<CartLine> {
        self.lines.shift_remove(name)
    }

    /// Sum of `unit_price * quantity` over all lines; zero when empty.
    ///
    /// Saturates at [`Decimal::MAX`]. Carts built through [`Cart::add_item`]
    /// or [`Cart::from_json`] always fit.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.checked_total().unwrap_or(Decimal::MAX)
    }

    /// Sum of line totals, or `None` if any step overflows.
    #[must_use]
    pub fn checked_total(&self) -> Option<Decimal> {
        self.lines.values().try_fold(Decimal::ZERO, |total, line| {
            total.checked_add(line.checked_line_total()?)
        })
    }

    /// Sum of quantities over all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.lines.values().map(|line| u64::from(line.quantity)).sum()
    }

    /// Look up a line by item name.
    #[must_use]
    pub fn line(&self, name: &str) -> Option<&CartLine> {
        self.lines.get(name)
    }

    /// Iterate `(name, line)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CartLine)> {
        self.lines.iter().map(|(name, line)| (name.as_str(), line))
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Drop every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Check every line against the cart invariants.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InvalidLine`] for the first line with a zero
    /// quantity or a negative price, or for the line at which the running
    /// total overflows.
    pub fn validate(&self) -> Result<(), CartError> {
        for (name, line) in &self.lines {
            if line.quantity == 0 {
                return Err(CartError::InvalidLine {
                    name: name.clone(),
                    reason: "quantity must be at least 1",
                });
            }
            if line.unit_price < Decimal::ZERO {
                return Err(CartError::InvalidLine {
                    name: name.clone(),
                    reason: "price cannot be negative",
                });
            }
        }

        let mut total = Decimal::ZERO;
        for (name, line) in &self.lines {
            total = line
                .checked_line_total()
                .and_then(|line_total| total.checked_add(line_total))
                .ok_or_else(|| CartError::InvalidLine {
                    name: name.clone(),
                    reason: "total does not fit in a decimal",
                })?;
        }
        Ok(())
    }

    /// Serialize to the persisted JSON form.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Malformed`] if serialization fails.
    pub fn to_json(&self) -> Result<String, CartError> {
        serde_json::to_string(self).map_err(|e| CartError::Malformed(e.to_string()))
    }

    /// Decode and validate a persisted cart.
    ///
    /// Prices may be stored as JSON strings or numbers.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Malformed`] if the blob does not parse and
    /// [`CartError::InvalidLine`] if a decoded line breaks an invariant.
    pub fn from_json(raw: &str) -> Result<Self, CartError> {
        let cart: Self =
            serde_json::from_str(raw).map_err(|e| CartError::Malformed(e.to_string()))?;
        cart.validate()?;
        Ok(cart)
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = (&'a String, &'a CartLine);
    type IntoIter = indexmap::map::Iter<'a, String, CartLine>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}
