//! Shopping cart line items and the cart collection.
//!
//! A cart is an ordered list of line items. Each line is identified by its
//! [`LineKey`] (product id, size, color): adding a product whose key is
//! already present bumps that line's quantity instead of appending a new one.
//! Positions are indices in insertion order, as rendered to the visitor.

use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::{CurrencyCode, Price};
use super::product::Product;

/// Errors returned by cart mutations.
///
/// A failed mutation leaves the cart untouched.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CartError {
    /// The position does not refer to a line in the cart.
    #[error("no cart line at position {position} (cart has {len} lines)")]
    InvalidPosition { position: usize, len: usize },
    /// The requested size is not offered by the product.
    #[error("size {size} is not available for product {id}")]
    UnknownSize { id: ProductId, size: String },
    /// The requested color is not offered by the product.
    #[error("color {color} is not available for product {id}")]
    UnknownColor { id: ProductId, color: String },
}

/// Identity of a cart line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineKey<'a> {
    pub id: ProductId,
    pub size: &'a str,
    pub color: &'a str,
}

/// One cart record: a copy of the product plus the chosen options.
///
/// Serializes flat, so a persisted line carries every product field next to
/// `size`, `color` and `quantity`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineItem {
    #[serde(flatten)]
    pub product: Product,
    pub size: String,
    pub color: String,
    /// Always at least 1 while the line is in a cart.
    pub quantity: u32,
}

impl CartLineItem {
    #[must_use]
    pub fn key(&self) -> LineKey<'_> {
        LineKey {
            id: self.product.id,
            size: &self.size,
            color: &self.color,
        }
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_price(&self) -> Price {
        self.product.price.times(self.quantity)
    }
}

/// Result of adding a product to the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddToCart {
    /// A new line was appended with quantity 1.
    Appended { position: usize },
    /// An existing line with the same key was incremented.
    Merged { position: usize, quantity: u32 },
}

/// Result of adjusting a line's quantity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuantityUpdate {
    /// The line stays in the cart with the new quantity.
    Changed { quantity: u32 },
    /// The quantity dropped to zero or below and the line was deleted.
    Removed(CartLineItem),
}

/// The shopping cart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    lines: Vec<CartLineItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Line items in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLineItem] {
        &self.lines
    }

    /// Number of distinct lines (not units).
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Position of the line with this key, if any.
    #[must_use]
    pub fn position_of(&self, key: LineKey<'_>) -> Option<usize> {
        self.lines.iter().position(|line| line.key() == key)
    }

    /// Add one unit of `product` in the given size and color.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::UnknownSize`] or [`CartError::UnknownColor`] when
    /// the product does not offer the requested option.
    pub fn add(&mut self, product: &Product, size: &str, color: &str) -> Result<AddToCart, CartError> {
        if !product.offers_size(size) {
            return Err(CartError::UnknownSize {
                id: product.id,
                size: size.to_owned(),
            });
        }
        if !product.offers_color(color) {
            return Err(CartError::UnknownColor {
                id: product.id,
                color: color.to_owned(),
            });
        }

        let key = LineKey {
            id: product.id,
            size,
            color,
        };

        if let Some(position) = self.position_of(key)
            && let Some(line) = self.lines.get_mut(position)
        {
            line.quantity = line.quantity.saturating_add(1);
            return Ok(AddToCart::Merged {
                position,
                quantity: line.quantity,
            });
        }

        self.lines.push(CartLineItem {
            product: product.clone(),
            size: size.to_owned(),
            color: color.to_owned(),
            quantity: 1,
        });
        Ok(AddToCart::Appended {
            position: self.lines.len() - 1,
        })
    }

    /// Delete the line at `position`.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InvalidPosition`] if there is no such line.
    pub fn remove(&mut self, position: usize) -> Result<CartLineItem, CartError> {
        if position >= self.lines.len() {
            return Err(self.invalid_position(position));
        }
        Ok(self.lines.remove(position))
    }

    /// Add `delta` to the quantity of the line at `position`.
    ///
    /// A resulting quantity of zero or less deletes the line.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InvalidPosition`] if there is no such line.
    pub fn update_quantity(
        &mut self,
        position: usize,
        delta: i64,
    ) -> Result<QuantityUpdate, CartError> {
        let err = self.invalid_position(position);
        let line = self.lines.get_mut(position).ok_or(err)?;

        let updated = i64::from(line.quantity).saturating_add(delta);
        if updated <= 0 {
            return Ok(QuantityUpdate::Removed(self.lines.remove(position)));
        }

        line.quantity = u32::try_from(updated).unwrap_or(u32::MAX);
        Ok(QuantityUpdate::Changed {
            quantity: line.quantity,
        })
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Sum of price times quantity, rounded to cents.
    ///
    /// The currency is taken from the first line; an empty cart totals zero
    /// in the default currency.
    #[must_use]
    pub fn total(&self) -> Price {
        let currency = self
            .lines
            .first()
            .map_or_else(CurrencyCode::default, |line| line.product.price.currency_code);

        self.lines
            .iter()
            .map(CartLineItem::line_price)
            .fold(Price::zero(currency), Price::plus)
            .rounded()
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    fn invalid_position(&self, position: usize) -> CartError {
        CartError::InvalidPosition {
            position,
            len: self.lines.len(),
        }
    }
}

/// Rebuilds a cart from stored lines.
///
/// Lines with a zero quantity are dropped and lines sharing a key are merged
/// into the first occurrence, so the result always satisfies the cart
/// invariants even if the stored data did not.
impl From<Vec<CartLineItem>> for Cart {
    fn from(stored: Vec<CartLineItem>) -> Self {
        let mut cart = Self::new();
        for line in stored {
            if line.quantity == 0 {
                continue;
            }
            match cart.position_of(line.key()) {
                Some(position) => {
                    if let Some(existing) = cart.lines.get_mut(position) {
                        existing.quantity = existing.quantity.saturating_add(line.quantity);
                    }
                }
                None => cart.lines.push(line),
            }
        }
        cart
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::types::product::fixtures::{air_force, jordan};

    #[test]
    fn test_same_key_merges_into_one_line() {
        let mut cart = Cart::new();
        let product = air_force();

        assert_eq!(
            cart.add(&product, "9", "White").unwrap(),
            AddToCart::Appended { position: 0 }
        );
        assert_eq!(
            cart.add(&product, "9", "White").unwrap(),
            AddToCart::Merged {
                position: 0,
                quantity: 2
            }
        );

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.lines()[0].quantity, 2);
    }

    #[test]
    fn test_different_size_or_color_makes_new_lines() {
        let mut cart = Cart::new();
        let product = air_force();

        cart.add(&product, "9", "White").unwrap();
        cart.add(&product, "10", "White").unwrap();
        cart.add(&product, "9", "Black").unwrap();

        assert_eq!(cart.len(), 3);
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_rejects_unknown_options() {
        let mut cart = Cart::new();
        let product = air_force();

        assert_eq!(
            cart.add(&product, "15", "White"),
            Err(CartError::UnknownSize {
                id: product.id,
                size: "15".to_string()
            })
        );
        assert_eq!(
            cart.add(&product, "9", "Purple"),
            Err(CartError::UnknownColor {
                id: product.id,
                color: "Purple".to_string()
            })
        );
        assert!(cart.is_empty());
    }

    #[test]
    fn test_quantity_walkthrough() {
        let mut cart = Cart::new();
        let product = air_force();

        cart.add(&product, "9", "White").unwrap();
        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.total().display(), "$110.00");

        cart.add(&product, "9", "White").unwrap();
        assert_eq!(cart.item_count(), 2);
        assert_eq!(cart.total().display(), "$220.00");

        let update = cart.update_quantity(0, -5).unwrap();
        assert!(matches!(update, QuantityUpdate::Removed(line) if line.quantity == 2));
        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
        assert_eq!(cart.total().display(), "$0.00");
    }

    #[test]
    fn test_update_quantity_keeps_positive_lines() {
        let mut cart = Cart::new();
        cart.add(&air_force(), "9", "White").unwrap();

        assert_eq!(
            cart.update_quantity(0, 3).unwrap(),
            QuantityUpdate::Changed { quantity: 4 }
        );
        assert_eq!(
            cart.update_quantity(0, -3).unwrap(),
            QuantityUpdate::Changed { quantity: 1 }
        );
        assert!(matches!(
            cart.update_quantity(0, -1).unwrap(),
            QuantityUpdate::Removed(_)
        ));
    }

    #[test]
    fn test_invalid_position_is_a_no_op() {
        let mut cart = Cart::new();
        cart.add(&air_force(), "9", "White").unwrap();
        let before = cart.clone();

        assert_eq!(
            cart.remove(3),
            Err(CartError::InvalidPosition {
                position: 3,
                len: 1
            })
        );
        assert_eq!(
            cart.update_quantity(1, -1),
            Err(CartError::InvalidPosition {
                position: 1,
                len: 1
            })
        );
        assert_eq!(cart, before);
    }

    #[test]
    fn test_remove_keeps_insertion_order() {
        let mut cart = Cart::new();
        cart.add(&air_force(), "9", "White").unwrap();
        cart.add(&jordan(), "10", "Red").unwrap();
        cart.add(&air_force(), "8", "Black").unwrap();

        let removed = cart.remove(1).unwrap();
        assert_eq!(removed.product.id, ProductId::new(2));
        assert_eq!(cart.lines()[0].size, "9");
        assert_eq!(cart.lines()[1].size, "8");
    }

    #[test]
    fn test_count_and_total_follow_quantities() {
        let mut cart = Cart::new();
        cart.add(&air_force(), "9", "White").unwrap();
        cart.add(&jordan(), "10", "Red").unwrap();
        cart.update_quantity(1, 2).unwrap();

        let expected_count: u64 = cart.lines().iter().map(|l| u64::from(l.quantity)).sum();
        assert_eq!(cart.item_count(), expected_count);
        assert_eq!(cart.item_count(), 4);
        assert_eq!(cart.total().amount, Decimal::from(110 + 3 * 170));
        assert_eq!(cart.total().display(), "$620.00");
    }

    #[test]
    fn test_line_serializes_flat() {
        let mut cart = Cart::new();
        cart.add(&air_force(), "9", "White").unwrap();

        let json = serde_json::to_value(cart.lines()).unwrap();
        assert_eq!(json[0]["id"], 1);
        assert_eq!(json[0]["name"], "Nike Air Force 1");
        assert_eq!(json[0]["size"], "9");
        assert_eq!(json[0]["color"], "White");
        assert_eq!(json[0]["quantity"], 1);

        let lines: Vec<CartLineItem> = serde_json::from_value(json).unwrap();
        assert_eq!(Cart::from(lines), cart);
    }

    #[test]
    fn test_from_stored_lines_restores_invariants() {
        let product = air_force();
        let line = |quantity| CartLineItem {
            product: product.clone(),
            size: "9".to_string(),
            color: "White".to_string(),
            quantity,
        };

        let cart = Cart::from(vec![line(2), line(0), line(3)]);
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.lines()[0].quantity, 5);
    }
}
