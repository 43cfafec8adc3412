//! The wishlist: saved products keyed by product id.

use super::id::ProductId;
use super::product::Product;

/// What a [`Wishlist::toggle`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WishlistToggle {
    Added,
    Removed,
}

/// Saved products in the order they were added, at most one per id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Wishlist {
    entries: Vec<Product>,
}

impl Wishlist {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    #[must_use]
    pub fn entries(&self) -> &[Product] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: ProductId) -> bool {
        self.entries.iter().any(|entry| entry.id == id)
    }

    /// Save `product` unless it is already saved.
    ///
    /// Returns `true` if the product was added.
    pub fn insert(&mut self, product: &Product) -> bool {
        if self.contains(product.id) {
            return false;
        }
        self.entries.push(product.clone());
        true
    }

    /// Remove the entry with `id`, returning it if it was present.
    pub fn remove(&mut self, id: ProductId) -> Option<Product> {
        let position = self.entries.iter().position(|entry| entry.id == id)?;
        Some(self.entries.remove(position))
    }

    /// Add `product` if absent, otherwise remove it.
    pub fn toggle(&mut self, product: &Product) -> WishlistToggle {
        if self.remove(product.id).is_some() {
            WishlistToggle::Removed
        } else {
            self.entries.push(product.clone());
            WishlistToggle::Added
        }
    }
}

/// Rebuilds a wishlist from stored entries, keeping the first entry per id.
impl From<Vec<Product>> for Wishlist {
    fn from(stored: Vec<Product>) -> Self {
        let mut wishlist = Self::new();
        for product in &stored {
            wishlist.insert(product);
        }
        wishlist
    }
}
