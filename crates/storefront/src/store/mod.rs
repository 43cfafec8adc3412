//! Cart and wishlist store.
//!
//! [`ShopStore`] owns a visitor's cart and wishlist, applies mutations to
//! them and writes both collections back to its [`Storage`] after every
//! change. Route handlers load one store per request, mutate it through the
//! operations below and render from its accessors; they never touch the
//! collections directly.
//!
//! # Persistence
//!
//! The cart is stored as a JSON array of line items under
//! [`session_keys::CART`], the wishlist as a JSON array of products under
//! [`session_keys::WISHLIST`]. A mutation writes only the collection it
//! changed. Missing or unreadable values load as empty collections.
//!
//! A store is a snapshot taken at load time; callers must not run two
//! mutating requests for the same visitor at once (see
//! [`crate::middleware::session_lock`]).

pub mod preferences;
pub mod storage;

use serde::de::DeserializeOwned;
use sole_store_core::{
    AddToCart, Cart, CartError, CartLineItem, Notice, Price, Product, ProductId, QuantityUpdate,
    Wishlist, WishlistToggle,
};

use crate::models::session_keys;

pub use storage::{MemoryStorage, SessionStorage, Storage, StorageError};

/// Errors returned by store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Checkout was requested with nothing in the cart.
    #[error("cart is empty")]
    EmptyCart,

    /// The cart rejected the mutation; nothing was changed or persisted.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// The snapshot could not be encoded.
    #[error("failed to encode store snapshot: {0}")]
    Encode(#[from] serde_json::Error),

    /// The storage backend failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Which part of the page a mutation invalidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderTarget {
    Cart,
    Wishlist,
}

impl RenderTarget {
    /// Client-side event name announcing the change.
    #[must_use]
    pub const fn event_name(&self) -> &'static str {
        match self {
            Self::Cart => "cart-updated",
            Self::Wishlist => "wishlist-updated",
        }
    }
}

/// What a successful mutation did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    AddedToCart(AddToCart),
    RemovedFromCart(CartLineItem),
    QuantityChanged { position: usize, quantity: u32 },
    AddedToWishlist(ProductId),
    AlreadyInWishlist(ProductId),
    RemovedFromWishlist(ProductId),
}

impl StoreEvent {
    /// The notice shown to the visitor for this event.
    #[must_use]
    pub fn notice(&self) -> Notice {
        match self {
            Self::AddedToCart(_) => Notice::info("Product added to cart!"),
            Self::RemovedFromCart(_) => Notice::info("Product removed from cart!"),
            Self::QuantityChanged { .. } => Notice::info("Cart updated"),
            Self::AddedToWishlist(_) => Notice::info("Added to wishlist!"),
            Self::AlreadyInWishlist(_) => Notice::info("Already in your wishlist"),
            Self::RemovedFromWishlist(_) => Notice::info("Removed from wishlist!"),
        }
    }

    #[must_use]
    pub const fn render_target(&self) -> RenderTarget {
        match self {
            Self::AddedToCart(_) | Self::RemovedFromCart(_) | Self::QuantityChanged { .. } => {
                RenderTarget::Cart
            }
            Self::AddedToWishlist(_) | Self::AlreadyInWishlist(_) | Self::RemovedFromWishlist(_) => {
                RenderTarget::Wishlist
            }
        }
    }
}

/// A visitor's cart and wishlist, bound to the storage they persist to.
#[derive(Debug)]
pub struct ShopStore<S> {
    storage: S,
    cart: Cart,
    wishlist: Wishlist,
}

impl<S: Storage> ShopStore<S> {
    /// Load both collections from `storage`.
    ///
    /// Never fails: an absent, malformed or unreadable value yields an empty
    /// collection and a warning in the log.
    pub async fn load(storage: S) -> Self {
        let lines: Vec<CartLineItem> = read_snapshot(&storage, session_keys::CART).await;
        let entries: Vec<Product> = read_snapshot(&storage, session_keys::WISHLIST).await;

        Self {
            storage,
            cart: Cart::from(lines),
            wishlist: Wishlist::from(entries),
        }
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    #[must_use]
    pub const fn wishlist(&self) -> &Wishlist {
        &self.wishlist
    }

    /// Total units in the cart.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.cart.item_count()
    }

    /// Cart total rounded to cents.
    #[must_use]
    pub fn total(&self) -> Price {
        self.cart.total()
    }

    #[must_use]
    pub fn wishlist_count(&self) -> usize {
        self.wishlist.len()
    }

    #[must_use]
    pub fn is_wishlisted(&self, id: ProductId) -> bool {
        self.wishlist.contains(id)
    }

    /// Add one unit of `product`.
    ///
    /// `size` defaults to the product's default size and `color` to its first
    /// color.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Cart`] if the product does not offer the size or
    /// color, or [`StoreError::Storage`] if persisting fails.
    pub async fn add_to_cart(
        &mut self,
        product: &Product,
        size: Option<&str>,
        color: Option<&str>,
    ) -> Result<StoreEvent, StoreError> {
        let size = size.unwrap_or_else(|| product.default_size());
        let color = color.unwrap_or_else(|| product.default_color());

        let added = self.cart.add(product, size, color)?;
        tracing::debug!(product_id = %product.id, size, color, ?added, "Added to cart");

        self.persist_cart().await?;
        Ok(StoreEvent::AddedToCart(added))
    }

    /// Delete the cart line at `position`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Cart`] for an out-of-range position (the cart is
    /// left as is), or [`StoreError::Storage`] if persisting fails.
    pub async fn remove_from_cart(&mut self, position: usize) -> Result<StoreEvent, StoreError> {
        let removed = self.cart.remove(position)?;
        tracing::debug!(product_id = %removed.product.id, position, "Removed from cart");

        self.persist_cart().await?;
        Ok(StoreEvent::RemovedFromCart(removed))
    }

    /// Add `delta` to the quantity of the line at `position`, deleting the
    /// line when the quantity reaches zero or below.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Cart`] for an out-of-range position (the cart is
    /// left as is), or [`StoreError::Storage`] if persisting fails.
    pub async fn update_quantity(
        &mut self,
        position: usize,
        delta: i64,
    ) -> Result<StoreEvent, StoreError> {
        let event = match self.cart.update_quantity(position, delta)? {
            QuantityUpdate::Changed { quantity } => StoreEvent::QuantityChanged { position, quantity },
            QuantityUpdate::Removed(line) => StoreEvent::RemovedFromCart(line),
        };
        tracing::debug!(position, delta, "Updated cart quantity");

        self.persist_cart().await?;
        Ok(event)
    }

    /// Add `product` to the wishlist, or remove it if it is already there.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Storage`] if persisting fails.
    pub async fn add_to_wishlist(&mut self, product: &Product) -> Result<StoreEvent, StoreError> {
        let event = match self.wishlist.toggle(product) {
            WishlistToggle::Added => StoreEvent::AddedToWishlist(product.id),
            WishlistToggle::Removed => StoreEvent::RemovedFromWishlist(product.id),
        };

        self.persist_wishlist().await?;
        Ok(event)
    }

    /// Add `product` to the wishlist if it is not there yet.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Storage`] if persisting fails.
    pub async fn insert_into_wishlist(
        &mut self,
        product: &Product,
    ) -> Result<StoreEvent, StoreError> {
        let event = if self.wishlist.insert(product) {
            StoreEvent::AddedToWishlist(product.id)
        } else {
            StoreEvent::AlreadyInWishlist(product.id)
        };

        self.persist_wishlist().await?;
        Ok(event)
    }

    /// Remove the wishlist entry for `id`. Removing an absent id is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Storage`] if persisting fails.
    pub async fn remove_from_wishlist(&mut self, id: ProductId) -> Result<StoreEvent, StoreError> {
        if self.wishlist.remove(id).is_none() {
            tracing::debug!(product_id = %id, "Wishlist removal of absent product");
        }

        self.persist_wishlist().await?;
        Ok(StoreEvent::RemovedFromWishlist(id))
    }

    /// Check the cart can proceed to checkout.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::EmptyCart`] when the cart has no lines.
    pub fn checkout(&self) -> Result<Notice, StoreError> {
        if self.cart.is_empty() {
            return Err(StoreError::EmptyCart);
        }
        Ok(Notice::success("Proceeding to checkout..."))
    }

    /// Write the cart snapshot. The wishlist key is left untouched.
    async fn persist_cart(&self) -> Result<(), StoreError> {
        let cart = serde_json::to_string(self.cart.lines())?;
        self.storage.set(session_keys::CART, cart).await?;
        Ok(())
    }

    /// Write the wishlist snapshot. The cart key is left untouched.
    async fn persist_wishlist(&self) -> Result<(), StoreError> {
        let wishlist = serde_json::to_string(self.wishlist.entries())?;
        self.storage.set(session_keys::WISHLIST, wishlist).await?;
        Ok(())
    }
}

/// Read and decode a JSON array stored under `key`, falling back to empty.
async fn read_snapshot<S, T>(storage: &S, key: &str) -> Vec<T>
where
    S: Storage,
    T: DeserializeOwned,
{
    let raw = match storage.get(key).await {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            tracing::warn!(key, error = %e, "Failed to read stored state, starting empty");
            return Vec::new();
        }
    };

    serde_json::from_str(&raw).unwrap_or_else(|e| {
        tracing::warn!(key, error = %e, "Discarding malformed stored state");
        Vec::new()
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use rust_decimal::Decimal;
    use sole_store_core::{Price, Severity};

    use super::*;

    fn product(id: i32, name: &str, price: i64, colors: &[&str]) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_string(),
            price: Price::usd(Decimal::from(price)),
            image: format!("./img/{id}.png"),
            category: "Test".to_string(),
            description: String::new(),
            colors: colors.iter().map(|c| (*c).to_string()).collect(),
            sizes: ["7", "8", "9", "10"].iter().map(|s| (*s).to_string()).collect(),
        }
    }

    fn air_force() -> Product {
        product(1, "Nike Air Force 1", 110, &["White", "Black"])
    }

    fn jordan() -> Product {
        product(2, "Nike Air Jordan", 170, &["Red", "Black"])
    }

    #[tokio::test]
    async fn test_cart_walkthrough() {
        let mut store = ShopStore::load(MemoryStorage::new()).await;
        let product = air_force();

        store
            .add_to_cart(&product, Some("9"), Some("White"))
            .await
            .unwrap();
        assert_eq!(store.item_count(), 1);
        assert_eq!(store.total().display(), "$110.00");

        store
            .add_to_cart(&product, Some("9"), Some("White"))
            .await
            .unwrap();
        assert_eq!(store.item_count(), 2);
        assert_eq!(store.total().display(), "$220.00");
        assert_eq!(store.cart().len(), 1);

        let event = store.update_quantity(0, -5).await.unwrap();
        assert!(matches!(event, StoreEvent::RemovedFromCart(_)));
        assert!(store.cart().is_empty());
        assert_eq!(store.item_count(), 0);
        assert_eq!(store.total().display(), "$0.00");
    }

    #[tokio::test]
    async fn test_add_defaults_to_size_nine_and_first_color() {
        let mut store = ShopStore::load(MemoryStorage::new()).await;
        let event = store.add_to_cart(&jordan(), None, None).await.unwrap();

        assert_eq!(event, StoreEvent::AddedToCart(AddToCart::Appended { position: 0 }));
        let line = &store.cart().lines()[0];
        assert_eq!(line.size, "9");
        assert_eq!(line.color, "Red");
        assert_eq!(event.notice(), Notice::info("Product added to cart!"));
        assert_eq!(event.render_target(), RenderTarget::Cart);
    }

    #[tokio::test]
    async fn test_wishlist_toggle() {
        let mut store = ShopStore::load(MemoryStorage::new()).await;

        let event = store.add_to_wishlist(&jordan()).await.unwrap();
        assert_eq!(event, StoreEvent::AddedToWishlist(ProductId::new(2)));
        assert_eq!(store.wishlist_count(), 1);
        assert!(store.is_wishlisted(ProductId::new(2)));

        let event = store.add_to_wishlist(&jordan()).await.unwrap();
        assert_eq!(event, StoreEvent::RemovedFromWishlist(ProductId::new(2)));
        assert_eq!(event.notice().message, "Removed from wishlist!");
        assert_eq!(store.wishlist_count(), 0);
    }

    #[tokio::test]
    async fn test_insert_and_remove_wishlist() {
        let mut store = ShopStore::load(MemoryStorage::new()).await;

        store.insert_into_wishlist(&air_force()).await.unwrap();
        let again = store.insert_into_wishlist(&air_force()).await.unwrap();
        assert_eq!(again, StoreEvent::AlreadyInWishlist(ProductId::new(1)));
        assert_eq!(store.wishlist_count(), 1);

        store.remove_from_wishlist(ProductId::new(42)).await.unwrap();
        assert_eq!(store.wishlist_count(), 1);

        store.remove_from_wishlist(ProductId::new(1)).await.unwrap();
        assert_eq!(store.wishlist_count(), 0);
    }

    #[tokio::test]
    async fn test_round_trip_through_storage() {
        let storage = MemoryStorage::new();
        let mut store = ShopStore::load(storage.clone()).await;

        store.add_to_cart(&air_force(), Some("9"), Some("White")).await.unwrap();
        store.add_to_cart(&air_force(), Some("9"), Some("White")).await.unwrap();
        store.add_to_cart(&jordan(), Some("10"), Some("Black")).await.unwrap();
        store.add_to_wishlist(&jordan()).await.unwrap();

        let expected_cart = store.cart().clone();
        let expected_wishlist = store.wishlist().clone();
        drop(store);

        let reloaded = ShopStore::load(storage).await;
        assert_eq!(reloaded.cart(), &expected_cart);
        assert_eq!(reloaded.wishlist(), &expected_wishlist);
        assert_eq!(reloaded.item_count(), 3);
        assert_eq!(reloaded.total().display(), "$390.00");
    }

    #[tokio::test]
    async fn test_every_mutation_overwrites_snapshot() {
        let storage = MemoryStorage::new();
        let mut store = ShopStore::load(storage.clone()).await;

        store.add_to_cart(&air_force(), None, None).await.unwrap();
        let written = storage.get(session_keys::CART).await.unwrap().unwrap();
        let lines: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(lines[0]["quantity"], 1);
        assert_eq!(lines[0]["name"], "Nike Air Force 1");
        assert_eq!(lines[0]["size"], "9");
        // Money is stored as a decimal string with its currency, never a float.
        assert_eq!(lines[0]["price"]["amount"], "110");
        assert_eq!(lines[0]["price"]["currency_code"], "USD");

        store.remove_from_cart(0).await.unwrap();
        assert_eq!(
            storage.get(session_keys::CART).await.unwrap().as_deref(),
            Some("[]")
        );
        assert_eq!(storage.get(session_keys::WISHLIST).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_stale_store_keeps_other_collection() {
        let storage = MemoryStorage::new();
        let mut cart_store = ShopStore::load(storage.clone()).await;
        let mut wishlist_store = ShopStore::load(storage.clone()).await;

        cart_store.add_to_cart(&air_force(), None, None).await.unwrap();
        wishlist_store.add_to_wishlist(&jordan()).await.unwrap();

        let reloaded = ShopStore::load(storage).await;
        assert_eq!(reloaded.item_count(), 1);
        assert_eq!(reloaded.wishlist_count(), 1);
    }

    #[tokio::test]
    async fn test_malformed_snapshot_loads_empty() {
        let storage = MemoryStorage::new();
        storage
            .set(session_keys::CART, "{not json".to_string())
            .await
            .unwrap();
        storage
            .set(session_keys::WISHLIST, r#"[{"id": "oops"}]"#.to_string())
            .await
            .unwrap();

        let store = ShopStore::load(storage).await;
        assert!(store.cart().is_empty());
        assert_eq!(store.wishlist_count(), 0);
    }

    #[tokio::test]
    async fn test_rejected_mutations_do_not_persist() {
        let storage = MemoryStorage::new();
        let mut store = ShopStore::load(storage.clone()).await;

        let err = store
            .add_to_cart(&air_force(), Some("15"), None)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Cart(CartError::UnknownSize { .. })));

        let err = store.remove_from_cart(0).await.unwrap_err();
        assert!(matches!(
            err,
            StoreError::Cart(CartError::InvalidPosition { position: 0, len: 0 })
        ));

        let err = store.update_quantity(3, 1).await.unwrap_err();
        assert!(matches!(err, StoreError::Cart(CartError::InvalidPosition { .. })));

        assert_eq!(storage.get(session_keys::CART).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_checkout() {
        let mut store = ShopStore::load(MemoryStorage::new()).await;
        assert!(matches!(store.checkout(), Err(StoreError::EmptyCart)));

        store.add_to_cart(&air_force(), None, None).await.unwrap();
        let notice = store.checkout().unwrap();
        assert_eq!(notice.severity, Severity::Success);
        assert_eq!(notice.message, "Proceeding to checkout...");
    }
}
