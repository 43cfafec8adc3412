//! Session-related types.
//!
//! The session is the visitor's durable key-value record. Each value under
//! these keys is a JSON document stored as a string.

/// Session keys for visitor state.
pub mod keys {
    /// Key for the serialized cart line items.
    pub const CART: &str = "cart";

    /// Key for the serialized wishlist products.
    pub const WISHLIST: &str = "wishlist";

    /// Key for the dark mode preference (`"true"` or `"false"`).
    pub const DARK_MODE: &str = "darkMode";
}
