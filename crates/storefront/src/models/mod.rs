//! Domain models for storefront.
//!
//! Product, cart and wishlist types live in `sole-store-core`; this module
//! holds what is specific to the storefront's session record.

pub mod session;

pub use session::keys as session_keys;
