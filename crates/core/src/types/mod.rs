//! Core types for Sole Store.
//!
//! This module provides type-safe wrappers and collections for the
//! storefront domain.

pub mod cart;
pub mod email;
pub mod id;
pub mod notice;
pub mod price;
pub mod product;
pub mod slider;
pub mod wishlist;

pub use cart::{AddToCart, Cart, CartError, CartLineItem, LineKey, QuantityUpdate};
pub use email::{Email, EmailError};
pub use id::*;
pub use notice::{Notice, Severity};
pub use price::{CurrencyCode, Price};
pub use product::{DEFAULT_SIZE, Product, ProductError};
pub use slider::HeroSlider;
pub use wishlist::{Wishlist, WishlistToggle};
