//! Sole Store Core - Shared types library.
//!
//! This crate provides the domain types used by the storefront:
//! - Products and their prices
//! - The shopping cart and its line items
//! - The wishlist
//! - User-facing notices and the hero slider position
//!
//! # Architecture
//!
//! The core crate contains only types and collection logic - no I/O, no
//! session access, no HTTP. Persistence lives in the storefront crate, which
//! serializes these types to its session store.
//!
//! # Modules
//!
//! - [`types`] - Type-safe IDs, prices, products, cart, wishlist and notices

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
