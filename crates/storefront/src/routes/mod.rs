//! HTTP route handlers for storefront.
//!
//! The router below is the page's dispatch table: every button and form on
//! the page posts to one of these routes, which loads the visitor's store,
//! applies one operation and returns the fragment to swap in.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                          - Home page
//!
//! # Products
//! GET  /products?q=term           - Product grid fragment, filtered by name
//! GET  /products/{id}/quick-view  - Quick view fragment (HTMX)
//!
//! # Cart (HTMX fragments)
//! GET  /cart                      - Cart items fragment
//! POST /cart/add                  - Add to cart (returns cart count badge)
//! POST /cart/update               - Change quantity (returns cart items)
//! POST /cart/remove               - Remove line (returns cart items)
//! GET  /cart/count                - Cart count badge
//! POST /checkout                  - Checkout notice
//!
//! # Wishlist (HTMX fragments)
//! POST /wishlist/toggle           - Add or remove (returns wishlist badge)
//! POST /wishlist/add              - Add only
//! POST /wishlist/remove           - Remove only
//! GET  /wishlist/count            - Wishlist count badge
//!
//! # Page furniture
//! POST /preferences/dark-mode     - Toggle dark mode
//! POST /newsletter                - Newsletter sign-up
//! GET  /slider?current=n&step=d   - Hero slide after a step
//! GET  /slider/{index}            - Hero slide at an index
//! ```
//!
//! Mutations answer with an `HX-Trigger` header naming the changed part of
//! the page and carrying the notice for the toast.

pub mod cart;
pub mod home;
pub mod newsletter;
pub mod preferences;
pub mod products;
pub mod slider;
pub mod views;
pub mod wishlist;

use axum::{
    Router,
    response::AppendHeaders,
    routing::{get, post},
};
use serde_json::{Map, Value, json};
use sole_store_core::Notice;

use crate::state::AppState;

/// Response header HTMX reads client-side events from.
pub const HX_TRIGGER: &str = "HX-Trigger";

/// Build the `HX-Trigger` header announcing `event` and showing `notice`.
///
/// `event` is the client-side event name (e.g. `cart-updated`); pass `None`
/// when only the notice should fire.
pub fn hx_trigger(event: Option<&str>, notice: &Notice) -> AppendHeaders<[(&'static str, String); 1]> {
    AppendHeaders([(HX_TRIGGER, trigger_payload(event, notice))])
}

fn trigger_payload(event: Option<&str>, notice: &Notice) -> String {
    let mut events = Map::new();
    if let Some(event) = event {
        events.insert(event.to_string(), Value::Bool(true));
    }
    events.insert(
        "notice".to_string(),
        json!({
            "message": notice.message,
            "severity": notice.severity.as_str(),
        }),
    );
    Value::Object(events).to_string()
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{id}/quick-view", get(products::quick_view))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/count", get(cart::count))
}

/// Create the wishlist routes router.
pub fn wishlist_routes() -> Router<AppState> {
    Router::new()
        .route("/toggle", post(wishlist::toggle))
        .route("/add", post(wishlist::add))
        .route("/remove", post(wishlist::remove))
        .route("/count", get(wishlist::count))
}

/// Create the slider routes router.
pub fn slider_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(slider::step))
        .route("/{index}", get(slider::go_to))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .nest("/products", product_routes())
        .nest("/cart", cart_routes())
        .route("/checkout", post(cart::checkout))
        .nest("/wishlist", wishlist_routes())
        .nest("/slider", slider_routes())
        .route("/preferences/dark-mode", post(preferences::toggle_dark_mode))
        .route("/newsletter", post(newsletter::subscribe))
}
