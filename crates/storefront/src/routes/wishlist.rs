//! Wishlist route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use sole_store_core::{Product, ProductId};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::routes::hx_trigger;
use crate::state::AppState;
use crate::store::{SessionStorage, ShopStore, StoreEvent};

/// Wishlist form data.
#[derive(Debug, Deserialize)]
pub struct WishlistForm {
    pub product_id: i32,
}

/// Wishlist count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/wishlist_count.html")]
pub struct WishlistCountTemplate {
    pub wishlist_count: usize,
}

fn find_product(state: &AppState, product_id: i32) -> Result<&Product> {
    let id = ProductId::new(product_id);
    state.catalog().find(id).ok_or(AppError::ProductNotFound(id))
}

fn badge_response(store: &ShopStore<SessionStorage>, event: &StoreEvent) -> Response {
    (
        hx_trigger(Some(event.render_target().event_name()), &event.notice()),
        WishlistCountTemplate {
            wishlist_count: store.wishlist_count(),
        },
    )
        .into_response()
}

/// Add the product if absent, remove it otherwise (HTMX).
#[instrument(skip(state, session))]
pub async fn toggle(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<WishlistForm>,
) -> Result<Response> {
    let product = find_product(&state, form.product_id)?;
    let mut store = ShopStore::load(SessionStorage::new(session)).await;

    let event = store.add_to_wishlist(product).await?;
    Ok(badge_response(&store, &event))
}

/// Add the product if absent (HTMX).
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<WishlistForm>,
) -> Result<Response> {
    let product = find_product(&state, form.product_id)?;
    let mut store = ShopStore::load(SessionStorage::new(session)).await;

    let event = store.insert_into_wishlist(product).await?;
    Ok(badge_response(&store, &event))
}

/// Remove the product if present (HTMX).
///
/// Unknown ids are accepted so entries for products dropped from the
/// catalog can still be cleared.
#[instrument(skip(session))]
pub async fn remove(session: Session, Form(form): Form<WishlistForm>) -> Result<Response> {
    let mut store = ShopStore::load(SessionStorage::new(session)).await;

    let event = store
        .remove_from_wishlist(ProductId::new(form.product_id))
        .await?;
    Ok(badge_response(&store, &event))
}

/// Get wishlist count badge (HTMX).
#[instrument(skip(session))]
pub async fn count(session: Session) -> impl IntoResponse {
    let store = ShopStore::load(SessionStorage::new(session)).await;
    WishlistCountTemplate {
        wishlist_count: store.wishlist_count(),
    }
}
