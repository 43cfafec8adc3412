//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! The cart itself lives in the visitor's session and is loaded per request.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use sole_store_core::{CartError, Notice, ProductId};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::routes::hx_trigger;
use crate::routes::views::CartView;
use crate::state::AppState;
use crate::store::{SessionStorage, ShopStore, StoreError, StoreEvent};

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: i32,
    pub size: Option<String>,
    pub color: Option<String>,
}

/// Update quantity form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub position: usize,
    pub delta: i64,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub position: usize,
}

/// Cart items fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub cart_count: u64,
}

/// Treat a blank form field as not chosen.
fn chosen(value: Option<&String>) -> Option<&str> {
    value.map(|v| v.trim()).filter(|v| !v.is_empty())
}

async fn load_store(session: Session) -> ShopStore<SessionStorage> {
    ShopStore::load(SessionStorage::new(session)).await
}

/// Render the cart items fragment after a line mutation.
///
/// An out-of-range position is a no-op: the current cart is rendered as is.
fn cart_items_response(
    store: &ShopStore<SessionStorage>,
    result: std::result::Result<StoreEvent, StoreError>,
) -> Result<Response> {
    let cart = CartView::from(store.cart());

    match result {
        Ok(event) => Ok((
            hx_trigger(Some(event.render_target().event_name()), &event.notice()),
            CartItemsTemplate { cart },
        )
            .into_response()),
        Err(StoreError::Cart(CartError::InvalidPosition { position, len })) => {
            tracing::debug!(position, len, "Ignoring stale cart position");
            Ok(CartItemsTemplate { cart }.into_response())
        }
        Err(e) => Err(e.into()),
    }
}

/// Display the cart items fragment.
#[instrument(skip(session))]
pub async fn show(session: Session) -> impl IntoResponse {
    let store = load_store(session).await;
    CartItemsTemplate {
        cart: CartView::from(store.cart()),
    }
}

/// Add item to cart (HTMX).
///
/// Returns the updated cart count badge with an HTMX trigger so the cart
/// sidebar refreshes and the notice is shown.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddToCartForm>,
) -> Result<Response> {
    let id = ProductId::new(form.product_id);
    let product = state
        .catalog()
        .find(id)
        .ok_or(AppError::ProductNotFound(id))?;

    let mut store = load_store(session).await;
    let result = store
        .add_to_cart(product, chosen(form.size.as_ref()), chosen(form.color.as_ref()))
        .await;

    match result {
        Ok(event) => {
            let product_id = id.to_string();
            add_breadcrumb(
                "cart",
                "Added to cart",
                Some(&[("product_id", product_id.as_str())]),
            );
            Ok((
                hx_trigger(Some(event.render_target().event_name()), &event.notice()),
                CartCountTemplate {
                    cart_count: store.item_count(),
                },
            )
                .into_response())
        }
        Err(StoreError::Cart(e)) => {
            tracing::info!(error = %e, "Rejected add to cart");
            let notice = Notice::error(e.to_string());
            Ok((
                axum::http::StatusCode::BAD_REQUEST,
                hx_trigger(None, &notice),
                CartCountTemplate {
                    cart_count: store.item_count(),
                },
            )
                .into_response())
        }
        Err(e) => Err(e.into()),
    }
}

/// Update cart item quantity (HTMX).
#[instrument(skip(session))]
pub async fn update(session: Session, Form(form): Form<UpdateCartForm>) -> Result<Response> {
    let mut store = load_store(session).await;
    let result = store.update_quantity(form.position, form.delta).await;
    cart_items_response(&store, result)
}

/// Remove item from cart (HTMX).
#[instrument(skip(session))]
pub async fn remove(session: Session, Form(form): Form<RemoveFromCartForm>) -> Result<Response> {
    let mut store = load_store(session).await;
    let result = store.remove_from_cart(form.position).await;
    cart_items_response(&store, result)
}

/// Get cart count badge (HTMX).
#[instrument(skip(session))]
pub async fn count(session: Session) -> impl IntoResponse {
    let store = load_store(session).await;
    CartCountTemplate {
        cart_count: store.item_count(),
    }
}

/// Start checkout.
///
/// There is no payment flow; the response only carries the notice. An empty
/// cart answers with an error notice.
#[instrument(skip(session))]
pub async fn checkout(session: Session) -> Result<Response> {
    let store = load_store(session).await;

    let notice = match store.checkout() {
        Ok(notice) => {
            tracing::info!(
                items = store.item_count(),
                total = %store.total(),
                "Checkout started"
            );
            notice
        }
        Err(StoreError::EmptyCart) => Notice::error("Your cart is empty!"),
        Err(e) => return Err(e.into()),
    };

    Ok((hx_trigger(None, &notice), ()).into_response())
}
