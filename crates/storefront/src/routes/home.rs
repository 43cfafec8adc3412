//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use serde::Deserialize;
use sole_store_core::HeroSlider;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::filters;
use crate::routes::views::{CartView, ProductView, SlideView};
use crate::state::AppState;
use crate::store::{SessionStorage, ShopStore, preferences};

/// Home page query parameters.
#[derive(Debug, Deserialize)]
pub struct HomeQuery {
    /// Search term prefilled into the search box.
    pub q: Option<String>,
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub slide: SlideView,
    pub products: Vec<ProductView>,
    pub query: String,
    pub cart: CartView,
    pub cart_count: u64,
    pub wishlist_count: usize,
    pub dark_mode: bool,
}

/// Display the home page.
///
/// Renders the first hero slide, the (optionally filtered) product grid and
/// the visitor's cart, wishlist badge and dark mode setting.
#[instrument(skip(state, session))]
pub async fn home(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<HomeQuery>,
) -> Result<HomeTemplate> {
    let storage = SessionStorage::new(session);
    let dark_mode = preferences::dark_mode(&storage).await;
    let store = ShopStore::load(storage).await;

    let catalog = state.catalog();
    let slide = HeroSlider::new(catalog.slides().len())
        .and_then(|slider| SlideView::new(slider, catalog.slides()))
        .ok_or_else(|| AppError::Internal("catalog has no hero slides".to_string()))?;

    let query = query.q.unwrap_or_default();
    let products = catalog
        .search(&query)
        .into_iter()
        .map(|product| ProductView::new(product, store.is_wishlisted(product.id)))
        .collect();

    Ok(HomeTemplate {
        slide,
        products,
        query,
        cart: CartView::from(store.cart()),
        cart_count: store.item_count(),
        wishlist_count: store.wishlist_count(),
        dark_mode,
    })
}
