//! Product route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use sole_store_core::{Notice, ProductId};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::routes::hx_trigger;
use crate::routes::views::ProductView;
use crate::state::AppState;
use crate::store::{SessionStorage, ShopStore};

/// Product search query parameters.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

/// Product grid fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/product_grid.html")]
pub struct ProductGridTemplate {
    pub products: Vec<ProductView>,
    pub query: String,
}

/// Quick view fragment template.
#[derive(Template, WebTemplate)]
#[template(path = "partials/quick_view.html")]
pub struct QuickViewTemplate {
    pub product: ProductView,
}

/// Display the product grid, filtered by name (HTMX).
#[instrument(skip(state, session))]
pub async fn index(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<SearchQuery>,
) -> impl IntoResponse {
    let store = ShopStore::load(SessionStorage::new(session)).await;
    let query = query.q.unwrap_or_default();

    let products = state
        .catalog()
        .search(&query)
        .into_iter()
        .map(|product| ProductView::new(product, store.is_wishlisted(product.id)))
        .collect();

    ProductGridTemplate { products, query }
}

/// Display quick view fragment (for HTMX).
#[instrument(skip(state, session))]
pub async fn quick_view(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<Response> {
    let id = ProductId::new(id);
    let product = state
        .catalog()
        .find(id)
        .ok_or(AppError::ProductNotFound(id))?;
    let store = ShopStore::load(SessionStorage::new(session)).await;

    let notice = Notice::info(format!("Quick view: {}", product.name));
    Ok((
        hx_trigger(None, &notice),
        QuickViewTemplate {
            product: ProductView::new(product, store.is_wishlisted(id)),
        },
    )
        .into_response())
}
