//! Visitor preference route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::{IntoResponse, Response};
use sole_store_core::Notice;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::routes::hx_trigger;
use crate::store::{SessionStorage, preferences};

/// Client-side event fired when the theme changes.
pub const DARK_MODE_EVENT: &str = "dark-mode-changed";

/// Dark mode toggle button fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/dark_mode_toggle.html")]
pub struct DarkModeToggleTemplate {
    pub dark_mode: bool,
}

/// Flip dark mode and return the re-rendered toggle (HTMX).
///
/// The page script swaps the body class when it sees the trigger.
#[instrument(skip(session))]
pub async fn toggle_dark_mode(session: Session) -> Result<Response> {
    let dark_mode = preferences::toggle_dark_mode(&SessionStorage::new(session)).await?;
    tracing::debug!(dark_mode, "Dark mode toggled");

    let notice = if dark_mode {
        Notice::info("Dark mode on")
    } else {
        Notice::info("Dark mode off")
    };

    Ok((
        hx_trigger(Some(DARK_MODE_EVENT), &notice),
        DarkModeToggleTemplate { dark_mode },
    )
        .into_response())
}
