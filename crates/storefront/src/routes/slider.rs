//! Hero slider route handlers.
//!
//! The server keeps no slider state: the page sends the index it shows and
//! the direction, and gets back the slide to swap in. Autoplay is a client
//! timer issuing `step=1` requests.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use sole_store_core::HeroSlider;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::routes::views::SlideView;
use crate::state::AppState;

/// Slider step query parameters.
#[derive(Debug, Deserialize)]
pub struct StepQuery {
    /// Index currently shown; defaults to the first slide.
    pub current: Option<usize>,
    /// Slides to move by; negative moves back.
    pub step: Option<i64>,
}

/// Hero slide fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/hero_slide.html")]
pub struct HeroSlideTemplate {
    pub slide: SlideView,
}

fn render(state: &AppState, slider: Option<HeroSlider>) -> Result<HeroSlideTemplate> {
    let slides = state.catalog().slides();
    let slide = slider
        .and_then(|slider| SlideView::new(slider, slides))
        .ok_or_else(|| AppError::Internal("catalog has no hero slides".to_string()))?;
    Ok(HeroSlideTemplate { slide })
}

/// Move from the current slide by `step`, wrapping at both ends.
#[instrument(skip(state))]
pub async fn step(
    State(state): State<AppState>,
    Query(query): Query<StepQuery>,
) -> Result<HeroSlideTemplate> {
    let slider = HeroSlider::at(state.catalog().slides().len(), query.current.unwrap_or(0))
        .map(|mut slider| {
            slider.step(query.step.unwrap_or(1));
            slider
        });
    render(&state, slider)
}

/// Jump to the slide at `index`. Out-of-range indices show the first slide.
#[instrument(skip(state))]
pub async fn go_to(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<HeroSlideTemplate> {
    let slider = HeroSlider::new(state.catalog().slides().len()).map(|mut slider| {
        slider.go_to(index);
        slider
    });
    render(&state, slider)
}
