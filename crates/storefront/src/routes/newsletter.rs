//! Newsletter sign-up route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use sole_store_core::{Email, Notice};
use tracing::instrument;

use crate::routes::hx_trigger;

/// Newsletter form data.
#[derive(Debug, Deserialize)]
pub struct SubscribeForm {
    #[serde(default)]
    pub email: String,
}

/// Sign-up confirmation fragment template.
#[derive(Template, WebTemplate)]
#[template(path = "newsletter/subscribe_success.html")]
pub struct SubscribeSuccessTemplate {
    pub email: String,
}

/// Sign-up form re-rendered with an error.
#[derive(Template, WebTemplate)]
#[template(path = "newsletter/subscribe_error.html")]
pub struct SubscribeErrorTemplate {
    pub message: String,
    pub email: String,
}

/// Handle a newsletter sign-up (HTMX).
///
/// The address is only validated and logged; there is no mailing list
/// behind it.
#[instrument(skip(form))]
pub async fn subscribe(Form(form): Form<SubscribeForm>) -> Response {
    match Email::parse(&form.email) {
        Ok(email) => {
            tracing::info!(domain = email.domain(), "Newsletter subscription");
            let notice = Notice::success("Thank you for subscribing!");
            (
                hx_trigger(None, &notice),
                SubscribeSuccessTemplate {
                    email: email.into_inner(),
                },
            )
                .into_response()
        }
        Err(e) => {
            tracing::debug!(error = %e, "Rejected newsletter address");
            let notice = Notice::error("Please enter a valid email address.");
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                hx_trigger(None, &notice),
                SubscribeErrorTemplate {
                    message: notice.message.clone(),
                    email: form.email.trim().to_string(),
                },
            )
                .into_response()
        }
    }
}
