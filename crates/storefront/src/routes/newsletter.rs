//! Newsletter subscription route handlers.
//!
//! `POST /newsletter` subscribes the submitted email through the Shopify
//! Admin API and caches the resulting consent in the session. `GET
//! /newsletter` has nothing to show and sends the visitor home.

use axum::{
    Form, Json,
    extract::{State, rejection::FormRejection},
    response::Redirect,
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use newsletter_core::{Email, EmailError};

use crate::error::{AppError, Result};
use crate::models::SubscribeResponse;
use crate::models::session::keys;
use crate::services::newsletter;
use crate::state::AppState;

/// Newsletter subscription form data.
#[derive(Debug, Default, Deserialize)]
pub struct SubscribeForm {
    #[serde(default)]
    pub email: Option<String>,
}

/// Direct navigation to the form target: redirect home.
pub async fn redirect_home() -> Redirect {
    Redirect::to("/")
}

/// Subscribe to the newsletter.
///
/// Validates the email before any Shopify call. A body that is not a form
/// counts as a missing email. On success the subscriber's marketing state is
/// written to the session, which makes the session layer emit a `Set-Cookie`
/// header. Errors leave the session untouched.
#[instrument(skip(state, session, form))]
pub async fn subscribe(
    State(state): State<AppState>,
    session: Session,
    form: std::result::Result<Form<SubscribeForm>, FormRejection>,
) -> Result<Json<SubscribeResponse>> {
    let Form(form) = form.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Rejected newsletter form body");
        AppError::InvalidEmail(EmailError::Empty)
    })?;
    let email = Email::parse(form.email.as_deref().unwrap_or_default())?;

    let subscription = newsletter::subscribe(state.admin(), &email).await?;
    let marketing_state = subscription.subscriber.marketing_state();

    session
        .insert(keys::EMAIL_MARKETING_CONSENT, marketing_state)
        .await?;

    tracing::info!(
        email = %email,
        action = subscription.action.as_str(),
        marketing_state = %marketing_state,
        "Newsletter subscription successful"
    );

    Ok(Json(SubscribeResponse::success(subscription.subscriber)))
}
