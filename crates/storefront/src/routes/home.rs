//! Home page route handler.
//!
//! Reports whether this visitor is subscribed, using only the consent cached
//! in the session. No Shopify call is made.

use axum::Json;
use tower_sessions::Session;
use tracing::instrument;

use newsletter_core::MarketingState;

use crate::models::NewsletterStatus;
use crate::models::session::keys;

/// Read the cached marketing consent from the session.
///
/// An unreadable value is treated as absent.
pub async fn cached_consent(session: &Session) -> Option<MarketingState> {
    match session
        .get::<MarketingState>(keys::EMAIL_MARKETING_CONSENT)
        .await
    {
        Ok(consent) => consent,
        Err(e) => {
            tracing::warn!(error = %e, "Ignoring unreadable cached marketing consent");
            None
        }
    }
}

/// Home page: newsletter subscription status.
#[instrument(skip(session))]
pub async fn home(session: Session) -> Json<NewsletterStatus> {
    Json(NewsletterStatus::from_cached(cached_consent(&session).await))
}
