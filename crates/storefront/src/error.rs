//! Unified error handling with Sentry integration.
//!
//! Every failure in the subscription flow becomes an `AppError`. Its
//! `IntoResponse` implementation renders the same JSON body the success path
//! uses, `{"subscriber": null, "error": {...}}`, so the newsletter form only
//! has one shape to handle. Server-side failures are captured to Sentry before
//! responding.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use newsletter_core::EmailError;

use crate::models::newsletter::{SubscribeErrorBody, SubscribeResponse};
use crate::shopify::{ShopifyError, UserError};

/// Message shown to visitors when the failure is on our side or Shopify's.
const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Submitted email was missing or malformed.
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Shopify rejected the mutation input.
    #[error("User error: {}", .0.message)]
    UserError(UserError),

    /// Shopify API call failed (transport, GraphQL, or response shape).
    #[error("Shopify error: {0}")]
    Shopify(#[from] ShopifyError),

    /// Session store failed while persisting consent.
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),
}

impl AppError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::InvalidEmail(_) => StatusCode::BAD_REQUEST,
            Self::UserError(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Shopify(_) => StatusCode::BAD_GATEWAY,
            Self::Session(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing error body.
    ///
    /// Internal error details are never exposed.
    #[must_use]
    pub fn body(&self) -> SubscribeErrorBody {
        match self {
            Self::InvalidEmail(err) => SubscribeErrorBody {
                field: Some(vec!["email".to_string()]),
                message: err.to_string(),
            },
            Self::UserError(err) => SubscribeErrorBody {
                field: err.field.clone(),
                message: err.message.clone(),
            },
            Self::Shopify(_) | Self::Session(_) => SubscribeErrorBody {
                field: None,
                message: GENERIC_FAILURE_MESSAGE.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            Self::Shopify(_) | Self::Session(_) => {
                let event_id = sentry::capture_error(&self);
                tracing::error!(
                    error = %self,
                    sentry_event_id = %event_id,
                    "Newsletter subscription failed"
                );
            }
            Self::InvalidEmail(_) | Self::UserError(_) => {
                tracing::info!(error = %self, "Newsletter subscription rejected");
            }
        }

        (self.status(), Json(SubscribeResponse::failure(self.body()))).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
