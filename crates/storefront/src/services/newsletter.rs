//! Newsletter subscription flow.
//!
//! Looks the email up in Shopify, then either does nothing (already
//! subscribed), creates a subscribed customer, or flips an existing
//! customer's consent to subscribed. Each step waits for the previous call;
//! nothing is retried.

use tracing::instrument;

use newsletter_core::Email;

use crate::error::{AppError, Result};
use crate::shopify::{AdminClient, EmailMarketingConsentInput, MutationOutcome, Subscriber};

/// Which branch the flow took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscribeAction {
    /// Customer was already subscribed; no mutation was sent.
    AlreadySubscribed,
    /// No customer existed; one was created.
    Created,
    /// Customer existed without consent; consent was updated.
    Updated,
}

impl SubscribeAction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AlreadySubscribed => "already_subscribed",
            Self::Created => "created",
            Self::Updated => "updated",
        }
    }
}

/// A successful subscription.
#[derive(Debug, Clone)]
pub struct Subscription {
    pub subscriber: Subscriber,
    pub action: SubscribeAction,
}

/// Subscribe `email` to marketing email.
///
/// # Errors
///
/// Returns `AppError::UserError` with the first user error if a mutation is
/// rejected, and `AppError::Shopify` for any transport or response failure.
#[instrument(skip(client), fields(email = %email))]
pub async fn subscribe(client: &AdminClient, email: &Email) -> Result<Subscription> {
    let existing = client.find_customer_by_email(email).await?;

    let (outcome, action) = match existing {
        Some(subscriber) if subscriber.is_subscribed() => {
            return Ok(Subscription {
                subscriber,
                action: SubscribeAction::AlreadySubscribed,
            });
        }
        Some(subscriber) => {
            let consent = EmailMarketingConsentInput::subscribed_now();
            let outcome = client
                .update_email_marketing_consent(&subscriber.id, &consent)
                .await?;
            (outcome, SubscribeAction::Updated)
        }
        None => {
            let consent = EmailMarketingConsentInput::subscribed_now();
            let outcome = client.create_subscriber(email, &consent).await?;
            (outcome, SubscribeAction::Created)
        }
    };

    match outcome {
        MutationOutcome::Success(subscriber) => Ok(Subscription { subscriber, action }),
        MutationOutcome::Rejected(user_error) => Err(AppError::UserError(user_error)),
    }
}
