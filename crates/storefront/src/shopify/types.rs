//! Customer consent types shared by the Admin API client and route handlers.
//!
//! Field names follow the Admin API's camelCase spelling so the same structs
//! deserialize GraphQL responses and serialize JSON responses to the browser.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use newsletter_core::{MarketingOptInLevel, MarketingState};

use super::ShopifyError;

/// Tag applied to customers created through the newsletter form.
pub const NEWSLETTER_TAG: &str = "newsletter";

/// A Shopify customer, reduced to the fields the newsletter flow selects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscriber {
    /// Customer GID (e.g., `gid://shopify/Customer/123`).
    pub id: String,
    /// Customer email address.
    pub email: Option<String>,
    /// Email marketing consent. Null when the customer has no email.
    pub email_marketing_consent: Option<EmailMarketingConsent>,
}

impl Subscriber {
    /// The customer's current email marketing state.
    ///
    /// A customer without a consent record has never opted in.
    #[must_use]
    pub fn marketing_state(&self) -> MarketingState {
        self.email_marketing_consent
            .as_ref()
            .map_or(MarketingState::NotSubscribed, |c| c.marketing_state)
    }

    /// Whether the customer is already subscribed to marketing email.
    #[must_use]
    pub fn is_subscribed(&self) -> bool {
        self.marketing_state().is_subscribed()
    }
}

/// Email marketing consent as returned by the Admin API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailMarketingConsent {
    /// When consent was last updated (ISO 8601).
    pub consent_updated_at: Option<String>,
    /// How the customer opted in.
    pub marketing_opt_in_level: Option<MarketingOptInLevel>,
    /// Current marketing state.
    pub marketing_state: MarketingState,
}

/// Consent payload sent with `customerCreate` and
/// `customerEmailMarketingConsentUpdate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailMarketingConsentInput {
    pub consent_updated_at: String,
    pub marketing_opt_in_level: MarketingOptInLevel,
    pub marketing_state: MarketingState,
}

impl EmailMarketingConsentInput {
    /// Single opt-in subscription recorded at `at`.
    #[must_use]
    pub fn subscribed_at(at: DateTime<Utc>) -> Self {
        Self {
            consent_updated_at: at.to_rfc3339_opts(SecondsFormat::Millis, true),
            marketing_opt_in_level: MarketingOptInLevel::SingleOptIn,
            marketing_state: MarketingState::Subscribed,
        }
    }

    /// Single opt-in subscription recorded now.
    #[must_use]
    pub fn subscribed_now() -> Self {
        Self::subscribed_at(Utc::now())
    }
}

/// A field-level validation error from a mutation's `userErrors` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserError {
    /// Path to the offending input field, if any.
    pub field: Option<Vec<String>>,
    /// Human-readable message.
    pub message: String,
}

/// Result of a customer mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome {
    /// The mutation succeeded and returned the customer.
    Success(Subscriber),
    /// The mutation was rejected; only the first user error is kept.
    Rejected(UserError),
}

/// Payload shape shared by `customerCreate` and
/// `customerEmailMarketingConsentUpdate`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CustomerMutationPayload {
    pub customer: Option<Subscriber>,
    #[serde(default)]
    pub user_errors: Vec<UserError>,
}

impl CustomerMutationPayload {
    /// Collapse the payload into an outcome.
    ///
    /// User errors win over a returned customer. A payload with neither is an
    /// unexpected response.
    pub(crate) fn into_outcome(self, operation: &str) -> Result<MutationOutcome, ShopifyError> {
        if let Some(first) = self.user_errors.into_iter().next() {
            return Ok(MutationOutcome::Rejected(first));
        }

        self.customer.map(MutationOutcome::Success).ok_or_else(|| {
            ShopifyError::UnexpectedResponse(format!("No customer returned from {operation}"))
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn subscriber(state: Option<MarketingState>) -> Subscriber {
        Subscriber {
            id: "gid://shopify/Customer/1".to_string(),
            email: Some("reader@example.com".to_string()),
            email_marketing_consent: state.map(|marketing_state| EmailMarketingConsent {
                consent_updated_at: None,
                marketing_opt_in_level: None,
                marketing_state,
            }),
        }
    }

    #[test]
    fn test_subscriber_deserializes_admin_shape() {
        let subscriber: Subscriber = serde_json::from_value(serde_json::json!({
            "id": "gid://shopify/Customer/42",
            "email": "reader@example.com",
            "emailMarketingConsent": {
                "consentUpdatedAt": "2026-10-16T09:30:00Z",
                "marketingOptInLevel": "SINGLE_OPT_IN",
                "marketingState": "SUBSCRIBED"
            }
        }))
        .unwrap();

        assert!(subscriber.is_subscribed());
        let consent = subscriber.email_marketing_consent.unwrap();
        assert_eq!(
            consent.marketing_opt_in_level,
            Some(MarketingOptInLevel::SingleOptIn)
        );
        assert_eq!(
            consent.consent_updated_at.as_deref(),
            Some("2026-10-16T09:30:00Z")
        );
    }

    #[test]
    fn test_missing_consent_is_not_subscribed() {
        let subscriber = subscriber(None);
        assert_eq!(subscriber.marketing_state(), MarketingState::NotSubscribed);
        assert!(!subscriber.is_subscribed());
    }

    #[test]
    fn test_pending_is_not_subscribed() {
        assert!(!subscriber(Some(MarketingState::Pending)).is_subscribed());
    }

    #[test]
    fn test_consent_input_serializes_utc_millis() {
        let at = Utc.with_ymd_and_hms(2026, 10, 16, 8, 5, 3).unwrap();
        let input = EmailMarketingConsentInput::subscribed_at(at);

        assert_eq!(
            serde_json::to_value(&input).unwrap(),
            serde_json::json!({
                "consentUpdatedAt": "2026-10-16T08:05:03.000Z",
                "marketingOptInLevel": "SINGLE_OPT_IN",
                "marketingState": "SUBSCRIBED"
            })
        );
    }

    #[test]
    fn test_payload_keeps_only_first_user_error() {
        let payload: CustomerMutationPayload = serde_json::from_value(serde_json::json!({
            "customer": null,
            "userErrors": [
                { "field": ["email"], "message": "Email has already been taken" },
                { "field": ["tags"], "message": "Tags are invalid" }
            ]
        }))
        .unwrap();

        let outcome = payload.into_outcome("customerCreate").unwrap();
        assert_eq!(
            outcome,
            MutationOutcome::Rejected(UserError {
                field: Some(vec!["email".to_string()]),
                message: "Email has already been taken".to_string(),
            })
        );
    }

    #[test]
    fn test_payload_success() {
        let payload = CustomerMutationPayload {
            customer: Some(subscriber(Some(MarketingState::Subscribed))),
            user_errors: vec![],
        };
        assert!(matches!(
            payload.into_outcome("customerCreate").unwrap(),
            MutationOutcome::Success(_)
        ));
    }

    #[test]
    fn test_payload_without_customer_or_errors_is_unexpected() {
        let payload = CustomerMutationPayload {
            customer: None,
            user_errors: vec![],
        };
        let err = payload
            .into_outcome("customerEmailMarketingConsentUpdate")
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unexpected response: No customer returned from customerEmailMarketingConsentUpdate"
        );
    }
}
