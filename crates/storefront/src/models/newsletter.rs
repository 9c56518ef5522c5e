//! Newsletter response bodies and status display state.

use serde::{Deserialize, Serialize};

use newsletter_core::MarketingState;

use crate::shopify::Subscriber;

/// JSON body returned by `POST /newsletter`.
///
/// Exactly one of `subscriber` and `error` is non-null.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscribeResponse {
    pub subscriber: Option<Subscriber>,
    pub error: Option<SubscribeErrorBody>,
}

impl SubscribeResponse {
    #[must_use]
    pub const fn success(subscriber: Subscriber) -> Self {
        Self {
            subscriber: Some(subscriber),
            error: None,
        }
    }

    #[must_use]
    pub const fn failure(error: SubscribeErrorBody) -> Self {
        Self {
            subscriber: None,
            error: Some(error),
        }
    }
}

/// Error half of [`SubscribeResponse`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscribeErrorBody {
    /// Offending input field path, when the error is field-level.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<Vec<String>>,
    pub message: String,
}

/// JSON body returned by `GET /`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsletterStatus {
    pub subscribed_to_newsletter: bool,
}

impl NewsletterStatus {
    /// Status derived from the consent cached in the session.
    #[must_use]
    pub fn from_cached(consent: Option<MarketingState>) -> Self {
        Self {
            subscribed_to_newsletter: consent.is_some_and(MarketingState::is_subscribed),
        }
    }
}

/// Which of the newsletter block's mutually exclusive views to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelView {
    /// The last submission returned a subscriber.
    JustSubscribed,
    /// The session says this visitor is already subscribed.
    AlreadySubscribed,
    /// Show the signup form.
    ShowForm,
}

/// Display state for the newsletter block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewsletterPanel {
    pub view: PanelView,
    /// Inline error from the last submission, shown alongside any view.
    pub error_message: Option<String>,
}

impl NewsletterPanel {
    /// Resolve the panel from the page status and the last form submission.
    #[must_use]
    pub fn resolve(status: NewsletterStatus, last: Option<&SubscribeResponse>) -> Self {
        let just_subscribed = last.is_some_and(|r| r.subscriber.is_some());

        let view = if just_subscribed {
            PanelView::JustSubscribed
        } else if status.subscribed_to_newsletter {
            PanelView::AlreadySubscribed
        } else {
            PanelView::ShowForm
        };

        Self {
            view,
            error_message: last
                .and_then(|r| r.error.as_ref())
                .map(|e| e.message.clone()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn subscriber() -> Subscriber {
        Subscriber {
            id: "gid://shopify/Customer/7".to_string(),
            email: Some("reader@example.com".to_string()),
            email_marketing_consent: None,
        }
    }

    fn failed(message: &str) -> SubscribeResponse {
        SubscribeResponse::failure(SubscribeErrorBody {
            field: None,
            message: message.to_string(),
        })
    }

    #[test]
    fn test_status_from_cached_consent() {
        assert!(NewsletterStatus::from_cached(Some(MarketingState::Subscribed)).subscribed_to_newsletter);
        assert!(!NewsletterStatus::from_cached(Some(MarketingState::Pending)).subscribed_to_newsletter);
        assert!(!NewsletterStatus::from_cached(None).subscribed_to_newsletter);
    }

    #[test]
    fn test_status_serializes_camel_case() {
        let json = serde_json::to_value(NewsletterStatus::from_cached(None)).unwrap();
        assert_eq!(json, serde_json::json!({ "subscribedToNewsletter": false }));
    }

    #[test]
    fn test_success_response_has_null_error() {
        let json = serde_json::to_value(SubscribeResponse::success(subscriber())).unwrap();
        assert_eq!(json["error"], serde_json::Value::Null);
        assert_eq!(json["subscriber"]["id"], "gid://shopify/Customer/7");
    }

    #[test]
    fn test_panel_just_subscribed_wins() {
        let status = NewsletterStatus::from_cached(Some(MarketingState::Subscribed));
        let last = SubscribeResponse::success(subscriber());

        let panel = NewsletterPanel::resolve(status, Some(&last));
        assert_eq!(panel.view, PanelView::JustSubscribed);
        assert_eq!(panel.error_message, None);
    }

    #[test]
    fn test_panel_already_subscribed_from_session() {
        let status = NewsletterStatus::from_cached(Some(MarketingState::Subscribed));
        let panel = NewsletterPanel::resolve(status, None);
        assert_eq!(panel.view, PanelView::AlreadySubscribed);
    }

    #[test]
    fn test_panel_form_with_inline_error() {
        let status = NewsletterStatus::from_cached(None);
        let last = failed("Email is invalid");

        let panel = NewsletterPanel::resolve(status, Some(&last));
        assert_eq!(panel.view, PanelView::ShowForm);
        assert_eq!(panel.error_message.as_deref(), Some("Email is invalid"));
    }

    #[test]
    fn test_panel_error_shown_even_when_already_subscribed() {
        let status = NewsletterStatus::from_cached(Some(MarketingState::Subscribed));
        let last = failed("Something went wrong. Please try again.");

        let panel = NewsletterPanel::resolve(status, Some(&last));
        assert_eq!(panel.view, PanelView::AlreadySubscribed);
        assert!(panel.error_message.is_some());
    }
}
