//! Email marketing consent enums.
//!
//! Values serialize with the same SCREAMING_SNAKE_CASE spelling Shopify uses
//! on the wire, so they can be passed straight through GraphQL variables,
//! JSON responses and the session store.

use serde::{Deserialize, Serialize};

/// Marketing consent state of a customer's email address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MarketingState {
    /// Never opted in.
    #[default]
    NotSubscribed,
    /// Waiting on a confirmed opt-in.
    Pending,
    /// Opted in to marketing email.
    Subscribed,
    /// Opted out after previously subscribing.
    Unsubscribed,
    /// Data has been redacted.
    Redacted,
    /// The address is not deliverable.
    Invalid,
}

impl MarketingState {
    /// Returns the wire representation of this state.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotSubscribed => "NOT_SUBSCRIBED",
            Self::Pending => "PENDING",
            Self::Subscribed => "SUBSCRIBED",
            Self::Unsubscribed => "UNSUBSCRIBED",
            Self::Redacted => "REDACTED",
            Self::Invalid => "INVALID",
        }
    }

    /// Whether this state counts as an active newsletter subscription.
    #[must_use]
    pub const fn is_subscribed(self) -> bool {
        matches!(self, Self::Subscribed)
    }
}

impl std::fmt::Display for MarketingState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unrecognized [`MarketingState`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown marketing state: {0}")]
pub struct UnknownMarketingState(pub String);

impl std::str::FromStr for MarketingState {
    type Err = UnknownMarketingState;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NOT_SUBSCRIBED" => Ok(Self::NotSubscribed),
            "PENDING" => Ok(Self::Pending),
            "SUBSCRIBED" => Ok(Self::Subscribed),
            "UNSUBSCRIBED" => Ok(Self::Unsubscribed),
            "REDACTED" => Ok(Self::Redacted),
            "INVALID" => Ok(Self::Invalid),
            other => Err(UnknownMarketingState(other.to_string())),
        }
    }
}

/// How the customer opted in to marketing email.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MarketingOptInLevel {
    /// Opted in without a confirmation step.
    SingleOptIn,
    /// Opted in and confirmed via a follow-up email.
    ConfirmedOptIn,
    /// Opt-in level was not recorded.
    Unknown,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_marketing_state_wire_format() {
        assert_eq!(
            serde_json::to_string(&MarketingState::NotSubscribed).unwrap(),
            "\"NOT_SUBSCRIBED\""
        );
        let parsed: MarketingState = serde_json::from_str("\"UNSUBSCRIBED\"").unwrap();
        assert_eq!(parsed, MarketingState::Unsubscribed);
    }

    #[test]
    fn test_marketing_state_display_matches_serde() {
        for state in [
            MarketingState::NotSubscribed,
            MarketingState::Pending,
            MarketingState::Subscribed,
            MarketingState::Unsubscribed,
            MarketingState::Redacted,
            MarketingState::Invalid,
        ] {
            let json = serde_json::to_string(&state).unwrap();
            assert_eq!(json, format!("\"{state}\""));
            assert_eq!(state.as_str().parse::<MarketingState>().unwrap(), state);
        }
    }

    #[test]
    fn test_marketing_state_from_str_unknown() {
        let err = "OPTED_IN".parse::<MarketingState>().unwrap_err();
        assert_eq!(err.to_string(), "unknown marketing state: OPTED_IN");
    }

    #[test]
    fn test_only_subscribed_is_subscribed() {
        assert!(MarketingState::Subscribed.is_subscribed());
        assert!(!MarketingState::Pending.is_subscribed());
        assert!(!MarketingState::Unsubscribed.is_subscribed());
        assert!(!MarketingState::default().is_subscribed());
    }

    #[test]
    fn test_opt_in_level_wire_format() {
        assert_eq!(
            serde_json::to_string(&MarketingOptInLevel::SingleOptIn).unwrap(),
            "\"SINGLE_OPT_IN\""
        );
    }
}
