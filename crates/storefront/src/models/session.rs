//! Session-related types.
//!
//! The session is a cache, never an authority: it only remembers what Shopify
//! last told us so the next page view can skip a lookup.

/// Session keys.
pub mod keys {
    /// Last known email marketing state, stored as its wire string
    /// (e.g., `"SUBSCRIBED"`).
    pub const EMAIL_MARKETING_CONSENT: &str = "emailMarketingConsent";
}
