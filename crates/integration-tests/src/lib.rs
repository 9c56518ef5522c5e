//! End-to-end tests for the newsletter storefront.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the storefront against a development store
//! cargo run -p newsletter-storefront
//!
//! # Run the ignored end-to-end tests
//! cargo test -p newsletter-integration-tests -- --ignored
//! ```
//!
//! Every run subscribes fresh `+e2e-<uuid>` addresses, so point the
//! storefront at a development store, never production.

use newsletter_core::Email;

/// Base URL of the running storefront (`STOREFRONT_BASE_URL`).
#[must_use]
pub fn storefront_base_url() -> String {
    std::env::var("STOREFRONT_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// A unique address on the test domain that no customer owns yet.
///
/// # Panics
///
/// Panics if `E2E_EMAIL_DOMAIN` is set to something that does not form a
/// valid address.
#[must_use]
pub fn unique_test_email() -> Email {
    let domain = std::env::var("E2E_EMAIL_DOMAIN").unwrap_or_else(|_| "example.com".to_string());
    let raw = format!("newsletter+e2e-{}@{domain}", uuid::Uuid::new_v4().simple());
    #[allow(clippy::expect_used)] // test helper
    Email::parse(&raw).expect("E2E_EMAIL_DOMAIN must form a valid email")
}
