//! Business logic services for storefront.
//!
//! # Services
//!
//! - `newsletter` - Subscribe an email via Shopify customer marketing consent

pub mod newsletter;
