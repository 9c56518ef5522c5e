//! Core types for the newsletter storefront.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod marketing;

pub use email::{Email, EmailError};
pub use marketing::{MarketingOptInLevel, MarketingState, UnknownMarketingState};
