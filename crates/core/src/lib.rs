//! Newsletter Core - Shared types library.
//!
//! This crate provides the domain types shared by the newsletter components:
//! - `storefront` - Public-facing subscription endpoints
//! - `integration-tests` - Black-box tests against a running storefront
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no session
//! handling. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Validated email addresses and marketing consent enums

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
