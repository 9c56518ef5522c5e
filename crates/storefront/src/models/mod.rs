//! Request, response and session models for the storefront.

pub mod newsletter;
pub mod session;

pub use newsletter::{
    NewsletterPanel, NewsletterStatus, PanelView, SubscribeErrorBody, SubscribeResponse,
};
