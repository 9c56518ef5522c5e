//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (added in `main`, capture errors and transactions)
//! 2. `TraceLayer` (request span with `request_id` field)
//! 3. Request ID (propagate or generate, echo in response)
//! 4. Session layer (tower-sessions, signed cookie, in-memory store)

pub mod request_id;
pub mod session;

pub use request_id::{REQUEST_ID_HEADER, make_request_span, request_id_middleware};
pub use session::{SESSION_COOKIE_NAME, create_session_layer};
