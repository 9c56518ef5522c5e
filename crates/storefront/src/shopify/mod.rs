//! Shopify Admin API client for newsletter consent management.
//!
//! # Architecture
//!
//! - Hand-written GraphQL documents, sent with `reqwest` inside the
//!   `graphql_client` request/response envelope
//! - Shopify is the source of truth for consent - NO local sync
//! - Every call is a single request; nothing is retried or cached
//!
//! # Operations
//!
//! - `find_customer_by_email` - `customers(first: 1, query: "email:...")`
//! - `create_subscriber` - `customerCreate` with marketing consent
//! - `update_email_marketing_consent` - `customerEmailMarketingConsentUpdate`
//!
//! # Example
//!
//! ```rust,ignore
//! use newsletter_storefront::shopify::AdminClient;
//!
//! let client = AdminClient::new(&config.shopify)?;
//!
//! match client.find_customer_by_email(&email).await? {
//!     Some(subscriber) if subscriber.is_subscribed() => { /* nothing to do */ }
//!     Some(subscriber) => { client.update_email_marketing_consent(&subscriber.id, &consent).await?; }
//!     None => { client.create_subscriber(&email, &consent).await?; }
//! }
//! ```

mod admin;
pub mod types;

pub use admin::AdminClient;
pub use types::*;

use thiserror::Error;

/// Errors that can occur when interacting with the Shopify Admin API.
#[derive(Debug, Error)]
pub enum ShopifyError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// GraphQL query returned errors.
    #[error("GraphQL errors: {}", format_graphql_errors(.0))]
    GraphQL(Vec<GraphQLError>),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Rate limited by Shopify.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Authentication/authorization failed.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Non-success HTTP status without a GraphQL body.
    #[error("Admin API request failed ({status}): {body}")]
    Status { status: u16, body: String },

    /// Response parsed but did not have the expected shape.
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),
}

/// A GraphQL error returned by the Shopify Admin API.
#[derive(Debug, Clone)]
pub struct GraphQLError {
    /// Error message.
    pub message: String,
    /// Source locations in the query.
    pub locations: Vec<GraphQLErrorLocation>,
    /// Path to the error in the response.
    pub path: Vec<String>,
}

/// Location in a GraphQL query where an error occurred.
#[derive(Debug, Clone)]
pub struct GraphQLErrorLocation {
    /// Line number (1-indexed).
    pub line: i32,
    /// Column number (1-indexed).
    pub column: i32,
}

impl From<graphql_client::Error> for GraphQLError {
    fn from(error: graphql_client::Error) -> Self {
        Self {
            message: error.message,
            locations: error
                .locations
                .unwrap_or_default()
                .into_iter()
                .map(|l| GraphQLErrorLocation {
                    line: l.line,
                    column: l.column,
                })
                .collect(),
            path: error
                .path
                .unwrap_or_default()
                .into_iter()
                .map(|fragment| match fragment {
                    graphql_client::PathFragment::Key(key) => key,
                    graphql_client::PathFragment::Index(idx) => idx.to_string(),
                })
                .collect(),
        }
    }
}

fn format_graphql_errors(errors: &[GraphQLError]) -> String {
    if errors.is_empty() {
        return "(no error details provided)".to_string();
    }

    errors
        .iter()
        .enumerate()
        .map(|(i, e)| {
            let mut parts = Vec::new();

            if !e.message.is_empty() {
                parts.push(e.message.clone());
            }

            if !e.path.is_empty() {
                parts.push(format!("path: {}", e.path.join(".")));
            }

            if let Some(loc) = e.locations.first() {
                parts.push(format!("at line {}:{}", loc.line, loc.column));
            }

            if parts.is_empty() {
                format!("[error {}]: (no details)", i + 1)
            } else {
                parts.join(" ")
            }
        })
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graphql_error_formatting() {
        let errors = vec![
            GraphQLError {
                message: "Field 'customers' doesn't exist".to_string(),
                locations: vec![],
                path: vec![],
            },
            GraphQLError {
                message: "Access denied".to_string(),
                locations: vec![],
                path: vec![],
            },
        ];
        let err = ShopifyError::GraphQL(errors);
        assert_eq!(
            err.to_string(),
            "GraphQL errors: Field 'customers' doesn't exist; Access denied"
        );
    }

    #[test]
    fn test_graphql_error_path_and_location() {
        let errors = vec![GraphQLError {
            message: String::new(),
            locations: vec![GraphQLErrorLocation { line: 3, column: 7 }],
            path: vec!["customers".to_string(), "edges".to_string(), "0".to_string()],
        }];
        let err = ShopifyError::GraphQL(errors);
        assert_eq!(
            err.to_string(),
            "GraphQL errors: path: customers.edges.0 at line 3:7"
        );
    }

    #[test]
    fn test_graphql_error_no_details() {
        let err = ShopifyError::GraphQL(vec![GraphQLError {
            message: String::new(),
            locations: vec![],
            path: vec![],
        }]);
        assert_eq!(err.to_string(), "GraphQL errors: [error 1]: (no details)");

        let err = ShopifyError::GraphQL(vec![]);
        assert_eq!(
            err.to_string(),
            "GraphQL errors: (no error details provided)"
        );
    }

    #[test]
    fn test_from_graphql_client_error() {
        let raw = serde_json::json!({
            "message": "Throttled",
            "locations": [{ "line": 2, "column": 5 }],
            "path": ["customerCreate", 0]
        });
        let error: graphql_client::Error = serde_json::from_value(raw).unwrap_or_else(|e| {
            panic!("graphql error should deserialize: {e}");
        });

        let converted = GraphQLError::from(error);
        assert_eq!(converted.message, "Throttled");
        assert_eq!(converted.path, vec!["customerCreate", "0"]);
        assert_eq!(converted.locations.first().map(|l| l.line), Some(2));
    }

    #[test]
    fn test_status_and_rate_limit_display() {
        let err = ShopifyError::RateLimited(2);
        assert_eq!(err.to_string(), "Rate limited, retry after 2 seconds");

        let err = ShopifyError::Status {
            status: 503,
            body: "upstream unavailable".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Admin API request failed (503): upstream unavailable"
        );
    }
}
