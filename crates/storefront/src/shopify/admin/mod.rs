//! Shopify Admin API GraphQL client.
//!
//! Authenticates with a static Admin API access token and posts GraphQL
//! documents to the store's `graphql.json` endpoint.

use std::sync::Arc;

use graphql_client::QueryBody;
use secrecy::{ExposeSecret, SecretString};
use serde::{Serialize, de::DeserializeOwned};

use crate::config::ShopifyAdminConfig;

use super::{GraphQLError, ShopifyError};

mod customers;

/// User agent sent with every Admin API request.
const USER_AGENT: &str = concat!("newsletter-storefront/", env!("CARGO_PKG_VERSION"));

/// Fallback delay when a 429 response has no usable `Retry-After` header.
const DEFAULT_RETRY_AFTER_SECS: u64 = 2;

/// Shopify Admin API GraphQL client.
///
/// Cheaply cloneable; all clones share one connection pool.
#[derive(Clone)]
pub struct AdminClient {
    inner: Arc<AdminClientInner>,
}

struct AdminClientInner {
    client: reqwest::Client,
    endpoint: String,
    access_token: SecretString,
}

impl AdminClient {
    /// Create a new Admin API client.
    ///
    /// # Errors
    ///
    /// Returns `ShopifyError::Http` if the HTTP client fails to build.
    pub fn new(config: &ShopifyAdminConfig) -> Result<Self, ShopifyError> {
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self {
            inner: Arc::new(AdminClientInner {
                client,
                endpoint: config.graphql_endpoint(),
                access_token: config.access_token.clone(),
            }),
        })
    }

    /// The GraphQL endpoint this client posts to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.inner.endpoint
    }

    // =========================================================================
    // GraphQL Execution
    // =========================================================================

    /// Execute a GraphQL operation and return its `data`.
    async fn execute<V, T>(
        &self,
        operation_name: &'static str,
        query: &'static str,
        variables: V,
    ) -> Result<T, ShopifyError>
    where
        V: Serialize,
        T: DeserializeOwned,
    {
        let body = QueryBody {
            variables,
            query,
            operation_name,
        };

        let response = self
            .inner
            .client
            .post(&self.inner.endpoint)
            .header("X-Shopify-Access-Token", self.inner.access_token.expose_secret())
            .json(&body)
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.trim().parse::<f64>().ok())
                .filter(|secs| secs.is_finite() && *secs >= 0.0)
                .map_or(DEFAULT_RETRY_AFTER_SECS, |secs| {
                    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // Checked finite and non-negative
                    let rounded = secs.ceil() as u64;
                    rounded
                });
            return Err(ShopifyError::RateLimited(retry_after));
        }

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(ShopifyError::Unauthorized(
                "Invalid or revoked Admin API access token".to_string(),
            ));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ShopifyError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        let graphql_response: graphql_client::Response<T> = serde_json::from_slice(&bytes)?;

        if let Some(errors) = graphql_response.errors
            && !errors.is_empty()
        {
            return Err(ShopifyError::GraphQL(
                errors.into_iter().map(GraphQLError::from).collect(),
            ));
        }

        graphql_response.data.ok_or_else(|| {
            ShopifyError::UnexpectedResponse(format!("No data in {operation_name} response"))
        })
    }
}
