//! Customer lookup and marketing consent mutations for the Admin API.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use newsletter_core::Email;

use super::AdminClient;
use crate::shopify::ShopifyError;
use crate::shopify::types::{
    CustomerMutationPayload, EmailMarketingConsentInput, MutationOutcome, NEWSLETTER_TAG,
    Subscriber,
};

/// Selection shared by the lookup query and both mutations.
macro_rules! customer_fragment {
    () => {
        r"
        fragment CustomerFragment on Customer {
            id
            email
            emailMarketingConsent {
                consentUpdatedAt
                marketingOptInLevel
                marketingState
            }
        }
        "
    };
}

const GET_CUSTOMER_BY_EMAIL: &str = concat!(
    customer_fragment!(),
    r"
    query getCustomerByEmail($query: String!) {
        customers(first: 1, query: $query) {
            edges {
                node {
                    ...CustomerFragment
                }
            }
        }
    }
    "
);

const NEW_CUSTOMER_LEAD: &str = concat!(
    customer_fragment!(),
    r"
    mutation newCustomerLead($input: CustomerInput!) {
        customerCreate(input: $input) {
            customer {
                ...CustomerFragment
            }
            userErrors {
                field
                message
            }
        }
    }
    "
);

const UPDATE_CUSTOMER_MARKETING_CONSENT: &str = concat!(
    customer_fragment!(),
    r"
    mutation updateCustomerMarketingConsent($input: CustomerEmailMarketingConsentUpdateInput!) {
        customerEmailMarketingConsentUpdate(input: $input) {
            customer {
                ...CustomerFragment
            }
            userErrors {
                field
                message
            }
        }
    }
    "
);

/// Build a Shopify customer search query matching one email address exactly.
fn email_search_query(email: &Email) -> String {
    let escaped = email.as_str().replace('\\', "\\\\").replace('"', "\\\"");
    format!("email:\"{escaped}\"")
}

impl AdminClient {
    /// Find the customer whose email matches `email`.
    ///
    /// Returns `Ok(None)` when the search comes back empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns an error response.
    #[instrument(skip(self), fields(email = %email))]
    pub async fn find_customer_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<Subscriber>, ShopifyError> {
        #[derive(Serialize)]
        struct Variables {
            query: String,
        }

        #[derive(Deserialize)]
        struct Response {
            customers: CustomerConnection,
        }

        #[derive(Deserialize)]
        struct CustomerConnection {
            edges: Vec<CustomerEdge>,
        }

        #[derive(Deserialize)]
        struct CustomerEdge {
            node: Subscriber,
        }

        let variables = Variables {
            query: email_search_query(email),
        };

        let response: Response = self
            .execute("getCustomerByEmail", GET_CUSTOMER_BY_EMAIL, variables)
            .await?;

        Ok(response
            .customers
            .edges
            .into_iter()
            .next()
            .map(|edge| edge.node))
    }

    /// Create a customer who is subscribed to marketing email.
    ///
    /// The customer is tagged `newsletter`.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or the payload is missing.
    /// Validation failures come back as [`MutationOutcome::Rejected`].
    #[instrument(skip(self, consent), fields(email = %email))]
    pub async fn create_subscriber(
        &self,
        email: &Email,
        consent: &EmailMarketingConsentInput,
    ) -> Result<MutationOutcome, ShopifyError> {
        #[derive(Serialize)]
        struct Variables<'a> {
            input: CustomerInput<'a>,
        }

        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct CustomerInput<'a> {
            email: &'a str,
            email_marketing_consent: &'a EmailMarketingConsentInput,
            tags: [&'a str; 1],
        }

        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Response {
            customer_create: Option<CustomerMutationPayload>,
        }

        let variables = Variables {
            input: CustomerInput {
                email: email.as_str(),
                email_marketing_consent: consent,
                tags: [NEWSLETTER_TAG],
            },
        };

        let response: Response = self
            .execute("newCustomerLead", NEW_CUSTOMER_LEAD, variables)
            .await?;

        response
            .customer_create
            .ok_or_else(|| {
                ShopifyError::UnexpectedResponse("customerCreate returned null".to_string())
            })?
            .into_outcome("customerCreate")
    }

    /// Replace an existing customer's email marketing consent.
    ///
    /// # Arguments
    ///
    /// * `customer_id` - Shopify customer GID
    /// * `consent` - New consent record
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or the payload is missing.
    /// Validation failures come back as [`MutationOutcome::Rejected`].
    #[instrument(skip(self, consent), fields(customer_id = %customer_id))]
    pub async fn update_email_marketing_consent(
        &self,
        customer_id: &str,
        consent: &EmailMarketingConsentInput,
    ) -> Result<MutationOutcome, ShopifyError> {
        #[derive(Serialize)]
        struct Variables<'a> {
            input: ConsentUpdateInput<'a>,
        }

        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct ConsentUpdateInput<'a> {
            customer_id: &'a str,
            email_marketing_consent: &'a EmailMarketingConsentInput,
        }

        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Response {
            customer_email_marketing_consent_update: Option<CustomerMutationPayload>,
        }

        let variables = Variables {
            input: ConsentUpdateInput {
                customer_id,
                email_marketing_consent: consent,
            },
        };

        let response: Response = self
            .execute(
                "updateCustomerMarketingConsent",
                UPDATE_CUSTOMER_MARKETING_CONSENT,
                variables,
            )
            .await?;

        response
            .customer_email_marketing_consent_update
            .ok_or_else(|| {
                ShopifyError::UnexpectedResponse(
                    "customerEmailMarketingConsentUpdate returned null".to_string(),
                )
            })?
            .into_outcome("customerEmailMarketingConsentUpdate")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_email_search_query_is_quoted() {
        let email = Email::parse("Reader+News@Example.com").unwrap();
        assert_eq!(email_search_query(&email), "email:\"reader+news@example.com\"");
    }

    #[test]
    fn test_email_search_query_escapes_quotes() {
        let email = Email::parse("\"odd\"@example.com").unwrap();
        assert_eq!(
            email_search_query(&email),
            "email:\"\\\"odd\\\"@example.com\""
        );
    }

    #[test]
    fn test_documents_embed_fragment() {
        for document in [
            GET_CUSTOMER_BY_EMAIL,
            NEW_CUSTOMER_LEAD,
            UPDATE_CUSTOMER_MARKETING_CONSENT,
        ] {
            assert!(document.contains("fragment CustomerFragment on Customer"));
            assert!(document.contains("...CustomerFragment"));
        }
    }

    #[test]
    fn test_mutations_select_user_errors() {
        assert!(NEW_CUSTOMER_LEAD.contains("customerCreate(input: $input)"));
        assert!(
            UPDATE_CUSTOMER_MARKETING_CONSENT
                .contains("customerEmailMarketingConsentUpdate(input: $input)")
        );
        for document in [NEW_CUSTOMER_LEAD, UPDATE_CUSTOMER_MARKETING_CONSENT] {
            assert!(document.contains("userErrors"));
        }
    }
}
