//! Stripe Checkout adapter for the checkout provider port.
//!
//! This adapter owns transport details only: form encoding of the
//! checkout-session create call, bearer authentication, HTTP error mapping,
//! and decoding the session payload back into port types. The local funding
//! record id travels in `metadata[funding_id]` so confirmation can recover
//! it from the session alone.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use uuid::Uuid;

use crate::domain::ports::{
    CheckoutProvider, CheckoutProviderError, CheckoutSession, CheckoutSessionRequest,
    CheckoutSessionStatus, ProviderPaymentStatus,
};

const DEFAULT_API_BASE: &str = "https://api.stripe.com/v1";
const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
const CURRENCY: &str = "usd";

/// Redirect targets the provider sends the payer back to.
#[derive(Debug, Clone)]
pub struct CheckoutRedirects {
    pub success_url: String,
    pub cancel_url: String,
}

/// Stripe Checkout adapter over the REST API.
pub struct StripeCheckoutProvider {
    client: Client,
    api_base: String,
    secret_key: String,
    redirects: CheckoutRedirects,
}

impl StripeCheckoutProvider {
    /// Build an adapter against the public Stripe API.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        secret_key: impl Into<String>,
        redirects: CheckoutRedirects,
    ) -> Result<Self, reqwest::Error> {
        Self::with_api_base(secret_key, redirects, DEFAULT_API_BASE)
    }

    /// Build an adapter against an explicit API base, used by tests to
    /// point at a stub server.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn with_api_base(
        secret_key: impl Into<String>,
        redirects: CheckoutRedirects,
        api_base: impl Into<String>,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECONDS))
            .build()?;
        Ok(Self {
            client,
            api_base: api_base.into().trim_end_matches('/').to_owned(),
            secret_key: secret_key.into(),
            redirects,
        })
    }
}

#[derive(Debug, Deserialize)]
struct SessionDto {
    id: String,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    payment_status: Option<String>,
    #[serde(default)]
    metadata: Metadata,
}

#[derive(Debug, Default, Deserialize)]
struct Metadata {
    #[serde(default)]
    funding_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorDto {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

fn map_transport_error(error: reqwest::Error) -> CheckoutProviderError {
    CheckoutProviderError::transport(error.to_string())
}

fn provider_error(status: reqwest::StatusCode, body: &[u8]) -> CheckoutProviderError {
    let message = serde_json::from_slice::<ErrorDto>(body)
        .ok()
        .and_then(|dto| dto.error.message)
        .unwrap_or_else(|| format!("provider returned HTTP {status}"));
    CheckoutProviderError::provider(message)
}

async fn decode_session(response: reqwest::Response) -> Result<SessionDto, CheckoutProviderError> {
    let status = response.status();
    let body = response.bytes().await.map_err(map_transport_error)?;
    if !status.is_success() {
        return Err(provider_error(status, body.as_ref()));
    }
    serde_json::from_slice(body.as_ref())
        .map_err(|err| CheckoutProviderError::provider(format!("malformed session payload: {err}")))
}

#[async_trait]
impl CheckoutProvider for StripeCheckoutProvider {
    async fn create_session(
        &self,
        request: &CheckoutSessionRequest,
    ) -> Result<CheckoutSession, CheckoutProviderError> {
        let amount = request.amount.value().to_string();
        let funding_id = request.funding_id.to_string();
        let form: Vec<(&str, &str)> = vec![
            ("mode", "payment"),
            ("success_url", &self.redirects.success_url),
            ("cancel_url", &self.redirects.cancel_url),
            ("customer_email", request.contributor_email.as_ref()),
            ("line_items[0][quantity]", "1"),
            ("line_items[0][price_data][currency]", CURRENCY),
            ("line_items[0][price_data][unit_amount]", &amount),
            (
                "line_items[0][price_data][product_data][name]",
                "BloodLink platform funding",
            ),
            ("metadata[funding_id]", &funding_id),
        ];

        let response = self
            .client
            .post(format!("{}/checkout/sessions", self.api_base))
            .bearer_auth(&self.secret_key)
            .form(&form)
            .send()
            .await
            .map_err(map_transport_error)?;

        let session = decode_session(response).await?;
        let url = session.url.ok_or_else(|| {
            CheckoutProviderError::provider("session payload is missing the redirect url")
        })?;
        Ok(CheckoutSession {
            id: session.id,
            redirect_url: url,
        })
    }

    async fn fetch_session(
        &self,
        session_id: &str,
    ) -> Result<CheckoutSessionStatus, CheckoutProviderError> {
        let response = self
            .client
            .get(format!("{}/checkout/sessions/{session_id}", self.api_base))
            .bearer_auth(&self.secret_key)
            .send()
            .await
            .map_err(map_transport_error)?;

        let session = decode_session(response).await?;
        let payment_status = match session.payment_status.as_deref() {
            Some("paid") => ProviderPaymentStatus::Paid,
            _ => ProviderPaymentStatus::Unpaid,
        };
        let funding_id = session
            .metadata
            .funding_id
            .as_deref()
            .and_then(|raw| Uuid::parse_str(raw).ok());
        Ok(CheckoutSessionStatus {
            id: session.id,
            payment_status,
            funding_id,
        })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    #[test]
    fn session_payload_decodes_metadata_and_status() {
        let payload = serde_json::json!({
            "id": "cs_test_123",
            "url": "https://checkout.stripe.com/c/pay/cs_test_123",
            "payment_status": "paid",
            "metadata": {"funding_id": "3fa85f64-5717-4562-b3fc-2c963f66afa6"}
        });
        let dto: SessionDto =
            serde_json::from_value(payload).expect("session payload decodes");
        assert_eq!(dto.id, "cs_test_123");
        assert_eq!(dto.payment_status.as_deref(), Some("paid"));
        assert_eq!(
            dto.metadata.funding_id.as_deref(),
            Some("3fa85f64-5717-4562-b3fc-2c963f66afa6")
        );
    }

    #[test]
    fn error_payload_surfaces_the_provider_message() {
        let body = serde_json::json!({"error": {"message": "No such session"}});
        let err = provider_error(
            reqwest::StatusCode::NOT_FOUND,
            body.to_string().as_bytes(),
        );
        assert_eq!(
            err,
            CheckoutProviderError::provider("No such session")
        );
    }

    #[test]
    fn missing_error_message_falls_back_to_the_status() {
        let err = provider_error(reqwest::StatusCode::INTERNAL_SERVER_ERROR, b"{}");
        assert!(matches!(err, CheckoutProviderError::Provider { .. }));
    }
}
