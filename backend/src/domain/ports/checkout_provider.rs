//! Port abstraction for the external payment provider.
//!
//! In hexagonal terms this is a driven port: the payment reconciler calls
//! it to open checkout sessions and to look up their settlement state
//! without knowing the provider's wire protocol.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::funding::MinorUnits;
use crate::domain::user::Email;

/// Errors raised by payment provider adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CheckoutProviderError {
    /// The provider could not be reached.
    #[error("payment provider unreachable: {message}")]
    Transport { message: String },
    /// The provider rejected the request or returned an error payload.
    #[error("payment provider error: {message}")]
    Provider { message: String },
}

impl CheckoutProviderError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn provider(message: impl Into<String>) -> Self {
        Self::Provider {
            message: message.into(),
        }
    }
}

/// Inputs for opening a provider checkout session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSessionRequest {
    pub amount: MinorUnits,
    /// Local ledger record id, embedded in provider metadata so the
    /// confirmation can find its way back.
    pub funding_id: Uuid,
    pub contributor_email: Email,
    pub contributor_name: String,
}

/// A freshly created provider session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSession {
    pub id: String,
    /// URL the caller is redirected to for payment.
    pub redirect_url: String,
}

/// Settlement state the provider reports for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderPaymentStatus {
    Paid,
    Unpaid,
}

/// Provider-side view of an existing session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSessionStatus {
    pub id: String,
    pub payment_status: ProviderPaymentStatus,
    /// Ledger record id recovered from session metadata, when present.
    pub funding_id: Option<Uuid>,
}

/// Port for the external checkout provider.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CheckoutProvider: Send + Sync {
    /// Open a checkout session for the given intent.
    async fn create_session(
        &self,
        request: &CheckoutSessionRequest,
    ) -> Result<CheckoutSession, CheckoutProviderError>;

    /// Look up the settlement state of an existing session.
    async fn fetch_session(
        &self,
        session_id: &str,
    ) -> Result<CheckoutSessionStatus, CheckoutProviderError>;
}

/// In-memory provider used by tests and local development.
///
/// Sessions are named `cs_fixture_<funding-id>` so the fixture can recover
/// the metadata on fetch without holding state; every fetched session
/// reports as paid.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCheckoutProvider;

const FIXTURE_SESSION_PREFIX: &str = "cs_fixture_";

#[async_trait]
impl CheckoutProvider for FixtureCheckoutProvider {
    async fn create_session(
        &self,
        request: &CheckoutSessionRequest,
    ) -> Result<CheckoutSession, CheckoutProviderError> {
        let id = format!("{FIXTURE_SESSION_PREFIX}{}", request.funding_id);
        Ok(CheckoutSession {
            redirect_url: format!("https://checkout.invalid/pay/{id}"),
            id,
        })
    }

    async fn fetch_session(
        &self,
        session_id: &str,
    ) -> Result<CheckoutSessionStatus, CheckoutProviderError> {
        let funding_id = session_id
            .strip_prefix(FIXTURE_SESSION_PREFIX)
            .and_then(|raw| Uuid::parse_str(raw).ok());
        if funding_id.is_none() {
            return Err(CheckoutProviderError::provider(format!(
                "unknown session: {session_id}"
            )));
        }
        Ok(CheckoutSessionStatus {
            id: session_id.to_owned(),
            payment_status: ProviderPaymentStatus::Paid,
            funding_id,
        })
    }
}
