//! Funding intent and confirmation reconciliation.
//!
//! The two-phase flow: a pending ledger record is written before the
//! provider is contacted, so a failed provider call can only ever orphan a
//! pending record, never lose a paid one. Confirmation settles the record
//! with a conditional update keyed on it still being pending, which makes a
//! replayed confirmation observable as a conflict instead of a double count.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ApiResult;
use crate::domain::Error;
use crate::domain::funding::{FundingRecord, FundingStatus, MinorUnits};
use crate::domain::page::{Page, PageOf};
use crate::domain::ports::{
    CheckoutProvider, CheckoutProviderError, CheckoutSession, CheckoutSessionRequest,
    FundingPersistenceError, FundingRepository, ProviderPaymentStatus,
};
use crate::domain::user::User;

fn map_repository_error(error: FundingPersistenceError) -> Error {
    match error {
        FundingPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("funding repository unavailable: {message}"))
        }
        FundingPersistenceError::Query { message } => {
            Error::internal(format!("funding repository error: {message}"))
        }
    }
}

fn map_provider_error(error: CheckoutProviderError) -> Error {
    match error {
        CheckoutProviderError::Transport { message }
        | CheckoutProviderError::Provider { message } => Error::upstream(message),
    }
}

/// Service reconciling the local funding ledger with the payment provider.
#[derive(Clone)]
pub struct PaymentReconciler {
    fundings: Arc<dyn FundingRepository>,
    provider: Arc<dyn CheckoutProvider>,
    clock: Arc<dyn Clock>,
}

impl PaymentReconciler {
    pub fn new(
        fundings: Arc<dyn FundingRepository>,
        provider: Arc<dyn CheckoutProvider>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            fundings,
            provider,
            clock,
        }
    }

    /// Open a funding intent and return the provider checkout session.
    ///
    /// `amount` arrives in decimal currency units and is stored in integer
    /// minor units. The pending record is persisted before the provider
    /// call; its id travels in the session metadata so the confirmation can
    /// find it again.
    pub async fn open_intent(&self, caller: &User, amount: f64) -> ApiResult<CheckoutSession> {
        let amount = MinorUnits::from_decimal(amount)
            .ok_or_else(|| Error::invalid_request("Invalid funding amount."))?;

        let record = FundingRecord::open(caller.name.clone(), amount, self.clock.utc());
        self.fundings
            .insert(&record)
            .await
            .map_err(map_repository_error)?;

        let session = self
            .provider
            .create_session(&CheckoutSessionRequest {
                amount,
                funding_id: record.id,
                contributor_email: caller.email.clone(),
                contributor_name: caller.name.clone(),
            })
            .await
            .map_err(map_provider_error)?;

        self.fundings
            .attach_session(record.id, &session.id)
            .await
            .map_err(map_repository_error)?;

        tracing::info!(funding_id = %record.id, session_id = %session.id, "funding intent opened");
        Ok(session)
    }

    /// Settle a funding record against the provider's view of a session.
    ///
    /// Only a provider-confirmed payment promotes the record to paid, and
    /// only once; a replay of the same session id observes the conditional
    /// update not matching and surfaces a conflict. A session id that does
    /// not match the reference stored on the record is refused outright.
    pub async fn confirm(&self, session_id: &str) -> ApiResult<FundingRecord> {
        let status = self
            .provider
            .fetch_session(session_id)
            .await
            .map_err(map_provider_error)?;

        let funding_id = status
            .funding_id
            .ok_or_else(|| Error::not_found("Funding record not found."))?;

        if status.payment_status != ProviderPaymentStatus::Paid {
            return Err(Error::invalid_transition("Payment is not completed."));
        }

        let mut record = self
            .fundings
            .find_by_id(funding_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found("Funding record not found."))?;

        // The session id in the provider metadata must match the reference
        // stamped on the record when the intent was opened.
        if record.session_id.as_deref() != Some(session_id) {
            return Err(Error::not_found("Funding record not found."));
        }

        let settled = self
            .fundings
            .mark_paid_if_pending(funding_id)
            .await
            .map_err(map_repository_error)?;
        if !settled {
            return Err(Error::conflict("Funding already confirmed."));
        }

        tracing::info!(funding_id = %funding_id, "funding confirmed");
        record.status = FundingStatus::Paid;
        Ok(record)
    }

    /// Paid records, newest first. Visible to any authenticated caller.
    pub async fn list_paid(&self, page: Page) -> ApiResult<PageOf<FundingRecord>> {
        self.fundings
            .list_paid(page)
            .await
            .map_err(map_repository_error)
    }
}

#[cfg(test)]
#[path = "payment_reconciler_tests.rs"]
mod tests;
