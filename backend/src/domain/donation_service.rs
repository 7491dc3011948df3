//! Donation request lifecycle service.
//!
//! Owns creation, the accept and settlement transitions, and deletion.
//! Both transitions are conditional updates at the repository so exactly
//! one concurrent caller wins; the losers surface `InvalidTransition`.

use std::sync::Arc;

use mockable::Clock;
use uuid::Uuid;

use crate::domain::ApiResult;
use crate::domain::Error;
use crate::domain::donation::{
    DonationDraft, DonationRequest, DonationStatus, DonorAssignment, Requester,
};
use crate::domain::guards::{require_active_account, require_owner_or_role};
use crate::domain::page::{Page, PageOf};
use crate::domain::ports::{DonationPersistenceError, DonationRepository};
use crate::domain::user::{ELEVATED_ROLES, Role, User};

fn map_repository_error(error: DonationPersistenceError) -> Error {
    match error {
        DonationPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("donation repository unavailable: {message}"))
        }
        DonationPersistenceError::Query { message } => {
            Error::internal(format!("donation repository error: {message}"))
        }
    }
}

/// Service owning the donation request state machine.
#[derive(Clone)]
pub struct DonationService {
    donations: Arc<dyn DonationRepository>,
    clock: Arc<dyn Clock>,
}

impl DonationService {
    pub fn new(donations: Arc<dyn DonationRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { donations, clock }
    }

    /// Create a pending request owned by `caller`.
    ///
    /// Status and creation time are always server-assigned; the draft type
    /// cannot carry either.
    pub async fn create(&self, caller: &User, draft: DonationDraft) -> ApiResult<DonationRequest> {
        require_active_account(caller)?;

        let requester = Requester {
            name: caller.name.clone(),
            email: caller.email.clone(),
        };
        let request = DonationRequest::create(requester, draft, self.clock.utc());
        self.donations
            .insert(&request)
            .await
            .map_err(map_repository_error)?;

        tracing::info!(request_id = %request.id, "donation request created");
        Ok(request)
    }

    /// Requests owned by `caller`, newest first.
    pub async fn list_mine(&self, caller: &User, page: Page) -> ApiResult<PageOf<DonationRequest>> {
        self.donations
            .list_by_requester(&caller.email, page)
            .await
            .map_err(map_repository_error)
    }

    /// Public browse feed, optionally filtered by status, newest first.
    pub async fn browse(
        &self,
        status: Option<DonationStatus>,
        page: Page,
    ) -> ApiResult<PageOf<DonationRequest>> {
        self.donations
            .list(status, page)
            .await
            .map_err(map_repository_error)
    }

    /// Single-record read. Anonymous exposure policy is applied by the
    /// transport layer; storage always returns the full record.
    pub async fn get(&self, id: Uuid) -> ApiResult<DonationRequest> {
        self.donations
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found("Request not found."))
    }

    /// Accept transition: pending → in-progress, donor set to `caller`.
    ///
    /// The repository write matches on the record still being pending, so
    /// under concurrent acceptance exactly one donor is ever assigned.
    pub async fn accept(&self, caller: &User, id: Uuid) -> ApiResult<()> {
        // Existence first, so a missing id is NotFound rather than a
        // transition failure.
        self.get(id).await?;

        let donor = DonorAssignment {
            name: caller.name.clone(),
            email: caller.email.clone(),
        };
        let accepted = self
            .donations
            .assign_donor_if_pending(id, &donor)
            .await
            .map_err(map_repository_error)?;
        if !accepted {
            // The record may have been deleted between the read and the
            // conditional write; re-fetch so that case stays NotFound.
            self.get(id).await?;
            return Err(Error::invalid_transition("Request already accepted."));
        }

        tracing::info!(request_id = %id, donor = %donor.email, "donation request accepted");
        Ok(())
    }

    /// Settlement transition: in-progress → done or canceled.
    ///
    /// Allowed for the original requester and elevated roles. Any other
    /// target status is rejected before touching storage.
    pub async fn set_status(
        &self,
        caller: &User,
        id: Uuid,
        target: DonationStatus,
    ) -> ApiResult<()> {
        if !target.is_settlement() {
            return Err(Error::invalid_transition(format!(
                "cannot settle a request as {target}"
            )));
        }

        let request = self.get(id).await?;
        require_owner_or_role(caller, &request.requester.email, &ELEVATED_ROLES)?;

        let updated = self
            .donations
            .update_status_if(id, DonationStatus::InProgress, target)
            .await
            .map_err(map_repository_error)?;
        if !updated {
            return Err(Error::invalid_transition(format!(
                "request is not in progress, cannot mark it {target}"
            )));
        }

        tracing::info!(request_id = %id, status = %target, "donation request settled");
        Ok(())
    }

    /// Delete, allowed for the original requester and admins, from any state.
    pub async fn delete(&self, caller: &User, id: Uuid) -> ApiResult<()> {
        let request = self.get(id).await?;
        require_owner_or_role(caller, &request.requester.email, &[Role::Admin])?;

        let removed = self
            .donations
            .delete(id)
            .await
            .map_err(map_repository_error)?;
        if !removed {
            return Err(Error::not_found("Request not found."));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "donation_service_tests.rs"]
mod tests;
