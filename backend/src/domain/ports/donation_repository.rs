//! Port abstraction for donation request persistence adapters.
//!
//! The accept and status-update operations are expressed as conditional
//! updates so that, under concurrent callers, exactly one transition wins
//! and the rest observe a no-op.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::donation::{DonationRequest, DonationStatus, DonorAssignment};
use crate::domain::page::{Page, PageOf};
use crate::domain::user::Email;

/// Persistence errors raised by donation repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DonationPersistenceError {
    /// Repository connection could not be established.
    #[error("donation repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("donation repository query failed: {message}")]
    Query { message: String },
}

impl DonationPersistenceError {
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Port for donation request storage and lifecycle mutation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DonationRepository: Send + Sync {
    /// Persist a freshly created request.
    async fn insert(&self, request: &DonationRequest) -> Result<(), DonationPersistenceError>;

    /// Fetch a request by identifier.
    async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<DonationRequest>, DonationPersistenceError>;

    /// Requests owned by `requester`, newest first.
    async fn list_by_requester(
        &self,
        requester: &Email,
        page: Page,
    ) -> Result<PageOf<DonationRequest>, DonationPersistenceError>;

    /// All requests, optionally filtered by status, newest first.
    async fn list(
        &self,
        status: Option<DonationStatus>,
        page: Page,
    ) -> Result<PageOf<DonationRequest>, DonationPersistenceError>;

    /// Conditional accept: set the donor and move to in-progress only while
    /// the record is still pending. Returns whether the update matched.
    async fn assign_donor_if_pending(
        &self,
        id: Uuid,
        donor: &DonorAssignment,
    ) -> Result<bool, DonationPersistenceError>;

    /// Conditional status write: move to `target` only while the current
    /// status equals `expected`. Returns whether the update matched.
    async fn update_status_if(
        &self,
        id: Uuid,
        expected: DonationStatus,
        target: DonationStatus,
    ) -> Result<bool, DonationPersistenceError>;

    /// Delete a request; returns whether a record existed.
    async fn delete(&self, id: Uuid) -> Result<bool, DonationPersistenceError>;
}
