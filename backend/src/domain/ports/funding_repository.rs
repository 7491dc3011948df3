//! Port abstraction for funding ledger persistence adapters.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::funding::FundingRecord;
use crate::domain::page::{Page, PageOf};

/// Persistence errors raised by funding repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FundingPersistenceError {
    /// Repository connection could not be established.
    #[error("funding repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("funding repository query failed: {message}")]
    Query { message: String },
}

impl FundingPersistenceError {
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

/// Port for funding record storage and reconciliation writes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FundingRepository: Send + Sync {
    /// Persist a freshly opened intent.
    async fn insert(&self, record: &FundingRecord) -> Result<(), FundingPersistenceError>;

    /// Fetch a record by identifier.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<FundingRecord>, FundingPersistenceError>;

    /// Stamp the external session reference onto a record once the provider
    /// session exists. Returns whether a record matched.
    async fn attach_session(
        &self,
        id: Uuid,
        session_id: &str,
    ) -> Result<bool, FundingPersistenceError>;

    /// Conditional settlement: move pending → paid exactly once. A record
    /// that is already paid does not match, which is what makes replayed
    /// confirmations harmless.
    async fn mark_paid_if_pending(&self, id: Uuid) -> Result<bool, FundingPersistenceError>;

    /// All paid records, newest first.
    async fn list_paid(&self, page: Page) -> Result<PageOf<FundingRecord>, FundingPersistenceError>;
}
