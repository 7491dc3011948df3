//! Port abstraction for user persistence adapters and their errors.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::page::{Page, PageOf};
use crate::domain::user::{
    AccountStatus, BloodGroup, Email, ModerationEdit, ProfileEdit, User,
};

/// Persistence errors raised by user repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserPersistenceError {
    /// Repository connection could not be established.
    #[error("user repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("user repository query failed: {message}")]
    Query { message: String },
    /// Insert violated the email uniqueness invariant.
    #[error("email already in use: {email}")]
    DuplicateEmail { email: String },
}

impl UserPersistenceError {
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

    pub fn duplicate_email(email: impl Into<String>) -> Self {
        Self::DuplicateEmail {
            email: email.into(),
        }
    }
}

/// Filter for the public donor search; `None` fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DonorSearchFilter {
    pub blood_group: Option<BloodGroup>,
    pub district: Option<String>,
    pub upazila: Option<String>,
}

/// Port for user record storage and retrieval.
///
/// Listing methods sort by registration time descending and report the
/// total matching count alongside the requested window.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user; fails with `DuplicateEmail` when the email is
    /// already taken, closing the check-then-insert race.
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError>;

    /// Fetch a user by email, the unique key.
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch a user by generated identifier.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, UserPersistenceError>;

    /// Administrative listing with an optional status filter.
    async fn list(
        &self,
        status: Option<AccountStatus>,
        page: Page,
    ) -> Result<PageOf<User>, UserPersistenceError>;

    /// Public donor search by blood group and location.
    async fn search(
        &self,
        filter: &DonorSearchFilter,
        page: Page,
    ) -> Result<PageOf<User>, UserPersistenceError>;

    /// Apply a self-service profile edit; returns whether a record matched.
    async fn update_profile(
        &self,
        email: &Email,
        edit: &ProfileEdit,
    ) -> Result<bool, UserPersistenceError>;

    /// Apply an administrative role/status edit; returns whether a record
    /// matched.
    async fn apply_moderation(
        &self,
        id: Uuid,
        edit: ModerationEdit,
    ) -> Result<bool, UserPersistenceError>;
}
