//! User directory service: administrative listing and moderation plus the
//! self-service profile edit and the public donor search.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::ApiResult;
use crate::domain::Error;
use crate::domain::guards::require_role;
use crate::domain::page::{Page, PageOf};
use crate::domain::ports::{DonorSearchFilter, UserPersistenceError, UserRepository};
use crate::domain::user::{
    AccountStatus, DonorCard, ModerationEdit, ProfileEdit, Role, User, UserProfile,
};

fn map_repository_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        // Moderation and profile edits never touch the email key.
        UserPersistenceError::DuplicateEmail { .. } => {
            Error::internal("unexpected duplicate email on update")
        }
    }
}

/// Service over the user collection for reads and non-credential mutation.
#[derive(Clone)]
pub struct UserDirectory {
    users: Arc<dyn UserRepository>,
}

impl UserDirectory {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Admin-only listing, optionally filtered by account status.
    ///
    /// Projections never include the password hash.
    pub async fn list_users(
        &self,
        caller: &User,
        status: Option<AccountStatus>,
        page: Page,
    ) -> ApiResult<PageOf<UserProfile>> {
        require_role(caller, &[Role::Admin])?;

        let users = self
            .users
            .list(status, page)
            .await
            .map_err(map_repository_error)?;
        Ok(PageOf {
            items: users.items.iter().map(User::profile).collect(),
            total: users.total,
        })
    }

    /// Public donor search with a privacy-minimising projection.
    pub async fn search_users(
        &self,
        filter: &DonorSearchFilter,
        page: Page,
    ) -> ApiResult<PageOf<DonorCard>> {
        let users = self
            .users
            .search(filter, page)
            .await
            .map_err(map_repository_error)?;
        Ok(PageOf {
            items: users.items.iter().map(User::donor_card).collect(),
            total: users.total,
        })
    }

    /// Self-service profile edit. Email, role, and status are not
    /// representable in the edit type, so they cannot change here.
    pub async fn edit_own_profile(&self, caller: &User, edit: ProfileEdit) -> ApiResult<()> {
        if edit.is_empty() {
            return Err(Error::invalid_request("No profile fields to update."));
        }

        let matched = self
            .users
            .update_profile(&caller.email, &edit)
            .await
            .map_err(map_repository_error)?;
        if !matched {
            return Err(Error::not_found("User not found."));
        }
        Ok(())
    }

    /// Admin-only role/status moderation.
    ///
    /// Unrecognised values never reach this method: the transport parses
    /// them to `None`, and a `None` field leaves the stored value alone.
    pub async fn edit_user(
        &self,
        caller: &User,
        target: Uuid,
        edit: ModerationEdit,
    ) -> ApiResult<()> {
        require_role(caller, &[Role::Admin])?;

        let matched = self
            .users
            .apply_moderation(target, edit)
            .await
            .map_err(map_repository_error)?;
        if !matched {
            return Err(Error::not_found("User not found."));
        }

        tracing::info!(user_id = %target, "user moderated");
        Ok(())
    }
}

#[cfg(test)]
#[path = "user_directory_tests.rs"]
mod tests;
