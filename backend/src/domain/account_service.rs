//! Account lifecycle service: registration, credential login, and the
//! session-to-account lookup used by authenticated routes.

use std::sync::Arc;

use mockable::Clock;
use uuid::Uuid;

use crate::domain::ApiResult;
use crate::domain::Error;
use crate::domain::auth::{LoginCredentials, Registration};
use crate::domain::ports::{PasswordHasher, UserPersistenceError, UserRepository};
use crate::domain::user::{AccountStatus, Email, Role, User};

fn map_repository_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::DuplicateEmail { .. } => Error::conflict("Email already in use."),
    }
}

/// Service owning account creation and credential checks.
#[derive(Clone)]
pub struct AccountService {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    clock: Arc<dyn Clock>,
}

impl AccountService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            users,
            hasher,
            clock,
        }
    }

    /// Create a new account.
    ///
    /// Every new account starts as an active donor; the caller never chooses
    /// a role or status. A duplicate email is a conflict, whether caught by
    /// the pre-check or by the insert itself racing another registration.
    pub async fn register(&self, registration: Registration) -> ApiResult<User> {
        if self
            .users
            .find_by_email(&registration.email)
            .await
            .map_err(map_repository_error)?
            .is_some()
        {
            return Err(Error::conflict("Email already in use."));
        }

        let user = User {
            id: Uuid::new_v4(),
            password_hash: self.hasher.hash(registration.password()),
            email: registration.email,
            name: registration.name,
            blood_group: registration.blood_group,
            photo: registration.photo,
            location: registration.location,
            status: AccountStatus::Active,
            role: Role::Donor,
            register_at: self.clock.utc(),
        };

        self.users
            .insert(&user)
            .await
            .map_err(map_repository_error)?;

        tracing::info!(user_id = %user.id, "account registered");
        Ok(user)
    }

    /// Check credentials and return the matching account.
    ///
    /// Both an unknown email and a wrong password fail authentication; the
    /// messages differ to preserve the historical API behaviour.
    pub async fn login(&self, credentials: LoginCredentials) -> ApiResult<User> {
        let user = self
            .users
            .find_by_email(credentials.email())
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::unauthorized("User not found."))?;

        if !self
            .hasher
            .verify(credentials.password(), &user.password_hash)
        {
            return Err(Error::unauthorized("Invalid email or password."));
        }

        Ok(user)
    }

    /// Resolve a verified session claim to its live account record.
    ///
    /// This is the fetch half of session verification: the token proved the
    /// claim, this proves the account still exists.
    pub async fn verify_and_fetch(&self, email: &Email) -> ApiResult<User> {
        self.users
            .find_by_email(email)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::unauthorized("Unauthorized access."))
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
