//! Composable authorization guards.
//!
//! Guards run after the session token is verified and the live user is
//! fetched. Each guard is a pure predicate over that user returning
//! Forbidden on failure; handlers chain them with `?` so the first failing
//! guard determines the response and no side effects happen beforehand.

use crate::domain::error::Error;
use crate::domain::user::{AccountStatus, Email, Role, User};

/// Fail with Forbidden unless the account status is active.
pub fn require_active_account(caller: &User) -> Result<(), Error> {
    if caller.status == AccountStatus::Active {
        Ok(())
    } else {
        Err(Error::forbidden("account is blocked"))
    }
}

/// Fail with Forbidden unless the caller's role is in `allowed`.
pub fn require_role(caller: &User, allowed: &[Role]) -> Result<(), Error> {
    if allowed.contains(&caller.role) {
        Ok(())
    } else {
        Err(Error::forbidden("insufficient role"))
    }
}

/// Fail with Forbidden unless the caller owns the resource or holds one of
/// the `elevated` roles.
pub fn require_owner_or_role(caller: &User, owner: &Email, elevated: &[Role]) -> Result<(), Error> {
    if caller.email == *owner || elevated.contains(&caller.role) {
        Ok(())
    } else {
        Err(Error::forbidden("caller is neither owner nor elevated"))
    }
}
