//! Authentication primitives: login credentials and registration details.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use zeroize::Zeroizing;

use crate::domain::user::{BloodGroup, Email, EmailValidationError, Location};

/// Domain error returned when an authentication payload is invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialValidationError {
    /// Email failed basic shape validation.
    Email(EmailValidationError),
    /// Password was blank.
    EmptyPassword,
    /// Display name was missing or blank once trimmed.
    EmptyName,
}

impl fmt::Display for CredentialValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Email(inner) => inner.fmt(f),
            Self::EmptyPassword => write!(f, "password must not be empty"),
            Self::EmptyName => write!(f, "name must not be empty"),
        }
    }
}

impl std::error::Error for CredentialValidationError {}

impl From<EmailValidationError> for CredentialValidationError {
    fn from(value: EmailValidationError) -> Self {
        Self::Email(value)
    }
}

/// Validated login credentials used by the account service.
///
/// ## Invariants
/// - `email` satisfies [`Email`] shape validation.
/// - `password` is non-empty but otherwise untouched so credential
///   comparisons never surprise the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: Email,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, CredentialValidationError> {
        if password.is_empty() {
            return Err(CredentialValidationError::EmptyPassword);
        }
        Ok(Self {
            email: Email::new(email)?,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Email used for the user lookup.
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Validated registration payload.
///
/// Status and role are never part of this type: registration always produces
/// an active donor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub email: Email,
    pub name: String,
    pub blood_group: BloodGroup,
    pub photo: String,
    pub location: Location,
    password: Zeroizing<String>,
}

impl Registration {
    /// Construct a registration from validated components plus raw secrets.
    pub fn try_new(
        email: &str,
        name: &str,
        blood_group: BloodGroup,
        photo: impl Into<String>,
        location: Location,
        password: &str,
    ) -> Result<Self, CredentialValidationError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(CredentialValidationError::EmptyName);
        }
        if password.is_empty() {
            return Err(CredentialValidationError::EmptyPassword);
        }
        Ok(Self {
            email: Email::new(email)?,
            name: trimmed.to_owned(),
            blood_group,
            photo: photo.into(),
            location,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Raw password handed to the hashing port exactly once.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}
