//! User data model: identity, role, account status, and projections.
//!
//! Role and account status are closed enumerations so authorization policy
//! never compares loose strings; anything arriving over the wire is parsed
//! once at the boundary.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Validation errors returned by [`Email::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailValidationError {
    Empty,
    MissingAtSign,
    SurroundingWhitespace,
}

impl fmt::Display for EmailValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "email must not be empty"),
            Self::MissingAtSign => write!(f, "email must contain an @ sign"),
            Self::SurroundingWhitespace => write!(f, "email must not have surrounding whitespace"),
        }
    }
}

impl std::error::Error for EmailValidationError {}

/// Case-sensitive email address used as the unique user key.
///
/// ## Invariants
/// - Non-empty, contains an `@`, and carries no surrounding whitespace.
/// - Compared byte-for-byte; no case folding is applied.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Validate and construct an [`Email`] from owned input.
    pub fn new(email: impl Into<String>) -> Result<Self, EmailValidationError> {
        let email = email.into();
        if email.is_empty() {
            return Err(EmailValidationError::Empty);
        }
        if email.trim() != email {
            return Err(EmailValidationError::SurroundingWhitespace);
        }
        if !email.contains('@') {
            return Err(EmailValidationError::MissingAtSign);
        }
        Ok(Self(email))
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

impl TryFrom<String> for Email {
    type Error = EmailValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Account role controlling what a caller may do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Default role granted at registration.
    Donor,
    /// Elevated role allowed to act on requests it does not own.
    Volunteer,
    /// Full moderation rights.
    Admin,
}

/// Roles permitted to act on donation requests they do not own.
pub const ELEVATED_ROLES: [Role; 2] = [Role::Volunteer, Role::Admin];

impl Role {
    /// Whether the role may act on resources it does not own.
    pub fn is_elevated(self) -> bool {
        ELEVATED_ROLES.contains(&self)
    }
}

impl FromStr for Role {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "donor" => Ok(Self::Donor),
            "volunteer" => Ok(Self::Volunteer),
            "admin" => Ok(Self::Admin),
            _ => Err(UnknownVariant),
        }
    }
}

/// Account status gating mutating operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    /// May create donation requests and act on them.
    Active,
    /// Blocked by an administrator; reads still work.
    Blocked,
}

impl FromStr for AccountStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "blocked" => Ok(Self::Blocked),
            _ => Err(UnknownVariant),
        }
    }
}

/// Marker error for strings outside a closed enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownVariant;

impl fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "value is outside the allowed set")
    }
}

impl std::error::Error for UnknownVariant {}

/// ABO/Rh blood group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum BloodGroup {
    #[serde(rename = "A+")]
    APositive,
    #[serde(rename = "A-")]
    ANegative,
    #[serde(rename = "B+")]
    BPositive,
    #[serde(rename = "B-")]
    BNegative,
    #[serde(rename = "AB+")]
    AbPositive,
    #[serde(rename = "AB-")]
    AbNegative,
    #[serde(rename = "O+")]
    OPositive,
    #[serde(rename = "O-")]
    ONegative,
}

impl FromStr for BloodGroup {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A+" => Ok(Self::APositive),
            "A-" => Ok(Self::ANegative),
            "B+" => Ok(Self::BPositive),
            "B-" => Ok(Self::BNegative),
            "AB+" => Ok(Self::AbPositive),
            "AB-" => Ok(Self::AbNegative),
            "O+" => Ok(Self::OPositive),
            "O-" => Ok(Self::ONegative),
            _ => Err(UnknownVariant),
        }
    }
}

/// Administrative location of a donor or request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Location {
    pub division: String,
    pub district: String,
    pub upazila: String,
}

/// Persisted user record.
///
/// ## Invariants
/// - `email` is unique across the store; uniqueness is enforced by the
///   repository at insertion time.
/// - `password_hash` never leaves the domain; projections below exclude it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub email: Email,
    pub name: String,
    pub blood_group: BloodGroup,
    pub photo: String,
    pub location: Location,
    pub password_hash: String,
    pub status: AccountStatus,
    pub role: Role,
    pub register_at: DateTime<Utc>,
}

impl User {
    /// Projection of the record without the password hash.
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            email: self.email.clone(),
            name: self.name.clone(),
            blood_group: self.blood_group,
            photo: self.photo.clone(),
            location: self.location.clone(),
            status: self.status,
            role: self.role,
            register_at: self.register_at,
        }
    }

    /// Privacy-minimising projection for the public donor search.
    ///
    /// Excludes status, role, and the registration timestamp in addition to
    /// the password hash.
    pub fn donor_card(&self) -> DonorCard {
        DonorCard {
            email: self.email.clone(),
            name: self.name.clone(),
            blood_group: self.blood_group,
            photo: self.photo.clone(),
            location: self.location.clone(),
        }
    }
}

/// User record minus the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub email: Email,
    pub name: String,
    #[serde(rename = "bloodGroup")]
    pub blood_group: BloodGroup,
    pub photo: String,
    #[serde(flatten)]
    pub location: Location,
    pub status: AccountStatus,
    pub role: Role,
    #[serde(rename = "registerAt")]
    pub register_at: DateTime<Utc>,
}

/// Public search projection: identity and contact details only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DonorCard {
    pub email: Email,
    pub name: String,
    #[serde(rename = "bloodGroup")]
    pub blood_group: BloodGroup,
    pub photo: String,
    #[serde(flatten)]
    pub location: Location,
}

/// Self-service profile edit; absent fields are left untouched.
///
/// Email, role, and status are deliberately not representable here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileEdit {
    pub name: Option<String>,
    pub photo: Option<String>,
    pub blood_group: Option<BloodGroup>,
    pub location: Option<Location>,
}

impl ProfileEdit {
    /// Whether the edit changes anything at all.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.photo.is_none()
            && self.blood_group.is_none()
            && self.location.is_none()
    }
}

/// Administrative moderation edit; `None` fields are left untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModerationEdit {
    pub status: Option<AccountStatus>,
    pub role: Option<Role>,
}
