//! Donation request entity and its lifecycle state machine.
//!
//! The transition table lives here so every endpoint consults the same
//! policy: `pending → in-progress → {done, canceled}`, with `done` and
//! `canceled` terminal. Acceptance is the only edge that assigns a donor.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::user::{BloodGroup, Email, Location, UnknownVariant};

/// Lifecycle state of a donation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum DonationStatus {
    /// Initial state; the only state acceptance may leave from.
    Pending,
    /// A donor has accepted and the donation is underway.
    InProgress,
    /// Terminal: the donation happened.
    Done,
    /// Terminal: the request was called off.
    Canceled,
}

impl DonationStatus {
    /// Whether no transition may leave this state.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Canceled)
    }

    /// Central allowed-transition table.
    pub fn may_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Pending, Self::InProgress)
                | (Self::InProgress, Self::Done | Self::Canceled)
        )
    }

    /// Whether the status is a valid target for the terminal
    /// status-update operation.
    pub fn is_settlement(self) -> bool {
        self.is_terminal()
    }
}

impl fmt::Display for DonationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Pending => "pending",
            Self::InProgress => "in-progress",
            Self::Done => "done",
            Self::Canceled => "canceled",
        };
        f.write_str(label)
    }
}

impl FromStr for DonationStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "in-progress" => Ok(Self::InProgress),
            "done" => Ok(Self::Done),
            "canceled" => Ok(Self::Canceled),
            _ => Err(UnknownVariant),
        }
    }
}

/// Field set returned to anonymous callers reading a single request.
///
/// The reference behaviour exposes the full record without authentication;
/// `Masked` withholds the requester's email and the street address instead
/// of guessing which of the two policies was intended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestExposure {
    #[default]
    Full,
    Masked,
}

impl FromStr for RequestExposure {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "full" => Ok(Self::Full),
            "masked" => Ok(Self::Masked),
            _ => Err(UnknownVariant),
        }
    }
}

/// Donor identity captured by the accept transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DonorAssignment {
    pub name: String,
    pub email: Email,
}

/// Requester identity stored on the request as an ownership key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requester {
    pub name: String,
    pub email: Email,
}

/// Persisted donation request.
///
/// ## Invariants
/// - `donor` is `Some` if and only if the request left `pending` through the
///   accept transition.
/// - `status`/`created_at` are always server-assigned; client-supplied
///   values never reach this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DonationRequest {
    pub id: Uuid,
    pub requester: Requester,
    pub receiver_name: String,
    pub blood_group: BloodGroup,
    pub location: Location,
    pub hospital_name: String,
    pub full_address: String,
    pub donation_date: NaiveDate,
    pub donation_time: NaiveTime,
    pub message: String,
    pub status: DonationStatus,
    pub donor: Option<DonorAssignment>,
    pub created_at: DateTime<Utc>,
}

/// Client-controlled fields of a new donation request.
///
/// Everything the server assigns (id, requester, status, timestamp) is
/// deliberately absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DonationDraft {
    pub receiver_name: String,
    pub blood_group: BloodGroup,
    pub location: Location,
    pub hospital_name: String,
    pub full_address: String,
    pub donation_date: NaiveDate,
    pub donation_time: NaiveTime,
    pub message: String,
}

impl DonationRequest {
    /// Materialise a draft into a pending record owned by `requester`.
    pub fn create(requester: Requester, draft: DonationDraft, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            requester,
            receiver_name: draft.receiver_name,
            blood_group: draft.blood_group,
            location: draft.location,
            hospital_name: draft.hospital_name,
            full_address: draft.full_address,
            donation_date: draft.donation_date,
            donation_time: draft.donation_time,
            message: draft.message,
            status: DonationStatus::Pending,
            donor: None,
            created_at,
        }
    }
}
