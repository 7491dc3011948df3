//! Test utilities for the backend crate.
//!
//! Shared helpers for unit tests (in `src/`) and integration tests (in
//! `tests/`): deterministic clocks and sample aggregates so individual test
//! modules do not each invent their own fixtures.

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;
use uuid::Uuid;

use crate::domain::donation::{DonationDraft, DonationRequest, Requester};
use crate::domain::user::{AccountStatus, BloodGroup, Email, Location, Role, User};

/// Clock pinned to a single instant.
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(now)
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Clock whose instant can be advanced mid-test.
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    pub fn advance_seconds(&self, seconds: i64) {
        *self.lock_clock() += TimeDelta::seconds(seconds);
    }

    fn lock_clock(&self) -> MutexGuard<'_, DateTime<Utc>> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("clock mutex"),
        }
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}

/// Fixed clock at `timestamp` seconds since the epoch, boxed for injection.
pub fn clock_at(timestamp: i64) -> Arc<dyn Clock> {
    let instant = match Utc.timestamp_opt(timestamp, 0).single() {
        Some(instant) => instant,
        None => panic!("invalid test timestamp: {timestamp}"),
    };
    Arc::new(FixedClock(instant))
}

pub fn sample_email() -> Email {
    email("donor@example.com")
}

pub fn email(raw: &str) -> Email {
    match Email::new(raw) {
        Ok(email) => email,
        Err(err) => panic!("invalid test email {raw:?}: {err}"),
    }
}

pub fn sample_location() -> Location {
    Location {
        division: "Dhaka".to_owned(),
        district: "Dhaka".to_owned(),
        upazila: "Uttara".to_owned(),
    }
}

/// Active donor account with a fixture password hash for `"secret"`.
pub fn sample_user(raw_email: &str) -> User {
    User {
        id: Uuid::new_v4(),
        email: email(raw_email),
        name: "Abdul Alo".to_owned(),
        blood_group: BloodGroup::BPositive,
        photo: "https://img.example/alo.png".to_owned(),
        location: sample_location(),
        password_hash: "plain:secret".to_owned(),
        status: AccountStatus::Active,
        role: Role::Donor,
        register_at: Utc.timestamp_opt(1_700_000_000, 0).single().unwrap_or_default(),
    }
}

pub fn sample_user_with_role(raw_email: &str, role: Role) -> User {
    User {
        role,
        ..sample_user(raw_email)
    }
}

pub fn sample_draft() -> DonationDraft {
    DonationDraft {
        receiver_name: "Rahim Uddin".to_owned(),
        blood_group: BloodGroup::OPositive,
        location: sample_location(),
        hospital_name: "Dhaka Medical College Hospital".to_owned(),
        full_address: "Secretariat Rd, Dhaka 1000".to_owned(),
        donation_date: chrono::NaiveDate::from_ymd_opt(2024, 3, 14).unwrap_or_default(),
        donation_time: chrono::NaiveTime::from_hms_opt(10, 30, 0).unwrap_or_default(),
        message: "Urgent transfusion before surgery.".to_owned(),
    }
}

/// Pending request owned by `raw_email`, created at a fixed instant.
pub fn sample_request(raw_email: &str) -> DonationRequest {
    let requester = Requester {
        name: "Abdul Alo".to_owned(),
        email: email(raw_email),
    };
    let created_at = Utc.timestamp_opt(1_700_000_000, 0).single().unwrap_or_default();
    DonationRequest::create(requester, sample_draft(), created_at)
}
