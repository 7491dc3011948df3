//! In-memory repository adapters.
//!
//! Each collection lives behind one mutex, which makes every repository
//! method atomic. The conditional updates (accept, settle, mark-paid) read
//! and write under the same lock, so exactly one concurrent caller observes
//! the matching precondition.
//!
//! Listing methods sort newest first by creation time before applying the
//! limit/skip window; the reported total ignores the window.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::donation::{DonationRequest, DonationStatus, DonorAssignment};
use crate::domain::funding::{FundingRecord, FundingStatus};
use crate::domain::page::{Page, PageOf};
use crate::domain::ports::{
    DonationPersistenceError, DonationRepository, DonorSearchFilter, FundingPersistenceError,
    FundingRepository, UserPersistenceError, UserRepository,
};
use crate::domain::user::{AccountStatus, Email, ModerationEdit, ProfileEdit, User};

fn window<T: Clone>(mut matching: Vec<T>, page: Page) -> PageOf<T> {
    let total = matching.len() as u64;
    let skip = usize::try_from(page.skip).unwrap_or(usize::MAX);
    let limit = usize::try_from(page.limit).unwrap_or(usize::MAX);
    let items = if skip >= matching.len() {
        Vec::new()
    } else {
        matching.drain(..).skip(skip).take(limit).collect()
    };
    PageOf { items, total }
}

/// In-memory [`UserRepository`].
#[derive(Debug, Default)]
pub struct MemoryUserRepository {
    users: Mutex<Vec<User>>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn guard(&self) -> Result<MutexGuard<'_, Vec<User>>, UserPersistenceError> {
        self.users
            .lock()
            .map_err(|_| UserPersistenceError::query("user collection lock poisoned"))
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut users = self.guard()?;
        if users.iter().any(|existing| existing.email == user.email) {
            return Err(UserPersistenceError::duplicate_email(
                user.email.as_ref(),
            ));
        }
        users.push(user.clone());
        Ok(())
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserPersistenceError> {
        let users = self.guard()?;
        Ok(users.iter().find(|user| user.email == *email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, UserPersistenceError> {
        let users = self.guard()?;
        Ok(users.iter().find(|user| user.id == id).cloned())
    }

    async fn list(
        &self,
        status: Option<AccountStatus>,
        page: Page,
    ) -> Result<PageOf<User>, UserPersistenceError> {
        let users = self.guard()?;
        let mut matching: Vec<User> = users
            .iter()
            .filter(|user| status.is_none_or(|status| user.status == status))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.register_at.cmp(&a.register_at));
        Ok(window(matching, page))
    }

    async fn search(
        &self,
        filter: &DonorSearchFilter,
        page: Page,
    ) -> Result<PageOf<User>, UserPersistenceError> {
        let users = self.guard()?;
        let mut matching: Vec<User> = users
            .iter()
            .filter(|user| {
                filter
                    .blood_group
                    .is_none_or(|group| user.blood_group == group)
                    && filter
                        .district
                        .as_deref()
                        .is_none_or(|district| user.location.district == district)
                    && filter
                        .upazila
                        .as_deref()
                        .is_none_or(|upazila| user.location.upazila == upazila)
            })
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.register_at.cmp(&a.register_at));
        Ok(window(matching, page))
    }

    async fn update_profile(
        &self,
        email: &Email,
        edit: &ProfileEdit,
    ) -> Result<bool, UserPersistenceError> {
        let mut users = self.guard()?;
        let Some(user) = users.iter_mut().find(|user| user.email == *email) else {
            return Ok(false);
        };
        if let Some(name) = &edit.name {
            user.name = name.clone();
        }
        if let Some(photo) = &edit.photo {
            user.photo = photo.clone();
        }
        if let Some(blood_group) = edit.blood_group {
            user.blood_group = blood_group;
        }
        if let Some(location) = &edit.location {
            user.location = location.clone();
        }
        Ok(true)
    }

    async fn apply_moderation(
        &self,
        id: Uuid,
        edit: ModerationEdit,
    ) -> Result<bool, UserPersistenceError> {
        let mut users = self.guard()?;
        let Some(user) = users.iter_mut().find(|user| user.id == id) else {
            return Ok(false);
        };
        if let Some(status) = edit.status {
            user.status = status;
        }
        if let Some(role) = edit.role {
            user.role = role;
        }
        Ok(true)
    }
}

/// In-memory [`DonationRepository`].
#[derive(Debug, Default)]
pub struct MemoryDonationRepository {
    requests: Mutex<Vec<DonationRequest>>,
}

impl MemoryDonationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn guard(&self) -> Result<MutexGuard<'_, Vec<DonationRequest>>, DonationPersistenceError> {
        self.requests
            .lock()
            .map_err(|_| DonationPersistenceError::query("donation collection lock poisoned"))
    }
}

#[async_trait]
impl DonationRepository for MemoryDonationRepository {
    async fn insert(&self, request: &DonationRequest) -> Result<(), DonationPersistenceError> {
        self.guard()?.push(request.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<DonationRequest>, DonationPersistenceError> {
        let requests = self.guard()?;
        Ok(requests.iter().find(|request| request.id == id).cloned())
    }

    async fn list_by_requester(
        &self,
        requester: &Email,
        page: Page,
    ) -> Result<PageOf<DonationRequest>, DonationPersistenceError> {
        let requests = self.guard()?;
        let mut matching: Vec<DonationRequest> = requests
            .iter()
            .filter(|request| request.requester.email == *requester)
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(window(matching, page))
    }

    async fn list(
        &self,
        status: Option<DonationStatus>,
        page: Page,
    ) -> Result<PageOf<DonationRequest>, DonationPersistenceError> {
        let requests = self.guard()?;
        let mut matching: Vec<DonationRequest> = requests
            .iter()
            .filter(|request| status.is_none_or(|status| request.status == status))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(window(matching, page))
    }

    async fn assign_donor_if_pending(
        &self,
        id: Uuid,
        donor: &DonorAssignment,
    ) -> Result<bool, DonationPersistenceError> {
        let mut requests = self.guard()?;
        let Some(request) = requests
            .iter_mut()
            .find(|request| request.id == id && request.status == DonationStatus::Pending)
        else {
            return Ok(false);
        };
        request.status = DonationStatus::InProgress;
        request.donor = Some(donor.clone());
        Ok(true)
    }

    async fn update_status_if(
        &self,
        id: Uuid,
        expected: DonationStatus,
        target: DonationStatus,
    ) -> Result<bool, DonationPersistenceError> {
        let mut requests = self.guard()?;
        let Some(request) = requests
            .iter_mut()
            .find(|request| request.id == id && request.status == expected)
        else {
            return Ok(false);
        };
        request.status = target;
        Ok(true)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DonationPersistenceError> {
        let mut requests = self.guard()?;
        let before = requests.len();
        requests.retain(|request| request.id != id);
        Ok(requests.len() < before)
    }
}

/// In-memory [`FundingRepository`].
#[derive(Debug, Default)]
pub struct MemoryFundingRepository {
    records: Mutex<Vec<FundingRecord>>,
}

impl MemoryFundingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn guard(&self) -> Result<MutexGuard<'_, Vec<FundingRecord>>, FundingPersistenceError> {
        self.records
            .lock()
            .map_err(|_| FundingPersistenceError::query("funding collection lock poisoned"))
    }
}

#[async_trait]
impl FundingRepository for MemoryFundingRepository {
    async fn insert(&self, record: &FundingRecord) -> Result<(), FundingPersistenceError> {
        self.guard()?.push(record.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<FundingRecord>, FundingPersistenceError> {
        let records = self.guard()?;
        Ok(records.iter().find(|record| record.id == id).cloned())
    }

    async fn attach_session(
        &self,
        id: Uuid,
        session_id: &str,
    ) -> Result<bool, FundingPersistenceError> {
        let mut records = self.guard()?;
        let Some(record) = records.iter_mut().find(|record| record.id == id) else {
            return Ok(false);
        };
        record.session_id = Some(session_id.to_owned());
        Ok(true)
    }

    async fn mark_paid_if_pending(&self, id: Uuid) -> Result<bool, FundingPersistenceError> {
        let mut records = self.guard()?;
        let Some(record) = records
            .iter_mut()
            .find(|record| record.id == id && record.status == FundingStatus::Pending)
        else {
            return Ok(false);
        };
        record.status = FundingStatus::Paid;
        Ok(true)
    }

    async fn list_paid(
        &self,
        page: Page,
    ) -> Result<PageOf<FundingRecord>, FundingPersistenceError> {
        let records = self.guard()?;
        let mut matching: Vec<FundingRecord> = records
            .iter()
            .filter(|record| record.status == FundingStatus::Paid)
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(window(matching, page))
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
