//! Shared HTTP adapter state.
//!
//! Handlers receive this bundle via `actix_web::web::Data`, so they depend
//! only on domain services and stay testable without real adapters.

use std::sync::Arc;

use crate::domain::donation::RequestExposure;
use crate::domain::{
    AccountService, DonationService, PaymentReconciler, SessionAuthenticator, UserDirectory,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub sessions: Arc<SessionAuthenticator>,
    pub accounts: Arc<AccountService>,
    pub donations: Arc<DonationService>,
    pub directory: Arc<UserDirectory>,
    pub fundings: Arc<PaymentReconciler>,
    /// Field set served to anonymous single-record reads.
    pub exposure: RequestExposure,
}
