//! Domain ports and supporting types for the hexagonal boundary.

mod checkout_provider;
mod donation_repository;
mod funding_repository;
mod password_hasher;
mod user_repository;

#[cfg(test)]
pub use checkout_provider::MockCheckoutProvider;
pub use checkout_provider::{
    CheckoutProvider, CheckoutProviderError, CheckoutSession, CheckoutSessionRequest,
    CheckoutSessionStatus, FixtureCheckoutProvider, ProviderPaymentStatus,
};
#[cfg(test)]
pub use donation_repository::MockDonationRepository;
pub use donation_repository::{DonationPersistenceError, DonationRepository};
#[cfg(test)]
pub use funding_repository::MockFundingRepository;
pub use funding_repository::{FundingPersistenceError, FundingRepository};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{FixturePasswordHasher, PasswordHasher};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{DonorSearchFilter, UserPersistenceError, UserRepository};
