//! Domain primitives, aggregates, and application services.
//!
//! Purpose: Define the strongly typed entities and the services that act on
//! them, independent of HTTP and persistence concerns. Keep types immutable
//! where practical and document invariants and serialisation contracts
//! (serde) in each type's Rustdoc.
//!
//! Layout:
//! - value types and aggregates: `user`, `auth`, `donation`, `funding`,
//!   `page`
//! - cross-cutting policy: `error`, `guards`, `session`
//! - driven-port traits: `ports`
//! - application services: `account_service`, `donation_service`,
//!   `user_directory`, `payment_reconciler`

pub mod account_service;
pub mod auth;
pub mod donation;
pub mod donation_service;
pub mod error;
pub mod funding;
pub mod guards;
pub mod page;
pub mod payment_reconciler;
pub mod ports;
pub mod session;
pub mod user;
pub mod user_directory;

pub use self::account_service::AccountService;
pub use self::donation_service::DonationService;
pub use self::error::{Error, ErrorCode};
pub use self::payment_reconciler::PaymentReconciler;
pub use self::session::SessionAuthenticator;
pub use self::user_directory::UserDirectory;

/// Convenient API result alias.
pub type ApiResult<T> = Result<T, Error>;
