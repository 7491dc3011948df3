//! HTTP inbound adapter exposing REST endpoints.

pub mod accounts;
pub mod donations;
pub mod envelope;
pub mod error;
pub mod fundings;
pub mod health;
pub mod routes;
pub mod session;
pub mod state;
pub mod users;

pub use crate::domain::ApiResult;
