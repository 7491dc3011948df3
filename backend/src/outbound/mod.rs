//! Outbound adapters implementing the domain's driven ports.

pub mod payments;
pub mod persistence;
pub mod security;
