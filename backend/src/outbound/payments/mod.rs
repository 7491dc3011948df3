//! Payment provider adapters for the checkout port.

pub mod stripe;
