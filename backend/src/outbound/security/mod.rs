//! Security adapters: the password hashing port implementation.

pub mod password;
