//! Salted SHA-256 adapter for the password hashing port.
//!
//! Stored representation: `hex(salt)$hex(sha256(salt || password))`. The
//! domain treats the whole string as opaque; only this adapter knows the
//! layout.

use rand::RngCore;
use sha2::{Digest, Sha256};

use crate::domain::ports::PasswordHasher;

const SALT_LEN: usize = 16;

/// Salted SHA-256 password hasher.
#[derive(Debug, Default, Clone, Copy)]
pub struct SaltedSha256Hasher;

fn digest(salt: &[u8], password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

impl PasswordHasher for SaltedSha256Hasher {
    fn hash(&self, password: &str) -> String {
        let mut salt = [0u8; SALT_LEN];
        rand::thread_rng().fill_bytes(&mut salt);
        format!("{}${}", hex::encode(salt), digest(&salt, password))
    }

    fn verify(&self, password: &str, stored: &str) -> bool {
        let Some((salt_hex, digest_hex)) = stored.split_once('$') else {
            return false;
        };
        let Ok(salt) = hex::decode(salt_hex) else {
            return false;
        };
        digest(&salt, password) == digest_hex
    }
}
