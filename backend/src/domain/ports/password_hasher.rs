//! Port abstraction for the opaque one-way password function.
//!
//! The domain never sees how a password digest is produced; adapters own
//! the algorithm and the stored representation.

/// Port for hashing and verifying passwords.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Produce the stored representation for a raw password.
    fn hash(&self, password: &str) -> String;

    /// Check a raw password against a stored representation.
    fn verify(&self, password: &str, stored: &str) -> bool;
}

/// Transparent hasher for tests: stores `plain:<password>`.
///
/// Never wire this into `main`; it exists so service and handler tests can
/// assert on credentials without a real digest.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePasswordHasher;

impl PasswordHasher for FixturePasswordHasher {
    fn hash(&self, password: &str) -> String {
        format!("plain:{password}")
    }

    fn verify(&self, password: &str, stored: &str) -> bool {
        stored == format!("plain:{password}")
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    #[test]
    fn fixture_hasher_round_trips() {
        let hasher = FixturePasswordHasher;
        let stored = hasher.hash("secret");
        assert!(hasher.verify("secret", &stored));
        assert!(!hasher.verify("other", &stored));
    }
}
