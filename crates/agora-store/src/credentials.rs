use argon2::password_hash::SaltString;
use argon2::password_hash::rand_core::OsRng;
use argon2::{Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version};
use tracing::warn;

use crate::error::{Result, StoreError};

/// Argon2id hashing for account credentials.
pub(crate) struct CredentialHasher {
    argon2: Argon2<'static>,
}

impl CredentialHasher {
    pub fn new(memory_kib: u32, iterations: u32) -> Result<Self> {
        let params = Params::new(memory_kib, iterations, Params::DEFAULT_P_COST, None)
            .map_err(|e| StoreError::Credential(e.to_string()))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    /// Hash a password into a PHC string.
    pub fn hash(&self, password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| StoreError::Credential(e.to_string()))?;
        Ok(hash.to_string())
    }

    pub fn verify(&self, password: &str, stored: &str) -> bool {
        let parsed = match PasswordHash::new(stored) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!("Corrupt credential hash: {}", e);
                return false;
            }
        };

        self.argon2
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hasher() -> CredentialHasher {
        CredentialHasher::new(8, 1).unwrap()
    }

    #[test]
    fn verifies_matching_password_only() {
        let hasher = hasher();
        let stored = hasher.hash("pw1").unwrap();

        assert_ne!(stored, "pw1");
        assert!(hasher.verify("pw1", &stored));
        assert!(!hasher.verify("pw2", &stored));
    }

    #[test]
    fn corrupt_hash_never_verifies() {
        assert!(!hasher().verify("pw1", "not-a-phc-string"));
    }

    #[test]
    fn rejects_invalid_params() {
        assert!(matches!(
            CredentialHasher::new(0, 0),
            Err(StoreError::Credential(_))
        ));
    }
}
