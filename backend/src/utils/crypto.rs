//! Password hashing and verification utilities.
//!
//! Wraps Argon2id with a process-wide pepper. The pepper is a server-side
//! secret appended to every password before hashing, so a leaked credential
//! database alone is not enough for an offline brute-force attack. The
//! per-hash random salt is embedded in the PHC output string, unlike the
//! pepper which is never stored.

use argon2::password_hash::SaltString;
use argon2::password_hash::rand_core::OsRng;
use argon2::{Argon2, PasswordHash, PasswordHasher as _, PasswordVerifier};

use crate::errors::{ServiceError, ServiceResult};

/// Long-lived password hasher, constructed once at startup and shared for
/// the process lifetime. Stateless and safe for concurrent use.
pub struct PasswordHasher {
    argon2: Argon2<'static>,
    pepper: String,
}

impl PasswordHasher {
    /// Create a hasher bound to the configured pepper.
    pub fn new(pepper: impl Into<String>) -> Self {
        PasswordHasher {
            argon2: Argon2::default(),
            pepper: pepper.into(),
        }
    }

    /// Hash a plaintext password into a PHC-format Argon2id string.
    ///
    /// A fresh random salt is generated per call, so hashing the same
    /// password twice yields different strings that both verify.
    pub fn hash(&self, password: &str) -> ServiceResult<String> {
        let peppered = format!("{}{}", password, self.pepper);
        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(peppered.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| ServiceError::internal_error(format!("Password hashing failed: {}", e)))
    }

    /// Verify a plaintext password against a stored PHC hash.
    ///
    /// Recomputes with the salt and parameters embedded in `stored` plus the
    /// pepper; digest comparison inside the argon2 crate is constant time.
    /// A malformed stored hash counts as a verification failure, not an
    /// error.
    pub fn verify(&self, password: &str, stored: &str) -> bool {
        let parsed = match PasswordHash::new(stored) {
            Ok(parsed) => parsed,
            Err(_) => return false,
        };

        let peppered = format!("{}{}", password, self.pepper);
        self.argon2
            .verify_password(peppered.as_bytes(), &parsed)
            .is_ok()
    }
}

/// Compare two secrets without short-circuiting on the first differing byte.
///
/// Length is still revealed; reset codes have a fixed length so this does
/// not leak anything useful.
pub fn constant_time_eq(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.bytes()
        .zip(b.bytes())
        .fold(0u8, |acc, (x, y)| acc | (x ^ y))
        == 0
}
