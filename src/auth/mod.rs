//! Authentication store — durable user credentials and passphrase checks.
//!
//! `register` persists a salted Argon2id digest of the master passphrase;
//! the passphrase itself is never written anywhere.  `verify` recomputes
//! the digest from a candidate passphrase and compares it to the stored
//! value in constant time.  An unknown username and a wrong passphrase
//! both verify as `false`, so callers cannot tell the two apart.

use chrono::Utc;
use rusqlite::{params, OptionalExtension};
use zeroize::Zeroize;

use crate::crypto::digest::{digest_passphrase, verify_digest};
use crate::crypto::kdf::{generate_salt, Argon2Params};
use crate::db::Database;
use crate::errors::{PassKeepError, Result};

/// Maximum username length in characters.
const MAX_USERNAME_LEN: usize = 64;

/// Stored credential fields needed for verification.
struct CredentialRow {
    digest: Vec<u8>,
    digest_salt: Vec<u8>,
    memory_kib: u32,
    iterations: u32,
    parallelism: u32,
}

/// Handle for registering users and verifying passphrases.
pub struct AuthStore {
    db: Database,
    params: Argon2Params,
}

impl AuthStore {
    /// Create a store that digests new credentials with default parameters.
    pub fn new(db: Database) -> Self {
        Self::with_params(db, Argon2Params::default())
    }

    /// Create a store that digests new credentials with explicit parameters.
    ///
    /// The parameters only apply to *new* registrations; verification always
    /// uses the parameters stored with each credential.
    pub fn with_params(db: Database, params: Argon2Params) -> Self {
        Self { db, params }
    }

    // ------------------------------------------------------------------
    // Operations
    // ------------------------------------------------------------------

    /// Register a new user with a master passphrase.
    ///
    /// Fails with `UserAlreadyExists` if the username is taken; the
    /// existing credential is never overwritten.
    pub fn register(&self, username: &str, passphrase: &str) -> Result<()> {
        validate_username(username)?;

        // Cheap existence check before paying for the digest.
        {
            let conn = self.db.lock()?;
            let exists: bool = conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM users WHERE username = ?1)",
                [username],
                |row| row.get(0),
            )?;
            if exists {
                return Err(PassKeepError::UserAlreadyExists(username.to_string()));
            }
        }

        // Argon2id is slow; keep the digest work outside the lock.
        let salt = generate_salt()?;
        let mut digest = digest_passphrase(passphrase.as_bytes(), &salt, &self.params)?;
        let created_at = Utc::now().to_rfc3339();

        let conn = self.db.lock()?;
        let result = conn.execute(
            "INSERT INTO users (username, digest, digest_salt, memory_kib, iterations, parallelism, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                username,
                digest.as_slice(),
                salt.as_slice(),
                self.params.memory_kib,
                self.params.iterations,
                self.params.parallelism,
                created_at,
            ],
        );
        digest.zeroize();

        match result {
            Ok(_) => Ok(()),
            // Two registrations can race past the existence check; the
            // primary key keeps the first row and the loser gets the same
            // error as the non-racing case.
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Err(PassKeepError::UserAlreadyExists(username.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Check a candidate passphrase against the stored credential.
    ///
    /// Returns `Ok(false)` for an unknown username or a wrong passphrase;
    /// `Err` is reserved for storage and KDF failures.
    pub fn verify(&self, username: &str, passphrase: &str) -> Result<bool> {
        let row = {
            let conn = self.db.lock()?;
            conn.query_row(
                "SELECT digest, digest_salt, memory_kib, iterations, parallelism
                 FROM users WHERE username = ?1",
                [username],
                |row| {
                    Ok(CredentialRow {
                        digest: row.get(0)?,
                        digest_salt: row.get(1)?,
                        memory_kib: row.get(2)?,
                        iterations: row.get(3)?,
                        parallelism: row.get(4)?,
                    })
                },
            )
            .optional()?
        };

        let cred = match row {
            Some(c) => c,
            None => return Ok(false),
        };

        // Recompute with the parameters the credential was written under,
        // not the currently configured ones.
        let stored_params = Argon2Params {
            memory_kib: cred.memory_kib,
            iterations: cred.iterations,
            parallelism: cred.parallelism,
        };
        verify_digest(
            passphrase.as_bytes(),
            &cred.digest_salt,
            &stored_params,
            &cred.digest,
        )
    }
}

// ----------------------------------------------------------------------
// Validation
// ----------------------------------------------------------------------

/// Validate that a username is safe to store.
///
/// Allowed: ASCII letters, digits, underscores, hyphens, periods.
/// Must be non-empty and at most 64 characters.  Usernames are
/// case-sensitive; no normalization is applied.
pub fn validate_username(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(PassKeepError::InvalidName(
            "username cannot be empty".into(),
        ));
    }
    if name.len() > MAX_USERNAME_LEN {
        return Err(PassKeepError::InvalidName(format!(
            "username cannot exceed {MAX_USERNAME_LEN} characters"
        )));
    }
    if !name
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-' || b == b'.')
    {
        return Err(PassKeepError::InvalidName(format!(
            "username '{name}' contains invalid characters — only ASCII letters, digits, underscores, hyphens, and periods are allowed"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_usernames() {
        assert!(validate_username("alice").is_ok());
        assert!(validate_username("alice.smith").is_ok());
        assert!(validate_username("user_01").is_ok());
        assert!(validate_username("a-b").is_ok());
        assert!(validate_username("A").is_ok());
    }

    #[test]
    fn empty_username_rejected() {
        assert!(validate_username("").is_err());
    }

    #[test]
    fn overlong_username_rejected() {
        let name = "a".repeat(65);
        assert!(validate_username(&name).is_err());
        let name = "a".repeat(64);
        assert!(validate_username(&name).is_ok());
    }

    #[test]
    fn username_with_invalid_characters_rejected() {
        assert!(validate_username("alice smith").is_err());
        assert!(validate_username("alice/smith").is_err());
        assert!(validate_username("al:ce").is_err());
        assert!(validate_username("café").is_err());
    }
}
