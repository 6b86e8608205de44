//! Secret vault — labelled, encrypted secrets owned by registered users.
//!
//! Every operation is gated on the authentication store: only after the
//! owner's passphrase verifies does the vault derive a key, touch
//! ciphertext, or reveal whether a label exists.  Each entry is encrypted
//! with its own key, derived from the passphrase and a fresh per-entry
//! salt that is independent of the digest salt, so a stolen database
//! yields neither passphrases nor plaintext.

use chrono::Utc;
use rusqlite::{params, OptionalExtension};
use zeroize::{Zeroize, Zeroizing};

use crate::auth::AuthStore;
use crate::crypto::encryption::{decrypt, encrypt};
use crate::crypto::kdf::{derive_key, generate_salt, Argon2Params};
use crate::db::Database;
use crate::errors::{PassKeepError, Result};

/// Maximum label length in characters.
const MAX_LABEL_LEN: usize = 256;

/// Stored entry fields needed for decryption.
struct EntryRow {
    ciphertext: Vec<u8>,
    kdf_salt: Vec<u8>,
    nonce: Vec<u8>,
    memory_kib: u32,
    iterations: u32,
    parallelism: u32,
}

/// Handle for storing and retrieving encrypted secrets.
///
/// Owns an `AuthStore` on the same database so every call can verify the
/// caller's passphrase before doing anything else.
pub struct SecretVault {
    db: Database,
    auth: AuthStore,
    params: Argon2Params,
}

impl SecretVault {
    /// Create a vault that encrypts new entries with default parameters.
    pub fn new(db: Database) -> Self {
        Self::with_params(db, Argon2Params::default())
    }

    /// Create a vault that encrypts new entries with explicit parameters.
    ///
    /// The parameters only apply to *new* entries; retrieval always uses
    /// the parameters stored with each entry.
    pub fn with_params(db: Database, params: Argon2Params) -> Self {
        let auth = AuthStore::with_params(db.clone(), params);
        Self { db, auth, params }
    }

    // ------------------------------------------------------------------
    // Operations
    // ------------------------------------------------------------------

    /// Encrypt `secret` and store it under `label` for `username`.
    ///
    /// The passphrase must verify against the registered credential before
    /// anything is written.  Labels are unique per user: storing an
    /// existing label fails with `DuplicateLabel` and leaves the original
    /// entry untouched.
    pub fn store(&self, username: &str, label: &str, secret: &str, passphrase: &str) -> Result<()> {
        validate_label(label)?;

        // 1. Gate on the credential check; unknown users fail the same way
        //    as wrong passphrases.
        if !self.auth.verify(username, passphrase)? {
            return Err(PassKeepError::Unauthorized);
        }

        // 2. Refuse duplicates before paying for key derivation.
        {
            let conn = self.db.lock()?;
            let exists: bool = conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM secrets WHERE username = ?1 AND label = ?2)",
                params![username, label],
                |row| row.get(0),
            )?;
            if exists {
                return Err(PassKeepError::DuplicateLabel(label.to_string()));
            }
        }

        // 3. Derive a fresh entry key.  The salt is generated per entry and
        //    never shared with the credential digest.
        let kdf_salt = generate_salt()?;
        let key = derive_key(passphrase.as_bytes(), &kdf_salt, &self.params)?;
        let (nonce, ciphertext) = encrypt(key.as_bytes(), secret.as_bytes())?;
        drop(key);

        // 4. Persist the entry in one INSERT.
        let created_at = Utc::now().to_rfc3339();
        let conn = self.db.lock()?;
        let result = conn.execute(
            "INSERT INTO secrets (username, label, ciphertext, kdf_salt, nonce, memory_kib, iterations, parallelism, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                username,
                label,
                ciphertext,
                kdf_salt.as_slice(),
                nonce.as_slice(),
                self.params.memory_kib,
                self.params.iterations,
                self.params.parallelism,
                created_at,
            ],
        );

        match result {
            Ok(_) => Ok(()),
            // Users are never deleted, so after a successful verify the
            // only constraint that can fire is the (username, label) key.
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Err(PassKeepError::DuplicateLabel(label.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Decrypt and return the secret stored under `label` for `username`.
    ///
    /// The passphrase must verify before the vault even looks the label
    /// up, so an unauthorized caller cannot probe which labels exist.
    /// Returns the plaintext in a `Zeroizing` wrapper that wipes it when
    /// dropped.
    pub fn retrieve(
        &self,
        username: &str,
        label: &str,
        passphrase: &str,
    ) -> Result<Zeroizing<String>> {
        validate_label(label)?;

        if !self.auth.verify(username, passphrase)? {
            return Err(PassKeepError::Unauthorized);
        }

        let row = {
            let conn = self.db.lock()?;
            conn.query_row(
                "SELECT ciphertext, kdf_salt, nonce, memory_kib, iterations, parallelism
                 FROM secrets WHERE username = ?1 AND label = ?2",
                params![username, label],
                |row| {
                    Ok(EntryRow {
                        ciphertext: row.get(0)?,
                        kdf_salt: row.get(1)?,
                        nonce: row.get(2)?,
                        memory_kib: row.get(3)?,
                        iterations: row.get(4)?,
                        parallelism: row.get(5)?,
                    })
                },
            )
            .optional()?
        };

        let entry = match row {
            Some(e) => e,
            None => return Err(PassKeepError::LabelNotFound(label.to_string())),
        };

        // Re-derive the entry key with the stored salt and parameters.  The
        // parameters were validated at store time, so a derivation failure
        // here means the stored row no longer matches what was written.
        let entry_params = Argon2Params {
            memory_kib: entry.memory_kib,
            iterations: entry.iterations,
            parallelism: entry.parallelism,
        };
        let key = derive_key(passphrase.as_bytes(), &entry.kdf_salt, &entry_params)
            .map_err(|_| PassKeepError::IntegrityFailure)?;
        let plaintext = decrypt(key.as_bytes(), &entry.nonce, &entry.ciphertext)?;

        // Entries are written as UTF-8, so a decode failure after a valid
        // auth tag means the records are inconsistent.  The bytes inside
        // the error still hold plaintext; zeroize them before discarding.
        match String::from_utf8(plaintext) {
            Ok(s) => Ok(Zeroizing::new(s)),
            Err(e) => {
                let mut bad_bytes = e.into_bytes();
                bad_bytes.zeroize();
                Err(PassKeepError::IntegrityFailure)
            }
        }
    }
}

// ----------------------------------------------------------------------
// Validation
// ----------------------------------------------------------------------

/// Validate that a secret label is safe to store.
///
/// Allowed: ASCII letters, digits, underscores, hyphens, periods.
/// Must be non-empty and at most 256 characters.
pub fn validate_label(label: &str) -> Result<()> {
    if label.is_empty() {
        return Err(PassKeepError::InvalidName("label cannot be empty".into()));
    }
    if label.len() > MAX_LABEL_LEN {
        return Err(PassKeepError::InvalidName(format!(
            "label cannot exceed {MAX_LABEL_LEN} characters"
        )));
    }
    if !label
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-' || b == b'.')
    {
        return Err(PassKeepError::InvalidName(format!(
            "label '{label}' contains invalid characters — only ASCII letters, digits, underscores, hyphens, and periods are allowed"
        )));
    }
    Ok(())
}
