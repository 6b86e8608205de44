//! Passphrase-based key derivation using Argon2id.
//!
//! One memory-hard primitive backs both the stored passphrase digests and
//! the per-entry encryption keys; the two never share a salt, so neither
//! output reveals anything about the other.  Costs come from
//! `Argon2Params` (configured in `.passkeep.toml`, or the defaults).

use argon2::{Algorithm, Argon2, Params, Version};
use rand::TryRngCore;
use zeroize::Zeroize;

use crate::errors::{PassKeepError, Result};

/// Salt size in bytes, for both digest salts and entry salts.
pub const SALT_LEN: usize = 32;

/// Size of derived keys and digests in bytes (fits an AES-256 key).
pub const KEY_LEN: usize = 32;

/// Floor for the memory cost in KiB (8 MB).
const MIN_MEMORY_KIB: u32 = 8_192;

/// Argon2id cost parameters.
///
/// Mirrors `config::Argon2Settings` so the CLI can hand through whatever
/// `.passkeep.toml` configures.  Every credential and secret record also
/// stores the parameters it was written with, so records created under
/// older settings keep verifying after the configuration changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Argon2Params {
    /// Memory cost in KiB; the default is 64 MB.
    pub memory_kib: u32,
    /// Iteration count.
    pub iterations: u32,
    /// Parallelism lanes.
    pub parallelism: u32,
}

impl Default for Argon2Params {
    fn default() -> Self {
        Self {
            memory_kib: 65_536,
            iterations: 3,
            parallelism: 4,
        }
    }
}

/// A 32-byte encryption key derived from a passphrase, zeroed on drop.
///
/// Never persisted; it exists only for the duration of one encrypt or
/// decrypt call.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct DerivedKey {
    bytes: [u8; KEY_LEN],
}

impl DerivedKey {
    /// Borrow the raw key material.
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }
}

/// Derive a 32-byte encryption key from a passphrase and salt.
///
/// Deterministic: the same (passphrase, salt, params) triple always yields
/// the same key, which is what lets `retrieve` re-derive an entry's key.
pub fn derive_key(
    passphrase: &[u8],
    salt: &[u8],
    params: &Argon2Params,
) -> Result<DerivedKey> {
    Ok(DerivedKey {
        bytes: derive_raw(passphrase, salt, params)?,
    })
}

/// Run Argon2id over (passphrase, salt) with explicit parameters.
///
/// Parameters below the safety floor are rejected before any work is done.
pub(crate) fn derive_raw(
    passphrase: &[u8],
    salt: &[u8],
    argon2_params: &Argon2Params,
) -> Result<[u8; KEY_LEN]> {
    if argon2_params.memory_kib < MIN_MEMORY_KIB {
        return Err(PassKeepError::KeyDerivationFailed(format!(
            "Argon2 memory cost {} KiB is below the {MIN_MEMORY_KIB} KiB floor",
            argon2_params.memory_kib
        )));
    }
    if argon2_params.iterations < 1 {
        return Err(PassKeepError::KeyDerivationFailed(
            "Argon2 needs at least one iteration".into(),
        ));
    }
    if argon2_params.parallelism < 1 {
        return Err(PassKeepError::KeyDerivationFailed(
            "Argon2 needs at least one lane".into(),
        ));
    }

    let params = Params::new(
        argon2_params.memory_kib,
        argon2_params.iterations,
        argon2_params.parallelism,
        Some(KEY_LEN),
    )
    .map_err(|e| PassKeepError::KeyDerivationFailed(format!("Argon2 rejected the parameters: {e}")))?;

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let mut key = [0u8; KEY_LEN];
    argon2
        .hash_password_into(passphrase, salt, &mut key)
        .map_err(|e| PassKeepError::KeyDerivationFailed(format!("Argon2id failed: {e}")))?;

    Ok(key)
}

/// Fresh random salt from the OS RNG.
pub fn generate_salt() -> Result<[u8; SALT_LEN]> {
    let mut salt = [0u8; SALT_LEN];
    rand::rngs::OsRng
        .try_fill_bytes(&mut salt)
        .map_err(|e| PassKeepError::KeyDerivationFailed(format!("OS RNG unavailable: {e}")))?;
    Ok(salt)
}
