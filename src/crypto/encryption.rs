//! AES-256-GCM authenticated encryption.
//!
//! Each call to `encrypt` generates a fresh random 12-byte nonce and
//! returns it alongside the ciphertext, so the two can be persisted in
//! their own record fields.  The ciphertext carries the 16-byte auth tag
//! appended by `aes-gcm`.

use aes_gcm::aead::{Aead, KeyInit, OsRng};
use aes_gcm::{AeadCore, Aes256Gcm, Nonce};

use crate::errors::{PassKeepError, Result};

/// AES-GCM nonce size in bytes.
pub const NONCE_LEN: usize = 12;

/// Encrypt `plaintext` with a 32-byte `key` under a fresh random nonce.
///
/// Returns `(nonce, ciphertext)`; callers store both.
pub fn encrypt(key: &[u8], plaintext: &[u8]) -> Result<([u8; NONCE_LEN], Vec<u8>)> {
    let cipher = Aes256Gcm::new_from_slice(key)
        .map_err(|e| PassKeepError::EncryptionFailed(format!("invalid key: {e}")))?;

    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
    let ciphertext = cipher
        .encrypt(&nonce, plaintext)
        .map_err(|e| PassKeepError::EncryptionFailed(format!("AES-GCM failure: {e}")))?;

    Ok((nonce.into(), ciphertext))
}

/// Decrypt a stored entry with the nonce it was written under.
///
/// Only called after passphrase verification has succeeded, so any failure
/// here (wrong nonce length, auth tag mismatch) means the stored records
/// are corrupted or inconsistent.
pub fn decrypt(key: &[u8], nonce: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>> {
    // A nonce of the wrong size can only mean a mangled record.
    if nonce.len() != NONCE_LEN {
        return Err(PassKeepError::IntegrityFailure);
    }

    let cipher = Aes256Gcm::new_from_slice(key).map_err(|_| PassKeepError::IntegrityFailure)?;
    cipher
        .decrypt(Nonce::from_slice(nonce), ciphertext)
        .map_err(|_| PassKeepError::IntegrityFailure)
}
