//! Passphrase digests for the authentication store.
//!
//! A digest is the Argon2id output over (passphrase, per-user salt); it is
//! what gets persisted in place of the passphrase itself.  Verification
//! recomputes the digest from the candidate passphrase and compares it to
//! the stored value in constant time.

use subtle::ConstantTimeEq;
use zeroize::Zeroize;

use super::kdf::{derive_raw, Argon2Params, KEY_LEN};
use crate::errors::Result;

/// Length of a stored passphrase digest in bytes.
pub const DIGEST_LEN: usize = KEY_LEN;

/// Compute the digest to persist for a newly registered user.
pub fn digest_passphrase(
    passphrase: &[u8],
    salt: &[u8],
    params: &Argon2Params,
) -> Result<[u8; DIGEST_LEN]> {
    derive_raw(passphrase, salt, params)
}

/// Recompute the digest for a candidate passphrase and compare it to the
/// stored one in constant time.
///
/// Constant-time comparison prevents timing side-channels from leaking how
/// many digest bytes matched.
pub fn verify_digest(
    passphrase: &[u8],
    salt: &[u8],
    params: &Argon2Params,
    expected: &[u8],
) -> Result<bool> {
    let mut candidate = derive_raw(passphrase, salt, params)?;
    let matches = bool::from(candidate.as_slice().ct_eq(expected));
    candidate.zeroize();
    Ok(matches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::kdf::generate_salt;

    fn test_params() -> Argon2Params {
        Argon2Params {
            memory_kib: 8_192,
            iterations: 1,
            parallelism: 1,
        }
    }

    #[test]
    fn digest_verifies_with_same_passphrase() {
        let salt = generate_salt().unwrap();
        let digest = digest_passphrase(b"hunter2", &salt, &test_params()).unwrap();
        assert!(verify_digest(b"hunter2", &salt, &test_params(), &digest).unwrap());
    }

    #[test]
    fn digest_rejects_different_passphrase() {
        let salt = generate_salt().unwrap();
        let digest = digest_passphrase(b"hunter2", &salt, &test_params()).unwrap();
        assert!(!verify_digest(b"hunter3", &salt, &test_params(), &digest).unwrap());
    }

    #[test]
    fn digest_rejects_tampered_value() {
        let salt = generate_salt().unwrap();
        let mut digest = digest_passphrase(b"hunter2", &salt, &test_params()).unwrap();
        digest[0] ^= 0xFF;
        assert!(!verify_digest(b"hunter2", &salt, &test_params(), &digest).unwrap());
    }

    #[test]
    fn digest_depends_on_salt() {
        let a = digest_passphrase(b"hunter2", &generate_salt().unwrap(), &test_params()).unwrap();
        let b = digest_passphrase(b"hunter2", &generate_salt().unwrap(), &test_params()).unwrap();
        assert_ne!(a, b);
    }
}
