//! Cryptographic primitives for PassKeep.
//!
//! This module provides:
//! - Argon2id passphrase digests with constant-time verification (`digest`)
//! - Argon2id key derivation for per-entry encryption keys (`kdf`)
//! - AES-256-GCM encryption and decryption (`encryption`)

pub mod digest;
pub mod encryption;
pub mod kdf;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{encrypt, decrypt, derive_key, ...};
pub use digest::{digest_passphrase, verify_digest};
pub use encryption::{decrypt, encrypt};
pub use kdf::{derive_key, generate_salt, Argon2Params, DerivedKey};
