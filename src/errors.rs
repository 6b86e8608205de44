use thiserror::Error;

/// All errors that can occur in PassKeep.
#[derive(Debug, Error)]
pub enum PassKeepError {
    // --- Registration errors ---
    #[error("User '{0}' already exists")]
    UserAlreadyExists(String),

    #[error("Authentication failed — unknown user or wrong passphrase")]
    Unauthorized,

    // --- Vault errors ---
    #[error("A secret labelled '{0}' already exists for this user")]
    DuplicateLabel(String),

    #[error("No secret labelled '{0}' for this user")]
    LabelNotFound(String),

    #[error("Integrity check failed — stored entry is corrupted or inconsistent")]
    IntegrityFailure,

    // --- Validation errors ---
    #[error("Invalid name: {0}")]
    InvalidName(String),

    // --- Crypto errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    // --- Storage errors ---
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Internal error: {0}")]
    Internal(String),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),
}

/// Convenience type alias for PassKeep results.
pub type Result<T> = std::result::Result<T, PassKeepError>;
