//! SQLite record store shared by the authentication store and the vault.
//!
//! All durable state lives in a single database file, `passkeep.db`, with
//! one table per record kind: `users` for credentials and `secrets` for
//! encrypted entries.  SQLite gives every INSERT record-level atomicity,
//! so a crash mid-operation never leaves a half-written credential or
//! entry behind.

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::Connection;

use crate::errors::{PassKeepError, Result};

/// SQL statements creating the schema, idempotent by construction.
///
/// Both tables carry the Argon2 parameters each record was written with,
/// so records created under older cost settings keep working after the
/// configuration changes.
const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS users (
    username     TEXT PRIMARY KEY,
    digest       BLOB NOT NULL,
    digest_salt  BLOB NOT NULL,
    memory_kib   INTEGER NOT NULL,
    iterations   INTEGER NOT NULL,
    parallelism  INTEGER NOT NULL,
    created_at   TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS secrets (
    username     TEXT NOT NULL REFERENCES users(username),
    label        TEXT NOT NULL,
    ciphertext   BLOB NOT NULL,
    kdf_salt     BLOB NOT NULL,
    nonce        BLOB NOT NULL,
    memory_kib   INTEGER NOT NULL,
    iterations   INTEGER NOT NULL,
    parallelism  INTEGER NOT NULL,
    created_at   TEXT NOT NULL,
    PRIMARY KEY (username, label)
);
";

/// Shared handle to the record store.
///
/// Wraps a single `rusqlite::Connection` behind `Arc<Mutex<..>>` so the
/// authentication store and the vault can operate on the same database.
/// Cloning the handle is cheap and shares the connection.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open (or create) the database at `path` and ensure the schema exists.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;

        // Set restrictive permissions on the database (owner-only).
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = std::fs::Permissions::from_mode(0o600);
            let _ = std::fs::set_permissions(path, perms);
        }

        Self::configure(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Open an in-memory database (tests).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::configure(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn configure(conn: &Connection) -> Result<()> {
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;
             PRAGMA foreign_keys = ON;
             PRAGMA busy_timeout = 5000;",
        )?;
        conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    /// Lock the underlying connection for one operation.
    pub(crate) fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| PassKeepError::Internal("database mutex poisoned".into()))
    }
}
