//! CLI module — Clap parser, passphrase prompts, and command implementations.

pub mod commands;
pub mod output;

use clap::Parser;
use zeroize::Zeroizing;

use crate::config::Settings;
use crate::db::Database;
use crate::errors::{PassKeepError, Result};

/// Minimum passphrase length to prevent trivially weak passphrases.
const MIN_PASSPHRASE_LEN: usize = 8;

/// PassKeep CLI: per-user encrypted secret vault.
#[derive(Parser)]
#[command(
    name = "passkeep",
    about = "Per-user encrypted secret vault",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Data directory holding the database (default: .passkeep)
    #[arg(long, global = true, env = "PASSKEEP_DATA_DIR")]
    pub data_dir: Option<String>,
}

/// Top-level subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Register a new user with a master passphrase
    Register {
        /// Username to register
        username: String,
    },

    /// Encrypt and store a secret under a label
    Add {
        /// Owner of the secret
        username: String,
        /// Label for the secret (e.g. email)
        label: String,
        /// Secret value (prompted for when omitted)
        value: Option<String>,
    },

    /// Decrypt and display the secret stored under a label
    Show {
        /// Owner of the secret
        username: String,
        /// Label of the secret
        label: String,
    },

    /// Emit a shell completion script
    Completions {
        /// Target shell (bash, zsh, fish, powershell, elvish)
        shell: String,
    },
}

// ---------------------------------------------------------------------------
// Helpers shared across the command implementations
// ---------------------------------------------------------------------------

/// Get a user's master passphrase, trying in order:
/// 1. `PASSKEEP_PASSPHRASE` env var (CI/scripted usage)
/// 2. Interactive hidden prompt
///
/// Returns `Zeroizing<String>` so the passphrase is wiped from memory on drop.
pub fn prompt_passphrase(username: &str) -> Result<Zeroizing<String>> {
    // Check the environment variable first (CI/scripting friendly).
    if let Ok(pw) = std::env::var("PASSKEEP_PASSPHRASE") {
        if !pw.is_empty() {
            return Ok(Zeroizing::new(pw));
        }
    }

    // Fall back to interactive prompt.
    let pw = dialoguer::Password::new()
        .with_prompt(format!("Enter master passphrase for {username}"))
        .interact()
        .map_err(|e| PassKeepError::CommandFailed(format!("passphrase prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Prompt for a brand-new passphrase with confirmation (used by `register`).
///
/// Also respects `PASSKEEP_PASSPHRASE` for scripted usage.
/// Enforces a minimum passphrase length.
///
/// Returns `Zeroizing<String>` so the passphrase is wiped from memory on drop.
pub fn prompt_new_passphrase(username: &str) -> Result<Zeroizing<String>> {
    // Check the environment variable first (CI/scripting friendly).
    if let Ok(pw) = std::env::var("PASSKEEP_PASSPHRASE") {
        if !pw.is_empty() {
            if pw.len() < MIN_PASSPHRASE_LEN {
                return Err(PassKeepError::CommandFailed(format!(
                    "passphrase must be at least {MIN_PASSPHRASE_LEN} characters"
                )));
            }
            return Ok(Zeroizing::new(pw));
        }
    }

    loop {
        let passphrase = dialoguer::Password::new()
            .with_prompt(format!("Choose master passphrase for {username}"))
            .with_confirmation(
                "Confirm master passphrase",
                "Passphrases do not match, try again",
            )
            .interact()
            .map_err(|e| PassKeepError::CommandFailed(format!("passphrase prompt: {e}")))?;

        if passphrase.len() < MIN_PASSPHRASE_LEN {
            output::warning(&format!(
                "Passphrase must be at least {MIN_PASSPHRASE_LEN} characters. Try again."
            ));
            continue;
        }

        return Ok(Zeroizing::new(passphrase));
    }
}

/// Open the database named by the CLI arguments and config file.
///
/// Resolution order for the data directory: `--data-dir` flag (or
/// `PASSKEEP_DATA_DIR`), then `data_dir` from `.passkeep.toml`, then the
/// default `.passkeep`.  The directory is created if it does not exist.
pub fn open_database(cli: &Cli) -> Result<(Database, Settings)> {
    let cwd = std::env::current_dir()?;

    let mut settings = Settings::load(&cwd)?;
    if let Some(dir) = &cli.data_dir {
        settings.data_dir = dir.clone();
    }

    let db_path = settings.db_path(&cwd);
    if let Some(parent) = db_path.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent)?;
            output::info(&format!("Created data directory: {}", parent.display()));
        }
    }

    let db = Database::open(&db_path)?;
    Ok((db, settings))
}
