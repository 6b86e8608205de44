//! `passkeep register` — register a new user with a master passphrase.

use crate::auth::AuthStore;
use crate::cli::output;
use crate::cli::{open_database, prompt_new_passphrase, Cli};
use crate::errors::Result;

/// Execute the `register` command.
pub fn execute(cli: &Cli, username: &str) -> Result<()> {
    let (db, settings) = open_database(cli)?;

    // Prompt for a new passphrase (with confirmation).
    let passphrase = prompt_new_passphrase(username)?;

    let auth = AuthStore::with_params(db, settings.argon2_params());
    auth.register(username, &passphrase)?;

    output::success(&format!("User '{username}' registered."));
    output::warning(
        "The master passphrase is never stored. If it is lost, stored secrets cannot be recovered.",
    );
    output::tip(&format!("Add a secret: passkeep add {username} <label>"));

    Ok(())
}
