//! `passkeep show` — decrypt and display a stored secret.

use crate::cli::output;
use crate::cli::{open_database, prompt_passphrase, Cli};
use crate::errors::Result;
use crate::vault::SecretVault;

/// Execute the `show` command.
pub fn execute(cli: &Cli, username: &str, label: &str) -> Result<()> {
    let (db, settings) = open_database(cli)?;
    let passphrase = prompt_passphrase(username)?;

    // Decrypt and print the secret (plaintext is wiped on drop).
    let vault = SecretVault::with_params(db, settings.argon2_params());
    let secret = vault.retrieve(username, label, &passphrase)?;

    output::print_secret(label, &secret);

    Ok(())
}
