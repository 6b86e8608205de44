//! `passkeep add` — encrypt a secret and store it under a label.

use std::io::{self, IsTerminal, Read};

use zeroize::Zeroizing;

use crate::cli::output;
use crate::cli::{open_database, prompt_passphrase, Cli};
use crate::errors::{PassKeepError, Result};
use crate::vault::SecretVault;

/// Execute the `add` command.
pub fn execute(cli: &Cli, username: &str, label: &str, value: Option<&str>) -> Result<()> {
    // Determine the secret value from one of three sources.
    let secret = if let Some(v) = value {
        // Source 1: Inline value on the command line.
        output::warning("Value provided on command line — it may appear in shell history.");
        Zeroizing::new(v.to_string())
    } else if !io::stdin().is_terminal() {
        // Source 2: Piped input (stdin is not a terminal).
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        Zeroizing::new(buf.trim_end().to_string())
    } else {
        // Source 3: Interactive secure prompt (default).
        let v = dialoguer::Password::new()
            .with_prompt(format!("Enter secret value for {label}"))
            .interact()
            .map_err(|e| PassKeepError::CommandFailed(format!("input prompt: {e}")))?;
        Zeroizing::new(v)
    };

    let (db, settings) = open_database(cli)?;
    let passphrase = prompt_passphrase(username)?;

    let vault = SecretVault::with_params(db, settings.argon2_params());
    vault.store(username, label, &secret, &passphrase)?;

    output::success(&format!("Secret '{label}' stored for {username}."));
    output::tip(&format!("Retrieve it: passkeep show {username} {label}"));

    Ok(())
}
