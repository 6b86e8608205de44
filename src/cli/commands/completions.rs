//! `passkeep completions` — shell completion script generation.
//!
//! Scripts are written to stdout so they can be redirected to wherever the
//! shell expects them:
//!   passkeep completions zsh > ~/.zfunc/_passkeep
//!   passkeep completions bash > ~/.bash_completion.d/passkeep

use std::io;

use clap::CommandFactory;
use clap_complete::{generate, Shell};

use crate::cli::Cli;
use crate::errors::{PassKeepError, Result};

/// Execute the `completions` command.
pub fn execute(shell: &str) -> Result<()> {
    let shell = parse_shell(shell)?;
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "passkeep", &mut io::stdout());
    Ok(())
}

/// Resolve a shell name to a `clap_complete` target, case-insensitively.
///
/// `Shell`'s own `FromStr` covers the canonical lowercase names; "ps" is
/// kept as a PowerShell alias.
fn parse_shell(name: &str) -> Result<Shell> {
    if name.eq_ignore_ascii_case("ps") {
        return Ok(Shell::PowerShell);
    }
    name.to_lowercase().parse().map_err(|_| {
        PassKeepError::CommandFailed(format!(
            "unknown shell '{name}' — supported: bash, zsh, fish, powershell, elvish"
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_every_supported_shell() {
        for (name, want) in [
            ("bash", Shell::Bash),
            ("zsh", Shell::Zsh),
            ("fish", Shell::Fish),
            ("powershell", Shell::PowerShell),
            ("elvish", Shell::Elvish),
        ] {
            assert_eq!(parse_shell(name).unwrap(), want);
        }
    }

    #[test]
    fn accepts_mixed_case_and_the_ps_alias() {
        assert_eq!(parse_shell("BASH").unwrap(), Shell::Bash);
        assert_eq!(parse_shell("PowerShell").unwrap(), Shell::PowerShell);
        assert_eq!(parse_shell("ps").unwrap(), Shell::PowerShell);
        assert_eq!(parse_shell("PS").unwrap(), Shell::PowerShell);
    }

    #[test]
    fn rejects_unknown_shells() {
        assert!(parse_shell("csh").is_err());
        assert!(parse_shell("").is_err());
    }
}
