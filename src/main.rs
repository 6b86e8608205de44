use clap::Parser;
use passkeep::cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    // Completions are piped into files; keep that output script-clean.
    if !matches!(cli.command, Commands::Completions { .. }) {
        passkeep::cli::output::banner();
    }

    let result = match cli.command {
        Commands::Register { ref username } => {
            passkeep::cli::commands::register::execute(&cli, username)
        }
        Commands::Add {
            ref username,
            ref label,
            ref value,
        } => passkeep::cli::commands::add::execute(&cli, username, label, value.as_deref()),
        Commands::Show {
            ref username,
            ref label,
        } => passkeep::cli::commands::show::execute(&cli, username, label),
        Commands::Completions { ref shell } => passkeep::cli::commands::completions::execute(shell),
    };

    if let Err(e) = result {
        passkeep::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
