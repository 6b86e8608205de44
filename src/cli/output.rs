//! Styled terminal output.
//!
//! Every line the CLI prints goes through one of these helpers so the
//! styling stays consistent across commands.  Engine code never prints;
//! reporting happens here and only here.

use console::style;

/// Print the startup banner shown before every command.
pub fn banner() {
    let text = "\
╔══════════════════════════════════════════════╗
║                P A S S K E E P               ║
║        per-user encrypted secret vault       ║
╚══════════════════════════════════════════════╝";
    println!("{}", style(text).cyan().bold());
}

/// Success line: green check mark, then the message.
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Error line: red cross, written to stderr.
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Warning line: yellow sign, written to stderr.
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Informational line: blue info sign.
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Dim follow-up hint, prefixed with an arrow.
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Print a retrieved secret with its label.
pub fn print_secret(label: &str, secret: &str) {
    println!();
    println!("  {} {}", style("Label:").cyan().bold(), label);
    println!("  {} {}", style("Secret:").green().bold(), secret);
    println!();
}
