//! Command implementations, one module per subcommand.

pub mod add;
pub mod completions;
pub mod register;
pub mod show;
