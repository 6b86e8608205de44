//! Configuration module — project-level settings from `.passkeep.toml`.

pub mod settings;

pub use settings::{Argon2Settings, Settings};
