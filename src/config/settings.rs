use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::crypto::kdf::Argon2Params;
use crate::errors::{PassKeepError, Result};

/// Name of the database file inside the data directory.
pub const DB_FILE_NAME: &str = "passkeep.db";

/// Settings read from `.passkeep.toml` in the working directory.
///
/// The file is optional, and so is every key in it; anything missing falls
/// back to the defaults below, so a bare `passkeep register` needs no setup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Directory holding `passkeep.db`, relative to the working directory.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Argon2id cost settings, from the `[argon2]` table.
    #[serde(default)]
    pub argon2: Argon2Settings,
}

fn default_data_dir() -> String {
    ".passkeep".to_string()
}

/// Argon2id costs applied to *new* records only.  Existing credentials and
/// secrets carry the costs they were written with, so raising these never
/// locks anyone out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Argon2Settings {
    /// Memory cost in KiB.
    #[serde(default = "default_memory_kib")]
    pub memory_kib: u32,

    /// Iteration count.
    #[serde(default = "default_iterations")]
    pub iterations: u32,

    /// Parallelism degree.
    #[serde(default = "default_parallelism")]
    pub parallelism: u32,
}

fn default_memory_kib() -> u32 {
    65_536 // 64 MiB
}

fn default_iterations() -> u32 {
    3
}

fn default_parallelism() -> u32 {
    4
}

impl Default for Argon2Settings {
    fn default() -> Self {
        Self {
            memory_kib: default_memory_kib(),
            iterations: default_iterations(),
            parallelism: default_parallelism(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            argon2: Argon2Settings::default(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the working directory.
    const FILE_NAME: &'static str = ".passkeep.toml";

    /// Load settings from `<project_dir>/.passkeep.toml`.
    ///
    /// A missing file yields the defaults; a file that exists but does not
    /// parse is an error, so a typo never silently downgrades the costs.
    pub fn load(project_dir: &Path) -> Result<Self> {
        let config_path = project_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;
        toml::from_str(&contents).map_err(|e| {
            PassKeepError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })
    }

    /// Full path of the database file under `project_dir`.
    ///
    /// Example: `project_dir/.passkeep/passkeep.db`
    pub fn db_path(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.data_dir).join(DB_FILE_NAME)
    }

    /// The configured costs as crypto-layer parameters.
    pub fn argon2_params(&self) -> Argon2Params {
        Argon2Params {
            memory_kib: self.argon2.memory_kib,
            iterations: self.argon2.iterations,
            parallelism: self.argon2.parallelism,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn defaults_cover_a_missing_file() {
        let tmp = TempDir::new().unwrap();
        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.data_dir, ".passkeep");
        assert_eq!(settings.argon2.memory_kib, 65_536);
        assert_eq!(settings.argon2.iterations, 3);
        assert_eq!(settings.argon2.parallelism, 4);
    }

    #[test]
    fn explicit_values_override_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = "\
data_dir = \"secrets\"

[argon2]
memory_kib = 131072
iterations = 5
parallelism = 8
";
        fs::write(tmp.path().join(".passkeep.toml"), config).unwrap();

        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.data_dir, "secrets");
        assert_eq!(settings.argon2.memory_kib, 131_072);
        assert_eq!(settings.argon2.iterations, 5);
        assert_eq!(settings.argon2.parallelism, 8);
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(".passkeep.toml"),
            "[argon2]\niterations = 5\n",
        )
        .unwrap();

        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.argon2.iterations, 5);
        assert_eq!(settings.argon2.memory_kib, 65_536);
        assert_eq!(settings.data_dir, ".passkeep");
    }

    #[test]
    fn malformed_toml_is_an_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".passkeep.toml"), "not valid {{toml").unwrap();
        assert!(Settings::load(tmp.path()).is_err());
    }

    #[test]
    fn db_path_joins_data_dir_and_file_name() {
        let settings = Settings::default();
        let project = Path::new("/home/user/myproject");
        assert_eq!(
            settings.db_path(project),
            PathBuf::from("/home/user/myproject/.passkeep/passkeep.db")
        );

        let settings = Settings {
            data_dir: "secrets".to_string(),
            ..Settings::default()
        };
        assert_eq!(
            settings.db_path(project),
            PathBuf::from("/home/user/myproject/secrets/passkeep.db")
        );
    }
}
