use std::{io, path::Path};

use serde::{Deserialize, Serialize};

/// The name of the optional configuration file in the quiz root.
pub const CONFIG_FILE: &str = "quickfire.toml";

/// How questions are paired with the entries of the answer key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Correspondence {
    /// The question headed `### N.` pairs with answer `N.`.
    ///
    /// Skipped (malformed) questions do not shift the pairing of the
    /// questions that follow them.
    #[default]
    Heading,
    /// The Nth valid question pairs with answer `N.`.
    ///
    /// A skipped question shifts every later pairing by one.
    Ordinal,
}

/// Configuration for discovering and shuffling quiz documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// The file name of quiz documents.
    ///
    /// Only files with exactly this name are picked up during discovery.
    pub file_name: String,

    /// How deep below the root quiz documents may be.
    ///
    /// The default of 2 matches the `<root>/<lab>/quickfire.md` layout.
    pub max_depth: usize,

    /// How questions are paired with answers.
    pub correspondence: Correspondence,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            file_name: default_file_name(),
            max_depth: default_max_depth(),
            correspondence: Correspondence::default(),
        }
    }
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Loads `quickfire.toml` from `root`, falling back to the defaults if it
    /// is missing or invalid.
    #[must_use]
    pub fn load_or_default(root: &Path) -> Self {
        let path = root.join(CONFIG_FILE);
        Self::load(&path).unwrap_or_else(|e| {
            tracing::debug!("Failed to load config from {}: {e}", path.display());
            Self::default()
        })
    }
}

/// Errors that can occur when loading the configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config file: {0}")]
    Io(#[from] io::Error),
    /// The file is not valid configuration TOML.
    #[error("failed to parse config file: {0}")]
    Toml(#[from] toml::de::Error),
}

fn default_file_name() -> String {
    "quickfire.md".to_string()
}

const fn default_max_depth() -> usize {
    2
}

/// The serialized versions of the configuration.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default = "default_file_name")]
        file_name: String,

        #[serde(default = "default_max_depth")]
        max_depth: usize,

        #[serde(default)]
        correspondence: Correspondence,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                file_name,
                max_depth,
                correspondence,
            } => Self {
                file_name,
                max_depth,
                correspondence,
            },
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            file_name: config.file_name,
            max_depth: config.max_depth,
            correspondence: config.correspondence,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn load_reads_valid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            b"_version = \"1\"\nfile_name = \"quiz.md\"\nmax_depth = 4\ncorrespondence = \"ordinal\"\n",
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.file_name, "quiz.md");
        assert_eq!(config.max_depth, 4);
        assert_eq!(config.correspondence, Correspondence::Ordinal);
    }

    #[test]
    fn load_missing_file_returns_error() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("missing.toml");

        let error = Config::load(&missing).unwrap_err();
        assert!(matches!(error, ConfigError::Io(_)));
    }

    #[test]
    fn load_invalid_toml_returns_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"_version = \"1\"\nmax_depth = \"deep\"\n")
            .unwrap();

        let error = Config::load(file.path()).unwrap_err();
        assert!(matches!(error, ConfigError::Toml(_)));
    }

    #[test]
    fn empty_file_returns_default() {
        let expected = Config::default();
        let actual: Config = toml::from_str(r#"_version = "1""#).unwrap();
        assert_eq!(actual, expected);
    }

    #[test]
    fn load_or_default_falls_back() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join(CONFIG_FILE), "not = [valid").unwrap();

        assert_eq!(Config::load_or_default(tmp.path()), Config::default());
    }
}
