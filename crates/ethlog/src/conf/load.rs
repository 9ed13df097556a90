//! Load — config loading from file and environment variables.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::model::ConvertConfig;

pub const CONFIG_FILE_ENV: &str = "ETHLOG_CONFIG_FILE";
pub const DEFAULT_CONFIG_FILE: &str = "ethlog.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid {var}={value:?}: {reason}")]
    Env {
        var: &'static str,
        value: String,
        reason: String,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

impl ConvertConfig {
    /// Load configuration from file and environment variables
    /// Priority: Environment Variables > Config File > Defaults
    ///
    /// An explicit path (argument or `ETHLOG_CONFIG_FILE`) must exist; the
    /// default `ethlog.toml` is optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let explicit = explicit
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_FILE_ENV).map(PathBuf::from));

        let mut config = match explicit {
            Some(path) => {
                tracing::info!("Loading configuration from: {}", path.display());
                Self::from_file(&path)?
            }
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                tracing::info!("Loading configuration from: {}", DEFAULT_CONFIG_FILE);
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => {
                tracing::debug!("No config file at {}, using defaults", DEFAULT_CONFIG_FILE);
                Self::default()
            }
        };

        config.apply_env(|var| std::env::var(var).ok())?;
        Ok(config)
    }

    /// Load configuration from TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply environment overrides through `lookup` (normally `std::env::var`).
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup("ETHLOG_INPUT_DIR") {
            self.input_dir = PathBuf::from(dir);
        }
        if let Some(dir) = lookup("ETHLOG_OUTPUT_DIR") {
            self.output_dir = PathBuf::from(dir);
        }
        if let Some(value) = lookup("ETHLOG_DELIMITER") {
            self.delimiter = single_char(&value).ok_or_else(|| ConfigError::Env {
                var: "ETHLOG_DELIMITER",
                value: value.clone(),
                reason: "expected exactly one character".to_string(),
            })?;
        }
        Ok(())
    }
}

fn single_char(value: &str) -> Option<char> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn test_env_overrides() {
        let mut cfg = ConvertConfig::default();
        cfg.apply_env(env(&[
            ("ETHLOG_INPUT_DIR", "/data/logs"),
            ("ETHLOG_OUTPUT_DIR", "/data/out"),
            ("ETHLOG_DELIMITER", ","),
        ]))
        .unwrap();

        assert_eq!(cfg.input_dir, PathBuf::from("/data/logs"));
        assert_eq!(cfg.output_dir, PathBuf::from("/data/out"));
        assert_eq!(cfg.delimiter, ',');
    }

    #[test]
    fn test_no_env_keeps_values() {
        let mut cfg = ConvertConfig::default();
        cfg.apply_env(env(&[])).unwrap();
        assert_eq!(cfg, ConvertConfig::default());
    }

    #[test]
    fn test_multi_char_delimiter_rejected() {
        let mut cfg = ConvertConfig::default();
        let err = cfg.apply_env(env(&[("ETHLOG_DELIMITER", ";;")])).unwrap_err();
        assert!(matches!(err, ConfigError::Env { var: "ETHLOG_DELIMITER", .. }));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "output_dir = \"csv\"\nconcat = true").unwrap();

        let cfg = ConvertConfig::from_file(file.path()).unwrap();
        assert_eq!(cfg.output_dir, PathBuf::from("csv"));
        assert!(cfg.concat);
        assert_eq!(cfg.input_dir, PathBuf::from("./logs/"));
    }

    #[test]
    fn test_from_file_errors() {
        let missing = ConvertConfig::from_file(Path::new("/nonexistent/ethlog.toml")).unwrap_err();
        assert!(matches!(missing, ConfigError::Read { .. }));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "concat = \"maybe\"").unwrap();
        let bad = ConvertConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(bad, ConfigError::Parse { .. }));
        assert!(bad.to_string().contains(&file.path().display().to_string()));
    }

    #[test]
    fn test_explicit_path_must_exist() {
        let err = ConvertConfig::load(Some(Path::new("/nonexistent/ethlog.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
