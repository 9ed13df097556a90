//! Model — ConvertConfig and related types.

use std::path::PathBuf;
use serde::{Deserialize, Serialize};

use crate::record::{EventTypeColumn, DEFAULT_DELIMITER};

/// Characters that occur inside formatted timestamps or upstream values
const RESERVED_DELIMITERS: [char; 5] = ['=', '-', ':', '.', '|'];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    pub input_dir: PathBuf,
    /// Extension (without the dot) of the files picked up as sources
    pub input_extension: String,
    /// Stripped from file names to derive the source id
    pub source_suffix: String,
    pub output_dir: PathBuf,
    /// File name used inside `output_dir` when `concat` is set
    pub concat_name: String,
    pub delimiter: char,
    pub event_type: EventTypeColumn,
    pub output: OutputTarget,
    pub concat: bool,
}

/// Where rendered records go
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputTarget {
    #[default]
    File,
    Stdout,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("./logs/"),
            input_extension: "txt".to_string(),
            source_suffix: "_log.txt".to_string(),
            output_dir: PathBuf::from("./output/"),
            concat_name: "combined.csv".to_string(),
            delimiter: DEFAULT_DELIMITER,
            event_type: EventTypeColumn::Label,
            output: OutputTarget::File,
            concat: false,
        }
    }
}

impl ConvertConfig {
    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.input_dir.as_os_str().is_empty() {
            return Err("input_dir must not be empty".to_string());
        }
        if self.output_dir.as_os_str().is_empty() {
            return Err("output_dir must not be empty".to_string());
        }
        if self.input_extension.is_empty() {
            return Err("input_extension must not be empty".to_string());
        }
        if self.concat_name.is_empty() {
            return Err("concat_name must not be empty".to_string());
        }
        if self.concat && self.output == OutputTarget::Stdout {
            return Err("concat cannot be combined with stdout output".to_string());
        }
        validate_delimiter(self.delimiter)
    }
}

pub(crate) fn validate_delimiter(delimiter: char) -> Result<(), String> {
    if !delimiter.is_ascii_punctuation() {
        return Err(format!("delimiter {:?} must be an ASCII punctuation character", delimiter));
    }
    if RESERVED_DELIMITERS.contains(&delimiter) {
        return Err(format!(
            "delimiter {:?} occurs inside timestamps or field values; pick another",
            delimiter
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── Defaults ─────────────────────────────────────────────────

    #[test]
    fn test_default_paths() {
        let cfg = ConvertConfig::default();
        assert_eq!(cfg.input_dir, PathBuf::from("./logs/"));
        assert_eq!(cfg.output_dir, PathBuf::from("./output/"));
        assert_eq!(cfg.input_extension, "txt");
        assert_eq!(cfg.source_suffix, "_log.txt");
        assert_eq!(cfg.concat_name, "combined.csv");
    }

    #[test]
    fn test_default_output_shape() {
        let cfg = ConvertConfig::default();
        assert_eq!(cfg.delimiter, ';');
        assert_eq!(cfg.event_type, EventTypeColumn::Label);
        assert_eq!(cfg.output, OutputTarget::File);
        assert!(!cfg.concat);
        assert!(cfg.validate().is_ok());
    }

    // ── Validation ───────────────────────────────────────────────

    #[test]
    fn test_validate_rejects_empty_values() {
        let cases: Vec<(ConvertConfig, &str)> = vec![
            (ConvertConfig { input_dir: PathBuf::new(), ..Default::default() }, "input_dir"),
            (ConvertConfig { output_dir: PathBuf::new(), ..Default::default() }, "output_dir"),
            (ConvertConfig { input_extension: String::new(), ..Default::default() }, "input_extension"),
            (ConvertConfig { concat_name: String::new(), ..Default::default() }, "concat_name"),
        ];

        for (cfg, field) in cases {
            let err = cfg.validate().unwrap_err();
            assert!(err.contains(field), "Error should mention {}: {}", field, err);
        }
    }

    #[test]
    fn test_validate_delimiters() {
        for ok in [';', ',', '#', '/'] {
            let cfg = ConvertConfig { delimiter: ok, ..Default::default() };
            assert!(cfg.validate().is_ok(), "delimiter {:?} should be accepted", ok);
        }
        for reserved in ['=', '-', ':', '.', '|', 'a', ' ', '\t', '…'] {
            let cfg = ConvertConfig { delimiter: reserved, ..Default::default() };
            assert!(cfg.validate().is_err(), "delimiter {:?} should be rejected", reserved);
        }
    }

    #[test]
    fn test_validate_rejects_concat_to_stdout() {
        let cfg = ConvertConfig {
            concat: true,
            output: OutputTarget::Stdout,
            ..Default::default()
        };
        assert!(cfg.validate().unwrap_err().contains("concat"));
    }

    // ── Serialization ────────────────────────────────────────────

    #[test]
    fn test_toml_round_trip() {
        let cfg = ConvertConfig {
            delimiter: ',',
            event_type: EventTypeColumn::Code,
            ..Default::default()
        };
        let toml_str = toml::to_string(&cfg).expect("Should serialize to TOML");
        let back: ConvertConfig = toml::from_str(&toml_str).expect("Should deserialize from TOML");
        assert_eq!(back, cfg);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let toml_str = r#"
            input_dir = "/var/log/geth"
            event_type = "code"
            output = "stdout"
        "#;
        let cfg: ConvertConfig = toml::from_str(toml_str).expect("Should accept partial TOML");
        assert_eq!(cfg.input_dir, PathBuf::from("/var/log/geth"));
        assert_eq!(cfg.event_type, EventTypeColumn::Code);
        assert_eq!(cfg.output, OutputTarget::Stdout);
        assert_eq!(cfg.delimiter, ';'); // default
    }
}
