//! Command-line argument parsing with clap.

use std::path::PathBuf;
use clap::Parser;

use crate::conf::{ConvertConfig, OutputTarget, CONFIG_FILE_ENV};
use crate::record::EventTypeColumn;

/// Convert geth debug logs into delimited block-event records.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "ethlog")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Directory holding the `*.txt` log files.
    #[arg(long, value_name = "DIR")]
    pub input_dir: Option<PathBuf>,

    /// Directory the record files are written to.
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Write every source into a single file.
    #[arg(short, long, conflicts_with = "stdout")]
    pub concat: bool,

    /// Write records to standard output instead of files.
    #[arg(long)]
    pub stdout: bool,

    /// Field delimiter.
    #[arg(long, value_name = "CHAR")]
    pub delimiter: Option<char>,

    /// Emit the numeric event code instead of the message label.
    #[arg(long)]
    pub event_code: bool,

    /// TOML configuration file.
    #[arg(long, value_name = "FILE", env = CONFIG_FILE_ENV)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Overlay the flags that were given on top of `config`.
    pub fn apply(&self, config: &mut ConvertConfig) {
        if let Some(dir) = &self.input_dir {
            config.input_dir = dir.clone();
        }
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
        if let Some(delimiter) = self.delimiter {
            config.delimiter = delimiter;
        }
        if self.concat {
            config.concat = true;
        }
        if self.stdout {
            config.output = OutputTarget::Stdout;
        }
        if self.event_code {
            config.event_type = EventTypeColumn::Code;
        }
    }
}
