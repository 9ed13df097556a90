//! Source — input discovery and per-source conversion.

pub mod discover;
pub mod convert;

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::parser::ParseError;
use crate::record::RecordError;

pub use convert::{Converter, SourceSummary};
pub use discover::{discover, source_id, SourceFile};

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to scan input directory {path}: {source}")]
    Scan {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write records from {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{path}:{line}: {source}")]
    Parse {
        path: PathBuf,
        line: u64,
        #[source]
        source: ParseError,
    },

    #[error("{path}:{line}: {source}")]
    Record {
        path: PathBuf,
        line: u64,
        #[source]
        source: RecordError,
    },
}
