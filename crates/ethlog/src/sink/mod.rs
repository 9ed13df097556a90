//! Sink — output routing for rendered records.
//!
//! Records go to one file per source, to a single concatenated file, or to
//! standard output. Only the per-source route is safe to write in parallel.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::conf::{ConvertConfig, OutputTarget};

pub const OUTPUT_EXTENSION: &str = "csv";

pub type RecordWriter = BufWriter<Box<dyn Write + Send>>;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to open output file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `<dir>/<source>.csv`
    PerSource { dir: PathBuf },
    /// Every source, in order, into one file
    Concat { path: PathBuf },
    Stdout,
}

impl Route {
    pub fn from_config(config: &ConvertConfig) -> Self {
        match (config.output, config.concat) {
            (OutputTarget::Stdout, _) => Route::Stdout,
            (OutputTarget::File, true) => Route::Concat {
                path: config.output_dir.join(&config.concat_name),
            },
            (OutputTarget::File, false) => Route::PerSource {
                dir: config.output_dir.clone(),
            },
        }
    }

    pub fn is_parallel(&self) -> bool {
        matches!(self, Route::PerSource { .. })
    }

    /// Create the output directory if the route writes files.
    pub fn prepare(&self) -> Result<(), SinkError> {
        let dir = match self {
            Route::PerSource { dir } => dir.as_path(),
            Route::Concat { path } => match path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent,
                _ => return Ok(()),
            },
            Route::Stdout => return Ok(()),
        };

        fs::create_dir_all(dir).map_err(|source| SinkError::CreateDir {
            path: dir.to_path_buf(),
            source,
        })
    }

    /// Writer for one source. Only meaningful for `PerSource`; the shared
    /// routes hand out their single writer.
    pub fn open_source(&self, source_id: &str) -> Result<RecordWriter, SinkError> {
        match self {
            Route::PerSource { dir } => create(&output_path(dir, source_id)),
            _ => self.open_shared(),
        }
    }

    /// The single writer used by the sequential routes.
    pub fn open_shared(&self) -> Result<RecordWriter, SinkError> {
        match self {
            Route::Concat { path } => create(path),
            Route::Stdout => Ok(BufWriter::new(Box::new(io::stdout()))),
            Route::PerSource { dir } => Err(SinkError::Open {
                path: dir.clone(),
                source: io::Error::new(io::ErrorKind::InvalidInput, "per-source route has no shared writer"),
            }),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Route::PerSource { dir } => format!("{}/<source>.{}", dir.display(), OUTPUT_EXTENSION),
            Route::Concat { path } => path.display().to_string(),
            Route::Stdout => "<stdout>".to_string(),
        }
    }
}

pub fn output_path(dir: &Path, source_id: &str) -> PathBuf {
    dir.join(format!("{}.{}", source_id, OUTPUT_EXTENSION))
}

fn create(path: &Path) -> Result<RecordWriter, SinkError> {
    let file = File::create(path).map_err(|source| SinkError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufWriter::new(Box::new(file)))
}
