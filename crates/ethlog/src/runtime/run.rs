//! Run — discover sources, convert them, report.

use std::sync::Arc;
use thiserror::Error;
use tokio::task::{JoinError, JoinSet};
use tracing::{error, info, warn};

use crate::conf::ConvertConfig;
use crate::parser::metrics::{MetricsSnapshot, ParsingMetrics};
use crate::parser::{LineParser, ParseError};
use crate::record::RecordFormatter;
use crate::sink::{Route, SinkError};
use crate::source::{discover, Converter, SourceError, SourceFile, SourceSummary};

#[derive(Debug, Error)]
pub enum RunError {
    #[error("failed to build line parser: {0}")]
    Engine(#[from] ParseError),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Sink(#[from] SinkError),

    #[error("conversion task failed: {0}")]
    Task(#[from] JoinError),
}

#[derive(Debug, Clone)]
pub struct RunSummary {
    /// In source order
    pub sources: Vec<SourceSummary>,
    pub metrics: MetricsSnapshot,
}

/// Convert every discovered source according to `config`.
///
/// Per-source output runs one blocking task per source; concatenated and
/// stdout output run the sources one after another. The first failing
/// source aborts the run.
pub async fn run(config: &ConvertConfig) -> Result<RunSummary, RunError> {
    let sources = discover(&config.input_dir, &config.input_extension, &config.source_suffix)?;
    if sources.is_empty() {
        warn!(
            "No *.{} files found in {}",
            config.input_extension,
            config.input_dir.display()
        );
    }

    let metrics = Arc::new(ParsingMetrics::new());
    let converter = Converter::new(
        Arc::new(LineParser::new()?),
        RecordFormatter::new(config.delimiter, config.event_type),
        Arc::clone(&metrics),
    );

    let route = Route::from_config(config);
    route.prepare()?;

    let summaries = if route.is_parallel() {
        run_parallel(converter, route, sources).await?
    } else {
        tokio::task::spawn_blocking(move || run_sequential(&converter, &route, &sources)).await??
    };

    let snapshot = metrics.snapshot();
    info!(
        sources = snapshot.sources,
        lines = snapshot.lines,
        records = snapshot.records,
        unknown = snapshot.unknown,
        "Conversion complete"
    );
    match serde_json::to_string(&snapshot) {
        Ok(json) => info!(metrics = %json, "Run metrics"),
        Err(e) => warn!("Failed to serialize run metrics: {}", e),
    }

    Ok(RunSummary {
        sources: summaries,
        metrics: snapshot,
    })
}

async fn run_parallel(
    converter: Converter,
    route: Route,
    sources: Vec<SourceFile>,
) -> Result<Vec<SourceSummary>, RunError> {
    let mut tasks = JoinSet::new();

    for (index, source) in sources.into_iter().enumerate() {
        let converter = converter.clone();
        let route = route.clone();
        tasks.spawn_blocking(move || -> Result<(usize, SourceSummary), RunError> {
            let mut writer = route.open_source(&source.source_id)?;
            let summary = converter.convert_file(&source, &mut writer)?;
            Ok((index, summary))
        });
    }

    let mut summaries = Vec::with_capacity(tasks.len());
    while let Some(joined) = tasks.join_next().await {
        match joined.map_err(RunError::from).and_then(|result| result) {
            Ok(done) => summaries.push(done),
            Err(e) => {
                error!("Aborting run: {}", e);
                tasks.abort_all();
                return Err(e);
            }
        }
    }

    summaries.sort_by_key(|(index, _)| *index);
    Ok(summaries.into_iter().map(|(_, summary)| summary).collect())
}

fn run_sequential(
    converter: &Converter,
    route: &Route,
    sources: &[SourceFile],
) -> Result<Vec<SourceSummary>, RunError> {
    let mut writer = route.open_shared()?;
    let mut summaries = Vec::with_capacity(sources.len());

    for source in sources {
        summaries.push(converter.convert_file(source, &mut writer)?);
    }
    Ok(summaries)
}
