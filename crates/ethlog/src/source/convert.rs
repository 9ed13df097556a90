use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Read, Write};
use std::path::PathBuf;
use std::sync::Arc;
use serde::Serialize;
use tracing::{debug, info};

use super::discover::SourceFile;
use super::SourceError;
use crate::parser::metrics::ParsingMetrics;
use crate::parser::{EventKind, LineParser, ParseError, MAX_LINE_SIZE};
use crate::record::RecordFormatter;

/// `\r\n` on top of the line itself
const READ_LIMIT: u64 = MAX_LINE_SIZE as u64 + 2;

/// What one source produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceSummary {
    pub source_id: String,
    pub path: PathBuf,
    pub lines: u64,
    pub records: u64,
    pub unknown: u64,
    pub per_kind: BTreeMap<EventKind, u64>,
}

impl SourceSummary {
    fn new(source: &SourceFile) -> Self {
        Self {
            source_id: source.source_id.clone(),
            path: source.path.clone(),
            lines: 0,
            records: 0,
            unknown: 0,
            per_kind: BTreeMap::new(),
        }
    }
}

/// Streams one source through the line parser and formatter.
///
/// Cheap to clone; every clone shares the parser and the run metrics.
#[derive(Clone)]
pub struct Converter {
    parser: Arc<LineParser>,
    formatter: RecordFormatter,
    metrics: Arc<ParsingMetrics>,
}

impl Converter {
    pub fn new(parser: Arc<LineParser>, formatter: RecordFormatter, metrics: Arc<ParsingMetrics>) -> Self {
        Self { parser, formatter, metrics }
    }

    /// Open `source` and convert it into `writer`.
    pub fn convert_file<W: Write>(&self, source: &SourceFile, writer: &mut W) -> Result<SourceSummary, SourceError> {
        info!("Processing: {}", source.path.display());

        let file = File::open(&source.path).map_err(|e| SourceError::Read {
            path: source.path.clone(),
            source: e,
        })?;

        let summary = self.convert(source, BufReader::new(file), writer)?;

        info!(
            source = %summary.source_id,
            lines = summary.lines,
            records = summary.records,
            unknown = summary.unknown,
            per_kind = ?summary.per_kind,
            "Finished source"
        );
        Ok(summary)
    }

    /// Convert lines from `reader` in order. The first hard failure stops
    /// the source; records already written stay written.
    pub fn convert<R: BufRead, W: Write>(
        &self,
        source: &SourceFile,
        mut reader: R,
        writer: &mut W,
    ) -> Result<SourceSummary, SourceError> {
        let mut summary = SourceSummary::new(source);
        let mut buf = Vec::with_capacity(512);

        loop {
            buf.clear();
            let read = (&mut reader)
                .take(READ_LIMIT)
                .read_until(b'\n', &mut buf)
                .map_err(|e| SourceError::Read {
                    path: source.path.clone(),
                    source: e,
                })?;
            if read == 0 {
                break;
            }
            summary.lines += 1;

            if let Err(err) = self.convert_line(strip_line_ending(&buf), source, &mut summary, writer) {
                self.metrics.record_failure();
                return Err(err);
            }
        }

        writer.flush().map_err(|e| SourceError::Write {
            path: source.path.clone(),
            source: e,
        })?;

        self.metrics.record_source();
        Ok(summary)
    }

    fn convert_line<W: Write>(
        &self,
        bytes: &[u8],
        source: &SourceFile,
        summary: &mut SourceSummary,
        writer: &mut W,
    ) -> Result<(), SourceError> {
        let line_no = summary.lines;
        let parse_err = |e: ParseError| SourceError::Parse {
            path: source.path.clone(),
            line: line_no,
            source: e,
        };

        if bytes.len() > MAX_LINE_SIZE {
            return Err(parse_err(ParseError::LineTooLarge(bytes.len(), MAX_LINE_SIZE)));
        }

        // Unrecognised lines may hold anything; only classified lines must be UTF-8.
        let text = String::from_utf8_lossy(bytes);
        let Some(parsed) = self.parser.parse(&text).map_err(parse_err)? else {
            debug!(line = line_no, "Dropping unrecognised line");
            summary.unknown += 1;
            self.metrics.record_line(EventKind::Unknown);
            return Ok(());
        };
        if matches!(text, Cow::Owned(_)) {
            return Err(parse_err(ParseError::NonUtf8));
        }

        let rendered = self
            .formatter
            .format_line(&parsed, &source.source_id)
            .map_err(|e| SourceError::Record {
                path: source.path.clone(),
                line: line_no,
                source: e,
            })?;

        writer.write_all(rendered.as_bytes()).map_err(|e| SourceError::Write {
            path: source.path.clone(),
            source: e,
        })?;

        let kind = parsed.kind();
        summary.records += 1;
        *summary.per_kind.entry(kind).or_insert(0) += 1;
        self.metrics.record_line(kind);
        Ok(())
    }
}

fn strip_line_ending(buf: &[u8]) -> &[u8] {
    let buf = buf.strip_suffix(b"\n").unwrap_or(buf);
    buf.strip_suffix(b"\r").unwrap_or(buf)
}
