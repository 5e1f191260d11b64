//! Collection export: CSV and JSON encoding plus download delivery.
//!
//! The encoding logic is pure; the single host side effect, handing the
//! encoded bytes over as a named download, sits behind [`DownloadSink`] so
//! the engine is testable without touching the file system.

use chrono::Utc;
use clinident_model::Exportable;
use clinident_types::ExportRecord;
use serde::Serialize;
use std::path::PathBuf;

/// Errors raised by the export engine.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// Exporting nothing is a caller error the user must see, never a
    /// silent no-op. Message text is what the UI layer displays verbatim.
    #[error("no hay datos para exportar")]
    EmptyDataset,
    #[error("formato de exportación no soportado: {0}")]
    UnsupportedFormat(String),
    #[error("failed to encode CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to flush CSV writer: {0}")]
    CsvFlush(std::io::Error),
    #[error("failed to serialize JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to deliver download '{filename}': {source}")]
    Delivery {
        filename: String,
        source: std::io::Error,
    },
}

pub type ExportResult<T> = std::result::Result<T, ExportError>;

/// Output format of an export.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
    /// Accepted for compatibility; degrades to CSV (see [`Exporter`]).
    Xlsx,
}

impl ExportFormat {
    /// Parse a user-supplied format name, case-insensitively. Anything
    /// unrecognised is an error rather than a silent default.
    pub fn parse(value: &str) -> ExportResult<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            "xlsx" | "excel" => Ok(ExportFormat::Xlsx),
            other => Err(ExportError::UnsupportedFormat(other.to_owned())),
        }
    }

    /// Filename extension of the bytes actually produced.
    pub fn effective_extension(self) -> &'static str {
        match self {
            ExportFormat::Csv | ExportFormat::Xlsx => "csv",
            ExportFormat::Json => "json",
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> ExportResult<Self> {
        ExportFormat::parse(s)
    }
}

/// Delivery seam: hand encoded bytes over as a named download.
pub trait DownloadSink {
    fn deliver(&mut self, filename: &str, mime: &str, bytes: &[u8]) -> std::io::Result<()>;
}

/// Production sink: writes downloads into a target directory.
#[derive(Clone, Debug)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl DownloadSink for DirectorySink {
    fn deliver(&mut self, filename: &str, _mime: &str, bytes: &[u8]) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.dir.join(filename), bytes)
    }
}

/// In-memory sink capturing downloads, for tests and dry runs.
#[derive(Clone, Debug, Default)]
pub struct MemorySink {
    pub downloads: Vec<(String, String, Vec<u8>)>,
}

impl DownloadSink for MemorySink {
    fn deliver(&mut self, filename: &str, mime: &str, bytes: &[u8]) -> std::io::Result<()> {
        self.downloads
            .push((filename.to_owned(), mime.to_owned(), bytes.to_vec()));
        Ok(())
    }
}

/// The export engine: encodes a collection and delivers it via the sink.
#[derive(Debug)]
pub struct Exporter<S: DownloadSink> {
    sink: S,
}

impl<S: DownloadSink> Exporter<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    /// Consume the exporter, returning the sink (used by tests to inspect
    /// captured downloads).
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Encode `rows` as CSV and deliver under `filename`.
    ///
    /// The header row is `headers` when given, else the key order of the
    /// first record. Fields a row lacks become empty strings. Quoting is
    /// minimal: only fields containing a comma or a quote are wrapped, with
    /// embedded quotes doubled.
    pub fn export_to_csv(
        &mut self,
        rows: &[ExportRecord],
        filename: &str,
        headers: Option<&[&str]>,
    ) -> ExportResult<()> {
        if rows.is_empty() {
            return Err(ExportError::EmptyDataset);
        }
        let bytes = encode_csv(rows, headers)?;
        self.deliver(filename, "text/csv", &bytes)
    }

    /// Serialize `data` as pretty-printed JSON (2-space indent) and deliver
    /// under `filename`. No projection is applied.
    pub fn export_to_json<T: Serialize>(&mut self, data: &[T], filename: &str) -> ExportResult<()> {
        if data.is_empty() {
            return Err(ExportError::EmptyDataset);
        }
        let bytes = serde_json::to_vec_pretty(data)?;
        self.deliver(filename, "application/json", &bytes)
    }

    /// Export a collection through its entity projection.
    ///
    /// The filename is derived as
    /// `{entity}_{ISO-8601 timestamp with ':' replaced by '-'}.{ext}` and
    /// returned. An `Xlsx` request degrades to CSV bytes under the `.csv`
    /// extension, with a warning in the log.
    pub fn export_entity<T: Exportable>(
        &mut self,
        items: &[T],
        format: ExportFormat,
    ) -> ExportResult<String> {
        if items.is_empty() {
            return Err(ExportError::EmptyDataset);
        }

        if format == ExportFormat::Xlsx {
            tracing::warn!(
                entity = T::entity_name(),
                "xlsx export not supported; falling back to CSV"
            );
        }

        let filename = format!(
            "{}_{}.{}",
            T::entity_name(),
            timestamp(),
            format.effective_extension()
        );
        let rows: Vec<ExportRecord> = items.iter().map(Exportable::export_row).collect();

        match format {
            ExportFormat::Csv | ExportFormat::Xlsx => {
                self.export_to_csv(&rows, &filename, Some(T::export_headers()))?
            }
            ExportFormat::Json => {
                let objects: Vec<serde_json::Map<String, serde_json::Value>> = rows
                    .iter()
                    .map(|row| {
                        row.iter()
                            .map(|(label, value)| (label.clone(), value.clone().into()))
                            .collect()
                    })
                    .collect();
                self.export_to_json(&objects, &filename)?
            }
        }

        Ok(filename)
    }

    fn deliver(&mut self, filename: &str, mime: &str, bytes: &[u8]) -> ExportResult<()> {
        tracing::debug!(filename, mime, size = bytes.len(), "delivering export");
        self.sink
            .deliver(filename, mime, bytes)
            .map_err(|source| ExportError::Delivery {
                filename: filename.to_owned(),
                source,
            })
    }
}

/// Timestamp used in export filenames: ISO-8601 seconds precision with `:`
/// replaced by `-` so the name is valid on every file system.
fn timestamp() -> String {
    Utc::now().format("%Y-%m-%dT%H-%M-%S").to_string()
}

fn encode_csv(rows: &[ExportRecord], headers: Option<&[&str]>) -> ExportResult<Vec<u8>> {
    let headers: Vec<String> = match headers {
        Some(h) if !h.is_empty() => h.iter().map(|s| (*s).to_owned()).collect(),
        _ => rows[0].iter().map(|(label, _)| label.clone()).collect(),
    };

    let mut writer = csv::WriterBuilder::new().from_writer(Vec::new());
    writer.write_record(&headers)?;
    for row in rows {
        let record: Vec<&str> = headers
            .iter()
            .map(|header| {
                row.iter()
                    .find(|(label, _)| label == header)
                    .map(|(_, value)| value.as_str())
                    .unwrap_or("")
            })
            .collect();
        writer.write_record(&record)?;
    }

    writer
        .into_inner()
        .map_err(|e| ExportError::CsvFlush(e.into_error()))
}
