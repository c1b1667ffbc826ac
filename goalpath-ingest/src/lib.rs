//! goalpath-ingest: statement ingestion (CSV, XLSX, PDF text) and aggregation
//! into an [`ExpenseSummary`].

pub mod aggregate;
pub mod coerce;
pub mod error;
pub mod parsers;
pub mod types;

use std::path::Path;
use tracing::{info, warn};

pub use aggregate::summarize;
pub use error::{FailureClass, IngestError};
pub use goalpath_core::ExpenseSummary;
pub use types::{FileFormat, TransactionRecord};

/// Ingest a statement, inferring its format from the file extension.
pub fn ingest_file(path: impl AsRef<Path>) -> Result<ExpenseSummary, IngestError> {
    let path = path.as_ref();
    let format = FileFormat::from_path(path)?;
    ingest_with_format(path, format)
}

/// Ingest a statement whose format is already known.
pub fn ingest_with_format(path: &Path, format: FileFormat) -> Result<ExpenseSummary, IngestError> {
    info!(file_type = format.as_str(), path = %path.display(), "processing file");

    let records = match format {
        FileFormat::Csv => parsers::delimited::read_path(path)?,
        FileFormat::Xlsx => parsers::spreadsheet::read_path(path)?,
        FileFormat::Pdf => parsers::pdf_text::read_path(path)?,
    };

    let Some(summary) = summarize(&records) else {
        warn!(file_type = format.as_str(), "no valid records after coercion");
        return Err(IngestError::EmptyData);
    };

    info!(
        records = records.len(),
        months = summary.months_present.len(),
        total = summary.total,
        "file processed"
    );
    Ok(summary)
}
