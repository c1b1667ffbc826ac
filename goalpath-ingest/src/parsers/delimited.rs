//! Comma-delimited statements with `Date`, `Expense`, `Type of Expense`
//! columns.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

use super::ColumnIndex;
use crate::coerce::{parse_amount, parse_date};
use crate::error::IngestError;
use crate::types::TransactionRecord;

pub fn read_path(path: &Path) -> Result<Vec<TransactionRecord>, IngestError> {
    let file = File::open(path)
        .map_err(|e| IngestError::processing(format!("opening {}", path.display()), e))?;
    read_records(file)
}

/// Read and coerce every data row. Rows whose date or amount does not coerce
/// are dropped.
pub fn read_records<R: Read>(reader: R) -> Result<Vec<TransactionRecord>, IngestError> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .from_reader(reader);

    let headers = rdr
        .headers()
        .map_err(|e| IngestError::processing("reading csv header", e))?
        .clone();
    let cols = ColumnIndex::locate(headers.iter())?;

    let mut out = Vec::new();
    let mut dropped = 0usize;

    for result in rdr.records() {
        let row = result.map_err(|e| IngestError::processing("reading csv row", e))?;

        let date = row.get(cols.date).and_then(parse_date);
        let amount = row.get(cols.amount).and_then(parse_amount);
        match (date, amount) {
            (Some(date), Some(amount)) => {
                let category = row.get(cols.category).unwrap_or_default();
                out.push(TransactionRecord::new(date, amount, category));
            }
            _ => dropped += 1,
        }
    }

    debug!(kept = out.len(), dropped, "csv rows coerced");
    Ok(out)
}
