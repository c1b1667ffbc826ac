//! XLSX workbooks. Only the first worksheet is read and its first row is the
//! header.

use calamine::{open_workbook, Data, DataType, Reader, Xlsx};
use chrono::NaiveDate;
use std::path::Path;
use tracing::debug;

use super::{ColumnIndex, AMOUNT_COLUMN, CATEGORY_COLUMN, DATE_COLUMN};
use crate::coerce::{parse_amount, parse_date};
use crate::error::IngestError;
use crate::types::TransactionRecord;

pub fn read_path(path: &Path) -> Result<Vec<TransactionRecord>, IngestError> {
    let mut workbook: Xlsx<_> = open_workbook(path)
        .map_err(|e| IngestError::processing(format!("opening workbook {}", path.display()), e))?;

    let Some(range) = workbook.worksheet_range_at(0) else {
        return Err(no_header());
    };
    let range = range.map_err(|e| IngestError::processing("reading first worksheet", e))?;

    read_rows(range.rows())
}

/// Coerce worksheet rows; the first row must be the header.
pub fn read_rows<'a>(rows: impl IntoIterator<Item = &'a [Data]>) -> Result<Vec<TransactionRecord>, IngestError> {
    let mut rows = rows.into_iter();
    let header: Vec<String> = rows
        .next()
        .ok_or_else(no_header)?
        .iter()
        .map(|c| c.to_string())
        .collect();
    let cols = ColumnIndex::locate(header.iter().map(String::as_str))?;

    let mut out = Vec::new();
    let mut dropped = 0usize;

    for row in rows {
        let date = row.get(cols.date).and_then(cell_date);
        let amount = row.get(cols.amount).and_then(cell_amount);
        match (date, amount) {
            (Some(date), Some(amount)) => {
                let category = row.get(cols.category).map(|c| c.to_string()).unwrap_or_default();
                out.push(TransactionRecord::new(date, amount, category));
            }
            _ => dropped += 1,
        }
    }

    debug!(kept = out.len(), dropped, "worksheet rows coerced");
    Ok(out)
}

fn no_header() -> IngestError {
    IngestError::Schema(
        [DATE_COLUMN, AMOUNT_COLUMN, CATEGORY_COLUMN]
            .map(String::from)
            .to_vec(),
    )
}

/// Text dates use `YYYY-MM-DD`; native spreadsheet dates are converted directly.
fn cell_date(cell: &Data) -> Option<NaiveDate> {
    match cell {
        Data::String(s) => parse_date(s),
        Data::DateTime(_) | Data::DateTimeIso(_) => cell.as_date(),
        _ => None,
    }
}

fn cell_amount(cell: &Data) -> Option<f64> {
    match cell {
        Data::Float(f) if !f.is_nan() => Some(*f),
        Data::Int(i) => Some(*i as f64),
        Data::String(s) => parse_amount(s),
        _ => None,
    }
}
