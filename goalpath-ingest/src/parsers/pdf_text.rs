//! Statements delivered as PDF.
//!
//! The extracted text is scanned line by line for rows shaped like
//!   2024-01-15   Groceries and Household   84.20
//! i.e. date, free-text category, amount. Everything else on the page
//! (headers, balances, footers) is skipped.

use std::fs;
use std::panic;
use std::path::Path;
use tracing::{debug, info};

use crate::coerce::{parse_amount, parse_date};
use crate::error::IngestError;
use crate::types::TransactionRecord;

pub fn read_path(path: &Path) -> Result<Vec<TransactionRecord>, IngestError> {
    info!(path = %path.display(), "extracting data from pdf");
    let bytes =
        fs::read(path).map_err(|e| IngestError::processing(format!("reading {}", path.display()), e))?;
    let text = extract_text(&bytes)?;
    Ok(parse_statement_text(&text))
}

/// Text of every page, in page order.
pub fn extract_text(bytes: &[u8]) -> Result<String, IngestError> {
    // pdf-extract panics on some malformed documents.
    match panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes)) {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => Err(IngestError::processing("extracting pdf text", e)),
        Err(_) => Err(IngestError::processing(
            "extracting pdf text",
            "pdf decoder panicked on malformed input",
        )),
    }
}

/// Pull `(date, category, amount)` rows out of free text.
///
/// A line is a candidate when it has at least three whitespace-separated
/// tokens and its first token contains exactly two `-`. The last token is the
/// amount and the tokens in between, joined by single spaces, are the
/// category. Lines that fail any check, or whose date or amount does not
/// coerce, are skipped.
pub fn parse_statement_text(text: &str) -> Vec<TransactionRecord> {
    let records: Vec<TransactionRecord> = text.split('\n').filter_map(parse_line).collect();
    debug!(records = records.len(), "pdf lines matched");
    records
}

fn parse_line(line: &str) -> Option<TransactionRecord> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let (first, rest) = tokens.split_first()?;
    let (last, middle) = rest.split_last()?;
    if middle.is_empty() || first.matches('-').count() != 2 {
        return None;
    }

    let amount = parse_amount(last)?;
    let date = parse_date(first)?;
    Some(TransactionRecord::new(date, amount, middle.join(" ")))
}
