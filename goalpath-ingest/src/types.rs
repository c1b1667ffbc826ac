use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::IngestError;

/// Statement formats accepted for ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileFormat {
    /// Comma-delimited table
    Csv,
    /// Spreadsheet workbook (first sheet)
    Xlsx,
    /// Unstructured statement text inside a PDF
    Pdf,
}

impl FileFormat {
    /// Case-insensitive match on a bare extension (no leading dot).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "csv" => Some(FileFormat::Csv),
            "xlsx" => Some(FileFormat::Xlsx),
            "pdf" => Some(FileFormat::Pdf),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, IngestError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        Self::from_extension(ext).ok_or_else(|| IngestError::UnsupportedFormat(ext.to_string()))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FileFormat::Csv => "csv",
            FileFormat::Xlsx => "xlsx",
            FileFormat::Pdf => "pdf",
        }
    }
}

/// One coerced statement line. Only lives between parsing and aggregation.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRecord {
    pub date: NaiveDate,
    pub amount: f64,
    /// Category label exactly as it appeared in the source
    pub category: String,
}

impl TransactionRecord {
    pub fn new(date: NaiveDate, amount: f64, category: impl Into<String>) -> Self {
        Self {
            date,
            amount,
            category: category.into(),
        }
    }

    /// "YYYY-MM" bucket for this record
    pub fn month_label(&self) -> String {
        self.date.format("%Y-%m").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(FileFormat::from_extension("csv"), Some(FileFormat::Csv));
        assert_eq!(FileFormat::from_extension("XLSX"), Some(FileFormat::Xlsx));
        assert_eq!(FileFormat::from_extension("Pdf"), Some(FileFormat::Pdf));
        assert_eq!(FileFormat::from_extension("xls"), None);
        assert_eq!(FileFormat::from_extension(""), None);
    }

    #[test]
    fn test_format_from_path_rejects_unknown() {
        assert_eq!(
            FileFormat::from_path(&PathBuf::from("uploads/statement.CSV")).unwrap(),
            FileFormat::Csv
        );
        let err = FileFormat::from_path(&PathBuf::from("notes.txt")).unwrap_err();
        assert!(matches!(err, IngestError::UnsupportedFormat(ref e) if e == "txt"));
        assert!(FileFormat::from_path(&PathBuf::from("statement")).is_err());
    }

    #[test]
    fn test_month_label() {
        let r = TransactionRecord::new(NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(), 12.5, "Food");
        assert_eq!(r.month_label(), "2024-03");
    }
}
