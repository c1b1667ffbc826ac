use goalpath_ingest::{ingest_file, FailureClass, IngestError};
use std::io::Write;
use std::path::PathBuf;
use tempfile::{NamedTempFile, TempDir};

fn write_fixture(suffix: &str, contents: &[u8]) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(contents).unwrap();
    file.flush().unwrap();
    file
}

/// Two rows across two months: the canonical small statement.
#[test]
fn test_csv_two_month_statement() {
    let file = write_fixture(
        ".csv",
        b"Date,Expense,Type of Expense\n2024-01-15,1000,Food\n2024-02-10,500,Rent\n",
    );
    let summary = ingest_file(file.path()).unwrap();

    assert_eq!(summary.total, 1500.0);
    assert_eq!(summary.monthly_totals.len(), 2);
    assert_eq!(summary.monthly_totals["2024-01"], 1000.0);
    assert_eq!(summary.monthly_totals["2024-02"], 500.0);
    assert_eq!(summary.category_totals["Food"], 1000.0);
    assert_eq!(summary.category_totals["Rent"], 500.0);
    assert_eq!(summary.year_range, vec![2024]);
    assert_eq!(summary.months_present, vec!["2024-01", "2024-02"]);
    assert_eq!(summary.categories, vec!["Food", "Rent"]);

    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["time_series"]["2024-01"], 1000.0);
    assert_eq!(json["type_summary"]["Rent"], 500.0);
    assert_eq!(json["expense_types"], serde_json::json!(["Food", "Rent"]));
}

#[test]
fn test_totals_balance_and_reingest_is_identical() {
    let file = write_fixture(
        ".csv",
        b"Date,Expense,Type of Expense\n\
2023-11-03,19.99,Streaming\n\
2024-01-15,0.1,Coffee\n\
2024-01-16,0.2,Coffee\n\
2024-03-01,1200,Rent\n\
2025-02-14,75.25,Gifts\n\
bad-row,5,Food\n",
    );

    let first = ingest_file(file.path()).unwrap();
    let second = ingest_file(file.path()).unwrap();
    assert_eq!(first, second);

    assert!(first.is_balanced(1e-6));
    assert_eq!(first.year_range, vec![2023, 2024, 2025]);
    assert_eq!(first.months_present, vec!["2023-11", "2024-01", "2024-03", "2025-02"]);
}

#[test]
fn test_csv_missing_category_column_is_schema_error() {
    let file = write_fixture(".csv", b"Date,Expense\n2024-01-15,1000\n");
    let err = ingest_file(file.path()).unwrap_err();

    assert!(matches!(err, IngestError::Schema(_)));
    assert_eq!(err.class(), FailureClass::InvalidInput);
}

#[test]
fn test_csv_with_no_valid_rows_is_empty_data() {
    let file = write_fixture(".csv", b"Date,Expense,Type of Expense\n01/15/2024,10,Food\n2024-01-16,ten,Food\n");
    let err = ingest_file(file.path()).unwrap_err();

    assert!(matches!(err, IngestError::EmptyData));
    assert_eq!(err.class(), FailureClass::InvalidInput);
}

#[test]
fn test_unsupported_extension_rejected_before_reading() {
    // The file does not exist; rejection must happen on the extension alone.
    let err = ingest_file(PathBuf::from("/nonexistent/statement.docx")).unwrap_err();
    assert!(matches!(err, IngestError::UnsupportedFormat(_)));
}

#[test]
fn test_missing_file_is_internal_failure() {
    let dir = TempDir::new().unwrap();
    let err = ingest_file(dir.path().join("gone.csv")).unwrap_err();

    assert!(matches!(err, IngestError::Processing { .. }));
    assert_eq!(err.class(), FailureClass::Internal);
}

#[test]
fn test_undecodable_pdf_is_internal_failure() {
    let file = write_fixture(".pdf", b"%PDF-1.4 truncated");
    let err = ingest_file(file.path()).unwrap_err();
    assert_eq!(err.class(), FailureClass::Internal);
}

#[test]
fn test_pdf_text_without_statement_rows_is_no_data() {
    let text = "Monthly statement\nAccount 1234\nNo transactions this period\n";
    let records = goalpath_ingest::parsers::pdf_text::parse_statement_text(text);
    assert!(goalpath_ingest::summarize(&records).is_none());
}
