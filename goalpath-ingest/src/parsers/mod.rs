//! Format-specific record acquisition.

pub mod delimited;
pub mod pdf_text;
pub mod spreadsheet;

use crate::error::IngestError;

pub const DATE_COLUMN: &str = "Date";
pub const AMOUNT_COLUMN: &str = "Expense";
pub const CATEGORY_COLUMN: &str = "Type of Expense";

/// Positions of the three required columns within a header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnIndex {
    pub date: usize,
    pub amount: usize,
    pub category: usize,
}

impl ColumnIndex {
    /// Locate the required columns by exact, case-sensitive name.
    /// Extra columns are ignored.
    pub fn locate<'a>(headers: impl IntoIterator<Item = &'a str>) -> Result<Self, IngestError> {
        let headers: Vec<&str> = headers.into_iter().collect();
        let find = |name: &str| headers.iter().position(|h| *h == name);

        match (find(DATE_COLUMN), find(AMOUNT_COLUMN), find(CATEGORY_COLUMN)) {
            (Some(date), Some(amount), Some(category)) => Ok(Self {
                date,
                amount,
                category,
            }),
            (date, amount, category) => {
                let missing = [
                    (date, DATE_COLUMN),
                    (amount, AMOUNT_COLUMN),
                    (category, CATEGORY_COLUMN),
                ]
                .into_iter()
                .filter(|(idx, _)| idx.is_none())
                .map(|(_, name)| name.to_string())
                .collect();
                Err(IngestError::Schema(missing))
            }
        }
    }
}
