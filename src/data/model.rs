use std::fmt;

use anyhow::{bail, Context, Result};
use serde::Serialize;

/// Header of the company identifier column.
pub const COMPANY_COLUMN: &str = "Company";
/// Header of the revenue column.
pub const REVENUE_COLUMN: &str = "Revenue";
/// Header of the profit column.
pub const PROFIT_COLUMN: &str = "Profit";

// ---------------------------------------------------------------------------
// CellValue – a single spreadsheet cell
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value, as read from any of the supported formats.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => write!(f, ""),
        }
    }
}

impl CellValue {
    /// Interpret the cell as a number. Text is accepted when it parses cleanly.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            CellValue::Text(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }

    /// Guess the type of a raw text cell (CSV and similar untyped sources).
    pub fn guess(s: &str) -> Self {
        if s.is_empty() {
            return CellValue::Null;
        }
        if let Ok(i) = s.parse::<i64>() {
            return CellValue::Integer(i);
        }
        if let Ok(f) = s.parse::<f64>() {
            return CellValue::Float(f);
        }
        if s == "true" || s == "false" {
            return CellValue::Bool(s == "true");
        }
        CellValue::Text(s.to_string())
    }
}

// ---------------------------------------------------------------------------
// Record – one row of the spreadsheet
// ---------------------------------------------------------------------------

/// One company row. `cells` is the untouched source row, aligned with
/// [`Table::columns`].
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub company: String,
    pub revenue: f64,
    pub profit: f64,
    pub cells: Vec<CellValue>,
}

// ---------------------------------------------------------------------------
// RawSheet – format-independent loader output
// ---------------------------------------------------------------------------

/// Headers plus untyped rows, as produced by a format-specific reader.
#[derive(Debug, Clone, Default)]
pub struct RawSheet {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

// ---------------------------------------------------------------------------
// Table – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full dataset of a session. Read-only once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Column names in source order.
    pub columns: Vec<String>,
    /// Rows in source order.
    pub records: Vec<Record>,
}

impl Table {
    /// Validate a raw sheet and extract the company, revenue and profit columns.
    pub fn from_raw(raw: RawSheet) -> Result<Self> {
        let columns: Vec<String> = raw
            .headers
            .iter()
            .enumerate()
            .map(|(i, h)| {
                let h = h.trim();
                if h.is_empty() {
                    format!("column_{}", i + 1)
                } else {
                    h.to_string()
                }
            })
            .collect();

        let company_idx = required_column(&columns, COMPANY_COLUMN)?;
        let revenue_idx = required_column(&columns, REVENUE_COLUMN)?;
        let profit_idx = required_column(&columns, PROFIT_COLUMN)?;

        let mut records = Vec::with_capacity(raw.rows.len());
        for (i, mut cells) in raw.rows.into_iter().enumerate() {
            let row_no = i + 1;
            cells.resize(columns.len(), CellValue::Null);

            let company = match &cells[company_idx] {
                CellValue::Text(s) => s.clone(),
                CellValue::Null => String::new(),
                other => other.to_string(),
            };
            let revenue = numeric_cell(&cells[revenue_idx], row_no, REVENUE_COLUMN)?;
            let profit = numeric_cell(&cells[profit_idx], row_no, PROFIT_COLUMN)?;

            records.push(Record {
                company,
                revenue,
                profit,
                cells,
            });
        }

        Ok(Table { columns, records })
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn required_column(columns: &[String], name: &str) -> Result<usize> {
    match columns.iter().position(|c| c == name) {
        Some(idx) => Ok(idx),
        None => bail!(
            "missing required column '{name}' (found: {})",
            columns.join(", ")
        ),
    }
}

fn numeric_cell(cell: &CellValue, row: usize, column: &str) -> Result<f64> {
    cell.as_f64()
        .filter(|v| v.is_finite())
        .with_context(|| format!("Row {row}: '{column}' value '{cell}' is not a number"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    fn sheet(headers: &[&str], rows: Vec<Vec<CellValue>>) -> RawSheet {
        RawSheet {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows,
        }
    }

    #[test]
    fn extra_columns_are_carried_through() {
        let raw = sheet(
            &["Company", "Sector", "Revenue", "Profit"],
            vec![vec![
                text("Acme"),
                text("Tools"),
                CellValue::Integer(100),
                CellValue::Float(12.5),
            ]],
        );
        let table = Table::from_raw(raw).unwrap();

        assert_eq!(table.columns, vec!["Company", "Sector", "Revenue", "Profit"]);
        let rec = &table.records[0];
        assert_eq!(rec.company, "Acme");
        assert_eq!(rec.revenue, 100.0);
        assert_eq!(rec.profit, 12.5);
        assert_eq!(rec.cells[1], text("Tools"));
    }

    #[test]
    fn headers_are_trimmed_and_blank_headers_named() {
        let raw = sheet(
            &[" Company ", "", "Revenue", "Profit"],
            vec![vec![text("A"), CellValue::Null, text("1"), text("2")]],
        );
        let table = Table::from_raw(raw).unwrap();
        assert_eq!(table.columns[0], "Company");
        assert_eq!(table.columns[1], "column_2");
        assert_eq!(table.records[0].revenue, 1.0);
    }

    #[test]
    fn missing_column_is_reported() {
        let raw = sheet(&["Company", "Revenue"], vec![]);
        let err = Table::from_raw(raw).unwrap_err();
        assert!(format!("{err:#}").contains("missing required column 'Profit'"));
    }

    #[test]
    fn null_and_nan_numbers_name_the_row() {
        let blank = sheet(
            &["Company", "Revenue", "Profit"],
            vec![vec![text("A"), CellValue::Null, CellValue::Integer(1)]],
        );
        let msg = format!("{:#}", Table::from_raw(blank).unwrap_err());
        assert!(msg.contains("Row 1") && msg.contains("Revenue"), "{msg}");

        let nan = sheet(
            &["Company", "Revenue", "Profit"],
            vec![
                vec![text("A"), CellValue::Integer(1), CellValue::Float(2.0)],
                vec![text("B"), CellValue::Integer(1), CellValue::Float(f64::NAN)],
            ],
        );
        let msg = format!("{:#}", Table::from_raw(nan).unwrap_err());
        assert!(msg.contains("Row 2") && msg.contains("Profit"), "{msg}");
    }

    #[test]
    fn non_numeric_profit_names_the_row() {
        let raw = sheet(
            &["Company", "Revenue", "Profit"],
            vec![
                vec![text("A"), CellValue::Integer(1), CellValue::Integer(2)],
                vec![text("B"), CellValue::Integer(1), text("n/a")],
            ],
        );
        let err = Table::from_raw(raw).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("Row 2"), "{msg}");
        assert!(msg.contains("Profit"), "{msg}");
    }

    #[test]
    fn short_rows_are_padded_and_numeric_company_is_text() {
        let raw = sheet(
            &["Company", "Revenue", "Profit", "Notes"],
            vec![vec![
                CellValue::Integer(3),
                CellValue::Integer(1),
                CellValue::Integer(2),
            ]],
        );
        let table = Table::from_raw(raw).unwrap();
        assert_eq!(table.records[0].company, "3");
        assert_eq!(table.records[0].cells[3], CellValue::Null);
    }

    #[test]
    fn guess_cell_types() {
        assert_eq!(CellValue::guess(""), CellValue::Null);
        assert_eq!(CellValue::guess("42"), CellValue::Integer(42));
        assert_eq!(CellValue::guess("4.5"), CellValue::Float(4.5));
        assert_eq!(CellValue::guess("true"), CellValue::Bool(true));
        assert_eq!(CellValue::guess("Acme"), text("Acme"));
    }
}
