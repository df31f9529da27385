use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use arrow::array::{
    Array, ArrayRef, BooleanArray, Float32Array, Float64Array, Int32Array, Int64Array,
    LargeStringArray, StringArray,
};
use arrow::compute::cast;
use arrow::datatypes::DataType;
use calamine::{open_workbook_auto, Data, Reader};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;
use thiserror::Error;

use super::model::{
    CellValue, RawSheet, Table, COMPANY_COLUMN, PROFIT_COLUMN, REVENUE_COLUMN,
};

// ---------------------------------------------------------------------------
// Errors and options
// ---------------------------------------------------------------------------

/// Why a spreadsheet could not be turned into a [`Table`].
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("The file was not found at {}", .path.display())]
    NotFound { path: PathBuf },

    /// The file exists but could not be read or parsed.
    #[error("An error occurred: {cause}")]
    Load { path: PathBuf, cause: String },
}

/// Format-specific knobs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// Worksheet name or 0-based index (workbooks only). First sheet if `None`.
    pub sheet: Option<String>,
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a company table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.xlsx` / `.xlsm` / `.xlsb` / `.xls` / `.ods` – first row is the header
/// * `.csv`     – header row, cell types are guessed
/// * `.json`    – `[{ "Company": "...", "Revenue": 1.0, "Profit": 0.5, ... }, ...]`
/// * `.parquet` – flat string / numeric / boolean columns; the required
///   columns are also cast from dictionary and view encodings
pub fn load_file(path: &Path, options: &LoadOptions) -> std::result::Result<Table, LoadError> {
    if !path.exists() {
        return Err(LoadError::NotFound {
            path: path.to_path_buf(),
        });
    }

    read_sheet(path, options)
        .and_then(Table::from_raw)
        .map_err(|e| LoadError::Load {
            path: path.to_path_buf(),
            cause: format!("{e:#}"),
        })
}

fn read_sheet(path: &Path, options: &LoadOptions) -> Result<RawSheet> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => read_workbook(path, options.sheet.as_deref()),
        "csv" => read_csv(path),
        "json" => read_json(path),
        "parquet" | "pq" => read_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// Workbook loader (calamine)
// ---------------------------------------------------------------------------

fn read_workbook(path: &Path, sheet: Option<&str>) -> Result<RawSheet> {
    let mut workbook = open_workbook_auto(path).map_err(|e| anyhow!("opening workbook: {e}"))?;
    if workbook.sheet_names().is_empty() {
        bail!("Workbook has no worksheets");
    }

    let range = match sheet {
        Some(sel) => match sel.parse::<usize>() {
            Ok(idx) => workbook
                .worksheet_range_at(idx)
                .with_context(|| format!("no worksheet at index {idx}"))?
                .map_err(|e| anyhow!("reading worksheet {idx}: {e}"))?,
            Err(_) => workbook
                .worksheet_range(sel)
                .map_err(|e| anyhow!("reading worksheet '{sel}': {e}"))?,
        },
        None => workbook
            .worksheet_range_at(0)
            .context("no first worksheet")?
            .map_err(|e| anyhow!("reading worksheet: {e}"))?,
    };

    let mut rows = range.rows();
    let headers: Vec<String> = rows
        .next()
        .context("worksheet is empty")?
        .iter()
        .map(|c| c.to_string())
        .collect();

    let rows = rows
        .map(|row| row.iter().map(workbook_cell).collect())
        .collect();

    Ok(RawSheet { headers, rows })
}

fn workbook_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Int(i) => CellValue::Integer(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::Empty => CellValue::Null,
        other => CellValue::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn read_csv(path: &Path) -> Result<RawSheet> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {}", row_no + 1))?;
        rows.push(record.iter().map(CellValue::guess).collect());
    }

    Ok(RawSheet { headers, rows })
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON (`df.to_json(orient='records')`). Columns are
/// ordered by first appearance across the records.
fn read_json(path: &Path) -> Result<RawSheet> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;
    let records = root.as_array().context("Expected top-level JSON array")?;

    let mut headers: Vec<String> = Vec::new();
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {} is not a JSON object", i + 1))?;
        for key in obj.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }

    let rows = records
        .iter()
        .filter_map(|rec| rec.as_object())
        .map(|obj| {
            headers
                .iter()
                .map(|h| obj.get(h).map(json_cell).unwrap_or(CellValue::Null))
                .collect()
        })
        .collect();

    Ok(RawSheet { headers, rows })
}

fn json_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::String(s) => CellValue::Text(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                CellValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                CellValue::Float(f)
            } else {
                CellValue::Text(n.to_string())
            }
        }
        JsonValue::Bool(b) => CellValue::Bool(*b),
        JsonValue::Null => CellValue::Null,
        other => CellValue::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn read_parquet(path: &Path) -> Result<RawSheet> {
    let file = File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let headers: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let columns = batch
            .columns()
            .iter()
            .zip(&headers)
            .map(|(col, header)| normalise_column(col, header))
            .collect::<Result<Vec<_>>>()?;
        for row in 0..batch.num_rows() {
            let cells = columns
                .iter()
                .map(|col| arrow_cell(col, row))
                .collect::<Result<Vec<_>>>()
                .with_context(|| format!("Row {}", rows.len() + 1))?;
            rows.push(cells);
        }
    }

    Ok(RawSheet { headers, rows })
}

/// Cast a required column to `Utf8` / `Float64` when `arrow_cell` cannot read
/// its encoding (pandas categoricals, Polars string views, decimals, ...).
/// Other columns are left alone.
fn normalise_column(col: &ArrayRef, header: &str) -> Result<ArrayRef> {
    let target = match header.trim() {
        COMPANY_COLUMN => DataType::Utf8,
        REVENUE_COLUMN | PROFIT_COLUMN => DataType::Float64,
        _ => return Ok(col.clone()),
    };
    if is_flat(col.data_type()) {
        return Ok(col.clone());
    }
    cast(col, &target).with_context(|| {
        format!(
            "column '{}' of type {:?} cannot be read as {target:?}",
            header.trim(),
            col.data_type()
        )
    })
}

fn is_flat(data_type: &DataType) -> bool {
    matches!(
        data_type,
        DataType::Utf8
            | DataType::LargeUtf8
            | DataType::Int32
            | DataType::Int64
            | DataType::Float32
            | DataType::Float64
            | DataType::Boolean
    )
}

/// Extract a single cell from an Arrow column at a given row.
///
/// Types outside the flat set come back as their type name; only
/// pass-through columns reach this with such a type.
fn arrow_cell(col: &ArrayRef, row: usize) -> Result<CellValue> {
    if col.is_null(row) {
        return Ok(CellValue::Null);
    }
    let any = col.as_any();
    let value = match col.data_type() {
        DataType::Utf8 => any
            .downcast_ref::<StringArray>()
            .map(|a| CellValue::Text(a.value(row).to_string())),
        DataType::LargeUtf8 => any
            .downcast_ref::<LargeStringArray>()
            .map(|a| CellValue::Text(a.value(row).to_string())),
        DataType::Int32 => any
            .downcast_ref::<Int32Array>()
            .map(|a| CellValue::Integer(a.value(row) as i64)),
        DataType::Int64 => any
            .downcast_ref::<Int64Array>()
            .map(|a| CellValue::Integer(a.value(row))),
        DataType::Float32 => any
            .downcast_ref::<Float32Array>()
            .map(|a| CellValue::Float(a.value(row) as f64)),
        DataType::Float64 => any
            .downcast_ref::<Float64Array>()
            .map(|a| CellValue::Float(a.value(row))),
        DataType::Boolean => any
            .downcast_ref::<BooleanArray>()
            .map(|a| CellValue::Bool(a.value(row))),
        other => return Ok(CellValue::Text(format!("{other:?}"))),
    };
    value.ok_or_else(|| anyhow!("column type {:?} did not match its array", col.data_type()))
}
