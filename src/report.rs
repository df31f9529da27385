use serde::Serialize;
use serde_json::{Map, Value as JsonValue};

use crate::chart::{charts_for, ChartSpec};
use crate::data::insights::{InsightOptions, Insights};
use crate::data::lookup::find;
use crate::data::model::{CellValue, Record, Table};

/// Everything the dashboard would show for one company, as JSON.
#[derive(Debug, Clone, Serialize)]
pub struct InsightReport {
    pub company: String,
    pub found: bool,
    /// Matching rows, one object per row keyed by column name.
    pub rows: Vec<Map<String, JsonValue>>,
    pub charts: Vec<ChartSpec>,
}

pub fn build_report(table: &Table, company: &str, options: &InsightOptions) -> InsightReport {
    let selection = find(table, company);
    let rows = selection
        .records(table)
        .map(|rec| row_object(table, rec))
        .collect();
    let charts = Insights::compute(table, &selection, options)
        .map(|insights| charts_for(&insights))
        .unwrap_or_default();

    InsightReport {
        found: !selection.is_empty(),
        company: selection.query,
        rows,
        charts,
    }
}

fn row_object(table: &Table, record: &Record) -> Map<String, JsonValue> {
    table
        .columns
        .iter()
        .zip(&record.cells)
        .map(|(col, cell)| (col.clone(), cell_json(cell)))
        .collect()
}

fn cell_json(cell: &CellValue) -> JsonValue {
    match cell {
        CellValue::Text(s) => JsonValue::from(s.as_str()),
        CellValue::Integer(i) => JsonValue::from(*i),
        // Non-finite floats have no JSON form and become null.
        CellValue::Float(v) => JsonValue::from(*v),
        CellValue::Bool(b) => JsonValue::from(*b),
        CellValue::Null => JsonValue::Null,
    }
}
