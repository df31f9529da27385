//! Small in-memory tables shared by the unit tests.

use super::model::{CellValue, Record, Table};

pub fn record(company: &str, revenue: f64, profit: f64) -> Record {
    Record {
        company: company.to_string(),
        revenue,
        profit,
        cells: vec![
            CellValue::Text(company.to_string()),
            CellValue::Float(revenue),
            CellValue::Float(profit),
        ],
    }
}

pub fn table(records: Vec<Record>) -> Table {
    Table {
        columns: vec!["Company".into(), "Revenue".into(), "Profit".into()],
        records,
    }
}

/// Ten companies with distinct revenue and profit, plus a repeated "Acme" row.
pub fn sample_table() -> Table {
    table(vec![
        record("Acme", 120.0, 15.0),
        record("Globex", 900.0, 80.0),
        record("Initech", 450.0, -20.0),
        record("Umbrella", 700.0, 95.0),
        record("Hooli", 820.0, 60.0),
        record("Stark", 990.0, 120.0),
        record("Wayne", 610.0, 70.0),
        record("Acme", 5000.0, 500.0),
        record("Tyrell", 300.0, 25.0),
        record("Cyberdyne", 80.0, 5.0),
        record("Soylent", 640.0, 40.0),
    ])
}
