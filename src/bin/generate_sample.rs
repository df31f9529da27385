//! Write a deterministic demo dataset as `.xlsx`, `.parquet` and `.csv`.
//!
//! Usage: `cargo run --bin generate_sample [OUTPUT_DIR]` (default `sample_data`).

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use rust_xlsxwriter::Workbook;

const COMPANIES: [(&str, &str, f64); 24] = [
    ("Acme Corp", "Industrial", 820.0),
    ("Globex", "Energy", 1450.0),
    ("Initech", "Software", 310.0),
    ("Umbrella", "Pharma", 2100.0),
    ("Hooli", "Software", 1750.0),
    ("Stark Industries", "Defense", 2600.0),
    ("Wayne Enterprises", "Conglomerate", 2350.0),
    ("Tyrell", "Biotech", 980.0),
    ("Cyberdyne", "Robotics", 640.0),
    ("Soylent", "Food", 430.0),
    ("Wonka", "Food", 520.0),
    ("Oscorp", "Biotech", 1120.0),
    ("Vandelay", "Import/Export", 150.0),
    ("Pied Piper", "Software", 95.0),
    ("Massive Dynamic", "Research", 1890.0),
    ("Aperture", "Research", 760.0),
    ("Black Mesa", "Research", 700.0),
    ("Gringotts", "Finance", 1300.0),
    ("Monarch", "Logistics", 480.0),
    ("Duff", "Beverage", 260.0),
    ("Nakatomi", "Trading", 1010.0),
    ("Virtucon", "Conglomerate", 870.0),
    ("Dunder Mifflin", "Paper", 120.0),
    ("Weyland-Yutani", "Aerospace", 2450.0),
];

const YEARS: [i64; 2] = [2022, 2023];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5)).rotate_left(7).wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform value in `[lo, hi)`.
    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }
}

/// One row per company per year. Companies repeat across years, which the
/// dashboard handles by showing every row and ranking the first.
struct Rows {
    company: Vec<String>,
    sector: Vec<String>,
    year: Vec<i64>,
    revenue: Vec<f64>,
    profit: Vec<f64>,
}

fn generate(rng: &mut SimpleRng) -> Rows {
    let mut rows = Rows {
        company: Vec::new(),
        sector: Vec::new(),
        year: Vec::new(),
        revenue: Vec::new(),
        profit: Vec::new(),
    };
    for &year in &YEARS {
        for &(name, sector, base_revenue) in &COMPANIES {
            let revenue = (base_revenue * rng.uniform(0.85, 1.2)).round();
            // Margins between -8% and +22%.
            let profit = (revenue * rng.uniform(-0.08, 0.22)).round();
            rows.company.push(name.to_string());
            rows.sector.push(sector.to_string());
            rows.year.push(year);
            rows.revenue.push(revenue);
            rows.profit.push(profit);
        }
    }
    rows
}

fn write_xlsx(rows: &Rows, path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Companies")?;
    for (col, header) in ["Company", "Sector", "Year", "Revenue", "Profit"]
        .iter()
        .enumerate()
    {
        sheet.write_string(0, col as u16, *header)?;
    }
    for i in 0..rows.company.len() {
        let r = (i + 1) as u32;
        sheet.write_string(r, 0, rows.company[i].as_str())?;
        sheet.write_string(r, 1, rows.sector[i].as_str())?;
        sheet.write_number(r, 2, rows.year[i] as f64)?;
        sheet.write_number(r, 3, rows.revenue[i])?;
        sheet.write_number(r, 4, rows.profit[i])?;
    }
    workbook.save(path).context("saving workbook")?;
    Ok(())
}

fn write_parquet(rows: &Rows, path: &Path) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("Company", DataType::Utf8, false),
        Field::new("Sector", DataType::Utf8, false),
        Field::new("Year", DataType::Int64, false),
        Field::new("Revenue", DataType::Float64, false),
        Field::new("Profit", DataType::Float64, false),
    ]));
    let columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from(rows.company.clone())),
        Arc::new(StringArray::from(rows.sector.clone())),
        Arc::new(Int64Array::from(rows.year.clone())),
        Arc::new(Float64Array::from(rows.revenue.clone())),
        Arc::new(Float64Array::from(rows.profit.clone())),
    ];
    let batch = RecordBatch::try_new(schema.clone(), columns).context("building record batch")?;

    let file = File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing writer")?;
    Ok(())
}

fn write_csv(rows: &Rows, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV")?;
    writer.write_record(["Company", "Sector", "Year", "Revenue", "Profit"])?;
    for i in 0..rows.company.len() {
        writer.write_record([
            rows.company[i].clone(),
            rows.sector[i].clone(),
            rows.year[i].to_string(),
            rows.revenue[i].to_string(),
            rows.profit[i].to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    let out_dir = PathBuf::from(
        std::env::args()
            .nth(1)
            .unwrap_or_else(|| "sample_data".to_string()),
    );
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    let mut rng = SimpleRng::new(42);
    let rows = generate(&mut rng);

    write_xlsx(&rows, &out_dir.join("companies.xlsx"))?;
    write_parquet(&rows, &out_dir.join("companies.parquet"))?;
    write_csv(&rows, &out_dir.join("companies.csv"))?;

    println!(
        "Wrote {} rows ({} companies x {} years) to {}",
        rows.company.len(),
        COMPANIES.len(),
        YEARS.len(),
        out_dir.display()
    );
    Ok(())
}
