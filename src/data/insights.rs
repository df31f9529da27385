use std::collections::HashSet;

use serde::Serialize;

use super::lookup::Selection;
use super::model::{Record, Table, PROFIT_COLUMN, REVENUE_COLUMN};

/// Companies shown per ranking unless configured otherwise.
pub const DEFAULT_TOP_N: usize = 5;
/// Histogram bins unless configured otherwise.
pub const DEFAULT_BINS: usize = 20;
/// Upper bound for `top_n` accepted from the command line and the UI.
pub const MAX_TOP_N: usize = 50;
/// Upper bound for `bins` accepted from the command line and the UI.
pub const MAX_BINS: usize = 200;

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsightOptions {
    pub top_n: usize,
    pub bins: usize,
}

impl Default for InsightOptions {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            bins: DEFAULT_BINS,
        }
    }
}

// ---------------------------------------------------------------------------
// Ranking
// ---------------------------------------------------------------------------

/// Numeric column a ranking is keyed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Metric {
    Revenue,
    Profit,
}

impl Metric {
    pub fn value(self, record: &Record) -> f64 {
        match self {
            Metric::Revenue => record.revenue,
            Metric::Profit => record.profit,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Metric::Revenue => REVENUE_COLUMN,
            Metric::Profit => PROFIT_COLUMN,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedEntry {
    /// Index of the source row in `Table::records`.
    pub row: usize,
    pub company: String,
    pub value: f64,
    /// Whether this is the company the user asked about.
    pub selected: bool,
}

/// Top companies by one metric, with the queried company always included.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedSubset {
    pub metric: Metric,
    pub entries: Vec<RankedEntry>,
}

impl RankedSubset {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Percentage of the positive total held by each entry. Negative values
    /// count as zero; an all-non-positive subset yields all zeros.
    pub fn shares(&self) -> Vec<f64> {
        let total: f64 = self.entries.iter().map(|e| e.value.max(0.0)).sum();
        self.entries
            .iter()
            .map(|e| {
                if total > 0.0 {
                    e.value.max(0.0) / total * 100.0
                } else {
                    0.0
                }
            })
            .collect()
    }
}

/// Rank companies by `metric` and union the result with `selection`.
///
/// Rows are first deduplicated by company (first occurrence wins), then
/// stably sorted descending so ties keep row order. After the first `n`, the
/// selected company is appended if it did not make the cut.
pub fn top_by(table: &Table, selection: &Selection, metric: Metric, n: usize) -> RankedSubset {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut rows: Vec<usize> = table
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| seen.insert(rec.company.as_str()))
        .map(|(i, _)| i)
        .collect();

    // `sort_by` is stable: equal values keep their original order.
    rows.sort_by(|&a, &b| {
        metric
            .value(&table.records[b])
            .total_cmp(&metric.value(&table.records[a]))
    });
    rows.truncate(n);

    if let Some(selected) = selection.first(table) {
        let present = rows
            .iter()
            .any(|&i| table.records[i].company == selected.company);
        if !present {
            rows.extend(selection.indices.first().copied());
        }
    }

    let entries = rows
        .into_iter()
        .map(|i| {
            let rec = &table.records[i];
            RankedEntry {
                row: i,
                company: rec.company.clone(),
                value: metric.value(rec),
                selected: !selection.is_empty() && rec.company == selection.query,
            }
        })
        .collect();

    RankedSubset { metric, entries }
}

pub fn top_by_revenue(table: &Table, selection: &Selection, n: usize) -> RankedSubset {
    top_by(table, selection, Metric::Revenue, n)
}

pub fn top_by_profit(table: &Table, selection: &Selection, n: usize) -> RankedSubset {
    top_by(table, selection, Metric::Profit, n)
}

// ---------------------------------------------------------------------------
// Histogram
// ---------------------------------------------------------------------------

/// Equal-width histogram. `edges.len() == counts.len() + 1` unless empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Histogram {
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Total number of values counted.
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// `(lower, upper, count)` per bin.
    pub fn bins(&self) -> impl Iterator<Item = (f64, f64, usize)> + '_ {
        self.edges
            .windows(2)
            .zip(&self.counts)
            .map(|(w, &c)| (w[0], w[1], c))
    }
}

/// Bin `values` into `bins` equal-width intervals over `[min, max]`.
///
/// The last interval is closed on the right. If every value is equal the
/// result collapses to a single bin holding all of them. Every value is
/// counted in the bin whose emitted edges contain it.
pub fn histogram(values: &[f64], bins: usize) -> Histogram {
    if values.is_empty() {
        return Histogram::default();
    }
    let bins = bins.max(1);
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if max <= min {
        return Histogram {
            edges: vec![min, max],
            counts: vec![values.len()],
        };
    }

    // Divide before subtracting so `max - min` cannot overflow to infinity.
    let n = bins as f64;
    let width = max / n - min / n;
    let mut edges: Vec<f64> = (0..=bins)
        .map(|i| {
            let t = i as f64 / n;
            min * (1.0 - t) + max * t
        })
        .collect();
    edges[0] = min;
    edges[bins] = max;

    let mut counts = vec![0usize; bins];
    for &v in values {
        let guess = (v / width - min / width).floor();
        let mut idx = if guess > 0.0 {
            (guess as usize).min(bins - 1)
        } else {
            0
        };
        // Rounding in `guess` can land a bin off the emitted edges.
        while idx > 0 && v < edges[idx] {
            idx -= 1;
        }
        while idx + 1 < bins && v >= edges[idx + 1] {
            idx += 1;
        }
        counts[idx] += 1;
    }

    Histogram { edges, counts }
}

/// Histogram of every row's profit (duplicates included).
pub fn profit_histogram(table: &Table, bins: usize) -> Histogram {
    let profits: Vec<f64> = table.records.iter().map(|r| r.profit).collect();
    histogram(&profits, bins)
}

// ---------------------------------------------------------------------------
// Insights – everything the three charts need
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Insights {
    pub selection: Selection,
    pub revenue: RankedSubset,
    pub profit: RankedSubset,
    pub histogram: Histogram,
}

impl Insights {
    /// Derive all chart inputs. `None` when the selection is empty: charts
    /// are only drawn for a company that exists.
    pub fn compute(table: &Table, selection: &Selection, options: &InsightOptions) -> Option<Self> {
        if selection.is_empty() {
            return None;
        }
        let revenue = top_by_revenue(table, selection, options.top_n);
        let profit = top_by_profit(table, selection, options.top_n);
        let histogram = profit_histogram(table, options.bins);

        log::debug!(
            "insights for '{}': {} revenue entries, {} profit entries, {} bins",
            selection.query,
            revenue.len(),
            profit.len(),
            histogram.counts.len()
        );

        Some(Self {
            selection: selection.clone(),
            revenue,
            profit,
            histogram,
        })
    }
}
