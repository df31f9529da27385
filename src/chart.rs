use serde::Serialize;

use crate::data::insights::{Histogram, Insights, RankedSubset};
use crate::data::model::PROFIT_COLUMN;

// ---------------------------------------------------------------------------
// Chart descriptions: data + kind + labels, no drawing
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub label: String,
    pub value: f64,
    pub highlighted: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarChartSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub bars: Vec<Bar>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slice {
    pub label: String,
    pub value: f64,
    /// Percentage of the positive total, 0–100.
    pub share: f64,
    pub highlighted: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieChartSpec {
    pub title: String,
    pub slices: Vec<Slice>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartSpec {
    Bar(BarChartSpec),
    Pie(PieChartSpec),
    Histogram(HistogramSpec),
}

/// Anything that can draw chart descriptions.
pub trait ChartBackend {
    fn bar(&mut self, spec: &BarChartSpec);
    fn pie(&mut self, spec: &PieChartSpec);
    fn histogram(&mut self, spec: &HistogramSpec);
}

impl ChartSpec {
    pub fn title(&self) -> &str {
        match self {
            ChartSpec::Bar(s) => &s.title,
            ChartSpec::Pie(s) => &s.title,
            ChartSpec::Histogram(s) => &s.title,
        }
    }

    pub fn render(&self, backend: &mut dyn ChartBackend) {
        match self {
            ChartSpec::Bar(s) => backend.bar(s),
            ChartSpec::Pie(s) => backend.pie(s),
            ChartSpec::Histogram(s) => backend.histogram(s),
        }
    }
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

/// Bar chart of a ranking, one bar per company.
pub fn bar_chart(title: &str, subset: &RankedSubset) -> BarChartSpec {
    BarChartSpec {
        title: title.to_string(),
        x_label: "Company".to_string(),
        y_label: subset.metric.label().to_string(),
        bars: subset
            .entries
            .iter()
            .map(|e| Bar {
                label: e.company.clone(),
                value: e.value,
                highlighted: e.selected,
            })
            .collect(),
    }
}

/// Pie chart of each company's share of a ranking's total.
pub fn pie_chart(title: &str, subset: &RankedSubset) -> PieChartSpec {
    PieChartSpec {
        title: title.to_string(),
        slices: subset
            .entries
            .iter()
            .zip(subset.shares())
            .map(|(e, share)| Slice {
                label: e.company.clone(),
                value: e.value,
                share,
                highlighted: e.selected,
            })
            .collect(),
    }
}

pub fn histogram_chart(title: &str, histogram: &Histogram) -> HistogramSpec {
    HistogramSpec {
        title: title.to_string(),
        x_label: PROFIT_COLUMN.to_string(),
        y_label: "Frequency".to_string(),
        edges: histogram.edges.clone(),
        counts: histogram.counts.clone(),
    }
}

/// The three dashboard charts, in display order.
pub fn charts_for(insights: &Insights) -> Vec<ChartSpec> {
    vec![
        ChartSpec::Bar(bar_chart("Revenue Model", &insights.revenue)),
        ChartSpec::Pie(pie_chart("Order Share", &insights.profit)),
        ChartSpec::Histogram(histogram_chart("Profit Distribution", &insights.histogram)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::{record, table};
    use crate::data::insights::InsightOptions;
    use crate::data::lookup::find;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
    }

    impl ChartBackend for Recorder {
        fn bar(&mut self, spec: &BarChartSpec) {
            self.calls.push(format!("bar:{}:{}", spec.title, spec.bars.len()));
        }
        fn pie(&mut self, spec: &PieChartSpec) {
            self.calls.push(format!("pie:{}:{}", spec.title, spec.slices.len()));
        }
        fn histogram(&mut self, spec: &HistogramSpec) {
            self.calls.push(format!("hist:{}:{}", spec.title, spec.counts.len()));
        }
    }

    fn insights() -> Insights {
        let t = table(vec![
            record("A", 100.0, 10.0),
            record("B", 200.0, 30.0),
            record("C", 50.0, 0.0),
        ]);
        let options = InsightOptions { top_n: 1, bins: 4 };
        Insights::compute(&t, &find(&t, "A"), &options).unwrap()
    }

    #[test]
    fn three_charts_in_order() {
        let charts = charts_for(&insights());
        let titles: Vec<&str> = charts.iter().map(|c| c.title()).collect();
        assert_eq!(titles, vec!["Revenue Model", "Order Share", "Profit Distribution"]);
    }

    #[test]
    fn bars_carry_highlight() {
        let charts = charts_for(&insights());
        let ChartSpec::Bar(bar) = &charts[0] else {
            panic!("expected bar chart");
        };
        assert_eq!(bar.y_label, "Revenue");
        let labels: Vec<(&str, bool)> = bar
            .bars
            .iter()
            .map(|b| (b.label.as_str(), b.highlighted))
            .collect();
        assert_eq!(labels, vec![("B", false), ("A", true)]);
    }

    #[test]
    fn pie_shares_sum_to_hundred() {
        let charts = charts_for(&insights());
        let ChartSpec::Pie(pie) = &charts[1] else {
            panic!("expected pie chart");
        };
        let total: f64 = pie.slices.iter().map(|s| s.share).sum();
        assert!((total - 100.0).abs() < 1e-9);
        assert_eq!(pie.slices[0].share, 75.0);
    }

    #[test]
    fn render_dispatches_to_backend() {
        let mut recorder = Recorder::default();
        for chart in charts_for(&insights()) {
            chart.render(&mut recorder);
        }
        assert_eq!(
            recorder.calls,
            vec![
                "bar:Revenue Model:2",
                "pie:Order Share:2",
                "hist:Profit Distribution:4",
            ]
        );
    }

    #[test]
    fn specs_serialize_with_kind_tag() {
        let charts = charts_for(&insights());
        let json = serde_json::to_value(&charts[2]).unwrap();
        assert_eq!(json["kind"], "histogram");
        assert_eq!(json["y_label"], "Frequency");
    }
}
