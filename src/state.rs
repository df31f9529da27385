use std::path::{Path, PathBuf};

use crate::chart::{charts_for, ChartSpec};
use crate::data::insights::{InsightOptions, Insights};
use crate::data::loader::{load_file, LoadOptions};
use crate::data::lookup::{find, Selection};
use crate::data::model::Table;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full session state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Loaded table (None until a file loads successfully).
    pub table: Option<Table>,

    /// Where `table` came from.
    pub source: Option<PathBuf>,

    pub load_options: LoadOptions,
    pub insight_options: InsightOptions,

    /// Text currently typed into the company field.
    pub query: String,

    /// Result of the last submitted query.
    pub selection: Option<Selection>,

    /// Charts for the last query; empty unless the company was found.
    pub charts: Vec<ChartSpec>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Whether the status message is an error.
    pub status_is_error: bool,
}

impl AppState {
    pub fn new(load_options: LoadOptions, insight_options: InsightOptions) -> Self {
        Self {
            load_options,
            insight_options,
            ..Default::default()
        }
    }

    /// Load a spreadsheet, replacing any previous table. On failure the
    /// previous table is dropped too: results always match `source`.
    pub fn load(&mut self, path: &Path) {
        self.clear_results();
        match load_file(path, &self.load_options) {
            Ok(table) => {
                log::info!(
                    "Loaded {} rows with columns {:?} from {}",
                    table.len(),
                    table.columns,
                    path.display()
                );
                self.table = Some(table);
                self.source = Some(path.to_path_buf());
                self.set_status("Data Loaded Successfully!", false);
                if !self.query.trim().is_empty() {
                    self.submit_query();
                }
            }
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                self.table = None;
                self.source = None;
                self.set_status(e.to_string(), true);
            }
        }
    }

    /// Run lookup and, for a match, derive the charts.
    pub fn submit_query(&mut self) {
        self.clear_results();
        let Some(table) = &self.table else {
            return;
        };
        if self.query.trim().is_empty() {
            return;
        }

        let selection = find(table, &self.query);
        log::info!("Query '{}' matched {} row(s)", selection.query, selection.len());

        match Insights::compute(table, &selection, &self.insight_options) {
            Some(insights) => {
                self.charts = charts_for(&insights);
                self.set_status(format!("Data for company: {}", selection.query), false);
            }
            None => {
                log::warn!("No data found for company '{}'", selection.query);
                self.set_status(format!("No data found for company: {}", selection.query), false);
            }
        }
        self.selection = Some(selection);
    }

    fn clear_results(&mut self) {
        self.selection = None;
        self.charts.clear();
    }

    fn set_status(&mut self, msg: impl Into<String>, is_error: bool) {
        self.status_message = Some(msg.into());
        self.status_is_error = is_error;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::sample_table;
    use tempfile::TempDir;

    fn loaded() -> AppState {
        let mut state = AppState::default();
        state.table = Some(sample_table());
        state
    }

    #[test]
    fn found_company_produces_three_charts() {
        let mut state = loaded();
        state.query = "Hooli".into();
        state.submit_query();

        assert_eq!(state.selection.as_ref().unwrap().len(), 1);
        assert_eq!(state.charts.len(), 3);
        assert_eq!(state.status_message.as_deref(), Some("Data for company: Hooli"));
    }

    #[test]
    fn absent_company_draws_nothing() {
        let mut state = loaded();
        state.query = "Z".into();
        state.submit_query();

        assert!(state.selection.as_ref().unwrap().is_empty());
        assert!(state.charts.is_empty());
        assert_eq!(state.status_message.as_deref(), Some("No data found for company: Z"));
        assert!(!state.status_is_error);
    }

    #[test]
    fn blank_query_clears_results() {
        let mut state = loaded();
        state.query = "Hooli".into();
        state.submit_query();
        state.query = "   ".into();
        state.submit_query();
        assert!(state.selection.is_none());
        assert!(state.charts.is_empty());
    }

    #[test]
    fn missing_file_leaves_no_table() {
        let dir = TempDir::new().unwrap();
        let mut state = loaded();
        state.query = "Hooli".into();
        state.load(&dir.path().join("missing.xlsx"));

        assert!(state.table.is_none());
        assert!(state.charts.is_empty());
        assert!(state.status_is_error);
        assert!(state
            .status_message
            .as_deref()
            .unwrap()
            .starts_with("The file was not found at"));

        // Lookup is never reached without a table.
        state.submit_query();
        assert!(state.selection.is_none());
    }

    #[test]
    fn load_then_prefilled_query_runs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.csv");
        std::fs::write(&path, "Company,Revenue,Profit\nA,100,10\nB,200,5\n").unwrap();

        let mut state = AppState::new(LoadOptions::default(), InsightOptions::default());
        state.query = "A".into();
        state.load(&path);

        assert_eq!(state.source.as_deref(), Some(path.as_path()));
        assert_eq!(state.charts.len(), 3);
    }
}
