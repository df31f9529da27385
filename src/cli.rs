use std::path::PathBuf;

use clap::builder::TypedValueParser;
use clap::Parser;

use crate::data::insights::{
    InsightOptions, DEFAULT_BINS, DEFAULT_TOP_N, MAX_BINS, MAX_TOP_N,
};
use crate::data::loader::LoadOptions;

/// Look up a company in a revenue/profit spreadsheet and chart it against
/// the top performers.
#[derive(Debug, Parser)]
#[command(name = "company-insights", version, about)]
pub struct Cli {
    /// Spreadsheet to load at start-up (.xlsx, .xls, .ods, .csv, .json, .parquet)
    #[arg(short, long, env = "INSIGHTS_FILE")]
    pub file: Option<PathBuf>,

    /// Worksheet name or 0-based index (defaults to the first sheet)
    #[arg(long, env = "INSIGHTS_SHEET")]
    pub sheet: Option<String>,

    /// Number of top companies shown in the revenue and profit charts (1-50)
    #[arg(
        long,
        env = "INSIGHTS_TOP",
        default_value_t = DEFAULT_TOP_N,
        value_parser = clap::value_parser!(u32).range(1..=MAX_TOP_N as i64).map(|v| v as usize)
    )]
    pub top: usize,

    /// Number of bins in the profit histogram (1-200)
    #[arg(
        long,
        env = "INSIGHTS_BINS",
        default_value_t = DEFAULT_BINS,
        value_parser = clap::value_parser!(u32).range(1..=MAX_BINS as i64).map(|v| v as usize)
    )]
    pub bins: usize,

    /// Company to look up immediately
    #[arg(short, long, env = "INSIGHTS_COMPANY")]
    pub company: Option<String>,

    /// Print a JSON report for --company and exit instead of opening a window
    #[arg(long, requires = "file", requires = "company")]
    pub json: bool,
}

/// Resolved runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub file: Option<PathBuf>,
    pub load: LoadOptions,
    pub insights: InsightOptions,
    pub company: Option<String>,
    pub json: bool,
}

impl Cli {
    pub fn config(self) -> Config {
        Config {
            file: self.file,
            load: LoadOptions { sheet: self.sheet },
            insights: InsightOptions {
                top_n: self.top,
                bins: self.bins,
            },
            company: self.company,
            json: self.json,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Cli::try_parse_from(["company-insights"]).unwrap().config();
        assert_eq!(config.insights, InsightOptions::default());
        assert_eq!(config.load, LoadOptions::default());
        assert!(!config.json);
    }

    #[test]
    fn all_flags() {
        let config = Cli::try_parse_from([
            "company-insights",
            "--file",
            "Data2.xlsx",
            "--sheet",
            "Q3",
            "--top",
            "3",
            "--bins",
            "10",
            "--company",
            "Acme",
            "--json",
        ])
        .unwrap()
        .config();

        assert_eq!(config.file, Some(PathBuf::from("Data2.xlsx")));
        assert_eq!(config.load.sheet.as_deref(), Some("Q3"));
        assert_eq!(config.insights, InsightOptions { top_n: 3, bins: 10 });
        assert_eq!(config.company.as_deref(), Some("Acme"));
        assert!(config.json);
    }

    #[test]
    fn zero_bins_rejected() {
        assert!(Cli::try_parse_from(["company-insights", "--bins", "0"]).is_err());
    }

    #[test]
    fn top_and_bins_match_the_ui_bounds() {
        for args in [["--top", "0"], ["--top", "51"], ["--bins", "201"]] {
            let parsed = Cli::try_parse_from(["company-insights", args[0], args[1]]);
            assert!(parsed.is_err(), "{args:?} accepted");
        }

        let config = Cli::try_parse_from(["company-insights", "--top", "50", "--bins", "200"])
            .unwrap()
            .config();
        assert_eq!(
            config.insights,
            InsightOptions {
                top_n: MAX_TOP_N,
                bins: MAX_BINS,
            }
        );
    }

    #[test]
    fn json_needs_file_and_company() {
        assert!(Cli::try_parse_from(["company-insights", "--json", "--company", "A"]).is_err());
    }

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
