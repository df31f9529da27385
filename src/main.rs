mod app;
mod chart;
mod cli;
mod color;
mod data;
mod report;
mod state;
mod ui;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use eframe::egui;

use app::CompanyInsightsApp;
use cli::{Cli, Config};
use data::loader::load_file;
use state::AppState;

fn main() -> Result<()> {
    env_logger::init();

    let config = Cli::parse().config();
    if config.json {
        return print_report(&config);
    }

    let mut state = AppState::new(config.load.clone(), config.insights);
    if let Some(company) = config.company {
        state.query = company;
    }
    if let Some(path) = &config.file {
        state.load(path);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 900.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Excel Data Insights",
        options,
        Box::new(move |cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::dark());
            Ok(Box::new(CompanyInsightsApp::new(state)))
        }),
    )
    .map_err(|e| anyhow!("running UI: {e}"))
}

/// Headless mode: load, look up one company, print the report as JSON.
fn print_report(config: &Config) -> Result<()> {
    let file = config.file.as_deref().context("--json requires --file")?;
    let company = config.company.as_deref().context("--json requires --company")?;

    let table = load_file(file, &config.load)?;
    log::info!("Loaded {} rows from {}", table.len(), file.display());

    let report = report::build_report(&table, company, &config.insights);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
