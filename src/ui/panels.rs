use eframe::egui::{self, Color32, DragValue, Key, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::color;
use crate::data::insights::{MAX_BINS, MAX_TOP_N};
use crate::data::lookup::Selection;
use crate::data::model::Table;
use crate::state::AppState;
use crate::ui::charts::EguiCharts;

// ---------------------------------------------------------------------------
// Left side panel – company query
// ---------------------------------------------------------------------------

/// Render the query panel: company name input and chart options.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Ask a question:");
    ui.separator();

    if state.table.is_none() {
        ui.label("No spreadsheet loaded.");
        return;
    }

    ui.label("Enter company name to get insights:");
    let response = ui.text_edit_singleline(&mut state.query);
    let entered = response.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter));
    let clicked = ui.button("Show insights").clicked();

    ui.add_space(8.0);
    ui.separator();
    ui.strong("Chart options");
    let mut changed = false;
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Top companies");
        changed |= ui
            .add(DragValue::new(&mut state.insight_options.top_n).range(1..=MAX_TOP_N))
            .changed();
    });
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Histogram bins");
        changed |= ui
            .add(DragValue::new(&mut state.insight_options.bins).range(1..=MAX_BINS))
            .changed();
    });

    if entered || clicked || (changed && state.selection.is_some()) {
        state.submit_query();
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let (Some(table), Some(source)) = (&state.table, &state.source) {
            ui.label(format!(
                "{}: {} rows, {} columns",
                source.display(),
                table.len(),
                table.columns.len()
            ));
            ui.separator();
        }

        if let Some(msg) = &state.status_message {
            let text_color = if state.status_is_error {
                Color32::RED
            } else {
                Color32::WHITE
            };
            ui.label(RichText::new(msg).color(text_color));
        }
    });
}

// ---------------------------------------------------------------------------
// Central panel – matching rows and charts
// ---------------------------------------------------------------------------

/// Render the read-only results area.
pub fn results(ui: &mut Ui, state: &AppState) {
    let Some(table) = &state.table else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a spreadsheet to get started  (File → Open…)");
        });
        return;
    };
    let Some(selection) = &state.selection else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading(format!("{} rows loaded. Enter a company name.", table.len()));
        });
        return;
    };

    if selection.is_empty() {
        ui.label(format!("No data found for company: {}", selection.query));
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.label(format!("Data for company: {}", selection.query));
            selection_table(ui, table, selection);
            ui.add_space(8.0);

            if let Some(first) = selection.first(table) {
                ui.label(format!("Company: {}", first.company));
                ui.label(format!("Revenue: {}", first.revenue));
                ui.label(format!("Profit: {}", first.profit));
            }

            for chart in &state.charts {
                ui.add_space(12.0);
                ui.label(
                    RichText::new(chart.title())
                        .heading()
                        .color(color::HIGHLIGHT),
                );
                chart.render(&mut EguiCharts { ui: &mut *ui });
            }
        });
}

/// Every matching row with all of its columns.
fn selection_table(ui: &mut Ui, table: &Table, selection: &Selection) {
    ui.push_id("selection_rows", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .vscroll(false)
            .columns(Column::auto().at_least(80.0), table.columns.len())
            .header(20.0, |mut header| {
                for col in &table.columns {
                    header.col(|ui: &mut Ui| {
                        ui.strong(col);
                    });
                }
            })
            .body(|mut body| {
                for rec in selection.records(table) {
                    body.row(18.0, |mut row| {
                        for cell in &rec.cells {
                            row.col(|ui: &mut Ui| {
                                ui.label(cell.to_string());
                            });
                        }
                    });
                }
            });
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open company spreadsheet")
        .add_filter(
            "Supported files",
            &["xlsx", "xlsm", "xlsb", "xls", "ods", "csv", "json", "parquet", "pq"],
        )
        .add_filter("Excel", &["xlsx", "xlsm", "xlsb", "xls"])
        .add_filter("OpenDocument", &["ods"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.load(&path);
    }
}
