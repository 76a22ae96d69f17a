use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::export;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – demographic info and OTU table
// ---------------------------------------------------------------------------

/// Render the left panel for the selected sample.
pub fn side_panel(ui: &mut Ui, state: &AppState) {
    ui.heading("Demographic Info");
    ui.separator();

    let Some(views) = &state.views else {
        ui.label("No sample selected.");
        return;
    };

    for line in &views.metadata.lines {
        ui.label(RichText::new(line.to_string()).strong());
    }

    ui.add_space(8.0);
    ui.heading("OTUs");
    ui.separator();

    let bubble = &views.bubble.trace;
    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto().at_least(50.0))
        .column(Column::auto().at_least(50.0))
        .column(Column::remainder().clip(true))
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong("OTU");
            });
            header.col(|ui| {
                ui.strong("Count");
            });
            header.col(|ui| {
                ui.strong("Label");
            });
        })
        .body(|body| {
            body.rows(18.0, bubble.x.len(), |mut row| {
                let i = row.index();
                row.col(|ui| {
                    ui.label(bubble.x[i].to_string());
                });
                row.col(|ui| {
                    ui.label(bubble.y[i].to_string());
                });
                row.col(|ui| {
                    ui.label(&bubble.text[i]).on_hover_text(&bubble.text[i]);
                });
            });
        });
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

        ui.menu_button("Export", |ui: &mut Ui| {
            let enabled = state.views.is_some();
            if ui
                .add_enabled(enabled, egui::Button::new("Chart specs (JSON)…"))
                .clicked()
            {
                export_json_dialog(state);
                ui.close_menu();
            }
            if ui
                .add_enabled(enabled, egui::Button::new("OTU table (CSV)…"))
                .clicked()
            {
                export_csv_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();
        sample_selector(ui, state);
        ui.separator();

        if let Some(ds) = &state.dataset {
            match state.source_label() {
                Some(name) => ui.label(format!("{} samples loaded from {name}", ds.len())),
                None => ui.label(format!("{} samples loaded", ds.len())),
            };
        }

        if let Some(msg) = &state.status_message {
            let color = if state.is_error {
                Color32::RED
            } else {
                ui.visuals().weak_text_color()
            };
            ui.label(RichText::new(msg).color(color));
        }
    });
}

/// Single-choice selector over the dataset's names, in document order.
pub fn sample_selector(ui: &mut Ui, state: &mut AppState) {
    ui.label("Test Subject ID No.:");

    let current = state
        .selected
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_default();
    let mut chosen = None;

    egui::ComboBox::from_id_salt("sel_dataset")
        .selected_text(&current)
        .height(400.0)
        .show_ui(ui, |ui: &mut Ui| {
            ScrollArea::vertical().show(ui, |ui: &mut Ui| {
                for name in state.sample_names() {
                    if ui
                        .selectable_label(state.selected.as_ref() == Some(name), name.as_str())
                        .clicked()
                    {
                        chosen = Some(name.clone());
                    }
                }
            });
        });

    if let Some(id) = chosen {
        if state.selected.as_ref() != Some(&id) {
            state.select_sample(id);
        }
    }
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open biodiversity dataset")
        .add_filter("JSON", &["json"])
        .pick_file();

    if let Some(path) = file {
        state.load_from_path(&path);
    }
}

fn export_json_dialog(state: &mut AppState) {
    let Some(views) = &state.views else {
        return;
    };
    let file = rfd::FileDialog::new()
        .set_title("Export chart specs")
        .set_file_name(format!("sample_{}.json", views.sample))
        .add_filter("JSON", &["json"])
        .save_file();

    if let Some(path) = file {
        match export::save_views_json(views, &path) {
            Ok(()) => {
                log::info!("Exported chart specs to {}", path.display());
                state.set_info(format!("Saved {}", path.display()));
            }
            Err(e) => {
                log::error!("Chart export failed: {e:#}");
                state.set_error(format!("Error: {e:#}"));
            }
        }
    }
}

fn export_csv_dialog(state: &mut AppState) {
    let (Some(ds), Some(id)) = (&state.dataset, &state.selected) else {
        return;
    };
    let record = match ds.sample_for(id) {
        Ok(record) => record,
        Err(e) => {
            let msg = format!("Error: {e}");
            state.set_error(msg);
            return;
        }
    };
    let file = rfd::FileDialog::new()
        .set_title("Export OTU table")
        .set_file_name(format!("sample_{id}_otus.csv"))
        .add_filter("CSV", &["csv"])
        .save_file();

    if let Some(path) = file {
        match export::save_otu_csv(record, &path) {
            Ok(()) => {
                log::info!("Exported OTU table to {}", path.display());
                state.set_info(format!("Saved {}", path.display()));
            }
            Err(e) => {
                log::error!("CSV export failed: {e:#}");
                state.set_error(format!("Error: {e:#}"));
            }
        }
    }
}
