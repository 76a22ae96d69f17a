use eframe::egui::{self, Ui};

use crate::config::DashboardConfig;
use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct RustyNavelApp {
    pub state: AppState,
}

impl RustyNavelApp {
    /// Load the configured dataset and show its first sample.
    pub fn new(config: &DashboardConfig) -> Self {
        let mut state = AppState::default();
        state.load_from_path(&config.data_path);
        Self { state }
    }
}

impl eframe::App for RustyNavelApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar + selector ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: demographic info ----
        egui::SidePanel::left("metadata_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &self.state);
            });

        // ---- Central panel: charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            charts(ui, &self.state);
        });
    }
}

fn charts(ui: &mut Ui, state: &AppState) {
    let Some(views) = &state.views else {
        ui.centered_and_justified(|ui: &mut Ui| {
            match (&state.status_message, state.is_error) {
                (Some(msg), true) => {
                    ui.heading(egui::RichText::new(msg).color(egui::Color32::RED));
                }
                _ => {
                    ui.heading("Open a dataset to view samples  (File → Open…)");
                }
            }
        });
        return;
    };

    let row_height = (ui.available_height() / 2.0 - 40.0).max(200.0);

    egui::ScrollArea::vertical().show(ui, |ui: &mut Ui| {
        ui.columns(2, |cols| {
            plot::bar_chart(&mut cols[0], &views.bar, row_height);
            plot::gauge_chart(&mut cols[1], &views.gauge, row_height);
        });
        ui.separator();
        plot::bubble_chart(ui, &views.bubble, row_height);
    });
}
