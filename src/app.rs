use eframe::egui;
use lab_lookup::config::AppConfig;

use crate::state::AppState;
use crate::ui::{panels, reference, results};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct LabLookupApp {
    pub state: AppState,
    config: AppConfig,
}

impl LabLookupApp {
    /// Create the app and load the configured reference table.
    pub fn new(config: AppConfig) -> Self {
        let mut state = AppState::default();
        state.load(&config.catalog_path);
        Self { state, config }
    }
}

impl eframe::App for LabLookupApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(self.config.side_panel_width)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Bottom panel: column definitions ----
        egui::TopBottomPanel::bottom("reference_panel")
            .resizable(true)
            .show(ctx, |ui| {
                reference::reference_section(ui);
            });

        // ---- Central panel: search + results ----
        egui::CentralPanel::default().show(ctx, |ui| {
            results::results_view(ui, &mut self.state);
        });
    }
}
