use eframe::egui::{self, Color32, RichText, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filter Lab Tests");
    ui.separator();

    if state.catalog.is_none() {
        ui.label("No reference table loaded.");
        return;
    }

    // Clone the option lists so the combo boxes can mutate state.
    let categories = state.category_options.clone();
    let specimens = state.specimen_options.clone();
    let width = ui.available_width();

    ui.strong("Test Category");
    if let Some(choice) = option_combo(ui, "category", &state.filter.category, &categories, width) {
        state.set_category(choice);
    }
    ui.add_space(8.0);

    ui.strong("Specimen Type");
    if let Some(choice) = option_combo(
        ui,
        "specimen",
        &state.filter.specimen_system,
        &specimens,
        width,
    ) {
        state.set_specimen(choice);
    }
}

/// A combo box over `options`; returns the newly picked value, if any.
fn option_combo(
    ui: &mut Ui,
    id: &str,
    current: &str,
    options: &[String],
    width: f32,
) -> Option<String> {
    let mut picked = None;
    egui::ComboBox::from_id_salt(id)
        .selected_text(current)
        .width(width)
        .show_ui(ui, |ui: &mut Ui| {
            for option in options {
                if ui.selectable_label(current == option, option).clicked() {
                    picked = Some(option.clone());
                }
            }
        });
    picked
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

        if let Some(catalog) = &state.catalog {
            ui.label(format!(
                "{} tests loaded, {} visible",
                catalog.len(),
                state.visible_indices.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open lab test reference table")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.load(&path);
    }
}
