use eframe::egui::{self, RichText, Ui};
use egui_extras::{Column, TableBuilder};
use lab_lookup::data::query::{DisplayColumn, project, result_summary};

use crate::state::AppState;

const SEARCH_HINT: &str = "Type 'CBC', 'glucose', 'hemoglobin'...";

// ---------------------------------------------------------------------------
// Search box + results table (central panel)
// ---------------------------------------------------------------------------

pub fn results_view(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Search Lab Test");

    let search = egui::TextEdit::singleline(&mut state.filter.search_text)
        .hint_text(SEARCH_HINT)
        .desired_width(f32::INFINITY);
    if ui.add(search).changed() {
        state.refilter();
    }
    ui.add_space(6.0);

    let Some(catalog) = state.catalog.clone() else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a reference table to search  (File → Open…)");
        });
        return;
    };

    ui.strong(result_summary(state.visible_indices.len()));
    ui.add_space(4.0);

    let row_height = ui.text_style_height(&egui::TextStyle::Body) + 4.0;
    let mut table = TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center));
    for column in DisplayColumn::ALL {
        table = table.column(match column {
            DisplayColumn::LongName => Column::initial(320.0).at_least(120.0).clip(true),
            _ => Column::auto().at_least(60.0).clip(true),
        });
    }

    table
        .header(row_height + 2.0, |mut header| {
            for column in DisplayColumn::ALL {
                header.col(|ui| {
                    ui.strong(column.to_string());
                });
            }
        })
        .body(|body| {
            body.rows(row_height, state.visible_indices.len(), |mut row| {
                let Some(record) = state
                    .visible_indices
                    .get(row.index())
                    .and_then(|&i| catalog.get(i))
                else {
                    return;
                };

                for (column, value) in project(record).iter() {
                    let text = value.unwrap_or("");
                    row.col(|ui| {
                        match (column, &state.color_map) {
                            (DisplayColumn::Category, Some(colors)) => {
                                ui.label(RichText::new(text).color(colors.color_for(text)));
                            }
                            _ => {
                                ui.label(text);
                            }
                        }
                    });
                }
            });
        });
}
