use eframe::egui::{self, Ui};

/// Column name → what it means.
const COLUMN_DEFINITIONS: &[(&str, &str)] = &[
    ("LOINC Code", "Unique identifier assigned to the lab test"),
    ("Short Name", "Abbreviated test name (used in some systems)"),
    ("Long Name", "Full descriptive name of the test"),
    ("Specimen", "Sample type used for the test (e.g. Blood, Urine)"),
    ("Component", "What is being measured (e.g. Hemoglobin, Glucose)"),
    ("Property", "What property is being measured (e.g. concentration, mass)"),
    ("Scale", "Type of result (e.g. Quantitative, Ordinal)"),
    ("Method", "Specific lab method if defined (e.g. HPLC, Immunoassay)"),
];

const SPECIMEN_ABBREVIATIONS: &[(&str, &str)] = &[
    ("Bld", "Blood"),
    ("Ser", "Serum"),
    ("Plas", "Plasma"),
    ("Urine", "Urine"),
    ("CSF", "Cerebrospinal Fluid"),
    ("Saliva", "Saliva"),
    ("Stool", "Stool (Feces)"),
    ("Swab", "Swab from site (e.g. throat, wound)"),
    ("Bone Marrow", "Bone Marrow aspirate"),
];

/// Static help block: column definitions and common specimen abbreviations.
pub fn reference_section(ui: &mut Ui) {
    egui::CollapsingHeader::new("Column Definitions & Specimen Abbreviations")
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            egui::ScrollArea::vertical()
                .max_height(320.0)
                .show(ui, |ui: &mut Ui| {
                    ui.strong("Column Definitions");
                    definition_grid(ui, "column_definitions", COLUMN_DEFINITIONS, None);
                    ui.add_space(8.0);

                    ui.strong("Common Specimen Abbreviations");
                    definition_grid(
                        ui,
                        "specimen_abbreviations",
                        SPECIMEN_ABBREVIATIONS,
                        Some(("Abbreviation", "Meaning")),
                    );
                });
        });
}

fn definition_grid(
    ui: &mut Ui,
    id: &str,
    rows: &[(&str, &str)],
    header: Option<(&str, &str)>,
) {
    egui::Grid::new(id)
        .num_columns(2)
        .striped(true)
        .show(ui, |ui: &mut Ui| {
            if let Some((left, right)) = header {
                ui.strong(left);
                ui.strong(right);
                ui.end_row();
            }
            for (term, meaning) in rows {
                ui.label(*term);
                ui.label(*meaning);
                ui.end_row();
            }
        });
}
