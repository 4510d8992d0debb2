use std::path::Path;
use std::sync::Arc;

use lab_lookup::data::cache;
use lab_lookup::data::model::Catalog;
use lab_lookup::data::query::{ALL, FilterSpec, filtered_indices};

use crate::color::ColorMap;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Loaded reference table (None until a load succeeds).
    pub catalog: Option<Arc<Catalog>>,

    /// Current filter inputs.
    pub filter: FilterSpec,

    /// Indices of records passing the current filter (cached).
    pub visible_indices: Vec<usize>,

    /// `"All"` followed by the catalog's categories.
    pub category_options: Vec<String>,

    /// `"All"` followed by the catalog's non-null specimen systems.
    pub specimen_options: Vec<String>,

    /// Colour per category for the results table.
    pub color_map: Option<ColorMap>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Load `path` through the process-wide cache and make it current.
    pub fn load(&mut self, path: &Path) {
        match cache::catalog(path) {
            Ok(catalog) => self.set_catalog(catalog),
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Ingest a newly loaded catalog, reset filters and rebuild option lists.
    pub fn set_catalog(&mut self, catalog: Arc<Catalog>) {
        let categories = catalog.category_options();
        self.color_map = Some(ColorMap::new(&categories));
        self.category_options = with_all(categories);
        self.specimen_options = with_all(catalog.specimen_options());

        self.filter = FilterSpec::default();
        self.visible_indices = (0..catalog.len()).collect();
        self.catalog = Some(catalog);
        self.status_message = None;
    }

    /// Recompute `visible_indices` after a filter change.
    pub fn refilter(&mut self) {
        if let Some(catalog) = &self.catalog {
            self.visible_indices = filtered_indices(catalog, &self.filter);
        }
    }

    pub fn set_category(&mut self, category: String) {
        if self.filter.category != category {
            self.filter.category = category;
            self.refilter();
        }
    }

    pub fn set_specimen(&mut self, specimen: String) {
        if self.filter.specimen_system != specimen {
            self.filter.specimen_system = specimen;
            self.refilter();
        }
    }
}

fn with_all(options: Vec<String>) -> Vec<String> {
    std::iter::once(ALL.to_string()).chain(options).collect()
}
