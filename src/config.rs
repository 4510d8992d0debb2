use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Static application configuration
// ---------------------------------------------------------------------------

/// Reference table loaded at startup when nothing else is opened.
pub const DEFAULT_CATALOG_PATH: &str = "lab_tests_US.csv";

/// Static settings for the viewer.  Not persisted, not user-editable.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Source read through the catalog cache on startup.
    pub catalog_path: PathBuf,
    /// Native window title.
    pub window_title: String,
    /// Initial window size in logical points.
    pub inner_size: [f32; 2],
    /// Minimum window size in logical points.
    pub min_inner_size: [f32; 2],
    /// Default width of the filter side panel.
    pub side_panel_width: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::from(DEFAULT_CATALOG_PATH),
            window_title: "Lab Test".to_string(),
            inner_size: [1280.0, 800.0],
            min_inner_size: [640.0, 400.0],
            side_panel_width: 240.0,
        }
    }
}
