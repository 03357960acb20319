/// Startup settings for the dashboard window and its outputs.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub title: String,
    pub window_size: [f32; 2],
    pub min_window_size: [f32; 2],
    /// Rows of an upload shown on the landing page.
    pub preview_rows: usize,
    /// Rows per page of the preview grid.
    pub page_size: usize,
    /// Upper bound on histogram bars.
    pub max_bins: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            title: "IMDB Movies Dashboard".to_string(),
            window_size: [1200.0, 800.0],
            min_window_size: [600.0, 400.0],
            preview_rows: 10,
            page_size: 10,
            max_bins: 50,
        }
    }
}
