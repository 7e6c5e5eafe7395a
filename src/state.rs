use std::path::{Path, PathBuf};

use crate::chart::layout::{LayoutMode, FIXED_SIZE};
use crate::chart::renderer::ChartRenderer;
use crate::config::ChartConfig;
use crate::data::loader::load_file;
use crate::data::model::Dataset;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: ChartConfig,

    /// Chart bound to the loaded dataset (None until a load succeeds).
    pub chart: Option<ChartRenderer>,

    /// File the current dataset came from.
    pub data_path: Option<PathBuf>,

    /// Active layout mode.
    pub layout: LayoutMode,

    /// Last viewport size reported by the central panel.
    pub viewport: Option<(f64, f64)>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: ChartConfig) -> Self {
        Self {
            layout: config.layout,
            config,
            chart: None,
            data_path: None,
            viewport: None,
            status_message: None,
        }
    }

    /// Load a CSV and bind it to a fresh chart. On failure the previous chart
    /// stays and the error is shown in the status bar.
    pub fn load_path(&mut self, path: &Path) {
        match load_file(path) {
            Ok(dataset) => {
                log::info!("Loaded {} records from {}", dataset.len(), path.display());
                self.data_path = Some(path.to_path_buf());
                self.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Bind a newly loaded dataset to the chart with the default selection.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        let viewport = self.viewport.unwrap_or(FIXED_SIZE);
        let geometry = self.layout.geometry(viewport);
        self.chart = Some(ChartRenderer::new(
            dataset,
            geometry,
            self.config.transition_secs(),
        ));
        self.status_message = None;
    }

    /// Switch layout mode and re-lay-out the existing chart.
    pub fn set_layout(&mut self, layout: LayoutMode) {
        if layout == self.layout {
            return;
        }
        log::info!("layout mode: {}", layout.label());
        self.layout = layout;
        self.apply_geometry();
    }

    /// Record the space available to the chart. In responsive mode this
    /// resizes the chart in place.
    pub fn set_viewport(&mut self, width: f64, height: f64) {
        if self.viewport == Some((width, height)) {
            return;
        }
        self.viewport = Some((width, height));
        self.apply_geometry();
    }

    fn apply_geometry(&mut self) {
        let viewport = self.viewport.unwrap_or(FIXED_SIZE);
        let geometry = self.layout.geometry(viewport);
        if let Some(chart) = &mut self.chart {
            chart.resize(geometry.width, geometry.height);
        }
    }
}
