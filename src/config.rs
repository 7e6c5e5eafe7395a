use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::chart::layout::LayoutMode;

/// Environment variable naming an optional JSON config file.
pub const CONFIG_ENV: &str = "HEALTH_SCATTER_CONFIG";

/// CSV loaded at startup when no path is given on the command line.
pub const DEFAULT_DATA_PATH: &str = "assets/data/data.csv";

// ---------------------------------------------------------------------------
// Chart configuration
// ---------------------------------------------------------------------------

/// Tunable drawing parameters. Every key is optional in the JSON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Marker circle radius in pixels.
    pub marker_radius: f32,
    /// Marker fill opacity, 0..=1.
    pub marker_opacity: f32,
    /// Vertical offset of the abbreviation relative to the circle center.
    pub label_offset: f32,
    /// Length of the marker transition after a label click.
    pub transition_ms: u64,
    pub x_ticks: usize,
    pub y_ticks: usize,
    /// Layout used when the window opens.
    pub layout: LayoutMode,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            marker_radius: 15.0,
            marker_opacity: 0.5,
            label_offset: 5.0,
            transition_ms: 1000,
            x_ticks: 8,
            y_ticks: 12,
            layout: LayoutMode::default(),
        }
    }
}

impl ChartConfig {
    /// Read the file named by [`CONFIG_ENV`], or use defaults when unset.
    pub fn load() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_path(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config = Self::from_json(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        log::info!("loaded chart config from {}", path.display());
        Ok(config)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let mut config: ChartConfig = serde_json::from_str(text).context("invalid JSON")?;
        config.marker_opacity = config.marker_opacity.clamp(0.0, 1.0);
        config.marker_radius = config.marker_radius.max(1.0);
        Ok(config)
    }

    pub fn transition_secs(&self) -> f64 {
        self.transition_ms as f64 / 1000.0
    }
}
