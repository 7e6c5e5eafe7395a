use std::path::Path;

use eframe::egui;

use crate::config::ChartConfig;
use crate::state::AppState;
use crate::theme::Theme;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct HealthScatterApp {
    pub state: AppState,
    theme: Theme,
}

impl HealthScatterApp {
    /// Build the app and load the initial dataset.
    pub fn new(config: ChartConfig, data_path: &Path) -> Self {
        let theme = Theme::new(config.marker_opacity);
        let mut state = AppState::new(config);
        state.load_path(data_path);
        Self { state, theme }
    }
}

impl eframe::App for HealthScatterApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: dataset summary ----
        egui::SidePanel::left("summary_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &self.state);
            });

        // ---- Central panel: chart ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::scatter_plot(ui, &mut self.state, &self.theme);
        });
    }
}
