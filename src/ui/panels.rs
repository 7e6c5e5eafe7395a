use eframe::egui::{self, Color32, RichText, Ui};

use crate::chart::layout::LayoutMode;
use crate::chart::scale::format_value;
use crate::data::model::AxisField;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – dataset summary
// ---------------------------------------------------------------------------

/// Render the left panel: source file, record count and current axes.
pub fn side_panel(ui: &mut Ui, state: &AppState) {
    ui.heading("Dataset");
    ui.separator();

    let Some(chart) = &state.chart else {
        ui.label("No dataset loaded.");
        return;
    };

    if let Some(path) = &state.data_path {
        ui.label(RichText::new(path.display().to_string()).monospace());
    }
    ui.label(format!("{} states", chart.dataset().len()));
    ui.add_space(8.0);

    let selection = chart.selection();
    let (x0, x1) = chart.x_scale().domain;
    let (y0, y1) = chart.y_scale().domain;

    egui::Grid::new("axes_summary")
        .num_columns(2)
        .striped(true)
        .show(ui, |ui: &mut Ui| {
            ui.strong("X");
            ui.label(selection.x.tooltip_name());
            ui.end_row();
            ui.label("");
            ui.label(format!("{} – {}", format_value(x0), format_value(x1)));
            ui.end_row();
            ui.strong("Y");
            ui.label(selection.y.tooltip_name());
            ui.end_row();
            ui.label("");
            ui.label(format!("{} – {}", format_value(y0), format_value(y1)));
            ui.end_row();
        });

    ui.add_space(8.0);
    ui.label(RichText::new("Click an axis label to change what is plotted.").weak());
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

        for mode in [LayoutMode::Fixed, LayoutMode::Responsive] {
            if ui
                .selectable_label(state.layout == mode, mode.label())
                .clicked()
            {
                state.set_layout(mode);
            }
        }

        ui.separator();

        if let Some(chart) = &state.chart {
            let g = chart.geometry();
            ui.label(format!(
                "{} records, plot {:.0}×{:.0}",
                chart.dataset().len(),
                g.plot_width(),
                g.plot_height()
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
        .set_title("Open survey data")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.load_path(&path);
    }
}
