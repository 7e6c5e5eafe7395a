use std::f32::consts::FRAC_PI_2;

use eframe::egui::{
    self, epaint::TextShape, Align2, CursorIcon, FontId, Painter, Pos2, Rect, Sense, Stroke, Ui,
    Vec2,
};

use crate::chart::layout::{Point, TICK_GAP, TICK_LEN};
use crate::chart::renderer::ChartRenderer;
use crate::chart::scale::format_value;
use crate::chart::selection::{LabelClick, LabelStyle};
use crate::config::ChartConfig;
use crate::data::model::AxisField;
use crate::state::AppState;
use crate::theme::Theme;

const TICK_FONT: f32 = 11.0;
const LABEL_FONT: f32 = 15.0;
const MARKER_FONT: f32 = 11.0;

// ---------------------------------------------------------------------------
// Scatter plot (central panel)
// ---------------------------------------------------------------------------

/// Render the chart surface in the central panel and feed label clicks back
/// into the chart.
pub fn scatter_plot(ui: &mut Ui, state: &mut AppState, theme: &Theme) {
    if state.chart.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a CSV file to plot it  (File → Open…)");
        });
        return;
    }

    let available = ui.available_size();
    state.set_viewport(available.x as f64, available.y as f64);

    let config = &state.config;
    let Some(chart) = state.chart.as_mut() else {
        return;
    };

    let geometry = *chart.geometry();
    let (response, painter) = ui.allocate_painter(
        Vec2::new(geometry.width as f32, geometry.height as f32),
        Sense::hover(),
    );
    let origin = response.rect.min
        + Vec2::new(geometry.margin.left as f32, geometry.margin.top as f32);
    let to_screen = |p: Point| origin + Vec2::new(p.x as f32, p.y as f32);
    let now = ui.input(|i| i.time);

    draw_axes(&painter, chart, origin, now, config, theme);

    // ---- Markers ----
    let positions = chart.positions(now);
    for (p, record) in positions.iter().zip(chart.dataset().records()) {
        let center = to_screen(*p);
        painter.circle(
            center,
            config.marker_radius,
            theme.marker_fill,
            Stroke::new(1.0, theme.marker_stroke),
        );
        painter.text(
            center + Vec2::new(0.0, config.label_offset),
            Align2::CENTER_BOTTOM,
            &record.abbr,
            FontId::proportional(MARKER_FONT),
            theme.marker_text,
        );
    }

    // ---- Tooltip ----
    if let Some(pointer) = response.hover_pos() {
        let local = pointer - origin;
        let hit = chart.hit_test(
            Point::new(local.x as f64, local.y as f64),
            config.marker_radius as f64,
            now,
        );
        if let Some(text) = hit.and_then(|idx| chart.tooltip(idx)) {
            response.on_hover_ui_at_pointer(|ui: &mut Ui| {
                ui.label(text);
            });
        }
    }

    // ---- Axis labels ----
    let mut clicks = Vec::new();

    for (i, (field, style)) in chart.x_labels().iter().enumerate() {
        let color = label_color(*style, theme);
        let galley = painter.layout_no_wrap(
            field.axis_label().to_string(),
            FontId::proportional(LABEL_FONT),
            color,
        );
        let rect = Rect::from_center_size(to_screen(geometry.x_label_anchor(i)), galley.size());
        let label = ui
            .interact(rect, ui.id().with(("x_label", i)), Sense::click())
            .on_hover_cursor(CursorIcon::PointingHand);
        painter.galley(rect.min, galley, color);
        if label.clicked() {
            clicks.push(LabelClick::X(*field));
        }
    }

    for (i, (field, style)) in chart.y_labels().iter().enumerate() {
        let color = label_color(*style, theme);
        let galley = painter.layout_no_wrap(
            field.axis_label().to_string(),
            FontId::proportional(LABEL_FONT),
            color,
        );
        let size = galley.size();
        // Rotated a quarter turn counter-clockwise, so width runs upwards.
        let rect = Rect::from_center_size(
            to_screen(geometry.y_label_anchor(i)),
            Vec2::new(size.y, size.x),
        );
        let label = ui
            .interact(rect, ui.id().with(("y_label", i)), Sense::click())
            .on_hover_cursor(CursorIcon::PointingHand);
        painter.add(
            TextShape::new(Pos2::new(rect.left(), rect.bottom()), galley, color)
                .with_angle(-FRAC_PI_2),
        );
        if label.clicked() {
            clicks.push(LabelClick::Y(*field));
        }
    }

    for click in clicks {
        chart.handle_click(click, now);
    }

    if chart.is_animating(now) {
        ui.ctx().request_repaint();
    }
}

fn label_color(style: LabelStyle, theme: &Theme) -> egui::Color32 {
    match style {
        LabelStyle::Active => theme.label_active,
        LabelStyle::Inactive => theme.label_inactive,
    }
}

// ---------------------------------------------------------------------------
// Axes
// ---------------------------------------------------------------------------

fn draw_axes(
    painter: &Painter,
    chart: &ChartRenderer,
    origin: Pos2,
    now: f64,
    config: &ChartConfig,
    theme: &Theme,
) {
    let geometry = chart.geometry();
    let width = geometry.plot_width() as f32;
    let height = geometry.plot_height() as f32;
    let stroke = Stroke::new(1.0, theme.axis);
    let font = FontId::proportional(TICK_FONT);
    let tick_len = TICK_LEN as f32;
    let tick_gap = TICK_GAP as f32;

    // Bottom axis, following any running transition
    let x_scale = chart.x_scale_at(now);
    painter.line_segment(
        [origin + Vec2::new(0.0, height), origin + Vec2::new(width, height)],
        stroke,
    );
    for value in x_scale.ticks(config.x_ticks) {
        let base = origin + Vec2::new(x_scale.map(value) as f32, height);
        painter.line_segment([base, base + Vec2::new(0.0, tick_len)], stroke);
        painter.text(
            base + Vec2::new(0.0, tick_len + tick_gap),
            Align2::CENTER_TOP,
            format_value(value),
            font.clone(),
            theme.axis,
        );
    }

    // Left axis
    let y_scale = chart.y_scale_at(now);
    painter.line_segment([origin, origin + Vec2::new(0.0, height)], stroke);
    for value in y_scale.ticks(config.y_ticks) {
        let base = origin + Vec2::new(0.0, y_scale.map(value) as f32);
        painter.line_segment([base, base - Vec2::new(tick_len, 0.0)], stroke);
        painter.text(
            base - Vec2::new(tick_len + tick_gap, 0.0),
            Align2::RIGHT_CENTER,
            format_value(value),
            font.clone(),
            theme.axis,
        );
    }
}
