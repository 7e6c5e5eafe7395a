use crate::data::model::{AxisField, Dataset, XField, YField};

use super::layout::{ChartGeometry, Point};
use super::scale::{format_value, LinearScale};
use super::selection::{dispatch, label_styles, ChartUpdate, LabelClick, LabelStyle, Selection};

// ---------------------------------------------------------------------------
// Marker animation
// ---------------------------------------------------------------------------

/// A linear move from `from` to the renderer's current targets. The axis
/// domains travel alongside the markers.
#[derive(Debug, Clone)]
struct Animation {
    from: Vec<Point>,
    from_x_domain: (f64, f64),
    from_y_domain: (f64, f64),
    started_at: f64,
    duration: f64,
}

impl Animation {
    fn progress(&self, now: f64) -> f64 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        ((now - self.started_at) / self.duration).clamp(0.0, 1.0)
    }
}

fn lerp_domain(from: (f64, f64), to: (f64, f64), t: f64) -> (f64, f64) {
    (from.0 + (to.0 - from.0) * t, from.1 + (to.1 - from.1) * t)
}

// ---------------------------------------------------------------------------
// ChartRenderer
// ---------------------------------------------------------------------------

/// All chart state: bound data, selection, geometry, scales and marker
/// positions. Times are seconds on a caller-supplied monotonic clock.
#[derive(Debug, Clone)]
pub struct ChartRenderer {
    dataset: Dataset,
    selection: Selection,
    geometry: ChartGeometry,
    x_scale: LinearScale,
    y_scale: LinearScale,
    x_labels: [(XField, LabelStyle); 3],
    y_labels: [(YField, LabelStyle); 3],
    /// Field names the tooltip currently describes.
    tooltip_fields: (XField, YField),
    /// Settled marker positions under the current scales.
    targets: Vec<Point>,
    animation: Option<Animation>,
    transition_secs: f64,
}

fn column_scale<F: AxisField>(dataset: &Dataset, field: F, range: (f64, f64)) -> LinearScale {
    // Dataset is never empty, so the fallback is unreachable in practice.
    LinearScale::padded(dataset.column(field), range)
        .unwrap_or_else(|| LinearScale::new((0.0, 1.0), range))
}

impl ChartRenderer {
    /// Bind a dataset with the default selection and draw markers in place.
    pub fn new(dataset: Dataset, geometry: ChartGeometry, transition_secs: f64) -> Self {
        let selection = Selection::default();
        let x_scale = column_scale(&dataset, selection.x, geometry.x_range());
        let y_scale = column_scale(&dataset, selection.y, geometry.y_range());
        let mut renderer = Self {
            dataset,
            selection,
            geometry,
            x_scale,
            y_scale,
            x_labels: label_styles(selection.x),
            y_labels: label_styles(selection.y),
            tooltip_fields: (selection.x, selection.y),
            targets: Vec::new(),
            animation: None,
            transition_secs: transition_secs.max(0.0),
        };
        renderer.targets = renderer.compute_targets();
        renderer
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn geometry(&self) -> &ChartGeometry {
        &self.geometry
    }

    /// Settled x scale for the current selection.
    pub fn x_scale(&self) -> &LinearScale {
        &self.x_scale
    }

    /// Settled y scale for the current selection.
    pub fn y_scale(&self) -> &LinearScale {
        &self.y_scale
    }

    /// X scale to draw the axis with at time `now`.
    pub fn x_scale_at(&self, now: f64) -> LinearScale {
        match &self.animation {
            Some(anim) if anim.progress(now) < 1.0 => LinearScale::new(
                lerp_domain(anim.from_x_domain, self.x_scale.domain, anim.progress(now)),
                self.x_scale.range,
            ),
            _ => self.x_scale,
        }
    }

    /// Y scale to draw the axis with at time `now`.
    pub fn y_scale_at(&self, now: f64) -> LinearScale {
        match &self.animation {
            Some(anim) if anim.progress(now) < 1.0 => LinearScale::new(
                lerp_domain(anim.from_y_domain, self.y_scale.domain, anim.progress(now)),
                self.y_scale.range,
            ),
            _ => self.y_scale,
        }
    }

    pub fn x_labels(&self) -> &[(XField, LabelStyle); 3] {
        &self.x_labels
    }

    pub fn y_labels(&self) -> &[(YField, LabelStyle); 3] {
        &self.y_labels
    }

    /// Settled position of every marker, in record order.
    #[cfg(test)]
    pub fn target_positions(&self) -> &[Point] {
        &self.targets
    }

    fn compute_targets(&self) -> Vec<Point> {
        let Selection { x, y } = self.selection;
        self.dataset
            .records()
            .iter()
            .map(|r| Point::new(self.x_scale.map(x.value(r)), self.y_scale.map(y.value(r))))
            .collect()
    }

    // -- events ------------------------------------------------------------

    /// Handle a click on an axis label at time `now`.
    ///
    /// Returns `false` when the click selected the already active field.
    pub fn handle_click(&mut self, click: LabelClick, now: f64) -> bool {
        let outcome = dispatch(self.selection, click);
        if outcome.is_noop() {
            log::debug!("label click {click:?} ignored: already selected");
            return false;
        }

        // Start from wherever the markers are drawn right now.
        let from = self.positions(now);
        let from_x_domain = self.x_scale_at(now).domain;
        let from_y_domain = self.y_scale_at(now).domain;
        self.selection = outcome.selection;
        log::debug!(
            "selection changed to x={}, y={}",
            self.selection.x,
            self.selection.y
        );

        for update in outcome.updates {
            match update {
                ChartUpdate::RescaleX => {
                    self.x_scale =
                        column_scale(&self.dataset, self.selection.x, self.geometry.x_range());
                }
                ChartUpdate::RescaleY => {
                    self.y_scale =
                        column_scale(&self.dataset, self.selection.y, self.geometry.y_range());
                }
                ChartUpdate::RestyleXLabels => self.x_labels = label_styles(self.selection.x),
                ChartUpdate::RestyleYLabels => self.y_labels = label_styles(self.selection.y),
                ChartUpdate::MoveMarkers => {
                    self.targets = self.compute_targets();
                    self.animation = Some(Animation {
                        from: from.clone(),
                        from_x_domain,
                        from_y_domain,
                        started_at: now,
                        duration: self.transition_secs,
                    });
                }
                ChartUpdate::RebindTooltip => {
                    self.tooltip_fields = (self.selection.x, self.selection.y);
                }
            }
        }
        true
    }

    /// Resize the drawing surface, keeping its margins.
    ///
    /// Scales and markers are recomputed for the new plot area and any
    /// running transition is dropped. Returns `false` if nothing changed.
    pub fn resize(&mut self, width: f64, height: f64) -> bool {
        let geometry = ChartGeometry::new(width, height, self.geometry.margin);
        self.set_geometry(geometry)
    }

    fn set_geometry(&mut self, geometry: ChartGeometry) -> bool {
        if geometry == self.geometry {
            return false;
        }
        log::debug!(
            "chart surface {}x{} -> {}x{}",
            self.geometry.width,
            self.geometry.height,
            geometry.width,
            geometry.height
        );
        self.geometry = geometry;
        self.x_scale = self.x_scale.with_range(geometry.x_range());
        self.y_scale = self.y_scale.with_range(geometry.y_range());
        self.targets = self.compute_targets();
        self.animation = None;
        true
    }

    // -- drawing -----------------------------------------------------------

    /// Marker positions to draw at time `now`.
    pub fn positions(&self, now: f64) -> Vec<Point> {
        match &self.animation {
            Some(anim) if anim.progress(now) < 1.0 => {
                let t = anim.progress(now);
                anim.from
                    .iter()
                    .zip(&self.targets)
                    .map(|(a, b)| a.lerp(*b, t))
                    .collect()
            }
            _ => self.targets.clone(),
        }
    }

    /// Whether markers are still moving at time `now`.
    pub fn is_animating(&self, now: f64) -> bool {
        self.animation
            .as_ref()
            .is_some_and(|anim| anim.progress(now) < 1.0)
    }

    /// Index of the top-most marker whose circle contains `at`.
    pub fn hit_test(&self, at: Point, radius: f64, now: f64) -> Option<usize> {
        let r2 = radius * radius;
        self.positions(now)
            .iter()
            .rposition(|p| p.distance_sq(at) <= r2)
    }

    /// Tooltip text for record `index`: state name, then x and y values.
    pub fn tooltip(&self, index: usize) -> Option<String> {
        let record = self.dataset.records().get(index)?;
        let (x, y) = self.tooltip_fields;
        Some(format!(
            "{}\n{}: {}\n{}: {}",
            record.state,
            x.tooltip_name(),
            format_value(x.value(record)),
            y.tooltip_name(),
            format_value(y.value(record)),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::layout::LayoutMode;
    use crate::data::model::sample_record;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn alabama() -> Dataset {
        Dataset::new(vec![sample_record(
            "Alabama",
            "AL",
            [18.2, 38.0, 42000.0, 11.3, 22.0, 31.0],
        )])
        .unwrap()
    }

    fn three_states() -> Dataset {
        Dataset::new(vec![
            sample_record("Alabama", "AL", [18.2, 38.0, 42000.0, 11.3, 22.0, 31.0]),
            sample_record("Alaska", "AK", [10.9, 33.3, 70000.0, 15.0, 19.0, 29.7]),
            sample_record("Arizona", "AZ", [17.8, 36.9, 50000.0, 14.4, 16.0, 28.9]),
        ])
        .unwrap()
    }

    fn renderer(ds: Dataset) -> ChartRenderer {
        ChartRenderer::new(ds, LayoutMode::Responsive.geometry((1180.0, 600.0)), 1.0)
    }

    #[test]
    fn single_record_sits_at_scaled_poverty() {
        let chart = renderer(alabama());
        assert_eq!(chart.x_scale().domain, (0.9 * 18.2, 1.1 * 18.2));
        let expected = chart.x_scale().map(18.2);
        let pos = chart.positions(0.0);
        assert_eq!(pos.len(), 1);
        assert!(approx(pos[0].x, expected));
        assert!(approx(pos[0].y, chart.y_scale().map(11.3)));
    }

    #[test]
    fn y_axis_is_inverted() {
        let chart = renderer(three_states());
        let pos = chart.positions(0.0);
        // Alaska has the highest healthcare value, so it is drawn highest.
        assert!(pos[1].y < pos[0].y);
        assert!(pos[1].y < pos[2].y);
    }

    #[test]
    fn clicking_selected_label_changes_nothing() {
        let mut chart = renderer(three_states());
        let before = chart.positions(0.0);
        assert!(!chart.handle_click(LabelClick::X(XField::Poverty), 0.0));
        assert!(!chart.handle_click(LabelClick::Y(YField::Healthcare), 0.0));
        assert!(!chart.is_animating(0.1));
        assert_eq!(chart.positions(0.1), before);
        assert_eq!(chart.selection(), Selection::default());
    }

    #[test]
    fn markers_settle_on_new_field() {
        let mut chart = renderer(three_states());
        assert!(chart.handle_click(LabelClick::X(XField::Income), 10.0));
        assert!(chart.is_animating(10.5));
        assert!(!chart.is_animating(11.0));

        let income: Vec<f64> = chart.dataset().column(XField::Income).collect();
        assert_eq!(chart.x_scale().domain, (0.9 * 42000.0, 1.1 * 70000.0));
        for (p, v) in chart.positions(11.0).iter().zip(income) {
            assert!(approx(p.x, chart.x_scale().map(v)));
        }
    }

    #[test]
    fn transition_is_linear() {
        let mut chart = renderer(three_states());
        let start = chart.positions(0.0);
        chart.handle_click(LabelClick::Y(YField::Obesity), 0.0);
        let end = chart.target_positions().to_vec();
        let mid = chart.positions(0.25);
        for i in 0..3 {
            assert!(approx(mid[i].y, start[i].y + (end[i].y - start[i].y) * 0.25));
            assert!(approx(mid[i].x, start[i].x));
        }
    }

    #[test]
    fn axis_domain_moves_with_markers() {
        let mut chart = renderer(three_states());
        let old_x = chart.x_scale().domain;
        let y_before = chart.y_scale_at(0.0);
        chart.handle_click(LabelClick::X(XField::Age), 2.0);
        let new_x = chart.x_scale().domain;

        // Starts on the old domain, ends on the new one.
        assert_eq!(chart.x_scale_at(2.0).domain, old_x);
        assert_eq!(chart.x_scale_at(3.0).domain, new_x);

        let mid = chart.x_scale_at(2.5).domain;
        assert!(approx(mid.0, (old_x.0 + new_x.0) * 0.5));
        assert!(approx(mid.1, (old_x.1 + new_x.1) * 0.5));
        assert_eq!(chart.x_scale_at(2.5).range, chart.x_scale().range);

        // The untouched axis stays put.
        assert_eq!(chart.y_scale_at(2.5), y_before);
    }

    #[test]
    fn retarget_keeps_drawn_axis_domain() {
        let mut chart = renderer(three_states());
        chart.handle_click(LabelClick::Y(YField::Smokes), 0.0);
        let drawn = chart.y_scale_at(0.4).domain;
        chart.handle_click(LabelClick::Y(YField::Obesity), 0.4);
        let after = chart.y_scale_at(0.4).domain;
        assert!(approx(drawn.0, after.0) && approx(drawn.1, after.1));
    }

    #[test]
    fn resize_snaps_axis_domain() {
        let mut chart = renderer(three_states());
        chart.handle_click(LabelClick::X(XField::Income), 0.0);
        chart.resize(900.0, 500.0);
        assert_eq!(chart.x_scale_at(0.1), *chart.x_scale());
    }

    #[test]
    fn retarget_mid_flight_starts_from_drawn_positions() {
        let mut chart = renderer(three_states());
        chart.handle_click(LabelClick::X(XField::Age), 0.0);
        let drawn = chart.positions(0.5);
        chart.handle_click(LabelClick::X(XField::Income), 0.5);
        let after = chart.positions(0.5);
        for (a, b) in drawn.iter().zip(&after) {
            assert!(approx(a.x, b.x) && approx(a.y, b.y));
        }
    }

    #[test]
    fn labels_and_tooltip_follow_selection() {
        let mut chart = renderer(three_states());
        assert_eq!(
            chart.tooltip(0).unwrap(),
            "Alabama\nPoverty: 18.2\nHealthcare (%): 11.3"
        );

        chart.handle_click(LabelClick::X(XField::Income), 0.0);
        chart.handle_click(LabelClick::Y(YField::Smokes), 0.0);
        assert_eq!(
            chart.tooltip(1).unwrap(),
            "Alaska\nIncome ($): 70000\nSmokers: 19"
        );
        assert!(chart.x_labels().contains(&(XField::Income, LabelStyle::Active)));
        assert!(chart.x_labels().contains(&(XField::Poverty, LabelStyle::Inactive)));
        assert!(chart.y_labels().contains(&(YField::Smokes, LabelStyle::Active)));
        assert!(chart.tooltip(3).is_none());
    }

    #[test]
    fn resize_rescales_to_new_plot_area() {
        let mut chart = renderer(three_states());
        chart.handle_click(LabelClick::X(XField::Age), 0.0);
        assert!(chart.resize(800.0, 400.0));

        let g = chart.geometry();
        assert_eq!(g.plot_width(), 800.0 - 180.0);
        assert_eq!(g.plot_height(), 400.0 - 110.0);
        assert_eq!(chart.x_scale().range, (0.0, 620.0));
        assert_eq!(chart.y_scale().range, (290.0, 0.0));
        // Resizing snaps markers instead of finishing the transition.
        assert!(!chart.is_animating(0.1));

        let ages: Vec<f64> = chart.dataset().column(XField::Age).collect();
        for (p, v) in chart.positions(0.1).iter().zip(ages) {
            assert!(approx(p.x, chart.x_scale().map(v)));
            assert!(p.x >= 0.0 && p.x <= 620.0);
        }
        assert!(!chart.resize(800.0, 400.0));
    }

    #[test]
    fn hit_test_prefers_topmost_marker() {
        let ds = Dataset::new(vec![
            sample_record("First", "AA", [10.0, 30.0, 40000.0, 10.0, 20.0, 30.0]),
            sample_record("Second", "BB", [10.0, 30.0, 40000.0, 10.0, 20.0, 30.0]),
            sample_record("Far", "CC", [20.0, 40.0, 60000.0, 20.0, 25.0, 35.0]),
        ])
        .unwrap();
        let chart = renderer(ds);
        let pos = chart.positions(0.0);
        assert_eq!(chart.hit_test(pos[0], 15.0, 0.0), Some(1));
        assert_eq!(chart.hit_test(pos[2], 15.0, 0.0), Some(2));
        let off = Point::new(pos[2].x + 16.0, pos[2].y);
        assert_eq!(chart.hit_test(off, 15.0, 0.0), None);
    }

    #[test]
    fn zero_duration_moves_instantly() {
        let mut chart = ChartRenderer::new(
            three_states(),
            LayoutMode::Fixed.geometry((0.0, 0.0)),
            0.0,
        );
        chart.handle_click(LabelClick::X(XField::Age), 3.0);
        assert!(!chart.is_animating(3.0));
        assert_eq!(chart.positions(3.0), chart.target_positions());
    }
}
