use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Geometry primitives
// ---------------------------------------------------------------------------

/// A point in plot-area pixels: origin at the top-left corner of the plot,
/// y growing downwards.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Linear interpolation, `t` in `[0, 1]`.
    pub fn lerp(self, to: Point, t: f64) -> Point {
        Point {
            x: self.x + (to.x - self.x) * t,
            y: self.y + (to.y - self.y) * t,
        }
    }

    pub fn distance_sq(self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

/// Space reserved around the plot area for ticks and axis labels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

// ---------------------------------------------------------------------------
// Layout modes
// ---------------------------------------------------------------------------

/// How the drawing surface is sized.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    /// 960 × 500 regardless of window size.
    Fixed,
    /// Follows the available viewport.
    #[default]
    Responsive,
}

pub const FIXED_SIZE: (f64, f64) = (960.0, 500.0);

/// Length of a tick mark outside the plot.
pub const TICK_LEN: f64 = 6.0;
/// Gap between a tick mark and its number.
pub const TICK_GAP: f64 = 3.0;
/// Height of a row of tick numbers under the x axis.
pub const TICK_ROW: f64 = 14.0;
/// Width reserved for tick numbers left of the y axis.
pub const TICK_COLUMN: f64 = 30.0;
/// Spacing between stacked axis labels; one label font row.
pub const LABEL_ROW: f64 = 20.0;

/// Margins for both layout modes. The bottom and left margins hold the tick
/// band plus three stacked axis labels.
pub const CHART_MARGIN: Margin = Margin {
    top: 20.0,
    right: 80.0,
    bottom: 90.0,
    left: 100.0,
};

impl LayoutMode {
    /// Surface geometry for the given available viewport.
    pub fn geometry(self, viewport: (f64, f64)) -> ChartGeometry {
        let (width, height) = match self {
            LayoutMode::Fixed => FIXED_SIZE,
            LayoutMode::Responsive => viewport,
        };
        ChartGeometry::new(width, height, CHART_MARGIN)
    }

    pub fn label(self) -> &'static str {
        match self {
            LayoutMode::Fixed => "Fixed",
            LayoutMode::Responsive => "Responsive",
        }
    }
}

// ---------------------------------------------------------------------------
// Chart geometry
// ---------------------------------------------------------------------------

/// Size of the drawing surface and the plot area inside it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChartGeometry {
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
}

impl ChartGeometry {
    pub fn new(width: f64, height: f64, margin: Margin) -> Self {
        Self {
            width,
            height,
            margin,
        }
    }

    /// Plot width, never below one pixel.
    pub fn plot_width(&self) -> f64 {
        (self.width - self.margin.left - self.margin.right).max(1.0)
    }

    /// Plot height, never below one pixel.
    pub fn plot_height(&self) -> f64 {
        (self.height - self.margin.top - self.margin.bottom).max(1.0)
    }

    /// Pixel range for the x scale: left to right.
    pub fn x_range(&self) -> (f64, f64) {
        (0.0, self.plot_width())
    }

    /// Pixel range for the y scale: bottom to top.
    pub fn y_range(&self) -> (f64, f64) {
        (self.plot_height(), 0.0)
    }

    /// Vertical extent `(top, bottom)` of the `i`-th x axis label, in plot
    /// coordinates. Labels stack downwards below the tick numbers.
    pub fn x_label_band(&self, i: usize) -> (f64, f64) {
        let top = self.plot_height() + TICK_LEN + TICK_GAP + TICK_ROW + LABEL_ROW * i as f64;
        (top, top + LABEL_ROW)
    }

    /// Horizontal extent `(left, right)` of the `i`-th (rotated) y axis
    /// label. Labels stack leftwards beyond the tick numbers.
    pub fn y_label_band(&self, i: usize) -> (f64, f64) {
        let right = -(TICK_LEN + TICK_GAP + TICK_COLUMN + LABEL_ROW * i as f64);
        (right - LABEL_ROW, right)
    }

    /// Center of the `i`-th x axis label, in plot coordinates.
    pub fn x_label_anchor(&self, i: usize) -> Point {
        let (top, bottom) = self.x_label_band(i);
        Point::new(self.plot_width() * 0.5, (top + bottom) * 0.5)
    }

    /// Center of the `i`-th (rotated) y axis label, in plot coordinates.
    pub fn y_label_anchor(&self, i: usize) -> Point {
        let (left, right) = self.y_label_band(i);
        Point::new((left + right) * 0.5, self.plot_height() * 0.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_layout_ignores_viewport() {
        let g = LayoutMode::Fixed.geometry((1920.0, 1080.0));
        assert_eq!((g.width, g.height), FIXED_SIZE);
        assert_eq!(g.plot_width(), 960.0 - 100.0 - 80.0);
        assert_eq!(g.plot_height(), 500.0 - 20.0 - 90.0);
    }

    #[test]
    fn responsive_plot_is_viewport_minus_margins() {
        let g = LayoutMode::Responsive.geometry((1200.0, 700.0));
        assert_eq!(g.plot_width(), 1200.0 - 180.0);
        assert_eq!(g.plot_height(), 700.0 - 110.0);
        assert_eq!(g.x_range(), (0.0, 1020.0));
        assert_eq!(g.y_range(), (590.0, 0.0));
    }

    #[test]
    fn tiny_viewport_keeps_a_pixel() {
        let g = LayoutMode::Responsive.geometry((50.0, 30.0));
        assert_eq!(g.plot_width(), 1.0);
        assert_eq!(g.plot_height(), 1.0);
    }

    #[test]
    fn x_labels_sit_below_ticks_without_overlap() {
        for mode in [LayoutMode::Fixed, LayoutMode::Responsive] {
            let g = mode.geometry((1000.0, 600.0));
            let tick_text_bottom = g.plot_height() + TICK_LEN + TICK_GAP + TICK_ROW;
            let surface_bottom = g.plot_height() + g.margin.bottom;

            let bands: Vec<(f64, f64)> = (0..3).map(|i| g.x_label_band(i)).collect();
            assert!(bands[0].0 >= tick_text_bottom);
            assert!(bands[2].1 <= surface_bottom, "last x label clipped");
            for pair in bands.windows(2) {
                assert!(pair[0].1 <= pair[1].0, "x labels overlap");
            }
            for (i, (top, bottom)) in bands.iter().enumerate() {
                assert!(bottom - top >= 18.0);
                assert_eq!(g.x_label_anchor(i).y, (top + bottom) * 0.5);
            }
        }
    }

    #[test]
    fn y_labels_sit_left_of_ticks_without_overlap() {
        let g = LayoutMode::Fixed.geometry((0.0, 0.0));
        let tick_text_left = -(TICK_LEN + TICK_GAP + TICK_COLUMN);

        let bands: Vec<(f64, f64)> = (0..3).map(|i| g.y_label_band(i)).collect();
        assert!(bands[0].1 <= tick_text_left);
        assert!(bands[2].0 >= -g.margin.left, "last y label clipped");
        for pair in bands.windows(2) {
            assert!(pair[1].1 <= pair[0].0, "y labels overlap");
        }
    }

    #[test]
    fn lerp_endpoints() {
        let a = Point::new(0.0, 10.0);
        let b = Point::new(100.0, -10.0);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), Point::new(50.0, 0.0));
    }

    #[test]
    fn layout_mode_reads_from_lowercase_json() {
        let mode: LayoutMode = serde_json::from_str("\"fixed\"").unwrap();
        assert_eq!(mode, LayoutMode::Fixed);
    }
}
