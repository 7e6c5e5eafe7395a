use crate::data::model::{AxisField, XField, YField};

// ---------------------------------------------------------------------------
// Selection state
// ---------------------------------------------------------------------------

/// The pair of columns currently plotted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    pub x: XField,
    pub y: YField,
}

/// A click on one of the axis labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelClick {
    X(XField),
    Y(YField),
}

/// Work the renderer must do after a selection change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartUpdate {
    RescaleX,
    RescaleY,
    RestyleXLabels,
    RestyleYLabels,
    MoveMarkers,
    RebindTooltip,
}

/// Outcome of [`dispatch`]: the next selection and the updates to apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatch {
    pub selection: Selection,
    pub updates: Vec<ChartUpdate>,
}

impl Dispatch {
    pub fn is_noop(&self) -> bool {
        self.updates.is_empty()
    }
}

/// Apply a label click to the current selection.
///
/// Clicking the label that is already selected changes nothing and yields no
/// updates.
pub fn dispatch(current: Selection, click: LabelClick) -> Dispatch {
    use ChartUpdate::*;

    match click {
        LabelClick::X(field) if field != current.x => Dispatch {
            selection: Selection { x: field, ..current },
            updates: vec![RescaleX, RestyleXLabels, MoveMarkers, RebindTooltip],
        },
        LabelClick::Y(field) if field != current.y => Dispatch {
            selection: Selection { y: field, ..current },
            updates: vec![RescaleY, RestyleYLabels, MoveMarkers, RebindTooltip],
        },
        _ => Dispatch {
            selection: current,
            updates: Vec::new(),
        },
    }
}

// ---------------------------------------------------------------------------
// Label styling
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelStyle {
    Active,
    Inactive,
}

/// Style for each of an axis's three labels, exactly one active.
pub fn label_styles<F: AxisField>(selected: F) -> [(F, LabelStyle); 3] {
    F::ALL.map(|field| {
        let style = if field == selected {
            LabelStyle::Active
        } else {
            LabelStyle::Inactive
        };
        (field, style)
    })
}
