/// Chart core: everything between the loaded dataset and the painter.
///
/// ```text
///   Dataset ──► scale (padded domain → pixel range)
///                 │
///   label click ──► selection::dispatch ──► ChartUpdate list
///                 │                             │
///                 ▼                             ▼
///            renderer::ChartRenderer  (scales, label styles,
///                                      marker targets, animation)
///                 ▲
///   resize ───────┘  layout::ChartGeometry
/// ```
///
/// Nothing in here touches egui, so the whole module is testable with
/// explicit timestamps.

pub mod layout;
pub mod renderer;
pub mod scale;
pub mod selection;
