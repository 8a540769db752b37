//! Scatter plot view
//!
//! Renders the plot projection as one marker per record so each point can
//! carry its own radius and color. Hover shows the composed label from
//! the projection; a click on a marker emits `PointClicked` with the
//! record id.

use egui::{Id, Ui};
use egui_plot::{MarkerShape, Plot, Points};
use tracing::trace;

use scout_core::{Encoding, PlotProjection};

use crate::colors::{normalize, viridis_color};
use crate::ViewEvent;

/// Pointer distance (fraction of the visible axis span) within which a
/// marker counts as hovered
const HOVER_FRACTION: f64 = 0.03;

/// Scatter plot widget
pub struct ScatterView {
    id: Id,
    hovered: Option<usize>,
}

impl ScatterView {
    pub fn new(id_salt: &str) -> Self {
        Self {
            id: Id::new(("scatter", id_salt.to_string())),
            hovered: None,
        }
    }

    /// Render the projection; returns a click event if a marker was hit
    pub fn ui(
        &mut self,
        ui: &mut Ui,
        projection: &PlotProjection,
        encoding: &Encoding,
        height: f32,
    ) -> Option<ViewEvent> {
        let mut event = None;

        let response = Plot::new(self.id)
            .height(height)
            .x_axis_label(encoding.x.clone())
            .y_axis_label(encoding.y.clone())
            .show_grid(true)
            .allow_scroll(false)
            .show(ui, |plot_ui| {
                let color_range = projection.color_range();

                for idx in 0..projection.len() {
                    let (Some(x), Some(y)) = (projection.xs[idx], projection.ys[idx]) else {
                        // missing axis value, nothing to draw
                        continue;
                    };
                    let t = normalize(projection.colors[idx], color_range);
                    let radius = (projection.sizes[idx] / 2.0) as f32;
                    plot_ui.points(
                        Points::new(vec![[x, y]])
                            .shape(MarkerShape::Circle)
                            .radius(radius)
                            .color(viridis_color(t)),
                    );
                }

                self.hovered = plot_ui
                    .pointer_coordinate()
                    .and_then(|pointer| nearest_point(projection, pointer.x, pointer.y, plot_ui));
            });

        if let Some(idx) = self.hovered {
            egui::show_tooltip_at_pointer(ui.ctx(), self.id.with("hover"), |ui| {
                ui.label(&projection.hover[idx]);
            });

            if response.response.clicked() {
                let id = projection.ids[idx];
                trace!(record = id, "plot point clicked");
                event = Some(ViewEvent::PointClicked(id));
            }
        }

        event
    }
}

/// Index of the marker nearest to the pointer, if close enough.
///
/// Distances are measured in bounds-normalized coordinates so hover
/// behaves the same on both axes regardless of their scales.
fn nearest_point(
    projection: &PlotProjection,
    px: f64,
    py: f64,
    plot_ui: &egui_plot::PlotUi,
) -> Option<usize> {
    let bounds = plot_ui.plot_bounds();
    let span_x = bounds.width().max(f64::EPSILON);
    let span_y = bounds.height().max(f64::EPSILON);

    let mut best: Option<(usize, f64)> = None;
    for idx in 0..projection.len() {
        let (Some(x), Some(y)) = (projection.xs[idx], projection.ys[idx]) else {
            continue;
        };
        let dx = (x - px) / span_x;
        let dy = (y - py) / span_y;
        let dist = (dx * dx + dy * dy).sqrt();
        if dist <= HOVER_FRACTION && best.map(|(_, d)| dist < d).unwrap_or(true) {
            best = Some((idx, dist));
        }
    }
    best.map(|(idx, _)| idx)
}
