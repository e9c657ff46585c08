use std::f64::consts::{FRAC_PI_2, TAU};

use eframe::egui::{self, Color32, RichText, Stroke, Ui};
use egui_plot::{Legend, MarkerShape, Plot, PlotPoint, PlotPoints, Points, Polygon, Text};

use crate::color::outcome_color;
use crate::data::filter::{AggregateKey, AggregateResult};
use crate::data::model::{PayloadRange, SiteSelection};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Chart titles
// ---------------------------------------------------------------------------

pub fn aggregate_title(selection: &SiteSelection) -> String {
    match selection {
        SiteSelection::AllSites => "Total Success Launches By Site".to_string(),
        SiteSelection::Site(id) => format!("Total Success Launches for site {id}"),
    }
}

pub fn scatter_title(selection: &SiteSelection, range: &PayloadRange) -> String {
    let scope = match selection {
        SiteSelection::AllSites => "all Sites".to_string(),
        SiteSelection::Site(id) => format!("site {id}"),
    };
    format!(
        "Correlation between Payload and Success for {scope} (Range: {} - {} kg)",
        range.low(),
        range.high()
    )
}

// ---------------------------------------------------------------------------
// Pie geometry
// ---------------------------------------------------------------------------

/// One wedge of the breakdown chart. Angles in radians, drawn clockwise from
/// twelve o'clock, so `end < start`.
#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub key: AggregateKey,
    pub count: usize,
    pub fraction: f64,
    pub start: f64,
    pub end: f64,
}

/// Lay out the non-zero entries of an aggregate as wedges of a unit circle.
/// An aggregate with no counts yields no slices.
pub fn pie_slices(aggregate: &AggregateResult) -> Vec<PieSlice> {
    let total = aggregate.total();
    if total == 0 {
        return Vec::new();
    }

    let mut start = FRAC_PI_2;
    aggregate
        .entries()
        .iter()
        .filter(|(_, count)| *count > 0)
        .map(|(key, count)| {
            let fraction = *count as f64 / total as f64;
            let end = start - fraction * TAU;
            let slice = PieSlice {
                key: key.clone(),
                count: *count,
                fraction,
                start,
                end,
            };
            start = end;
            slice
        })
        .collect()
}

fn wedge(slice: &PieSlice) -> PlotPoints<'static> {
    let steps = ((slice.fraction * 128.0).ceil() as usize).max(2);
    std::iter::once([0.0, 0.0])
        .chain((0..=steps).map(|i| {
            let a = slice.start + (slice.end - slice.start) * i as f64 / steps as f64;
            [a.cos(), a.sin()]
        }))
        .collect()
}

// ---------------------------------------------------------------------------
// Aggregate (pie) chart
// ---------------------------------------------------------------------------

/// Render the success breakdown for the current site selection.
pub fn aggregate_chart(ui: &mut Ui, state: &AppState, height: f32) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(aggregate_title(state.controls.selection()));
    });

    let slices = pie_slices(&state.aggregate);
    if slices.is_empty() {
        let message = if state.aggregate.is_empty() {
            "No launches for the current selection"
        } else {
            "No successful launches for the current selection"
        };
        placeholder(ui, height, message);
        return;
    }

    let color_of = |key: &AggregateKey| match key {
        AggregateKey::Site(id) => state.site_colors.color_for(id.as_str()),
        AggregateKey::Outcome(o) => outcome_color(*o),
    };

    Plot::new("aggregate_plot")
        .legend(Legend::default())
        .height(height)
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .show_x(false)
        .show_y(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            for slice in &slices {
                let label = format!("{} ({})", slice.key.label(), slice.count);
                plot_ui.polygon(
                    Polygon::new(wedge(slice))
                        .name(label)
                        .fill_color(color_of(&slice.key))
                        .stroke(Stroke::new(1.0, Color32::WHITE)),
                );

                let mid = (slice.start + slice.end) / 2.0;
                plot_ui.text(Text::new(
                    PlotPoint::new(0.65 * mid.cos(), 0.65 * mid.sin()),
                    RichText::new(format!("{:.1}%", slice.fraction * 100.0))
                        .color(Color32::WHITE)
                        .strong(),
                ));
            }
        });
}

// ---------------------------------------------------------------------------
// Scatter chart
// ---------------------------------------------------------------------------

/// Render payload mass against outcome class, one series per booster category.
pub fn scatter_chart(ui: &mut Ui, state: &AppState, height: f32) {
    let range = state.controls.range();
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(scatter_title(state.controls.selection(), &range));
        if state.scatter.is_empty() {
            ui.label(
                RichText::new("No launches in the selected payload range")
                    .italics()
                    .color(Color32::GRAY),
            );
        }
    });

    Plot::new("scatter_plot")
        .legend(Legend::default())
        .height(height)
        .x_axis_label("Payload Mass (kg)")
        .y_axis_label("class")
        .include_x(range.low())
        .include_x(range.high())
        .include_y(-0.25)
        .include_y(1.25)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for category in state.dataset.booster_categories() {
                let points: PlotPoints = state
                    .scatter
                    .by_category(category)
                    .map(|p| [p.payload_mass, p.outcome.as_class()])
                    .collect();
                if points.points().is_empty() {
                    continue;
                }
                plot_ui.points(
                    Points::new(points)
                        .name(category)
                        .color(state.booster_colors.color_for(category))
                        .shape(MarkerShape::Circle)
                        .filled(true)
                        .radius(5.0),
                );
            }
        });
}

fn placeholder(ui: &mut Ui, height: f32, message: &str) {
    ui.allocate_ui(egui::vec2(ui.available_width(), height), |ui: &mut Ui| {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label(RichText::new(message).italics().color(Color32::GRAY));
        });
    });
}
