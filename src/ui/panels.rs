use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::model::{PayloadBounds, SiteSelection, ALL_SITES_LABEL};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – selection controls
// ---------------------------------------------------------------------------

/// Render the site selector and the payload range controls.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Launch Site");
    ui.separator();
    site_selector(ui, state);

    ui.add_space(12.0);
    ui.heading("Payload range (Kg)");
    ui.separator();
    payload_range(ui, state);
}

fn site_selector(ui: &mut Ui, state: &mut AppState) {
    let current = state.controls.selection().clone();
    let mut chosen: Option<SiteSelection> = None;

    egui::ComboBox::from_id_salt("site_selector")
        .selected_text(current.label())
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            if ui
                .selectable_label(current == SiteSelection::AllSites, ALL_SITES_LABEL)
                .clicked()
            {
                chosen = Some(SiteSelection::AllSites);
            }
            for site in state.controls.sites() {
                let is_current = matches!(&current, SiteSelection::Site(id) if id == site);
                if ui.selectable_label(is_current, site.as_str()).clicked() {
                    chosen = Some(SiteSelection::Site(site.clone()));
                }
            }
        });

    if let Some(selection) = chosen.filter(|s| *s != current) {
        log::debug!("site selector: '{current}' -> '{selection}'");
        state.select(selection);
    }
}

fn payload_range(ui: &mut Ui, state: &mut AppState) {
    let bounds = state.controls.bounds();
    let range = state.controls.range();
    let step = state.payload_step;
    let (mut low, mut high) = (range.low(), range.high());

    let low_changed = ui.add(payload_slider(&mut low, bounds, "min")).changed();
    let high_changed = ui.add(payload_slider(&mut high, bounds, "max")).changed();
    if low_changed {
        low = snap_payload(low, bounds, step);
    }
    if high_changed {
        high = snap_payload(high, bounds, step);
    }

    // Dragging one handle past the other pushes it along.
    if low_changed && low > high {
        high = low;
    }
    if high_changed && high < low {
        low = high;
    }
    if low_changed || high_changed {
        state.set_range(low, high);
    }

    ui.horizontal(|ui: &mut Ui| {
        let r = state.controls.range();
        ui.label(format!("{} - {} kg", r.low(), r.high()));
        if ui.small_button("Reset").clicked() {
            state.reset_range();
        }
    });
}

fn payload_slider<'a>(value: &'a mut f64, bounds: PayloadBounds, text: &str) -> egui::Slider<'a> {
    egui::Slider::new(value, bounds.min..=bounds.max)
        .text(text)
        .suffix(" kg")
}

/// Round a slider value to the nearest multiple of `step` above `bounds.min`,
/// treating `bounds.max` as an extra stop so the top of the range is always
/// reachable. A non-positive step only clamps.
pub fn snap_payload(value: f64, bounds: PayloadBounds, step: f64) -> f64 {
    let value = value.clamp(bounds.min, bounds.max);
    if step <= 0.0 {
        return value;
    }
    let grid = (bounds.min + ((value - bounds.min) / step).round() * step).min(bounds.max);
    if bounds.max - value < (value - grid).abs() {
        bounds.max
    } else {
        grid
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the dashboard heading and dataset summary.
pub fn top_bar(ui: &mut Ui, state: &AppState) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.label(
            RichText::new("SpaceX Launch Records Dashboard")
                .size(28.0)
                .color(Color32::from_rgb(0x50, 0x3D, 0x36))
                .strong(),
        );
    });

    ui.horizontal(|ui: &mut Ui| {
        let successes = state
            .scatter
            .points()
            .iter()
            .filter(|p| p.outcome.is_success())
            .count();
        ui.label(format!(
            "{} launches loaded, {} shown ({successes} successful)",
            state.dataset.len(),
            state.scatter.len()
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: PayloadBounds = PayloadBounds { min: 0.0, max: 9400.0 };

    #[test]
    fn snaps_to_step_grid() {
        assert_eq!(snap_payload(2400.0, BOUNDS, 1000.0), 2000.0);
        assert_eq!(snap_payload(2600.0, BOUNDS, 1000.0), 3000.0);
        assert_eq!(snap_payload(9100.0, BOUNDS, 1000.0), 9000.0);
    }

    #[test]
    fn upper_bound_is_reachable_off_grid() {
        assert_eq!(snap_payload(9400.0, BOUNDS, 1000.0), 9400.0);
        assert_eq!(snap_payload(9300.0, BOUNDS, 1000.0), 9400.0);
    }

    #[test]
    fn never_leaves_bounds() {
        let bounds = PayloadBounds { min: 0.0, max: 9600.0 };
        assert_eq!(snap_payload(9600.0, bounds, 1000.0), 9600.0);
        assert_eq!(snap_payload(12_000.0, bounds, 1000.0), 9600.0);

        let bounds = PayloadBounds { min: 350.0, max: 9600.0 };
        assert_eq!(snap_payload(0.0, bounds, 1000.0), 350.0);
        assert_eq!(snap_payload(1200.0, bounds, 1000.0), 1350.0);
    }

    #[test]
    fn zero_step_only_clamps() {
        assert_eq!(snap_payload(1234.5, BOUNDS, 0.0), 1234.5);
        assert_eq!(snap_payload(-1.0, BOUNDS, 0.0), 0.0);
    }
}
