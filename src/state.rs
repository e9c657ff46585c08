use crate::color::ColorMap;
use crate::config::DashboardConfig;
use crate::data::error::InvalidSelectionError;
use crate::data::filter::{compute_aggregate, compute_scatter, AggregateResult, ScatterResult};
use crate::data::model::{Dataset, PayloadBounds, PayloadRange, SiteId, SiteSelection};

// ---------------------------------------------------------------------------
// Control state: the two live selector values
// ---------------------------------------------------------------------------

/// Current site selection and payload range, validated against one dataset.
#[derive(Debug, Clone)]
pub struct ControlState {
    selection: SiteSelection,
    range: PayloadRange,
    sites: Vec<SiteId>,
    bounds: PayloadBounds,
}

impl ControlState {
    /// `AllSites` and the full payload bounds, or the given initial sub-range
    /// (each end clamped, a missing end taken from the bounds).
    pub fn new(dataset: &Dataset, initial_range: (Option<f64>, Option<f64>)) -> Self {
        let bounds = dataset.bounds();
        let (low, high) = initial_range;
        Self {
            selection: SiteSelection::AllSites,
            range: PayloadRange::clamped(
                low.unwrap_or(bounds.min),
                high.unwrap_or(bounds.max),
                bounds,
            ),
            sites: dataset.sites().to_vec(),
            bounds,
        }
    }

    pub fn selection(&self) -> &SiteSelection {
        &self.selection
    }

    pub fn range(&self) -> PayloadRange {
        self.range
    }

    pub fn bounds(&self) -> PayloadBounds {
        self.bounds
    }

    /// Site options offered by the selector, after "All Sites".
    pub fn sites(&self) -> &[SiteId] {
        &self.sites
    }

    /// Select one site by id. Unknown ids are rejected and the previous
    /// selection is kept.
    pub fn select_site(&mut self, id: &str) -> Result<(), InvalidSelectionError> {
        let site = self
            .sites
            .iter()
            .find(|s| s.as_str() == id)
            .ok_or_else(|| InvalidSelectionError(id.to_string()))?;
        self.selection = SiteSelection::Site(site.clone());
        Ok(())
    }

    pub fn select_all_sites(&mut self) {
        self.selection = SiteSelection::AllSites;
    }

    pub fn select(&mut self, selection: SiteSelection) -> Result<(), InvalidSelectionError> {
        match selection {
            SiteSelection::AllSites => {
                self.select_all_sites();
                Ok(())
            }
            SiteSelection::Site(id) => self.select_site(id.as_str()),
        }
    }

    /// Replace the payload range; values outside the dataset bounds are clamped.
    /// Returns `true` when an end had to be clamped or replaced. A reversed
    /// pair inside the bounds is only reordered and returns `false`.
    pub fn set_range(&mut self, low: f64, high: f64) -> bool {
        self.range = PayloadRange::clamped(low, high, self.bounds);
        let (low, high) = if low > high { (high, low) } else { (low, high) };
        self.range.low() != low || self.range.high() != high
    }

    pub fn reset_range(&mut self) {
        self.range = PayloadRange::full(self.bounds);
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// Every control mutation goes through this type and ends in [`AppState::refresh`],
/// so the projections always reflect the latest selection and range.
pub struct AppState {
    /// Loaded dataset, read-only after startup.
    pub dataset: Dataset,

    pub controls: ControlState,

    /// Breakdown for the pie chart (recomputed on every control change).
    pub aggregate: AggregateResult,

    /// Matching records for the scatter chart (recomputed on every control change).
    pub scatter: ScatterResult,

    /// Pie slice colours in the all-sites view.
    pub site_colors: ColorMap,

    /// Scatter series colours.
    pub booster_colors: ColorMap,

    /// Payload slider step in kg (0 = continuous).
    pub payload_step: f64,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(dataset: Dataset, config: &DashboardConfig) -> Self {
        let controls = ControlState::new(&dataset, config.initial_range);
        let site_colors = ColorMap::new(dataset.sites().iter().map(SiteId::as_str));
        let booster_colors =
            ColorMap::new(dataset.booster_categories().iter().map(String::as_str));

        let mut state = Self {
            dataset,
            controls,
            aggregate: AggregateResult::default(),
            scatter: ScatterResult::default(),
            site_colors,
            booster_colors,
            payload_step: config.payload_step,
            status_message: None,
        };
        state.refresh();
        state
    }

    /// Recompute both projections from the current control values.
    pub fn refresh(&mut self) {
        let selection = self.controls.selection();
        let range = self.controls.range();
        self.aggregate = compute_aggregate(&self.dataset, selection);
        self.scatter = compute_scatter(&self.dataset, selection, &range);
        log::debug!(
            "selection '{selection}', range [{} - {}] kg: {} slices, {} points",
            range.low(),
            range.high(),
            self.aggregate.len(),
            self.scatter.len()
        );
    }

    /// Apply a site selector event. A rejected selection keeps the previous one
    /// and is reported in the status bar.
    pub fn select(&mut self, selection: SiteSelection) {
        match self.controls.select(selection) {
            Ok(()) => {
                self.status_message = None;
                self.refresh();
            }
            Err(e) => {
                log::warn!("{e}; keeping '{}'", self.controls.selection());
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Apply a payload range event.
    pub fn set_range(&mut self, low: f64, high: f64) {
        if self.controls.set_range(low, high) {
            let r = self.controls.range();
            log::warn!(
                "payload range [{low} - {high}] clamped to [{} - {}]",
                r.low(),
                r.high()
            );
        }
        self.refresh();
    }

    pub fn reset_range(&mut self) {
        self.controls.reset_range();
        self.refresh();
    }
}
