use std::collections::HashSet;
use std::fmt;

use super::error::DataLoadError;

/// Label shown for [`SiteSelection::AllSites`] in the site selector.
pub const ALL_SITES_LABEL: &str = "All Sites";

// ---------------------------------------------------------------------------
// SiteId – a launch-site identifier
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SiteId(String);

impl SiteId {
    pub fn new(id: impl Into<String>) -> Self {
        SiteId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SiteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SiteId {
    fn from(s: &str) -> Self {
        SiteId(s.to_string())
    }
}

// ---------------------------------------------------------------------------
// Outcome – the `class` column
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Outcome {
    Success,
    Failure,
}

impl Outcome {
    /// Decode the source's 0/1 class value. Anything else is rejected.
    pub fn from_class(class: f64) -> Option<Self> {
        if class == 1.0 {
            Some(Outcome::Success)
        } else if class == 0.0 {
            Some(Outcome::Failure)
        } else {
            None
        }
    }

    /// Numeric class used as the scatter chart's y coordinate.
    pub fn as_class(self) -> f64 {
        match self {
            Outcome::Success => 1.0,
            Outcome::Failure => 0.0,
        }
    }

    pub fn is_success(self) -> bool {
        self == Outcome::Success
    }

    pub fn label(self) -> &'static str {
        match self {
            Outcome::Success => "success",
            Outcome::Failure => "failure",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the dataset
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct LaunchRecord {
    pub site: SiteId,
    /// Payload mass in kilograms.
    pub payload_mass: f64,
    pub booster_category: String,
    pub outcome: Outcome,
}

impl LaunchRecord {
    pub fn new(
        site: impl Into<String>,
        payload_mass: f64,
        booster_category: impl Into<String>,
        outcome: Outcome,
    ) -> Self {
        LaunchRecord {
            site: SiteId::new(site),
            payload_mass,
            booster_category: booster_category.into(),
            outcome,
        }
    }
}

// ---------------------------------------------------------------------------
// Selection types
// ---------------------------------------------------------------------------

/// Which launch sites the dashboard is looking at.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SiteSelection {
    #[default]
    AllSites,
    Site(SiteId),
}

impl SiteSelection {
    pub fn label(&self) -> &str {
        match self {
            SiteSelection::AllSites => ALL_SITES_LABEL,
            SiteSelection::Site(id) => id.as_str(),
        }
    }

    pub fn matches(&self, site: &SiteId) -> bool {
        match self {
            SiteSelection::AllSites => true,
            SiteSelection::Site(id) => id == site,
        }
    }
}

impl fmt::Display for SiteSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Smallest and largest payload mass present in a dataset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayloadBounds {
    pub min: f64,
    pub max: f64,
}

/// Closed payload interval `[low, high]` with `low <= high`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayloadRange {
    low: f64,
    high: f64,
}

impl PayloadRange {
    /// Strict constructor: `None` if either end is NaN or `low > high`.
    #[cfg(test)]
    pub fn new(low: f64, high: f64) -> Option<Self> {
        if low.is_nan() || high.is_nan() || low > high {
            return None;
        }
        Some(PayloadRange { low, high })
    }

    /// The whole span of the dataset.
    pub fn full(bounds: PayloadBounds) -> Self {
        PayloadRange {
            low: bounds.min,
            high: bounds.max,
        }
    }

    /// Build a range from arbitrary user input, clamped to `bounds`.
    ///
    /// A reversed pair is swapped and a NaN end falls back to the matching bound,
    /// so the result is always renderable.
    pub fn clamped(low: f64, high: f64, bounds: PayloadBounds) -> Self {
        let low = if low.is_nan() { bounds.min } else { low };
        let high = if high.is_nan() { bounds.max } else { high };
        let (low, high) = if low > high { (high, low) } else { (low, high) };
        PayloadRange {
            low: low.clamp(bounds.min, bounds.max),
            high: high.clamp(bounds.min, bounds.max),
        }
    }

    pub fn low(&self) -> f64 {
        self.low
    }

    pub fn high(&self) -> f64 {
        self.high
    }

    /// Inclusive at both ends, no tolerance.
    pub fn contains(&self, payload_mass: f64) -> bool {
        self.low <= payload_mass && payload_mass <= self.high
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded record set
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed enumerations and bounds.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<LaunchRecord>,
    /// Distinct sites in first-seen order.
    sites: Vec<SiteId>,
    /// Distinct booster categories in first-seen order.
    booster_categories: Vec<String>,
    bounds: PayloadBounds,
}

impl Dataset {
    /// Validate the records and build the site enumeration and payload bounds.
    pub fn from_records(records: Vec<LaunchRecord>) -> Result<Self, DataLoadError> {
        if records.is_empty() {
            return Err(DataLoadError::Empty);
        }

        let mut sites = Vec::new();
        let mut seen_sites = HashSet::new();
        let mut booster_categories = Vec::new();
        let mut seen_categories = HashSet::new();
        let mut bounds = PayloadBounds {
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        };

        for (row, rec) in records.iter().enumerate() {
            if rec.site.as_str().trim().is_empty() {
                return Err(DataLoadError::EmptySite { row });
            }
            if !rec.payload_mass.is_finite() || rec.payload_mass < 0.0 {
                return Err(DataLoadError::InvalidPayload {
                    row,
                    value: rec.payload_mass.to_string(),
                });
            }
            if seen_sites.insert(rec.site.clone()) {
                sites.push(rec.site.clone());
            }
            if seen_categories.insert(rec.booster_category.clone()) {
                booster_categories.push(rec.booster_category.clone());
            }
            bounds.min = bounds.min.min(rec.payload_mass);
            bounds.max = bounds.max.max(rec.payload_mass);
        }

        Ok(Dataset {
            records,
            sites,
            booster_categories,
            bounds,
        })
    }

    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    pub fn sites(&self) -> &[SiteId] {
        &self.sites
    }

    pub fn booster_categories(&self) -> &[String] {
        &self.booster_categories
    }

    pub fn bounds(&self) -> PayloadBounds {
        self.bounds
    }

    /// Number of launch records.
    pub fn len(&self) -> usize {
        self.records.len()
    }
}
