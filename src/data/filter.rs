use super::model::{Dataset, Outcome, PayloadRange, SiteId, SiteSelection};

// ---------------------------------------------------------------------------
// Aggregate projection: drives the breakdown (pie) chart
// ---------------------------------------------------------------------------

/// Category key of an aggregate slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AggregateKey {
    /// Success count of one site (all-sites view).
    Site(SiteId),
    /// Launch count of one outcome (single-site view).
    Outcome(Outcome),
}

impl AggregateKey {
    pub fn label(&self) -> &str {
        match self {
            AggregateKey::Site(id) => id.as_str(),
            AggregateKey::Outcome(o) => o.label(),
        }
    }
}

/// Ordered mapping from category key to count.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AggregateResult {
    entries: Vec<(AggregateKey, usize)>,
}

impl AggregateResult {
    pub fn entries(&self) -> &[(AggregateKey, usize)] {
        &self.entries
    }

    #[cfg(test)]
    pub fn get(&self, key: &AggregateKey) -> Option<usize> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, count)| *count)
    }

    /// Sum over all slices.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Count successes per site (all sites) or launches per outcome (one site).
///
/// * `AllSites` → one entry per site in enumeration order, value = success count
///   (zero-success sites included).
/// * `Site(S)` → `success` then `failure`, only outcomes that occur at `S`.
///
/// A selection matching no records yields an empty result.
pub fn compute_aggregate(dataset: &Dataset, selection: &SiteSelection) -> AggregateResult {
    let entries = match selection {
        SiteSelection::AllSites => dataset
            .sites()
            .iter()
            .map(|site| {
                let successes = dataset
                    .records()
                    .iter()
                    .filter(|r| &r.site == site && r.outcome.is_success())
                    .count();
                (AggregateKey::Site(site.clone()), successes)
            })
            .collect(),
        SiteSelection::Site(site) => {
            let mut successes = 0;
            let mut failures = 0;
            for rec in dataset.records().iter().filter(|r| &r.site == site) {
                match rec.outcome {
                    Outcome::Success => successes += 1,
                    Outcome::Failure => failures += 1,
                }
            }
            [(Outcome::Success, successes), (Outcome::Failure, failures)]
                .into_iter()
                .filter(|(_, count)| *count > 0)
                .map(|(o, count)| (AggregateKey::Outcome(o), count))
                .collect()
        }
    };
    AggregateResult { entries }
}

// ---------------------------------------------------------------------------
// Scatter projection: drives the payload / outcome correlation chart
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    /// Position of the source record in the dataset.
    pub index: usize,
    pub payload_mass: f64,
    pub outcome: Outcome,
    pub booster_category: String,
}

/// Records matching the current selection and payload range, in dataset order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScatterResult {
    points: Vec<ScatterPoint>,
}

impl ScatterResult {
    pub fn points(&self) -> &[ScatterPoint] {
        &self.points
    }

    /// Indices of the matching records.
    #[cfg(test)]
    pub fn indices(&self) -> Vec<usize> {
        self.points.iter().map(|p| p.index).collect()
    }

    /// Points of a single booster category, order preserved.
    pub fn by_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a ScatterPoint> {
        self.points
            .iter()
            .filter(move |p| p.booster_category == category)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Keep records with `payload_mass` inside `range` (inclusive) and, unless the
/// selection is `AllSites`, launched from the selected site.
pub fn compute_scatter(
    dataset: &Dataset,
    selection: &SiteSelection,
    range: &PayloadRange,
) -> ScatterResult {
    let points = dataset
        .records()
        .iter()
        .enumerate()
        .filter(|(_, r)| range.contains(r.payload_mass) && selection.matches(&r.site))
        .map(|(index, r)| ScatterPoint {
            index,
            payload_mass: r.payload_mass,
            outcome: r.outcome,
            booster_category: r.booster_category.clone(),
        })
        .collect();
    ScatterResult { points }
}
