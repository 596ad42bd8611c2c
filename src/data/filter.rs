use super::model::{LaunchDataset, LaunchRecord};

/// Dropdown value meaning "no site filter".
pub const ALL_SITES: &str = "ALL";

// ---------------------------------------------------------------------------
// Site selection
// ---------------------------------------------------------------------------

/// Typed form of the site dropdown value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum SiteSelection {
    #[default]
    All,
    Site(String),
}

impl SiteSelection {
    /// Parse a raw dropdown value. Anything other than the `ALL` sentinel is
    /// taken as a site name, known or not.
    pub fn from_value(value: &str) -> Self {
        if value == ALL_SITES {
            SiteSelection::All
        } else {
            SiteSelection::Site(value.to_string())
        }
    }

    /// The raw dropdown value.
    pub fn value(&self) -> &str {
        match self {
            SiteSelection::All => ALL_SITES,
            SiteSelection::Site(name) => name,
        }
    }

    pub fn matches(&self, record: &LaunchRecord) -> bool {
        match self {
            SiteSelection::All => true,
            SiteSelection::Site(name) => record.launch_site == *name,
        }
    }
}

// ---------------------------------------------------------------------------
// Payload range
// ---------------------------------------------------------------------------

/// Selected payload window in kilograms. Both bounds are exclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayloadRange {
    pub low: f64,
    pub high: f64,
}

impl PayloadRange {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// The range spanning the whole dataset, used as the initial selection.
    pub fn of_dataset(dataset: &LaunchDataset) -> Self {
        Self::new(dataset.min_payload(), dataset.max_payload())
    }

    /// Strict on both ends: a payload equal to either bound is excluded.
    /// An inverted range contains nothing.
    pub fn contains(&self, payload_kg: f64) -> bool {
        self.low < payload_kg && payload_kg < self.high
    }
}

// ---------------------------------------------------------------------------
// Row filters
// ---------------------------------------------------------------------------

/// Records at the selected site, in dataset order.
pub fn records_at_site<'a>(
    dataset: &'a LaunchDataset,
    site: &'a SiteSelection,
) -> impl Iterator<Item = &'a LaunchRecord> + 'a {
    dataset.records().iter().filter(move |r| site.matches(r))
}

/// Records at the selected site whose payload lies strictly inside `range`.
pub fn records_in_range<'a>(
    dataset: &'a LaunchDataset,
    site: &'a SiteSelection,
    range: PayloadRange,
) -> impl Iterator<Item = &'a LaunchRecord> + 'a {
    records_at_site(dataset, site).filter(move |r| range.contains(r.payload_mass_kg))
}
