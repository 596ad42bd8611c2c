use std::fmt;

use serde::{Deserialize, Serialize};

use super::loader::LoadError;

/// Column names the input file must carry, exactly as written by the
/// upstream launch-records notebook.
pub const COL_LAUNCH_SITE: &str = "Launch Site";
pub const COL_PAYLOAD_MASS: &str = "Payload Mass (kg)";
pub const COL_CLASS: &str = "class";
pub const COL_BOOSTER_CATEGORY: &str = "Booster Version Category";

pub const REQUIRED_COLUMNS: [&str; 4] = [
    COL_LAUNCH_SITE,
    COL_PAYLOAD_MASS,
    COL_CLASS,
    COL_BOOSTER_CATEGORY,
];

// ---------------------------------------------------------------------------
// Outcome – the binary `class` column
// ---------------------------------------------------------------------------

/// Launch outcome as stored in the `class` column: 1 = success, 0 = failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "f64")]
pub enum Outcome {
    Failure,
    Success,
}

impl Outcome {
    pub fn as_u8(self) -> u8 {
        match self {
            Outcome::Failure => 0,
            Outcome::Success => 1,
        }
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.as_u8())
    }
}

impl From<Outcome> for u8 {
    fn from(o: Outcome) -> u8 {
        o.as_u8()
    }
}

/// Read through `f64` so `1`, `1.0` and a float-cast parquet column all
/// parse the same way.
impl TryFrom<f64> for Outcome {
    type Error = String;

    fn try_from(v: f64) -> Result<Self, Self::Error> {
        if v == 0.0 {
            Ok(Outcome::Failure)
        } else if v == 1.0 {
            Ok(Outcome::Success)
        } else {
            Err(format!("class must be 0 or 1, got {v}"))
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the source table
// ---------------------------------------------------------------------------

/// A single launch attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaunchRecord {
    #[serde(rename = "Launch Site")]
    pub launch_site: String,
    #[serde(rename = "Payload Mass (kg)")]
    pub payload_mass_kg: f64,
    #[serde(rename = "class")]
    pub outcome: Outcome,
    #[serde(rename = "Booster Version Category")]
    pub booster_category: String,
}

impl LaunchRecord {
    pub fn new(site: &str, payload_mass_kg: f64, outcome: Outcome, booster: &str) -> Self {
        Self {
            launch_site: site.to_string(),
            payload_mass_kg,
            outcome,
            booster_category: booster.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// LaunchDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed dataset with its derived summary values.
///
/// Built once at startup and shared read-only afterwards; there are no
/// mutating methods.
#[derive(Debug, Clone)]
pub struct LaunchDataset {
    records: Vec<LaunchRecord>,
    /// Distinct launch sites in first-seen order.
    sites: Vec<String>,
    min_payload: f64,
    max_payload: f64,
}

impl LaunchDataset {
    /// Validate the records and compute site list and payload bounds.
    pub fn from_records(records: Vec<LaunchRecord>) -> Result<Self, LoadError> {
        if records.is_empty() {
            return Err(LoadError::Empty);
        }

        let mut sites: Vec<String> = Vec::new();
        let mut min_payload = f64::INFINITY;
        let mut max_payload = f64::NEG_INFINITY;

        for (row, rec) in records.iter().enumerate() {
            let mass = rec.payload_mass_kg;
            if !mass.is_finite() || mass < 0.0 {
                return Err(LoadError::InvalidValue {
                    row,
                    message: format!("payload mass must be a non-negative number, got {mass}"),
                });
            }
            min_payload = min_payload.min(mass);
            max_payload = max_payload.max(mass);

            if !sites.iter().any(|s| s == &rec.launch_site) {
                sites.push(rec.launch_site.clone());
            }
        }

        Ok(LaunchDataset {
            records,
            sites,
            min_payload,
            max_payload,
        })
    }

    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    pub fn sites(&self) -> &[String] {
        &self.sites
    }

    pub fn has_site(&self, site: &str) -> bool {
        self.sites.iter().any(|s| s == site)
    }

    pub fn min_payload(&self) -> f64 {
        self.min_payload
    }

    pub fn max_payload(&self) -> f64 {
        self.max_payload
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }
}
