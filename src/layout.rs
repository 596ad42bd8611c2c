use crate::data::filter::{PayloadRange, ALL_SITES};
use crate::data::model::LaunchDataset;

// Control and container identifiers. Callbacks are keyed by these.
pub const SITE_DROPDOWN: &str = "site-dropdown";
pub const PAYLOAD_SLIDER: &str = "payload-slider";
pub const PIE_CHART: &str = "success-pie-chart";
pub const SCATTER_CHART: &str = "success-payload-scatter-chart";

pub const PAYLOAD_MIN: f64 = 0.0;
pub const PAYLOAD_MAX: f64 = 10000.0;
pub const PAYLOAD_STEP: f64 = 500.0;

/// One dropdown entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteOption {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SiteDropdown {
    pub id: &'static str,
    pub options: Vec<SiteOption>,
    pub default_value: String,
    pub placeholder: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RangeSlider {
    pub id: &'static str,
    pub caption: &'static str,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    /// Tick positions with their labels.
    pub marks: Vec<(f64, String)>,
    pub default_value: PayloadRange,
}

/// Static widget tree of the page, top to bottom.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardLayout {
    pub heading: &'static str,
    pub site_dropdown: SiteDropdown,
    pub pie_container: &'static str,
    pub payload_slider: RangeSlider,
    pub scatter_container: &'static str,
}

impl DashboardLayout {
    /// Build the layout from the loaded dataset. Called once at startup.
    pub fn build(dataset: &LaunchDataset) -> Self {
        let options = std::iter::once(SiteOption {
            label: "All".to_string(),
            value: ALL_SITES.to_string(),
        })
        .chain(dataset.sites().iter().map(|site| SiteOption {
            label: site.clone(),
            value: site.clone(),
        }))
        .collect();

        // Labels at 0, 500, ..., 9500; the upper bound itself is unlabeled.
        let n_marks = ((PAYLOAD_MAX - PAYLOAD_MIN) / PAYLOAD_STEP) as usize;
        let marks = (0..n_marks)
            .map(|i| {
                let v = PAYLOAD_MIN + i as f64 * PAYLOAD_STEP;
                (v, format!("{v}"))
            })
            .collect();

        DashboardLayout {
            heading: "SpaceX Launch Records Dashboard",
            site_dropdown: SiteDropdown {
                id: SITE_DROPDOWN,
                options,
                default_value: ALL_SITES.to_string(),
                placeholder: "Select a Launch Site",
            },
            pie_container: PIE_CHART,
            payload_slider: RangeSlider {
                id: PAYLOAD_SLIDER,
                caption: "Payload range (Kg):",
                min: PAYLOAD_MIN,
                max: PAYLOAD_MAX,
                step: PAYLOAD_STEP,
                marks,
                default_value: PayloadRange::of_dataset(dataset),
            },
            scatter_container: SCATTER_CHART,
        }
    }
}
