use std::collections::BTreeMap;
use std::sync::Arc;

use crate::chart::ChartSpec;
use crate::data::filter::{PayloadRange, SiteSelection};
use crate::data::model::LaunchDataset;
use crate::engine::{payload_scatter, success_proportion};
use crate::layout::{DashboardLayout, PAYLOAD_SLIDER, PIE_CHART, SCATTER_CHART, SITE_DROPDOWN};

// ---------------------------------------------------------------------------
// Control values and events
// ---------------------------------------------------------------------------

/// Current values of the input controls.
#[derive(Debug, Clone, PartialEq)]
pub struct Controls {
    pub site: SiteSelection,
    pub payload: PayloadRange,
}

/// A user interaction with one input control.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlEvent {
    /// Raw dropdown value, `ALL` or a site name.
    SiteChanged(String),
    PayloadChanged(PayloadRange),
}

impl ControlEvent {
    pub fn control_id(&self) -> &'static str {
        match self {
            ControlEvent::SiteChanged(_) => SITE_DROPDOWN,
            ControlEvent::PayloadChanged(_) => PAYLOAD_SLIDER,
        }
    }
}

// ---------------------------------------------------------------------------
// Callback table
// ---------------------------------------------------------------------------

/// Recomputes one chart container whenever any of its inputs change.
struct Callback {
    output: &'static str,
    inputs: &'static [&'static str],
    compute: fn(&LaunchDataset, &Controls) -> ChartSpec,
}

static CALLBACKS: [Callback; 2] = [
    Callback {
        output: PIE_CHART,
        inputs: &[SITE_DROPDOWN],
        compute: pie_figure,
    },
    Callback {
        output: SCATTER_CHART,
        inputs: &[SITE_DROPDOWN, PAYLOAD_SLIDER],
        compute: scatter_figure,
    },
];

fn pie_figure(dataset: &LaunchDataset, controls: &Controls) -> ChartSpec {
    success_proportion(dataset, &controls.site)
}

fn scatter_figure(dataset: &LaunchDataset, controls: &Controls) -> ChartSpec {
    payload_scatter(dataset, &controls.site, controls.payload)
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    dataset: Arc<LaunchDataset>,

    /// Static page description, built once.
    pub layout: DashboardLayout,

    controls: Controls,

    /// Latest spec per chart container id.
    charts: BTreeMap<&'static str, ChartSpec>,

    /// Status line shown in the top bar.
    pub status_message: Option<String>,
}

impl AppState {
    /// Build the layout, seed the controls from its defaults and compute
    /// every chart once.
    pub fn new(dataset: Arc<LaunchDataset>) -> Self {
        let layout = DashboardLayout::build(&dataset);
        let controls = Controls {
            site: SiteSelection::from_value(&layout.site_dropdown.default_value),
            payload: layout.payload_slider.default_value,
        };
        let charts = CALLBACKS
            .iter()
            .map(|cb| (cb.output, (cb.compute)(&dataset, &controls)))
            .collect();

        AppState {
            dataset,
            layout,
            controls,
            charts,
            status_message: None,
        }
    }

    pub fn dataset(&self) -> &LaunchDataset {
        &self.dataset
    }

    pub fn controls(&self) -> &Controls {
        &self.controls
    }

    pub fn chart(&self, container: &str) -> Option<&ChartSpec> {
        self.charts.get(container)
    }

    /// Apply an event and rerun the callbacks listening to its control.
    /// Returns the ids of the containers that were recomputed.
    pub fn dispatch(&mut self, event: ControlEvent) -> Vec<&'static str> {
        let control = event.control_id();
        match event {
            ControlEvent::SiteChanged(value) => {
                let site = SiteSelection::from_value(&value);
                if let SiteSelection::Site(name) = &site {
                    if !self.dataset.has_site(name) {
                        log::debug!("unknown launch site {name:?}, charts will be empty");
                    }
                }
                self.controls.site = site;
            }
            ControlEvent::PayloadChanged(range) => {
                self.controls.payload = range;
            }
        }

        let mut updated = Vec::new();
        for cb in CALLBACKS.iter().filter(|cb| cb.inputs.contains(&control)) {
            let spec = (cb.compute)(&self.dataset, &self.controls);
            log::debug!(
                "{control} -> {}: {:?} '{}' ({} items)",
                cb.output,
                spec.kind(),
                spec.title,
                spec.len()
            );
            self.charts.insert(cb.output, spec);
            updated.push(cb.output);
        }
        updated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::ChartKind;
    use crate::data::model::{LaunchRecord, Outcome};

    fn state() -> AppState {
        let ds = LaunchDataset::from_records(vec![
            LaunchRecord::new("A", 500.0, Outcome::Success, "FT"),
            LaunchRecord::new("A", 9000.0, Outcome::Failure, "v1.1"),
            LaunchRecord::new("B", 3000.0, Outcome::Success, "B4"),
        ])
        .unwrap();
        AppState::new(Arc::new(ds))
    }

    #[test]
    fn initial_state_renders_both_charts_for_all_sites() {
        let st = state();
        assert_eq!(st.controls().site, SiteSelection::All);
        assert_eq!(st.controls().payload, PayloadRange::new(500.0, 9000.0));

        let pie = st.chart(PIE_CHART).unwrap();
        assert_eq!(pie.kind(), ChartKind::Pie);
        assert_eq!(pie.len(), 2);

        // Default range is [min, max] with exclusive bounds, so the two
        // extreme payloads are left out.
        let scatter = st.chart(SCATTER_CHART).unwrap();
        assert_eq!(scatter.kind(), ChartKind::Scatter);
        assert_eq!(scatter.len(), 1);
    }

    #[test]
    fn site_change_recomputes_both_charts() {
        let mut st = state();
        let updated = st.dispatch(ControlEvent::SiteChanged("A".to_string()));
        assert_eq!(updated, vec![PIE_CHART, SCATTER_CHART]);
        assert_eq!(
            st.chart(PIE_CHART).unwrap().title,
            "Total Success Launched for site: A"
        );
        assert_eq!(
            st.chart(SCATTER_CHART).unwrap().title,
            "Success rate depending on Payload for Site: A"
        );
    }

    #[test]
    fn slider_change_recomputes_only_scatter() {
        let mut st = state();
        let pie_before = st.chart(PIE_CHART).cloned();
        let updated = st.dispatch(ControlEvent::PayloadChanged(PayloadRange::new(0.0, 10000.0)));
        assert_eq!(updated, vec![SCATTER_CHART]);
        assert_eq!(st.chart(SCATTER_CHART).unwrap().len(), 3);
        assert_eq!(st.chart(PIE_CHART).cloned(), pie_before);
    }

    #[test]
    fn unknown_site_empties_charts_without_error() {
        let mut st = state();
        st.dispatch(ControlEvent::PayloadChanged(PayloadRange::new(0.0, 10000.0)));
        st.dispatch(ControlEvent::SiteChanged("Z".to_string()));
        assert!(st.chart(PIE_CHART).unwrap().is_empty());
        assert!(st.chart(SCATTER_CHART).unwrap().is_empty());
    }

    #[test]
    fn repeated_event_gives_identical_specs() {
        let mut st = state();
        st.dispatch(ControlEvent::SiteChanged("B".to_string()));
        let first = (
            st.chart(PIE_CHART).cloned(),
            st.chart(SCATTER_CHART).cloned(),
        );
        st.dispatch(ControlEvent::SiteChanged("B".to_string()));
        let second = (
            st.chart(PIE_CHART).cloned(),
            st.chart(SCATTER_CHART).cloned(),
        );
        assert_eq!(first, second);
    }
}
