//! Filter/aggregate operations that turn the control values into chart specs.
//!
//! Both are pure: the same dataset and inputs always give the same spec.

use crate::chart::{ChartData, ChartSpec, ScatterPoint, Slice};
use crate::data::filter::{records_at_site, records_in_range, PayloadRange, SiteSelection};
use crate::data::model::{
    LaunchDataset, Outcome, COL_BOOSTER_CATEGORY, COL_CLASS, COL_LAUNCH_SITE, COL_PAYLOAD_MASS,
};

const CLASS_COUNT_FIELD: &str = "class count";

// ---------------------------------------------------------------------------
// Success proportion (pie)
// ---------------------------------------------------------------------------

/// Pie of successes.
///
/// * `ALL`: one slice per site (first-seen order) valued by its success
///   count. Sites with no successes keep a zero slice.
/// * a site: one slice per outcome class valued by row count. Both classes
///   are listed so they sum to the site's launches; a site with no rows
///   gives no slices.
pub fn success_proportion(dataset: &LaunchDataset, site: &SiteSelection) -> ChartSpec {
    match site {
        SiteSelection::All => {
            let slices = dataset
                .sites()
                .iter()
                .map(|name| {
                    let successes = dataset
                        .records()
                        .iter()
                        .filter(|r| r.launch_site == *name)
                        .map(|r| r.outcome.as_f64())
                        .sum::<f64>();
                    Slice {
                        label: name.clone(),
                        value: successes,
                    }
                })
                .collect();

            ChartSpec {
                title: "Success Rate of All Launch Sites".to_string(),
                data: ChartData::Pie {
                    names_field: COL_LAUNCH_SITE.to_string(),
                    values_field: COL_CLASS.to_string(),
                    slices,
                },
            }
        }
        SiteSelection::Site(name) => {
            let (mut failures, mut successes) = (0usize, 0usize);
            for rec in records_at_site(dataset, site) {
                match rec.outcome {
                    Outcome::Failure => failures += 1,
                    Outcome::Success => successes += 1,
                }
            }

            let slices = if failures + successes == 0 {
                Vec::new()
            } else {
                [(Outcome::Failure, failures), (Outcome::Success, successes)]
                    .into_iter()
                    .map(|(outcome, count)| Slice {
                        label: outcome.to_string(),
                        value: count as f64,
                    })
                    .collect()
            };

            ChartSpec {
                title: format!("Total Success Launched for site: {name}"),
                data: ChartData::Pie {
                    names_field: COL_CLASS.to_string(),
                    values_field: CLASS_COUNT_FIELD.to_string(),
                    slices,
                },
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Payload vs. outcome (scatter)
// ---------------------------------------------------------------------------

/// Scatter of outcome against payload for records strictly inside `range`,
/// colored by booster version category.
pub fn payload_scatter(
    dataset: &LaunchDataset,
    site: &SiteSelection,
    range: PayloadRange,
) -> ChartSpec {
    let points = records_in_range(dataset, site, range)
        .map(|r| ScatterPoint {
            x: r.payload_mass_kg,
            y: r.outcome.as_f64(),
            category: r.booster_category.clone(),
        })
        .collect();

    let title = match site {
        SiteSelection::All => "Success rate depending on Payload for all Sites".to_string(),
        SiteSelection::Site(name) => {
            format!("Success rate depending on Payload for Site: {name}")
        }
    };

    ChartSpec {
        title,
        data: ChartData::Scatter {
            x_field: COL_PAYLOAD_MASS.to_string(),
            y_field: COL_CLASS.to_string(),
            color_field: COL_BOOSTER_CATEGORY.to_string(),
            points,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::LaunchRecord;

    fn scenario() -> LaunchDataset {
        LaunchDataset::from_records(vec![
            LaunchRecord::new("A", 500.0, Outcome::Success, "FT"),
            LaunchRecord::new("A", 9000.0, Outcome::Failure, "v1.1"),
            LaunchRecord::new("B", 3000.0, Outcome::Success, "B4"),
        ])
        .unwrap()
    }

    fn slices(spec: &ChartSpec) -> Vec<(String, f64)> {
        match &spec.data {
            ChartData::Pie { slices, .. } => {
                slices.iter().map(|s| (s.label.clone(), s.value)).collect()
            }
            other => panic!("expected pie data, got {other:?}"),
        }
    }

    fn points(spec: &ChartSpec) -> Vec<ScatterPoint> {
        match &spec.data {
            ChartData::Scatter { points, .. } => points.clone(),
            other => panic!("expected scatter data, got {other:?}"),
        }
    }

    fn site(name: &str) -> SiteSelection {
        SiteSelection::from_value(name)
    }

    #[test]
    fn all_sites_sums_successes_per_site() {
        let spec = success_proportion(&scenario(), &SiteSelection::All);
        assert_eq!(spec.title, "Success Rate of All Launch Sites");
        assert_eq!(
            slices(&spec),
            vec![("A".to_string(), 1.0), ("B".to_string(), 1.0)]
        );
    }

    #[test]
    fn site_without_successes_keeps_zero_slice() {
        let ds = LaunchDataset::from_records(vec![
            LaunchRecord::new("A", 500.0, Outcome::Success, "FT"),
            LaunchRecord::new("C", 800.0, Outcome::Failure, "FT"),
            LaunchRecord::new("C", 900.0, Outcome::Failure, "FT"),
        ])
        .unwrap();
        let spec = success_proportion(&ds, &SiteSelection::All);
        assert_eq!(
            slices(&spec),
            vec![("A".to_string(), 1.0), ("C".to_string(), 0.0)]
        );
    }

    #[test]
    fn single_site_splits_by_class() {
        let spec = success_proportion(&scenario(), &site("A"));
        assert_eq!(spec.title, "Total Success Launched for site: A");
        assert_eq!(
            slices(&spec),
            vec![("0".to_string(), 1.0), ("1".to_string(), 1.0)]
        );
    }

    #[test]
    fn single_site_lists_both_classes_summing_to_row_count() {
        let spec = success_proportion(&scenario(), &site("B"));
        let s = slices(&spec);
        assert_eq!(s.len(), 2);
        assert_eq!(s[0], ("0".to_string(), 0.0));
        assert_eq!(s.iter().map(|(_, v)| v).sum::<f64>(), 1.0);
    }

    #[test]
    fn full_range_keeps_interior_points() {
        let spec = payload_scatter(&scenario(), &SiteSelection::All, PayloadRange::new(0.0, 10000.0));
        assert_eq!(spec.title, "Success rate depending on Payload for all Sites");
        assert_eq!(points(&spec).len(), 3);
    }

    #[test]
    fn narrowed_range_excludes_outer_points() {
        let spec = payload_scatter(&scenario(), &SiteSelection::All, PayloadRange::new(600.0, 8999.0));
        let pts = points(&spec);
        assert_eq!(
            pts,
            vec![ScatterPoint {
                x: 3000.0,
                y: 1.0,
                category: "B4".to_string()
            }]
        );
    }

    #[test]
    fn boundary_payloads_are_excluded() {
        let ds = LaunchDataset::from_records(vec![
            LaunchRecord::new("A", 0.0, Outcome::Success, "FT"),
            LaunchRecord::new("A", 10000.0, Outcome::Success, "FT"),
            LaunchRecord::new("A", 5000.0, Outcome::Failure, "FT"),
        ])
        .unwrap();
        let spec = payload_scatter(&ds, &SiteSelection::All, PayloadRange::new(0.0, 10000.0));
        assert_eq!(points(&spec).len(), 1);
    }

    #[test]
    fn scatter_filters_by_site() {
        let spec = payload_scatter(&scenario(), &site("A"), PayloadRange::new(0.0, 10000.0));
        assert_eq!(spec.title, "Success rate depending on Payload for Site: A");
        let xs: Vec<f64> = points(&spec).iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![500.0, 9000.0]);
    }

    #[test]
    fn unknown_site_yields_empty_charts() {
        let ds = scenario();
        let pie = success_proportion(&ds, &site("Z"));
        let scatter = payload_scatter(&ds, &site("Z"), PayloadRange::new(0.0, 10000.0));
        assert!(pie.is_empty());
        assert!(scatter.is_empty());
    }

    #[test]
    fn inverted_range_yields_empty_scatter() {
        let spec = payload_scatter(&scenario(), &SiteSelection::All, PayloadRange::new(8000.0, 1000.0));
        assert!(spec.is_empty());
    }

    #[test]
    fn operations_are_idempotent() {
        let ds = scenario();
        let range = PayloadRange::new(100.0, 9500.0);
        assert_eq!(
            success_proportion(&ds, &SiteSelection::All),
            success_proportion(&ds, &SiteSelection::All)
        );
        assert_eq!(
            payload_scatter(&ds, &site("A"), range),
            payload_scatter(&ds, &site("A"), range)
        );
    }
}
