//! Recomputation entry points invoked by the UI whenever a control changes.
//!
//! Both are pure: the same dataset and selection always produce the same
//! chart, and a failure in one never affects the other.

use crate::chart::{build_proportion_chart, build_scatter_chart, ChartSpec};
use crate::data::aggregate::{aggregate_outcome_counts, extract_scatter_points, ScatterPoint};
use crate::data::error::AggregationError;
use crate::data::filter::{filter, filter_by_site};
use crate::data::model::{Dataset, FilterSelection};

/// Pie chart of successful launches. Driven by the site selector only; the
/// payload range does not narrow it.
pub fn success_pie_chart(
    dataset: &Dataset,
    selection: &FilterSelection,
) -> Result<ChartSpec, AggregationError> {
    let rows = filter_by_site(dataset, &selection.site);
    let pairs = aggregate_outcome_counts(&rows, &selection.site)?;
    log::debug!(
        "pie chart for {}: {} rows, {} slices",
        selection.site,
        rows.len(),
        pairs.len()
    );
    Ok(build_proportion_chart(pairs, &selection.site))
}

/// Payload vs outcome scatter for the selected site and payload range.
pub fn success_payload_scatter_chart(
    dataset: &Dataset,
    selection: &FilterSelection,
) -> Result<ChartSpec, AggregationError> {
    let rows = filter(dataset, selection);
    let points = extract_scatter_points(&rows).collect::<Result<Vec<ScatterPoint>, _>>()?;
    log::debug!(
        "scatter chart for {} in ({}, {}) kg: {} points",
        selection.site,
        selection.payload_range.low,
        selection.payload_range.high,
        points.len()
    );
    Ok(build_scatter_chart(points, &selection.site))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{ScatterChart, Slice};
    use crate::data::aggregate::SliceLabel;
    use crate::data::model::{LaunchRecord, SiteSelector};

    fn dataset() -> Dataset {
        Dataset::from_records(vec![
            LaunchRecord::new("CCAFS LC-40", 0.0, 0, "v1.0"),
            LaunchRecord::new("CCAFS LC-40", 525.0, 1, "v1.0"),
            LaunchRecord::new("VAFB SLC-4E", 500.0, 0, "v1.1"),
            LaunchRecord::new("KSC LC-39A", 2490.0, 1, "FT"),
            LaunchRecord::new("CCAFS LC-40", 9600.0, 1, "B5"),
            LaunchRecord::new("KSC LC-39A", 5300.0, 0, "FT"),
        ])
    }

    fn slice(label: SliceLabel, value: u64) -> Slice {
        Slice { label, value }
    }

    fn scatter(spec: ChartSpec) -> ScatterChart {
        match spec {
            ChartSpec::Scatter(c) => c,
            other => panic!("expected scatter, got {other:?}"),
        }
    }

    #[test]
    fn test_pie_all_sites() {
        let ds = dataset();
        let sel = FilterSelection::new(SiteSelector::All, 0.0, 10_000.0);
        let ChartSpec::Proportion(pie) = success_pie_chart(&ds, &sel).unwrap() else {
            panic!("expected a proportion chart");
        };
        assert_eq!(pie.title, "Total Success Launches by Site");
        assert_eq!(
            pie.slices,
            vec![
                slice(SliceLabel::Site("CCAFS LC-40".into()), 2),
                slice(SliceLabel::Site("VAFB SLC-4E".into()), 0),
                slice(SliceLabel::Site("KSC LC-39A".into()), 1),
            ]
        );
    }

    #[test]
    fn test_pie_ignores_payload_range() {
        let ds = dataset();
        let site = SiteSelector::Site("CCAFS LC-40".into());
        let wide = FilterSelection::new(site.clone(), 0.0, 10_000.0);
        let narrow = FilterSelection::new(site, 100.0, 200.0);
        let a = success_pie_chart(&ds, &wide).unwrap();
        let b = success_pie_chart(&ds, &narrow).unwrap();
        assert_eq!(a, b);
        let ChartSpec::Proportion(pie) = a else {
            panic!("expected a proportion chart");
        };
        assert_eq!(pie.title, "Total Success Launches for Site CCAFS LC-40");
        assert_eq!(
            pie.slices,
            vec![
                slice(SliceLabel::Outcome(0), 1),
                slice(SliceLabel::Outcome(1), 2),
            ]
        );
    }

    #[test]
    fn test_scatter_respects_site_and_range() {
        let ds = dataset();
        let sel = FilterSelection::new(SiteSelector::Site("KSC LC-39A".into()), 2490.0, 10_000.0);
        let chart = scatter(success_payload_scatter_chart(&ds, &sel).unwrap());
        assert_eq!(chart.point_count(), 1);
        assert_eq!(chart.series[0].points, vec![[5300.0, 0.0]]);
    }

    #[test]
    fn test_range_outside_bounds_is_empty_not_error() {
        let ds = dataset();
        let sel = FilterSelection::new(SiteSelector::All, ds.max_payload, ds.max_payload + 1000.0);
        let chart = success_payload_scatter_chart(&ds, &sel).unwrap();
        assert!(chart.is_empty());

        let inverted = FilterSelection::new(SiteSelector::All, 8000.0, 10.0);
        assert!(success_payload_scatter_chart(&ds, &inverted).unwrap().is_empty());
    }

    #[test]
    fn test_unknown_site_yields_empty_pie() {
        let ds = dataset();
        let sel = FilterSelection::new(SiteSelector::Site("Boca Chica".into()), 0.0, 10_000.0);
        let chart = success_pie_chart(&ds, &sel).unwrap();
        assert!(chart.is_empty());
        assert_eq!(chart.title(), "Total Success Launches for Site Boca Chica");
    }

    #[test]
    fn test_failure_is_isolated_per_chart() {
        let mut records = dataset().records;
        records.push(LaunchRecord::new("VAFB SLC-4E", 20_000.0, 1, ""));
        let ds = Dataset::from_records(records);
        let sel = FilterSelection::new(SiteSelector::All, 0.0, 30_000.0);

        assert!(success_pie_chart(&ds, &sel).is_ok());
        assert_eq!(
            success_payload_scatter_chart(&ds, &sel),
            Err(AggregationError::MissingBoosterCategory { row: 6 })
        );
    }

    #[test]
    fn test_error_names_dataset_row() {
        let ds = Dataset::from_records(vec![
            LaunchRecord::new("A", 0.0, 1, "FT"),
            LaunchRecord::new("A", 10.0, 1, "FT"),
            LaunchRecord::new("A", 500.0, 1, ""),
        ]);
        let sel = FilterSelection::new(SiteSelector::All, 100.0, 1000.0);
        let err = success_payload_scatter_chart(&ds, &sel).unwrap_err();
        assert_eq!(err, AggregationError::MissingBoosterCategory { row: 2 });
        assert_eq!(err.to_string(), "row 2: booster version category is missing");
    }
}
