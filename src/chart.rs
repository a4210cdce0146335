use serde::Serialize;

use crate::data::aggregate::{ScatterPoint, SliceLabel};
use crate::data::model::{SiteSelector, COL_BOOSTER, COL_OUTCOME, COL_PAYLOAD, COL_SITE};

// ---------------------------------------------------------------------------
// ChartSpec – renderer-agnostic figure description
// ---------------------------------------------------------------------------

/// A chart ready to render, as produced by one recomputation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartSpec {
    Proportion(ProportionChart),
    Scatter(ScatterChart),
}

impl ChartSpec {
    pub fn title(&self) -> &str {
        match self {
            ChartSpec::Proportion(c) => &c.title,
            ChartSpec::Scatter(c) => &c.title,
        }
    }

    /// Whether the chart carries no data at all.
    pub fn is_empty(&self) -> bool {
        match self {
            ChartSpec::Proportion(c) => c.slices.is_empty(),
            ChartSpec::Scatter(c) => c.series.is_empty(),
        }
    }

    /// Whether there is anything to draw. A pie whose slices are all zero
    /// has nothing.
    pub fn has_data(&self) -> bool {
        match self {
            ChartSpec::Proportion(c) => c.total() > 0,
            ChartSpec::Scatter(c) => !c.series.is_empty(),
        }
    }
}

/// Proportion-of-whole (pie) chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProportionChart {
    pub title: String,
    /// Column the slice labels come from.
    pub names: String,
    /// Column the slice values come from.
    pub values: String,
    pub slices: Vec<Slice>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slice {
    pub label: SliceLabel,
    pub value: u64,
}

impl ProportionChart {
    pub fn total(&self) -> u64 {
        self.slices.iter().map(|s| s.value).sum()
    }

    /// Share of the whole for each slice, in slice order. All zero when the
    /// total is zero.
    pub fn fractions(&self) -> Vec<f64> {
        let total = self.total();
        self.slices
            .iter()
            .map(|s| {
                if total == 0 {
                    0.0
                } else {
                    s.value as f64 / total as f64
                }
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub title: String,
    /// When set, only these tick values are displayed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tick_values: Option<Vec<f64>>,
}

/// Points of one colour group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterSeries {
    pub name: String,
    /// `[payload mass, outcome]`
    pub points: Vec<[f64; 2]>,
}

/// Payload vs outcome scatter, coloured by booster category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterChart {
    pub title: String,
    pub x_axis: Axis,
    pub y_axis: Axis,
    /// Column the colour groups come from.
    pub color: String,
    pub series: Vec<ScatterSeries>,
}

impl ScatterChart {
    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).sum()
    }
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

fn proportion_title(scope: &SiteSelector) -> String {
    match scope {
        SiteSelector::All => "Total Success Launches by Site".to_string(),
        SiteSelector::Site(site) => format!("Total Success Launches for Site {site}"),
    }
}

fn scatter_title(scope: &SiteSelector) -> String {
    match scope {
        SiteSelector::All => "Correlation between Payload and Success for all Sites".to_string(),
        SiteSelector::Site(site) => {
            format!("Correlation between Payload and Success for Site {site}")
        }
    }
}

/// Build the pie chart from the aggregated (label, value) pairs.
pub fn build_proportion_chart(pairs: Vec<(SliceLabel, u64)>, scope: &SiteSelector) -> ChartSpec {
    let names = match scope {
        SiteSelector::All => COL_SITE,
        SiteSelector::Site(_) => COL_OUTCOME,
    };
    let values = match scope {
        SiteSelector::All => COL_OUTCOME,
        SiteSelector::Site(_) => "count",
    };

    ChartSpec::Proportion(ProportionChart {
        title: proportion_title(scope),
        names: names.to_string(),
        values: values.to_string(),
        slices: pairs
            .into_iter()
            .map(|(label, value)| Slice { label, value })
            .collect(),
    })
}

/// Build the scatter chart. Points are grouped into one series per booster
/// category, series in first-seen order, points in input order.
pub fn build_scatter_chart<'a, I>(points: I, scope: &SiteSelector) -> ChartSpec
where
    I: IntoIterator<Item = ScatterPoint<'a>>,
{
    let mut series: Vec<ScatterSeries> = Vec::new();
    for p in points {
        let xy = [p.payload_mass, p.outcome as f64];
        match series.iter_mut().find(|s| s.name == p.booster_category) {
            Some(s) => s.points.push(xy),
            None => series.push(ScatterSeries {
                name: p.booster_category.to_string(),
                points: vec![xy],
            }),
        }
    }

    ChartSpec::Scatter(ScatterChart {
        title: scatter_title(scope),
        x_axis: Axis {
            title: COL_PAYLOAD.to_string(),
            tick_values: None,
        },
        y_axis: Axis {
            title: COL_OUTCOME.to_string(),
            tick_values: Some(vec![0.0, 1.0]),
        },
        color: COL_BOOSTER.to_string(),
        series,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(mass: f64, outcome: i64, booster: &str) -> ScatterPoint<'_> {
        ScatterPoint {
            payload_mass: mass,
            outcome,
            booster_category: booster,
        }
    }

    #[test]
    fn test_proportion_titles() {
        let all = build_proportion_chart(Vec::new(), &SiteSelector::All);
        assert_eq!(all.title(), "Total Success Launches by Site");

        let site = build_proportion_chart(Vec::new(), &SiteSelector::Site("CCAFS LC-40".into()));
        assert_eq!(site.title(), "Total Success Launches for Site CCAFS LC-40");
    }

    #[test]
    fn test_scatter_titles() {
        let all = build_scatter_chart(Vec::new(), &SiteSelector::All);
        assert_eq!(
            all.title(),
            "Correlation between Payload and Success for all Sites"
        );
        let site = build_scatter_chart(Vec::new(), &SiteSelector::Site("KSC LC-39A".into()));
        assert_eq!(
            site.title(),
            "Correlation between Payload and Success for Site KSC LC-39A"
        );
    }

    #[test]
    fn test_proportion_slices_and_fractions() {
        let chart = build_proportion_chart(
            vec![
                (SliceLabel::Site("A".into()), 3),
                (SliceLabel::Site("B".into()), 1),
            ],
            &SiteSelector::All,
        );
        let ChartSpec::Proportion(pie) = chart else {
            panic!("expected a proportion chart");
        };
        assert_eq!(pie.names, "Launch Site");
        assert_eq!(pie.values, "class");
        assert_eq!(pie.total(), 4);
        assert_eq!(pie.fractions(), vec![0.75, 0.25]);
    }

    #[test]
    fn test_zero_total_fractions() {
        let chart = build_proportion_chart(
            vec![(SliceLabel::Site("A".into()), 0)],
            &SiteSelector::All,
        );
        let ChartSpec::Proportion(pie) = chart else {
            panic!("expected a proportion chart");
        };
        assert_eq!(pie.fractions(), vec![0.0]);
    }

    #[test]
    fn test_zero_total_pie_has_no_data() {
        let chart = build_proportion_chart(
            vec![
                (SliceLabel::Site("A".into()), 0),
                (SliceLabel::Site("B".into()), 0),
            ],
            &SiteSelector::All,
        );
        assert!(!chart.is_empty());
        assert!(!chart.has_data());

        let chart = build_proportion_chart(
            vec![
                (SliceLabel::Site("A".into()), 0),
                (SliceLabel::Site("B".into()), 3),
            ],
            &SiteSelector::All,
        );
        assert!(chart.has_data());

        let empty = build_scatter_chart(Vec::new(), &SiteSelector::All);
        assert!(!empty.has_data());
    }

    #[test]
    fn test_scatter_groups_by_booster() {
        let points = vec![
            point(100.0, 1, "FT"),
            point(200.0, 0, "v1.1"),
            point(300.0, 1, "FT"),
        ];
        let chart = build_scatter_chart(points, &SiteSelector::All);
        let ChartSpec::Scatter(scatter) = chart else {
            panic!("expected a scatter chart");
        };
        assert_eq!(scatter.series.len(), 2);
        assert_eq!(scatter.series[0].name, "FT");
        assert_eq!(scatter.series[0].points, vec![[100.0, 1.0], [300.0, 1.0]]);
        assert_eq!(scatter.series[1].points, vec![[200.0, 0.0]]);
        assert_eq!(scatter.y_axis.tick_values, Some(vec![0.0, 1.0]));
        assert_eq!(scatter.x_axis.title, "Payload Mass (kg)");
        assert_eq!(scatter.point_count(), 3);
    }

    #[test]
    fn test_scatter_is_deterministic() {
        let points = vec![point(100.0, 1, "FT"), point(200.0, 0, "B4")];
        let a = build_scatter_chart(points.clone(), &SiteSelector::All);
        let b = build_scatter_chart(points, &SiteSelector::All);
        assert_eq!(a, b);
    }

    #[test]
    fn test_serialized_shape() {
        let chart = build_scatter_chart(vec![point(100.0, 1, "FT")], &SiteSelector::All);
        let json = serde_json::to_value(&chart).unwrap();
        assert_eq!(json["kind"], "scatter");
        assert_eq!(json["y_axis"]["tick_values"], serde_json::json!([0.0, 1.0]));
        assert!(json["x_axis"].get("tick_values").is_none());

        let pie = build_proportion_chart(
            vec![(SliceLabel::Outcome(1), 2)],
            &SiteSelector::Site("A".into()),
        );
        let json = serde_json::to_value(&pie).unwrap();
        assert_eq!(json["kind"], "proportion");
        assert_eq!(json["slices"][0]["label"], 1);
    }
}
