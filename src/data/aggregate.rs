use std::fmt;

use serde::Serialize;

use super::error::AggregationError;
use super::filter::Row;
use super::model::{LaunchRecord, SiteSelector};

// ---------------------------------------------------------------------------
// Proportion chart input
// ---------------------------------------------------------------------------

/// Label of one slice of the proportion chart.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum SliceLabel {
    /// A launch site (ALL scope).
    Site(String),
    /// A raw outcome value (single-site scope).
    Outcome(i64),
}

impl fmt::Display for SliceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SliceLabel::Site(s) => write!(f, "{s}"),
            SliceLabel::Outcome(o) => write!(f, "{o}"),
        }
    }
}

fn checked_outcome(row: usize, record: &LaunchRecord) -> Result<i64, AggregationError> {
    match record.outcome {
        0 | 1 => Ok(record.outcome),
        value => Err(AggregationError::InvalidOutcome { row, value }),
    }
}

/// Compute the (label, value) pairs for the proportion chart.
///
/// * ALL scope: group by site and sum the outcome column, so each site gets
///   its success count and failures are dropped. Sites with no successes
///   stay in the output with 0.
/// * Single site: group by outcome and count rows, giving the
///   success / failure split for that site.
///
/// Groups appear in first-seen order. Errors name the dataset row.
pub fn aggregate_outcome_counts(
    rows: &[Row<'_>],
    scope: &SiteSelector,
) -> Result<Vec<(SliceLabel, u64)>, AggregationError> {
    let mut groups: Vec<(SliceLabel, u64)> = Vec::new();

    for &(row, rec) in rows {
        let outcome = checked_outcome(row, rec)?;
        let (label, add) = match scope {
            SiteSelector::All => {
                if rec.site.is_empty() {
                    return Err(AggregationError::MissingSite { row });
                }
                (SliceLabel::Site(rec.site.clone()), outcome as u64)
            }
            SiteSelector::Site(_) => (SliceLabel::Outcome(outcome), 1),
        };

        match groups.iter_mut().find(|(l, _)| *l == label) {
            Some((_, value)) => *value += add,
            None => groups.push((label, add)),
        }
    }

    Ok(groups)
}

// ---------------------------------------------------------------------------
// Scatter chart input
// ---------------------------------------------------------------------------

/// One point of the payload / outcome scatter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterPoint<'a> {
    pub payload_mass: f64,
    pub outcome: i64,
    pub booster_category: &'a str,
}

/// Lazily map each row to its scatter point, in row order.
pub fn extract_scatter_points<'a>(
    rows: &'a [Row<'a>],
) -> impl Iterator<Item = Result<ScatterPoint<'a>, AggregationError>> + 'a {
    rows.iter().map(|&(row, rec)| {
        if !rec.payload_mass.is_finite() {
            return Err(AggregationError::InvalidPayload { row });
        }
        if rec.booster_category.is_empty() {
            return Err(AggregationError::MissingBoosterCategory { row });
        }
        Ok(ScatterPoint {
            payload_mass: rec.payload_mass,
            outcome: checked_outcome(row, rec)?,
            booster_category: rec.booster_category.as_str(),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(site: &str, mass: f64, outcome: i64, booster: &str) -> LaunchRecord {
        LaunchRecord::new(site, mass, outcome, booster)
    }

    #[test]
    fn test_all_scope_sums_successes_per_site() {
        let records = vec![
            rec("A", 100.0, 1, "FT"),
            rec("B", 200.0, 0, "FT"),
            rec("A", 300.0, 0, "FT"),
            rec("B", 400.0, 0, "v1.1"),
            rec("A", 500.0, 1, "B4"),
            rec("B", 600.0, 0, "B4"),
        ];
        let rows: Vec<Row> = records.iter().enumerate().collect();
        let pairs = aggregate_outcome_counts(&rows, &SiteSelector::All).unwrap();
        assert_eq!(
            pairs,
            vec![
                (SliceLabel::Site("A".into()), 2),
                (SliceLabel::Site("B".into()), 0),
            ]
        );
    }

    #[test]
    fn test_single_site_counts_by_outcome() {
        let records = vec![
            rec("A", 100.0, 1, "FT"),
            rec("A", 200.0, 1, "FT"),
            rec("A", 300.0, 0, "v1.0"),
        ];
        let rows: Vec<Row> = records.iter().enumerate().collect();
        let pairs = aggregate_outcome_counts(&rows, &SiteSelector::Site("A".into())).unwrap();
        assert_eq!(
            pairs,
            vec![(SliceLabel::Outcome(1), 2), (SliceLabel::Outcome(0), 1)]
        );
    }

    #[test]
    fn test_empty_rows() {
        let pairs = aggregate_outcome_counts(&[], &SiteSelector::All).unwrap();
        assert!(pairs.is_empty());
        assert_eq!(extract_scatter_points(&[]).count(), 0);
    }

    #[test]
    fn test_malformed_rows() {
        let records = vec![rec("A", 100.0, 1, "FT"), rec("", 200.0, 1, "FT")];
        let rows: Vec<Row> = records.iter().enumerate().collect();
        assert_eq!(
            aggregate_outcome_counts(&rows, &SiteSelector::All),
            Err(AggregationError::MissingSite { row: 1 })
        );

        let records = vec![rec("A", 100.0, 2, "FT")];
        let rows: Vec<Row> = records.iter().enumerate().collect();
        assert_eq!(
            aggregate_outcome_counts(&rows, &SiteSelector::Site("A".into())),
            Err(AggregationError::InvalidOutcome { row: 0, value: 2 })
        );
    }

    #[test]
    fn test_scatter_points_in_row_order() {
        let records = vec![rec("A", 100.0, 1, "FT"), rec("B", 50.0, 0, "v1.0")];
        let rows: Vec<Row> = records.iter().enumerate().collect();
        let points: Vec<ScatterPoint> = extract_scatter_points(&rows)
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(
            points,
            vec![
                ScatterPoint {
                    payload_mass: 100.0,
                    outcome: 1,
                    booster_category: "FT",
                },
                ScatterPoint {
                    payload_mass: 50.0,
                    outcome: 0,
                    booster_category: "v1.0",
                },
            ]
        );
    }

    #[test]
    fn test_scatter_rejects_missing_booster() {
        let records = vec![rec("A", 100.0, 1, "FT"), rec("A", 100.0, 1, "")];
        let rows: Vec<Row> = records.iter().enumerate().collect();
        let result: Result<Vec<_>, _> = extract_scatter_points(&rows).collect();
        assert_eq!(result, Err(AggregationError::MissingBoosterCategory { row: 1 }));
    }

    #[test]
    fn test_errors_carry_dataset_index() {
        let records = vec![
            rec("A", 0.0, 1, "FT"),
            rec("A", 10.0, 1, "FT"),
            rec("A", 500.0, 7, ""),
        ];
        // only the last record survives filtering
        let rows: Vec<Row> = vec![(2, &records[2])];
        assert_eq!(
            aggregate_outcome_counts(&rows, &SiteSelector::All),
            Err(AggregationError::InvalidOutcome { row: 2, value: 7 })
        );
        let result: Result<Vec<_>, _> = extract_scatter_points(&rows).collect();
        assert_eq!(result, Err(AggregationError::MissingBoosterCategory { row: 2 }));
    }
}
