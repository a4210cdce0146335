use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Column names of the source table
// ---------------------------------------------------------------------------

pub const COL_SITE: &str = "Launch Site";
pub const COL_PAYLOAD: &str = "Payload Mass (kg)";
pub const COL_OUTCOME: &str = "class";
pub const COL_BOOSTER: &str = "Booster Version Category";

/// Every column a source table must carry.
pub const REQUIRED_COLUMNS: [&str; 4] = [COL_SITE, COL_PAYLOAD, COL_OUTCOME, COL_BOOSTER];

/// Sentinel value of the site selector meaning "no site filter".
pub const ALL_SITES: &str = "ALL";

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the source table
// ---------------------------------------------------------------------------

/// A single launch (one row of the source table).
///
/// The serde names match the CSV / JSON column headers, so the same type is
/// used to deserialize both formats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaunchRecord {
    #[serde(rename = "Launch Site")]
    pub site: String,
    #[serde(rename = "Payload Mass (kg)")]
    pub payload_mass: f64,
    /// Raw `class` value: 1 = success, 0 = failure.
    #[serde(rename = "class")]
    pub outcome: i64,
    #[serde(rename = "Booster Version Category")]
    pub booster_category: String,
}

impl LaunchRecord {
    pub fn new(site: &str, payload_mass: f64, outcome: i64, booster_category: &str) -> Self {
        Self {
            site: site.to_string(),
            payload_mass,
            outcome,
            booster_category: booster_category.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full loaded table with its static derived values.
///
/// Built once and never mutated afterwards; everything downstream borrows it.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// All launches, in source order.
    pub records: Vec<LaunchRecord>,
    /// Smallest payload mass (0.0 for an empty table).
    pub min_payload: f64,
    /// Largest payload mass (0.0 for an empty table).
    pub max_payload: f64,
    /// Distinct launch sites in first-seen order (without the ALL sentinel).
    pub sites: Vec<String>,
}

impl Dataset {
    /// Compute the derived values from the loaded records.
    pub fn from_records(records: Vec<LaunchRecord>) -> Self {
        let mut sites: Vec<String> = Vec::new();
        for rec in &records {
            if !rec.site.is_empty() && !sites.contains(&rec.site) {
                sites.push(rec.site.clone());
            }
        }

        let (min_payload, max_payload) = if records.is_empty() {
            (0.0, 0.0)
        } else {
            records.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), r| {
                (lo.min(r.payload_mass), hi.max(r.payload_mass))
            })
        };

        Dataset {
            records,
            min_payload,
            max_payload,
            sites,
        }
    }

    /// Options for the site selector: ALL first, then each site.
    pub fn site_options(&self) -> Vec<SiteSelector> {
        std::iter::once(SiteSelector::All)
            .chain(self.sites.iter().cloned().map(SiteSelector::Site))
            .collect()
    }

    /// Distinct booster categories in first-seen order.
    pub fn booster_categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();
        for rec in &self.records {
            let cat = rec.booster_category.as_str();
            if !cat.is_empty() && !categories.contains(&cat) {
                categories.push(cat);
            }
        }
        categories
    }

    /// Number of launches.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Filter inputs
// ---------------------------------------------------------------------------

/// Value of the site selector.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(into = "String")]
pub enum SiteSelector {
    /// No site filter.
    #[default]
    All,
    /// Exact, case-sensitive site name.
    Site(String),
}

impl SiteSelector {
    /// Interpret a raw selector value. `None` and `"ALL"` both mean all sites.
    pub fn from_value(value: Option<&str>) -> Self {
        match value {
            None | Some(ALL_SITES) => SiteSelector::All,
            Some(site) => SiteSelector::Site(site.to_string()),
        }
    }

    /// Value as carried by the selector widget (`"ALL"` for the sentinel).
    pub fn value(&self) -> &str {
        match self {
            SiteSelector::All => ALL_SITES,
            SiteSelector::Site(s) => s,
        }
    }

    /// Human-facing label for the selector drop-down.
    pub fn label(&self) -> &str {
        match self {
            SiteSelector::All => "All Sites",
            SiteSelector::Site(s) => s,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, SiteSelector::All)
    }
}

impl fmt::Display for SiteSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

impl From<SiteSelector> for String {
    fn from(sel: SiteSelector) -> Self {
        sel.value().to_string()
    }
}

/// Open payload interval `(low, high)` in kilograms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PayloadRange {
    pub low: f64,
    pub high: f64,
}

impl PayloadRange {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// Strict on both ends: a mass equal to `low` or `high` is outside.
    pub fn contains(&self, mass: f64) -> bool {
        self.low < mass && mass < self.high
    }
}

/// Current control values, rebuilt on every interaction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterSelection {
    pub site: SiteSelector,
    pub payload_range: PayloadRange,
}

impl FilterSelection {
    pub fn new(site: SiteSelector, low: f64, high: f64) -> Self {
        Self {
            site,
            payload_range: PayloadRange::new(low, high),
        }
    }
}
