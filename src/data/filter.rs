use super::model::{Dataset, FilterSelection, LaunchRecord, SiteSelector};

// ---------------------------------------------------------------------------
// Row predicates
// ---------------------------------------------------------------------------

/// Whether a record passes the site selector (exact, case-sensitive).
pub fn site_matches(site: &SiteSelector, record: &LaunchRecord) -> bool {
    match site {
        SiteSelector::All => true,
        SiteSelector::Site(name) => record.site == *name,
    }
}

/// A record that passed the filters, with its index in the dataset.
pub type Row<'a> = (usize, &'a LaunchRecord);

/// Return the records passing both the site and the payload predicate,
/// in dataset order.
///
/// An inverted or out-of-bounds payload range yields an empty result.
pub fn filter<'a>(dataset: &'a Dataset, selection: &FilterSelection) -> Vec<Row<'a>> {
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| {
            site_matches(&selection.site, rec)
                && selection.payload_range.contains(rec.payload_mass)
        })
        .collect()
}

/// Return the records passing the site selector only.
///
/// The proportion chart is driven by this: it ignores the payload range.
pub fn filter_by_site<'a>(dataset: &'a Dataset, site: &SiteSelector) -> Vec<Row<'a>> {
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| site_matches(site, rec))
        .collect()
}
