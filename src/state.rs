use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::chart::ChartSpec;
use crate::color::ColorMap;
use crate::config::DashboardConfig;
use crate::dashboard::{success_pie_chart, success_payload_scatter_chart};
use crate::data::error::AggregationError;
use crate::data::filter::filter;
use crate::data::model::{Dataset, FilterSelection, SiteSelector};

/// Latest result of one chart's recomputation.
pub type ChartResult = Result<ChartSpec, AggregationError>;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// Controls are changed through [`AppState::set_site`] and
/// [`AppState::set_payload_range`]; each recomputes only the charts that
/// depend on that control.
pub struct AppState {
    /// Loaded dataset; replaced only by File → Open….
    pub dataset: Dataset,

    /// Where `dataset` was read from.
    pub source: PathBuf,

    /// Current control values.
    pub selection: FilterSelection,

    /// Bounds of the payload range control (kg).
    pub payload_bounds: (f64, f64),

    /// Site selector entries, ALL first.
    pub site_options: Vec<SiteSelector>,

    pub pie_chart: ChartResult,
    pub scatter_chart: ChartResult,

    /// Booster category colours for the scatter chart.
    pub booster_colors: ColorMap,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(dataset: Dataset, source: PathBuf, config: &DashboardConfig) -> Self {
        let payload_bounds = (config.payload_min, config.payload_max);
        let selection = FilterSelection::new(SiteSelector::All, payload_bounds.0, payload_bounds.1);
        let pie_chart = success_pie_chart(&dataset, &selection);
        let scatter_chart = success_payload_scatter_chart(&dataset, &selection);

        Self {
            site_options: dataset.site_options(),
            booster_colors: ColorMap::new(&dataset.booster_categories()),
            dataset,
            source,
            selection,
            payload_bounds,
            pie_chart,
            scatter_chart,
            status_message: None,
        }
    }

    /// Ingest a newly loaded dataset and reset the controls.
    pub fn set_dataset(&mut self, dataset: Dataset, source: PathBuf) {
        self.site_options = dataset.site_options();
        self.booster_colors = ColorMap::new(&dataset.booster_categories());
        self.dataset = dataset;
        self.source = source;
        self.selection = FilterSelection::new(
            SiteSelector::All,
            self.payload_bounds.0,
            self.payload_bounds.1,
        );
        self.status_message = None;
        self.recompute_pie();
        self.recompute_scatter();
    }

    /// Site selector changed: both charts depend on it.
    pub fn set_site(&mut self, site: SiteSelector) {
        if self.selection.site == site {
            return;
        }
        self.selection.site = site;
        self.recompute_pie();
        self.recompute_scatter();
    }

    /// Payload range changed: only the scatter chart depends on it.
    pub fn set_payload_range(&mut self, low: f64, high: f64) {
        let range = &mut self.selection.payload_range;
        if range.low == low && range.high == high {
            return;
        }
        range.low = low;
        range.high = high;
        self.recompute_scatter();
    }

    /// The "from" handle moved. It stops at the "to" handle.
    pub fn set_payload_low(&mut self, low: f64) {
        let high = self.selection.payload_range.high;
        self.set_payload_range(low.min(high), high);
    }

    /// The "to" handle moved. It stops at the "from" handle.
    pub fn set_payload_high(&mut self, high: f64) {
        let low = self.selection.payload_range.low;
        self.set_payload_range(low, high.max(low));
    }

    fn recompute_pie(&mut self) {
        self.pie_chart = success_pie_chart(&self.dataset, &self.selection);
        if let Err(e) = &self.pie_chart {
            log::error!("pie chart failed: {e}");
        }
    }

    fn recompute_scatter(&mut self) {
        self.scatter_chart = success_payload_scatter_chart(&self.dataset, &self.selection);
        if let Err(e) = &self.scatter_chart {
            log::error!("scatter chart failed: {e}");
        }
    }

    /// Launches passing the current site and payload filters.
    pub fn visible_count(&self) -> usize {
        filter(&self.dataset, &self.selection).len()
    }

    /// Current selection and both charts as pretty JSON.
    pub fn export_json(&self) -> serde_json::Result<String> {
        #[derive(Serialize)]
        struct ChartExport<'a> {
            #[serde(skip_serializing_if = "Option::is_none")]
            chart: Option<&'a ChartSpec>,
            #[serde(skip_serializing_if = "Option::is_none")]
            error: Option<String>,
        }

        impl<'a> From<&'a ChartResult> for ChartExport<'a> {
            fn from(result: &'a ChartResult) -> Self {
                match result {
                    Ok(chart) => ChartExport {
                        chart: Some(chart),
                        error: None,
                    },
                    Err(e) => ChartExport {
                        chart: None,
                        error: Some(e.to_string()),
                    },
                }
            }
        }

        #[derive(Serialize)]
        struct Export<'a> {
            source: &'a Path,
            selection: &'a FilterSelection,
            pie_chart: ChartExport<'a>,
            scatter_chart: ChartExport<'a>,
        }

        serde_json::to_string_pretty(&Export {
            source: &self.source,
            selection: &self.selection,
            pie_chart: (&self.pie_chart).into(),
            scatter_chart: (&self.scatter_chart).into(),
        })
    }
}
