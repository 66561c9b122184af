//! The dashboard pipeline: filter, aggregate, chart.
//!
//! [`Dashboard::apply`] is the handler for a change of filter controls. It
//! re-runs the whole pipeline for the new selection and reports only the
//! outputs that differ from the previous pass.

use crate::format::{metric_cards, MetricCard};
use bike_charts::{build_all, ChartSpec};
use bike_core::loader::{CachedLoader, DataSource, LoaderConfig};
use bike_core::{DateInterval, RecordSet};
use bike_data::{filter, FilterSelection};
use bike_db::models::HeadlineMetrics;
use bike_db::Database;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

/// The dataset information panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetInfo {
    pub total_records: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_range: Option<DateInterval>,
    pub filtered_records: usize,
    /// Set when the synthetic fallback replaced the data file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_warning: Option<String>,
}

/// Headline metric values and their display cards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsPanel {
    pub values: HeadlineMetrics,
    pub cards: Vec<MetricCard>,
}

impl MetricsPanel {
    fn new(values: HeadlineMetrics) -> Self {
        Self {
            cards: metric_cards(&values),
            values,
        }
    }
}

/// Everything one pipeline pass produces.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardOutput {
    pub selection: FilterSelection,
    pub dataset: DatasetInfo,
    pub metrics: MetricsPanel,
    pub charts: Vec<ChartSpec>,
}

/// Outputs that changed since the previous pass. Unchanged parts are
/// omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dataset: Option<DatasetInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<MetricsPanel>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub charts: Vec<ChartSpec>,
}

impl DashboardUpdate {
    pub fn is_empty(&self) -> bool {
        self.dataset.is_none() && self.metrics.is_none() && self.charts.is_empty()
    }

    fn between(previous: Option<&DashboardOutput>, current: &DashboardOutput) -> Self {
        let Some(previous) = previous else {
            return Self {
                dataset: Some(current.dataset.clone()),
                metrics: Some(current.metrics.clone()),
                charts: current.charts.clone(),
            };
        };
        let charts = current
            .charts
            .iter()
            .filter(|chart| !previous.charts.iter().any(|p| p.id == chart.id && p == *chart))
            .cloned()
            .collect();
        Self {
            dataset: (previous.dataset != current.dataset).then(|| current.dataset.clone()),
            metrics: (previous.metrics != current.metrics).then(|| current.metrics.clone()),
            charts,
        }
    }
}

/// A dashboard session over one loaded dataset.
pub struct Dashboard {
    loader: CachedLoader,
    baseline: Database,
    seed: u64,
    last: Option<DashboardOutput>,
}

impl Dashboard {
    /// Load the dataset (or its synthetic fallback) and build the baseline store.
    ///
    /// `seed` drives chart subsampling; every pass reuses it so an unchanged
    /// view draws the same points.
    pub fn open(config: LoaderConfig, seed: u64) -> anyhow::Result<Self> {
        let loader = CachedLoader::new(config);
        let baseline = Database::from_records(&loader.get().records)?;
        info!(
            "[Bike Debug] dashboard: baseline holds {} records",
            baseline.record_count()?
        );
        Ok(Self {
            loader,
            baseline,
            seed,
            last: None,
        })
    }

    pub fn records(&self) -> &RecordSet {
        &self.loader.get().records
    }

    pub fn source(&self) -> &DataSource {
        &self.loader.get().source
    }

    /// Full date bounds, every season, every weather situation.
    pub fn default_selection(&self) -> FilterSelection {
        FilterSelection::all_for(self.records())
    }

    /// Output of the most recent [`apply`](Self::apply).
    pub fn last(&self) -> Option<&DashboardOutput> {
        self.last.as_ref()
    }

    /// Run one pipeline pass for `selection` without touching session state.
    pub fn render(&self, selection: &FilterSelection) -> anyhow::Result<DashboardOutput> {
        let records = self.records();
        let view = filter(records, selection);
        let store = Database::from_records(&view)?;
        let values = store.headline_metrics(&self.baseline)?;
        let mut rng = StdRng::seed_from_u64(self.seed);
        let charts = build_all(&view, &store, &mut rng)?;

        let dataset = DatasetInfo {
            total_records: records.len(),
            date_range: records.date_bounds(),
            filtered_records: view.len(),
            source_warning: self.source().warning().map(str::to_string),
        };
        debug!(
            "dashboard: rendered {} charts for {} of {} records",
            charts.len(),
            dataset.filtered_records,
            dataset.total_records
        );
        Ok(DashboardOutput {
            selection: selection.clone(),
            dataset,
            metrics: MetricsPanel::new(values),
            charts,
        })
    }

    /// Re-run the pipeline for `selection` and return what changed.
    ///
    /// The first call reports every output.
    pub fn apply(&mut self, selection: &FilterSelection) -> anyhow::Result<DashboardUpdate> {
        let output = self.render(selection)?;
        let update = DashboardUpdate::between(self.last.as_ref(), &output);
        info!(
            "[Bike Debug] dashboard: {} charts changed, metrics changed: {}",
            update.charts.len(),
            update.metrics.is_some()
        );
        self.last = Some(output);
        Ok(update)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bike_charts::ChartId;
    use bike_core::{Season, WeatherSituation};

    fn synthetic_dashboard(count: usize) -> Dashboard {
        let config = LoaderConfig {
            path: "/nonexistent/bike/data.csv".into(),
            sample_count: count,
            seed: Some(21),
        };
        Dashboard::open(config, 99).unwrap()
    }

    #[test]
    fn first_apply_reports_everything() {
        let mut dashboard = synthetic_dashboard(800);
        let selection = dashboard.default_selection();
        let update = dashboard.apply(&selection).unwrap();
        assert_eq!(update.charts.len(), ChartId::ALL.len());
        let dataset = update.dataset.unwrap();
        assert_eq!(dataset.total_records, 800);
        assert_eq!(dataset.filtered_records, 800);
        assert!(dataset.source_warning.is_some());
        assert_eq!(update.metrics.unwrap().values.total_share, Some(1.0));
    }

    #[test]
    fn repeated_selection_changes_nothing() {
        let mut dashboard = synthetic_dashboard(800);
        let selection = dashboard.default_selection();
        dashboard.apply(&selection).unwrap();
        let update = dashboard.apply(&selection).unwrap();
        assert!(update.is_empty(), "unexpected update {:?}", update);
    }

    #[test]
    fn narrowing_the_filter_reports_changes() {
        let mut dashboard = synthetic_dashboard(800);
        let selection = dashboard.default_selection();
        dashboard.apply(&selection).unwrap();

        let narrowed = FilterSelection {
            seasons: [Season::Summer].into_iter().collect(),
            ..selection
        };
        let update = dashboard.apply(&narrowed).unwrap();
        let dataset = update.dataset.unwrap();
        assert!(dataset.filtered_records < dataset.total_records);
        let share = update.metrics.unwrap().values.total_share.unwrap();
        assert!(share < 1.0);
        assert!(update.charts.iter().any(|c| c.id == ChartId::MonthlyTrend));
        assert_eq!(dashboard.last().unwrap().selection, narrowed);
    }

    #[test]
    fn empty_view_reports_unavailable_metrics() {
        let mut dashboard = synthetic_dashboard(200);
        let selection = FilterSelection {
            start: Some(chrono::NaiveDate::from_ymd_opt(1999, 1, 1).unwrap()),
            end: Some(chrono::NaiveDate::from_ymd_opt(1999, 12, 31).unwrap()),
            weather: [WeatherSituation::Clear].into_iter().collect(),
            ..FilterSelection::default()
        };
        let update = dashboard.apply(&selection).unwrap();
        let metrics = update.metrics.unwrap();
        assert_eq!(metrics.values, HeadlineMetrics::default());
        assert_eq!(metrics.cards[0].value, "-");
        assert_eq!(update.dataset.unwrap().filtered_records, 0);
    }

    #[test]
    fn render_does_not_touch_session_state() {
        let dashboard = synthetic_dashboard(100);
        let output = dashboard.render(&FilterSelection::default()).unwrap();
        assert_eq!(output.dataset.filtered_records, 100);
        assert!(dashboard.last().is_none());
    }
}
