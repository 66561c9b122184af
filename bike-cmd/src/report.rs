//! The `report` and `summary` commands.

use crate::dashboard::{DashboardOutput, DatasetInfo, MetricsPanel};
use crate::narrative::{self, Section};
use anyhow::Context;
use bike_charts::{ChartId, ChartSpec, Tab};
use bike_core::dates::format_date;
use bike_data::FilterSelection;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub const DASHBOARD_TITLE: &str = "Bike Sharing Analysis Dashboard";

#[derive(Debug, Clone, Serialize)]
pub struct TabLayout {
    pub label: &'static str,
    pub charts: Vec<ChartId>,
}

/// The full dashboard as one document.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub title: &'static str,
    pub selection: FilterSelection,
    pub dataset: DatasetInfo,
    pub metrics: MetricsPanel,
    pub tabs: Vec<TabLayout>,
    pub charts: Vec<ChartSpec>,
    pub narrative: [Section; 6],
}

impl From<DashboardOutput> for Report {
    fn from(output: DashboardOutput) -> Self {
        Self {
            title: DASHBOARD_TITLE,
            selection: output.selection,
            dataset: output.dataset,
            metrics: output.metrics,
            tabs: Tab::ALL
                .into_iter()
                .map(|tab| TabLayout {
                    label: tab.label(),
                    charts: tab.charts(),
                })
                .collect(),
            charts: output.charts,
            narrative: narrative::SECTIONS,
        }
    }
}

/// Write `report` as pretty-printed JSON to `path`.
pub fn write_report(report: &Report, path: &Path) -> anyhow::Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, report)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    log::info!(
        "[Bike Debug] report: wrote {} charts to {}",
        report.charts.len(),
        path.display()
    );
    Ok(())
}

/// Print the dataset panel and the metric cards as plain text.
pub fn write_summary<W: Write>(out: &mut W, output: &DashboardOutput) -> anyhow::Result<()> {
    let dataset = &output.dataset;
    if let Some(warning) = &dataset.source_warning {
        writeln!(out, "Warning: {}", warning)?;
    }
    writeln!(out, "Dataset Information")?;
    writeln!(out, "- Total Records: {}", dataset.total_records)?;
    match dataset.date_range {
        Some(range) => writeln!(
            out,
            "- Date Range: {} to {} ({} days)",
            format_date(&range.start),
            format_date(&range.end),
            range.num_days()
        )?,
        None => writeln!(out, "- Date Range: -")?,
    }
    writeln!(out, "- Filtered Records: {}", dataset.filtered_records)?;
    writeln!(out)?;
    for card in &output.metrics.cards {
        match &card.delta {
            Some(delta) => writeln!(out, "{}: {} ({})", card.label, card.value, delta)?,
            None => writeln!(out, "{}: {}", card.label, card.value)?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::Dashboard;
    use bike_core::loader::LoaderConfig;

    const CSV: &str = "\
dteday,hr,season,workingday,weathersit,temp,atemp,hum,windspeed,cnt
2011-01-03,8,1,1,1,0.2,0.2,0.5,0.1,1200
2011-01-03,17,1,1,2,0.3,0.3,0.6,0.2,300
2011-01-08,13,1,0,1,0.4,0.4,0.4,0.3,500
";

    fn dashboard_from_csv() -> (tempfile::NamedTempFile, Dashboard) {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CSV.as_bytes()).unwrap();
        let config = LoaderConfig {
            path: file.path().to_path_buf(),
            ..LoaderConfig::default()
        };
        let dashboard = Dashboard::open(config, 1).unwrap();
        (file, dashboard)
    }

    #[test]
    fn summary_lists_dataset_and_cards() {
        let (_file, dashboard) = dashboard_from_csv();
        let output = dashboard.render(&dashboard.default_selection()).unwrap();
        let mut buf = Vec::new();
        write_summary(&mut buf, &output).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("- Total Records: 3"));
        assert!(text.contains("- Date Range: 2011-01-03 to 2011-01-08 (6 days)"));
        assert!(text.contains("Total Rentals: 2,000 (100.0% of total)"));
        assert!(text.contains("Peak Hour: 8:00 (Avg: 1200 rentals)"));
        assert!(!text.contains("Warning"));
    }

    #[test]
    fn report_round_trips_through_a_file() {
        let (_file, dashboard) = dashboard_from_csv();
        let output = dashboard.render(&dashboard.default_selection()).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        write_report(&Report::from(output), &path).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["title"], DASHBOARD_TITLE);
        assert_eq!(json["charts"].as_array().unwrap().len(), ChartId::ALL.len());
        assert_eq!(json["tabs"][0]["label"], "Overview");
        assert_eq!(json["narrative"].as_array().unwrap().len(), 6);
        assert_eq!(json["selection"]["start"], "2011-01-03");
        assert_eq!(json["metrics"]["values"]["total_rentals"], 2000);
    }
}
