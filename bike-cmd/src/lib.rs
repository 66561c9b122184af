//! Command implementations for the bike-share dashboard CLI.
//!
//! Provides subcommands that load the dataset, apply the filter controls
//! and emit the dashboard as a JSON report, a text summary, or an
//! interactive stream of updates.

use bike_core::dates::parse_date;
use bike_core::loader::{LoaderConfig, DEFAULT_DATA_PATH};
use bike_core::synthetic::DEFAULT_SAMPLE_COUNT;
use bike_core::{RecordSet, Season, WeatherSituation};
use bike_data::FilterSelection;
use chrono::NaiveDate;
use clap::{Args, Subcommand};
use std::io;
use std::path::PathBuf;

pub mod dashboard;
pub mod format;
pub mod narrative;
pub mod report;
pub mod session;

use dashboard::Dashboard;

/// Where the dataset comes from.
#[derive(Args, Debug, Clone)]
pub struct DataArgs {
    /// Path to the cleaned hourly rentals CSV
    #[arg(short = 'd', long, default_value = DEFAULT_DATA_PATH)]
    pub data: PathBuf,

    /// Row count of the synthetic dataset used when the file cannot be read
    #[arg(long, default_value_t = DEFAULT_SAMPLE_COUNT)]
    pub samples: usize,

    /// Seed for synthetic data and chart subsampling (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,
}

impl DataArgs {
    pub fn open_dashboard(&self) -> anyhow::Result<Dashboard> {
        let seed = self.seed.unwrap_or_else(rand::random);
        let config = LoaderConfig {
            path: self.data.clone(),
            sample_count: self.samples,
            seed: self.seed,
        };
        Dashboard::open(config, seed)
    }
}

/// The filter controls.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// First date of the range (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date_arg)]
    pub start: Option<NaiveDate>,

    /// Last date of the range, inclusive (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date_arg)]
    pub end: Option<NaiveDate>,

    /// Season code (1-4) or name; repeat to select several
    #[arg(long = "season", value_parser = parse_season_arg)]
    pub seasons: Vec<Season>,

    /// Weather situation code (1-4); repeat to select several
    #[arg(long = "weather", value_parser = parse_weather_arg)]
    pub weather: Vec<WeatherSituation>,
}

impl FilterArgs {
    /// Build the selection, defaulting to the dataset's full date bounds
    /// when neither endpoint is given.
    pub fn selection(&self, records: &RecordSet) -> FilterSelection {
        let mut selection = FilterSelection::all_for(records);
        if self.start.is_some() || self.end.is_some() {
            selection.start = self.start;
            selection.end = self.end;
        }
        if !self.seasons.is_empty() {
            selection.seasons = self.seasons.iter().copied().collect();
        }
        if !self.weather.is_empty() {
            selection.weather = self.weather.iter().copied().collect();
        }
        selection
    }
}

fn parse_date_arg(s: &str) -> Result<NaiveDate, String> {
    parse_date(s).ok_or_else(|| format!("invalid date '{}', expected YYYY-MM-DD", s))
}

fn parse_season_arg(s: &str) -> Result<Season, String> {
    if let Ok(code) = s.parse::<u8>() {
        return Season::try_from(code).map_err(|e| e.to_string());
    }
    Season::ALL
        .into_iter()
        .find(|season| season.label().eq_ignore_ascii_case(s))
        .ok_or_else(|| format!("unknown season '{}'", s))
}

fn parse_weather_arg(s: &str) -> Result<WeatherSituation, String> {
    let code: u8 = s
        .parse()
        .map_err(|_| format!("weather must be a code from 1 to 4, got '{}'", s))?;
    WeatherSituation::try_from(code).map_err(|e| e.to_string())
}

#[derive(Subcommand)]
pub enum Command {
    /// Write the full dashboard (metrics, charts, narrative) as JSON
    Report {
        #[command(flatten)]
        data: DataArgs,

        #[command(flatten)]
        filter: FilterArgs,

        /// Output path for the JSON report
        #[arg(short = 'o', long)]
        output: PathBuf,
    },

    /// Print dataset information and the headline metrics
    Summary {
        #[command(flatten)]
        data: DataArgs,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Read one JSON filter selection per stdin line and stream back what changed
    Session {
        #[command(flatten)]
        data: DataArgs,
    },
}

pub fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Report {
            data,
            filter,
            output,
        } => {
            let dashboard = data.open_dashboard()?;
            let selection = filter.selection(dashboard.records());
            let rendered = dashboard.render(&selection)?;
            report::write_report(&report::Report::from(rendered), &output)
        }
        Command::Summary { data, filter } => {
            let dashboard = data.open_dashboard()?;
            let selection = filter.selection(dashboard.records());
            let rendered = dashboard.render(&selection)?;
            report::write_summary(&mut io::stdout().lock(), &rendered)
        }
        Command::Session { data } => {
            let mut dashboard = data.open_dashboard()?;
            let applied = session::run_session(
                &mut dashboard,
                io::stdin().lock(),
                &mut io::stdout().lock(),
            )?;
            log::info!("[Bike Debug] session: applied {} selections", applied);
            Ok(())
        }
    }
}
