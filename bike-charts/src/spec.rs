//! The declarative chart specification handed to a renderer.
//!
//! A [`ChartSpec`] names the mark, the axes, the color mapping and the data
//! already shaped for that mark. It serializes to JSON and carries no
//! rendering logic of its own.

use bike_core::Factor;
use bike_data::stats::HistogramBin;
use serde::Serialize;

/// Stable identifier of each dashboard chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChartId {
    MonthlyTrend,
    RentalDistribution,
    FactorCorrelation,
    HourlyDayType,
    HourlySeason,
    WeeklyHeatmap,
    WeatherImpact,
    TemperatureScatter,
    HumidityScatter,
    WindspeedScatter,
    #[serde(rename = "combined-weather-3d")]
    CombinedWeather3d,
}

impl ChartId {
    /// Every chart, in dashboard order.
    pub const ALL: [ChartId; 11] = [
        ChartId::MonthlyTrend,
        ChartId::RentalDistribution,
        ChartId::FactorCorrelation,
        ChartId::HourlyDayType,
        ChartId::HourlySeason,
        ChartId::WeeklyHeatmap,
        ChartId::WeatherImpact,
        ChartId::TemperatureScatter,
        ChartId::HumidityScatter,
        ChartId::WindspeedScatter,
        ChartId::CombinedWeather3d,
    ];

    /// Dashboard tab the chart is shown on.
    pub fn tab(self) -> Tab {
        match self {
            ChartId::MonthlyTrend | ChartId::RentalDistribution | ChartId::FactorCorrelation => {
                Tab::Overview
            }
            ChartId::HourlyDayType | ChartId::HourlySeason | ChartId::WeeklyHeatmap => {
                Tab::TimeAnalysis
            }
            ChartId::WeatherImpact
            | ChartId::TemperatureScatter
            | ChartId::HumidityScatter
            | ChartId::WindspeedScatter
            | ChartId::CombinedWeather3d => Tab::WeatherImpact,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tab {
    Overview,
    TimeAnalysis,
    WeatherImpact,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Overview, Tab::TimeAnalysis, Tab::WeatherImpact];

    pub fn label(self) -> &'static str {
        match self {
            Tab::Overview => "Overview",
            Tab::TimeAnalysis => "Time Analysis",
            Tab::WeatherImpact => "Weather Impact",
        }
    }

    /// Charts on this tab, in dashboard order.
    pub fn charts(self) -> Vec<ChartId> {
        ChartId::ALL.into_iter().filter(|id| id.tab() == self).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mark {
    Line,
    Histogram,
    Heatmap,
    Bar,
    Scatter,
    Scatter3d,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticks: Option<Ticks>,
}

impl Axis {
    pub fn titled(title: &str) -> Self {
        Self {
            title: title.to_string(),
            ticks: None,
        }
    }

    pub fn with_ticks(mut self, ticks: Ticks) -> Self {
        self.ticks = Some(ticks);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Ticks {
    /// Evenly spaced ticks from `start` every `step`
    Linear { start: f64, step: f64 },
    /// One label per category position
    Array { values: Vec<f64>, labels: Vec<String> },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorStop {
    pub at: f64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedColor {
    pub name: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColorScale {
    /// A named continuous scheme, optionally pinned to a domain. `field`
    /// names the column the color encodes.
    Continuous {
        scheme: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        field: Option<Factor>,
        #[serde(skip_serializing_if = "Option::is_none")]
        domain: Option<[f64; 2]>,
        show_scale: bool,
    },
    /// A custom continuous scale from explicit stops in [0, 1]
    Stops { stops: Vec<ColorStop> },
    /// A fixed color per series
    Categorical { mapping: Vec<NamedColor> },
}

/// An x position: a category label or a number.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum XValue {
    Label(String),
    Number(f64),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Point {
    pub x: XValue,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub line_width: f64,
    pub markers: bool,
    pub points: Vec<Point>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// A fitted straight line drawn from `(x_min, y_at_min)` to `(x_max, y_at_max)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendLine {
    pub slope: f64,
    pub intercept: f64,
    pub x_min: f64,
    pub x_max: f64,
    pub y_at_min: f64,
    pub y_at_max: f64,
}

/// Chart data, shaped for the chart's mark.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChartData {
    Series {
        series: Vec<Series>,
    },
    Histogram {
        bins: Vec<HistogramBin>,
        bar_gap: f64,
    },
    Matrix {
        x_labels: Vec<String>,
        y_labels: Vec<String>,
        /// `cells[row][column]`; `None` is a gap
        cells: Vec<Vec<Option<f64>>>,
        /// Per-cell annotations, same shape as `cells`
        #[serde(skip_serializing_if = "Option::is_none")]
        text: Option<Vec<Vec<String>>>,
    },
    Bars {
        bars: Vec<Bar>,
    },
    Scatter {
        points: Vec<ScatterPoint>,
        #[serde(skip_serializing_if = "Option::is_none")]
        trend: Option<TrendLine>,
    },
    Scatter3d {
        points: Vec<Point3>,
        /// Column the marker size encodes, up to `size_max`
        size: Factor,
        size_max: f64,
        opacity: f64,
    },
}

impl ChartData {
    /// Number of plotted items (points, bins, cells or bars).
    pub fn len(&self) -> usize {
        match self {
            ChartData::Series { series } => series.iter().map(|s| s.points.len()).sum(),
            ChartData::Histogram { bins, .. } => bins.len(),
            ChartData::Matrix { cells, .. } => cells.iter().map(Vec::len).sum(),
            ChartData::Bars { bars } => bars.len(),
            ChartData::Scatter { points, .. } => points.len(),
            ChartData::Scatter3d { points, .. } => points.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub id: ChartId,
    pub title: String,
    pub mark: Mark,
    pub x: Axis,
    pub y: Axis,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorScale>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend_title: Option<String>,
    pub height: u32,
    pub data: ChartData,
}
