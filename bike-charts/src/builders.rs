//! One builder per dashboard chart.
//!
//! Builders are pure: they read the filtered view (or its aggregation
//! store) and return a [`ChartSpec`]. Grouped figures come from SQL queries
//! on the store; correlation, binning, trends and sampling come from
//! `bike_data`.

use crate::palette;
use crate::spec::{
    Axis, Bar, ChartData, ChartId, ChartSpec, ColorScale, ColorStop, Mark, NamedColor, Point,
    Point3, ScatterPoint, Series, Ticks, TrendLine, XValue,
};
use bike_core::dates::WEEKDAY_NAMES;
use bike_core::{Factor, RecordSet, RentalRecord, Season, WeatherSituation};
use bike_data::sample::subsample;
use bike_data::stats::{correlation_matrix, histogram, linear_fit};
use bike_db::models::{HourlyMean, WeekHourGrid};
use bike_db::Database;
use rand::Rng;

/// Bin count of the rental distribution histogram.
pub const HISTOGRAM_BINS: usize = 30;

/// Most points drawn by a single-factor scatter.
pub const SCATTER_MAX_POINTS: usize = 1_000;

/// Most points drawn by the 3D scatter.
pub const SCATTER_3D_MAX_POINTS: usize = 2_000;

/// Factors correlated in the heatmap, in display order.
pub const CORRELATION_FACTORS: [Factor; 5] = Factor::ALL;

fn hour_axis() -> Axis {
    Axis::titled("Hour of Day").with_ticks(Ticks::Linear {
        start: 0.0,
        step: 1.0,
    })
}

fn hourly_series(rows: &[HourlyMean], group: u8, name: &str, color: &str, line_width: f64) -> Series {
    Series {
        name: name.to_string(),
        color: Some(color.to_string()),
        line_width,
        markers: true,
        points: rows
            .iter()
            .filter(|r| r.group == group)
            .map(|r| Point {
                x: XValue::Number(f64::from(r.hour)),
                y: r.mean,
            })
            .collect(),
    }
}

/// Total rentals per month as a line with markers.
pub fn monthly_trend(store: &Database) -> anyhow::Result<ChartSpec> {
    let months = store.query_monthly_totals()?;
    let series = Series {
        name: "Total Rentals".to_string(),
        color: None,
        line_width: 2.0,
        markers: true,
        points: months
            .into_iter()
            .map(|m| Point {
                x: XValue::Label(m.label),
                y: m.total as f64,
            })
            .collect(),
    };
    Ok(ChartSpec {
        id: ChartId::MonthlyTrend,
        title: "Monthly Bike Rental Trends".to_string(),
        mark: Mark::Line,
        x: Axis::titled("Month"),
        y: Axis::titled("Total Rentals"),
        z: None,
        color: None,
        legend_title: None,
        height: 400,
        data: ChartData::Series {
            series: vec![series],
        },
    })
}

/// Histogram of hourly rental counts.
pub fn rental_distribution(view: &RecordSet) -> ChartSpec {
    let counts: Vec<f64> = view.iter().map(|r| f64::from(r.rental_count)).collect();
    ChartSpec {
        id: ChartId::RentalDistribution,
        title: "Distribution of Hourly Bike Rentals".to_string(),
        mark: Mark::Histogram,
        x: Axis::titled("Number of Rentals"),
        y: Axis::titled("Count"),
        z: None,
        color: None,
        legend_title: None,
        height: 350,
        data: ChartData::Histogram {
            bins: histogram(&counts, HISTOGRAM_BINS),
            bar_gap: 0.1,
        },
    }
}

/// Pearson correlation heatmap of the weather factors and rentals,
/// annotated to two decimals.
pub fn factor_correlation(view: &RecordSet) -> ChartSpec {
    let matrix = correlation_matrix(view.as_slice(), &CORRELATION_FACTORS);
    let labels: Vec<String> = matrix.factors.iter().map(|f| f.column().to_string()).collect();
    let text: Vec<Vec<String>> = matrix
        .values
        .iter()
        .map(|row| {
            row.iter()
                .map(|v| v.map(|v| format!("{:.2}", v)).unwrap_or_default())
                .collect()
        })
        .collect();
    ChartSpec {
        id: ChartId::FactorCorrelation,
        title: "Correlation Between Factors and Rentals".to_string(),
        mark: Mark::Heatmap,
        x: Axis::titled(""),
        y: Axis::titled(""),
        z: None,
        color: Some(ColorScale::Continuous {
            scheme: palette::CORRELATION_SCHEME.to_string(),
            field: None,
            domain: Some([-1.0, 1.0]),
            show_scale: true,
        }),
        legend_title: None,
        height: 350,
        data: ChartData::Matrix {
            x_labels: labels.clone(),
            y_labels: labels,
            cells: matrix.values,
            text: Some(text),
        },
    }
}

/// Mean rentals by hour, one line for weekends/holidays and one for working days.
pub fn hourly_by_day_type(store: &Database) -> anyhow::Result<ChartSpec> {
    let rows = store.query_hourly_by_day_type()?;
    let series: Vec<Series> = [
        (0u8, "Weekend", palette::WEEKEND_COLOR),
        (1u8, "Weekday", palette::WEEKDAY_COLOR),
    ]
    .into_iter()
    .map(|(group, name, color)| hourly_series(&rows, group, name, color, 3.0))
    .filter(|s| !s.points.is_empty())
    .collect();
    Ok(ChartSpec {
        id: ChartId::HourlyDayType,
        title: "Hourly Bike Rental Patterns: Weekdays vs. Weekends".to_string(),
        mark: Mark::Line,
        x: hour_axis(),
        y: Axis::titled("Average Rentals"),
        z: None,
        color: Some(ColorScale::Categorical {
            mapping: vec![
                NamedColor {
                    name: "Weekend".to_string(),
                    color: palette::WEEKEND_COLOR.to_string(),
                },
                NamedColor {
                    name: "Weekday".to_string(),
                    color: palette::WEEKDAY_COLOR.to_string(),
                },
            ],
        }),
        legend_title: Some("Day Type".to_string()),
        height: 450,
        data: ChartData::Series { series },
    })
}

/// Mean rentals by hour, one line per season.
pub fn hourly_by_season(store: &Database) -> anyhow::Result<ChartSpec> {
    let rows = store.query_hourly_by_season()?;
    let series: Vec<Series> = Season::ALL
        .into_iter()
        .map(|s| hourly_series(&rows, s.code(), s.label(), palette::season_color(s), 2.0))
        .filter(|s| !s.points.is_empty())
        .collect();
    Ok(ChartSpec {
        id: ChartId::HourlySeason,
        title: "Hourly Bike Rental Patterns Across Seasons".to_string(),
        mark: Mark::Line,
        x: hour_axis(),
        y: Axis::titled("Average Rentals"),
        z: None,
        color: Some(ColorScale::Categorical {
            mapping: Season::ALL
                .into_iter()
                .map(|s| NamedColor {
                    name: s.label().to_string(),
                    color: palette::season_color(s).to_string(),
                })
                .collect(),
        }),
        legend_title: Some("Season".to_string()),
        height: 450,
        data: ChartData::Series { series },
    })
}

/// Mean rentals on a day-of-week by hour grid.
pub fn weekly_heatmap(store: &Database) -> anyhow::Result<ChartSpec> {
    let grid = store.query_week_hour_grid()?;
    let day_labels: Vec<String> = WEEKDAY_NAMES.iter().map(|d| d.to_string()).collect();
    Ok(ChartSpec {
        id: ChartId::WeeklyHeatmap,
        title: "Weekly Rental Pattern Heatmap".to_string(),
        mark: Mark::Heatmap,
        x: hour_axis(),
        y: Axis::titled("Day of Week").with_ticks(Ticks::Array {
            values: (0..WeekHourGrid::DAYS).map(|d| d as f64).collect(),
            labels: day_labels.clone(),
        }),
        z: Some(Axis::titled("Avg. Rentals")),
        color: Some(ColorScale::Stops {
            stops: palette::HEATMAP_STOPS
                .iter()
                .map(|(at, color)| ColorStop {
                    at: *at,
                    color: color.to_string(),
                })
                .collect(),
        }),
        legend_title: None,
        height: 450,
        data: ChartData::Matrix {
            x_labels: (0..WeekHourGrid::HOURS).map(|h| h.to_string()).collect(),
            y_labels: day_labels,
            cells: grid.cells,
            text: None,
        },
    })
}

/// Mean rentals per weather situation as bars.
pub fn weather_impact(store: &Database) -> anyhow::Result<ChartSpec> {
    let bars = store
        .query_weather_means()?
        .into_iter()
        .map(|m| {
            let label = WeatherSituation::try_from(m.code)
                .map(|w| w.label().to_string())
                .unwrap_or_else(|_| m.code.to_string());
            Bar {
                label,
                value: m.mean,
            }
        })
        .collect();
    Ok(ChartSpec {
        id: ChartId::WeatherImpact,
        title: "Impact of Weather Conditions on Bike Rentals".to_string(),
        mark: Mark::Bar,
        x: Axis::titled("Weather Condition"),
        y: Axis::titled("Average Rentals"),
        z: None,
        color: Some(ColorScale::Continuous {
            scheme: palette::WEATHER_BAR_SCHEME.to_string(),
            field: Some(Factor::RentalCount),
            domain: None,
            show_scale: false,
        }),
        legend_title: None,
        height: 400,
        data: ChartData::Bars { bars },
    })
}

/// The weather factors plotted against rentals one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScatterFactor {
    Temperature,
    Humidity,
    WindSpeed,
}

impl ScatterFactor {
    pub const ALL: [ScatterFactor; 3] = [
        ScatterFactor::Temperature,
        ScatterFactor::Humidity,
        ScatterFactor::WindSpeed,
    ];

    fn factor(self) -> Factor {
        match self {
            ScatterFactor::Temperature => Factor::Temperature,
            ScatterFactor::Humidity => Factor::Humidity,
            ScatterFactor::WindSpeed => Factor::WindSpeed,
        }
    }

    fn id(self) -> ChartId {
        match self {
            ScatterFactor::Temperature => ChartId::TemperatureScatter,
            ScatterFactor::Humidity => ChartId::HumidityScatter,
            ScatterFactor::WindSpeed => ChartId::WindspeedScatter,
        }
    }

    fn title(self) -> &'static str {
        match self {
            ScatterFactor::Temperature => "Relationship Between Temperature and Bike Rentals",
            ScatterFactor::Humidity => "Impact of Humidity on Bike Rentals",
            ScatterFactor::WindSpeed => "Impact of Wind Speed on Bike Rentals",
        }
    }

    fn axis_title(self) -> &'static str {
        match self {
            ScatterFactor::Temperature => "Temperature (Normalized)",
            ScatterFactor::Humidity => "Humidity (Normalized)",
            ScatterFactor::WindSpeed => "Wind Speed (Normalized)",
        }
    }

    fn scheme(self) -> &'static str {
        match self {
            ScatterFactor::Temperature => palette::TEMPERATURE_SCHEME,
            ScatterFactor::Humidity => palette::HUMIDITY_SCHEME,
            ScatterFactor::WindSpeed => palette::WINDSPEED_SCHEME,
        }
    }

    fn height(self) -> u32 {
        match self {
            ScatterFactor::Temperature => 400,
            ScatterFactor::Humidity | ScatterFactor::WindSpeed => 350,
        }
    }
}

/// Rentals against one weather factor with an OLS trend line.
///
/// Views larger than [`SCATTER_MAX_POINTS`] are uniformly subsampled first;
/// rows missing the factor are then dropped.
pub fn factor_scatter<R: Rng + ?Sized>(view: &RecordSet, factor: ScatterFactor, rng: &mut R) -> ChartSpec {
    let sampled: Vec<RentalRecord> = subsample(view.as_slice(), SCATTER_MAX_POINTS, rng);
    let points: Vec<ScatterPoint> = sampled
        .iter()
        .filter_map(|r| {
            Some(ScatterPoint {
                x: r.factor(factor.factor())?,
                y: f64::from(r.rental_count),
            })
        })
        .collect();
    let trend = linear_fit(points.iter().map(|p| (p.x, p.y))).map(|fit| {
        let x_min = points.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
        let x_max = points.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max);
        TrendLine {
            slope: fit.slope,
            intercept: fit.intercept,
            x_min,
            x_max,
            y_at_min: fit.predict(x_min),
            y_at_max: fit.predict(x_max),
        }
    });
    ChartSpec {
        id: factor.id(),
        title: factor.title().to_string(),
        mark: Mark::Scatter,
        x: Axis::titled(factor.axis_title()),
        y: Axis::titled("Number of Rentals"),
        z: None,
        color: Some(ColorScale::Continuous {
            scheme: factor.scheme().to_string(),
            field: Some(factor.factor()),
            domain: None,
            show_scale: true,
        }),
        legend_title: None,
        height: factor.height(),
        data: ChartData::Scatter { points, trend },
    }
}

/// Temperature, humidity and rentals in 3D, sized and colored by rentals.
pub fn combined_weather_3d<R: Rng + ?Sized>(view: &RecordSet, rng: &mut R) -> ChartSpec {
    let sampled: Vec<RentalRecord> = subsample(view.as_slice(), SCATTER_3D_MAX_POINTS, rng);
    let points = sampled
        .iter()
        .filter_map(|r| {
            Some(Point3 {
                x: r.temperature_norm?,
                y: r.humidity_norm?,
                z: f64::from(r.rental_count),
            })
        })
        .collect();
    ChartSpec {
        id: ChartId::CombinedWeather3d,
        title: "3D View: Temperature, Humidity and Bike Rentals".to_string(),
        mark: Mark::Scatter3d,
        x: Axis::titled("Temperature (Normalized)"),
        y: Axis::titled("Humidity (Normalized)"),
        z: Some(Axis::titled("Number of Rentals")),
        color: Some(ColorScale::Continuous {
            scheme: palette::RENTALS_3D_SCHEME.to_string(),
            field: Some(Factor::RentalCount),
            domain: None,
            show_scale: true,
        }),
        legend_title: None,
        height: 700,
        data: ChartData::Scatter3d {
            points,
            size: Factor::RentalCount,
            size_max: 10.0,
            opacity: 0.7,
        },
    }
}

/// Every dashboard chart for `view`, in [`ChartId::ALL`] order.
///
/// `store` must hold the same records as `view`.
pub fn build_all<R: Rng + ?Sized>(
    view: &RecordSet,
    store: &Database,
    rng: &mut R,
) -> anyhow::Result<Vec<ChartSpec>> {
    let mut charts = vec![
        monthly_trend(store)?,
        rental_distribution(view),
        factor_correlation(view),
        hourly_by_day_type(store)?,
        hourly_by_season(store)?,
        weekly_heatmap(store)?,
        weather_impact(store)?,
    ];
    for factor in ScatterFactor::ALL {
        charts.push(factor_scatter(view, factor, rng));
    }
    charts.push(combined_weather_3d(view, rng));
    log::debug!("charts: built {} chart specifications", charts.len());
    Ok(charts)
}
