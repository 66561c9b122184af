//! Query result model structs.
//!
//! All structs derive `Serialize` so they can be embedded in chart
//! specifications and reports as JSON.

use serde::Serialize;

/// Total rentals for one calendar month.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MonthlyTotal {
    pub year: i32,
    /// 1 = January
    pub month: u32,
    /// "%b %Y" label, e.g. "Jan 2011"
    pub label: String,
    pub total: u64,
}

/// Mean rentals for one hour of day within a group.
///
/// `group` is the grouping code: the working-day flag (0/1) or the
/// season code (1..=4), depending on the query.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct HourlyMean {
    pub group: u8,
    pub hour: u8,
    pub mean: f64,
}

/// Mean rentals for one (day of week, hour) cell.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DayHourMean {
    /// Monday = 0 through Sunday = 6
    pub day_of_week: u8,
    pub hour: u8,
    pub mean: f64,
}

/// Day-of-week by hour grid of mean rentals: 7 rows of 24 cells.
///
/// Cells with no records are `None` so renderers can draw them as gaps.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WeekHourGrid {
    pub cells: Vec<Vec<Option<f64>>>,
}

impl WeekHourGrid {
    pub const DAYS: usize = 7;
    pub const HOURS: usize = 24;

    pub fn from_means(means: &[DayHourMean]) -> Self {
        let mut cells = vec![vec![None; Self::HOURS]; Self::DAYS];
        for m in means {
            let (d, h) = (m.day_of_week as usize, m.hour as usize);
            if d < Self::DAYS && h < Self::HOURS {
                cells[d][h] = Some(m.mean);
            }
        }
        Self { cells }
    }

    #[cfg(test)]
    pub fn get(&self, day_of_week: usize, hour: usize) -> Option<f64> {
        self.cells.get(day_of_week)?.get(hour).copied().flatten()
    }
}

/// Mean rentals for one category code (e.g. weather situation).
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategoryMean {
    pub code: u8,
    pub mean: f64,
}

/// The hour with the highest mean rentals.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct PeakHour {
    pub hour: u8,
    pub mean: f64,
}

/// Average per-day totals on weekends/holidays versus working days.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq)]
pub struct DayTypeComparison {
    pub weekend_avg: Option<f64>,
    pub weekday_avg: Option<f64>,
    /// `weekend_avg / weekday_avg - 1`
    pub relative_difference: Option<f64>,
}

/// The four headline numbers of the overview.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq)]
pub struct HeadlineMetrics {
    pub total_rentals: Option<u64>,
    /// Fraction of the unfiltered total
    pub total_share: Option<f64>,
    pub avg_daily_rentals: Option<f64>,
    pub peak_hour: Option<PeakHour>,
    pub weekend_vs_weekday: DayTypeComparison,
}
