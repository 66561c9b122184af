//! Headline metrics over the loaded record set.
//!
//! Each metric is `None` when it is undefined for the data at hand (no rows,
//! an empty partition, a zero divisor). Callers render `None` as a dash.

use crate::models::{DayTypeComparison, HeadlineMetrics, PeakHour};
use crate::Database;
use rusqlite::{params, OptionalExtension};

impl Database {
    /// Sum of rental counts, `None` when there are no rows.
    pub fn total_rentals(&self) -> anyhow::Result<Option<u64>> {
        let conn = self.conn.borrow();
        let total: Option<i64> = conn.query_row("SELECT SUM(cnt) FROM rentals", [], |row| row.get(0))?;
        Ok(total.map(u64::try_from).transpose()?)
    }

    /// Mean over distinct dates of each date's total rentals.
    pub fn avg_daily_rentals(&self) -> anyhow::Result<Option<f64>> {
        let conn = self.conn.borrow();
        let avg: Option<f64> = conn.query_row(
            "SELECT AVG(day_total) FROM (
                 SELECT SUM(cnt) AS day_total FROM rentals GROUP BY date
             )",
            [],
            |row| row.get(0),
        )?;
        Ok(avg)
    }

    /// Hour of day with the highest mean rentals; ties go to the earliest hour.
    pub fn peak_hour(&self) -> anyhow::Result<Option<PeakHour>> {
        let conn = self.conn.borrow();
        let peak = conn
            .query_row(
                "SELECT hour, AVG(cnt) AS mean
                 FROM rentals
                 GROUP BY hour
                 ORDER BY mean DESC, hour ASC
                 LIMIT 1",
                [],
                |row| {
                    Ok(PeakHour {
                        hour: row.get(0)?,
                        mean: row.get(1)?,
                    })
                },
            )
            .optional()?;
        Ok(peak)
    }

    /// Average per-date totals for one working-day flag.
    fn avg_daily_rentals_where_working(&self, working_day: bool) -> anyhow::Result<Option<f64>> {
        let conn = self.conn.borrow();
        let avg: Option<f64> = conn.query_row(
            "SELECT AVG(day_total) FROM (
                 SELECT SUM(cnt) AS day_total FROM rentals
                 WHERE working_day = ?1
                 GROUP BY date
             )",
            params![working_day],
            |row| row.get(0),
        )?;
        Ok(avg)
    }

    /// Weekend/holiday versus working-day average daily rentals.
    pub fn weekend_vs_weekday(&self) -> anyhow::Result<DayTypeComparison> {
        let weekend_avg = self.avg_daily_rentals_where_working(false)?;
        let weekday_avg = self.avg_daily_rentals_where_working(true)?;
        let relative_difference = match (weekend_avg, weekday_avg) {
            (Some(weekend), Some(weekday)) if weekday != 0.0 => Some(weekend / weekday - 1.0),
            _ => None,
        };
        Ok(DayTypeComparison {
            weekend_avg,
            weekday_avg,
            relative_difference,
        })
    }

    /// All headline metrics for this store, with `baseline` as the
    /// denominator of the share.
    pub fn headline_metrics(&self, baseline: &Database) -> anyhow::Result<HeadlineMetrics> {
        let metrics = HeadlineMetrics {
            total_rentals: self.total_rentals()?,
            total_share: total_share(self, baseline)?,
            avg_daily_rentals: self.avg_daily_rentals()?,
            peak_hour: self.peak_hour()?,
            weekend_vs_weekday: self.weekend_vs_weekday()?,
        };
        log::debug!("metrics: {:?}", metrics);
        Ok(metrics)
    }
}

/// Fraction of `baseline`'s total rentals found in `view`.
///
/// `None` when either total is unavailable or the baseline total is zero.
pub fn total_share(view: &Database, baseline: &Database) -> anyhow::Result<Option<f64>> {
    let share = match (view.total_rentals()?, baseline.total_rentals()?) {
        (Some(part), Some(whole)) if whole > 0 => Some(part as f64 / whole as f64),
        _ => None,
    };
    Ok(share)
}
