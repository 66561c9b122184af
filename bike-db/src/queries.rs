//! Grouped queries backing the charts.
//!
//! Every query aggregates the `rentals` table with `GROUP BY` and returns
//! typed rows from [`crate::models`]. `AVG` and `SUM` skip NULLs, so missing
//! values never poison a group.

use crate::models::{CategoryMean, DayHourMean, HourlyMean, MonthlyTotal, WeekHourGrid};
use crate::Database;
use bike_core::dates;

impl Database {
    /// Number of rows currently loaded.
    pub fn record_count(&self) -> anyhow::Result<usize> {
        let conn = self.conn.borrow();
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM rentals", [], |row| row.get(0))?;
        Ok(usize::try_from(count)?)
    }

    /// Total rentals per calendar month, ordered chronologically.
    pub fn query_monthly_totals(&self) -> anyhow::Result<Vec<MonthlyTotal>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(
            "SELECT year, month, SUM(cnt) AS total
             FROM rentals
             GROUP BY year, month
             ORDER BY year, month",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, i32>(0)?,
                    row.get::<_, u32>(1)?,
                    row.get::<_, i64>(2)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let mut results = Vec::with_capacity(rows.len());
        for (year, month, total) in rows {
            let label = dates::month_year_label(year, month)
                .ok_or_else(|| anyhow::anyhow!("invalid month {} in year {}", month, year))?;
            results.push(MonthlyTotal {
                year,
                month,
                label,
                total: u64::try_from(total)?,
            });
        }
        log::info!(
            "[Bike Debug] query: query_monthly_totals returned {} records",
            results.len()
        );
        Ok(results)
    }

    /// Mean rentals per hour, grouped by the working-day flag.
    ///
    /// Ordered by group (weekend first) then hour.
    pub fn query_hourly_by_day_type(&self) -> anyhow::Result<Vec<HourlyMean>> {
        self.query_hourly_means("working_day", "query_hourly_by_day_type")
    }

    /// Mean rentals per hour, grouped by season code.
    pub fn query_hourly_by_season(&self) -> anyhow::Result<Vec<HourlyMean>> {
        self.query_hourly_means("season", "query_hourly_by_season")
    }

    fn query_hourly_means(&self, group_column: &str, name: &str) -> anyhow::Result<Vec<HourlyMean>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(&format!(
            "SELECT {group}, hour, AVG(cnt)
             FROM rentals
             GROUP BY {group}, hour
             ORDER BY {group}, hour",
            group = group_column
        ))?;
        let rows = stmt
            .query_map([], |row| {
                Ok(HourlyMean {
                    group: row.get(0)?,
                    hour: row.get(1)?,
                    mean: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!("[Bike Debug] query: {} returned {} records", name, rows.len());
        Ok(rows)
    }

    /// Mean rentals per (day of week, hour) cell present in the data.
    pub fn query_day_hour_means(&self) -> anyhow::Result<Vec<DayHourMean>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(
            "SELECT day_of_week, hour, AVG(cnt)
             FROM rentals
             GROUP BY day_of_week, hour
             ORDER BY day_of_week, hour",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok(DayHourMean {
                    day_of_week: row.get(0)?,
                    hour: row.get(1)?,
                    mean: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!(
            "[Bike Debug] query: query_day_hour_means returned {} records",
            rows.len()
        );
        Ok(rows)
    }

    /// [`query_day_hour_means`](Self::query_day_hour_means) pivoted to a 7x24 grid.
    pub fn query_week_hour_grid(&self) -> anyhow::Result<WeekHourGrid> {
        Ok(WeekHourGrid::from_means(&self.query_day_hour_means()?))
    }

    /// Mean rentals per weather situation code, ascending by code.
    pub fn query_weather_means(&self) -> anyhow::Result<Vec<CategoryMean>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(
            "SELECT weather, AVG(cnt)
             FROM rentals
             GROUP BY weather
             ORDER BY weather",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok(CategoryMean {
                    code: row.get(0)?,
                    mean: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!(
            "[Bike Debug] query: query_weather_means returned {} records",
            rows.len()
        );
        Ok(rows)
    }
}
