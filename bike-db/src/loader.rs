//! Materializes a record set into the `rentals` table.

use crate::Database;
use bike_core::{dates, RecordSet};
use rusqlite::params;

impl Database {
    /// Insert every record of `records`, in order, inside one transaction.
    ///
    /// Derived calendar columns (`year`, `month`, `day_of_week`) are computed
    /// here from each record's timestamp.
    pub fn load_records(&self, records: &RecordSet) -> anyhow::Result<()> {
        let mut conn = self.conn.borrow_mut();
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO rentals
                 (date, year, month, day_of_week, hour, season, working_day, weather,
                  temp, atemp, hum, windspeed, cnt)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
            )?;
            for r in records {
                stmt.execute(params![
                    dates::format_date(&r.timestamp),
                    r.year(),
                    r.month(),
                    r.day_of_week(),
                    r.hour,
                    r.season.code(),
                    r.is_working_day,
                    r.weather_situation.code(),
                    r.temperature_norm,
                    r.feels_like_temp_norm,
                    r.humidity_norm,
                    r.windspeed_norm,
                    r.rental_count,
                ])?;
            }
        }
        tx.commit()?;
        log::info!("[Bike Debug] loader: Loaded {} rental records", records.len());
        Ok(())
    }
}
