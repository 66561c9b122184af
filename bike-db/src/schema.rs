//! SQL schema for the in-memory aggregation store.
//!
//! A single `rentals` table holds one row per record of the materialized
//! record set. Derived calendar columns are computed at insert time.

/// Returns the full SQL schema as a single batch string.
///
/// `rentals` columns:
/// - `seq` - insertion order of the source record set
/// - `date` - calendar date as "YYYY-MM-DD"
/// - `year`, `month`, `day_of_week` - derived from `date` (Monday = 0)
/// - `hour`, `season`, `working_day`, `weather` - integer codes
/// - `temp`, `atemp`, `hum`, `windspeed` - normalized values, NULL when missing
/// - `cnt` - rental count
pub fn create_schema() -> &'static str {
    r#"
    CREATE TABLE IF NOT EXISTS rentals (
        seq INTEGER PRIMARY KEY,
        date TEXT NOT NULL,
        year INTEGER NOT NULL,
        month INTEGER NOT NULL,
        day_of_week INTEGER NOT NULL,
        hour INTEGER NOT NULL,
        season INTEGER NOT NULL,
        working_day INTEGER NOT NULL,
        weather INTEGER NOT NULL,
        temp REAL,
        atemp REAL,
        hum REAL,
        windspeed REAL,
        cnt INTEGER NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_rentals_date ON rentals(date);
    CREATE INDEX IF NOT EXISTS idx_rentals_hour ON rentals(hour);
    "#
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn schema_is_valid_sql() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(create_schema())
            .expect("Schema SQL should be valid");
    }

    #[test]
    fn schema_creates_table_and_indexes() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(create_schema()).unwrap();

        for (kind, name) in [
            ("table", "rentals"),
            ("index", "idx_rentals_date"),
            ("index", "idx_rentals_hour"),
        ] {
            let count: i64 = conn
                .query_row(
                    "SELECT COUNT(*) FROM sqlite_master WHERE type = ?1 AND name = ?2",
                    [kind, name],
                    |row| row.get(0),
                )
                .unwrap();
            assert_eq!(count, 1, "{} '{}' should exist", kind, name);
        }
    }

    #[test]
    fn schema_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(create_schema()).unwrap();
        // Applying schema a second time should not fail due to IF NOT EXISTS.
        conn.execute_batch(create_schema())
            .expect("Applying schema twice should succeed due to IF NOT EXISTS");
    }
}
