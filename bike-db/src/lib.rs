//! In-memory SQLite aggregation store for bike-share records.
//!
//! A record set (the full dataset or a filtered view) is materialized into a
//! single `rentals` table, and every grouped figure the dashboard shows is a
//! SQL `GROUP BY` with `SUM`/`AVG` against it.
//!
//! # Usage
//!
//! ```rust
//! use bike_core::RecordSet;
//! use bike_db::Database;
//!
//! let records = RecordSet::from_csv_str(
//!     "dteday,hr,season,workingday,weathersit,temp,atemp,hum,windspeed,cnt\n\
//!      2011-01-03,8,1,1,1,0.2,0.2,0.5,0.1,100\n",
//! )
//! .unwrap();
//! let db = Database::from_records(&records).unwrap();
//! assert_eq!(db.total_rentals().unwrap(), Some(100));
//! assert_eq!(db.peak_hour().unwrap().unwrap().hour, 8);
//! ```
//!
//! # Tables
//!
//! See [`schema::create_schema`] for the full SQL schema.

pub mod schema;
mod loader;
mod queries;
pub mod metrics;
pub mod models;

use bike_core::RecordSet;
use rusqlite::Connection;
use std::cell::RefCell;
use std::rc::Rc;

/// In-memory SQLite database holding one record set.
///
/// This struct is cheaply cloneable (via `Rc`); clones share the same
/// connection. It is single-threaded by construction.
#[derive(Clone)]
pub struct Database {
    conn: Rc<RefCell<Connection>>,
}

impl Database {
    /// Create a new in-memory database with the schema applied.
    ///
    /// The database is empty after creation; use
    /// [`load_records`](Self::load_records) to populate it.
    pub fn new() -> anyhow::Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(schema::create_schema())?;
        Ok(Self {
            conn: Rc::new(RefCell::new(conn)),
        })
    }

    /// Create a database and load `records` into it.
    pub fn from_records(records: &RecordSet) -> anyhow::Result<Self> {
        let db = Self::new()?;
        db.load_records(records)?;
        Ok(db)
    }
}
