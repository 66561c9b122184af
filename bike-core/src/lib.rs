//! Core types and data loading for the bike-share dashboard.
//!
//! - `record`: hourly rental records and record sets, parsed from CSV
//! - `category`: season and weather situation codes
//! - `date_range`: inclusive date intervals
//! - `loader`: cached CSV loading with a synthetic fallback

pub mod category;
pub mod date_range;
pub mod dates;
pub mod error;
pub mod loader;
pub mod record;
pub mod synthetic;

pub use category::{Season, WeatherSituation};
pub use date_range::DateInterval;
pub use error::BikeError;
pub use record::{Factor, RecordSet, RentalRecord};
