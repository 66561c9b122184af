//! Random stand-in dataset used when the real data file cannot be read.

use crate::category::{Season, WeatherSituation};
use crate::date_range::DateInterval;
use crate::record::{RecordSet, RentalRecord, MAX_HOUR};
use chrono::{NaiveDate, TimeDelta};
use rand::seq::SliceRandom;
use rand::Rng;

/// Default number of synthetic rows.
pub const DEFAULT_SAMPLE_COUNT: usize = 10_000;

/// Length of the synthetic date window in days (two years).
pub const SYNTHETIC_WINDOW_DAYS: i64 = 365 * 2;

/// First day of the synthetic date window.
pub fn synthetic_epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(2011, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// The fixed window timestamps are drawn from.
pub fn synthetic_window() -> DateInterval {
    let start = synthetic_epoch();
    let end = start + TimeDelta::days(SYNTHETIC_WINDOW_DAYS - 1);
    DateInterval::new(start, end)
}

/// Generate `count` independent random records of the dataset schema.
///
/// Every field is drawn uniformly within its bounds; rental counts fall
/// in 1..=999.
pub fn generate<R: Rng + ?Sized>(count: usize, rng: &mut R) -> RecordSet {
    let days: Vec<NaiveDate> = synthetic_window().days().collect();
    (0..count)
        .map(|_| RentalRecord {
            timestamp: *days.choose(rng).unwrap_or(&days[0]),
            hour: rng.gen_range(0..=MAX_HOUR),
            season: Season::ALL[rng.gen_range(0..Season::ALL.len())],
            is_working_day: rng.gen_bool(0.5),
            weather_situation: WeatherSituation::ALL[rng.gen_range(0..WeatherSituation::ALL.len())],
            temperature_norm: Some(rng.gen::<f64>()),
            feels_like_temp_norm: Some(rng.gen::<f64>()),
            humidity_norm: Some(rng.gen::<f64>()),
            windspeed_norm: Some(rng.gen::<f64>()),
            rental_count: rng.gen_range(1..1000),
        })
        .collect()
}
