use crate::category::{Season, WeatherSituation};
use crate::date_range::DateInterval;
use crate::dates;
use crate::error::{BikeError, Result};
use chrono::{Datelike, NaiveDate};
use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};
use std::io::Read;

/// Highest valid hour-of-day value.
pub const MAX_HOUR: u8 = 23;

/// A single hourly rental observation.
///
/// Normalized weather quantities are `None` when the source cell was empty
/// or NaN; aggregates skip missing values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RentalRecord {
    pub timestamp: NaiveDate,
    /// Hour of day, 0..=23
    pub hour: u8,
    pub season: Season,
    pub is_working_day: bool,
    pub weather_situation: WeatherSituation,
    pub temperature_norm: Option<f64>,
    pub feels_like_temp_norm: Option<f64>,
    pub humidity_norm: Option<f64>,
    pub windspeed_norm: Option<f64>,
    pub rental_count: u32,
}

impl RentalRecord {
    pub fn month(&self) -> u32 {
        self.timestamp.month()
    }

    pub fn year(&self) -> i32 {
        self.timestamp.year()
    }

    /// "%b %Y" label such as "Mar 2012".
    pub fn month_year(&self) -> String {
        self.timestamp.format(dates::MONTH_YEAR_FORMAT).to_string()
    }

    /// Monday = 0 through Sunday = 6.
    pub fn day_of_week(&self) -> u32 {
        dates::day_of_week(&self.timestamp)
    }

    /// Value of a numeric factor, with the rental count widened to `f64`.
    pub fn factor(&self, factor: Factor) -> Option<f64> {
        match factor {
            Factor::Temperature => self.temperature_norm,
            Factor::FeelsLikeTemperature => self.feels_like_temp_norm,
            Factor::Humidity => self.humidity_norm,
            Factor::WindSpeed => self.windspeed_norm,
            Factor::RentalCount => Some(f64::from(self.rental_count)),
        }
    }
}

/// The numeric columns of a record, in dataset column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Factor {
    Temperature,
    FeelsLikeTemperature,
    Humidity,
    WindSpeed,
    RentalCount,
}

impl Factor {
    pub const ALL: [Factor; 5] = [
        Factor::Temperature,
        Factor::FeelsLikeTemperature,
        Factor::Humidity,
        Factor::WindSpeed,
        Factor::RentalCount,
    ];

    /// Column name in the source CSV.
    pub fn column(self) -> &'static str {
        match self {
            Factor::Temperature => "temp",
            Factor::FeelsLikeTemperature => "atemp",
            Factor::Humidity => "hum",
            Factor::WindSpeed => "windspeed",
            Factor::RentalCount => "cnt",
        }
    }
}

/// An ordered collection of rental records; the full dataset or a filtered view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordSet {
    records: Vec<RentalRecord>,
}

impl RecordSet {
    pub fn new(records: Vec<RentalRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RentalRecord> {
        self.records.iter()
    }

    pub fn as_slice(&self) -> &[RentalRecord] {
        &self.records
    }

    /// Earliest and latest timestamp, None for an empty set.
    pub fn date_bounds(&self) -> Option<DateInterval> {
        let min = self.records.iter().map(|r| r.timestamp).min()?;
        let max = self.records.iter().map(|r| r.timestamp).max()?;
        Some(DateInterval::new(min, max))
    }

    /// Parse a headed CSV stream into a record set.
    ///
    /// Extra columns are ignored. Any row that fails to parse or violates the
    /// record bounds fails the whole read.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(reader);
        let mut records = Vec::new();
        for (index, row) in rdr.deserialize::<CsvRow>().enumerate() {
            // Row 1 is the header line.
            let record = row?.into_record(index + 2)?;
            records.push(record);
        }
        if records.is_empty() {
            return Err(BikeError::Empty);
        }
        Ok(Self { records })
    }

    pub fn from_csv_str(csv_data: &str) -> Result<Self> {
        Self::from_csv_reader(csv_data.as_bytes())
    }
}

impl FromIterator<RentalRecord> for RecordSet {
    fn from_iter<I: IntoIterator<Item = RentalRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = &'a RentalRecord;
    type IntoIter = std::slice::Iter<'a, RentalRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// One raw CSV row, named after the dataset's column headers.
#[derive(Debug, Deserialize)]
struct CsvRow {
    dteday: String,
    hr: u8,
    season: u8,
    workingday: u8,
    weathersit: u8,
    temp: Option<f64>,
    atemp: Option<f64>,
    hum: Option<f64>,
    windspeed: Option<f64>,
    cnt: u32,
}

impl CsvRow {
    fn into_record(self, row: usize) -> Result<RentalRecord> {
        let timestamp = dates::parse_date(&self.dteday).ok_or_else(|| BikeError::DateParse {
            value: self.dteday.clone(),
            row,
        })?;
        if self.hr > MAX_HOUR {
            return Err(BikeError::OutOfRange {
                field: "hr",
                value: self.hr.to_string(),
                row,
            });
        }
        let is_working_day = match self.workingday {
            0 => false,
            1 => true,
            other => {
                return Err(BikeError::OutOfRange {
                    field: "workingday",
                    value: other.to_string(),
                    row,
                })
            }
        };
        Ok(RentalRecord {
            timestamp,
            hour: self.hr,
            season: Season::try_from(self.season)?,
            is_working_day,
            weather_situation: WeatherSituation::try_from(self.weathersit)?,
            temperature_norm: normalized("temp", self.temp, row)?,
            feels_like_temp_norm: normalized("atemp", self.atemp, row)?,
            humidity_norm: normalized("hum", self.hum, row)?,
            windspeed_norm: normalized("windspeed", self.windspeed, row)?,
            rental_count: self.cnt,
        })
    }
}

/// NaN reads as missing; anything outside [0, 1] is rejected.
fn normalized(field: &'static str, value: Option<f64>, row: usize) -> Result<Option<f64>> {
    match value {
        None => Ok(None),
        Some(v) if v.is_nan() => Ok(None),
        Some(v) if (0.0..=1.0).contains(&v) => Ok(Some(v)),
        Some(v) => Err(BikeError::OutOfRange {
            field,
            value: v.to_string(),
            row,
        }),
    }
}
