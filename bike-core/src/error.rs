/// Error types for loading and parsing rental data
use thiserror::Error;

/// Main error type for rental data operations
#[derive(Error, Debug)]
pub enum BikeError {
    /// Reading the data file failed
    #[error("Failed to read data file: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse CSV data
    #[error("Failed to parse CSV: {0}")]
    CsvParse(#[from] csv::Error),

    /// Date parsing failed
    #[error("Failed to parse date '{value}' on row {row}")]
    DateParse { value: String, row: usize },

    /// A field is outside the bounds of the record schema
    #[error("Invalid {field} value {value} on row {row}")]
    OutOfRange {
        field: &'static str,
        value: String,
        row: usize,
    },

    /// Season code not in 1..=4
    #[error("Unknown season code: {0}")]
    UnknownSeason(u8),

    /// Weather situation code not in 1..=4
    #[error("Unknown weather situation code: {0}")]
    UnknownWeather(u8),

    /// The file parsed but held no rows
    #[error("Data file contains no records")]
    Empty,
}

/// Type alias for Results using BikeError
pub type Result<T> = std::result::Result<T, BikeError>;
