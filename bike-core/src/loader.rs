//! Dataset loading with a synthetic fallback.
//!
//! The loader never fails: if the data file is absent or malformed it logs a
//! warning, remembers why, and hands back a random dataset of the same schema
//! so downstream consumers always have records to work with.

use crate::error::Result;
use crate::record::RecordSet;
use crate::synthetic::{self, DEFAULT_SAMPLE_COUNT};
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::OnceCell;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Relative filename the dashboard reads by default.
pub const DEFAULT_DATA_PATH: &str = "all_data_cleaned.csv";

/// Where and how to load the dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct LoaderConfig {
    pub path: PathBuf,
    /// Row count of the synthetic fallback
    pub sample_count: usize,
    /// Seed for the synthetic fallback; entropy when None
    pub seed: Option<u64>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DATA_PATH),
            sample_count: DEFAULT_SAMPLE_COUNT,
            seed: None,
        }
    }
}

/// Origin of the loaded records.
#[derive(Debug, Clone, PartialEq)]
pub enum DataSource {
    File(PathBuf),
    /// The file could not be used; `reason` is shown to the user.
    Synthetic { reason: String },
}

impl DataSource {
    /// User-facing warning, present only for the synthetic fallback.
    pub fn warning(&self) -> Option<&str> {
        match self {
            DataSource::File(_) => None,
            DataSource::Synthetic { reason } => Some(reason),
        }
    }
}

/// A loaded, immutable dataset and where it came from.
#[derive(Debug, Clone)]
pub struct LoadedData {
    pub records: Rc<RecordSet>,
    pub source: DataSource,
}

/// Read and parse the CSV file at `path`.
pub fn read_records(path: &Path) -> Result<RecordSet> {
    let file = File::open(path)?;
    RecordSet::from_csv_reader(BufReader::new(file))
}

/// Load the dataset described by `config`, falling back to synthetic data
/// on any read or parse failure.
pub fn load(config: &LoaderConfig) -> LoadedData {
    match read_records(&config.path) {
        Ok(records) => {
            info!(
                "[Bike Debug] loader: Loaded {} records from {}",
                records.len(),
                config.path.display()
            );
            LoadedData {
                records: Rc::new(records),
                source: DataSource::File(config.path.clone()),
            }
        }
        Err(e) => {
            let reason = format!(
                "File '{}' could not be loaded ({}). Using sample data for demonstration.",
                config.path.display(),
                e
            );
            warn!("{}", reason);
            let mut rng = match config.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let records = synthetic::generate(config.sample_count, &mut rng);
            info!(
                "[Bike Debug] loader: Generated {} synthetic records",
                records.len()
            );
            LoadedData {
                records: Rc::new(records),
                source: DataSource::Synthetic { reason },
            }
        }
    }
}

/// Loads once and hands out the same shared dataset on every later call.
#[derive(Debug)]
pub struct CachedLoader {
    config: LoaderConfig,
    cache: OnceCell<LoadedData>,
}

impl CachedLoader {
    pub fn new(config: LoaderConfig) -> Self {
        Self {
            config,
            cache: OnceCell::new(),
        }
    }

    pub fn get(&self) -> &LoadedData {
        if !self.is_loaded() {
            debug!("loader: first access, reading {}", self.config.path.display());
        }
        self.cache.get_or_init(|| load(&self.config))
    }

    pub fn is_loaded(&self) -> bool {
        self.cache.get().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::MAX_HOUR;
    use std::io::Write;

    const HEADER: &str = "dteday,hr,season,workingday,weathersit,temp,atemp,hum,windspeed,cnt\n";

    fn write_csv(body: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(HEADER.as_bytes()).unwrap();
        file.write_all(body.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn loads_existing_file() {
        let file = write_csv("2011-01-01,0,1,0,1,0.24,0.28,0.81,0.0,16\n2011-01-01,1,1,0,1,0.22,0.27,0.8,0.0,40\n");
        let config = LoaderConfig {
            path: file.path().to_path_buf(),
            ..LoaderConfig::default()
        };
        let loaded = load(&config);
        assert_eq!(loaded.records.len(), 2);
        assert_eq!(loaded.source, DataSource::File(file.path().to_path_buf()));
        assert!(loaded.source.warning().is_none());
    }

    #[test]
    fn nonexistent_file_falls_back_to_ten_thousand_rows() {
        let dir = tempfile::tempdir().unwrap();
        let config = LoaderConfig {
            path: dir.path().join("missing.csv"),
            ..LoaderConfig::default()
        };
        let loaded = load(&config);
        assert_eq!(loaded.records.len(), 10_000);
        assert!(loaded.source.warning().unwrap().contains("missing.csv"));
        for r in loaded.records.iter() {
            assert!(r.hour <= MAX_HOUR);
            for v in [
                r.temperature_norm,
                r.feels_like_temp_norm,
                r.humidity_norm,
                r.windspeed_norm,
            ] {
                assert!((0.0..=1.0).contains(&v.unwrap()));
            }
        }
    }

    #[test]
    fn malformed_file_falls_back() {
        let file = write_csv("2011-01-01,0,9,0,1,0.24,0.28,0.81,0.0,16\n");
        let config = LoaderConfig {
            path: file.path().to_path_buf(),
            sample_count: 25,
            seed: Some(3),
        };
        let loaded = load(&config);
        assert_eq!(loaded.records.len(), 25);
        assert!(matches!(loaded.source, DataSource::Synthetic { .. }));
    }

    #[test]
    fn seeded_fallback_is_reproducible() {
        let config = LoaderConfig {
            path: PathBuf::from("/nonexistent/bike/data.csv"),
            sample_count: 100,
            seed: Some(42),
        };
        assert_eq!(*load(&config).records, *load(&config).records);
    }

    #[test]
    fn cached_loader_reads_once() {
        let file = write_csv("2011-01-01,0,1,0,1,0.24,0.28,0.81,0.0,16\n");
        let loader = CachedLoader::new(LoaderConfig {
            path: file.path().to_path_buf(),
            ..LoaderConfig::default()
        });
        assert!(!loader.is_loaded());
        let first = Rc::clone(&loader.get().records);
        assert!(loader.is_loaded());

        // Removing the file must not matter once the data is cached.
        let path = file.path().to_path_buf();
        drop(file);
        assert!(!path.exists());

        let second = Rc::clone(&loader.get().records);
        assert!(Rc::ptr_eq(&first, &second));
        assert!(matches!(loader.get().source, DataSource::File(_)));
    }
}
