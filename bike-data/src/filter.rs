//! The filter engine: a conjunction of date, season and weather predicates.

use bike_core::{DateInterval, RecordSet, RentalRecord, Season, WeatherSituation};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The user's current filter controls.
///
/// Both date endpoints must be present for the date predicate to apply; with
/// only one (or neither) the date dimension passes everything through. An
/// empty season or weather set likewise means "no restriction".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    #[serde(default)]
    pub start: Option<NaiveDate>,
    #[serde(default)]
    pub end: Option<NaiveDate>,
    #[serde(default)]
    pub seasons: BTreeSet<Season>,
    #[serde(default)]
    pub weather: BTreeSet<WeatherSituation>,
}

impl FilterSelection {
    /// The dashboard's initial state: the dataset's full date range with
    /// every season and weather situation selected.
    pub fn all_for(records: &RecordSet) -> Self {
        let bounds = records.date_bounds();
        Self {
            start: bounds.map(|b| b.start),
            end: bounds.map(|b| b.end),
            seasons: Season::ALL.into_iter().collect(),
            weather: WeatherSituation::ALL.into_iter().collect(),
        }
    }

    /// The inclusive date interval, only when both endpoints are chosen.
    pub fn date_interval(&self) -> Option<DateInterval> {
        match (self.start, self.end) {
            (Some(start), Some(end)) => Some(DateInterval::new(start, end)),
            _ => None,
        }
    }

    pub fn matches(&self, record: &RentalRecord) -> bool {
        self.date_interval()
            .map_or(true, |interval| interval.contains(record.timestamp))
            && (self.seasons.is_empty() || self.seasons.contains(&record.season))
            && (self.weather.is_empty() || self.weather.contains(&record.weather_situation))
    }
}

/// Records of `records` satisfying every predicate of `selection`, in source order.
pub fn filter(records: &RecordSet, selection: &FilterSelection) -> RecordSet {
    let view: RecordSet = records
        .iter()
        .filter(|r| selection.matches(r))
        .copied()
        .collect();
    log::debug!("filter: kept {} of {} records", view.len(), records.len());
    view
}

#[cfg(test)]
mod tests {
    use super::*;
    use bike_core::synthetic;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(timestamp: NaiveDate, season: Season, weather: WeatherSituation, cnt: u32) -> RentalRecord {
        RentalRecord {
            timestamp,
            hour: 8,
            season,
            is_working_day: true,
            weather_situation: weather,
            temperature_norm: Some(0.5),
            feels_like_temp_norm: Some(0.5),
            humidity_norm: Some(0.5),
            windspeed_norm: Some(0.1),
            rental_count: cnt,
        }
    }

    fn sample() -> RecordSet {
        RecordSet::new(vec![
            record(date(2011, 1, 5), Season::Spring, WeatherSituation::Clear, 10),
            record(date(2011, 4, 2), Season::Summer, WeatherSituation::MistCloudy, 20),
            record(date(2011, 7, 9), Season::Fall, WeatherSituation::LightPrecipitation, 30),
            record(date(2011, 10, 1), Season::Winter, WeatherSituation::Clear, 40),
            record(date(2011, 4, 3), Season::Summer, WeatherSituation::Clear, 50),
        ])
    }

    fn total(rs: &RecordSet) -> u64 {
        rs.iter().map(|r| u64::from(r.rental_count)).sum()
    }

    #[test]
    fn default_selection_is_identity() {
        let records = synthetic::generate(500, &mut StdRng::seed_from_u64(5));
        let selection = FilterSelection::all_for(&records);
        assert_eq!(filter(&records, &selection), records);

        let fixed = sample();
        assert_eq!(filter(&fixed, &FilterSelection::all_for(&fixed)), fixed);
    }

    #[test]
    fn filter_is_idempotent() {
        let records = synthetic::generate(500, &mut StdRng::seed_from_u64(9));
        let selection = FilterSelection {
            start: Some(date(2011, 3, 1)),
            end: Some(date(2012, 2, 1)),
            seasons: [Season::Summer, Season::Fall].into_iter().collect(),
            weather: [WeatherSituation::Clear].into_iter().collect(),
        };
        let once = filter(&records, &selection);
        let twice = filter(&once, &selection);
        assert_eq!(once, twice);
        assert!(once.len() < records.len());
    }

    #[test]
    fn date_interval_is_inclusive() {
        let selection = FilterSelection {
            start: Some(date(2011, 4, 2)),
            end: Some(date(2011, 7, 9)),
            ..FilterSelection::default()
        };
        let view = filter(&sample(), &selection);
        let counts: Vec<u32> = view.iter().map(|r| r.rental_count).collect();
        assert_eq!(counts, vec![20, 30, 50]);
    }

    #[test]
    fn single_endpoint_passes_dates_through() {
        let selection = FilterSelection {
            start: Some(date(2011, 12, 1)),
            ..FilterSelection::default()
        };
        assert!(selection.date_interval().is_none());
        assert_eq!(filter(&sample(), &selection), sample());
    }

    #[test]
    fn empty_sets_mean_no_restriction() {
        let view = filter(&sample(), &FilterSelection::default());
        assert_eq!(view.len(), 5);
    }

    #[test]
    fn predicates_combine_with_and_and_keep_order() {
        let selection = FilterSelection {
            seasons: [Season::Summer, Season::Winter].into_iter().collect(),
            weather: [WeatherSituation::Clear].into_iter().collect(),
            ..FilterSelection::default()
        };
        let view = filter(&sample(), &selection);
        let counts: Vec<u32> = view.iter().map(|r| r.rental_count).collect();
        assert_eq!(counts, vec![40, 50]);
        assert!(view.iter().all(|r| selection.matches(r)));
    }

    #[test]
    fn season_subset_never_increases_total() {
        let records = synthetic::generate(300, &mut StdRng::seed_from_u64(21));
        for season in Season::ALL {
            let selection = FilterSelection {
                seasons: [season].into_iter().collect(),
                ..FilterSelection::default()
            };
            assert!(total(&filter(&records, &selection)) <= total(&records));
        }
    }

    #[test]
    fn absent_season_yields_empty_view() {
        let records = RecordSet::new(vec![
            record(date(2011, 1, 5), Season::Spring, WeatherSituation::Clear, 10),
            record(date(2011, 1, 6), Season::Spring, WeatherSituation::Clear, 12),
        ]);
        let selection = FilterSelection {
            seasons: [Season::Winter].into_iter().collect(),
            ..FilterSelection::default()
        };
        assert!(filter(&records, &selection).is_empty());
    }

    #[test]
    fn inverted_interval_selects_nothing() {
        let selection = FilterSelection {
            start: Some(date(2011, 12, 1)),
            end: Some(date(2011, 1, 1)),
            ..FilterSelection::default()
        };
        assert!(filter(&sample(), &selection).is_empty());
    }

    #[test]
    fn selection_deserializes_from_codes() {
        let selection: FilterSelection = serde_json::from_str(
            r#"{"start":"2011-01-01","end":"2011-06-30","seasons":[1,2],"weather":[]}"#,
        )
        .unwrap();
        assert_eq!(selection.start, Some(date(2011, 1, 1)));
        assert!(selection.seasons.contains(&Season::Summer));
        assert!(selection.weather.is_empty());

        let bare: FilterSelection = serde_json::from_str("{}").unwrap();
        assert_eq!(bare, FilterSelection::default());
    }
}
