//! Filtering, statistics and sampling over rental records.
//!
//! This crate turns a loaded record set into the filtered view and provides
//! the numeric helpers the charts need that SQL grouping does not cover.

pub mod filter;

pub use filter::{filter, FilterSelection};

/// Correlation, least-squares trend and histogram binning.
///
/// Missing values are excluded pairwise; degenerate inputs (fewer than two
/// points, zero variance) yield `None` instead of NaN.
pub mod stats {
    use bike_core::{Factor, RentalRecord};
    use serde::Serialize;

    /// Pearson correlation coefficient of paired samples.
    pub fn pearson<I>(pairs: I) -> Option<f64>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let pairs: Vec<(f64, f64)> = pairs
            .into_iter()
            .filter(|(x, y)| x.is_finite() && y.is_finite())
            .collect();
        if pairs.len() < 2 {
            return None;
        }
        let n = pairs.len() as f64;
        let mean_x = pairs.iter().map(|p| p.0).sum::<f64>() / n;
        let mean_y = pairs.iter().map(|p| p.1).sum::<f64>() / n;

        let mut cov = 0.0;
        let mut var_x = 0.0;
        let mut var_y = 0.0;
        for (x, y) in &pairs {
            let dx = x - mean_x;
            let dy = y - mean_y;
            cov += dx * dy;
            var_x += dx * dx;
            var_y += dy * dy;
        }
        if var_x == 0.0 || var_y == 0.0 {
            return None;
        }
        Some((cov / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0))
    }

    /// Symmetric matrix of pairwise Pearson coefficients.
    #[derive(Debug, Clone, PartialEq, Serialize)]
    pub struct CorrelationMatrix {
        pub factors: Vec<Factor>,
        /// `values[i][j]` correlates `factors[i]` with `factors[j]`
        pub values: Vec<Vec<Option<f64>>>,
    }

    impl CorrelationMatrix {
        #[cfg(test)]
        pub fn get(&self, a: Factor, b: Factor) -> Option<f64> {
            let i = self.factors.iter().position(|f| *f == a)?;
            let j = self.factors.iter().position(|f| *f == b)?;
            self.values[i][j]
        }
    }

    /// Correlate every pair of `factors` over `records`, using only the rows
    /// where both values of a pair are present.
    pub fn correlation_matrix(records: &[RentalRecord], factors: &[Factor]) -> CorrelationMatrix {
        let values = factors
            .iter()
            .map(|a| {
                factors
                    .iter()
                    .map(|b| {
                        let r = pearson(
                            records
                                .iter()
                                .filter_map(|rec| Some((rec.factor(*a)?, rec.factor(*b)?))),
                        );
                        // A defined self-correlation is exactly 1
                        if a == b {
                            r.map(|_| 1.0)
                        } else {
                            r
                        }
                    })
                    .collect()
            })
            .collect();
        CorrelationMatrix {
            factors: factors.to_vec(),
            values,
        }
    }

    /// An ordinary least squares line `y = slope * x + intercept`.
    #[derive(Debug, Clone, Copy, PartialEq, Serialize)]
    pub struct LinearFit {
        pub slope: f64,
        pub intercept: f64,
    }

    impl LinearFit {
        pub fn predict(&self, x: f64) -> f64 {
            self.slope * x + self.intercept
        }
    }

    pub fn linear_fit<I>(points: I) -> Option<LinearFit>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let points: Vec<(f64, f64)> = points
            .into_iter()
            .filter(|(x, y)| x.is_finite() && y.is_finite())
            .collect();
        if points.len() < 2 {
            return None;
        }
        let n = points.len() as f64;
        let mean_x = points.iter().map(|p| p.0).sum::<f64>() / n;
        let mean_y = points.iter().map(|p| p.1).sum::<f64>() / n;
        let sxx: f64 = points.iter().map(|(x, _)| (x - mean_x).powi(2)).sum();
        if sxx == 0.0 {
            return None;
        }
        let sxy: f64 = points
            .iter()
            .map(|(x, y)| (x - mean_x) * (y - mean_y))
            .sum();
        let slope = sxy / sxx;
        Some(LinearFit {
            slope,
            intercept: mean_y - slope * mean_x,
        })
    }

    /// One histogram bucket covering `[start, end)`; the last bucket also
    /// includes its upper edge.
    #[derive(Debug, Clone, Copy, PartialEq, Serialize)]
    pub struct HistogramBin {
        pub start: f64,
        pub end: f64,
        pub count: usize,
    }

    /// Equal-width histogram of `values` over their observed range.
    ///
    /// A constant input is widened to `[v - 0.5, v + 0.5]`.
    pub fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
        let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if finite.is_empty() || bins == 0 {
            return Vec::new();
        }
        let mut lo = finite.iter().copied().fold(f64::INFINITY, f64::min);
        let mut hi = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if lo == hi {
            lo -= 0.5;
            hi += 0.5;
        }
        let width = (hi - lo) / bins as f64;
        let mut counts = vec![0usize; bins];
        for v in &finite {
            let idx = (((v - lo) / width) as usize).min(bins - 1);
            counts[idx] += 1;
        }
        counts
            .into_iter()
            .enumerate()
            .map(|(i, count)| HistogramBin {
                start: lo + width * i as f64,
                end: if i + 1 == bins { hi } else { lo + width * (i + 1) as f64 },
                count,
            })
            .collect()
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use bike_core::{Season, WeatherSituation};
        use chrono::NaiveDate;

        fn rec(temp: Option<f64>, hum: Option<f64>, cnt: u32) -> RentalRecord {
            RentalRecord {
                timestamp: NaiveDate::from_ymd_opt(2011, 5, 1).unwrap(),
                hour: 12,
                season: Season::Summer,
                is_working_day: true,
                weather_situation: WeatherSituation::Clear,
                temperature_norm: temp,
                feels_like_temp_norm: temp,
                humidity_norm: hum,
                windspeed_norm: Some(0.2),
                rental_count: cnt,
            }
        }

        #[test]
        fn test_pearson_perfect_linear() {
            let r = pearson([(1.0, 3.0), (2.0, 5.0), (3.0, 7.0), (4.0, 9.0)]).unwrap();
            assert!((r - 1.0).abs() < 1e-12);
            let r = pearson([(1.0, 9.0), (2.0, 7.0), (3.0, 5.0)]).unwrap();
            assert!((r + 1.0).abs() < 1e-12);
        }

        #[test]
        fn test_pearson_degenerate() {
            assert!(pearson([(1.0, 2.0)]).is_none());
            assert!(pearson([(1.0, 2.0), (1.0, 3.0)]).is_none());
            assert!(pearson(std::iter::empty()).is_none());
        }

        #[test]
        fn test_correlation_rentals_linear_in_temperature() {
            let records: Vec<RentalRecord> = (0..20)
                .map(|i| {
                    let t = i as f64 / 20.0;
                    rec(Some(t), Some(0.5 + (i % 3) as f64 * 0.1), 100 + 20 * i)
                })
                .collect();
            let matrix = correlation_matrix(&records, &Factor::ALL);
            let r = matrix.get(Factor::Temperature, Factor::RentalCount).unwrap();
            assert!((r - 1.0).abs() < 1e-9, "expected 1.0, got {}", r);
            assert_eq!(matrix.get(Factor::Humidity, Factor::Humidity), Some(1.0));
            assert_eq!(
                matrix.get(Factor::Humidity, Factor::RentalCount),
                matrix.get(Factor::RentalCount, Factor::Humidity)
            );
        }

        #[test]
        fn test_correlation_skips_missing_pairwise() {
            let records = vec![
                rec(Some(0.1), None, 10),
                rec(Some(0.2), Some(0.9), 20),
                rec(Some(0.3), Some(0.8), 30),
                rec(None, Some(0.7), 40),
                rec(Some(0.5), Some(0.6), 50),
            ];
            let matrix = correlation_matrix(&records, &Factor::ALL);
            let r = matrix.get(Factor::Temperature, Factor::RentalCount).unwrap();
            assert!((r - 1.0).abs() < 1e-9);
            let r = matrix.get(Factor::Humidity, Factor::RentalCount).unwrap();
            assert!((r + 1.0).abs() < 1e-9);
        }

        #[test]
        fn test_correlation_constant_column_is_undefined() {
            let records = vec![rec(Some(0.1), Some(0.5), 10), rec(Some(0.2), Some(0.5), 20)];
            let matrix = correlation_matrix(&records, &Factor::ALL);
            assert_eq!(matrix.get(Factor::Humidity, Factor::RentalCount), None);
            assert_eq!(matrix.get(Factor::Humidity, Factor::Humidity), None);
        }

        #[test]
        fn test_linear_fit_recovers_line() {
            let fit = linear_fit((0..10).map(|i| {
                let x = i as f64;
                (x, 2.5 * x - 4.0)
            }))
            .unwrap();
            assert!((fit.slope - 2.5).abs() < 1e-9);
            assert!((fit.intercept + 4.0).abs() < 1e-9);
            assert!((fit.predict(2.0) - 1.0).abs() < 1e-9);
        }

        #[test]
        fn test_linear_fit_vertical_is_none() {
            assert!(linear_fit([(1.0, 1.0), (1.0, 5.0)]).is_none());
        }

        #[test]
        fn test_histogram_counts_every_value() {
            let values: Vec<f64> = (0..=100).map(|v| v as f64).collect();
            let bins = histogram(&values, 30);
            assert_eq!(bins.len(), 30);
            assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 101);
            assert_eq!(bins[0].start, 0.0);
            assert_eq!(bins[29].end, 100.0);
            // The maximum lands in the closed last bin
            assert!(bins[29].count >= 1);
        }

        #[test]
        fn test_histogram_constant_and_empty() {
            let bins = histogram(&[7.0, 7.0, 7.0], 30);
            assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 3);
            assert_eq!(bins[0].start, 6.5);
            assert!(histogram(&[], 30).is_empty());
        }
    }
}

/// Uniform random subsampling for scatter charts.
pub mod sample {
    use rand::seq::index;
    use rand::Rng;

    /// At most `max` items drawn uniformly without replacement, in source order.
    pub fn subsample<T: Clone, R: Rng + ?Sized>(items: &[T], max: usize, rng: &mut R) -> Vec<T> {
        if items.len() <= max {
            return items.to_vec();
        }
        let mut picked = index::sample(rng, items.len(), max).into_vec();
        picked.sort_unstable();
        picked.into_iter().map(|i| items[i].clone()).collect()
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use rand::rngs::StdRng;
        use rand::SeedableRng;

        #[test]
        fn test_small_input_is_returned_whole() {
            let items = vec![3, 1, 2];
            let mut rng = StdRng::seed_from_u64(1);
            assert_eq!(subsample(&items, 1_000, &mut rng), items);
        }

        #[test]
        fn test_large_input_is_capped_and_ordered() {
            let items: Vec<usize> = (0..5_000).collect();
            let mut rng = StdRng::seed_from_u64(2);
            let picked = subsample(&items, 1_000, &mut rng);
            assert_eq!(picked.len(), 1_000);
            assert!(picked.windows(2).all(|w| w[0] < w[1]));
        }

        #[test]
        fn test_same_seed_same_sample() {
            let items: Vec<usize> = (0..3_000).collect();
            let a = subsample(&items, 100, &mut StdRng::seed_from_u64(8));
            let b = subsample(&items, 100, &mut StdRng::seed_from_u64(8));
            assert_eq!(a, b);
        }
    }
}
