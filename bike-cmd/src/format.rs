//! Display strings for the headline metric cards.
//!
//! Unavailable metrics render as [`UNAVAILABLE`].

use bike_db::models::HeadlineMetrics;
use serde::Serialize;

pub const UNAVAILABLE: &str = "-";

/// Group the digits of `n` in threes with commas.
pub fn thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Truncate toward zero and group digits; negative or non-finite values
/// are unavailable.
fn whole(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() && v >= 0.0 => thousands(v.trunc() as u64),
        _ => UNAVAILABLE.to_string(),
    }
}

fn percent(fraction: f64) -> String {
    format!("{:.1}%", fraction * 100.0)
}

/// One metric card: a label, a value and an optional delta line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricCard {
    pub label: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delta: Option<String>,
}

impl MetricCard {
    fn new(label: &str, value: String, delta: Option<String>) -> Self {
        Self {
            label: label.to_string(),
            value,
            delta,
        }
    }
}

pub fn metric_cards(metrics: &HeadlineMetrics) -> Vec<MetricCard> {
    let total = MetricCard::new(
        "Total Rentals",
        metrics
            .total_rentals
            .map(thousands)
            .unwrap_or_else(|| UNAVAILABLE.to_string()),
        metrics
            .total_share
            .map(|share| format!("{} of total", percent(share))),
    );

    let daily = MetricCard::new("Avg. Daily Rentals", whole(metrics.avg_daily_rentals), None);

    let peak = match metrics.peak_hour {
        Some(peak) => MetricCard::new(
            "Peak Hour",
            format!("{}:00", peak.hour),
            Some(format!("Avg: {} rentals", peak.mean.trunc() as u64)),
        ),
        None => MetricCard::new("Peak Hour", UNAVAILABLE.to_string(), None),
    };

    let cmp = &metrics.weekend_vs_weekday;
    let day_type = MetricCard::new(
        "Weekend vs Weekday",
        format!("{} vs {}", whole(cmp.weekend_avg), whole(cmp.weekday_avg)),
        cmp.relative_difference
            .map(|diff| format!("{} difference", percent(diff))),
    );

    vec![total, daily, peak, day_type]
}

#[cfg(test)]
mod tests {
    use super::*;
    use bike_db::models::{DayTypeComparison, PeakHour};

    #[test]
    fn thousands_groups_digits() {
        assert_eq!(thousands(0), "0");
        assert_eq!(thousands(999), "999");
        assert_eq!(thousands(1_000), "1,000");
        assert_eq!(thousands(3_292_679), "3,292,679");
    }

    #[test]
    fn cards_format_like_the_dashboard() {
        let metrics = HeadlineMetrics {
            total_rentals: Some(1_234_567),
            total_share: Some(0.4567),
            avg_daily_rentals: Some(4_504.9),
            peak_hour: Some(PeakHour {
                hour: 17,
                mean: 461.45,
            }),
            weekend_vs_weekday: DayTypeComparison {
                weekend_avg: Some(4_330.2),
                weekday_avg: Some(4_584.8),
                relative_difference: Some(-0.0554),
            },
        };
        let cards = metric_cards(&metrics);
        assert_eq!(cards[0].value, "1,234,567");
        assert_eq!(cards[0].delta.as_deref(), Some("45.7% of total"));
        assert_eq!(cards[1].value, "4,504");
        assert_eq!(cards[2].value, "17:00");
        assert_eq!(cards[2].delta.as_deref(), Some("Avg: 461 rentals"));
        assert_eq!(cards[3].value, "4,330 vs 4,584");
        assert_eq!(cards[3].delta.as_deref(), Some("-5.5% difference"));
    }

    #[test]
    fn unavailable_metrics_render_as_dash() {
        let cards = metric_cards(&HeadlineMetrics::default());
        assert_eq!(cards.len(), 4);
        assert_eq!(cards[0].value, "-");
        assert_eq!(cards[0].delta, None);
        assert_eq!(cards[1].value, "-");
        assert_eq!(cards[2].value, "-");
        assert_eq!(cards[3].value, "- vs -");
        assert_eq!(cards[3].delta, None);
    }
}
