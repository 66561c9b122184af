//! Static narrative text shown alongside the charts.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Section {
    pub title: &'static str,
    pub items: &'static [&'static str],
}

pub const ANALYSIS_QUESTIONS: Section = Section {
    title: "Analysis Questions",
    items: &[
        "How does the bike rental pattern vary throughout the day, and is there a difference between weekdays and weekends?",
        "How does weather affect bike rentals?",
    ],
};

pub const KEY_OBSERVATIONS: Section = Section {
    title: "Key Observations",
    items: &[
        "Weekdays: Show two distinct peaks - morning (7-9 AM) and evening (5-7 PM), corresponding to commuting hours.",
        "Weekends: Have a more even distribution throughout the day with a gradual increase from morning to afternoon (10 AM-4 PM), suggesting recreational use.",
        "The lowest usage for both weekdays and weekends occurs during early morning hours (2-5 AM).",
    ],
};

pub const KEY_INSIGHTS: Section = Section {
    title: "Key Insights",
    items: &[
        "Temperature has a significant positive correlation with bike rentals.",
        "Humidity shows a negative correlation with rentals.",
        "Peak rental hours differ between weekdays and weekends.",
    ],
};

pub const DAILY_PATTERN_CONCLUSIONS: Section = Section {
    title: "How does the bike rental pattern vary throughout the day, and is there a difference between weekdays and weekends?",
    items: &[
        "Weekday rentals show distinct commuting patterns with peaks during morning (7-9 AM) and evening (5-7 PM) rush hours.",
        "Weekend rentals display a more even distribution with highest usage during midday (10 AM-4 PM), suggesting recreational use.",
        "Overall, weekday usage is more concentrated at specific hours, while weekend usage is more spread out across the day.",
    ],
};

pub const WEATHER_CONCLUSIONS: Section = Section {
    title: "How does weather affect bike rentals?",
    items: &[
        "Clear weather conditions result in significantly higher bike rentals.",
        "Temperature has the strongest positive correlation with rentals.",
        "High humidity and precipitation drastically reduce bike usage.",
        "Wind speed has a moderate negative effect on rental numbers.",
    ],
};

pub const RECOMMENDATIONS: Section = Section {
    title: "Business Recommendations",
    items: &[
        "Demand-Based Resource Allocation: Adjust bike availability and maintenance schedules based on time patterns - focus on commuting hours during weekdays and midday during weekends.",
        "Weather-Based Pricing: Implement dynamic pricing strategies based on weather forecasts to optimize revenue.",
        "Marketing Strategies: Promote different benefits of bike sharing depending on day type - convenience for commuters on weekdays vs recreational activity on weekends.",
        "Weather Contingency Plans: Develop strategies to mitigate revenue loss during unfavorable weather conditions, such as covered stations or weather protection accessories.",
    ],
};

/// Every narrative section, in page order.
pub const SECTIONS: [Section; 6] = [
    ANALYSIS_QUESTIONS,
    KEY_OBSERVATIONS,
    KEY_INSIGHTS,
    DAILY_PATTERN_CONCLUSIONS,
    WEATHER_CONCLUSIONS,
    RECOMMENDATIONS,
];
