//! Fixed colors and scales used across the dashboard.

use bike_core::Season;

pub const WEEKEND_COLOR: &str = "#4CAF50";
pub const WEEKDAY_COLOR: &str = "#2196F3";

pub fn season_color(season: Season) -> &'static str {
    match season {
        Season::Spring => "#4CAF50",
        Season::Summer => "#FF9800",
        Season::Fall => "#F44336",
        Season::Winter => "#2196F3",
    }
}

/// Six-stop light-to-dark blue scale of the weekly heatmap.
pub const HEATMAP_STOPS: [(f64, &str); 6] = [
    (0.0, "#E3F2FD"),
    (0.2, "#90CAF9"),
    (0.4, "#42A5F5"),
    (0.6, "#1E88E5"),
    (0.8, "#1565C0"),
    (1.0, "#0D47A1"),
];

pub const CORRELATION_SCHEME: &str = "RdBu_r";
pub const WEATHER_BAR_SCHEME: &str = "Blues";
pub const TEMPERATURE_SCHEME: &str = "Viridis";
pub const HUMIDITY_SCHEME: &str = "Blues";
pub const WINDSPEED_SCHEME: &str = "Greens";
pub const RENTALS_3D_SCHEME: &str = "Viridis";
