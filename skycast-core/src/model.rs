use serde::{Deserialize, Serialize};

/// Geographic position, as returned by the weather endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// Current conditions for a resolved location.
///
/// Recomputed fresh on every successful fetch; the previous value is simply
/// replaced, never updated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub city: String,
    pub country: String,
    pub coord: Coordinates,
    pub description: String,
    pub icon: String,
    pub temperature: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub humidity: u8,
    pub pressure: u32,
    pub wind_speed: f64,
    /// Meters; the upstream schema omits it for some stations.
    pub visibility_m: Option<u32>,
}

impl CurrentWeather {
    /// Position of the current temperature within [`temp_min`, `temp_max`]
    /// as a percentage, for a range indicator. A zero-width range puts the
    /// indicator at the midpoint.
    ///
    /// [`temp_min`]: CurrentWeather::temp_min
    /// [`temp_max`]: CurrentWeather::temp_max
    pub fn temp_range_position(&self) -> u8 {
        let range = self.temp_max - self.temp_min;
        if range > 0.0 {
            let pct = (self.temperature - self.temp_min) / range * 100.0;
            pct.round().clamp(0.0, 100.0) as u8
        } else {
            50
        }
    }
}

/// One row of the 5-day forecast: the local-noon sample of a day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    /// Short weekday label, e.g. "Mon".
    pub label: String,
    pub icon: String,
    /// Rounded to the nearest degree.
    pub temperature: i32,
}

/// Presentation state owned by the pipeline.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ViewState {
    #[default]
    Idle,
    Loading,
    Success {
        current: CurrentWeather,
        /// `None` when the forecast fetch failed or produced no noon rows;
        /// the forecast section is simply hidden in that case.
        forecast: Option<Vec<ForecastDay>>,
    },
    Error(String),
}
