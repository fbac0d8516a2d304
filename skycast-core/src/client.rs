use chrono::DateTime;
use reqwest::Client;
use serde::Deserialize;

use crate::{
    error::WeatherError,
    model::{Coordinates, CurrentWeather, ForecastDay},
};

pub const OPENWEATHER_BASE_URL: &str = "https://api.openweathermap.org";

/// The 3-hour forecast series is reduced to its local-noon rows.
const NOON_MARKER: &str = "12:00:00";

/// How many forecast days are kept.
const FORECAST_DAYS: usize = 5;

#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, OPENWEATHER_BASE_URL)
    }

    /// Point the client at a different host, e.g. a mock server in tests.
    pub fn with_base_url(api_key: String, base_url: impl Into<String>) -> Self {
        Self {
            api_key,
            base_url: base_url.into(),
            http: Client::new(),
        }
    }

    /// Fetch current conditions by city name.
    ///
    /// Any non-2xx status is reported as [`WeatherError::NotFound`]; the
    /// endpoint gives no finer signal worth distinguishing here.
    pub async fn current_weather(&self, city: &str) -> Result<CurrentWeather, WeatherError> {
        let url = format!("{}/data/2.5/weather", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(&[
                ("q", city),
                ("units", "metric"),
                ("appid", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            tracing::debug!(%status, body = %truncate_body(&body), "current weather request rejected");
            return Err(WeatherError::NotFound {
                city: city.to_string(),
            });
        }

        let parsed: OwCurrentResponse = serde_json::from_str(&body)?;

        let (icon, description) = parsed
            .weather
            .first()
            .map(|w| (w.icon.clone(), w.description.clone()))
            .unwrap_or_else(|| (String::new(), "Unknown".to_string()));

        Ok(CurrentWeather {
            city: parsed.name,
            country: parsed.sys.country.unwrap_or_default(),
            coord: Coordinates {
                lat: parsed.coord.lat,
                lon: parsed.coord.lon,
            },
            description,
            icon,
            temperature: parsed.main.temp,
            feels_like: parsed.main.feels_like,
            temp_min: parsed.main.temp_min,
            temp_max: parsed.main.temp_max,
            humidity: parsed.main.humidity,
            pressure: parsed.main.pressure,
            wind_speed: parsed.wind.speed,
            visibility_m: parsed.visibility,
        })
    }

    /// Resolve a human-readable place name for a position.
    ///
    /// Returns `Ok(None)` when the endpoint knows no place there.
    pub async fn reverse_geocode(
        &self,
        coords: Coordinates,
    ) -> Result<Option<String>, WeatherError> {
        let url = format!("{}/geo/1.0/reverse", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(&[
                ("lat", coords.lat.to_string()),
                ("lon", coords.lon.to_string()),
                ("limit", "1".to_string()),
                ("appid", self.api_key.clone()),
            ])
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            return Err(WeatherError::Status(status));
        }

        let body = res.text().await?;
        let places: Vec<OwGeoEntry> = serde_json::from_str(&body)?;

        Ok(places.into_iter().next().map(|place| place.name))
    }

    /// Fetch the 5-day forecast for a position, reduced to one noon row per
    /// day. An empty result means no noon rows were present.
    pub async fn forecast(&self, coords: Coordinates) -> Result<Vec<ForecastDay>, WeatherError> {
        let url = format!("{}/data/2.5/forecast", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(&[
                ("lat", coords.lat.to_string()),
                ("lon", coords.lon.to_string()),
                ("units", "metric".to_string()),
                ("appid", self.api_key.clone()),
            ])
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            return Err(WeatherError::Status(status));
        }

        let body = res.text().await?;
        let parsed: OwForecastResponse = serde_json::from_str(&body)?;

        let days = parsed
            .list
            .into_iter()
            .filter(|entry| entry.dt_txt.contains(NOON_MARKER))
            .take(FORECAST_DAYS)
            .map(|entry| ForecastDay {
                label: weekday_label(entry.dt),
                icon: entry
                    .weather
                    .into_iter()
                    .next()
                    .map(|w| w.icon)
                    .unwrap_or_default(),
                temperature: entry.main.temp.round() as i32,
            })
            .collect();

        Ok(days)
    }
}

fn weekday_label(ts: i64) -> String {
    DateTime::from_timestamp(ts, 0)
        .map(|dt| dt.format("%a").to_string())
        .unwrap_or_default()
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_string();
    }

    // Back off to a char boundary so multibyte bodies slice cleanly.
    let mut cut = MAX;
    while !body.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}...", &body[..cut])
}

#[derive(Debug, Deserialize)]
struct OwCoord {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    icon: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    temp_min: f64,
    temp_max: f64,
    humidity: u8,
    pressure: u32,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    sys: OwSys,
    coord: OwCoord,
    weather: Vec<OwWeather>,
    main: OwMain,
    wind: OwWind,
    visibility: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct OwGeoEntry {
    name: String,
}

#[derive(Debug, Deserialize)]
struct OwForecastMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    dt_txt: String,
    main: OwForecastMain,
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastEntry>,
}
