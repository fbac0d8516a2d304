use crate::render;
use anyhow::Result;
use clap::{Parser, Subcommand};
use skycast_core::{
    Config, Coordinates, FileStore, FixedPosition, KvStore, LocationError, LocationSource,
    OpenWeatherClient, SearchLedger, Theme, WeatherPipeline,
};
use std::sync::Arc;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "Weather lookup for the terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key.
    Configure,

    /// Show current weather and the 5-day forecast for a city.
    Show {
        /// City name; when omitted, the last search is replayed.
        city: Option<String>,
    },

    /// Show weather for an explicit position instead of a city name.
    Locate {
        /// Latitude in degrees.
        #[arg(long, allow_hyphen_values = true)]
        lat: Option<f64>,

        /// Longitude in degrees.
        #[arg(long, allow_hyphen_values = true)]
        lon: Option<f64>,
    },

    /// List recent searches.
    Recent,

    /// Toggle between the light and dark theme.
    Theme,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { city } => show(city).await,
            Command::Locate { lat, lon } => locate(lat, lon).await,
            Command::Recent => recent(),
            Command::Theme => toggle_theme(),
        }
    }
}

fn open_store() -> Result<Arc<FileStore>> {
    Ok(Arc::new(FileStore::open(FileStore::default_path()?)))
}

fn build_pipeline() -> Result<WeatherPipeline> {
    let config = Config::load()?;
    let api_key = config.require_api_key()?.to_owned();
    let store = open_store()?;

    let client = OpenWeatherClient::new(api_key);
    let store: Arc<dyn KvStore> = store;
    Ok(WeatherPipeline::new(client, store))
}

fn configure() -> Result<()> {
    let mut config = Config::load()?;

    let api_key = inquire::Text::new("OpenWeather API key:").prompt()?;
    config.set_api_key(api_key.trim().to_owned());
    config.save()?;

    println!("API key saved to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn show(city: Option<String>) -> Result<()> {
    let pipeline = build_pipeline()?;

    // No explicit city: replay the last search, as the widget did on load.
    let city = match city {
        Some(city) => city,
        None => match pipeline.last_search() {
            Some(last) => last,
            None => {
                println!("No previous search to replay. Try `skycast show <city>`.");
                return Ok(());
            }
        },
    };

    pipeline.search_by_name(&city).await;

    render::view(&pipeline.view_state());
    render::recent(&pipeline.recent_searches());
    Ok(())
}

async fn locate(lat: Option<f64>, lon: Option<f64>) -> Result<()> {
    let source = match (lat, lon) {
        (Some(lat), Some(lon)) => FixedPosition(Coordinates { lat, lon }),
        _ => {
            println!("{}", LocationError::Unsupported);
            println!("Pass both --lat and --lon.");
            return Ok(());
        }
    };

    let coords = match source.current_position() {
        Ok(coords) => coords,
        Err(err) => {
            println!("{err}");
            return Ok(());
        }
    };

    let pipeline = build_pipeline()?;
    pipeline.search_by_location(coords).await;

    render::view(&pipeline.view_state());
    render::recent(&pipeline.recent_searches());
    Ok(())
}

fn recent() -> Result<()> {
    let store: Arc<dyn KvStore> = open_store()?;
    let ledger = SearchLedger::load(store);

    if ledger.entries().is_empty() {
        println!("No recent searches.");
    } else {
        for city in ledger.entries() {
            println!("{city}");
        }
    }
    Ok(())
}

fn toggle_theme() -> Result<()> {
    let store = open_store()?;

    let theme = Theme::load(store.as_ref()).toggled();
    theme.save(store.as_ref())?;

    println!("Theme set to {theme}.");
    Ok(())
}
