//! Core library for the `skycast` weather lookup tool.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather HTTP client
//! - The recent-searches ledger and its persistent key-value store
//! - The fetch pipeline and the view state it drives
//!
//! It is used by `skycast-cli`, but can also be reused by other binaries or services.

pub mod client;
pub mod config;
pub mod error;
pub mod ledger;
pub mod location;
pub mod model;
pub mod pipeline;
pub mod store;
pub mod theme;

pub use client::OpenWeatherClient;
pub use config::Config;
pub use error::WeatherError;
pub use ledger::SearchLedger;
pub use location::{FixedPosition, LocationError, LocationSource};
pub use model::{Coordinates, CurrentWeather, ForecastDay, ViewState};
pub use pipeline::WeatherPipeline;
pub use store::{FileStore, KvStore, MemoryStore, StoreError};
pub use theme::Theme;
