//! The fetch pipeline: resolve a location, fetch current conditions, fetch
//! the forecast, and step the view state through
//! Idle -> Loading -> Success | Error.
//!
//! Requests are fenced with a monotonically increasing token so a slow
//! response from an earlier search can never overwrite the output of a
//! later one.

use parking_lot::Mutex;
use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use crate::{
    client::OpenWeatherClient,
    ledger::SearchLedger,
    model::{Coordinates, ViewState},
    store::KvStore,
};

/// Store key holding the last submitted search, replayed on the next start.
pub const LAST_SEARCH_KEY: &str = "lastSearch";

pub struct WeatherPipeline {
    client: OpenWeatherClient,
    store: Arc<dyn KvStore>,
    ledger: Mutex<SearchLedger>,
    state: Mutex<ViewState>,
    seq: AtomicU64,
}

impl WeatherPipeline {
    pub fn new(client: OpenWeatherClient, store: Arc<dyn KvStore>) -> Self {
        let ledger = SearchLedger::load(Arc::clone(&store));

        Self {
            client,
            store,
            ledger: Mutex::new(ledger),
            state: Mutex::new(ViewState::Idle),
            seq: AtomicU64::new(0),
        }
    }

    /// Current presentation state, for the view layer to render.
    pub fn view_state(&self) -> ViewState {
        self.state.lock().clone()
    }

    /// Recent searches, most recent first.
    pub fn recent_searches(&self) -> Vec<String> {
        self.ledger.lock().entries().to_vec()
    }

    /// The last submitted search, if any.
    pub fn last_search(&self) -> Option<String> {
        self.store.get(LAST_SEARCH_KEY).ok().flatten()
    }

    /// Search by city name. Empty or whitespace-only input is a no-op: the
    /// view state is left untouched.
    ///
    /// The city is recorded into the ledger and as the last search as soon
    /// as it passes validation, before the fetch resolves.
    pub async fn search_by_name(&self, city: &str) {
        let city = city.trim();
        if city.is_empty() {
            return;
        }

        let token = self.begin();
        self.record_search(city);
        self.run_fetch(token, city).await;
    }

    /// Search by position: reverse-geocode to a city name, then proceed as
    /// [`search_by_name`].
    ///
    /// A position the geocoder knows no place for leaves the current state
    /// untouched and records nothing; only a failed geocode call surfaces
    /// an error.
    ///
    /// No token is taken until the geocode resolves: the no-op path must
    /// not invalidate a search already in flight.
    ///
    /// [`search_by_name`]: WeatherPipeline::search_by_name
    pub async fn search_by_location(&self, coords: Coordinates) {
        match self.client.reverse_geocode(coords).await {
            Ok(Some(city)) => {
                let token = self.begin();
                self.record_search(&city);
                self.run_fetch(token, &city).await;
            }
            Ok(None) => {
                tracing::warn!(lat = coords.lat, lon = coords.lon, "no place found for position");
            }
            Err(err) => {
                tracing::debug!(error = %err, "reverse geocoding failed");
                let token = self.begin();
                self.apply(token, ViewState::Error("Error fetching location data".to_string()));
            }
        }
    }

    async fn run_fetch(&self, token: u64, city: &str) {
        self.apply(token, ViewState::Loading);

        match self.client.current_weather(city).await {
            Ok(current) => {
                // Forecast coordinates come from the current-weather
                // response, never from user input, so the forecast always
                // matches the displayed location.
                let forecast = match self.client.forecast(current.coord).await {
                    Ok(days) if !days.is_empty() => Some(days),
                    Ok(_) => None,
                    Err(err) => {
                        tracing::debug!(error = %err, "forecast fetch failed; hiding forecast");
                        None
                    }
                };

                self.apply(token, ViewState::Success { current, forecast });
            }
            Err(err) => self.apply(token, ViewState::Error(err.to_string())),
        }
    }

    fn record_search(&self, city: &str) {
        self.ledger.lock().record(city);

        if let Err(err) = self.store.set(LAST_SEARCH_KEY, city) {
            tracing::warn!(error = %err, "failed to persist last search");
        }
    }

    fn begin(&self) -> u64 {
        self.seq.fetch_add(1, Ordering::SeqCst) + 1
    }

    // Apply a state transition unless a newer request has started since
    // `token` was issued.
    fn apply(&self, token: u64, next: ViewState) {
        if self.seq.load(Ordering::SeqCst) != token {
            tracing::debug!(token, "discarding stale response");
            return;
        }

        *self.state.lock() = next;
    }
}
